//! Batch reconciliation over order rows.
//!
//! Drives the codec over every row of an order batch and partitions the
//! rows into paired successes, hard errors, and non-custom exclusions.
//! No failure crosses a row boundary: every input row produces exactly one
//! outcome, and the totals always reconcile against the input count.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog;
use crate::constants::catalog::{
    DEFAULT_CATEGORY_ID, DEFAULT_DECLARE_AMOUNT_USD, DEFAULT_DEVELOPER, DEFAULT_PURCHASER,
    DEFAULT_PURCHASE_PRICE_RMB, DEFAULT_SALES_TYPE, DEFAULT_WEIGHT_GRAMS, LED_ACCESSORY_SKU,
};
use crate::constants::columns;
use crate::constants::extract::CUSTOMIZATION_MARKER;
use crate::errors::PairingError;
use crate::extract::{BoxType, CardConfidence, ParsedAttributes, extract_attributes};
use crate::generate::{GeneratedIdentifiers, combo_sku, short_identifier, single_sku};
use crate::registry::CardRegistry;
use crate::session::BatchSession;
use crate::spec::{ProductSpec, parse_product_spec};
use crate::types::{ColumnName, DateTag, ImageUrl, MarketplaceSku, OrderNo, Sku, SpecText};
use crate::validate::{validate_charset, validate_dual_name_required};

/// Classification of a rejected or warned batch row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Marketplace SKU has too few tokens or no customization marker.
    ParseFailure,
    /// The customization note carries no primary engraving name.
    MissingName1,
    /// An engraving name contains characters the machine cannot engrave.
    InvalidNameCharset,
    /// The note used the Name 1/Name 2 convention but left Name 2 blank.
    MissingName2ForDualFormat,
    /// Two rows produced the same short identifier; probable duplicate order.
    IdentifierCollision,
    /// Card code extracted below Medium confidence; row still succeeds.
    LowConfidenceCardCode,
    /// Card code absent from the registry; the card component is omitted.
    CardCodeNotFound,
}

impl ErrorKind {
    /// Hard errors exclude the row from the success output; the two soft
    /// kinds only warn.
    pub const fn is_hard(self) -> bool {
        !matches!(self, Self::LowConfidenceCardCode | Self::CardCodeNotFound)
    }

    /// Remediation hint surfaced next to the diagnostic row.
    pub const fn suggested_action(self) -> &'static str {
        match self {
            Self::ParseFailure => {
                "check the marketplace SKU format (product code, engraved marker, box token)"
            }
            Self::MissingName1 => "fill in Name 1 in the order's customization note",
            Self::InvalidNameCharset => "replace non-engravable characters in the names",
            Self::MissingName2ForDualFormat => {
                "the order uses the Name 1/Name 2 format; confirm Name 2 with the buyer"
            }
            Self::IdentifierCollision => {
                "likely duplicate order; review both orders before importing"
            }
            Self::LowConfidenceCardCode => "verify the extracted card code before importing",
            Self::CardCodeNotFound => "add the card code to the card mapping or fix the SKU",
        }
    }
}

/// One diagnostic line of the error report. Accumulated, never discarded.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Order the diagnostic belongs to.
    pub order_no: OrderNo,
    /// Raw marketplace SKU of the offending row.
    pub marketplace_sku: MarketplaceSku,
    /// Taxonomy bucket.
    pub error_kind: ErrorKind,
    /// Human-readable detail for this occurrence.
    pub detail: String,
    /// Remediation hint for the back office.
    pub suggested_action: String,
}

impl ErrorRecord {
    fn new(row: &BatchRow, kind: ErrorKind, detail: String) -> Self {
        Self {
            order_no: row.order_no.clone(),
            marketplace_sku: row.marketplace_sku.clone(),
            error_kind: kind,
            detail,
            suggested_action: kind.suggested_action().to_string(),
        }
    }
}

/// The atomic unit of batch processing; never mutated, only classified.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// Marketplace order number.
    pub order_no: OrderNo,
    /// Raw marketplace SKU string.
    pub marketplace_sku: MarketplaceSku,
    /// Free-text customization note.
    pub spec_text: SpecText,
    /// Optional product image URL; backfilled across rows of one order.
    pub image_url: Option<ImageUrl>,
}

/// Maps logical batch fields to the input table's header names.
#[derive(Clone, Debug)]
pub struct ColumnMap {
    /// Header of the marketplace SKU column.
    pub marketplace_sku: ColumnName,
    /// Header of the order number column.
    pub order_no: ColumnName,
    /// Header of the customization note column.
    pub spec_text: ColumnName,
    /// Header of the optional image URL column.
    pub image_url: ColumnName,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            marketplace_sku: columns::MARKETPLACE_SKU.to_string(),
            order_no: columns::ORDER_NO.to_string(),
            spec_text: columns::SPEC_TEXT.to_string(),
            image_url: columns::IMAGE_URL.to_string(),
        }
    }
}

/// Convert a raw header/cell table into typed batch rows.
///
/// Aborts with [`PairingError::MissingColumns`] before any row is built
/// when a required column is absent; the image URL column is optional.
pub fn rows_from_table(
    headers: &[String],
    rows: &[Vec<String>],
    map: &ColumnMap,
) -> Result<Vec<BatchRow>, PairingError> {
    let index_of = |name: &str| headers.iter().position(|header| header == name);

    let required = [&map.marketplace_sku, &map.order_no, &map.spec_text];
    let missing: Vec<ColumnName> = required
        .iter()
        .filter(|name| index_of(name).is_none())
        .map(|name| (*name).clone())
        .collect();
    if !missing.is_empty() {
        return Err(PairingError::MissingColumns { missing });
    }

    let sku_idx = index_of(&map.marketplace_sku).unwrap_or_default();
    let order_idx = index_of(&map.order_no).unwrap_or_default();
    let spec_idx = index_of(&map.spec_text).unwrap_or_default();
    let image_idx = index_of(&map.image_url);

    let cell = |row: &Vec<String>, idx: usize| row.get(idx).cloned().unwrap_or_default();
    Ok(rows
        .iter()
        .map(|row| BatchRow {
            order_no: cell(row, order_idx),
            marketplace_sku: cell(row, sku_idx),
            spec_text: cell(row, spec_idx),
            image_url: image_idx
                .map(|idx| cell(row, idx))
                .filter(|url| !url.is_empty()),
        })
        .collect())
}

/// Backfill missing image URLs from any row sharing the same order number.
pub fn backfill_image_urls(rows: &mut [BatchRow]) {
    let mut by_order: HashMap<OrderNo, ImageUrl> = HashMap::new();
    for row in rows.iter() {
        if let Some(url) = &row.image_url {
            by_order.entry(row.order_no.clone()).or_insert(url.clone());
        }
    }
    for row in rows.iter_mut() {
        if row.image_url.is_none()
            && let Some(url) = by_order.get(&row.order_no)
        {
            row.image_url = Some(url.clone());
        }
    }
}

/// One line of the per-item SKU import table.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SingleSkuRow {
    /// Generated per-item SKU (table key).
    pub sku: Sku,
    /// Originating marketplace SKU.
    pub marketplace_sku: MarketplaceSku,
    /// Compact human identifier for warehouse lookup.
    pub short_identifier: String,
    /// Chinese listing name.
    pub chinese_name: String,
    /// Listing category id.
    pub category_id: String,
    /// Product image URL, when any row of the order carried one.
    pub image_url: Option<ImageUrl>,
    /// Net weight in grams.
    pub weight_grams: u32,
    /// Purchase reference price in RMB.
    pub purchase_price_rmb: u32,
    /// Purchaser sub-account.
    pub purchaser: String,
    /// English customs declaration name.
    pub declare_name_en: String,
    /// Chinese customs declaration name.
    pub declare_name_cn: String,
    /// Declared weight in grams.
    pub declare_weight_grams: u32,
    /// Declared customs amount in USD.
    pub declare_amount_usd: u32,
    /// Developer sub-account.
    pub developer: String,
    /// Sales-type label.
    pub sales_type: String,
}

/// A component line under a bundle (quantity is always 1 today).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComboComponent {
    /// Internal SKU of the component.
    pub sku: Sku,
    /// Component quantity within the bundle.
    pub quantity: u32,
}

/// One bundle of the combo import table: the combo SKU plus its components
/// (the generated single SKU, the card SKU when resolved, and the fixed
/// accessory when the box is LED).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ComboBundle {
    /// Generated bundle SKU (table key).
    pub combo_sku: Sku,
    /// Originating marketplace SKU.
    pub marketplace_sku: MarketplaceSku,
    /// Compact human identifier for warehouse lookup.
    pub short_identifier: String,
    /// Chinese listing name, suffixed with the card code.
    pub chinese_name: String,
    /// English customs declaration name.
    pub declare_name_en: String,
    /// Chinese customs declaration name.
    pub declare_name_cn: String,
    /// Declared weight in grams.
    pub declare_weight_grams: u32,
    /// Declared customs amount in USD.
    pub declare_amount_usd: u32,
    /// Sales-type label.
    pub sales_type: String,
    /// Component lines, generated single SKU first.
    pub components: Vec<ComboComponent>,
}

/// Row accounting for one reconciled batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchTotals {
    /// Rows received.
    pub input_rows: usize,
    /// Rows that produced identifiers (soft warnings included).
    pub success_rows: usize,
    /// Rows rejected with a hard error.
    pub hard_error_rows: usize,
    /// Rows excluded as non-custom orders.
    pub non_custom_rows: usize,
}

impl BatchTotals {
    /// The batch-level invariant: every input row lands in exactly one
    /// partition.
    pub fn reconciled(&self) -> bool {
        self.success_rows + self.hard_error_rows + self.non_custom_rows == self.input_rows
    }
}

/// Structured output of one batch run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-item SKU import rows, in input order.
    pub singles: Vec<SingleSkuRow>,
    /// Bundle import rows, in input order.
    pub bundles: Vec<ComboBundle>,
    /// Hard errors and soft warnings, in occurrence order.
    pub diagnostics: Vec<ErrorRecord>,
    /// Row accounting.
    pub totals: BatchTotals,
}

/// A successfully paired row, before report assembly.
#[derive(Clone, Debug)]
pub struct PairedOrder {
    /// The input row.
    pub row: BatchRow,
    /// Attributes decoded from the marketplace SKU.
    pub attributes: ParsedAttributes,
    /// Fields parsed from the customization note.
    pub spec: ProductSpec,
    /// The regenerated identifiers.
    pub identifiers: GeneratedIdentifiers,
}

enum RowOutcome {
    NonCustom,
    Failed(ErrorRecord),
    Paired {
        order: PairedOrder,
        warnings: Vec<ErrorRecord>,
    },
}

/// Drives the codec over an order batch, one row at a time, in input order.
pub struct BatchReconciler<'a> {
    registry: &'a CardRegistry,
    date_tag: DateTag,
    session: BatchSession,
}

impl<'a> BatchReconciler<'a> {
    /// Create a reconciler for one batch run. The date tag is substituted
    /// verbatim into every generated SKU.
    pub fn new(registry: &'a CardRegistry, date_tag: impl Into<DateTag>) -> Self {
        Self {
            registry,
            date_tag: date_tag.into(),
            session: BatchSession::new(),
        }
    }

    /// Process every row and assemble the partitioned report.
    pub fn run(mut self, mut rows: Vec<BatchRow>) -> BatchReport {
        backfill_image_urls(&mut rows);

        let mut report = BatchReport {
            totals: BatchTotals {
                input_rows: rows.len(),
                ..BatchTotals::default()
            },
            ..BatchReport::default()
        };

        for row in rows {
            match self.process_row(row) {
                RowOutcome::NonCustom => report.totals.non_custom_rows += 1,
                RowOutcome::Failed(record) => {
                    report.totals.hard_error_rows += 1;
                    report.diagnostics.push(record);
                }
                RowOutcome::Paired { order, warnings } => {
                    report.totals.success_rows += 1;
                    report.diagnostics.extend(warnings);
                    report.singles.push(self.single_row(&order));
                    report.bundles.push(self.combo_bundle(&order));
                }
            }
        }

        info!(
            "[skupair:batch] reconciled {} rows: {} paired, {} hard errors, {} non-custom",
            report.totals.input_rows,
            report.totals.success_rows,
            report.totals.hard_error_rows,
            report.totals.non_custom_rows
        );
        debug_assert!(report.totals.reconciled());
        report
    }

    fn process_row(&mut self, row: BatchRow) -> RowOutcome {
        if !row
            .marketplace_sku
            .to_lowercase()
            .contains(CUSTOMIZATION_MARKER)
        {
            debug!(
                "[skupair:batch] {}: non-custom order excluded ({})",
                row.order_no, row.marketplace_sku
            );
            return RowOutcome::NonCustom;
        }

        let attributes = match extract_attributes(&row.marketplace_sku, self.registry) {
            Ok(attributes) => attributes,
            Err(err) => {
                return RowOutcome::Failed(ErrorRecord::new(
                    &row,
                    ErrorKind::ParseFailure,
                    format!("cannot decode marketplace SKU: {err}"),
                ));
            }
        };

        let spec = parse_product_spec(&row.spec_text);
        if spec.name1().trim().is_empty() {
            return RowOutcome::Failed(ErrorRecord::new(
                &row,
                ErrorKind::MissingName1,
                "customization note has no Name 1".to_string(),
            ));
        }
        for name in spec.non_empty_names() {
            let (ok, invalid) = validate_charset(name);
            if !ok {
                let offenders: String = invalid.into_iter().collect();
                return RowOutcome::Failed(ErrorRecord::new(
                    &row,
                    ErrorKind::InvalidNameCharset,
                    format!("name {name:?} contains invalid characters: {offenders:?}"),
                ));
            }
        }
        if !validate_dual_name_required(&spec) {
            return RowOutcome::Failed(ErrorRecord::new(
                &row,
                ErrorKind::MissingName2ForDualFormat,
                "note uses the Name 1/Name 2 format but Name 2 is empty".to_string(),
            ));
        }

        let base = single_sku(
            &attributes.product_code,
            &self.date_tag,
            spec.non_empty_names(),
        );
        let resolved = self.session.resolve_sku(&base, &row.order_no);
        let combo = combo_sku(&resolved, &attributes.card_code, attributes.box_type);
        let identifier = short_identifier(&row.order_no, &attributes.product_code, spec.name1());
        if !self.session.resolve_identifier(&identifier) {
            return RowOutcome::Failed(ErrorRecord::new(
                &row,
                ErrorKind::IdentifierCollision,
                format!("short identifier {identifier:?} already produced by an earlier row"),
            ));
        }

        let mut warnings = Vec::new();
        if matches!(
            attributes.card_confidence,
            CardConfidence::Low | CardConfidence::None
        ) {
            warnings.push(ErrorRecord::new(
                &row,
                ErrorKind::LowConfidenceCardCode,
                attributes.note.clone(),
            ));
        }
        if !attributes.card_code.is_empty() && !self.registry.contains(&attributes.card_code) {
            warnings.push(ErrorRecord::new(
                &row,
                ErrorKind::CardCodeNotFound,
                format!(
                    "card code {:?} is not in the card mapping",
                    attributes.card_code
                ),
            ));
        }
        for warning in &warnings {
            warn!(
                "[skupair:batch] {}: {:?}: {}",
                warning.order_no, warning.error_kind, warning.detail
            );
        }

        debug!("[skupair:batch] {} -> {}", row.order_no, resolved);
        RowOutcome::Paired {
            order: PairedOrder {
                row,
                attributes,
                spec,
                identifiers: GeneratedIdentifiers {
                    single_sku: resolved,
                    combo_sku: combo,
                    short_identifier: identifier,
                },
            },
            warnings,
        }
    }

    fn single_row(&self, order: &PairedOrder) -> SingleSkuRow {
        let attrs = &order.attributes;
        let (declare_en, declare_cn) = catalog::declare_names(&attrs.product_code);
        SingleSkuRow {
            sku: order.identifiers.single_sku.clone(),
            marketplace_sku: order.row.marketplace_sku.clone(),
            short_identifier: order.identifiers.short_identifier.clone(),
            chinese_name: catalog::chinese_name(
                &attrs.product_code,
                attrs.color,
                order.spec.name1(),
                order.spec.name2(),
            ),
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            image_url: order.row.image_url.clone(),
            weight_grams: DEFAULT_WEIGHT_GRAMS,
            purchase_price_rmb: DEFAULT_PURCHASE_PRICE_RMB,
            purchaser: DEFAULT_PURCHASER.to_string(),
            declare_name_en: declare_en.to_string(),
            declare_name_cn: declare_cn.to_string(),
            declare_weight_grams: DEFAULT_WEIGHT_GRAMS,
            declare_amount_usd: DEFAULT_DECLARE_AMOUNT_USD,
            developer: DEFAULT_DEVELOPER.to_string(),
            sales_type: DEFAULT_SALES_TYPE.to_string(),
        }
    }

    fn combo_bundle(&self, order: &PairedOrder) -> ComboBundle {
        let attrs = &order.attributes;
        let (declare_en, declare_cn) = catalog::declare_names(&attrs.product_code);

        let mut components = vec![ComboComponent {
            sku: order.identifiers.single_sku.clone(),
            quantity: 1,
        }];
        if let Some(card_sku) = self.registry.internal_sku(&attrs.card_code) {
            components.push(ComboComponent {
                sku: card_sku.to_string(),
                quantity: 1,
            });
        }
        if attrs.box_type == BoxType::LedBox {
            components.push(ComboComponent {
                sku: LED_ACCESSORY_SKU.to_string(),
                quantity: 1,
            });
        }

        ComboBundle {
            combo_sku: order.identifiers.combo_sku.clone(),
            marketplace_sku: order.row.marketplace_sku.clone(),
            short_identifier: order.identifiers.short_identifier.clone(),
            chinese_name: format!(
                "{}-{}",
                catalog::chinese_name(
                    &attrs.product_code,
                    attrs.color,
                    order.spec.name1(),
                    order.spec.name2(),
                ),
                attrs.card_code
            ),
            declare_name_en: declare_en.to_string(),
            declare_name_cn: declare_cn.to_string(),
            declare_weight_grams: DEFAULT_WEIGHT_GRAMS,
            declare_amount_usd: DEFAULT_DECLARE_AMOUNT_USD,
            sales_type: DEFAULT_SALES_TYPE.to_string(),
            components,
        }
    }
}
