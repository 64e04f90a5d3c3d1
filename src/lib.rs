#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Batch reconciliation over order rows.
pub mod batch;
/// Product catalog lookups (display names, customs declaration names).
pub mod catalog;
/// Centralized constants used across extraction, generation, and outputs.
pub mod constants;
/// Marketplace SKU tokenization and attribute extraction.
pub mod extract;
/// Deterministic identifier generation.
pub mod generate;
/// Decorative-card registry loading.
pub mod registry;
/// Per-batch uniqueness state.
pub mod session;
/// Customization-note parsing.
pub mod spec;
/// Shared type aliases.
pub mod types;
/// Engraving-name validation.
pub mod validate;

mod errors;

pub use batch::{
    BatchReconciler, BatchReport, BatchRow, BatchTotals, ColumnMap, ComboBundle, ComboComponent,
    ErrorKind, ErrorRecord, PairedOrder, SingleSkuRow, backfill_image_urls, rows_from_table,
};
pub use errors::PairingError;
pub use extract::{BoxType, CardConfidence, ExtractError, ParsedAttributes, extract_attributes};
pub use generate::{GeneratedIdentifiers, combo_sku, short_identifier, single_sku};
pub use registry::CardRegistry;
pub use session::BatchSession;
pub use spec::{ProductSpec, parse_product_spec};
