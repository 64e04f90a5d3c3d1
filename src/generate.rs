//! Deterministic identifier generation.
//!
//! These formats are contractual: the downstream fulfillment system matches
//! them byte-for-byte, so any change here breaks existing imports.

use serde::{Deserialize, Serialize};

use crate::constants::identifiers::{NAME_JOINER, SHORT_ID_ORDER_CHARS, STORE_TAG};
use crate::extract::BoxType;
use crate::types::{DateTag, Sku};

/// The three identifiers regenerated for one paired order row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedIdentifiers {
    /// Per-item SKU, after batch-wide uniqueness resolution.
    pub single_sku: Sku,
    /// Composite bundle SKU built on top of `single_sku`.
    pub combo_sku: Sku,
    /// Compact human identifier: order suffix, product, primary name.
    pub short_identifier: String,
}

/// Per-item SKU: `{store}-{product}-{date}-{Name1}+{Name2}+…`.
///
/// Empty names are skipped; the remaining ones join in slot order.
pub fn single_sku<'a>(
    product_code: &str,
    date_tag: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Sku {
    let joined = names.into_iter().collect::<Vec<_>>().join(NAME_JOINER);
    format!("{STORE_TAG}-{product_code}-{date_tag}-{joined}")
}

/// Bundle SKU: `{single_sku}-{card_code}-{WH|LED}`.
pub fn combo_sku(single_sku: &str, card_code: &str, box_type: BoxType) -> Sku {
    format!("{single_sku}-{card_code}-{}", box_type.suffix())
}

/// Short identifier: `{last5(order suffix)}-{product}-{name1}`.
pub fn short_identifier(order_no: &str, product_code: &str, name1: &str) -> String {
    let suffix = order_suffix(order_no);
    let skip = suffix.chars().count().saturating_sub(SHORT_ID_ORDER_CHARS);
    let tail: String = suffix.chars().skip(skip).collect();
    format!("{tail}-{product_code}-{name1}")
}

/// Substring of an order number after its last `-` (the whole string when
/// there is none). Also used as the dedup suffix for repeated SKUs.
pub fn order_suffix(order_no: &str) -> &str {
    order_no.rsplit('-').next().unwrap_or(order_no)
}

/// Today's conventional `MMDD` date tag. The codec never validates the tag
/// format; callers may substitute any short string.
pub fn default_date_tag() -> DateTag {
    chrono::Local::now().format("%m%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sku_joins_names_in_slot_order() {
        assert_eq!(
            single_sku("J20", "0121", ["Xaviar", "Suzi"]),
            "Michael-J20-0121-Xaviar+Suzi"
        );
        assert_eq!(
            single_sku("J20", "0121", ["Xaviar", "Suzi", "Tom"]),
            "Michael-J20-0121-Xaviar+Suzi+Tom"
        );
        assert_eq!(single_sku("J20", "0121", ["Xaviar"]), "Michael-J20-0121-Xaviar");
    }

    #[test]
    fn combo_sku_appends_card_and_box_suffix() {
        assert_eq!(
            combo_sku("Michael-J20-0121-Xaviar+Suzi", "D17", BoxType::WhiteBox),
            "Michael-J20-0121-Xaviar+Suzi-D17-WH"
        );
        assert_eq!(
            combo_sku("Michael-J20-0121-Xaviar+Suzi", "MAN10", BoxType::LedBox),
            "Michael-J20-0121-Xaviar+Suzi-MAN10-LED"
        );
    }

    #[test]
    fn short_identifier_uses_last_five_of_order_suffix() {
        assert_eq!(
            short_identifier("5261219-59178", "J20", "Jonathan"),
            "59178-J20-Jonathan"
        );
        assert_eq!(
            short_identifier("5261219-1234567", "J20", "Amy"),
            "34567-J20-Amy"
        );
        // No dash: the whole order number is the suffix.
        assert_eq!(short_identifier("987", "B09", "Li"), "987-B09-Li");
        assert_eq!(short_identifier("5261219-59178", "J20", ""), "59178-J20-");
    }

    #[test]
    fn order_suffix_takes_last_dash_segment() {
        assert_eq!(order_suffix("5261219-59178"), "59178");
        assert_eq!(order_suffix("59178"), "59178");
        assert_eq!(order_suffix("a-b-c"), "c");
    }
}
