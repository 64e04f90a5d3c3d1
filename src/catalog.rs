//! Product catalog lookups for generated import rows.
//!
//! The back office wants each listing row stamped with the Chinese display
//! name, the localized color, and the customs declaration names; unknown
//! codes fall back to the raw code so new products still import.

use crate::constants::identifiers::STORE_TAG;

/// Chinese display name for a product code; unknown codes pass through.
pub fn display_name(product_code: &str) -> &str {
    match product_code {
        "J20" => "爱心双扣项链",
        "J02" => "环环相扣项链",
        "J01" => "镂空镶钻爱心手链",
        "B09" => "不锈钢皮革手链",
        "B11" => "编织皮革手链",
        other => other,
    }
}

/// Localized color name for a color letter; `None` renders empty.
pub fn color_name(color: Option<char>) -> String {
    match color {
        Some('G') => "金色".to_string(),
        Some('S') => "银色".to_string(),
        Some('B') => "黑色".to_string(),
        Some('R') => "玫瑰金".to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Customs declaration names `(english, chinese)` by product-family prefix.
/// `J` codes are necklaces, `B` codes are bracelets.
pub fn declare_names(product_code: &str) -> (&'static str, &'static str) {
    match product_code.chars().next().map(|ch| ch.to_ascii_uppercase()) {
        Some('J') => ("Necklace", "项链"),
        Some('B') => ("Bracelet", "手链"),
        _ => ("Jewelry", "饰品"),
    }
}

/// Chinese listing name: `{store}-{display}-{color}-{name1}+{name2}`.
pub fn chinese_name(product_code: &str, color: Option<char>, name1: &str, name2: &str) -> String {
    let names = if name2.is_empty() {
        name1.to_string()
    } else {
        format!("{name1}+{name2}")
    };
    format!(
        "{STORE_TAG}-{}-{}-{names}",
        display_name(product_code),
        color_name(color)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_product_code_passes_through() {
        assert_eq!(display_name("Z99"), "Z99");
        assert_eq!(display_name("J20"), "爱心双扣项链");
    }

    #[test]
    fn declare_names_follow_family_prefix() {
        assert_eq!(declare_names("J20"), ("Necklace", "项链"));
        assert_eq!(declare_names("b09"), ("Bracelet", "手链"));
        assert_eq!(declare_names("X01"), ("Jewelry", "饰品"));
        assert_eq!(declare_names(""), ("Jewelry", "饰品"));
    }

    #[test]
    fn chinese_name_composition() {
        assert_eq!(
            chinese_name("J20", Some('G'), "Xaviar", "Suzi"),
            "Michael-爱心双扣项链-金色-Xaviar+Suzi"
        );
        // Missing color keeps the empty segment, as the back office expects.
        assert_eq!(
            chinese_name("J20", None, "Xaviar", ""),
            "Michael-爱心双扣项链--Xaviar"
        );
    }
}
