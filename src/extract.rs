//! Marketplace SKU tokenization and heuristic attribute extraction.
//!
//! A marketplace SKU is an ordered `-`-delimited token sequence, e.g.
//! `B09-B-Engraved-MAN10-LEDx1`. Token 0 is always the product code; the
//! remaining attributes are recovered heuristically because the storefront
//! grammar accreted variants over time (size tokens, `LEDx1`/`whiteboxx1`
//! quantity suffixes, missing color letters).

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::extract::{
    BOX_KEYWORDS, COLOR_LETTERS, CUSTOMIZATION_MARKER, MIN_TOKENS, NOISE_TOKENS,
};
use crate::constants::identifiers::{LED_BOX_SUFFIX, WHITE_BOX_SUFFIX};
use crate::registry::CardRegistry;
use crate::types::{CardCode, ProductCode};

/// Packaging variant encoded in the marketplace SKU.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoxType {
    /// Default packaging when no LED marker is present.
    #[default]
    WhiteBox,
    /// Illuminated box; bundles carry an extra accessory component.
    LedBox,
}

impl BoxType {
    /// Suffix appended to combo SKUs (`"WH"` or `"LED"`).
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::WhiteBox => WHITE_BOX_SUFFIX,
            Self::LedBox => LED_BOX_SUFFIX,
        }
    }
}

/// Trust tier attached to a heuristically extracted card code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardConfidence {
    /// The code matched a registry key exactly.
    High,
    /// The code survived the noise filter and length rule.
    Medium,
    /// Best-effort fallback, flagged for human review.
    Low,
    /// No candidate could be extracted at all.
    None,
}

/// Attributes decoded from a marketplace SKU string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAttributes {
    /// Product family code (token 0, unconditionally).
    pub product_code: ProductCode,
    /// Color letter found before the customization marker, normalized to
    /// uppercase. One of `B`, `G`, `S`, `R` when present.
    pub color: Option<char>,
    /// Whether the SKU carries the customization marker token.
    pub is_customized: bool,
    /// Extracted card code; empty when nothing usable was found.
    pub card_code: CardCode,
    /// Packaging variant; defaults to the white box.
    pub box_type: BoxType,
    /// Trust tier for `card_code`. `High` iff the code is a registry key.
    pub card_confidence: CardConfidence,
    /// Human-readable note describing how the card code was chosen.
    pub note: String,
}

/// Why a marketplace SKU could not be decoded.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// Fewer than three `-`-delimited tokens.
    #[error("marketplace SKU has fewer than {MIN_TOKENS} tokens")]
    TooFewTokens,
    /// No token equals the customization marker.
    #[error("no '{CUSTOMIZATION_MARKER}' marker token in marketplace SKU")]
    NotCustomized,
}

/// Decode a marketplace SKU against the known card codes in `registry`.
///
/// Known limitation: a genuine two-letter card code that collides with a
/// noise token (e.g. a real card named `SB`) is misclassified under the
/// Tier 2/3 heuristics and can only be rescued by registering it, which
/// promotes it to an exact Tier 1 match.
pub fn extract_attributes(
    sku: &str,
    registry: &CardRegistry,
) -> Result<ParsedAttributes, ExtractError> {
    let tokens: Vec<&str> = sku.split('-').collect();
    if tokens.len() < MIN_TOKENS {
        return Err(ExtractError::TooFewTokens);
    }

    let mut marker_idx = None;
    let mut box_type = BoxType::WhiteBox;
    for (idx, token) in tokens.iter().enumerate() {
        let lower = token.to_lowercase();
        if lower == CUSTOMIZATION_MARKER && marker_idx.is_none() {
            marker_idx = Some(idx);
        }
        // Box detection scans every token and lets the last marker win;
        // `ledbox` also matches the `led` prefix.
        if lower.starts_with("led") {
            box_type = BoxType::LedBox;
        } else if lower.starts_with("whitebox") {
            box_type = BoxType::WhiteBox;
        }
    }
    let Some(marker_idx) = marker_idx else {
        return Err(ExtractError::NotCustomized);
    };

    // The marker can sit at index 0 on malformed-but-parseable SKUs; the
    // color scan covers tokens strictly between the product code and marker.
    let color = tokens[1..marker_idx.max(1)].iter().find_map(|token| {
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) if ch.is_alphabetic() => {
                let upper = ch.to_ascii_uppercase();
                COLOR_LETTERS.contains(&upper).then_some(upper)
            }
            _ => None,
        }
    });

    let window_end = tokens
        .iter()
        .enumerate()
        .skip(marker_idx + 1)
        .find(|(_, token)| {
            let lower = token.to_lowercase();
            BOX_KEYWORDS.iter().any(|kw| lower.starts_with(kw))
        })
        .map_or(tokens.len(), |(idx, _)| idx);
    let (card_code, card_confidence, note) =
        extract_card_code(&tokens[marker_idx + 1..window_end], registry);

    Ok(ParsedAttributes {
        product_code: tokens[0].to_string(),
        color,
        is_customized: true,
        card_code,
        box_type,
        card_confidence,
        note,
    })
}

/// Three-tier card-code disambiguation over the candidate window.
///
/// Registry membership is unambiguous ground truth (Tier 1); the noise set
/// holds known size/color tokens that are never card identifiers (Tier 2);
/// the final fallback always surfaces a best-effort candidate flagged as
/// low-trust instead of silently dropping it (Tier 3).
fn extract_card_code(
    candidates: &[&str],
    registry: &CardRegistry,
) -> (CardCode, CardConfidence, String) {
    if candidates.is_empty() {
        return (
            String::new(),
            CardConfidence::None,
            "no candidate tokens after the customization marker".to_string(),
        );
    }

    for candidate in candidates {
        if registry.contains(candidate) {
            return (
                (*candidate).to_string(),
                CardConfidence::High,
                format!("matched known card code: {candidate}"),
            );
        }
    }

    if let Some(candidate) = candidates
        .iter()
        .find(|c| !is_noise_token(c) && c.chars().count() >= 2)
    {
        return (
            (*candidate).to_string(),
            CardConfidence::Medium,
            format!("extracted by rule: {candidate}"),
        );
    }

    if let Some(candidate) = candidates.iter().find(|c| !is_noise_token(c)) {
        return (
            (*candidate).to_string(),
            CardConfidence::Low,
            format!("fallback extraction: {candidate}"),
        );
    }

    (
        String::new(),
        CardConfidence::None,
        "no card code could be extracted".to_string(),
    )
}

fn is_noise_token(token: &str) -> bool {
    let upper = token.to_uppercase();
    NOISE_TOKENS.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CardRegistry {
        CardRegistry::from_pairs([
            ("MAN10", "Michael-CARD-MAN10"),
            ("D17", "Michael-CARD-D17"),
        ])
    }

    #[test]
    fn decodes_led_box_sku_with_known_card() {
        let attrs = extract_attributes("B09-B-Engraved-MAN10-LEDx1", &registry()).unwrap();
        assert_eq!(attrs.product_code, "B09");
        assert_eq!(attrs.color, Some('B'));
        assert!(attrs.is_customized);
        assert_eq!(attrs.card_code, "MAN10");
        assert_eq!(attrs.card_confidence, CardConfidence::High);
        assert_eq!(attrs.box_type, BoxType::LedBox);
    }

    #[test]
    fn decodes_sku_without_color_token() {
        let attrs = extract_attributes("J20-engraved-D17-whitebox", &registry()).unwrap();
        assert_eq!(attrs.product_code, "J20");
        assert_eq!(attrs.color, None);
        assert_eq!(attrs.card_code, "D17");
        assert_eq!(attrs.card_confidence, CardConfidence::High);
        assert_eq!(attrs.box_type, BoxType::WhiteBox);
    }

    #[test]
    fn too_few_tokens_is_a_parse_failure() {
        assert_eq!(
            extract_attributes("J20-engraved", &registry()),
            Err(ExtractError::TooFewTokens)
        );
    }

    #[test]
    fn missing_marker_is_a_parse_failure() {
        // Contains "engraved" as a substring but not as an exact token.
        assert_eq!(
            extract_attributes("J20-B-engravedX-D17-whitebox", &registry()),
            Err(ExtractError::NotCustomized)
        );
    }

    #[test]
    fn unknown_card_falls_back_to_rule_extraction() {
        let attrs = extract_attributes("J20-G-engraved-ZZ9-whitebox", &registry()).unwrap();
        assert_eq!(attrs.card_code, "ZZ9");
        assert_eq!(attrs.card_confidence, CardConfidence::Medium);
    }

    #[test]
    fn noise_tokens_are_skipped_before_rule_extraction() {
        // X and SM are size markers, never card codes.
        let attrs = extract_attributes("J20-B-engraved-X-SM-D17-whiteboxx1", &registry()).unwrap();
        assert_eq!(attrs.card_code, "D17");
        assert_eq!(attrs.card_confidence, CardConfidence::High);

        let unregistered = CardRegistry::default();
        let attrs = extract_attributes("J20-B-engraved-X-SM-QQ5-whiteboxx1", &unregistered).unwrap();
        assert_eq!(attrs.card_code, "QQ5");
        assert_eq!(attrs.card_confidence, CardConfidence::Medium);
    }

    #[test]
    fn noise_only_window_yields_no_card() {
        let attrs = extract_attributes("J20-B-engraved-SB-whitebox", &CardRegistry::default()).unwrap();
        assert_eq!(attrs.card_code, "");
        assert_eq!(attrs.card_confidence, CardConfidence::None);
    }

    #[test]
    fn single_letter_non_noise_candidate_is_low_confidence() {
        let attrs = extract_attributes("J20-B-engraved-Q-whitebox", &CardRegistry::default()).unwrap();
        assert_eq!(attrs.card_code, "Q");
        assert_eq!(attrs.card_confidence, CardConfidence::Low);
    }

    #[test]
    fn empty_candidate_window_yields_none_confidence() {
        let attrs = extract_attributes("J20-B-engraved-whitebox", &registry()).unwrap();
        assert_eq!(attrs.card_code, "");
        assert_eq!(attrs.card_confidence, CardConfidence::None);
    }

    #[test]
    fn registered_noise_token_is_promoted_to_exact_match() {
        let registry = CardRegistry::from_pairs([("SB", "Michael-CARD-SB")]);
        let attrs = extract_attributes("J20-B-engraved-SB-whitebox", &registry).unwrap();
        assert_eq!(attrs.card_code, "SB");
        assert_eq!(attrs.card_confidence, CardConfidence::High);
    }

    #[test]
    fn box_detection_does_not_short_circuit() {
        // A whitebox token followed by a later LED marker resolves to LED;
        // order dependence is intentional and preserved.
        let attrs = extract_attributes("J20-B-engraved-D17-whitebox-LEDx1", &registry()).unwrap();
        assert_eq!(attrs.box_type, BoxType::LedBox);

        let attrs = extract_attributes("J20-B-engraved-D17-LEDx1-whitebox", &registry()).unwrap();
        assert_eq!(attrs.box_type, BoxType::WhiteBox);
    }

    #[test]
    fn color_scan_stops_at_the_customization_marker() {
        // The G after the marker is a card-window token, not a color.
        let attrs = extract_attributes("J20-engraved-G-D17-whitebox", &registry()).unwrap();
        assert_eq!(attrs.color, None);

        let attrs = extract_attributes("J20-s-engraved-D17-whitebox", &registry()).unwrap();
        assert_eq!(attrs.color, Some('S'));
    }

    #[test]
    fn marker_as_first_token_still_parses() {
        let attrs = extract_attributes("engraved-D17-whitebox", &registry()).unwrap();
        assert_eq!(attrs.product_code, "engraved");
        assert_eq!(attrs.color, None);
        assert_eq!(attrs.card_code, "D17");
    }

    #[test]
    fn box_suffix_mapping_is_total() {
        assert_eq!(BoxType::WhiteBox.suffix(), "WH");
        assert_eq!(BoxType::LedBox.suffix(), "LED");
    }
}
