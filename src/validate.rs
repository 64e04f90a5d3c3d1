//! Engraving-name validation.
//!
//! The engraving machine only accepts ASCII letters, digits, spaces, and
//! hyphens; anything else has to bounce back to the buyer before the order
//! reaches production.

use std::collections::BTreeSet;

use crate::spec::ProductSpec;

/// Check a name against the engravable charset.
///
/// Returns `(ok, invalid_chars)`; the set holds the offending characters
/// for diagnostics. Space and hyphen are allowed and never reported.
pub fn validate_charset(name: &str) -> (bool, BTreeSet<char>) {
    let invalid: BTreeSet<char> = name.chars().filter(|ch| !is_engravable(*ch)).collect();
    (invalid.is_empty(), invalid)
}

/// Check the Name 2 requirement for notes using the dual-name convention.
///
/// An order that labeled its lines `Name 1`/`Name 2` must fill slot 2; a
/// blank slot there means the buyer skipped half the customization.
pub fn validate_dual_name_required(spec: &ProductSpec) -> bool {
    !spec.dual_name_format || !spec.name2().trim().is_empty()
}

fn is_engravable(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == ' ' || ch == '-'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::parse_product_spec;

    #[test]
    fn ascii_names_pass() {
        for name in ["Xaviar", "Mary-Jane", "Agent 007", ""] {
            let (ok, invalid) = validate_charset(name);
            assert!(ok, "expected {name:?} to validate");
            assert!(invalid.is_empty());
        }
    }

    #[test]
    fn offending_characters_are_reported() {
        let (ok, invalid) = validate_charset("José&Füsun");
        assert!(!ok);
        assert_eq!(invalid, BTreeSet::from(['&', 'é', 'ü']));
    }

    #[test]
    fn space_and_hyphen_are_never_reported() {
        let (ok, invalid) = validate_charset("a b-c√");
        assert!(!ok);
        assert_eq!(invalid, BTreeSet::from(['√']));
    }

    #[test]
    fn dual_format_requires_name_two() {
        let dual = parse_product_spec("Name 1:Xaviar\nName 2:  ");
        assert!(!validate_dual_name_required(&dual));

        let filled = parse_product_spec("Name 1:Xaviar\nName 2:Suzi");
        assert!(validate_dual_name_required(&filled));

        let single = parse_product_spec("Name Engraving:Xaviar");
        assert!(validate_dual_name_required(&single));
    }
}
