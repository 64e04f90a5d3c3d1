//! Customization-note parsing.
//!
//! The storefront exports the buyer's customization as a free-text block of
//! `label: value` lines. Labels vary across marketplace templates, so each
//! line is matched against a synonym table; both the ASCII and the
//! full-width colon occur in the wild.

use serde::{Deserialize, Serialize};

/// Maximum number of engraving name slots supported per order.
pub const NAME_SLOTS: usize = 6;

/// Structured fields extracted from a customization note.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSpec {
    /// Raw variant description (e.g. `Gold`).
    pub variants: String,
    /// Engraving names in slot order; unset slots stay empty.
    pub names: [String; NAME_SLOTS],
    /// Whether the note used the explicit `Name 1`/`Name 2` convention, as
    /// opposed to a single unlabeled `Name Engraving` field.
    pub dual_name_format: bool,
}

impl ProductSpec {
    /// Primary engraving name (slot 1).
    pub fn name1(&self) -> &str {
        &self.names[0]
    }

    /// Secondary engraving name (slot 2), required under the dual format.
    pub fn name2(&self) -> &str {
        &self.names[1]
    }

    /// Non-empty names in slot order.
    pub fn non_empty_names(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|name| !name.is_empty())
    }
}

enum SpecField {
    Variants,
    /// 1-based name slot; `explicit` when the label carried the slot number.
    Name { slot: usize, explicit: bool },
}

/// Parse a customization note into a [`ProductSpec`].
///
/// Unrecognized labels are ignored; absence of any name field yields
/// all-empty names with `dual_name_format = false`.
pub fn parse_product_spec(text: &str) -> ProductSpec {
    let mut spec = ProductSpec::default();
    for line in text.lines() {
        let Some((label, value)) = split_label(line.trim()) else {
            continue;
        };
        let key = label.trim().to_lowercase();
        let value = value.trim();
        match field_for_label(&key) {
            Some(SpecField::Variants) => spec.variants = value.to_string(),
            Some(SpecField::Name { slot, explicit }) => {
                spec.names[slot - 1] = value.to_string();
                if explicit && slot <= 2 {
                    spec.dual_name_format = true;
                }
            }
            None => {}
        }
    }
    spec
}

/// Split a line at its first ASCII or full-width colon.
fn split_label(line: &str) -> Option<(&str, &str)> {
    let (idx, colon) = line
        .char_indices()
        .find(|(_, ch)| *ch == ':' || *ch == '：')?;
    Some((&line[..idx], &line[idx + colon.len_utf8()..]))
}

fn field_for_label(key: &str) -> Option<SpecField> {
    if key == "variants" {
        return Some(SpecField::Variants);
    }
    // Single-slot fallback used by older listing templates.
    if key == "name engraving" || key == "name" {
        return Some(SpecField::Name {
            slot: 1,
            explicit: false,
        });
    }
    for prefix in ["name ", "text ", "line "] {
        if let Some(rest) = key.strip_prefix(prefix)
            && let Ok(slot) = rest.parse::<usize>()
            && (1..=NAME_SLOTS).contains(&slot)
        {
            return Some(SpecField::Name {
                slot,
                explicit: true,
            });
        }
    }
    None
}
