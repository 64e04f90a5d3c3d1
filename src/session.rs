//! Per-batch uniqueness state.
//!
//! The dedup tables are the only mutable state in the pipeline. They are
//! owned by a [`BatchSession`] value scoped to one batch run and must be
//! updated in row order for suffix and collision behavior to be
//! reproducible; any parallel fan-out has to keep this step a sequential
//! reduction over the original row order.

use std::collections::{HashMap, HashSet};

use crate::generate::order_suffix;
use crate::types::Sku;

/// Batch-scoped dedup tables for generated SKUs and short identifiers.
#[derive(Debug, Default)]
pub struct BatchSession {
    seen_base_skus: HashMap<Sku, usize>,
    seen_identifiers: HashSet<String>,
}

impl BatchSession {
    /// Create empty dedup state for a new batch run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a base SKU to the value actually emitted for this row.
    ///
    /// The first occurrence is returned unchanged; repeats gain the
    /// order-number suffix. Repeats are legitimate here (two buyers may
    /// order the same product and names on the same day), so this
    /// disambiguates instead of rejecting.
    pub fn resolve_sku(&mut self, base_sku: &str, order_no: &str) -> Sku {
        match self.seen_base_skus.get_mut(base_sku) {
            None => {
                self.seen_base_skus.insert(base_sku.to_string(), 1);
                base_sku.to_string()
            }
            Some(count) => {
                *count += 1;
                format!("{base_sku}-{}", order_suffix(order_no))
            }
        }
    }

    /// Record a short identifier, or reject a repeat.
    ///
    /// Returns `false` when the identifier was already seen: an identical
    /// short identifier signals a probable duplicate order rather than a
    /// legitimately distinct item, so the row is rejected, not suffixed.
    pub fn resolve_identifier(&mut self, identifier: &str) -> bool {
        self.seen_identifiers.insert(identifier.to_string())
    }

    /// Number of occurrences recorded for a base SKU so far.
    pub fn occurrences(&self, base_sku: &str) -> usize {
        self.seen_base_skus.get(base_sku).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sku_occurrence_is_unsuffixed() {
        let mut session = BatchSession::new();
        let sku = session.resolve_sku("Michael-J20-0121-Xaviar+Suzi", "5261219-59178");
        assert_eq!(sku, "Michael-J20-0121-Xaviar+Suzi");
        assert_eq!(session.occurrences("Michael-J20-0121-Xaviar+Suzi"), 1);
    }

    #[test]
    fn repeats_gain_the_order_suffix() {
        let mut session = BatchSession::new();
        session.resolve_sku("Michael-J20-0121-Xaviar+Suzi", "5261219-59178");
        let second = session.resolve_sku("Michael-J20-0121-Xaviar+Suzi", "5261219-59179");
        assert_eq!(second, "Michael-J20-0121-Xaviar+Suzi-59179");
        assert_eq!(session.occurrences("Michael-J20-0121-Xaviar+Suzi"), 2);
    }

    #[test]
    fn identifier_repeats_are_rejected() {
        let mut session = BatchSession::new();
        assert!(session.resolve_identifier("59178-J20-Jonathan"));
        assert!(!session.resolve_identifier("59178-J20-Jonathan"));
        assert!(session.resolve_identifier("59179-J20-Jonathan"));
    }
}
