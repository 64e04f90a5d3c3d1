use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::warn;

use crate::constants::registry::COMMENT_KEY;
use crate::errors::PairingError;
use crate::types::{CardCode, Sku};

/// Immutable batch-scoped lookup from decorative-card codes to internal SKUs.
///
/// Built once per batch run and read-only thereafter; lookups during row
/// processing never touch the filesystem again.
#[derive(Clone, Debug, Default)]
pub struct CardRegistry {
    cards: IndexMap<CardCode, Sku>,
}

impl CardRegistry {
    /// Build a registry from in-memory pairs. The reserved `_comment` key is
    /// filtered out and never treated as data.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<CardCode>,
        V: Into<Sku>,
    {
        let cards = pairs
            .into_iter()
            .map(|(code, sku)| (code.into(), sku.into()))
            .filter(|(code, _)| code != COMMENT_KEY)
            .collect();
        Self { cards }
    }

    /// Parse a registry from the card-mapping JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, PairingError> {
        let mapping: IndexMap<CardCode, Sku> = serde_json::from_str(raw)
            .map_err(|err| PairingError::MalformedRegistry(err.to_string()))?;
        Ok(Self::from_pairs(mapping))
    }

    /// Load the card mapping from a file, degrading to an empty registry on
    /// a missing or malformed resource. Every card then resolves as
    /// not-found, which surfaces per row instead of aborting the batch.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(
                    "[skupair:registry] card mapping {} not readable ({}); using empty registry",
                    path.display(),
                    err
                );
                return Self::default();
            }
        };
        match Self::from_json_str(&raw) {
            Ok(registry) => registry,
            Err(err) => {
                warn!(
                    "[skupair:registry] {} while parsing {}; using empty registry",
                    err,
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Whether `code` is a known card code (exact, case-sensitive match).
    pub fn contains(&self, code: &str) -> bool {
        self.cards.contains_key(code)
    }

    /// Internal SKU registered for a card code.
    pub fn internal_sku(&self, code: &str) -> Option<&str> {
        self.cards.get(code).map(Sku::as_str)
    }

    /// Number of registered card codes.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the registry holds no card codes.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
