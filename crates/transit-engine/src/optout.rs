//! Seller and category opt-outs.

use std::collections::BTreeMap;

use crate::ConfigError;

/// (seller, category) pairs the analytical model never runs for.
///
/// The set holds a handful of entries, so lookups scan it linearly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptOutSet {
    entries: Vec<(i64, i64)>,
}

impl OptOutSet {
    /// Creates a set from pairs, dropping duplicates.
    #[must_use]
    pub fn new(pairs: impl IntoIterator<Item = (i64, i64)>) -> Self {
        let mut entries: Vec<(i64, i64)> = Vec::new();
        for pair in pairs {
            if !entries.contains(&pair) {
                entries.push(pair);
            }
        }
        Self { entries }
    }

    /// Parses `{"<seller>": "<category>,<category>"}`; keys starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a seller or category is not an integer.
    pub fn from_config(map: &BTreeMap<String, String>) -> Result<Self, ConfigError> {
        let mut pairs = Vec::new();
        for (seller_key, categories) in map.iter().filter(|(key, _)| !key.starts_with('#')) {
            let invalid = || ConfigError::InvalidOptOut {
                seller: seller_key.clone(),
                categories: categories.clone(),
            };
            let seller: i64 = seller_key.trim().parse().map_err(|_| invalid())?;
            for category in categories.split(',').map(str::trim).filter(|c| !c.is_empty()) {
                pairs.push((seller, category.parse().map_err(|_| invalid())?));
            }
        }
        Ok(Self::new(pairs))
    }

    /// Returns true if the seller opted the category out.
    #[must_use]
    pub fn contains(&self, seller_id: i64, category: i64) -> bool {
        self.entries.contains(&(seller_id, category))
    }

    /// Returns the number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no pairs are configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
