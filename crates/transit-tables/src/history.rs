//! Historical-average tables.

use std::collections::HashMap;
use std::hash::Hash;

use transit_format::records::HistoryRow;
use transit_types::HistoricalAverages;

/// One historical-average table.
#[derive(Debug, Clone)]
pub struct HistoryTable<K> {
    entries: HashMap<K, HistoricalAverages>,
}

impl<K> Default for HistoryTable<K> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> HistoryTable<K> {
    /// Returns the averages for a key.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&HistoricalAverages> {
        self.entries.get(key)
    }

    /// Returns the number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash> FromIterator<HistoryRow<K>> for HistoryTable<K> {
    fn from_iter<I: IntoIterator<Item = HistoryRow<K>>>(rows: I) -> Self {
        Self {
            entries: rows.into_iter().map(|row| (row.key, row.averages)).collect(),
        }
    }
}

/// The five historical-average tables of the analytical estimator.
#[derive(Debug, Clone, Default)]
pub struct HistoryTables {
    /// Keyed by seller id.
    pub sellers: HistoryTable<i64>,
    /// Keyed by leaf category id.
    pub categories: HistoryTable<i64>,
    /// Keyed by shipping method id.
    pub shipping_methods: HistoryTable<i32>,
    /// Keyed by (origin zip, destination zip).
    pub zip_pairs: HistoryTable<(i32, i32)>,
    /// Keyed by (shipping method, origin zip, destination zip).
    pub method_zip_pairs: HistoryTable<(i32, i32, i32)>,
}

impl HistoryTables {
    /// Returns the total number of keys across all tables.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.sellers.len()
            + self.categories.len()
            + self.shipping_methods.len()
            + self.zip_pairs.len()
            + self.method_zip_pairs.len()
    }
}
