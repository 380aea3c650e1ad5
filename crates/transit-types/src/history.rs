//! Historical delivery averages.

use serde::{Deserialize, Serialize};

/// Historical averages for one key: the all-time average followed by one
/// average per weekday (Sunday = 1 .. Saturday = 7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoricalAverages(pub [i16; AVERAGES_LEN]);

const AVERAGES_LEN: usize = 8;

impl HistoricalAverages {
    /// Number of stored values.
    pub const LEN: usize = AVERAGES_LEN;

    /// Returns the all-time average.
    #[must_use]
    pub const fn total(&self) -> i16 {
        self.0[0]
    }

    /// Returns the average for a weekday; out-of-range weekdays read Sunday.
    #[must_use]
    pub const fn day(&self, weekday: i64) -> i16 {
        let index = if weekday < 1 || weekday > 7 { 1 } else { weekday as usize };
        self.0[index]
    }
}
