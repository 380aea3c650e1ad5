//! Score-to-day threshold bucketing.

use thiserror::Error;

/// Lowest day considered when a model does not configure one.
pub const DEFAULT_MIN_DAYS_PREDICTED: usize = 2;

/// Highest day considered when a model does not configure one.
pub const DEFAULT_MAX_DAYS_PREDICTED: usize = 7;

/// Errors that can occur while parsing a threshold model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThresholdError {
    /// An entry of the threshold list is not a number.
    #[error("Invalid threshold #{index}: '{value}'")]
    InvalidValue {
        /// Zero-based position in the list.
        index: usize,
        /// The offending text.
        value: String,
    },

    /// The lowest predicted day exceeds the highest.
    #[error("min_days_predicted ({min}) exceeds max_days_predicted ({max})")]
    InvertedBounds {
        /// Configured lowest day.
        min: usize,
        /// Configured highest day.
        max: usize,
    },
}

/// Ordered score cut-points indexed by day number.
///
/// Day `d` is predicted for the first `d` in
/// `min_days_predicted..=max_days_predicted` whose threshold is at least the
/// score.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdModel {
    thresholds: Vec<f64>,
    min_days_predicted: usize,
    max_days_predicted: usize,
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self {
            thresholds: Vec::new(),
            min_days_predicted: DEFAULT_MIN_DAYS_PREDICTED,
            max_days_predicted: DEFAULT_MAX_DAYS_PREDICTED,
        }
    }
}

impl ThresholdModel {
    /// Creates a model from parsed thresholds.
    ///
    /// A decreasing list is accepted with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if `min_days_predicted > max_days_predicted`.
    pub fn new(
        thresholds: Vec<f64>,
        min_days_predicted: usize,
        max_days_predicted: usize,
    ) -> Result<Self, ThresholdError> {
        if min_days_predicted > max_days_predicted {
            return Err(ThresholdError::InvertedBounds {
                min: min_days_predicted,
                max: max_days_predicted,
            });
        }
        let model = Self {
            thresholds,
            min_days_predicted,
            max_days_predicted,
        };
        if !model.is_monotonic() {
            tracing::warn!(
                thresholds = ?model.thresholds,
                "Threshold list is not non-decreasing; day predictions may not follow score order"
            );
        }
        Ok(model)
    }

    /// Parses a comma-separated threshold list such as `"0.5,1.5,2.5"`.
    ///
    /// An empty or blank string yields a model that never predicts.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is not a number or the bounds are inverted.
    pub fn parse(
        text: &str,
        min_days_predicted: usize,
        max_days_predicted: usize,
    ) -> Result<Self, ThresholdError> {
        let thresholds = if text.trim().is_empty() {
            Vec::new()
        } else {
            text.split(',')
                .enumerate()
                .map(|(index, value)| {
                    value
                        .trim()
                        .parse::<f64>()
                        .map_err(|_| ThresholdError::InvalidValue {
                            index,
                            value: value.to_string(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        Self::new(thresholds, min_days_predicted, max_days_predicted)
    }

    /// Returns the cut-points.
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Returns the lowest day considered.
    #[must_use]
    pub const fn min_days_predicted(&self) -> usize {
        self.min_days_predicted
    }

    /// Returns the highest day considered.
    #[must_use]
    pub const fn max_days_predicted(&self) -> usize {
        self.max_days_predicted
    }

    /// Returns true if the thresholds never decrease.
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.thresholds.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Buckets a score into a day.
    ///
    /// `day_cap` lowers the highest day considered. Returns `None` when no
    /// day in range has a threshold at or above the score.
    #[must_use]
    pub fn bucket(&self, score: f64, day_cap: Option<usize>) -> Option<usize> {
        let max = day_cap.map_or(self.max_days_predicted, |cap| {
            cap.min(self.max_days_predicted)
        });
        (self.min_days_predicted..=max)
            .take_while(|&day| day < self.thresholds.len())
            .find(|&day| score <= self.thresholds[day])
    }
}
