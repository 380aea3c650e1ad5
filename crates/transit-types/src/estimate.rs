//! Hour- and day-based delivery estimates.

use serde::{Deserialize, Serialize};

/// Delivery-time bounds in hours for a shipping service under some key.
///
/// A negative bound means "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceEstimate {
    /// Minimum delivery time in hours.
    pub min_hours: i16,
    /// Maximum delivery time in hours.
    pub max_hours: i16,
}

impl ServiceEstimate {
    /// The "unknown" estimate.
    pub const UNKNOWN: Self = Self {
        min_hours: -1,
        max_hours: -1,
    };

    /// Creates a new estimate.
    #[must_use]
    pub const fn new(min_hours: i16, max_hours: i16) -> Self {
        Self {
            min_hours,
            max_hours,
        }
    }

    /// Returns true if the upper bound is a real value.
    ///
    /// Table entries whose `max_hours` is negative are placeholders and must
    /// not stop a cascade.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.max_hours >= 0
    }

    /// Converts to whole business days and adds the handling time.
    ///
    /// Each bound stays `-1` when it is unknown or when `handling_days` is not
    /// positive.
    #[must_use]
    pub const fn to_days(&self, handling_days: i32) -> DeliveryEstimate {
        DeliveryEstimate {
            min_days: hours_to_days(self.min_hours, handling_days),
            max_days: hours_to_days(self.max_hours, handling_days),
        }
    }
}

const fn hours_to_days(hours: i16, handling_days: i32) -> i64 {
    if hours >= 0 && handling_days > 0 {
        (hours / 24) as i64 + handling_days as i64
    } else {
        -1
    }
}

impl Default for ServiceEstimate {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

/// Replaces a zero handling time with one day.
#[must_use]
pub const fn normalize_handling_days(handling_days: i32) -> i32 {
    if handling_days == 0 { 1 } else { handling_days }
}

/// Delivery-time bounds in days, as returned to the caller.
///
/// Both bounds are `-1` when no estimate could be produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeliveryEstimate {
    /// Minimum delivery time in days.
    pub min_days: i64,
    /// Maximum delivery time in days.
    pub max_days: i64,
}

impl DeliveryEstimate {
    /// The sentinel "no estimate" pair.
    pub const NONE: Self = Self {
        min_days: -1,
        max_days: -1,
    };

    /// Creates a new estimate.
    #[must_use]
    pub const fn new(min_days: i64, max_days: i64) -> Self {
        Self { min_days, max_days }
    }

    /// Creates a point estimate where both bounds are the same day.
    #[must_use]
    pub const fn point(days: i64) -> Self {
        Self {
            min_days: days,
            max_days: days,
        }
    }

    /// Returns true if the upper bound is a real value.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.max_days >= 0
    }
}

impl Default for DeliveryEstimate {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::fmt::Display for DeliveryEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.is_known() {
            write!(f, "no estimate")
        } else if self.min_days == self.max_days {
            write!(f, "{} days", self.max_days)
        } else {
            write!(f, "{}-{} days", self.min_days, self.max_days)
        }
    }
}
