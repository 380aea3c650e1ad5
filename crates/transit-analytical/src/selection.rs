//! Per-request model selection.

/// Which trained model scores a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelVariant {
    /// The production model.
    #[default]
    Default,
    /// The experiment model.
    Experiment,
}

impl std::fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Experiment => f.write_str("experiment"),
        }
    }
}

/// Model choice carried by a request's selection token.
///
/// | Token | Meaning |
/// |-------|---------|
/// | absent or unrecognized | default model |
/// | `b` | experiment model |
/// | `qa` | QA lookup table instead of a model |
/// | `D0`..`D9` | default model, highest day capped at the digit |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModelSelection {
    /// Default model.
    #[default]
    Default,
    /// Experiment model.
    Experiment,
    /// Deterministic QA lookup.
    Qa,
    /// Default model with a day cap.
    DayCap(u8),
}

impl ModelSelection {
    /// Parses a selection token. Never fails; unknown tokens select the default model.
    #[must_use]
    pub fn parse(token: Option<&str>) -> Self {
        match token.map(str::as_bytes) {
            Some(b"b") => Self::Experiment,
            Some(b"qa") => Self::Qa,
            Some(&[b'D', digit]) if digit.is_ascii_digit() => Self::DayCap(digit - b'0'),
            _ => Self::Default,
        }
    }

    /// Returns the model variant to score with, or `None` for QA lookups.
    #[must_use]
    pub const fn variant(self) -> Option<ModelVariant> {
        match self {
            Self::Default | Self::DayCap(_) => Some(ModelVariant::Default),
            Self::Experiment => Some(ModelVariant::Experiment),
            Self::Qa => None,
        }
    }

    /// Returns the requested day cap.
    #[must_use]
    pub const fn day_cap(self) -> Option<usize> {
        match self {
            Self::DayCap(cap) => Some(cap as usize),
            _ => None,
        }
    }
}
