//! Scoring functions.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Feature, FeatureVector};

/// Score returned by the default scorer.
pub const DEFAULT_SCORE: f64 = 10.0;

/// A pure function from features to a score.
pub trait Scorer: Send + Sync {
    /// Scores a feature vector.
    fn score(&self, features: &FeatureVector) -> f64;
}

impl<F> Scorer for F
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    fn score(&self, features: &FeatureVector) -> f64 {
        self(features)
    }
}

/// Returns the same score for every input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConstantScorer {
    /// The score.
    pub score: f64,
}

impl Default for ConstantScorer {
    fn default() -> Self {
        Self {
            score: DEFAULT_SCORE,
        }
    }
}

impl Scorer for ConstantScorer {
    fn score(&self, _features: &FeatureVector) -> f64 {
        self.score
    }
}

/// Intercept plus a weighted sum of features; unlisted features weigh zero.
///
/// Terms are summed in feature order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinearScorer {
    /// Constant term.
    #[serde(default)]
    pub intercept: f64,
    /// Per-feature weights.
    #[serde(default)]
    pub weights: BTreeMap<Feature, f64>,
}

impl Scorer for LinearScorer {
    fn score(&self, features: &FeatureVector) -> f64 {
        self.weights
            .iter()
            .fold(self.intercept, |acc, (&feature, &weight)| {
                acc + weight * features.get(feature)
            })
    }
}

/// Scorer choice as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScorerConfig {
    /// A [`ConstantScorer`].
    Constant(ConstantScorer),
    /// A [`LinearScorer`].
    Linear(LinearScorer),
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self::Constant(ConstantScorer::default())
    }
}

impl ScorerConfig {
    /// Builds the configured scorer.
    #[must_use]
    pub fn build(&self) -> Box<dyn Scorer> {
        match self {
            Self::Constant(scorer) => Box::new(*scorer),
            Self::Linear(scorer) => Box::new(scorer.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_constant_scorer_default() {
        let scorer = ConstantScorer::default();
        assert_relative_eq!(scorer.score(&FeatureVector::zeroed()), DEFAULT_SCORE);
    }

    #[test]
    fn test_linear_scorer() {
        let mut features = FeatureVector::zeroed();
        features.set(Feature::Distance, 4.0);
        features.set(Feature::HandlingDays, 2.0);
        let scorer = LinearScorer {
            intercept: 0.5,
            weights: BTreeMap::from([(Feature::Distance, 0.25), (Feature::HandlingDays, 1.5)]),
        };
        assert_relative_eq!(scorer.score(&features), 0.5 + 1.0 + 3.0);
    }

    #[test]
    fn test_linear_scorer_sums_in_feature_order() {
        let mut features = FeatureVector::zeroed();
        for feature in [Feature::ItemPrice, Feature::Distance, Feature::HandlingDays] {
            features.set(feature, 1.0);
        }
        // 1e16 + 1.0 rounds back to 1e16, so the order of terms shows.
        let forward = LinearScorer {
            intercept: 0.0,
            weights: BTreeMap::from([
                (Feature::ItemPrice, 1e16),
                (Feature::Distance, 1.0),
                (Feature::HandlingDays, -1e16),
            ]),
        };
        let mut reversed = LinearScorer::default();
        for (feature, weight) in forward.weights.iter().rev() {
            reversed.weights.insert(*feature, *weight);
        }
        assert_eq!(forward.score(&features).to_bits(), 0.0_f64.to_bits());
        for _ in 0..8 {
            assert_eq!(reversed.clone().score(&features).to_bits(), 0.0_f64.to_bits());
        }
    }

    #[test]
    fn test_closure_is_a_scorer() {
        let scorer = |f: &FeatureVector| f.get(Feature::ItemPrice) * 2.0;
        let mut features = FeatureVector::zeroed();
        features.set(Feature::ItemPrice, 3.0);
        assert_relative_eq!(Scorer::score(&scorer, &features), 6.0);
    }

    #[test]
    fn test_scorer_config_from_json() {
        let config: ScorerConfig = serde_json::from_str(
            r#"{"kind": "linear", "intercept": 1.0, "weights": {"distance": 0.5}}"#,
        )
        .unwrap();
        let mut features = FeatureVector::zeroed();
        features.set(Feature::Distance, 2.0);
        assert_relative_eq!(config.build().score(&features), 2.0);

        let constant: ScorerConfig =
            serde_json::from_str(r#"{"kind": "constant", "score": 3.5}"#).unwrap();
        assert_relative_eq!(constant.build().score(&features), 3.5);
    }
}
