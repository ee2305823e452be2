use ordercast_core::{Error, Result};
use ordercast_features::{FeatureRow, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

use crate::artifact::{self, ArtifactFormat, ModelArtifact};
use crate::tree::{logit, sigmoid};

/// Probability at or above which an order is considered likely
pub const DECISION_THRESHOLD: f64 = 0.5;

/// Anything that turns a feature vector into a positive-class probability
pub trait Scorer {
    /// Probability in [0, 1] for a vector in [`FEATURE_COLUMNS`] order.
    ///
    /// Undefined values are refused with [`Error::InvalidFeatureRow`].
    fn score(&self, features: &[f64]) -> Result<f64>;

    /// Score an assembled row, identifiers excluded
    fn score_row(&self, row: &FeatureRow) -> Result<f64> {
        self.score(&row.feature_vector()?)
    }
}

/// Binary outcome derived from a probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Likely,
    Unlikely,
}

impl Label {
    pub fn from_probability(probability: f64) -> Self {
        if probability >= DECISION_THRESHOLD {
            Label::Likely
        } else {
            Label::Unlikely
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Likely => "likely",
            Label::Unlikely => "unlikely",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Label::Likely => "Likely to Order",
            Label::Unlikely => "Unlikely to Order",
        }
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Label::Likely)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scores with a validated gradient-boosted tree ensemble
#[derive(Debug, Clone)]
pub struct GbdtScorer {
    artifact: ModelArtifact,
    fingerprint: String,
    base_margin: f64,
}

impl GbdtScorer {
    /// Load the artifact at `path`. Any failure is [`Error::ModelUnavailable`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let (artifact, fingerprint) = ModelArtifact::load(path)?;
        let scorer = Self::from_validated(artifact, fingerprint);
        info!(
            path = %path.display(),
            version = %scorer.artifact.version,
            fingerprint = %scorer.fingerprint,
            trees = scorer.artifact.trees.len(),
            trained_encoders = scorer.artifact.encoders.is_some(),
            "model loaded"
        );
        Ok(scorer)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        artifact.validate()?;
        let fingerprint = artifact::fingerprint(&artifact.to_vec(ArtifactFormat::Bincode)?);
        Ok(Self::from_validated(artifact, fingerprint))
    }

    fn from_validated(artifact: ModelArtifact, fingerprint: String) -> Self {
        let base_margin = logit(artifact.base_score);
        Self {
            artifact,
            fingerprint,
            base_margin,
        }
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    pub fn version(&self) -> &str {
        &self.artifact.version
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Raw margin before the logistic link. NaN values follow each split's
    /// missing branch.
    pub fn margin(&self, features: &[f64]) -> Result<f64> {
        if features.len() != FEATURE_COLUMNS.len() {
            return Err(Error::InvalidFeatureRow {
                column: format!("expected {} features, got {}", FEATURE_COLUMNS.len(), features.len()),
            });
        }
        Ok(self.base_margin
            + self
                .artifact
                .trees
                .iter()
                .map(|tree| tree.leaf_value(features))
                .sum::<f64>())
    }
}

impl Scorer for GbdtScorer {
    fn score(&self, features: &[f64]) -> Result<f64> {
        if let Some(idx) = features.iter().position(|v| v.is_nan()) {
            if let Some(column) = FEATURE_COLUMNS.get(idx) {
                return Err(Error::InvalidFeatureRow {
                    column: column.to_string(),
                });
            }
        }
        Ok(sigmoid(self.margin(features)?).clamp(0.0, 1.0))
    }
}
