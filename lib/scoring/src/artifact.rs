//! Model artifact
//!
//! The serialized classifier produced by the external training pipeline.
//! Besides the tree ensemble it may carry the training-time category
//! encoders and the historical mean distance, which the feature assembler
//! uses in place of per-request encoding and single-row mean imputation.

use chrono::{DateTime, Utc};
use ordercast_core::{Error, Result};
use ordercast_features::{CategoryEncoders, DistanceFill, EncodingPolicy, FEATURE_COLUMNS};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;

use crate::tree::Tree;

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Chosen by extension: `.bin`/`.bincode` are bincode, anything else JSON
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("bin") | Some("bincode") => ArtifactFormat::Bincode,
            _ => ArtifactFormat::Json,
        }
    }
}

fn default_base_score() -> f64 {
    0.5
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub version: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    /// Prior probability the ensemble's margin is added to
    #[serde(default = "default_base_score")]
    pub base_score: f64,
    pub feature_names: Vec<String>,
    pub trees: Vec<Tree>,
    #[serde(default)]
    pub encoders: Option<CategoryEncoders>,
    /// Mean customer-vendor distance over the training data
    #[serde(default)]
    pub distance_mean: Option<f64>,
}

impl ModelArtifact {
    /// Artifact over the standard feature columns
    pub fn new(version: impl Into<String>, trees: Vec<Tree>) -> Self {
        Self {
            version: version.into(),
            trained_at: None,
            base_score: default_base_score(),
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            trees,
            encoders: None,
            distance_mean: None,
        }
    }

    #[must_use]
    pub fn with_encoders(mut self, encoders: CategoryEncoders) -> Self {
        self.encoders = Some(encoders);
        self
    }

    #[must_use]
    pub fn with_distance_mean(mut self, mean: f64) -> Self {
        self.distance_mean = Some(mean);
        self
    }

    #[must_use]
    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    pub fn from_slice(bytes: &[u8], format: ArtifactFormat) -> Result<Self> {
        let artifact: ModelArtifact = match format {
            ArtifactFormat::Json => serde_json::from_slice(bytes).map_err(|e| unavailable(format!("invalid JSON artifact: {e}")))?,
            ArtifactFormat::Bincode => {
                bincode::deserialize(bytes).map_err(|e| unavailable(format!("invalid bincode artifact: {e}")))?
            }
        };
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn to_vec(&self, format: ArtifactFormat) -> Result<Vec<u8>> {
        match format {
            ArtifactFormat::Json => serde_json::to_vec_pretty(self).map_err(Error::from),
            ArtifactFormat::Bincode => bincode::serialize(self).map_err(|e| Error::Serialization(e.to_string())),
        }
    }

    /// Read and validate an artifact, returning it with its SHA-256 fingerprint
    pub fn load<P: AsRef<Path>>(path: P) -> Result<(Self, String)> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| unavailable(format!("{}: {e}", path.display())))?;
        let fingerprint = fingerprint(&bytes);
        let artifact = Self::from_slice(&bytes, ArtifactFormat::from_path(path)).map_err(|e| match e {
            Error::ModelUnavailable(msg) => unavailable(format!("{}: {msg}", path.display())),
            other => other,
        })?;
        Ok((artifact, fingerprint))
    }

    /// Everything checked once at startup so scoring never trips over a bad artifact
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.len() != FEATURE_COLUMNS.len()
            || self.feature_names.iter().zip(FEATURE_COLUMNS.iter()).any(|(a, b)| a != b)
        {
            return Err(unavailable(format!(
                "feature names {:?} do not match expected {:?}",
                self.feature_names, FEATURE_COLUMNS
            )));
        }
        if !(self.base_score > 0.0 && self.base_score < 1.0) {
            return Err(unavailable(format!("base_score {} outside (0, 1)", self.base_score)));
        }
        if self.trees.is_empty() {
            return Err(unavailable("ensemble has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.feature_names.len())
                .map_err(|e| unavailable(format!("tree {i}: {e}")))?;
        }
        if let Some(encoders) = &self.encoders {
            encoders.validate().map_err(|e| unavailable(e.to_string()))?;
        }
        if let Some(mean) = self.distance_mean {
            if !mean.is_finite() || mean < 0.0 {
                return Err(unavailable(format!("distance_mean {mean} is not a valid distance")));
            }
        }
        Ok(())
    }

    /// Training-time encoders when shipped, else the legacy per-row encoding
    pub fn encoding_policy(&self) -> EncodingPolicy {
        match &self.encoders {
            Some(encoders) => EncodingPolicy::Trained(encoders.clone()),
            None => EncodingPolicy::PerRow,
        }
    }

    /// Historical mean when shipped, else the single-row mean
    pub fn distance_fill(&self) -> DistanceFill {
        match self.distance_mean {
            Some(mean) => DistanceFill::Historical(mean),
            None => DistanceFill::RowMean,
        }
    }
}

pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

fn unavailable(msg: impl Into<String>) -> Error {
    Error::ModelUnavailable(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordercast_features::CategoryEncoder;
    use std::fs;
    use tempfile::TempDir;

    fn artifact() -> ModelArtifact {
        ModelArtifact::new("2024-05-01", vec![Tree::stump(10, 1.0, 0.8, -0.8)])
    }

    fn encoders() -> CategoryEncoders {
        CategoryEncoders {
            gender: CategoryEncoder::fit(["Female", "Male"]),
            language: CategoryEncoder::fit(["EN"]),
            location_type: CategoryEncoder::fit(["Home", "Work"]),
            vendor_tag: CategoryEncoder::fit(["Pizza"]),
        }
    }

    #[test]
    fn test_json_and_bincode_load() {
        let dir = TempDir::new().unwrap();
        let original = artifact().with_encoders(encoders()).with_distance_mean(0.3);

        for (name, format) in [("model.json", ArtifactFormat::Json), ("model.bin", ArtifactFormat::Bincode)] {
            let path = dir.path().join(name);
            fs::write(&path, original.to_vec(format).unwrap()).unwrap();
            let (loaded, fp) = ModelArtifact::load(&path).unwrap();
            assert_eq!(loaded, original);
            assert_eq!(fp.len(), 64);
        }
    }

    #[test]
    fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = ModelArtifact::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_garbage_is_unavailable() {
        let err = ModelArtifact::from_slice(b"not a model", ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, Error::ModelUnavailable(_)));
    }

    #[test]
    fn test_feature_names_must_match() {
        let mut a = artifact();
        a.feature_names.swap(0, 1);
        assert!(matches!(a.validate(), Err(Error::ModelUnavailable(_))));

        let mut a = artifact();
        a.feature_names.pop();
        assert!(a.validate().is_err());
    }

    #[test]
    fn test_structural_checks() {
        assert!(ModelArtifact::new("v", vec![]).validate().is_err());
        assert!(artifact().with_base_score(1.0).validate().is_err());
        assert!(artifact().with_distance_mean(f64::NAN).validate().is_err());
        let bad_tree = ModelArtifact::new("v", vec![Tree::stump(11, 0.0, 0.0, 0.0)]);
        assert!(bad_tree.validate().is_err());
    }

    #[test]
    fn test_policies_follow_artifact_contents() {
        let plain = artifact();
        assert_eq!(plain.encoding_policy(), EncodingPolicy::PerRow);
        assert_eq!(plain.distance_fill(), DistanceFill::RowMean);

        let full = artifact().with_encoders(encoders()).with_distance_mean(0.3);
        assert!(full.encoding_policy().is_trained());
        assert_eq!(full.distance_fill(), DistanceFill::Historical(0.3));
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = format!(
            r#"{{"version":"v1","feature_names":{},"trees":[{{"nodes":[{{"leaf":0.0}}]}}]}}"#,
            serde_json::to_string(&FEATURE_COLUMNS).unwrap()
        );
        let a = ModelArtifact::from_slice(json.as_bytes(), ArtifactFormat::Json).unwrap();
        assert_eq!(a.base_score, 0.5);
        assert!(a.encoders.is_none());
        assert!(a.trained_at.is_none());
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        assert_ne!(fingerprint(b"a"), fingerprint(b"b"));
        assert_eq!(fingerprint(b"a"), fingerprint(b"a"));
    }
}
