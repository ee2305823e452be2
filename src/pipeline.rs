use ordercast_core::{Query, Result};
use ordercast_features::{AssemblerBuilder, FeatureAssembler, FeatureRow};
use ordercast_scoring::{GbdtScorer, Label, Scorer};
use ordercast_storage::ReferenceData;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// Result of one prediction
#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub request_id: Uuid,
    pub probability: f64,
    pub label: Label,
    pub features: FeatureRow,
}

impl Prediction {
    pub fn percent(&self) -> f64 {
        self.probability * 100.0
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Prediction: {}", self.label.headline())?;
        write!(f, "Probability: {:.2}%", self.percent())
    }
}

/// Assemble, validate and score one query at a time
pub struct Predictor<S = GbdtScorer> {
    assembler: FeatureAssembler,
    scorer: Arc<S>,
}

impl Predictor<GbdtScorer> {
    /// Assembler policies follow what the model artifact ships: trained
    /// encoders and historical distance mean when present.
    pub fn new(data: Arc<ReferenceData>, scorer: Arc<GbdtScorer>) -> Self {
        let artifact = scorer.artifact();
        let assembler = AssemblerBuilder::new(data)
            .encoding(artifact.encoding_policy())
            .distance_fill(artifact.distance_fill())
            .build();
        Self { assembler, scorer }
    }
}

impl<S: Scorer> Predictor<S> {
    pub fn with_parts(assembler: FeatureAssembler, scorer: Arc<S>) -> Self {
        Self { assembler, scorer }
    }

    pub fn assembler(&self) -> &FeatureAssembler {
        &self.assembler
    }

    pub fn data(&self) -> &ReferenceData {
        self.assembler.data()
    }

    /// Returns a prediction, or a recoverable `NotFound` / `InvalidFeatureRow`
    pub fn predict(&self, query: &Query) -> Result<Prediction> {
        let request_id = Uuid::new_v4();
        let span = info_span!("predict", %request_id, %query);
        let _enter = span.enter();

        let features = self.assembler.assemble_query(query).map_err(|e| {
            info!(reason = %e, "cannot assemble features");
            e
        })?;

        let probability = self.scorer.score_row(&features).map_err(|e| {
            info!(reason = %e, "feature row rejected");
            e
        })?;
        let label = Label::from_probability(probability);
        debug!(probability, %label, "scored");

        Ok(Prediction {
            request_id,
            probability,
            label,
            features,
        })
    }
}
