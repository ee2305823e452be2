//! # ordercast Scoring
//!
//! Wraps the pre-trained order-likelihood classifier: a gradient-boosted
//! decision tree ensemble with a logistic link.
//!
//! The model is an opaque, versioned artifact owned by the training
//! pipeline. It is loaded and validated once at startup; a load failure is
//! [`Error::ModelUnavailable`](ordercast_core::Error::ModelUnavailable) and
//! should abort the process rather than fail each request.
//!
//! ```rust
//! use ordercast_scoring::{GbdtScorer, Label, ModelArtifact, Scorer, Tree};
//!
//! let artifact = ModelArtifact::new("demo", vec![Tree::stump(10, 1.0, 0.9, -0.9)]);
//! let scorer = GbdtScorer::from_artifact(artifact).unwrap();
//!
//! let features = [1.0, 31.0, 0.0, 120.0, 1.0, 24.0, 54.0, 2.0, 24.0, 54.0, 0.0];
//! let p = scorer.score(&features).unwrap();
//! assert_eq!(Label::from_probability(p), Label::Likely);
//! ```

pub mod artifact;
pub mod scorer;
pub mod tree;

pub use artifact::{ArtifactFormat, ModelArtifact};
pub use scorer::{GbdtScorer, Label, Scorer, DECISION_THRESHOLD};
pub use tree::{Node, Tree};
