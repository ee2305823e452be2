//! Gradient-boosted regression trees
//!
//! Trees are stored as flat node arrays. A split sends a sample to `yes`
//! when its value is below the threshold, to `missing` when the value is
//! NaN, and to `no` otherwise. Child indices always point past their parent,
//! which is checked once at load time so traversal cannot loop.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<Node>,
}

impl Tree {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// A tree with one split on `feature`
    pub fn stump(feature: usize, threshold: f64, below: f64, above: f64) -> Self {
        Self::new(vec![
            Node::Split {
                feature,
                threshold,
                yes: 1,
                no: 2,
                missing: 2,
            },
            Node::Leaf(below),
            Node::Leaf(above),
        ])
    }

    /// Structural checks against a feature count
    pub fn validate(&self, num_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    if *feature >= num_features {
                        return Err(format!("node {idx} splits on feature {feature}, only {num_features} exist"));
                    }
                    if threshold.is_nan() {
                        return Err(format!("node {idx} has a NaN threshold"));
                    }
                    for child in [*yes, *no, *missing] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!("node {idx} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf(value) => {
                    if !value.is_finite() {
                        return Err(format!("node {idx} has a non-finite leaf"));
                    }
                }
            }
        }
        Ok(())
    }

    /// Leaf value reached by `features`. Assumes the tree passed `validate`
    /// and `features` covers every split feature.
    pub(crate) fn leaf_value(&self, features: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let value = features[*feature];
                    idx = if value.is_nan() {
                        *missing
                    } else if value < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }
    }
}

/// Logistic link
#[inline]
pub fn sigmoid(margin: f64) -> f64 {
    1.0 / (1.0 + (-margin).exp())
}

/// Inverse of [`sigmoid`] for a probability in (0, 1)
#[inline]
pub fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}
