//! Regression stage: encoded feature vector to log-price.

use crate::artifact::TrainedArtifact;
use crate::error::ArtifactError;
use ndarray::Array1;
use serde::Deserialize;
use std::fmt;

/// Scores an encoded feature vector in log-price space.
///
/// Implementations only need to accept the encoder's column layout; what
/// happens behind `score` is opaque to the rest of the pipeline.
pub trait Regressor: fmt::Debug + Send + Sync {
    /// Number of input columns the model expects.
    fn input_width(&self) -> usize;

    /// Predicted `log1p(price)` for one encoded row.
    fn score(&self, features: &Array1<f64>) -> f64;
}

/// Score an encoded vector with the artifact's regression stage.
pub fn score(features: &Array1<f64>, artifact: &TrainedArtifact) -> f64 {
    artifact.regressor().score(features)
}

/// Serialized regression stage of the pipeline file.
///
/// Regularized linear models share the linear scoring form, so they are
/// accepted under their own names.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RegressorSpec {
    #[serde(alias = "ridge", alias = "lasso", alias = "elastic_net")]
    Linear {
        coefficients: Vec<f64>,
        intercept: f64,
    },
}

impl RegressorSpec {
    /// Validate the stored parameters and build the scoring model.
    pub fn build(self) -> Result<Box<dyn Regressor>, ArtifactError> {
        match self {
            RegressorSpec::Linear {
                coefficients,
                intercept,
            } => Ok(Box::new(LinearModel::new(coefficients, intercept)?)),
        }
    }
}

/// Ordinary linear model: `w · x + b`.
#[derive(Debug, Clone)]
pub struct LinearModel {
    weights: Array1<f64>,
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Result<Self, ArtifactError> {
        if !intercept.is_finite() || coefficients.iter().any(|w| !w.is_finite()) {
            return Err(ArtifactError::NonFinite {
                column: "regressor".to_string(),
            });
        }

        Ok(Self {
            weights: Array1::from(coefficients),
            intercept,
        })
    }

    pub fn weights(&self) -> &Array1<f64> {
        &self.weights
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }
}

impl Regressor for LinearModel {
    fn input_width(&self) -> usize {
        self.weights.len()
    }

    fn score(&self, features: &Array1<f64>) -> f64 {
        debug_assert_eq!(features.len(), self.weights.len());
        features.dot(&self.weights) + self.intercept
    }
}
