//! Price prediction inference interface.
//!
//! Provides the main PricePredictor struct: it owns the trained artifact for
//! the lifetime of the process and turns vehicle specs into price estimates.

use crate::artifact::TrainedArtifact;
use crate::config::Config;
use crate::encoder::encode;
use crate::error::{ArtifactError, PredictionError};
use crate::form::InputForm;
use crate::metadata::ModelMetadata;
use crate::record::{FeatureRecord, Field};
use crate::regressor::score;
use crate::transform::{format_price, to_price};
use serde::Serialize;

/// Result of a single price prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Estimated market value in dollars, never negative
    pub price_estimate: f64,

    /// Raw regressor output in `log1p` space
    pub log_price: f64,
}

impl PredictionResult {
    /// Price formatted for display, e.g. `$22,812.50`.
    pub fn display(&self) -> String {
        format_price(self.price_estimate)
    }
}

/// Vehicle price predictor backed by a trained linear pipeline.
///
/// Immutable after construction; share it by reference or `Arc` across
/// threads without locking.
#[derive(Debug)]
pub struct PricePredictor {
    /// Encoder parameters and regression weights
    artifact: TrainedArtifact,

    /// Display-only model description
    metadata: ModelMetadata,
}

impl PricePredictor {
    /// Load the pipeline and its metadata sidecar.
    ///
    /// Call once at startup; an error here means the process cannot serve.
    ///
    /// # Example
    /// ```no_run
    /// use pricesense_inference::{Config, FeatureRecord, PricePredictor};
    ///
    /// let predictor = PricePredictor::new(&Config::default()).unwrap();
    /// let result = predictor
    ///     .predict(&FeatureRecord::new(345.0, "I6", "Ford"))
    ///     .unwrap();
    /// println!("{}", result.display());
    /// ```
    pub fn new(config: &Config) -> Result<Self, ArtifactError> {
        let artifact = TrainedArtifact::load(&config.pipeline_path())?;
        let metadata = ModelMetadata::load(&config.metadata_path())?;

        log::info!(
            "predictor ready: {} cylinder layouts, {} manufacturers",
            artifact.vocabulary(Field::Cylinders).map_or(0, |v| v.len()),
            artifact.vocabulary(Field::Make).map_or(0, |v| v.len()),
        );

        Ok(Self::from_parts(artifact, metadata))
    }

    pub fn from_parts(artifact: TrainedArtifact, metadata: ModelMetadata) -> Self {
        Self { artifact, metadata }
    }

    /// Estimate the market price for `record`.
    pub fn predict(&self, record: &FeatureRecord) -> Result<PredictionResult, PredictionError> {
        let features = encode(record, &self.artifact)?;
        let log_price = score(&features, &self.artifact);
        let price_estimate = to_price(log_price)?;

        Ok(PredictionResult {
            price_estimate,
            log_price,
        })
    }

    /// Form contract derived from the trained vocabularies.
    pub fn form(&self) -> InputForm {
        InputForm::from_artifact(&self.artifact, &self.metadata)
    }

    /// "Model Details" text.
    pub fn details(&self) -> String {
        self.metadata.render_details()
    }

    pub fn artifact(&self) -> &TrainedArtifact {
        &self.artifact
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }
}
