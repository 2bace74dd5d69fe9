//! Production inference for vehicle market price estimation.
//!
//! A trained pipeline (standardization + one-hot encoding + linear
//! regression on `log1p(price)`) is loaded once at startup and applied to
//! vehicle specs: encode, score, invert the log transform.

pub mod artifact;
pub mod config;
pub mod encoder;
pub mod error;
pub mod form;
pub mod metadata;
pub mod predictor;
pub mod record;
pub mod regressor;
pub mod serve;
pub mod transform;

pub use artifact::{Column, TrainedArtifact, Vocabulary};
pub use config::Config;
pub use encoder::encode;
pub use error::{ArtifactError, PredictionError};
pub use form::{InputForm, SelectField};
pub use metadata::{HorsepowerRange, ModelMetadata};
pub use predictor::{PredictionResult, PricePredictor};
pub use record::{FeatureRecord, Field};
pub use regressor::{score, LinearModel, Regressor};
pub use transform::{format_price, to_price};

/// Library-wide error type for I/O glue around the pipeline.
pub type Result<T> = anyhow::Result<T>;
