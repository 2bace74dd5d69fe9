//! Artifact location, read from the environment.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

pub const MODEL_DIR_VAR: &str = "PRICESENSE_MODEL_DIR";
pub const PIPELINE_FILE_VAR: &str = "PRICESENSE_PIPELINE_FILE";
pub const METADATA_FILE_VAR: &str = "PRICESENSE_METADATA_FILE";

/// Configuration for the price predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the trained artifact
    pub model_dir: PathBuf,

    /// Pipeline file name inside `model_dir`
    pub pipeline_file: String,

    /// Metadata sidecar file name inside `model_dir`
    pub metadata_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("saved_model"),
            pipeline_file: "best_pipeline.json".to_string(),
            metadata_file: "metadata.json".to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by any `PRICESENSE_*` variables that are set.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            model_dir: lookup(MODEL_DIR_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),
            pipeline_file: lookup(PIPELINE_FILE_VAR).unwrap_or(defaults.pipeline_file),
            metadata_file: lookup(METADATA_FILE_VAR).unwrap_or(defaults.metadata_file),
        }
    }

    /// Config pointing at `model_dir` with default file names.
    pub fn with_model_dir(model_dir: impl Into<PathBuf>) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Self::default()
        }
    }

    pub fn pipeline_path(&self) -> PathBuf {
        self.model_dir.join(&self.pipeline_file)
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.model_dir.join(&self.metadata_file)
    }
}
