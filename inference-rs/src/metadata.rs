//! Display-only sidecar describing the trained model.
//!
//! Nothing in here feeds the math; it backs the "Model Details" text and
//! the horsepower input bounds.

use crate::error::ArtifactError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Suggested horsepower input range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorsepowerRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
}

impl Default for HorsepowerRange {
    fn default() -> Self {
        Self {
            min: 122.0,
            max: 831.0,
            default: 345.0,
        }
    }
}

/// Contents of `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Feature names shown to the user
    #[serde(default = "default_features")]
    pub features: Vec<String>,

    /// Processing steps shown to the user
    #[serde(default = "default_processing_steps")]
    pub processing_steps: Vec<String>,

    #[serde(default)]
    pub horsepower_range: HorsepowerRange,

    /// Any other keys, kept for display
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

fn default_features() -> Vec<String> {
    vec![
        "Horsepower".to_string(),
        "Cylinder Configuration".to_string(),
        "Manufacturer".to_string(),
    ]
}

fn default_processing_steps() -> Vec<String> {
    vec![
        "Feature Scaling".to_string(),
        "One-Hot Encoding".to_string(),
        "Linear Regression Model".to_string(),
    ]
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            features: default_features(),
            processing_steps: default_processing_steps(),
            horsepower_range: HorsepowerRange::default(),
            extra: BTreeMap::new(),
        }
    }
}

impl ModelMetadata {
    /// Load the sidecar at `path`.
    ///
    /// A missing file falls back to the defaults; an unreadable or malformed
    /// one is an error.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::warn!(
                    "metadata file {} not found, using defaults",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ArtifactError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let metadata: Self =
            serde_json::from_str(&text).map_err(|source| ArtifactError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let range = metadata.horsepower_range;
        if !(range.min > 0.0 && range.min <= range.default && range.default <= range.max) {
            log::warn!(
                "metadata horsepower range {}..{} (default {}) is inconsistent, using defaults",
                range.min,
                range.max,
                range.default
            );
            return Ok(Self {
                horsepower_range: HorsepowerRange::default(),
                ..metadata
            });
        }

        Ok(metadata)
    }

    /// Render the "Model Details" block as markdown.
    pub fn render_details(&self) -> String {
        let mut out = String::from("### Key Features\n");
        for feature in &self.features {
            out.push_str("- ");
            out.push_str(feature);
            out.push('\n');
        }
        out.push_str("\n### Processing Steps\n");
        for step in &self.processing_steps {
            out.push_str("- ");
            out.push_str(step);
            out.push('\n');
        }
        out
    }
}
