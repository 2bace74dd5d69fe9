//! Error types for artifact loading and per-request prediction.
//!
//! Loading errors are fatal: a process that hits one never serves.
//! Prediction errors are returned to the caller and rendered as a message.

use std::path::PathBuf;
use thiserror::Error;

/// The trained artifact could not be turned into a usable pipeline.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("artifact file not found: {}", .path.display())]
    Missing { path: PathBuf },

    #[error("failed to read artifact file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid artifact: {0}")]
    Invalid(#[from] serde_json::Error),

    #[error("weight vector has {weights} entries but the encoder produces {width} columns")]
    ShapeMismatch { weights: usize, width: usize },

    #[error("column `{column}` has an unusable scale {scale}")]
    InvalidScale { column: String, scale: f64 },

    #[error("column `{column}` has non-finite parameters")]
    NonFinite { column: String },

    #[error("column `{column}` has an empty vocabulary")]
    EmptyVocabulary { column: String },

    #[error("column `{column}` lists category `{category}` more than once")]
    DuplicateCategory { column: String, category: String },

    #[error("column `{column}` is not a field of the feature record")]
    UnknownColumn { column: String },

    #[error("column `{column}` must be {expected}")]
    WrongEncoding {
        column: String,
        expected: &'static str,
    },

    #[error("field `{field}` is encoded {count} times, expected exactly once")]
    FieldCoverage { field: &'static str, count: usize },
}

/// A single prediction request was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("unknown {field} `{value}` (expected one of: {})", .expected.join(", "))]
    UnknownCategory {
        field: &'static str,
        value: String,
        expected: Vec<String>,
    },

    #[error("horsepower must be a positive finite number, got {0}")]
    InvalidHorsepower(f64),

    #[error("model produced a non-finite estimate ({0})")]
    NumericAnomaly(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_category_message_lists_vocabulary() {
        let err = PredictionError::UnknownCategory {
            field: "manufacturer",
            value: "Tesla".to_string(),
            expected: vec!["Ford".to_string(), "Audi".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown manufacturer `Tesla` (expected one of: Ford, Audi)"
        );
    }

    #[test]
    fn test_shape_mismatch_message() {
        let err = ArtifactError::ShapeMismatch {
            weights: 16,
            width: 17,
        };
        assert!(err.to_string().contains("16 entries"));
        assert!(err.to_string().contains("17 columns"));
    }
}
