//! Feature encoding: raw record to the fixed-width regression input.
//!
//! Layout follows the artifact's column order exactly. Standardized columns
//! take one slot, one-hot columns take one slot per trained category.

use crate::artifact::{Column, TrainedArtifact};
use crate::error::PredictionError;
use crate::record::{Field, FeatureRecord};
use ndarray::Array1;

/// Encode `record` against the trained vocabularies and scaling parameters.
///
/// A category outside the trained vocabulary is rejected rather than
/// encoded as an all-zero block.
pub fn encode(
    record: &FeatureRecord,
    artifact: &TrainedArtifact,
) -> Result<Array1<f64>, PredictionError> {
    let mut features = Array1::<f64>::zeros(artifact.width());
    let mut offset = 0;

    for column in artifact.columns() {
        match column {
            Column::Standardize { field, mean, scale } => {
                let value = numeric_value(record, *field)?;
                features[offset] = standardize(value, *mean, *scale);
            }
            Column::OneHot { field, vocabulary } => {
                let value = record.category(*field).unwrap_or_default();
                let position =
                    vocabulary
                        .position(value)
                        .ok_or_else(|| PredictionError::UnknownCategory {
                            field: field.label(),
                            value: value.to_string(),
                            expected: vocabulary.categories().to_vec(),
                        })?;
                features[offset + position] = 1.0;
            }
        }
        offset += column.width();
    }

    Ok(features)
}

/// `(value - mean) / scale`
pub fn standardize(value: f64, mean: f64, scale: f64) -> f64 {
    (value - mean) / scale
}

fn numeric_value(record: &FeatureRecord, field: Field) -> Result<f64, PredictionError> {
    let value = record.numeric(field).unwrap_or(f64::NAN);
    if !value.is_finite() || value <= 0.0 {
        return Err(PredictionError::InvalidHorsepower(value));
    }
    Ok(value)
}
