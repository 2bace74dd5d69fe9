//! Input form contract derived from the loaded pipeline.
//!
//! Option lists come from the trained vocabularies so the form can never
//! offer a category the encoder would reject.

use crate::artifact::TrainedArtifact;
use crate::metadata::{HorsepowerRange, ModelMetadata};
use crate::record::{FeatureRecord, Field};
use serde::Serialize;

const PREFERRED_CYLINDERS: &str = "I6";
const PREFERRED_MAKE: &str = "Ford";

/// One dropdown: ordered options plus the initial selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectField {
    pub options: Vec<String>,
    pub default: String,
}

impl SelectField {
    fn new(options: &[String], preferred: &str) -> Self {
        let default = options
            .iter()
            .find(|o| o.as_str() == preferred)
            .or_else(|| options.first())
            .cloned()
            .unwrap_or_default();

        Self {
            options: options.to_vec(),
            default,
        }
    }
}

/// Everything a front end needs to render the vehicle specs form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputForm {
    pub horsepower: HorsepowerRange,
    pub cylinders: SelectField,
    pub make: SelectField,
}

impl InputForm {
    pub fn from_artifact(artifact: &TrainedArtifact, metadata: &ModelMetadata) -> Self {
        let options = |field: Field| {
            artifact
                .vocabulary(field)
                .map(|v| v.categories().to_vec())
                .unwrap_or_default()
        };

        Self {
            horsepower: metadata.horsepower_range,
            cylinders: SelectField::new(&options(Field::Cylinders), PREFERRED_CYLINDERS),
            make: SelectField::new(&options(Field::Make), PREFERRED_MAKE),
        }
    }

    /// Record matching the form's initial state.
    pub fn default_record(&self) -> FeatureRecord {
        FeatureRecord::new(
            self.horsepower.default,
            self.cylinders.default.clone(),
            self.make.default.clone(),
        )
    }
}
