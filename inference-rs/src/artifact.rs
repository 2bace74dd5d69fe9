//! Trained pipeline artifact: encoder parameters plus regression weights.
//!
//! The pipeline file lists its columns in training order. That order is the
//! layout of the encoded vector and is never re-derived at inference time.
//!
//! ```json
//! {
//!   "columns": [
//!     {"kind": "standardize", "column": "Horsepower", "mean": 400.0, "scale": 150.0},
//!     {"kind": "one_hot", "column": "Cylinders", "categories": ["I4", "I6", "V8"]},
//!     {"kind": "one_hot", "column": "Make", "categories": ["Audi", "Ford"]}
//!   ],
//!   "regressor": {"kind": "linear", "coefficients": [...], "intercept": 10.2}
//! }
//! ```

use crate::error::ArtifactError;
use crate::record::Field;
use crate::regressor::{Regressor, RegressorSpec};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

/// One encoder step as stored in the pipeline file.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnSpec {
    Standardize {
        column: String,
        mean: f64,
        scale: f64,
    },
    OneHot {
        column: String,
        categories: Vec<String>,
    },
}

/// Pipeline file layout.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineSpec {
    pub columns: Vec<ColumnSpec>,
    pub regressor: RegressorSpec,
}

/// Ordered category list with a lookup index.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    categories: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    fn new(column: &str, categories: Vec<String>) -> Result<Self, ArtifactError> {
        if categories.is_empty() {
            return Err(ArtifactError::EmptyVocabulary {
                column: column.to_string(),
            });
        }

        let mut index = HashMap::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            if index.insert(category.clone(), i).is_some() {
                return Err(ArtifactError::DuplicateCategory {
                    column: column.to_string(),
                    category: category.clone(),
                });
            }
        }

        Ok(Self { categories, index })
    }

    /// Position of `category` inside its one-hot block.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.index.get(category).copied()
    }

    /// Categories in encoding order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Validated encoder step.
#[derive(Debug, Clone)]
pub enum Column {
    Standardize { field: Field, mean: f64, scale: f64 },
    OneHot { field: Field, vocabulary: Vocabulary },
}

impl Column {
    fn from_spec(spec: ColumnSpec) -> Result<Self, ArtifactError> {
        match spec {
            ColumnSpec::Standardize {
                column,
                mean,
                scale,
            } => {
                let field = resolve_field(&column)?;
                if field != Field::Horsepower {
                    return Err(ArtifactError::WrongEncoding {
                        column,
                        expected: "one-hot encoded",
                    });
                }
                if !mean.is_finite() {
                    return Err(ArtifactError::NonFinite { column });
                }
                if !scale.is_finite() || scale == 0.0 {
                    return Err(ArtifactError::InvalidScale { column, scale });
                }
                Ok(Column::Standardize { field, mean, scale })
            }
            ColumnSpec::OneHot { column, categories } => {
                let field = resolve_field(&column)?;
                if field == Field::Horsepower {
                    return Err(ArtifactError::WrongEncoding {
                        column,
                        expected: "standardized",
                    });
                }
                let vocabulary = Vocabulary::new(&column, categories)?;
                Ok(Column::OneHot { field, vocabulary })
            }
        }
    }

    /// Record field this step consumes.
    pub fn field(&self) -> Field {
        match self {
            Column::Standardize { field, .. } | Column::OneHot { field, .. } => *field,
        }
    }

    /// Number of output entries this step contributes.
    pub fn width(&self) -> usize {
        match self {
            Column::Standardize { .. } => 1,
            Column::OneHot { vocabulary, .. } => vocabulary.len(),
        }
    }
}

fn resolve_field(column: &str) -> Result<Field, ArtifactError> {
    Field::from_column(column).ok_or_else(|| ArtifactError::UnknownColumn {
        column: column.to_string(),
    })
}

/// Loaded, validated pipeline. Immutable once built.
#[derive(Debug)]
pub struct TrainedArtifact {
    columns: Vec<Column>,
    width: usize,
    regressor: Box<dyn Regressor>,
}

impl TrainedArtifact {
    /// Load the pipeline file at `path`.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ArtifactError::Missing {
                    path: path.to_path_buf(),
                }
            } else {
                ArtifactError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let spec: PipelineSpec =
            serde_json::from_str(&text).map_err(|source| ArtifactError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;

        let artifact = Self::from_spec(spec)?;
        log::info!(
            "loaded pipeline from {} ({} encoded columns)",
            path.display(),
            artifact.width
        );
        Ok(artifact)
    }

    /// Parse a pipeline from its JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ArtifactError> {
        Self::from_spec(serde_json::from_str(text)?)
    }

    /// Validate a deserialized pipeline and build the artifact.
    pub fn from_spec(spec: PipelineSpec) -> Result<Self, ArtifactError> {
        let columns = spec
            .columns
            .into_iter()
            .map(Column::from_spec)
            .collect::<Result<Vec<_>, _>>()?;

        for field in Field::all() {
            let count = columns.iter().filter(|c| c.field() == field).count();
            if count != 1 {
                return Err(ArtifactError::FieldCoverage {
                    field: field.column(),
                    count,
                });
            }
        }

        let width = columns.iter().map(Column::width).sum();
        let regressor = spec.regressor.build()?;
        if regressor.input_width() != width {
            return Err(ArtifactError::ShapeMismatch {
                weights: regressor.input_width(),
                width,
            });
        }

        Ok(Self {
            columns,
            width,
            regressor,
        })
    }

    /// Encoder steps in output order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Length of every encoded vector.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }

    /// Trained vocabulary for a categorical field.
    pub fn vocabulary(&self, field: Field) -> Option<&Vocabulary> {
        self.columns.iter().find_map(|column| match column {
            Column::OneHot {
                field: f,
                vocabulary,
            } if *f == field => Some(vocabulary),
            _ => None,
        })
    }
}
