//! Raw vehicle specifications supplied by the caller.

use serde::{Deserialize, Serialize};

/// Fields of a [`FeatureRecord`], as named by the trained pipeline's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Horsepower,
    Cylinders,
    Make,
}

impl Field {
    /// All fields in record order.
    pub fn all() -> [Field; 3] {
        [Field::Horsepower, Field::Cylinders, Field::Make]
    }

    /// Resolve a pipeline column name to a record field.
    pub fn from_column(name: &str) -> Option<Field> {
        match name {
            "Horsepower" => Some(Field::Horsepower),
            "Cylinders" => Some(Field::Cylinders),
            "Make" => Some(Field::Make),
            _ => None,
        }
    }

    /// Column name used by the training pipeline.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Horsepower => "Horsepower",
            Field::Cylinders => "Cylinders",
            Field::Make => "Make",
        }
    }

    /// Human readable name used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Horsepower => "horsepower",
            Field::Cylinders => "cylinder layout",
            Field::Make => "manufacturer",
        }
    }
}

/// One prediction request.
///
/// Category values are kept as strings: the artifact's vocabulary decides
/// which ones are valid, not this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    /// Engine power in HP
    pub horsepower: f64,

    /// Cylinder layout code, e.g. `I6` or `V8`
    #[serde(rename = "cylinders")]
    pub cylinder_layout: String,

    /// Manufacturer name, e.g. `Ford`
    #[serde(rename = "make")]
    pub manufacturer: String,
}

impl FeatureRecord {
    pub fn new(
        horsepower: f64,
        cylinder_layout: impl Into<String>,
        manufacturer: impl Into<String>,
    ) -> Self {
        Self {
            horsepower,
            cylinder_layout: cylinder_layout.into(),
            manufacturer: manufacturer.into(),
        }
    }

    /// Categorical value for `field`, `None` for numeric fields.
    pub fn category(&self, field: Field) -> Option<&str> {
        match field {
            Field::Horsepower => None,
            Field::Cylinders => Some(&self.cylinder_layout),
            Field::Make => Some(&self.manufacturer),
        }
    }

    /// Numeric value for `field`, `None` for categorical fields.
    pub fn numeric(&self, field: Field) -> Option<f64> {
        match field {
            Field::Horsepower => Some(self.horsepower),
            Field::Cylinders | Field::Make => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_column_roundtrip() {
        for field in Field::all() {
            assert_eq!(Field::from_column(field.column()), Some(field));
        }
        assert_eq!(Field::from_column("Doors"), None);
    }

    #[test]
    fn test_record_accessors() {
        let record = FeatureRecord::new(345.0, "I6", "Ford");
        assert_eq!(record.numeric(Field::Horsepower), Some(345.0));
        assert_eq!(record.numeric(Field::Make), None);
        assert_eq!(record.category(Field::Cylinders), Some("I6"));
        assert_eq!(record.category(Field::Make), Some("Ford"));
        assert_eq!(record.category(Field::Horsepower), None);
    }

    #[test]
    fn test_record_deserializes_form_names() {
        let record: FeatureRecord =
            serde_json::from_str(r#"{"horsepower": 345, "cylinders": "I6", "make": "Ford"}"#)
                .unwrap();
        assert_eq!(record, FeatureRecord::new(345.0, "I6", "Ford"));
    }
}
