//! End-to-end checks against the fixture artifact in `tests/fixtures/saved_model`.

use pricesense_inference::{
    encode, ArtifactError, Config, FeatureRecord, Field, PredictionError, PricePredictor,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

const CYLINDERS: [&str; 9] = ["I3", "I4", "I5", "I6", "V6", "V8", "V10", "V12", "W12"];
const MAKES: [&str; 7] = [
    "Ford",
    "Mercedes-Benz",
    "Audi",
    "Nissan",
    "BMW",
    "Bentley",
    "Aston Martin",
];

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/saved_model")
}

fn load() -> PricePredictor {
    PricePredictor::new(&Config::with_model_dir(fixture_dir())).unwrap()
}

#[test]
fn test_encoded_width_is_constant() {
    let predictor = load();
    let artifact = predictor.artifact();
    assert_eq!(artifact.width(), 17);

    for cylinders in CYLINDERS {
        for make in MAKES {
            let record = FeatureRecord::new(400.0, cylinders, make);
            let features = encode(&record, artifact).unwrap();
            assert_eq!(features.len(), 17);
            assert_eq!(features[0], 0.0);
            assert_eq!(features.iter().filter(|&&v| v == 1.0).count(), 2);
            assert_eq!(features.iter().filter(|&&v| v == 0.0).count(), 15);
        }
    }
}

#[test]
fn test_reference_example_is_deterministic() {
    let predictor = load();
    let record = FeatureRecord::new(345.0, "I6", "Ford");

    let first = predictor.predict(&record).unwrap();
    let second = predictor.predict(&record).unwrap();

    assert!(first.price_estimate >= 0.0);
    assert_eq!(
        first.price_estimate.to_bits(),
        second.price_estimate.to_bits()
    );

    // 10.45 + 0.52 * (345 - 400) / 160 + 0.05 - 0.38
    let expected = (10.45_f64 + 0.52 * (-55.0 / 160.0) + 0.05 - 0.38).exp_m1();
    assert!((first.price_estimate - expected).abs() / expected < 1e-9);
}

#[test]
fn test_horsepower_range_extremes() {
    let predictor = load();
    for hp in [122.0, 831.0] {
        for cylinders in CYLINDERS {
            for make in MAKES {
                let result = predictor
                    .predict(&FeatureRecord::new(hp, cylinders, make))
                    .unwrap();
                assert!(result.price_estimate.is_finite());
                assert!(result.price_estimate >= 0.0);
            }
        }
    }
}

#[test]
fn test_more_power_costs_more() {
    let predictor = load();
    let low = predictor
        .predict(&FeatureRecord::new(200.0, "V8", "BMW"))
        .unwrap();
    let high = predictor
        .predict(&FeatureRecord::new(600.0, "V8", "BMW"))
        .unwrap();
    assert!(high.price_estimate > low.price_estimate);
}

#[test]
fn test_unknown_manufacturer_rejected() {
    let predictor = load();
    let err = predictor
        .predict(&FeatureRecord::new(345.0, "I6", "Toyota"))
        .unwrap_err();
    match err {
        PredictionError::UnknownCategory {
            field, expected, ..
        } => {
            assert_eq!(field, "manufacturer");
            assert_eq!(expected.len(), 7);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_form_matches_vocabulary() {
    let predictor = load();
    let form = predictor.form();

    assert_eq!(form.horsepower.min, 122.0);
    assert_eq!(form.horsepower.max, 831.0);
    assert_eq!(form.cylinders.options, CYLINDERS);
    assert_eq!(form.cylinders.default, "I6");
    assert_eq!(form.make.default, "Ford");

    let vocabulary = predictor.artifact().vocabulary(Field::Make).unwrap();
    for make in MAKES {
        assert!(form.make.options.iter().any(|o| o == make));
        assert!(vocabulary.position(make).is_some());
    }

    assert!(predictor.predict(&form.default_record()).is_ok());
}

#[test]
fn test_metadata_extra_keys() {
    let predictor = load();
    assert_eq!(predictor.metadata().extra["model_name"], "Ridge");
    assert!(predictor.details().contains("- One-Hot Encoding"));
}

#[test]
fn test_shared_across_threads() {
    let predictor = Arc::new(load());
    let record = FeatureRecord::new(345.0, "I6", "Ford");
    let expected = predictor.predict(&record).unwrap().price_estimate.to_bits();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let predictor = Arc::clone(&predictor);
            let record = record.clone();
            thread::spawn(move || predictor.predict(&record).unwrap().price_estimate.to_bits())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn test_missing_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let err = PricePredictor::new(&Config::with_model_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ArtifactError::Missing { .. }));
}

#[test]
fn test_corrupt_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("best_pipeline.json"), "\u{80}\u{1}pickle").unwrap();
    let err = PricePredictor::new(&Config::with_model_dir(dir.path())).unwrap_err();
    assert!(matches!(err, ArtifactError::Malformed { .. }));
}

#[test]
fn test_shape_mismatch_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let text = fs::read_to_string(fixture_dir().join("best_pipeline.json")).unwrap();
    let mut value: serde_json::Value = serde_json::from_str(&text).unwrap();
    value["regressor"]["coefficients"]
        .as_array_mut()
        .unwrap()
        .pop();
    fs::write(dir.path().join("best_pipeline.json"), value.to_string()).unwrap();

    let err = PricePredictor::new(&Config::with_model_dir(dir.path())).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::ShapeMismatch {
            weights: 16,
            width: 17
        }
    ));
}

#[test]
fn test_missing_metadata_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    fs::copy(
        fixture_dir().join("best_pipeline.json"),
        dir.path().join("best_pipeline.json"),
    )
    .unwrap();

    let predictor = PricePredictor::new(&Config::with_model_dir(dir.path())).unwrap();
    assert_eq!(predictor.form().horsepower.default, 345.0);
    assert!(predictor
        .predict(&FeatureRecord::new(345.0, "I6", "Ford"))
        .is_ok());
}
