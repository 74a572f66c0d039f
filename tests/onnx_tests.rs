// Integration tests running real ONNX Runtime sessions.
//
// The fixtures in tests/fixtures are single-MatMul regressors over the nine
// features, so their outputs can be checked by hand:
//   linear_rf: 100*Age + 2000*Diabetes + 500*BP + 250*Allergies + 1500*Chronic
//              + 3000*Transplants + 750*Cancer + 400*Surgeries + 50*BMI
//   linear_gb: same, except 200*Age, 1000*Diabetes and 40*BMI

use insurance_cost_predictor::config::{AppConfig, EstimatorConfig};
use insurance_cost_predictor::models::{Estimator, ModelLoader};
use insurance_cost_predictor::{Applicant, FeatureExtractor, InferenceEngine, YesNo};
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn estimator_config(name: &str, label: &str, stem: &str) -> EstimatorConfig {
    EstimatorConfig {
        name: name.to_string(),
        label: label.to_string(),
        file: format!("{}.onnx", stem),
        importances_file: format!("{}.importances.json", stem),
        output_name: None,
    }
}

fn fixture_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.models.models_dir = fixtures_dir().to_string_lossy().into_owned();
    config.models.random_forest = estimator_config("random_forest", "Random Forest", "linear_rf");
    config.models.gradient_boosting = estimator_config("xgboost", "XGBoost", "linear_gb");
    config
}

#[test]
fn test_load_and_run_single_estimator() {
    let loader = ModelLoader::with_threads(1).unwrap();
    let estimator = loader
        .load_estimator(
            &fixtures_dir(),
            &estimator_config("random_forest", "Random Forest", "linear_rf"),
        )
        .unwrap();

    assert_eq!(estimator.input_name, "float_input");
    assert_eq!(estimator.output_name, "variable");
    assert_eq!(estimator.feature_importances().len(), 9);

    let features = FeatureExtractor::new().extract(&Applicant::default());
    let output = estimator.predict(&features).unwrap();
    assert_eq!(output, vec![4250.0]);

    // Session is reusable after a run
    let output = estimator.predict(&features).unwrap();
    assert_eq!(output, vec![4250.0]);
}

#[test]
fn test_engine_prices_applicant_with_onnx_models() {
    let engine = InferenceEngine::new(&fixture_config()).unwrap();
    assert_eq!(engine.model_names(), ["random_forest", "xgboost"]);

    let result = engine.predict_applicant(&Applicant::default()).unwrap();
    assert_eq!(result.random_forest, 4250.0);
    assert_eq!(result.gradient_boosting, 7000.0);
    assert_eq!(result.average, 5625.0);

    let mut applicant = Applicant::new(40, 30.0);
    applicant.diabetes = YesNo::Yes;
    applicant.number_of_major_surgeries = 2;

    let result = engine.predict_applicant(&applicant).unwrap();
    assert_eq!(result.random_forest, 8300.0);
    assert_eq!(result.gradient_boosting, 11000.0);
    assert_eq!(result.average, 9650.0);
}

#[test]
fn test_engine_ranks_sidecar_importances() {
    let engine = InferenceEngine::new(&fixture_config()).unwrap();
    let rankings = engine.importance_rankings().unwrap();

    let rf: Vec<&str> = rankings[0]
        .ranking
        .iter()
        .take(3)
        .map(|e| e.feature.as_str())
        .collect();
    assert_eq!(rf, vec!["AnyTransplants", "Diabetes", "AnyChronicDiseases"]);

    let gb = &rankings[1].ranking;
    assert_eq!(gb.top().unwrap().feature, "AnyTransplants");
    assert_eq!(gb.entries()[8].feature, "BMI");
}

#[test]
fn test_missing_model_file_fails_to_load() {
    let mut config = fixture_config();
    config.models.gradient_boosting.file = "absent.onnx".to_string();

    assert!(InferenceEngine::new(&config).is_err());
}
