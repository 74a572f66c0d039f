//! ONNX model loader

use crate::config::{EstimatorConfig, ModelsConfig};
use crate::feature_extractor::verify_schema;
use crate::error::PredictionError;
use anyhow::{Context, Result};
use ort::session::{builder::GraphOptimizationLevel, Session};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use tracing::info;

/// Loaded ONNX regressor with metadata
pub struct OnnxEstimator {
    /// Model name
    pub name: String,
    /// ONNX Runtime session; running it needs exclusive access
    pub session: Mutex<Session>,
    /// Input name for the model
    pub input_name: String,
    /// Output name for predictions
    pub output_name: String,
    /// Exported feature importances, training column order
    pub importances: Vec<f64>,
}

/// Importance sidecar written next to each exported model
#[derive(Debug, Clone, Deserialize)]
pub struct ImportanceFile {
    pub feature_names: Vec<String>,
    pub importances: Vec<f64>,
}

impl ImportanceFile {
    /// Read and check a sidecar against the training schema
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read feature importances from {:?}", path))?;
        let file: ImportanceFile = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid feature importance file {:?}", path))?;

        file.validate()
            .with_context(|| format!("Feature importance file {:?} does not match the model schema", path))?;

        Ok(file)
    }

    fn validate(&self) -> Result<(), PredictionError> {
        verify_schema(self.feature_names.as_slice())?;

        if self.importances.len() != self.feature_names.len() {
            return Err(PredictionError::LengthMismatch {
                names: self.feature_names.len(),
                scores: self.importances.len(),
            });
        }

        Ok(())
    }
}

/// Loader for ONNX models
pub struct ModelLoader {
    /// Number of threads for ONNX inference
    onnx_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with specified number of threads
    pub fn with_threads(onnx_threads: usize) -> Result<Self> {
        ort::init().commit()?;
        info!(onnx_threads = onnx_threads, "ONNX Runtime initialized");
        Ok(Self { onnx_threads })
    }

    /// Load a single estimator: the ONNX graph plus its importance sidecar
    pub fn load_estimator(&self, models_dir: &Path, estimator: &EstimatorConfig) -> Result<OnnxEstimator> {
        let path = estimator.model_path(models_dir);

        info!(model = %estimator.name, path = %path.display(), threads = self.onnx_threads, "Loading ONNX model");

        let importances = ImportanceFile::load(estimator.importances_path(models_dir))?;

        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .with_intra_threads(self.onnx_threads)?
            .commit_from_file(&path)
            .with_context(|| format!("Failed to load model from {:?}", path))?;

        let input_name = session
            .inputs
            .first()
            .map(|i| i.name.clone())
            .unwrap_or_else(|| "float_input".to_string());

        let output_name = match &estimator.output_name {
            Some(name) => name.clone(),
            None => session
                .outputs
                .first()
                .map(|o| o.name.clone())
                .unwrap_or_else(|| "variable".to_string()),
        };

        info!(
            model = %estimator.name,
            input = %input_name,
            output = %output_name,
            "Model loaded successfully"
        );

        Ok(OnnxEstimator {
            name: estimator.name.clone(),
            session: Mutex::new(session),
            input_name,
            output_name,
            importances: importances.importances,
        })
    }

    /// Load the random forest and gradient-boosting estimators
    pub fn load_pair(&self, config: &ModelsConfig) -> Result<(OnnxEstimator, OnnxEstimator)> {
        let models_dir = Path::new(&config.models_dir);

        let random_forest = self.load_estimator(models_dir, &config.random_forest)?;
        let gradient_boosting = self.load_estimator(models_dir, &config.gradient_boosting)?;

        info!(
            models_dir = %models_dir.display(),
            random_forest = %random_forest.name,
            gradient_boosting = %gradient_boosting.name,
            "Loaded both estimators"
        );

        Ok((random_forest, gradient_boosting))
    }
}
