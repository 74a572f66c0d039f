//! Estimator abstraction shared by ONNX models and fixed-output stand-ins

use crate::feature_extractor::FeatureVector;
use anyhow::Result;

/// A pre-trained regression model.
///
/// Estimators are read-only once loaded, so a single instance can serve any
/// number of predictions.
pub trait Estimator: Send + Sync {
    /// Model name used in logs and errors
    fn name(&self) -> &str;

    /// Predict for a single row. Regressors return one value.
    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>>;

    /// Per-feature importance scores in training column order
    fn feature_importances(&self) -> &[f64];
}

/// Estimator that always returns the same outputs.
#[derive(Debug, Clone)]
pub struct StaticEstimator {
    name: String,
    outputs: Vec<f64>,
    importances: Vec<f64>,
}

impl StaticEstimator {
    pub fn new(name: &str, outputs: Vec<f64>) -> Self {
        Self {
            name: name.to_string(),
            outputs,
            importances: Vec::new(),
        }
    }

    pub fn with_importances(mut self, importances: Vec<f64>) -> Self {
        self.importances = importances;
        self
    }
}

impl Estimator for StaticEstimator {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, _features: &FeatureVector) -> Result<Vec<f64>> {
        Ok(self.outputs.clone())
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}
