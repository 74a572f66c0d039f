//! Two-model inference engine for insurance cost prediction

use crate::config::AppConfig;
use crate::error::PredictionError;
use crate::feature_extractor::{FeatureExtractor, FeatureVector, FEATURE_NAMES};
use crate::models::aggregator::PredictionAggregator;
use crate::models::estimator::Estimator;
use crate::models::importance::{self, ImportanceRanking};
use crate::models::loader::{ModelLoader, OnnxEstimator};
use crate::types::applicant::Applicant;
use crate::types::quote::CostQuote;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Result of model inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    /// Random forest prediction
    pub random_forest: f64,
    /// Gradient-boosted trees prediction
    pub gradient_boosting: f64,
    /// Unweighted mean of the two
    pub average: f64,
}

impl PredictionResult {
    /// Convert the prediction into a quote for the given applicant
    pub fn to_quote(&self, applicant: &Applicant) -> CostQuote {
        CostQuote::new(applicant.clone(), self)
    }
}

/// Importance ranking of one model
#[derive(Debug, Clone, Serialize)]
pub struct ModelImportance {
    pub model: String,
    pub label: String,
    pub ranking: ImportanceRanking,
}

impl Estimator for OnnxEstimator {
    fn name(&self) -> &str {
        &self.name
    }

    fn predict(&self, features: &FeatureVector) -> Result<Vec<f64>> {
        use ort::value::Tensor;

        // Prepare input tensor - shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_f32_vec()))
            .context("Failed to create input tensor")?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| anyhow::anyhow!("Lock error: {}", e))?;

        let outputs = session.run(ort::inputs![&self.input_name => input_tensor])?;

        let output = outputs
            .get(&self.output_name)
            .with_context(|| format!("Model {} has no output named {}", self.name, self.output_name))?;

        let (_, data) = output
            .try_extract_tensor::<f32>()
            .with_context(|| format!("Output {} of {} is not a float tensor", self.output_name, self.name))?;

        let values: Vec<f64> = data.iter().map(|&v| v as f64).collect();
        debug!(model = %self.name, values = ?values, "Model inference complete");

        Ok(values)
    }

    fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

/// Inference engine holding the two loaded estimators
pub struct InferenceEngine {
    random_forest: Box<dyn Estimator>,
    gradient_boosting: Box<dyn Estimator>,
    random_forest_label: String,
    gradient_boosting_label: String,
    aggregator: PredictionAggregator,
    extractor: FeatureExtractor,
}

impl InferenceEngine {
    /// Create a new inference engine from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        let loader = ModelLoader::with_threads(config.models.onnx_threads)?;
        let (random_forest, gradient_boosting) = loader
            .load_pair(&config.models)
            .context("Failed to load estimators")?;

        let engine = Self::from_estimators(Box::new(random_forest), Box::new(gradient_boosting))
            .with_labels(
                &config.models.random_forest.label,
                &config.models.gradient_boosting.label,
            );

        info!(
            random_forest = %engine.random_forest.name(),
            gradient_boosting = %engine.gradient_boosting.name(),
            "Inference engine initialized"
        );

        Ok(engine)
    }

    /// Create an engine from already-loaded estimators
    pub fn from_estimators(
        random_forest: Box<dyn Estimator>,
        gradient_boosting: Box<dyn Estimator>,
    ) -> Self {
        Self {
            random_forest,
            gradient_boosting,
            random_forest_label: "Random Forest".to_string(),
            gradient_boosting_label: "XGBoost".to_string(),
            aggregator: PredictionAggregator::new(),
            extractor: FeatureExtractor::new(),
        }
    }

    /// Override the display labels of both models
    pub fn with_labels(mut self, random_forest: &str, gradient_boosting: &str) -> Self {
        self.random_forest_label = random_forest.to_string();
        self.gradient_boosting_label = gradient_boosting.to_string();
        self
    }

    pub fn random_forest_label(&self) -> &str {
        &self.random_forest_label
    }

    pub fn gradient_boosting_label(&self) -> &str {
        &self.gradient_boosting_label
    }

    /// Get loaded model names
    pub fn model_names(&self) -> [&str; 2] {
        [self.random_forest.name(), self.gradient_boosting.name()]
    }

    /// Run both models on a feature vector
    pub fn predict(&self, features: &FeatureVector) -> Result<PredictionResult, PredictionError> {
        self.aggregator.predict(
            features,
            self.random_forest.as_ref(),
            self.gradient_boosting.as_ref(),
        )
    }

    /// Extract features from an applicant and run both models
    pub fn predict_applicant(&self, applicant: &Applicant) -> Result<PredictionResult, PredictionError> {
        let features = self.extractor.extract(applicant);
        self.predict(&features)
    }

    /// Rank both models' feature importances, random forest first
    pub fn importance_rankings(&self) -> Result<Vec<ModelImportance>, PredictionError> {
        let models = [
            (self.random_forest.as_ref(), &self.random_forest_label),
            (self.gradient_boosting.as_ref(), &self.gradient_boosting_label),
        ];

        models
            .into_iter()
            .map(|(estimator, label)| -> Result<ModelImportance, PredictionError> {
                let ranking = importance::rank(&FEATURE_NAMES, estimator.feature_importances())?;
                Ok(ModelImportance {
                    model: estimator.name().to_string(),
                    label: label.clone(),
                    ranking,
                })
            })
            .collect()
    }
}
