//! Prediction aggregation for the two-model ensemble

use crate::error::PredictionError;
use crate::feature_extractor::FeatureVector;
use crate::models::estimator::Estimator;
use crate::models::inference::PredictionResult;
use tracing::debug;

/// Runs both estimators on one feature vector and averages their outputs.
#[derive(Debug, Default, Clone, Copy)]
pub struct PredictionAggregator;

impl PredictionAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Predict with both estimators and combine the results.
    ///
    /// Estimator failures are returned as-is; there is no fallback score.
    pub fn predict(
        &self,
        features: &FeatureVector,
        random_forest: &dyn Estimator,
        gradient_boosting: &dyn Estimator,
    ) -> Result<PredictionResult, PredictionError> {
        let rf = Self::first_output(random_forest, features)?;
        let gb = Self::first_output(gradient_boosting, features)?;
        let average = Self::mean(rf, gb);

        debug!(
            random_forest = rf,
            gradient_boosting = gb,
            average = average,
            "Ensemble prediction complete"
        );

        Ok(PredictionResult {
            random_forest: rf,
            gradient_boosting: gb,
            average,
        })
    }

    /// Unweighted mean of two predictions
    pub fn mean(a: f64, b: f64) -> f64 {
        (a + b) / 2.0
    }

    /// Run one estimator and take its single output value
    fn first_output(
        estimator: &dyn Estimator,
        features: &FeatureVector,
    ) -> Result<f64, PredictionError> {
        let outputs = estimator
            .predict(features)
            .map_err(|source| PredictionError::Estimator {
                model: estimator.name().to_string(),
                source,
            })?;

        outputs
            .first()
            .copied()
            .ok_or_else(|| PredictionError::EmptyOutput {
                model: estimator.name().to_string(),
            })
    }
}
