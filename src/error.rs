//! Error types for prediction and ranking

use thiserror::Error;

/// Errors raised while turning features into predictions or rankings.
///
/// None of these are recovered locally; they surface to whoever invoked the
/// prediction.
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The estimator itself failed, typically because the input shape or
    /// dtype does not match what the model was trained on.
    #[error("estimator `{model}` failed: {source}")]
    Estimator {
        model: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("estimator `{model}` returned no output values")]
    EmptyOutput { model: String },

    #[error("feature names and scores differ in length ({names} names, {scores} scores)")]
    LengthMismatch { names: usize, scores: usize },

    #[error("feature vector has {found} values, expected {expected}")]
    ShapeMismatch { expected: usize, found: usize },

    #[error("feature schema mismatch at position {position}: expected `{expected}`, found `{found}`")]
    SchemaMismatch {
        position: usize,
        expected: String,
        found: String,
    },
}
