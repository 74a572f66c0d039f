//! Insurance Cost Predictor Library
//!
//! Prices an applicant's insurance cost from nine health and lifestyle
//! attributes with a random-forest and a gradient-boosted model, and ranks
//! each model's feature importances.

pub mod config;
pub mod error;
pub mod feature_extractor;
pub mod metrics;
pub mod models;
pub mod report;
pub mod types;

pub use config::AppConfig;
pub use error::PredictionError;
pub use feature_extractor::{FeatureExtractor, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
pub use models::inference::{InferenceEngine, PredictionResult};
pub use types::{applicant::Applicant, applicant::YesNo, quote::CostQuote};
