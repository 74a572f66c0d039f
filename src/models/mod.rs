//! ML model inference components

pub mod aggregator;
pub mod estimator;
pub mod importance;
pub mod inference;
pub mod loader;
pub mod registry;

pub use aggregator::PredictionAggregator;
pub use estimator::{Estimator, StaticEstimator};
pub use importance::{rank, ImportanceEntry, ImportanceRanking};
pub use inference::{InferenceEngine, ModelImportance, PredictionResult};
pub use loader::ModelLoader;
