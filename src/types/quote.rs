//! Cost quote data structures

use crate::models::inference::PredictionResult;
use crate::types::applicant::Applicant;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A priced quote handed to the display layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostQuote {
    /// Unique quote identifier
    pub quote_id: String,

    /// Attributes the quote was priced from
    pub applicant: Applicant,

    /// Random forest prediction
    pub random_forest: f64,

    /// Gradient-boosted trees prediction
    pub gradient_boosting: f64,

    /// Unweighted mean of both predictions
    pub average: f64,

    /// Quote generation timestamp
    pub timestamp: DateTime<Utc>,
}

impl CostQuote {
    /// Create a new quote from a prediction
    pub fn new(applicant: Applicant, prediction: &PredictionResult) -> Self {
        Self {
            quote_id: uuid::Uuid::new_v4().to_string(),
            applicant,
            random_forest: prediction.random_forest,
            gradient_boosting: prediction.gradient_boosting,
            average: prediction.average,
            timestamp: Utc::now(),
        }
    }

    /// The prediction this quote was built from
    pub fn prediction(&self) -> PredictionResult {
        PredictionResult {
            random_forest: self.random_forest,
            gradient_boosting: self.gradient_boosting,
            average: self.average,
        }
    }
}
