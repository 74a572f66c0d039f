//! Feature extraction for insurance cost model inference.
//!
//! The models were trained on nine columns in a fixed order. This module owns
//! that order and is the only place applicant attributes become numbers.

use crate::error::PredictionError;
use crate::types::applicant::Applicant;

/// Number of features the models expect
pub const FEATURE_COUNT: usize = 9;

/// Feature names in training column order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Age",
    "Diabetes",
    "BloodPressureProblems",
    "KnownAllergies",
    "AnyChronicDiseases",
    "AnyTransplants",
    "HistoryOfCancerInFamily",
    "NumberOfMajorSurgeries",
    "BMI",
];

/// Fixed-order numeric encoding of one applicant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    /// Build a vector from an arbitrary slice, rejecting any other length.
    pub fn from_slice(values: &[f64]) -> Result<Self, PredictionError> {
        let values: [f64; FEATURE_COUNT] =
            values
                .try_into()
                .map_err(|_| PredictionError::ShapeMismatch {
                    expected: FEATURE_COUNT,
                    found: values.len(),
                })?;
        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Single-precision copy for ONNX input tensors
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.0.iter().map(|&v| v as f32).collect()
    }

    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Check that `names` lists exactly the training columns, in training order.
pub fn verify_schema<S: AsRef<str>>(names: &[S]) -> Result<(), PredictionError> {
    if names.len() != FEATURE_COUNT {
        return Err(PredictionError::ShapeMismatch {
            expected: FEATURE_COUNT,
            found: names.len(),
        });
    }

    for (position, (found, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if found.as_ref() != expected {
            return Err(PredictionError::SchemaMismatch {
                position,
                expected: expected.to_string(),
                found: found.as_ref().to_string(),
            });
        }
    }

    Ok(())
}

/// Feature extractor that transforms applicants into model input features.
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        Self
    }

    /// Extract features from an applicant in training column order.
    pub fn extract(&self, applicant: &Applicant) -> FeatureVector {
        FeatureVector([
            applicant.age as f64,
            applicant.diabetes.as_feature(),
            applicant.blood_pressure_problems.as_feature(),
            applicant.known_allergies.as_feature(),
            applicant.any_chronic_diseases.as_feature(),
            applicant.any_transplants.as_feature(),
            applicant.history_of_cancer_in_family.as_feature(),
            applicant.number_of_major_surgeries as f64,
            applicant.bmi,
        ])
    }

    /// Get the number of features produced.
    pub fn feature_count(&self) -> usize {
        FEATURE_COUNT
    }

    /// Get feature names (training column order).
    pub fn feature_names(&self) -> &'static [&'static str] {
        &FEATURE_NAMES
    }
}

impl Default for FeatureExtractor {
    fn default() -> Self {
        Self::new()
    }
}
