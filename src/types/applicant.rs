//! Applicant data structures for insurance cost prediction

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use validator::Validate;

/// A yes/no answer to one of the health questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YesNo {
    #[default]
    No,
    Yes,
}

impl YesNo {
    /// Numeric encoding used by the models (No = 0, Yes = 1)
    pub fn as_feature(self) -> f64 {
        match self {
            YesNo::No => 0.0,
            YesNo::Yes => 1.0,
        }
    }

    pub fn is_yes(self) -> bool {
        self == YesNo::Yes
    }
}

impl From<bool> for YesNo {
    fn from(value: bool) -> Self {
        if value {
            YesNo::Yes
        } else {
            YesNo::No
        }
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YesNo::No => f.write_str("No"),
            YesNo::Yes => f.write_str("Yes"),
        }
    }
}

impl Serialize for YesNo {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for YesNo {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Accept "Yes"/"No" in any case, booleans, and the 0/1 encoding
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(u8),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(b) => Ok(YesNo::from(b)),
            Raw::Int(0) => Ok(YesNo::No),
            Raw::Int(1) => Ok(YesNo::Yes),
            Raw::Int(n) => Err(serde::de::Error::custom(format!(
                "expected 0 or 1 for a yes/no answer, got {}",
                n
            ))),
            Raw::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" => Ok(YesNo::Yes),
                "no" | "n" => Ok(YesNo::No),
                other => Err(serde::de::Error::custom(format!(
                    "expected \"Yes\" or \"No\", got {:?}",
                    other
                ))),
            },
        }
    }
}

/// Health and lifestyle attributes of an insurance applicant.
///
/// Bounds mirror the entry form: they are checked by [`Validate`] at the
/// input boundary, not by the prediction code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Applicant {
    /// Age in years
    #[serde(alias = "Age")]
    #[validate(range(min = 18, max = 100))]
    pub age: u32,

    #[serde(default, alias = "Diabetes")]
    pub diabetes: YesNo,

    #[serde(default, alias = "BloodPressureProblems")]
    pub blood_pressure_problems: YesNo,

    #[serde(default, alias = "KnownAllergies")]
    pub known_allergies: YesNo,

    #[serde(default, alias = "AnyChronicDiseases")]
    pub any_chronic_diseases: YesNo,

    #[serde(default, alias = "AnyTransplants")]
    pub any_transplants: YesNo,

    #[serde(default, alias = "HistoryOfCancerInFamily")]
    pub history_of_cancer_in_family: YesNo,

    /// Number of major surgeries undergone
    #[serde(default, alias = "NumberOfMajorSurgeries")]
    #[validate(range(max = 20))]
    pub number_of_major_surgeries: u32,

    /// Body mass index
    #[serde(alias = "BMI")]
    #[validate(range(min = 10.0, max = 60.0))]
    pub bmi: f64,
}

impl Applicant {
    /// Create an applicant with every health flag set to "No" and no surgeries
    pub fn new(age: u32, bmi: f64) -> Self {
        Self {
            age,
            diabetes: YesNo::No,
            blood_pressure_problems: YesNo::No,
            known_allergies: YesNo::No,
            any_chronic_diseases: YesNo::No,
            any_transplants: YesNo::No,
            history_of_cancer_in_family: YesNo::No,
            number_of_major_surgeries: 0,
            bmi,
        }
    }
}

impl Default for Applicant {
    /// Same starting values as the entry form
    fn default() -> Self {
        Self::new(30, 25.0)
    }
}
