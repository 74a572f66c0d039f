//! Plain-text rendering of predictions and importance rankings

use crate::models::inference::{ModelImportance, PredictionResult};
use std::fmt::Write;

/// Render a prediction the way the entry form reports it:
///
/// ```text
/// Random Forest Prediction: 5000.00
/// XGBoost Prediction: 7000.00
/// Average Predicted Insurance Cost: 6000.00
/// ```
pub fn render_prediction(
    result: &PredictionResult,
    random_forest_label: &str,
    gradient_boosting_label: &str,
    decimals: usize,
) -> String {
    format!(
        "{} Prediction: {:.*}\n{} Prediction: {:.*}\nAverage Predicted Insurance Cost: {:.*}\n",
        random_forest_label,
        decimals,
        result.random_forest,
        gradient_boosting_label,
        decimals,
        result.gradient_boosting,
        decimals,
        result.average,
    )
}

/// Render one model's ranking as an aligned two-column table.
pub fn render_importance(importance: &ModelImportance) -> String {
    let width = importance
        .ranking
        .iter()
        .map(|e| e.feature.len())
        .max()
        .unwrap_or(0);

    let mut out = format!("{} Feature Importance\n", importance.label);
    for entry in &importance.ranking {
        // Writing to a String cannot fail
        let _ = writeln!(out, "  {:<width$}  {:.4}", entry.feature, entry.score, width = width);
    }
    out
}
