//! Feature-importance ranking

use crate::error::PredictionError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One feature and its importance score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceEntry {
    pub feature: String,
    pub score: f64,
}

/// Features ordered by importance, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImportanceRanking {
    entries: Vec<ImportanceEntry>,
}

impl ImportanceRanking {
    pub fn entries(&self) -> &[ImportanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImportanceEntry> {
        self.entries.iter()
    }

    /// The highest-ranked entry, if any
    pub fn top(&self) -> Option<&ImportanceEntry> {
        self.entries.first()
    }
}

impl IntoIterator for ImportanceRanking {
    type Item = ImportanceEntry;
    type IntoIter = std::vec::IntoIter<ImportanceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ImportanceRanking {
    type Item = &'a ImportanceEntry;
    type IntoIter = std::slice::Iter<'a, ImportanceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Pair `names[i]` with `scores[i]` and sort by score, descending.
///
/// The sort is stable: equal scores keep their input order, `0.0` and `-0.0`
/// included. NaN scores go last. Every pair is returned; nothing is truncated.
pub fn rank<S: AsRef<str>>(
    names: &[S],
    scores: &[f64],
) -> Result<ImportanceRanking, PredictionError> {
    if names.len() != scores.len() {
        return Err(PredictionError::LengthMismatch {
            names: names.len(),
            scores: scores.len(),
        });
    }

    let mut entries: Vec<ImportanceEntry> = names
        .iter()
        .zip(scores)
        .map(|(name, &score)| ImportanceEntry {
            feature: name.as_ref().to_string(),
            score,
        })
        .collect();

    entries.sort_by(|a, b| descending(a.score, b.score));

    Ok(ImportanceRanking { entries })
}

/// Highest first, NaN last; numerically equal scores compare equal.
fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => a_nan.cmp(&b_nan),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(ranking: &ImportanceRanking) -> Vec<(&str, f64)> {
        ranking
            .iter()
            .map(|e| (e.feature.as_str(), e.score))
            .collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranking = rank(&["Age", "BMI"], &[0.3, 0.7]).unwrap();
        assert_eq!(pairs(&ranking), vec![("BMI", 0.7), ("Age", 0.3)]);
        assert_eq!(ranking.top().map(|e| e.feature.as_str()), Some("BMI"));
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranking = rank(&["A", "B"], &[0.5, 0.5]).unwrap();
        assert_eq!(pairs(&ranking), vec![("A", 0.5), ("B", 0.5)]);

        let ranking = rank(&["C", "A", "D", "B"], &[0.1, 0.4, 0.1, 0.4]).unwrap();
        assert_eq!(
            pairs(&ranking),
            vec![("A", 0.4), ("B", 0.4), ("C", 0.1), ("D", 0.1)]
        );
    }

    #[test]
    fn test_signed_zeros_are_ties() {
        let ranking = rank(&["A", "B"], &[-0.0, 0.0]).unwrap();
        let names: Vec<&str> = ranking.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);

        let ranking = rank(&["A", "B", "C"], &[0.0, 0.3, -0.0]).unwrap();
        let names: Vec<&str> = ranking.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let ranking = rank(&["A", "B", "C"], &[0.2, f64::NAN, 0.5]).unwrap();
        let names: Vec<&str> = ranking.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
        assert!(ranking.entries()[2].score.is_nan());

        let ranking = rank(&["A", "B", "C", "D"], &[f64::NAN, -1.0, f64::NAN, 0.0]).unwrap();
        let names: Vec<&str> = ranking.iter().map(|e| e.feature.as_str()).collect();
        assert_eq!(names, vec!["D", "B", "A", "C"]);
    }

    #[test]
    fn test_rank_is_a_sorted_permutation() {
        let names = [
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
        let scores = [0.62, 0.01, 0.02, 0.01, 0.05, 0.09, 0.03, 0.04, 0.13];

        let ranking = rank(&names, &scores).unwrap();
        assert_eq!(ranking.len(), names.len());

        for window in ranking.entries().windows(2) {
            assert!(window[0].score >= window[1].score);
        }

        let mut original: Vec<(&str, f64)> = names.iter().copied().zip(scores).collect();
        let mut ranked = pairs(&ranking);
        original.sort_by(|a, b| a.0.cmp(b.0));
        ranked.sort_by(|a, b| a.0.cmp(b.0));
        assert_eq!(original, ranked);
    }

    #[test]
    fn test_length_mismatch_is_an_error() {
        let err = rank(&["Age", "BMI", "Diabetes"], &[0.3, 0.7]).unwrap_err();
        assert!(matches!(
            err,
            PredictionError::LengthMismatch {
                names: 3,
                scores: 2
            }
        ));

        assert!(rank(&["Age"], &[0.3, 0.7]).is_err());
    }

    #[test]
    fn test_empty_input() {
        let names: [&str; 0] = [];
        let ranking = rank(&names, &[]).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_ranking_serializes_as_list() {
        let ranking = rank(&["Age", "BMI"], &[0.3, 0.7]).unwrap();
        let json = serde_json::to_value(&ranking).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                {"feature": "BMI", "score": 0.7},
                {"feature": "Age", "score": 0.3}
            ])
        );
    }
}
