//! Grading scale and score aggregation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lowest accepted score.
pub const GRADE_MIN: f64 = 0.0;
/// Highest accepted score.
pub const GRADE_MAX: f64 = 20.0;

/// Letter band derived from a mean score on the 0-20 scale.
///
/// Band boundaries are inclusive at the lower edge: 17 is an A, 13 a B,
/// 10 a C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
}

impl LetterGrade {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= 17.0 {
            LetterGrade::A
        } else if score >= 13.0 {
            LetterGrade::B
        } else if score >= 10.0 {
            LetterGrade::C
        } else {
            LetterGrade::D
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::B => "B",
            LetterGrade::C => "C",
            LetterGrade::D => "D",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arithmetic mean of all recorded grades, 0 when none are recorded.
#[must_use]
pub fn mean_grade(grades: &BTreeMap<String, f64>) -> f64 {
    if grades.is_empty() {
        return 0.0;
    }
    grades.values().sum::<f64>() / grades.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{LetterGrade, mean_grade};

    #[test]
    fn letter_bands_match_scale() {
        assert_eq!(LetterGrade::from_score(18.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(15.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(11.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(5.0), LetterGrade::D);
    }

    #[test]
    fn band_boundaries_are_inclusive_lower() {
        assert_eq!(LetterGrade::from_score(20.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(17.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_score(16.99), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(13.0), LetterGrade::B);
        assert_eq!(LetterGrade::from_score(12.99), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(10.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_score(9.99), LetterGrade::D);
        assert_eq!(LetterGrade::from_score(0.0), LetterGrade::D);
    }

    #[test]
    fn mean_grade_guards_divide_by_zero() {
        let empty = std::collections::BTreeMap::new();
        assert_eq!(mean_grade(&empty), 0.0);

        let mut grades = std::collections::BTreeMap::new();
        grades.insert("prof101".to_string(), 18.0);
        grades.insert("prof102".to_string(), 14.0);
        assert!((mean_grade(&grades) - 16.0).abs() < f64::EPSILON);
    }
}
