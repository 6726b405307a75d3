use crate::error::{KioskError, Result};
use std::fmt;

/// Letter grade for an average percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Grade {
    F,
    D,
    C,
    B,
    A,
    APlus,
}

impl Grade {
    /// Maps a percentage onto the fixed grade bands.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Grade::APlus
        } else if percentage >= 80.0 {
            Grade::A
        } else if percentage >= 70.0 {
            Grade::B
        } else if percentage >= 60.0 {
            Grade::C
        } else if percentage >= 50.0 {
            Grade::D
        } else {
            Grade::F
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A subject mark, bounded to `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Mark(f64);

impl Mark {
    pub const MAX: f64 = 100.0;

    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(KioskError::ValidationError(
                "Marks must be between 0 and 100".to_string(),
            ))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradeReport {
    pub subjects: usize,
    pub total: f64,
    pub average: f64,
    pub grade: Grade,
}

impl GradeReport {
    /// Total achievable marks across all subjects.
    pub fn max_total(&self) -> usize {
        self.subjects * 100
    }
}

/// Averages the marks and grades the result. At least one mark is required.
pub fn calculate(marks: &[Mark]) -> Result<GradeReport> {
    if marks.is_empty() {
        return Err(KioskError::ValidationError(
            "Number of subjects must be positive".to_string(),
        ));
    }
    let total: f64 = marks.iter().map(Mark::value).sum();
    let average = total / marks.len() as f64;
    Ok(GradeReport {
        subjects: marks.len(),
        total,
        average,
        grade: Grade::from_percentage(average),
    })
}
