use crate::error::{ValidationError, ValidationResult};
use serde::Serialize;
use std::fmt;

/// Lowest grade an evaluation (or a final grade) can take
pub const MIN_GRADE: f64 = 0.0;

/// Highest grade an evaluation (or a final grade) can take
pub const MAX_GRADE: f64 = 20.0;

const MIN_WEIGHT: f64 = 0.0;
const MAX_WEIGHT: f64 = 1.0;

/// A single graded item and its share of the final grade
///
/// Fields are private: the only way to obtain an `Evaluation` is through
/// [`Evaluation::new`], so every instance satisfies `0 <= grade <= 20`,
/// `0 < weight <= 1` and has a non-blank name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    name: String,
    grade: f64,
    weight: f64,
}

impl Evaluation {
    /// Create a validated evaluation
    ///
    /// # Examples
    ///
    /// ```
    /// use gradecalc_core::Evaluation;
    ///
    /// let parcial = Evaluation::new("Parcial", 15.0, 0.4).unwrap();
    /// assert_eq!(parcial.weighted_grade(), 6.0);
    ///
    /// assert!(Evaluation::new("Final", 21.0, 0.6).is_err());
    /// assert!(Evaluation::new("Final", 18.0, 0.0).is_err());
    /// assert!(Evaluation::new("   ", 18.0, 0.6).is_err());
    /// ```
    pub fn new(name: impl Into<String>, grade: f64, weight: f64) -> ValidationResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        validate_grade(grade)?;
        validate_weight(weight)?;

        Ok(Self {
            name,
            grade,
            weight,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grade(&self) -> f64 {
        self.grade
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Contribution of this evaluation to the weighted average (`grade × weight`)
    pub fn weighted_grade(&self) -> f64 {
        self.grade * self.weight
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} (peso: {:.0}%)",
            self.name,
            self.grade,
            self.weight * 100.0
        )
    }
}

fn validate_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::InvalidName);
    }
    Ok(())
}

// Range checks are written so that NaN fails them.
fn validate_grade(grade: f64) -> ValidationResult<()> {
    if !(MIN_GRADE..=MAX_GRADE).contains(&grade) {
        return Err(ValidationError::InvalidGrade {
            min: MIN_GRADE,
            max: MAX_GRADE,
            value: grade,
        });
    }
    Ok(())
}

fn validate_weight(weight: f64) -> ValidationResult<()> {
    if !(weight > MIN_WEIGHT && weight <= MAX_WEIGHT) {
        return Err(ValidationError::InvalidWeight {
            min: MIN_WEIGHT,
            max: MAX_WEIGHT,
            value: weight,
        });
    }
    Ok(())
}
