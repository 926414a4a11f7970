use crate::error::{ValidationError, ValidationResult};
use crate::evaluation::Evaluation;
use serde::Serialize;
use std::fmt;

/// Maximum number of evaluations a student may hold
pub const MAX_EVALUATIONS: usize = 10;

/// A student, their attendance status and their evaluations
///
/// Evaluations are kept in insertion order, which is the order they appear
/// in the detailed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    code: String,
    has_minimum_attendance: bool,
    evaluations: Vec<Evaluation>,
}

impl Student {
    /// Create a student with no evaluations
    pub fn new(code: impl Into<String>, has_minimum_attendance: bool) -> ValidationResult<Self> {
        let code = code.into();
        if code.trim().is_empty() {
            return Err(ValidationError::InvalidStudentCode);
        }

        Ok(Self {
            code,
            has_minimum_attendance,
            evaluations: Vec::new(),
        })
    }

    /// Append one evaluation, failing once the student already holds [`MAX_EVALUATIONS`]
    pub fn add_evaluation(&mut self, evaluation: Evaluation) -> ValidationResult<()> {
        if self.evaluations.len() >= MAX_EVALUATIONS {
            return Err(ValidationError::TooManyEvaluations {
                max: MAX_EVALUATIONS,
            });
        }
        self.evaluations.push(evaluation);
        Ok(())
    }

    /// Append a batch of evaluations
    ///
    /// All-or-nothing: if the batch would push the student past
    /// [`MAX_EVALUATIONS`], nothing is appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use gradecalc_core::{Evaluation, Student};
    ///
    /// let mut student = Student::new("STU001", true).unwrap();
    /// let batch: Vec<Evaluation> = (0..11)
    ///     .map(|i| Evaluation::new(format!("PC{}", i), 10.0, 0.09).unwrap())
    ///     .collect();
    ///
    /// assert!(student.add_evaluations(batch).is_err());
    /// assert_eq!(student.evaluation_count(), 0);
    /// ```
    pub fn add_evaluations(&mut self, evaluations: Vec<Evaluation>) -> ValidationResult<()> {
        if self.evaluations.len() + evaluations.len() > MAX_EVALUATIONS {
            return Err(ValidationError::TooManyEvaluations {
                max: MAX_EVALUATIONS,
            });
        }
        self.evaluations.extend(evaluations);
        Ok(())
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn has_minimum_attendance(&self) -> bool {
        self.has_minimum_attendance
    }

    /// Read-only view of the evaluations, in insertion order
    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    pub fn evaluation_count(&self) -> usize {
        self.evaluations.len()
    }

    pub fn max_evaluations() -> usize {
        MAX_EVALUATIONS
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Estudiante[código={}, evaluaciones={}, asistencia={}]",
            self.code,
            self.evaluations.len(),
            if self.has_minimum_attendance { "Sí" } else { "No" }
        )
    }
}
