use thiserror::Error;

/// Structural precondition violated while building an evaluation or a student
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("El nombre de la evaluación no puede ser nulo o vacío")]
    InvalidName,

    #[error("La nota debe estar entre {min:.1} y {max:.1}. Valor recibido: {value:.2}")]
    InvalidGrade { min: f64, max: f64, value: f64 },

    #[error("El peso debe estar entre {min:.1} (exclusivo) y {max:.1}. Valor recibido: {value:.2}")]
    InvalidWeight { min: f64, max: f64, value: f64 },

    #[error("El código del estudiante no puede ser nulo o vacío")]
    InvalidStudentCode,

    #[error("No se pueden agregar más de {max} evaluaciones")]
    TooManyEvaluations { max: usize },
}

/// The input combination handed to the calculator cannot be graded
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error("El estudiante debe tener al menos una evaluación")]
    NoEvaluations,

    #[error("La suma de pesos debe ser 1.0 (100%). Suma actual: {actual:.2}")]
    WeightSumMismatch { actual: f64 },
}

pub type ValidationResult<T> = Result<T, ValidationError>;
pub type CalculationResult<T> = Result<T, CalculationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_grade_message_names_bounds_and_value() {
        let err = ValidationError::InvalidGrade {
            min: 0.0,
            max: 20.0,
            value: 25.0,
        };
        assert_eq!(
            err.to_string(),
            "La nota debe estar entre 0.0 y 20.0. Valor recibido: 25.00"
        );
    }

    #[test]
    fn test_invalid_weight_message_marks_exclusive_lower_bound() {
        let err = ValidationError::InvalidWeight {
            min: 0.0,
            max: 1.0,
            value: 0.0,
        };
        assert!(err.to_string().contains("(exclusivo)"));
        assert!(err.to_string().contains("0.00"));
    }

    #[test]
    fn test_weight_sum_mismatch_carries_actual_sum() {
        let err = CalculationError::WeightSumMismatch { actual: 0.6 };
        assert_eq!(
            err.to_string(),
            "La suma de pesos debe ser 1.0 (100%). Suma actual: 0.60"
        );
    }

    #[test]
    fn test_too_many_evaluations_message() {
        let err = ValidationError::TooManyEvaluations { max: 10 };
        assert_eq!(err.to_string(), "No se pueden agregar más de 10 evaluaciones");
    }
}
