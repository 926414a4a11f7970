use crate::config::GradingConfig;
use crate::error::{CalculationError, CalculationResult};
use crate::evaluation::{Evaluation, MAX_GRADE, MIN_GRADE};
use crate::policy::{AttendancePolicy, ExtraPointsPolicy};
use crate::result::{GradeResult, GradeResultParts};
use crate::student::Student;

/// Allowed distance between the sum of weights and 1.0
pub const WEIGHT_TOLERANCE: f64 = 0.001;

const EXPECTED_TOTAL_WEIGHT: f64 = 1.0;

const NO_ATTENDANCE_EXTRA_POINTS_DETAIL: &str = "No aplica (penalizado por asistencia)";
const NO_POLICY_EXTRA_POINTS_DETAIL: &str = "No configurada política de puntos extra";
const NO_YEAR_EXTRA_POINTS_DETAIL: &str = "Sin puntos extra (año académico no especificado)";

/// Final-grade calculator
///
/// Computes the weighted average of a student's evaluations, applies the
/// attendance gate and then the extra-points policy. A calculator holds no
/// mutable state, so one instance can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct GradeCalculator {
    attendance_policy: AttendancePolicy,
    extra_points_policy: Option<ExtraPointsPolicy>,
}

impl GradeCalculator {
    /// Create a calculator from optional policies
    ///
    /// A missing attendance policy is replaced by the standard one. A missing
    /// extra-points policy means no bonus is ever applied.
    pub fn new(
        attendance_policy: Option<AttendancePolicy>,
        extra_points_policy: Option<ExtraPointsPolicy>,
    ) -> Self {
        Self {
            attendance_policy: attendance_policy.unwrap_or_default(),
            extra_points_policy,
        }
    }

    pub fn with_extra_points(extra_points_policy: ExtraPointsPolicy) -> Self {
        Self::new(None, Some(extra_points_policy))
    }

    pub fn from_config(config: &GradingConfig) -> Self {
        Self::with_extra_points(config.extra_points.to_policy())
    }

    pub fn attendance_policy(&self) -> &AttendancePolicy {
        &self.attendance_policy
    }

    pub fn extra_points_policy(&self) -> Option<&ExtraPointsPolicy> {
        self.extra_points_policy.as_ref()
    }

    /// Calculate the final grade of `student` for `academic_year`
    ///
    /// Deterministic: the same student data, year and policies always yield
    /// the same result.
    pub fn calculate_final_grade(
        &self,
        student: &Student,
        academic_year: i32,
    ) -> CalculationResult<GradeResult> {
        self.calculate(student, Some(academic_year))
    }

    /// Calculate the final grade with no academic year; no bonus can apply
    pub fn calculate_final_grade_without_year(
        &self,
        student: &Student,
    ) -> CalculationResult<GradeResult> {
        self.calculate(student, None)
    }

    fn calculate(
        &self,
        student: &Student,
        academic_year: Option<i32>,
    ) -> CalculationResult<GradeResult> {
        let evaluations = student.evaluations();
        if evaluations.is_empty() {
            return Err(CalculationError::NoEvaluations);
        }
        validate_weights(evaluations)?;

        let weighted_average = calculate_weighted_average(evaluations);
        let attendance_detail = self.attendance_policy.describe(student);

        if !self.attendance_policy.meets_minimum_attendance(student) {
            return Ok(GradeResult::new(GradeResultParts {
                student_code: student.code().to_string(),
                evaluations: evaluations.to_vec(),
                weighted_average,
                final_grade: self.attendance_policy.apply_policy(student, weighted_average),
                meets_attendance: false,
                penalized_by_attendance: true,
                attendance_detail,
                extra_points_applied: 0.0,
                extra_points_detail: NO_ATTENDANCE_EXTRA_POINTS_DETAIL.to_string(),
            }));
        }

        let (grade_with_extra, extra_points_detail) =
            self.apply_extra_points(weighted_average, academic_year);
        let final_grade = grade_with_extra.clamp(MIN_GRADE, MAX_GRADE);

        Ok(GradeResult::new(GradeResultParts {
            student_code: student.code().to_string(),
            evaluations: evaluations.to_vec(),
            weighted_average,
            final_grade,
            meets_attendance: true,
            penalized_by_attendance: false,
            attendance_detail,
            extra_points_applied: (final_grade - weighted_average).max(0.0),
            extra_points_detail,
        }))
    }

    fn apply_extra_points(&self, grade: f64, academic_year: Option<i32>) -> (f64, String) {
        match (&self.extra_points_policy, academic_year) {
            (None, _) => (grade, NO_POLICY_EXTRA_POINTS_DETAIL.to_string()),
            (Some(_), None) => (grade, NO_YEAR_EXTRA_POINTS_DETAIL.to_string()),
            (Some(policy), Some(year)) => {
                (policy.apply_extra_points(grade, year), policy.describe(year))
            }
        }
    }
}

/// Calculate a final grade in one call, granting the default bonus in `years_with_extra`
///
/// # Examples
///
/// ```
/// use gradecalc_core::{Evaluation, Student, calculate_grade};
///
/// let mut student = Student::new("STU001", true).unwrap();
/// student.add_evaluation(Evaluation::new("Parcial", 14.0, 0.5).unwrap()).unwrap();
/// student.add_evaluation(Evaluation::new("Final", 16.0, 0.5).unwrap()).unwrap();
///
/// let result = calculate_grade(&student, 2025, [2025]).unwrap();
/// assert_eq!(result.weighted_average(), 15.0);
/// assert_eq!(result.final_grade(), 17.0);
/// ```
pub fn calculate_grade(
    student: &Student,
    academic_year: i32,
    years_with_extra: impl IntoIterator<Item = i32>,
) -> CalculationResult<GradeResult> {
    GradeCalculator::with_extra_points(ExtraPointsPolicy::new(years_with_extra))
        .calculate_final_grade(student, academic_year)
}

fn validate_weights(evaluations: &[Evaluation]) -> CalculationResult<()> {
    let total_weight: f64 = evaluations.iter().map(Evaluation::weight).sum();

    if (total_weight - EXPECTED_TOTAL_WEIGHT).abs() > WEIGHT_TOLERANCE {
        return Err(CalculationError::WeightSumMismatch {
            actual: total_weight,
        });
    }
    Ok(())
}

fn calculate_weighted_average(evaluations: &[Evaluation]) -> f64 {
    evaluations.iter().map(Evaluation::weighted_grade).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn student_with(code: &str, has_attendance: bool, evals: &[(&str, f64, f64)]) -> Student {
        let mut student = Student::new(code, has_attendance).unwrap();
        for (name, grade, weight) in evals {
            student
                .add_evaluation(Evaluation::new(*name, *grade, *weight).unwrap())
                .unwrap();
        }
        student
    }

    fn calculator() -> GradeCalculator {
        GradeCalculator::new(
            Some(AttendancePolicy::new()),
            Some(ExtraPointsPolicy::new([2024, 2025])),
        )
    }

    #[test]
    fn test_weighted_average() {
        let student = student_with("STU001", true, &[("Parcial", 15.0, 0.4), ("Final", 18.0, 0.6)]);
        let result = calculator().calculate_final_grade(&student, 2023).unwrap();

        assert!((result.weighted_average() - 16.8).abs() < EPSILON);
        assert!((result.final_grade() - 16.8).abs() < EPSILON);
    }

    #[test]
    fn test_extra_points_applied_in_qualifying_year() {
        let student = student_with("STU002", true, &[("Parcial", 14.0, 0.5), ("Final", 16.0, 0.5)]);
        let result = calculator().calculate_final_grade(&student, 2024).unwrap();

        assert_eq!(result.final_grade(), 17.0);
        assert_eq!(result.extra_points_applied(), 2.0);
        assert_eq!(
            result.extra_points_detail(),
            "Puntos extra aplicados: +2.00 (año 2024)"
        );
    }

    #[test]
    fn test_extra_points_capped() {
        let student = student_with("STU003", true, &[("Unica", 19.0, 1.0)]);
        let result = calculator().calculate_final_grade(&student, 2025).unwrap();

        assert_eq!(result.final_grade(), 20.0);
        assert_eq!(result.extra_points_applied(), 1.0);
    }

    #[test]
    fn test_no_attendance_short_circuits() {
        let student = student_with("STU005", false, &[("Parcial", 18.0, 0.5), ("Final", 19.0, 0.5)]);
        let result = calculator().calculate_final_grade(&student, 2025).unwrap();

        assert_eq!(result.final_grade(), 0.0);
        assert_eq!(result.weighted_average(), 18.5);
        assert!(!result.meets_attendance());
        assert!(result.penalized_by_attendance());
        assert_eq!(result.extra_points_applied(), 0.0);
        assert_eq!(
            result.attendance_detail(),
            "No cumple asistencia mínima - Nota final: 0.00"
        );
        assert_eq!(
            result.extra_points_detail(),
            "No aplica (penalizado por asistencia)"
        );
    }

    #[test]
    fn test_no_extra_points_policy() {
        let student = student_with("STU006", true, &[("Parcial", 14.0, 0.5), ("Final", 16.0, 0.5)]);
        let result = GradeCalculator::default()
            .calculate_final_grade(&student, 2025)
            .unwrap();

        assert_eq!(result.final_grade(), 15.0);
        assert_eq!(result.extra_points_applied(), 0.0);
        assert_eq!(
            result.extra_points_detail(),
            "No configurada política de puntos extra"
        );
    }

    #[test]
    fn test_without_year_never_applies_bonus() {
        let student = student_with("STU020", true, &[("Parcial", 16.0, 0.5), ("Final", 18.0, 0.5)]);
        let calculator = GradeCalculator::with_extra_points(ExtraPointsPolicy::new([0, 2025]));
        let result = calculator.calculate_final_grade_without_year(&student).unwrap();

        assert_eq!(result.final_grade(), 17.0);
        assert_eq!(result.extra_points_applied(), 0.0);
        assert_eq!(
            result.extra_points_detail(),
            "Sin puntos extra (año académico no especificado)"
        );
    }

    #[test]
    fn test_no_evaluations_rejected() {
        let student = Student::new("STU007", true).unwrap();
        let err = calculator().calculate_final_grade(&student, 2025).unwrap_err();
        assert_eq!(err, CalculationError::NoEvaluations);
    }

    #[test]
    fn test_weight_sum_mismatch_rejected() {
        let student = student_with("STU008", true, &[("Parcial", 15.0, 0.3), ("Final", 17.0, 0.3)]);
        let err = calculator().calculate_final_grade(&student, 2025).unwrap_err();

        match err {
            CalculationError::WeightSumMismatch { actual } => {
                assert!((actual - 0.6).abs() < EPSILON);
            }
            other => panic!("Expected WeightSumMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_weight_validation_precedes_attendance_gate() {
        let student = student_with("STU009", false, &[("Parcial", 15.0, 0.3)]);
        assert!(matches!(
            calculator().calculate_final_grade(&student, 2025),
            Err(CalculationError::WeightSumMismatch { .. })
        ));
    }

    #[test]
    fn test_weight_tolerance_boundaries() {
        let thirds = student_with(
            "STU010",
            true,
            &[("PC1", 12.0, 0.333), ("PC2", 12.0, 0.333), ("PC3", 12.0, 0.334)],
        );
        assert!(calculator().calculate_final_grade(&thirds, 2023).is_ok());

        let within = student_with("STU011", true, &[("A", 12.0, 0.5), ("B", 12.0, 0.4995)]);
        assert!(calculator().calculate_final_grade(&within, 2023).is_ok());

        let outside = student_with("STU012", true, &[("A", 12.0, 0.5), ("B", 12.0, 0.498)]);
        assert!(calculator().calculate_final_grade(&outside, 2023).is_err());

        let over = student_with("STU013", true, &[("A", 12.0, 0.5), ("B", 12.0, 0.502)]);
        assert!(calculator().calculate_final_grade(&over, 2023).is_err());
    }

    #[test]
    fn test_final_grade_clamped_when_weights_exceed_one() {
        // 0.5 + 0.5005 is within tolerance but pushes the average past 20
        let student = student_with("STU014", true, &[("A", 20.0, 0.5), ("B", 20.0, 0.5005)]);
        let result = GradeCalculator::default()
            .calculate_final_grade(&student, 2023)
            .unwrap();

        assert!(result.weighted_average() > 20.0);
        assert_eq!(result.final_grade(), 20.0);
        assert_eq!(result.extra_points_applied(), 0.0);
    }

    #[test]
    fn test_calculator_does_not_mutate_student() {
        let student = student_with("STU015", true, &[("Parcial", 15.0, 0.4), ("Final", 17.0, 0.6)]);
        let before = student.clone();

        calculator().calculate_final_grade(&student, 2025).unwrap();
        assert_eq!(student, before);
    }

    #[test]
    fn test_result_carries_evaluations_in_order() {
        let student = student_with("STU016", true, &[("Parcial", 15.0, 0.4), ("Final", 17.0, 0.6)]);
        let result = calculator().calculate_final_grade(&student, 2023).unwrap();

        assert_eq!(result.student_code(), "STU016");
        assert_eq!(result.evaluations(), student.evaluations());
    }

    #[test]
    fn test_from_config() {
        let mut config = GradingConfig::default();
        config.extra_points.years = vec![2025];
        config.extra_points.bonus = 1.0;

        let calculator = GradeCalculator::from_config(&config);
        let student = student_with("STU017", true, &[("Unica", 15.0, 1.0)]);
        let result = calculator.calculate_final_grade(&student, 2025).unwrap();

        assert_eq!(result.final_grade(), 16.0);
        assert_eq!(
            calculator.extra_points_policy().map(|p| p.extra_points()),
            Some(1.0)
        );
    }

    #[test]
    fn test_calculate_grade_helper() {
        let student = student_with("STU018", true, &[("Unica", 12.0, 1.0)]);

        let result = calculate_grade(&student, 2024, vec![2024]).unwrap();
        assert_eq!(result.final_grade(), 14.0);

        let result = calculate_grade(&student, 2023, vec![2024]).unwrap();
        assert_eq!(result.final_grade(), 12.0);
    }
}
