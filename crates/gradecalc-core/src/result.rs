use crate::evaluation::Evaluation;
use serde::Serialize;
use std::fmt;

const DOUBLE_RULE: &str = "═══════════════════════════════════════════";
const SINGLE_RULE: &str = "───────────────────────────────────────────";

/// Every field of a [`GradeResult`], supplied at once
#[derive(Debug, Clone)]
pub(crate) struct GradeResultParts {
    pub student_code: String,
    pub evaluations: Vec<Evaluation>,
    pub weighted_average: f64,
    pub final_grade: f64,
    pub meets_attendance: bool,
    pub penalized_by_attendance: bool,
    pub attendance_detail: String,
    pub extra_points_applied: f64,
    pub extra_points_detail: String,
}

/// Outcome of a final-grade calculation, with every intermediate quantity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeResult {
    student_code: String,
    evaluations: Vec<Evaluation>,
    weighted_average: f64,
    final_grade: f64,
    meets_attendance: bool,
    penalized_by_attendance: bool,
    attendance_detail: String,
    extra_points_applied: f64,
    extra_points_detail: String,
}

impl GradeResult {
    pub(crate) fn new(parts: GradeResultParts) -> Self {
        Self {
            student_code: parts.student_code,
            evaluations: parts.evaluations,
            weighted_average: parts.weighted_average,
            final_grade: parts.final_grade,
            meets_attendance: parts.meets_attendance,
            penalized_by_attendance: parts.penalized_by_attendance,
            attendance_detail: parts.attendance_detail,
            extra_points_applied: parts.extra_points_applied,
            extra_points_detail: parts.extra_points_detail,
        }
    }

    pub fn student_code(&self) -> &str {
        &self.student_code
    }

    pub fn evaluations(&self) -> &[Evaluation] {
        &self.evaluations
    }

    /// Grade before any policy was applied
    pub fn weighted_average(&self) -> f64 {
        self.weighted_average
    }

    pub fn final_grade(&self) -> f64 {
        self.final_grade
    }

    pub fn meets_attendance(&self) -> bool {
        self.meets_attendance
    }

    pub fn penalized_by_attendance(&self) -> bool {
        self.penalized_by_attendance
    }

    pub fn attendance_detail(&self) -> &str {
        &self.attendance_detail
    }

    /// Points actually added on top of the weighted average (after the cap)
    pub fn extra_points_applied(&self) -> f64 {
        self.extra_points_applied
    }

    pub fn extra_points_detail(&self) -> &str {
        &self.extra_points_detail
    }

    /// Render the calculation breakdown shown to instructors
    pub fn detailed_report(&self) -> String {
        let mut lines = vec![
            DOUBLE_RULE.to_string(),
            "       DETALLE DE CÁLCULO DE NOTA FINAL    ".to_string(),
            DOUBLE_RULE.to_string(),
            format!("Estudiante: {}", self.student_code),
            SINGLE_RULE.to_string(),
            "EVALUACIONES:".to_string(),
        ];

        lines.extend(self.evaluations.iter().map(|eval| {
            format!(
                "  • {}: {:.2} × {:.0}% = {:.2}",
                eval.name(),
                eval.grade(),
                eval.weight() * 100.0,
                eval.weighted_grade()
            )
        }));

        lines.extend([
            SINGLE_RULE.to_string(),
            format!("Promedio ponderado: {:.2}", self.weighted_average),
            format!("Asistencia: {}", self.attendance_detail),
            format!("Puntos extra: {}", self.extra_points_detail),
            DOUBLE_RULE.to_string(),
            format!("NOTA FINAL: {:.2}", self.final_grade),
            DOUBLE_RULE.to_string(),
        ]);

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }
}

impl fmt::Display for GradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GradeResult[student={}, final={:.2}]",
            self.student_code, self.final_grade
        )
    }
}
