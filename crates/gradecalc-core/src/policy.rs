use crate::evaluation::MAX_GRADE;
use crate::student::Student;
use serde::Serialize;
use std::collections::BTreeSet;

/// Bonus granted in a qualifying year when none is configured
pub const DEFAULT_EXTRA_POINTS: f64 = 2.0;

const PENALTY_FOR_NO_ATTENDANCE: f64 = 0.0;

/// Minimum-attendance rule
///
/// A student who did not reach the minimum number of classes gets a final
/// grade of zero, whatever their evaluations say.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttendancePolicy;

impl AttendancePolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn meets_minimum_attendance(&self, student: &Student) -> bool {
        student.has_minimum_attendance()
    }

    /// Returns `grade` unchanged if attendance is met, otherwise `0.0`
    pub fn apply_policy(&self, student: &Student, grade: f64) -> f64 {
        if !self.meets_minimum_attendance(student) {
            return PENALTY_FOR_NO_ATTENDANCE;
        }
        grade
    }

    pub fn describe(&self, student: &Student) -> String {
        if !self.meets_minimum_attendance(student) {
            return "No cumple asistencia mínima - Nota final: 0.00".to_string();
        }
        "Cumple con asistencia mínima".to_string()
    }
}

/// Academic-year bonus rule
///
/// Instructors agree on the years in which extra points are granted. In
/// those years the bonus is added to the weighted average, capped at
/// [`MAX_GRADE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtraPointsPolicy {
    years_with_extra_points: BTreeSet<i32>,
    extra_points: f64,
}

impl ExtraPointsPolicy {
    /// Policy granting [`DEFAULT_EXTRA_POINTS`] in each of `years`
    pub fn new(years: impl IntoIterator<Item = i32>) -> Self {
        Self::with_bonus(years, DEFAULT_EXTRA_POINTS)
    }

    /// Policy with a custom bonus; negative (or NaN) amounts are clamped to zero
    pub fn with_bonus(years: impl IntoIterator<Item = i32>, extra_points: f64) -> Self {
        Self {
            years_with_extra_points: years.into_iter().collect(),
            extra_points: extra_points.max(0.0),
        }
    }

    pub fn has_extra_points(&self, academic_year: i32) -> bool {
        self.years_with_extra_points.contains(&academic_year)
    }

    /// Add the bonus to `grade` if `academic_year` qualifies, never exceeding [`MAX_GRADE`]
    ///
    /// # Examples
    ///
    /// ```
    /// use gradecalc_core::ExtraPointsPolicy;
    ///
    /// let policy = ExtraPointsPolicy::new([2024, 2025]);
    ///
    /// assert_eq!(policy.apply_extra_points(15.0, 2025), 17.0);
    /// assert_eq!(policy.apply_extra_points(19.0, 2025), 20.0); // Capped
    /// assert_eq!(policy.apply_extra_points(15.0, 2023), 15.0); // Not a bonus year
    /// ```
    pub fn apply_extra_points(&self, grade: f64, academic_year: i32) -> f64 {
        if !self.has_extra_points(academic_year) {
            return grade;
        }
        (grade + self.extra_points).min(MAX_GRADE)
    }

    pub fn extra_points_for_year(&self, academic_year: i32) -> f64 {
        if self.has_extra_points(academic_year) {
            self.extra_points
        } else {
            0.0
        }
    }

    pub fn describe(&self, academic_year: i32) -> String {
        if self.has_extra_points(academic_year) {
            return format!(
                "Puntos extra aplicados: +{:.2} (año {})",
                self.extra_points, academic_year
            );
        }
        format!("Sin puntos extra para el año {}", academic_year)
    }

    pub fn years_with_extra_points(&self) -> &BTreeSet<i32> {
        &self.years_with_extra_points
    }

    pub fn extra_points(&self) -> f64 {
        self.extra_points
    }
}

impl Default for ExtraPointsPolicy {
    fn default() -> Self {
        Self::new([])
    }
}
