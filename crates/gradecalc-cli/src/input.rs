use anyhow::{Context, Result};
use gradecalc_core::{Evaluation, Student};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Student input file schema
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StudentRecord {
    pub code: String,
    pub has_minimum_attendance: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<i32>,
    pub evaluations: Vec<EvaluationRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EvaluationRecord {
    pub name: String,
    pub grade: f64,
    pub weight: f64,
}

impl StudentRecord {
    /// Build a validated [`Student`] from the record
    pub fn to_student(&self) -> Result<Student> {
        let mut student = Student::new(self.code.as_str(), self.has_minimum_attendance)
            .context("Invalid student record")?;

        let evaluations = self
            .evaluations
            .iter()
            .enumerate()
            .map(|(index, record)| {
                Evaluation::new(record.name.as_str(), record.grade, record.weight)
                    .with_context(|| format!("Invalid evaluation #{} ('{}')", index + 1, record.name))
            })
            .collect::<Result<Vec<_>>>()?;

        student
            .add_evaluations(evaluations)
            .context("Invalid student record")?;
        Ok(student)
    }
}

pub fn load_student_record(path: &Path) -> Result<StudentRecord> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input file: {:?}", path))?;

    serde_json::from_str(&json).context("Failed to parse student JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn record(evaluations: Vec<(&str, f64, f64)>) -> StudentRecord {
        StudentRecord {
            code: "STU001".to_string(),
            has_minimum_attendance: true,
            academic_year: Some(2025),
            evaluations: evaluations
                .into_iter()
                .map(|(name, grade, weight)| EvaluationRecord {
                    name: name.to_string(),
                    grade,
                    weight,
                })
                .collect(),
        }
    }

    #[test]
    fn test_to_student_valid() {
        let student = record(vec![("Parcial", 15.0, 0.4), ("Final", 17.0, 0.6)])
            .to_student()
            .unwrap();

        assert_eq!(student.code(), "STU001");
        assert_eq!(student.evaluation_count(), 2);
    }

    #[test]
    fn test_to_student_names_the_bad_evaluation() {
        let err = record(vec![("Parcial", 15.0, 0.4), ("Final", 21.0, 0.6)])
            .to_student()
            .unwrap_err();

        assert!(err.to_string().contains("#2"));
        assert!(err.to_string().contains("Final"));
        assert!(format!("{:#}", err).contains("La nota debe estar entre"));
    }

    #[test]
    fn test_to_student_blank_code() {
        let mut rec = record(vec![("Unica", 15.0, 1.0)]);
        rec.code = " ".to_string();

        assert!(rec.to_student().is_err());
    }

    #[test]
    fn test_to_student_too_many_evaluations() {
        let evals = (0..11).map(|_| ("PC", 10.0, 0.09)).collect();
        let err = record(evals).to_student().unwrap_err();

        assert!(format!("{:#}", err).contains("más de 10 evaluaciones"));
    }

    #[test]
    fn test_deserialization_valid() {
        let json = r#"{
            "code": "STU001",
            "has_minimum_attendance": true,
            "academic_year": 2025,
            "evaluations": [
                { "name": "Parcial", "grade": 15.0, "weight": 0.4 },
                { "name": "Final", "grade": 17, "weight": 0.6 }
            ]
        }"#;

        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.academic_year, Some(2025));
        assert_eq!(record.evaluations.len(), 2);
        assert_eq!(record.evaluations[1].grade, 17.0);
    }

    #[test]
    fn test_deserialization_year_optional() {
        let json = r#"{"code": "STU001", "has_minimum_attendance": false, "evaluations": []}"#;

        let record: StudentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.academic_year, None);
    }

    #[test]
    fn test_deserialization_rejects_extra_fields() {
        let json = r#"{
            "code": "STU001",
            "has_minimum_attendance": true,
            "evaluations": [],
            "unexpected_field": "value"
        }"#;

        let err = serde_json::from_str::<StudentRecord>(json).unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }

    #[test]
    fn test_load_student_record_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&record(vec![("Unica", 18.0, 1.0)])).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = load_student_record(file.path()).unwrap();
        assert_eq!(loaded.code, "STU001");
        assert_eq!(loaded.evaluations[0].name, "Unica");
    }

    #[test]
    fn test_load_student_record_missing_file() {
        let err = load_student_record(Path::new("/nonexistent/student.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
