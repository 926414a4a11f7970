use crate::prompt::{Prompter, parse_years};
use anyhow::Result;
use gradecalc_core::{Evaluation, Student, ValidationError};
use std::io::{BufRead, Write};
use tracing::debug;

const BANNER: [&str; 4] = [
    "╔═══════════════════════════════════════════╗",
    "║     CS-GradeCalculator - UTEC 2025-2      ║",
    "║   Sistema de Cálculo de Nota Final        ║",
    "╚═══════════════════════════════════════════╝",
];

/// Everything collected from the instructor in one interactive run
#[derive(Debug)]
pub struct SessionInput {
    pub student: Student,
    pub academic_year: i32,
    pub years_with_extra: Vec<i32>,
}

pub fn print_welcome<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<()> {
    for line in BANNER {
        prompter.say(line)?;
    }
    prompter.say("")
}

/// Ask for the student, the academic year and the bonus years
pub fn collect_session<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<SessionInput> {
    let student = collect_student(prompter)?;
    let academic_year =
        prompter.ask_parsed::<i32>("\nIngrese el año académico del estudiante: ", "año académico")?;
    let years_with_extra = collect_years_with_extra(prompter)?;

    Ok(SessionInput {
        student,
        academic_year,
        years_with_extra,
    })
}

fn collect_student<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Student> {
    let code = prompter.ask("Ingrese código del estudiante: ")?;
    let has_attendance =
        prompter.ask_yes_no("¿El estudiante cumplió asistencia mínima? (s/n): ")?;
    let mut student = Student::new(code, has_attendance)?;

    let count = prompter.ask_parsed::<usize>(
        &format!(
            "¿Cuántas evaluaciones tiene el estudiante? (máx {}): ",
            Student::max_evaluations()
        ),
        "cantidad de evaluaciones",
    )?;
    if count > Student::max_evaluations() {
        return Err(ValidationError::TooManyEvaluations {
            max: Student::max_evaluations(),
        }
        .into());
    }

    prompter.say("\nIngrese las evaluaciones:")?;
    for i in 1..=count {
        prompter.say(&format!("--- Evaluación {} ---", i))?;
        let name = prompter.ask("  Nombre: ")?;
        let grade = prompter.ask_parsed::<f64>("  Nota (0-20): ", "nota")?;
        let weight = prompter.ask_parsed::<f64>("  Peso (ej: 0.30 para 30%): ", "peso")?;

        student.add_evaluation(Evaluation::new(name, grade, weight)?)?;
    }

    debug!("Collected {}", student);
    Ok(student)
}

fn collect_years_with_extra<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Vec<i32>> {
    if !prompter.ask_yes_no("¿Se otorgan puntos extra este año? (s/n): ")? {
        return Ok(Vec::new());
    }

    let years = prompter
        .ask("Ingrese los años con puntos extra (separados por coma, ej: 2024,2025): ")?;
    parse_years(&years)
}
