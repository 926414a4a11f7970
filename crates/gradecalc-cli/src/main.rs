mod config;
mod input;
mod interactive;
mod prompt;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::AppConfig;
use interactive::SessionInput;
use gradecalc_core::{ExtraPointsConfig, GradeCalculator, GradeResult, GradingConfig, Student};
use prompt::Prompter;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "gradecalc-cli")]
#[command(about = "Final-grade calculator with attendance gate and academic-year bonus points")]
#[command(version = VERSION)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./gradecalc.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Bonus granted in qualifying years, overriding the configuration
    #[arg(long, global = true, allow_negative_numbers = true)]
    bonus: Option<f64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for the student data on the terminal (default)
    Interactive,

    /// Grade a student described in a JSON file
    Calculate {
        /// Path to the student JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Academic year, overriding the one in the input file
        #[arg(short, long)]
        year: Option<i32>,

        /// Year in which extra points are granted (repeatable), replacing the configured years
        #[arg(long = "extra-year")]
        extra_years: Vec<i32>,

        /// Print the result as JSON instead of the detailed report
        #[arg(long)]
        json: bool,
    },

    /// Print the effective configuration as TOML
    ShowConfig,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging.level);
    info!("Configuration loaded successfully");

    if let Some(message) = negative_bonus_warning(cli.bonus) {
        warn!("{}", message);
    }
    config.grading = apply_overrides(&config.grading, cli.bonus, &[]);

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => interactive_command(&config.grading)?,
        Commands::Calculate {
            input,
            year,
            extra_years,
            json,
        } => {
            let grading = apply_overrides(&config.grading, None, &extra_years);
            let output = calculate_command(&input, year, &grading, json)?;
            println!("{}", output);
        }
        Commands::ShowConfig => {
            let rendered =
                toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
            print!("{}", rendered);
        }
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the report
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn negative_bonus_warning(bonus: Option<f64>) -> Option<String> {
    bonus
        .filter(|bonus| *bonus < 0.0)
        .map(|bonus| format!("Negative --bonus {} is clamped to 0", bonus))
}

/// Apply command-line overrides on top of the loaded grading configuration
fn apply_overrides(grading: &GradingConfig, bonus: Option<f64>, extra_years: &[i32]) -> GradingConfig {
    let mut grading = grading.clone();
    if let Some(bonus) = bonus {
        grading.extra_points.bonus = bonus;
    }
    if !extra_years.is_empty() {
        grading.extra_points.years = extra_years.to_vec();
    }
    grading
}

fn interactive_command(grading: &GradingConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    interactive::print_welcome(&mut prompter)?;
    let session = interactive::collect_session(&mut prompter)?;

    let grading = session_grading(&session, grading);
    let result = run_calculation(&session.student, Some(session.academic_year), &grading)?;
    prompter.say("")?;
    prompter.say(&result.detailed_report())?;
    Ok(())
}

/// The years typed by the instructor replace the configured ones; the bonus is kept
fn session_grading(session: &SessionInput, grading: &GradingConfig) -> GradingConfig {
    GradingConfig {
        extra_points: ExtraPointsConfig {
            years: session.years_with_extra.clone(),
            bonus: grading.extra_points.bonus,
        },
    }
}

fn calculate_command(
    input_path: &Path,
    year: Option<i32>,
    grading: &GradingConfig,
    json: bool,
) -> Result<String> {
    let record = input::load_student_record(input_path)?;
    info!("Loaded student record from {:?}", input_path);

    let student = record.to_student()?;
    let academic_year = year.or(record.academic_year);
    let result = run_calculation(&student, academic_year, grading)?;

    if json {
        serde_json::to_string_pretty(&result).context("Failed to serialize result")
    } else {
        Ok(result.detailed_report())
    }
}

fn run_calculation(
    student: &Student,
    academic_year: Option<i32>,
    grading: &GradingConfig,
) -> Result<GradeResult> {
    let calculator = GradeCalculator::from_config(grading);
    debug!(
        "Calculating final grade for {} (year: {:?}, bonus years: {:?})",
        student, academic_year, grading.extra_points.years
    );

    let start = Instant::now();
    let result = match academic_year {
        Some(year) => calculator.calculate_final_grade(student, year),
        None => calculator.calculate_final_grade_without_year(student),
    }
    .with_context(|| format!("Failed to calculate final grade for {}", student.code()))?;

    info!(
        "Calculated {} in {} µs",
        result,
        start.elapsed().as_micros()
    );
    Ok(result)
}
