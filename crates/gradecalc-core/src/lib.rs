pub mod calculator;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod policy;
pub mod result;
pub mod student;

// Re-export commonly used types
pub use calculator::{GradeCalculator, WEIGHT_TOLERANCE, calculate_grade};
pub use config::{ExtraPointsConfig, GradingConfig};
pub use error::{CalculationError, CalculationResult, ValidationError, ValidationResult};
pub use evaluation::{Evaluation, MAX_GRADE, MIN_GRADE};
pub use policy::{AttendancePolicy, DEFAULT_EXTRA_POINTS, ExtraPointsPolicy};
pub use result::GradeResult;
pub use student::{MAX_EVALUATIONS, Student};
