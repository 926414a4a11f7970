use config::{Config, ConfigError, Environment, File};
use gradecalc_core::{DEFAULT_EXTRA_POINTS, GradingConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_CONFIG_NAME: &str = "gradecalc";
const ENV_PREFIX: &str = "GRADECALC";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub grading: GradingConfig,
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when RUST_LOG is not set
    pub level: String,
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later sources override earlier ones):
    /// 1. Default values
    /// 2. `path` if given, otherwise gradecalc.toml in the working directory (if present)
    /// 3. Environment variables (prefixed with GRADECALC_)
    ///
    /// Environment variables use double underscore for nesting:
    /// - GRADECALC_GRADING__EXTRA_POINTS__BONUS=1.5
    /// - GRADECALC_GRADING__EXTRA_POINTS__YEARS=2024,2025
    /// - GRADECALC_LOGGING__LEVEL=debug
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            // Start with default values
            .set_default("grading.extra_points.years", Vec::<i64>::new())?
            .set_default("grading.extra_points.bonus", DEFAULT_EXTRA_POINTS)?
            .set_default("logging.level", "warn")?;

        // An explicit path must exist; the default file is optional
        let builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None if Path::new(&format!("{}.toml", DEFAULT_CONFIG_NAME)).exists() => {
                builder.add_source(File::with_name(DEFAULT_CONFIG_NAME))
            }
            None => builder,
        };

        // Override with environment variables
        let builder = builder.add_source(env);

        builder.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("grading.extra_points.years")
        .try_parsing(true)
}
