use crate::policy::{DEFAULT_EXTRA_POINTS, ExtraPointsPolicy};
use serde::{Deserialize, Deserializer, Serialize};

/// Extra-points configuration agreed on by the instructors
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPointsConfig {
    /// Academic years in which the bonus is granted
    ///
    /// Besides a list, a single year or a comma-separated string such as
    /// `"2024, 2025"` is accepted, which is how environment variables carry it.
    #[serde(default, deserialize_with = "deserialize_years")]
    pub years: Vec<i32>,

    /// Points added in a qualifying year
    #[serde(default = "default_bonus")]
    pub bonus: f64,
}

fn default_bonus() -> f64 {
    DEFAULT_EXTRA_POINTS
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearValue {
    Number(i64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum YearsValue {
    One(YearValue),
    Many(Vec<YearValue>),
}

fn deserialize_years<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = match YearsValue::deserialize(deserializer)? {
        YearsValue::One(YearValue::Text(text)) if text.trim().is_empty() => Vec::new(),
        YearsValue::One(YearValue::Text(text)) => text
            .split(',')
            .map(|year| YearValue::Text(year.to_string()))
            .collect(),
        YearsValue::One(year) => vec![year],
        YearsValue::Many(years) => years,
    };

    values
        .into_iter()
        .map(|value| parse_year(value).map_err(serde::de::Error::custom))
        .collect()
}

fn parse_year(value: YearValue) -> Result<i32, String> {
    match value {
        YearValue::Number(year) => {
            i32::try_from(year).map_err(|_| format!("Año fuera de rango: {}", year))
        }
        YearValue::Text(text) => {
            let year = text.trim();
            year.parse::<i32>()
                .map_err(|_| format!("Año inválido: '{}'", year))
        }
    }
}

impl Default for ExtraPointsConfig {
    fn default() -> Self {
        Self {
            years: Vec::new(),
            bonus: DEFAULT_EXTRA_POINTS,
        }
    }
}

impl ExtraPointsConfig {
    pub fn to_policy(&self) -> ExtraPointsPolicy {
        ExtraPointsPolicy::with_bonus(self.years.iter().copied(), self.bonus)
    }
}

/// Grading configuration for a calculation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GradingConfig {
    #[serde(default)]
    pub extra_points: ExtraPointsConfig,
}
