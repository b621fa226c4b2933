use std::path::PathBuf;

use serde::Deserialize;

/// Top-level Tankcast configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TankcastConfig {
    /// I/O settings.
    #[serde(default)]
    pub io: IoConfig,

    /// Seasonal decomposition settings.
    #[serde(default)]
    pub decompose: DecomposeToml,

    /// Order search settings.
    #[serde(default)]
    pub selection: SelectionToml,

    /// Final model fit settings.
    #[serde(default)]
    pub fit: FitToml,

    /// Horizon, column subset and output rounding.
    #[serde(default)]
    pub forecast: ForecastToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IoConfig {
    pub input: Option<PathBuf>,
    pub holidays: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    #[serde(default = "default_true")]
    pub forward_fill: bool,
}

impl Default for IoConfig {
    fn default() -> Self {
        Self {
            input: None,
            holidays: None,
            output: None,
            delimiter: default_delimiter(),
            forward_fill: true,
        }
    }
}

fn default_delimiter() -> String {
    ",".to_string()
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecomposeToml {
    #[serde(default = "default_period")]
    pub period: usize,
}

impl Default for DecomposeToml {
    fn default() -> Self {
        Self {
            period: default_period(),
        }
    }
}

fn default_period() -> usize {
    365
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SelectionToml {
    #[serde(default = "default_max_lag")]
    pub max_lag: usize,
    #[serde(default = "default_pacf_threshold")]
    pub pacf_threshold: f64,
    /// Inclusive `[min, max]` differencing orders.
    #[serde(default = "default_d_range")]
    pub d_range: [usize; 2],
    /// Inclusive `[min, max]` MA orders.
    #[serde(default = "default_q_range")]
    pub q_range: [usize; 2],
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for SelectionToml {
    fn default() -> Self {
        Self {
            max_lag: default_max_lag(),
            pacf_threshold: default_pacf_threshold(),
            d_range: default_d_range(),
            q_range: default_q_range(),
            max_iters: default_max_iters(),
            parallel: true,
        }
    }
}

fn default_max_lag() -> usize {
    40
}
fn default_pacf_threshold() -> f64 {
    0.5
}
fn default_d_range() -> [usize; 2] {
    [0, 3]
}
fn default_q_range() -> [usize; 2] {
    [0, 7]
}
fn default_max_iters() -> usize {
    5000
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FitToml {
    #[serde(default)]
    pub enforce_stationarity: bool,
    #[serde(default)]
    pub enforce_invertibility: bool,
    #[serde(default = "default_max_iters")]
    pub max_iters: usize,
}

impl Default for FitToml {
    fn default() -> Self {
        Self {
            enforce_stationarity: false,
            enforce_invertibility: false,
            max_iters: default_max_iters(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForecastToml {
    #[serde(default = "default_days")]
    pub days: usize,
    /// Decimal places of reported values; negative disables rounding.
    #[serde(default = "default_decimals")]
    pub decimals: i32,
    /// Columns to forecast; all when empty.
    #[serde(default)]
    pub columns: Vec<String>,
}

impl Default for ForecastToml {
    fn default() -> Self {
        Self {
            days: default_days(),
            decimals: default_decimals(),
            columns: Vec::new(),
        }
    }
}

fn default_days() -> usize {
    30
}
fn default_decimals() -> i32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: TankcastConfig = toml::from_str("").unwrap();
        assert_eq!(config.decompose.period, 365);
        assert_eq!(config.selection.max_lag, 40);
        assert_eq!(config.selection.pacf_threshold, 0.5);
        assert_eq!(config.selection.d_range, [0, 3]);
        assert_eq!(config.selection.q_range, [0, 7]);
        assert_eq!(config.selection.max_iters, 5000);
        assert!(!config.fit.enforce_stationarity);
        assert_eq!(config.forecast.days, 30);
        assert_eq!(config.forecast.decimals, 3);
        assert_eq!(config.io.delimiter, ",");
        assert!(config.io.forward_fill);
    }

    #[test]
    fn sections_parse() {
        let text = r#"
            [io]
            input = "tanks.csv"
            holidays = "holidays.txt"
            delimiter = ";"

            [selection]
            q_range = [0, 3]
            parallel = false

            [forecast]
            days = 14
            columns = ["tank_a", "tank_b"]
        "#;
        let config: TankcastConfig = toml::from_str(text).unwrap();
        assert_eq!(config.io.input, Some(PathBuf::from("tanks.csv")));
        assert_eq!(config.io.delimiter, ";");
        assert_eq!(config.selection.q_range, [0, 3]);
        assert!(!config.selection.parallel);
        assert_eq!(config.forecast.days, 14);
        assert_eq!(config.forecast.columns, vec!["tank_a", "tank_b"]);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = toml::from_str::<TankcastConfig>("[fit]\nmax_iter = 10\n").unwrap_err();
        assert!(err.to_string().contains("unknown field"));
    }
}
