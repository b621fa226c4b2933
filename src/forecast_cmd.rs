//! Forecast command: read a tank table, forecast each column, write JSON.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use tankcast_calendar::HolidayCalendar;
use tankcast_forecast::{ColumnReport, ForecastResult, forecast_columns};
use tankcast_io::{DailySeries, TankTable, read_holidays, read_table, to_json, write_json};

use crate::cli::ForecastArgs;
use crate::config::TankcastConfig;
use crate::convert;

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG: &str = "tankcast.toml";

/// Run the forecasting pipeline over the selected columns.
pub fn run(args: ForecastArgs) -> Result<()> {
    let _cmd = info_span!("forecast").entered();

    // 1. Load config, then apply CLI overrides
    let mut config = load_config(args.config.as_deref())?;
    if let Some(input) = args.input {
        config.io.input = Some(input);
    }
    if let Some(holidays) = args.holidays {
        config.io.holidays = Some(holidays);
    }
    if let Some(output) = args.output {
        config.io.output = Some(output);
    }
    if let Some(columns) = args.columns {
        config.forecast.columns = columns;
    }
    if args.sequential {
        config.selection.parallel = false;
    }

    let request = convert::build_request(
        args.days,
        args.start.as_deref(),
        args.end.as_deref(),
        &config.forecast,
    )?;
    let forecast_cfg = convert::build_forecast_config(&config)?;
    let table_cfg = convert::build_table_config(&config.io)?;

    // 2. Read inputs
    let input = config.io.input.as_ref().ok_or_else(|| {
        anyhow::anyhow!("no input path: set [io].input in config or use --input")
    })?;
    let table = read_table(input, &table_cfg)
        .with_context(|| format!("failed to read tank table: {}", input.display()))?;

    let holidays = match config.io.holidays.as_ref() {
        Some(path) => read_holidays(path)
            .with_context(|| format!("failed to read holidays: {}", path.display()))?,
        None => {
            warn!("no holiday file configured; holiday regressor is all zeros");
            HolidayCalendar::empty()
        }
    };

    // 3. Forecast
    let columns = select_columns(&table, &config.forecast.columns)?;
    info!(
        columns = columns.len(),
        horizon = request.horizon(),
        holidays = holidays.len(),
        "forecasting"
    );
    let results = forecast_columns(columns, &holidays, request, &forecast_cfg);

    let failed = results.iter().filter(|r| r.is_failure()).count();
    if failed > 0 {
        warn!(failed, total = results.len(), "some columns could not be forecast");
    }

    // 4. Write JSON
    let reports: Vec<ColumnReport> = results.iter().map(ForecastResult::report).collect();
    match config.io.output.as_ref() {
        Some(path) => write_json(path, &reports)
            .with_context(|| format!("failed to write output: {}", path.display()))?,
        None => println!("{}", to_json(&reports)?),
    }

    Ok(())
}

/// Reads `path`, or `tankcast.toml` if present, or falls back to defaults.
fn load_config(path: Option<&Path>) -> Result<TankcastConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                info!("no config file, using defaults");
                return Ok(TankcastConfig::default());
            }
            default
        }
    };
    let toml_str = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}

/// The requested columns in request order, or every column when `names`
/// is empty.
fn select_columns<'a>(
    table: &'a TankTable,
    names: &'a [String],
) -> Result<Vec<(&'a str, DailySeries)>> {
    if names.is_empty() {
        return Ok(table.iter().collect());
    }
    names
        .iter()
        .map(|name| match table.series(name) {
            Some(series) => Ok((name.as_str(), series)),
            None => Err(anyhow::anyhow!(
                "unknown column {name:?} (available: {})",
                table.names().join(", ")
            )),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tankcast_io::{TableConfig, parse_table};

    fn table() -> TankTable {
        let csv = "date,a,b\n2024-01-01,1,2\n2024-01-02,3,4\n";
        parse_table(csv.as_bytes(), &TableConfig::default()).unwrap()
    }

    #[test]
    fn all_columns_when_none_requested() {
        let t = table();
        let cols = select_columns(&t, &[]).unwrap();
        let names: Vec<&str> = cols.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn requested_columns_in_request_order() {
        let t = table();
        let wanted = vec!["b".to_string(), "a".to_string()];
        let cols = select_columns(&t, &wanted).unwrap();
        assert_eq!(cols[0].0, "b");
        assert_eq!(cols[0].1.values(), &[2.0, 4.0]);
        assert_eq!(cols[1].0, "a");
    }

    #[test]
    fn unknown_column_is_an_error() {
        let t = table();
        let err = select_columns(&t, &["c".to_string()]).unwrap_err();
        assert!(err.to_string().contains("available: a, b"));
    }

    #[test]
    fn explicit_config_file_is_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[forecast]\ndays = 9").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.forecast.days, 9);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/tankcast.toml"))).unwrap_err();
        assert!(err.to_string().contains("failed to read config file"));
    }
}
