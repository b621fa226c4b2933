//! Pure conversion functions: TOML config structs -> crate API config types.

use std::ops::RangeInclusive;

use anyhow::{Context, Result, bail};

use crate::config::*;

use tankcast_calendar::{DateRange, parse_date};
use tankcast_decompose::DecomposeConfig;
use tankcast_forecast::{FitOptions, ForecastConfig, ForecastRequest};
use tankcast_io::TableConfig;
use tankcast_sarimax::SelectionConfig;

/// Parses a one-character field delimiter; `\t` and `tab` mean a tab.
pub fn parse_delimiter(s: &str) -> Result<u8> {
    if matches!(s, "\\t" | "tab") {
        return Ok(b'\t');
    }
    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => bail!("delimiter must be a single ASCII character, got {s:?}"),
    }
}

/// Converts an inclusive `[min, max]` pair into a range.
pub fn parse_range(name: &str, bounds: [usize; 2]) -> Result<RangeInclusive<usize>> {
    let [lo, hi] = bounds;
    if lo > hi {
        bail!("{name} must be [min, max] with min <= max, got [{lo}, {hi}]");
    }
    Ok(lo..=hi)
}

/// Builds a [`TableConfig`] from the TOML I/O configuration.
pub fn build_table_config(io: &IoConfig) -> Result<TableConfig> {
    let delimiter = parse_delimiter(&io.delimiter)?;
    Ok(TableConfig::default()
        .with_delimiter(delimiter)
        .with_forward_fill(io.forward_fill))
}

/// Builds a [`DecomposeConfig`] from the TOML decomposition configuration.
pub fn build_decompose_config(decompose: &DecomposeToml) -> Result<DecomposeConfig> {
    if decompose.period < 2 {
        bail!("decompose.period must be at least 2, got {}", decompose.period);
    }
    Ok(DecomposeConfig::default().with_period(decompose.period))
}

/// Builds a [`SelectionConfig`] from the TOML selection configuration.
pub fn build_selection_config(selection: &SelectionToml) -> Result<SelectionConfig> {
    if !(0.0..=1.0).contains(&selection.pacf_threshold) {
        bail!(
            "selection.pacf_threshold must be in [0, 1], got {}",
            selection.pacf_threshold
        );
    }
    if selection.max_iters == 0 {
        bail!("selection.max_iters must be positive");
    }
    Ok(SelectionConfig::default()
        .with_max_lag(selection.max_lag)
        .with_pacf_threshold(selection.pacf_threshold)
        .with_d_range(parse_range("selection.d_range", selection.d_range)?)
        .with_q_range(parse_range("selection.q_range", selection.q_range)?)
        .with_max_iters(selection.max_iters)
        .with_parallel(selection.parallel))
}

/// Builds [`FitOptions`] from the TOML fit configuration.
pub fn build_fit_options(fit: &FitToml) -> Result<FitOptions> {
    if fit.max_iters == 0 {
        bail!("fit.max_iters must be positive");
    }
    Ok(FitOptions::default()
        .with_enforce_stationarity(fit.enforce_stationarity)
        .with_enforce_invertibility(fit.enforce_invertibility)
        .with_max_iters(fit.max_iters))
}

/// Builds the full [`ForecastConfig`].
///
/// A negative `forecast.decimals` turns rounding off.
pub fn build_forecast_config(config: &TankcastConfig) -> Result<ForecastConfig> {
    let decimals = (config.forecast.decimals >= 0).then_some(config.forecast.decimals);
    Ok(ForecastConfig::new()
        .with_decompose(build_decompose_config(&config.decompose)?)
        .with_selection(build_selection_config(&config.selection)?)
        .with_fit(build_fit_options(&config.fit)?)
        .with_decimals(decimals))
}

/// Resolves the request from CLI flags and the `[forecast]` section.
///
/// An explicit `start`/`end` pair (`dd-mm-YYYY`) wins over any horizon;
/// otherwise `days` from the CLI, then from the config, is used.
pub fn build_request(
    days: Option<u32>,
    start: Option<&str>,
    end: Option<&str>,
    forecast: &ForecastToml,
) -> Result<ForecastRequest> {
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = parse_date(start).context("invalid --start")?;
            let end = parse_date(end).context("invalid --end")?;
            let range = DateRange::new(start, end)?;
            Ok(range.into())
        }
        (None, None) => {
            let n = days.map_or(forecast.days, |d| d as usize);
            if n == 0 {
                bail!("forecast horizon must be at least one day");
            }
            Ok(ForecastRequest::Next(n))
        }
        _ => bail!("--start and --end must be given together"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn delimiters() {
        assert_eq!(parse_delimiter(",").unwrap(), b',');
        assert_eq!(parse_delimiter(";").unwrap(), b';');
        assert_eq!(parse_delimiter("tab").unwrap(), b'\t');
        assert_eq!(parse_delimiter("\\t").unwrap(), b'\t');
        assert!(parse_delimiter(",,").is_err());
        assert!(parse_delimiter("").is_err());
    }

    #[test]
    fn ranges() {
        assert_eq!(parse_range("d", [0, 3]).unwrap(), 0..=3);
        assert_eq!(parse_range("d", [2, 2]).unwrap(), 2..=2);
        let err = parse_range("selection.q_range", [3, 1]).unwrap_err();
        assert!(err.to_string().contains("selection.q_range"));
    }

    #[test]
    fn defaults_match_library_defaults() {
        let config = build_forecast_config(&TankcastConfig::default()).unwrap();
        assert_eq!(config, ForecastConfig::new());
    }

    #[test]
    fn negative_decimals_disable_rounding() {
        let mut toml = TankcastConfig::default();
        toml.forecast.decimals = -1;
        assert_eq!(build_forecast_config(&toml).unwrap().decimals(), None);
    }

    #[test]
    fn invalid_values_rejected() {
        let mut toml = TankcastConfig::default();
        toml.selection.pacf_threshold = 1.5;
        assert!(build_forecast_config(&toml).is_err());

        let mut toml = TankcastConfig::default();
        toml.decompose.period = 1;
        assert!(build_forecast_config(&toml).is_err());

        let mut toml = TankcastConfig::default();
        toml.fit.max_iters = 0;
        assert!(build_forecast_config(&toml).is_err());
    }

    #[test]
    fn request_from_days() {
        let forecast = ForecastToml::default();
        assert_eq!(
            build_request(None, None, None, &forecast).unwrap(),
            ForecastRequest::Next(30)
        );
        assert_eq!(
            build_request(Some(7), None, None, &forecast).unwrap(),
            ForecastRequest::Next(7)
        );
    }

    #[test]
    fn request_from_range() {
        let r = build_request(
            Some(7),
            Some("01-03-2024"),
            Some("10-03-2024"),
            &ForecastToml::default(),
        )
        .unwrap();
        assert_eq!(
            r,
            ForecastRequest::Range {
                start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
            }
        );
        assert_eq!(r.horizon(), 10);
    }

    #[test]
    fn request_errors() {
        let forecast = ForecastToml::default();
        assert!(build_request(None, Some("01-03-2024"), None, &forecast).is_err());
        assert!(build_request(None, Some("2024-03-01"), Some("10-03-2024"), &forecast).is_err());
        assert!(build_request(None, Some("10-03-2024"), Some("01-03-2024"), &forecast).is_err());

        let zero = ForecastToml {
            days: 0,
            ..ForecastToml::default()
        };
        assert!(build_request(None, None, None, &zero).is_err());
    }
}
