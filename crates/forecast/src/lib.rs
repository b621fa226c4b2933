//! Tank-level forecasting, one column at a time.
//!
//! Each column runs through the same pipeline. Any failure along the way
//! is contained to that column: it is logged and reported as an all-NaN
//! [`ForecastResult`], and the remaining columns are still forecast.
//!
//! # Pipeline
//!
//! ```text
//!  ┌─────────────┐   ┌──────────────┐   ┌──────────────────┐   ┌────────────┐
//!  │  Decompose  │──▶│ Select order │──▶│  Fit & forecast  │──▶│  Evaluate  │
//!  │ (period 365)│   │ (PACF + AIC) │   │ (holiday regr.)  │   │ MSE/MAE/RMSE│
//!  └─────────────┘   └──────────────┘   └──────────────────┘   └────────────┘
//! ```
//!
//! The model is fitted to the deseasonalized series, and forecasts are
//! reported on that scale. Metrics compare the forecast with the last `n`
//! deseasonalized training values, which is a backtest proxy rather than
//! true out-of-sample accuracy.
//!
//! # Quick start
//!
//! ```ignore
//! use tankcast_forecast::{ForecastConfig, ForecastRequest, forecast_columns};
//! use tankcast_io::{TableConfig, read_holidays, read_table};
//!
//! let table = read_table(Path::new("tanks.csv"), &TableConfig::default())?;
//! let holidays = read_holidays(Path::new("holidays.txt"))?;
//! let results = forecast_columns(table.iter(), &holidays, ForecastRequest::Next(30), &ForecastConfig::new());
//! for r in &results {
//!     println!("{}: rmse {}", r.column(), r.rmse());
//! }
//! ```

mod config;
mod error;
mod forecaster;
mod pipeline;
mod request;
mod result;

pub use config::{DEFAULT_DECIMALS, FitOptions, ForecastConfig};
pub use error::ForecastError;
pub use forecaster::fit_and_forecast;
pub use pipeline::{forecast_column, forecast_columns};
pub use request::ForecastRequest;
pub use result::{ColumnReport, ForecastPoint, ForecastResult, round_to};
