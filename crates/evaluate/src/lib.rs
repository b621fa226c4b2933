//! Forecast accuracy scoring.
//!
//! Compares a forecast against a reference window of the same length and
//! reports mean squared error, mean absolute error and root mean squared
//! error.

mod error;
mod metrics;

pub use error::EvaluateError;
pub use metrics::{Metrics, evaluate};
