//! # tankcast-sarimax
//!
//! Regression with ARIMA(p,d,q) errors (SARIMAX without seasonal terms)
//! fitted by exact Gaussian maximum likelihood via a Kalman filter, plus an
//! AIC-driven order search.
//!
//! ## Typestate Workflow
//!
//! ```mermaid
//! graph LR
//!     A["SarimaxSpec::new(order)"] -->|".fit(&data, exog)?"| B["SarimaxFit"]
//!     B --> C[".ar() / .ma(): coefficients"]
//!     B --> D[".exog_coef(): regressor weight"]
//!     B --> E[".aic(): Akaike Information Criterion"]
//!     B --> F[".forecast(n, future_exog)?"]
//!     H["select_order(&data, &config)?"] -->|"PACF + (d, q) grid"| I["Order"]
//! ```
//!
//! ## Two Usage Paths
//!
//! **Direct fit** (known order):
//! ```ignore
//! let fit = SarimaxSpec::new(Order::new(2, 1, 1))
//!     .with_enforce_stationarity(false)
//!     .fit(&data, Some(&holidays))?;
//! let forecast = fit.forecast(30, Some(&future_holidays))?;
//! ```
//!
//! **Order search** (unknown order):
//! ```ignore
//! let order = select_order(&data, &SelectionConfig::default())?;
//! ```
//!
//! ## Mathematical Glossary
//!
//! | Symbol | Accessor | Meaning |
//! |--------|----------|---------|
//! | phi | [`SarimaxFit::ar()`] | AR coefficients: weights on past (differenced) values |
//! | theta | [`SarimaxFit::ma()`] | MA coefficients: weights on past forecast errors |
//! | beta | [`SarimaxFit::exog_coef()`] | Exogenous regressor coefficient |
//! | mu | [`SarimaxFit::intercept()`] | Mean of the differenced series net of the regressor |
//! | sigma2 | [`SarimaxFit::sigma2()`] | Innovation (white-noise) variance |
//! | AIC | [`SarimaxFit::aic()`] | Akaike Information Criterion (lower = better) |

mod differencing;
mod error;
mod fit;
mod order;
mod selection;
mod spec;

pub(crate) mod kalman;
pub(crate) mod optimizer;
pub(crate) mod params;
pub(crate) mod state_space;

pub use differencing::difference;
pub use error::SarimaxError;
pub use fit::SarimaxFit;
pub use order::Order;
pub use selection::{OrderSearch, SelectionConfig, ar_order_from_pacf, search_orders, select_order};
pub use spec::{DEFAULT_MAX_ITERS, SarimaxSpec};
