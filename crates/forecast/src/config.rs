//! Configuration for the forecasting pipeline.

use tankcast_decompose::DecomposeConfig;
use tankcast_sarimax::{DEFAULT_MAX_ITERS, SelectionConfig};

/// Decimal places forecast values are rounded to by default.
pub const DEFAULT_DECIMALS: i32 = 3;

/// Settings for the final model fit in [`fit_and_forecast`](crate::fit_and_forecast).
///
/// Unlike the order-search candidates, the final model is fitted with
/// both constraints relaxed by default.
///
/// # Example
///
/// ```
/// use tankcast_forecast::FitOptions;
///
/// let options = FitOptions::default().with_max_iters(500);
/// assert!(!options.enforce_stationarity());
/// assert_eq!(options.max_iters(), 500);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FitOptions {
    enforce_stationarity: bool,
    enforce_invertibility: bool,
    max_iters: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            enforce_stationarity: false,
            enforce_invertibility: false,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl FitOptions {
    pub fn with_enforce_stationarity(mut self, enforce: bool) -> Self {
        self.enforce_stationarity = enforce;
        self
    }

    pub fn with_enforce_invertibility(mut self, enforce: bool) -> Self {
        self.enforce_invertibility = enforce;
        self
    }

    /// Sets the Nelder-Mead iteration cap for the final fit.
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    pub fn enforce_stationarity(&self) -> bool {
        self.enforce_stationarity
    }

    pub fn enforce_invertibility(&self) -> bool {
        self.enforce_invertibility
    }

    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// Configuration for [`forecast_column`](crate::forecast_column).
///
/// Bundles the decomposition, order-search and final-fit settings with the
/// rounding applied to reported forecast values.
///
/// # Example
///
/// ```
/// use tankcast_decompose::DecomposeConfig;
/// use tankcast_forecast::ForecastConfig;
///
/// let config = ForecastConfig::new()
///     .with_decompose(DecomposeConfig::default().with_period(7))
///     .with_decimals(None);
/// assert_eq!(config.decompose().period(), 7);
/// assert_eq!(config.decimals(), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ForecastConfig {
    decompose: DecomposeConfig,
    selection: SelectionConfig,
    fit: FitOptions,
    decimals: Option<i32>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ForecastConfig {
    /// Creates a config with a 365-day period, the default order grid,
    /// relaxed final fit and 3-decimal rounding.
    pub fn new() -> Self {
        Self {
            decompose: DecomposeConfig::default(),
            selection: SelectionConfig::default(),
            fit: FitOptions::default(),
            decimals: Some(DEFAULT_DECIMALS),
        }
    }

    pub fn with_decompose(mut self, decompose: DecomposeConfig) -> Self {
        self.decompose = decompose;
        self
    }

    pub fn with_selection(mut self, selection: SelectionConfig) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_fit(mut self, fit: FitOptions) -> Self {
        self.fit = fit;
        self
    }

    /// Sets the decimal places reported values are rounded to; `None`
    /// reports them unrounded.
    pub fn with_decimals(mut self, decimals: Option<i32>) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn decompose(&self) -> &DecomposeConfig {
        &self.decompose
    }

    pub fn selection(&self) -> &SelectionConfig {
        &self.selection
    }

    pub fn fit(&self) -> &FitOptions {
        &self.fit
    }

    pub fn decimals(&self) -> Option<i32> {
        self.decimals
    }
}
