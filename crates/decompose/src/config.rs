//! Decomposition configuration.

/// One year of daily observations.
pub const DEFAULT_PERIOD: usize = 365;

/// Configuration for [`decompose()`](crate::decompose).
///
/// # Example
///
/// ```
/// use tankcast_decompose::DecomposeConfig;
///
/// let config = DecomposeConfig::default().with_period(7);
/// assert_eq!(config.period(), 7);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecomposeConfig {
    period: usize,
}

impl Default for DecomposeConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
        }
    }
}

impl DecomposeConfig {
    /// Sets the seasonal period (in observations).
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Returns the seasonal period.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Minimum series length accepted by the decomposition (two full cycles).
    pub fn min_len(&self) -> usize {
        2 * self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_yearly() {
        let config = DecomposeConfig::default();
        assert_eq!(config.period(), 365);
        assert_eq!(config.min_len(), 730);
    }

    #[test]
    fn builder_overrides_period() {
        let config = DecomposeConfig::default().with_period(12);
        assert_eq!(config.period(), 12);
        assert_eq!(config.min_len(), 24);
    }
}
