//! Error types for the tankcast-decompose crate.

/// Error type for seasonal decomposition.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DecomposeError {
    /// Returned when the input series is empty.
    #[error("input series is empty")]
    EmptyData,

    /// Returned when the series is shorter than two full seasonal cycles.
    #[error("insufficient data: got {n} observations, need at least {min} (two periods of {period})")]
    InsufficientData {
        /// Number of observations provided.
        n: usize,
        /// Minimum number of observations required.
        min: usize,
        /// Configured seasonal period.
        period: usize,
    },

    /// Returned when the series contains NaN or infinite values.
    #[error("input series contains non-finite values")]
    NonFiniteData,

    /// Returned when the configured period is below 2.
    #[error("invalid seasonal period: {period} (must be >= 2)")]
    InvalidPeriod {
        /// The rejected period.
        period: usize,
    },

    /// Returned when the series has zero range, leaving nothing to decompose.
    #[error("input series is constant (zero variance)")]
    ConstantData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_insufficient_data() {
        let err = DecomposeError::InsufficientData {
            n: 100,
            min: 730,
            period: 365,
        };
        assert_eq!(
            err.to_string(),
            "insufficient data: got 100 observations, need at least 730 (two periods of 365)"
        );
    }

    #[test]
    fn error_invalid_period() {
        let err = DecomposeError::InvalidPeriod { period: 1 };
        assert_eq!(err.to_string(), "invalid seasonal period: 1 (must be >= 2)");
    }

    #[test]
    fn error_constant_data() {
        assert_eq!(
            DecomposeError::ConstantData.to_string(),
            "input series is constant (zero variance)"
        );
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync + std::error::Error>() {}
        assert_impl::<DecomposeError>();
    }
}
