//! Evaluation error types.

/// Errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateError {
    /// Reference and forecast are both empty.
    #[error("cannot score an empty forecast")]
    EmptyInput,

    /// Reference and forecast differ in length.
    #[error("reference has {reference} values but forecast has {forecast}")]
    LengthMismatch { reference: usize, forecast: usize },
}
