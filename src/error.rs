//! Error types for the musical-structure analysis engine

use std::fmt;

/// Errors that can occur during structure analysis
///
/// These never cross the public [`analyze`](crate::analyze) boundary: the
/// orchestrator converts any of them into a degraded fallback result.
#[derive(Debug, Clone)]
pub enum AnalysisError {
    /// Invalid input parameters (empty signal, zero sample rate, bad config)
    InvalidInput(String),

    /// Processing error during analysis
    ProcessingError(String),

    /// Numerical error (overflow, non-finite intermediate, etc.)
    NumericalError(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            AnalysisError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
            AnalysisError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
