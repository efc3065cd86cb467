//! Tempo estimation
//!
//! Autocorrelation of the onset-strength envelope with octave-error
//! correction and a heuristic confidence score.

pub mod autocorrelation;

pub use autocorrelation::estimate_tempo;
