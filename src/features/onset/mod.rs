//! Onset strength computation
//!
//! Produces the normalized onset-strength envelope that drives tempo
//! estimation. The envelope is a pipeline intermediate: the autocorrelation
//! tempo estimator consumes it and it is discarded afterwards.

pub mod strength;

pub use strength::{compute_onset_series, OnsetSeries};
