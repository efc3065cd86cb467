//! Key estimation
//!
//! Builds a pitch-class energy histogram from bounded spectrum frames and
//! correlates it against scale-profile templates (major, minor, dorian,
//! mixolydian) at all 12 rotations.

pub mod estimator;
pub mod templates;

pub use estimator::{estimate_key, KeyAnalysis};
