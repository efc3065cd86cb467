//! Frequency-domain analysis
//!
//! A shared windowed-FFT helper plus the six-band spectral balance
//! analyzer. The key estimator reuses the same spectrum frames.

pub mod balance;
pub mod spectrum;

pub use balance::compute_spectral_balance;
pub use spectrum::{magnitude_frames, SpectrumFrames};
