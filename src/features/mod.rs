//! Feature extraction modules
//!
//! This module contains all feature extraction algorithms:
//! - Onset strength envelope
//! - Tempo estimation (autocorrelation + octave correction)
//! - Transient detection and classification
//! - Swing/groove analysis
//! - Key estimation (template correlation)
//! - Spectral balance
//! - Section segmentation
//! - Drum pattern extraction

pub mod groove;
pub mod key;
pub mod onset;
pub mod pattern;
pub mod spectral;
pub mod structure;
pub mod tempo;
pub mod transient;
