//! Transient detection and classification
//!
//! Splits the signal into low/mid/high bands with one-pole filters, frames
//! the banded energy, and fires a transient wherever the summed band-energy
//! rise crosses a threshold. Each detection is classified into a percussive
//! voice from the relative band magnitudes at the firing frame.

pub mod detector;
pub mod filterbank;

pub use detector::{detect_transients, DetectorSettings};
pub use filterbank::{band_energies, BandEnergies};
