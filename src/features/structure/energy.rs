//! Track-level energy profile
//!
//! Reduces the whole signal to a fixed number of energy bins spanning the
//! full duration, normalized so the loudest bin is 1. The segmenter walks
//! this profile; it is also exported on the final analysis for displays
//! and remix-prompt payloads.

use crate::error::AnalysisError;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Computes a normalized energy profile of the signal.
///
/// Bin `b` holds the mean squared sample value over its share of the
/// signal, scaled so the maximum bin is 1. A silent signal yields all
/// zeros.
///
/// # Arguments
///
/// * `samples` - Audio samples
/// * `bins` - Number of profile bins (typically 32)
///
/// # Errors
///
/// Returns an error if the signal is empty or `bins` is zero.
pub fn energy_profile(samples: &[f32], bins: usize) -> Result<Vec<f32>, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio signal".to_string(),
        ));
    }
    if bins == 0 {
        return Err(AnalysisError::InvalidInput(
            "Profile must have at least one bin".to_string(),
        ));
    }

    let mut profile = Vec::with_capacity(bins);
    for bin in 0..bins {
        let start = bin * samples.len() / bins;
        let end = ((bin + 1) * samples.len() / bins).min(samples.len());
        if end <= start {
            profile.push(0.0);
            continue;
        }

        let energy: f32 =
            samples[start..end].iter().map(|&x| x * x).sum::<f32>() / (end - start) as f32;
        profile.push(energy);
    }

    let max_energy = profile.iter().fold(0.0f32, |a, &b| a.max(b));
    if max_energy > EPSILON {
        for value in &mut profile {
            *value /= max_energy;
        }
    }

    Ok(profile)
}
