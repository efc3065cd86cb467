//! Onset strength envelope
//!
//! Turns raw samples into a time series of onset strength at a fixed frame
//! rate. Each frame scores a blend of overall energy and high-frequency
//! emphasis (squared first differences, a cheap spectral-flux proxy), then a
//! decaying floor suppresses sustained energy so only fresh energy registers
//! as an onset.
//!
//! # Algorithm
//!
//! 1. Slide a frame of 2x hop size across the signal at hop granularity
//! 2. Per frame: combined = 0.3 * mean(x^2) + 0.7 * mean(dx^2)
//! 3. Onset[i] = max(0, combined[i] - combined[i-1] * 0.9)
//! 4. Normalize the series by its maximum
//!
//! # References
//!
//! - Bello, J.P., et al. (2005). "A tutorial on onset detection in music
//!   signals." IEEE Transactions on Speech and Audio Processing.

use crate::error::AnalysisError;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Weight of the plain frame energy term
const RMS_WEIGHT: f32 = 0.3;

/// Weight of the high-frequency emphasis term
const HF_WEIGHT: f32 = 0.7;

/// Fraction of the previous frame's energy subtracted as a decaying floor
const DECAY_FLOOR: f32 = 0.9;

/// Onset strength envelope at a fixed frame rate
#[derive(Debug, Clone)]
pub struct OnsetSeries {
    /// Normalized onset strength per frame, each value in [0, 1]
    pub envelope: Vec<f32>,

    /// Time step between consecutive frames in seconds
    pub hop_seconds: f32,
}

/// Computes the onset strength envelope of a signal.
///
/// The envelope holds one value per hop; hop size is `sample_rate / rate_hz`
/// samples. A silent signal yields an all-zero envelope, never an error.
///
/// # Arguments
///
/// * `samples` - Audio samples (typically the reference channel)
/// * `sample_rate` - Sample rate in Hz
/// * `rate_hz` - Envelope frame rate in Hz (typically 100)
///
/// # Returns
///
/// Onset series normalized so the maximum value is 1 (or all zeros for
/// silence)
///
/// # Errors
///
/// Returns an error if the signal is empty, or if the sample rate or frame
/// rate is zero.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::onset::compute_onset_series;
///
/// let samples = vec![0.0f32; 44100];
/// let onsets = compute_onset_series(&samples, 44100, 100)?;
/// assert_eq!(onsets.hop_seconds, 0.01);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn compute_onset_series(
    samples: &[f32],
    sample_rate: u32,
    rate_hz: u32,
) -> Result<OnsetSeries, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio signal".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate must be positive".to_string(),
        ));
    }
    if rate_hz == 0 {
        return Err(AnalysisError::InvalidInput(
            "Onset frame rate must be positive".to_string(),
        ));
    }

    let hop_size = ((sample_rate / rate_hz) as usize).max(1);
    let frame_size = hop_size * 2;
    let hop_seconds = hop_size as f32 / sample_rate as f32;

    // Combined energy per frame: plain energy plus squared first differences
    let mut combined = Vec::new();
    let mut start = 0;
    while start + frame_size <= samples.len() {
        let frame = &samples[start..start + frame_size];

        let energy: f32 = frame.iter().map(|&x| x * x).sum::<f32>() / frame_size as f32;
        let hf_energy: f32 = frame
            .windows(2)
            .map(|pair| {
                let diff = pair[1] - pair[0];
                diff * diff
            })
            .sum::<f32>()
            / (frame_size - 1) as f32;

        combined.push(RMS_WEIGHT * energy + HF_WEIGHT * hf_energy);
        start += hop_size;
    }

    // Decaying floor: sustained energy must grow past 90% of the previous
    // frame to register as a new onset
    let mut envelope = Vec::with_capacity(combined.len());
    let mut previous = 0.0f32;
    for &value in &combined {
        envelope.push((value - previous * DECAY_FLOOR).max(0.0));
        previous = value;
    }

    let max_value = envelope.iter().fold(0.0f32, |a, &b| a.max(b));
    if max_value > EPSILON {
        for value in &mut envelope {
            *value /= max_value;
        }
    }

    log::debug!(
        "Onset series: {} frames at {:.4}s hop, peak raw value {:.6}",
        envelope.len(),
        hop_seconds,
        max_value
    );

    Ok(OnsetSeries {
        envelope,
        hop_seconds,
    })
}
