//! One-pole filter bank for banded frame energy
//!
//! Splits a signal into low/mid/high bands with two one-pole low-pass
//! filters run in a single pass: low = lp(low_cutoff), mid = lp(high_cutoff)
//! - lp(low_cutoff), high = input - lp(high_cutoff). The band signals are
//! then framed at a fixed rate and reduced to mean absolute energy per
//! frame. Gentle 6 dB/octave slopes are enough here: the detector only
//! compares relative band magnitudes.

use crate::error::AnalysisError;

/// Per-frame mean absolute energy for three bands
#[derive(Debug, Clone)]
pub struct BandEnergies {
    /// Energy below the low crossover
    pub low: Vec<f32>,

    /// Energy between the crossovers
    pub mid: Vec<f32>,

    /// Energy above the high crossover
    pub high: Vec<f32>,

    /// Time step between consecutive frames in seconds
    pub hop_seconds: f32,
}

impl BandEnergies {
    /// Number of frames
    pub fn len(&self) -> usize {
        self.low.len()
    }

    /// True if no complete frame fit in the signal
    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }
}

/// One-pole low-pass coefficient for a cutoff frequency
fn one_pole_alpha(cutoff_hz: f32, sample_rate: u32) -> f32 {
    1.0 - (-2.0 * std::f32::consts::PI * cutoff_hz / sample_rate as f32).exp()
}

/// Computes per-frame low/mid/high band energies.
///
/// Frames are non-overlapping, `sample_rate / frame_rate_hz` samples each;
/// the trailing partial frame is dropped.
///
/// # Arguments
///
/// * `samples` - Audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_rate_hz` - Frame rate of the output series (typically 150)
/// * `low_crossover_hz` - Boundary between low and mid bands
/// * `high_crossover_hz` - Boundary between mid and high bands
///
/// # Errors
///
/// Returns an error if the signal is empty, a rate is zero, or the
/// crossovers are not ordered `0 < low < high < Nyquist`.
pub fn band_energies(
    samples: &[f32],
    sample_rate: u32,
    frame_rate_hz: u32,
    low_crossover_hz: f32,
    high_crossover_hz: f32,
) -> Result<BandEnergies, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio signal".to_string(),
        ));
    }
    if sample_rate == 0 || frame_rate_hz == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate and frame rate must be positive".to_string(),
        ));
    }
    let nyquist = sample_rate as f32 / 2.0;
    if low_crossover_hz <= 0.0 || low_crossover_hz >= high_crossover_hz || high_crossover_hz >= nyquist
    {
        return Err(AnalysisError::InvalidInput(format!(
            "Crossovers must satisfy 0 < {} < {} < {}",
            low_crossover_hz, high_crossover_hz, nyquist
        )));
    }

    let hop_size = ((sample_rate / frame_rate_hz) as usize).max(1);
    let hop_seconds = hop_size as f32 / sample_rate as f32;
    let num_frames = samples.len() / hop_size;

    let alpha_low = one_pole_alpha(low_crossover_hz, sample_rate);
    let alpha_high = one_pole_alpha(high_crossover_hz, sample_rate);

    let mut low = Vec::with_capacity(num_frames);
    let mut mid = Vec::with_capacity(num_frames);
    let mut high = Vec::with_capacity(num_frames);

    // Filter state persists across frames: the bank runs once over the
    // whole signal, framing only the accumulation
    let mut lp_low_state = 0.0f32;
    let mut lp_high_state = 0.0f32;

    for frame_index in 0..num_frames {
        let frame = &samples[frame_index * hop_size..(frame_index + 1) * hop_size];

        let mut low_sum = 0.0f32;
        let mut mid_sum = 0.0f32;
        let mut high_sum = 0.0f32;
        for &x in frame {
            lp_low_state += alpha_low * (x - lp_low_state);
            lp_high_state += alpha_high * (x - lp_high_state);

            low_sum += lp_low_state.abs();
            mid_sum += (lp_high_state - lp_low_state).abs();
            high_sum += (x - lp_high_state).abs();
        }

        low.push(low_sum / hop_size as f32);
        mid.push(mid_sum / hop_size as f32);
        high.push(high_sum / hop_size as f32);
    }

    log::debug!(
        "Filter bank: {} frames, crossovers {:.0}/{:.0} Hz",
        num_frames,
        low_crossover_hz,
        high_crossover_hz
    );

    Ok(BandEnergies {
        low,
        mid,
        high,
        hop_seconds,
    })
}
