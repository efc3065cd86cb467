//! Six-band spectral balance
//!
//! Buckets FFT bin energy into bass, low-mid, mid, high-mid, high, and
//! presence bands across a bounded set of analysis frames, then normalizes
//! the buckets into ratios summing to 1.

use crate::analysis::result::SpectralBalance;
use crate::error::AnalysisError;
use crate::features::spectral::spectrum::magnitude_frames;

/// Band boundaries in Hz: bass < 100 < low-mid < 300 < mid < 1000 <
/// high-mid < 4000 < high < 10000 < presence
const BAND_EDGES_HZ: [f32; 5] = [100.0, 300.0, 1000.0, 4000.0, 10000.0];

/// Total band energy below this is treated as silence
const SILENCE_TOTAL: f32 = 1e-8;

/// Computes the six-band energy distribution of a signal.
///
/// The DC bin is skipped. For silent input the distribution is uniform so
/// the components still sum to 1.
///
/// # Arguments
///
/// * `samples` - Audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT size in samples
/// * `max_frames` - Upper bound on analysis frames
///
/// # Errors
///
/// Returns an error if the signal is empty or a parameter is zero.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::spectral::compute_spectral_balance;
///
/// let samples = vec![0.0f32; 44100];
/// let balance = compute_spectral_balance(&samples, 44100, 2048, 64)?;
/// let sum: f32 = balance.as_array().iter().sum();
/// assert!((sum - 1.0).abs() < 1e-3);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn compute_spectral_balance(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    max_frames: usize,
) -> Result<SpectralBalance, AnalysisError> {
    let frames = magnitude_frames(samples, sample_rate, frame_size, max_frames)?;

    let mut buckets = [0.0f32; 6];
    for frame in &frames.magnitudes {
        for (bin, &magnitude) in frame.iter().enumerate().skip(1) {
            let freq = bin as f32 * frames.bin_hz;
            let bucket = BAND_EDGES_HZ.iter().filter(|&&edge| freq >= edge).count();
            buckets[bucket] += magnitude * magnitude;
        }
    }

    let total: f32 = buckets.iter().sum();
    if total < SILENCE_TOTAL {
        log::debug!("Spectral balance: silent input, uniform distribution");
        return Ok(SpectralBalance::uniform());
    }

    for bucket in &mut buckets {
        *bucket /= total;
    }

    log::debug!(
        "Spectral balance: bass {:.3}, mid {:.3}, high {:.3}",
        buckets[0],
        buckets[2],
        buckets[4]
    );

    Ok(SpectralBalance {
        bass: buckets[0],
        low_mid: buckets[1],
        mid: buckets[2],
        high_mid: buckets[3],
        high: buckets[4],
        presence: buckets[5],
    })
}
