//! Key estimation by template correlation
//!
//! Builds a 12-bin pitch-class energy histogram from spectrum frames
//! restricted to the musical range, then picks the scale template and
//! rotation with the highest Pearson correlation against the histogram
//! (4 templates x 12 rotations = 48 candidates).
//!
//! # Reference
//!
//! Krumhansl, C. L., & Kessler, E. J. (1982). Tracing the Dynamic Changes
//! in Perceived Tonal Organization in a Spatial Representation of Musical
//! Keys. *Psychological Review*, 89(4), 334-368.

use crate::analysis::result::{KeyEstimate, PitchClass, ScaleType};
use crate::error::AnalysisError;
use crate::features::key::templates::TEMPLATES;
use crate::features::spectral::spectrum::magnitude_frames;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Lower edge of the pitch range fed into the histogram
const MIN_PITCH_HZ: f32 = 50.0;

/// Upper edge of the pitch range fed into the histogram
const MAX_PITCH_HZ: f32 = 2000.0;

/// Key estimate with the evidence behind it
#[derive(Debug, Clone)]
pub struct KeyAnalysis {
    /// Winning root and scale
    pub estimate: KeyEstimate,

    /// Pearson correlation of the winning candidate
    pub correlation: f32,

    /// Pitch-class energy histogram (index 0 = C)
    pub histogram: [f32; 12],
}

/// Pearson correlation between two 12-element profiles
fn pearson(x: &[f32; 12], y: &[f32; 12]) -> f32 {
    let n = 12.0f32;
    let mean_x: f32 = x.iter().sum::<f32>() / n;
    let mean_y: f32 = y.iter().sum::<f32>() / n;

    let mut covariance = 0.0f32;
    let mut variance_x = 0.0f32;
    let mut variance_y = 0.0f32;
    for i in 0..12 {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        variance_x += dx * dx;
        variance_y += dy * dy;
    }

    let denominator = (variance_x * variance_y).sqrt();
    if denominator < EPSILON {
        return 0.0;
    }
    covariance / denominator
}

/// Estimates the key of a signal.
///
/// Frame spectra are restricted to 50-2000 Hz; each bin's energy lands in
/// the pitch class of its nearest equal-tempered semitone. A silent or
/// atonal signal (no candidate with positive correlation) reports
/// `ScaleType::Unknown` rooted at C with zero correlation.
///
/// # Arguments
///
/// * `samples` - Audio samples (typically the reference channel)
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT size in samples (typically 8192)
/// * `max_frames` - Upper bound on analysis frames
///
/// # Errors
///
/// Returns an error if the signal is empty or a parameter is zero.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::key::estimate_key;
///
/// let samples = vec![0.0f32; 44100 * 5];
/// let key = estimate_key(&samples, 44100, 8192, 32)?;
/// println!("{} ({:.2})", key.estimate.name(), key.correlation);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn estimate_key(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    max_frames: usize,
) -> Result<KeyAnalysis, AnalysisError> {
    let frames = magnitude_frames(samples, sample_rate, frame_size, max_frames)?;

    let mut histogram = [0.0f32; 12];
    for frame in &frames.magnitudes {
        for (bin, &magnitude) in frame.iter().enumerate() {
            let freq = bin as f32 * frames.bin_hz;
            if !(MIN_PITCH_HZ..=MAX_PITCH_HZ).contains(&freq) {
                continue;
            }
            // Nearest equal-tempered semitone, folded to a pitch class
            let midi = (69.0 + 12.0 * (freq / 440.0).log2()).round() as i32;
            let pitch_class = ((midi % 12) + 12) % 12;
            histogram[pitch_class as usize] += magnitude * magnitude;
        }
    }

    let total: f32 = histogram.iter().sum();
    if total < EPSILON {
        log::debug!("Key: silent input, no tonality");
        return Ok(KeyAnalysis {
            estimate: KeyEstimate {
                root: PitchClass::C,
                scale: ScaleType::Unknown,
            },
            correlation: 0.0,
            histogram,
        });
    }

    let mut best_correlation = 0.0f32;
    let mut best_root = 0usize;
    let mut best_scale = ScaleType::Unknown;

    for (scale, template) in TEMPLATES {
        for rotation in 0..12 {
            let mut rotated = [0.0f32; 12];
            for (degree, slot) in rotated.iter_mut().enumerate() {
                *slot = histogram[(degree + rotation) % 12];
            }

            let correlation = pearson(&rotated, template);
            if correlation > best_correlation {
                best_correlation = correlation;
                best_root = rotation;
                best_scale = scale;
            }
        }
    }

    let estimate = if best_scale == ScaleType::Unknown {
        KeyEstimate {
            root: PitchClass::C,
            scale: ScaleType::Unknown,
        }
    } else {
        KeyEstimate {
            root: PitchClass::from_index(best_root),
            scale: best_scale,
        }
    };

    log::debug!(
        "Key: {} with correlation {:.3}",
        estimate.name(),
        best_correlation
    );

    Ok(KeyAnalysis {
        estimate,
        correlation: best_correlation,
        histogram,
    })
}
