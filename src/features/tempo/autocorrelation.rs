//! Autocorrelation tempo estimation
//!
//! Finds the dominant periodicity of the onset-strength envelope by
//! correlating it against time-shifted copies of itself over a lag range
//! derived from the BPM search range.
//!
//! # Algorithm
//!
//! 1. Convert [min_bpm, max_bpm] to a lag range in envelope frames
//! 2. For each lag: normalized dot product over a bounded window
//! 3. Best lag -> raw BPM; octave-fold (<85 doubled, >160 halved), clamp
//! 4. Confidence = min(1, best correlation * 2), a heuristic only
//!
//! # References
//!
//! - Ellis, D. (2007). "Beat tracking by dynamic programming." Journal of
//!   New Music Research.

use std::cmp::Ordering;

use crate::analysis::result::TempoEstimate;
use crate::error::AnalysisError;
use crate::features::onset::OnsetSeries;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Maximum comparisons per lag, for cost control
const COMPARISON_WINDOW: usize = 300;

/// Raw BPM below this is doubled (octave-error fold)
const OCTAVE_DOUBLE_BELOW: f32 = 85.0;

/// Raw BPM above this is halved (octave-error fold)
const OCTAVE_HALVE_ABOVE: f32 = 160.0;

/// Multiplier mapping best correlation to confidence
const CONFIDENCE_SCALE: f32 = 2.0;

/// Estimates tempo from an onset-strength envelope.
///
/// The winning lag is the numerically highest correlation; no smoothing is
/// applied across lags. An all-zero envelope yields the slowest searched lag
/// at zero confidence; callers should treat low confidence as unreliable
/// and substitute a fallback tempo.
///
/// # Arguments
///
/// * `onsets` - Onset series from [`compute_onset_series`]
/// * `min_bpm` - Lower bound of the BPM search range
/// * `max_bpm` - Upper bound of the BPM search range
///
/// # Returns
///
/// Tempo estimate with BPM folded and clamped into `[min_bpm, max_bpm]`
///
/// # Errors
///
/// Returns an error if the BPM range is invalid or collapses to an empty
/// lag range at this envelope's frame rate.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::onset::compute_onset_series;
/// use remix_dsp::features::tempo::estimate_tempo;
///
/// let samples = vec![0.0f32; 44100 * 10];
/// let onsets = compute_onset_series(&samples, 44100, 100)?;
/// let tempo = estimate_tempo(&onsets, 70.0, 180.0)?;
/// assert!(tempo.bpm >= 70 && tempo.bpm <= 180);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
///
/// [`compute_onset_series`]: crate::features::onset::compute_onset_series
pub fn estimate_tempo(
    onsets: &OnsetSeries,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<TempoEstimate, AnalysisError> {
    if min_bpm <= 0.0 || max_bpm <= min_bpm {
        return Err(AnalysisError::InvalidInput(format!(
            "Invalid BPM range: {} - {}",
            min_bpm, max_bpm
        )));
    }
    if onsets.hop_seconds <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "Onset hop duration must be positive".to_string(),
        ));
    }

    // Beat period in envelope frames: 60 / (bpm * hop_seconds)
    let lag_min = ((60.0 / (max_bpm * onsets.hop_seconds)).ceil() as usize).max(1);
    let lag_max = (60.0 / (min_bpm * onsets.hop_seconds)).floor() as usize;
    if lag_min > lag_max {
        return Err(AnalysisError::InvalidInput(format!(
            "BPM range {} - {} collapses to an empty lag range at {:.4}s hop",
            min_bpm, max_bpm, onsets.hop_seconds
        )));
    }

    // Slowest searched lag as the silent-input default, so the folded BPM
    // still lands in range when every correlation is zero
    let mut best_lag = lag_max;
    let mut best_correlation = 0.0f32;

    let envelope = &onsets.envelope;
    for lag in lag_min..=lag_max {
        let count = COMPARISON_WINDOW.min(envelope.len().saturating_sub(lag));
        if count == 0 {
            continue;
        }

        let mut dot = 0.0f32;
        let mut energy = 0.0f32;
        for i in 0..count {
            dot += envelope[i] * envelope[i + lag];
            energy += envelope[i] * envelope[i];
        }
        let correlation = dot / (energy + EPSILON);

        if correlation
            .partial_cmp(&best_correlation)
            .unwrap_or(Ordering::Equal)
            == Ordering::Greater
        {
            best_correlation = correlation;
            best_lag = lag;
        }
    }

    let raw_bpm = 60.0 / (best_lag as f32 * onsets.hop_seconds);
    let folded_bpm = if raw_bpm < OCTAVE_DOUBLE_BELOW {
        raw_bpm * 2.0
    } else if raw_bpm > OCTAVE_HALVE_ABOVE {
        raw_bpm / 2.0
    } else {
        raw_bpm
    };
    let bpm = folded_bpm.clamp(min_bpm, max_bpm).round() as u32;

    let confidence = (best_correlation * CONFIDENCE_SCALE).clamp(0.0, 1.0);

    log::debug!(
        "Tempo: lag {} ({} searched), raw {:.1} BPM, folded {} BPM, correlation {:.3}",
        best_lag,
        lag_max - lag_min + 1,
        raw_bpm,
        bpm,
        best_correlation
    );

    Ok(TempoEstimate { bpm, confidence })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::onset::compute_onset_series;

    fn generate_click_track(duration_s: f32, interval_s: f32, sample_rate: u32) -> Vec<f32> {
        let num_samples = (duration_s * sample_rate as f32) as usize;
        let mut samples = vec![0.0f32; num_samples];
        let interval_samples = (interval_s * sample_rate as f32) as usize;

        let mut pos = 0;
        while pos < num_samples {
            samples[pos] = 1.0;
            pos += interval_samples;
        }
        samples
    }

    fn series_from_clicks(interval_s: f32) -> crate::features::onset::OnsetSeries {
        let samples = generate_click_track(10.0, interval_s, 44100);
        compute_onset_series(&samples, 44100, 100).unwrap()
    }

    #[test]
    fn test_120_bpm_click_track() {
        let onsets = series_from_clicks(0.5);
        let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();

        assert!(
            (115..=125).contains(&tempo.bpm),
            "expected ~120 BPM, got {}",
            tempo.bpm
        );
        assert!(
            tempo.confidence > 0.5,
            "expected confident estimate, got {}",
            tempo.confidence
        );
    }

    #[test]
    fn test_all_zero_envelope_low_confidence() {
        let samples = vec![0.0f32; 44100 * 5];
        let onsets = compute_onset_series(&samples, 44100, 100).unwrap();
        let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();

        assert_eq!(tempo.confidence, 0.0);
        assert!((70..=180).contains(&tempo.bpm));
    }

    #[test]
    fn test_bpm_always_in_range() {
        for interval in [0.25f32, 0.333, 0.4, 0.5, 0.6, 0.75, 1.0] {
            let onsets = series_from_clicks(interval);
            let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();
            assert!(
                (70..=180).contains(&tempo.bpm),
                "interval {}s gave out-of-range {} BPM",
                interval,
                tempo.bpm
            );
        }
    }

    #[test]
    fn test_slow_track_octave_folded() {
        // Clicks every 0.75s (80 BPM); folding doubles it to 160
        let onsets = series_from_clicks(0.75);
        let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();
        assert!(
            (155..=165).contains(&tempo.bpm),
            "expected 80 BPM folded to ~160, got {}",
            tempo.bpm
        );
    }

    #[test]
    fn test_unaligned_period_degrades_gracefully() {
        // 60 BPM clicks have no aligned lag in the searched range; the
        // estimate stays in range with near-zero confidence
        let onsets = series_from_clicks(1.0);
        let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();
        assert!((70..=180).contains(&tempo.bpm));
        assert!(tempo.confidence < 0.2);
    }

    #[test]
    fn test_invalid_range_fails() {
        let onsets = series_from_clicks(0.5);
        assert!(estimate_tempo(&onsets, 180.0, 70.0).is_err());
        assert!(estimate_tempo(&onsets, 0.0, 180.0).is_err());
    }

    #[test]
    fn test_confidence_bounded() {
        let onsets = series_from_clicks(0.5);
        let tempo = estimate_tempo(&onsets, 70.0, 180.0).unwrap();
        assert!((0.0..=1.0).contains(&tempo.confidence));
    }
}
