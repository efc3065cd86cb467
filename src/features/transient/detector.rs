//! Transient detection and percussive classification
//!
//! Fires a transient wherever the summed rise of the three band energies
//! crosses a threshold, then classifies the hit from the relative low/mid/
//! high rise at the firing frame. Near-duplicate detections within the
//! minimum gap are collapsed, keeping the earlier one.
//!
//! # Algorithm
//!
//! 1. Band energies per frame from the one-pole filter bank
//! 2. Band onset[i] = max(0, energy[i] - energy[i-1]) per band
//! 3. Fire when low + mid + high onset exceeds the threshold
//! 4. Classify by priority: kick, snare, hihat, clap, perc, other
//! 5. Drop detections within the minimum gap of the previous kept one
//! 6. Normalize strengths so the strongest kept hit is 1

use crate::analysis::result::{Transient, TransientType};
use crate::error::AnalysisError;
use crate::features::transient::filterbank::band_energies;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Fraction of the mid rise that the high rise must reach for a snare
const SNARE_HIGH_RATIO: f32 = 0.5;

/// Fraction of the mid rise that the low rise must stay under for a clap
const CLAP_LOW_RATIO: f32 = 0.3;

/// Share of total rise in mid+high that marks generic percussion
const PERC_SHARE: f32 = 0.6;

/// Detection parameters
#[derive(Debug, Clone)]
pub struct DetectorSettings {
    /// Analysis frame rate in Hz
    pub frame_rate_hz: u32,

    /// Summed band-onset level that fires a detection
    pub threshold: f32,

    /// Minimum gap between kept transients in milliseconds
    pub min_gap_ms: f32,

    /// Boundary between low and mid bands in Hz
    pub low_crossover_hz: f32,

    /// Boundary between mid and high bands in Hz
    pub high_crossover_hz: f32,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            frame_rate_hz: 150,
            threshold: 0.05,
            min_gap_ms: 30.0,
            low_crossover_hz: 200.0,
            high_crossover_hz: 2000.0,
        }
    }
}

/// Classifies a detection from the band rises at the firing frame
fn classify(low: f32, mid: f32, high: f32) -> TransientType {
    let total = low + mid + high;
    if low > mid && low > high {
        TransientType::Kick
    } else if mid > low && mid >= high && high >= SNARE_HIGH_RATIO * mid {
        TransientType::Snare
    } else if high > mid && high > low {
        TransientType::Hihat
    } else if mid > high && low < CLAP_LOW_RATIO * mid {
        TransientType::Clap
    } else if total > EPSILON && (mid + high) / total > PERC_SHARE {
        TransientType::Perc
    } else {
        TransientType::Other
    }
}

/// Detects and classifies percussive transients in a signal.
///
/// Returns hits ordered by strictly increasing time, no two closer than the
/// minimum gap, with strengths normalized so the strongest is 1. A silent
/// signal produces an empty list, never an error.
///
/// # Arguments
///
/// * `samples` - Audio samples (typically the reference channel)
/// * `sample_rate` - Sample rate in Hz
/// * `settings` - Detection parameters
///
/// # Errors
///
/// Returns an error if the signal is empty or the settings are invalid.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::transient::{detect_transients, DetectorSettings};
///
/// let samples = vec![0.0f32; 44100];
/// let transients = detect_transients(&samples, 44100, &DetectorSettings::default())?;
/// assert!(transients.is_empty());
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn detect_transients(
    samples: &[f32],
    sample_rate: u32,
    settings: &DetectorSettings,
) -> Result<Vec<Transient>, AnalysisError> {
    if settings.threshold < 0.0 {
        return Err(AnalysisError::InvalidInput(
            "Detection threshold must be non-negative".to_string(),
        ));
    }
    if settings.min_gap_ms < 0.0 {
        return Err(AnalysisError::InvalidInput(
            "Minimum transient gap must be non-negative".to_string(),
        ));
    }

    let bands = band_energies(
        samples,
        sample_rate,
        settings.frame_rate_hz,
        settings.low_crossover_hz,
        settings.high_crossover_hz,
    )?;

    let mut candidates: Vec<Transient> = Vec::new();
    let mut prev_low = 0.0f32;
    let mut prev_mid = 0.0f32;
    let mut prev_high = 0.0f32;

    for i in 0..bands.len() {
        let low_rise = (bands.low[i] - prev_low).max(0.0);
        let mid_rise = (bands.mid[i] - prev_mid).max(0.0);
        let high_rise = (bands.high[i] - prev_high).max(0.0);
        prev_low = bands.low[i];
        prev_mid = bands.mid[i];
        prev_high = bands.high[i];

        let total_rise = low_rise + mid_rise + high_rise;
        if total_rise <= settings.threshold {
            continue;
        }

        let transient_type = classify(low_rise, mid_rise, high_rise);
        candidates.push(Transient {
            time: i as f32 * bands.hop_seconds,
            strength: total_rise,
            transient_type,
            frequency: transient_type.nominal_frequency_hz(),
        });
    }

    // Collapse near-duplicates, keeping the earlier detection
    let min_gap_s = settings.min_gap_ms / 1000.0;
    let mut transients: Vec<Transient> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if let Some(last) = transients.last() {
            if candidate.time - last.time < min_gap_s {
                continue;
            }
        }
        transients.push(candidate);
    }

    let max_strength = transients.iter().map(|t| t.strength).fold(0.0f32, f32::max);
    if max_strength > EPSILON {
        for transient in &mut transients {
            transient.strength /= max_strength;
        }
    }

    log::debug!(
        "Transients: {} kept, peak raw strength {:.4}",
        transients.len(),
        max_strength
    );

    Ok(transients)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: u32 = 44100;

    /// Decaying sine burst added into the buffer at the given time
    fn add_burst(samples: &mut [f32], time_s: f32, freq: f32, amplitude: f32, decay: f32) {
        let start = (time_s * SAMPLE_RATE as f32) as usize;
        let length = (0.15 * SAMPLE_RATE as f32) as usize;
        for i in 0..length {
            let idx = start + i;
            if idx >= samples.len() {
                break;
            }
            let t = i as f32 / SAMPLE_RATE as f32;
            let envelope = (-t * decay).exp();
            samples[idx] += amplitude * envelope * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    }

    fn add_kick(samples: &mut [f32], time_s: f32) {
        add_burst(samples, time_s, 60.0, 0.8, 8.0);
    }

    fn add_hihat(samples: &mut [f32], time_s: f32) {
        add_burst(samples, time_s, 6000.0, 0.6, 40.0);
    }

    fn add_snare(samples: &mut [f32], time_s: f32) {
        add_burst(samples, time_s, 400.0, 0.7, 15.0);
        add_burst(samples, time_s, 4000.0, 0.42, 15.0);
    }

    #[test]
    fn test_silent_signal_no_transients() {
        let samples = vec![0.0f32; SAMPLE_RATE as usize];
        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();
        assert!(transients.is_empty());
    }

    #[test]
    fn test_single_kick_detected() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize];
        add_kick(&mut samples, 0.5);

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        assert_eq!(transients.len(), 1);
        assert_eq!(transients[0].transient_type, TransientType::Kick);
        assert!((transients[0].time - 0.5).abs() < 0.02);
        assert!((transients[0].strength - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_hihat_detected() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize];
        add_hihat(&mut samples, 0.25);

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        assert_eq!(transients.len(), 1);
        assert_eq!(transients[0].transient_type, TransientType::Hihat);
    }

    #[test]
    fn test_snare_detected() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize];
        add_snare(&mut samples, 0.25);

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        assert_eq!(transients.len(), 1);
        assert_eq!(transients[0].transient_type, TransientType::Snare);
    }

    #[test]
    fn test_near_duplicates_keep_earlier() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize];
        add_kick(&mut samples, 0.5);
        add_kick(&mut samples, 0.51);

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        assert_eq!(transients.len(), 1);
        assert!((transients[0].time - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_times_strictly_increasing() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize * 2];
        for i in 0..4 {
            add_kick(&mut samples, 0.1 + i as f32 * 0.4);
            add_hihat(&mut samples, 0.3 + i as f32 * 0.4);
        }

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        assert!(transients.len() >= 4);
        for pair in transients.windows(2) {
            assert!(pair[0].time < pair[1].time);
        }
    }

    #[test]
    fn test_strengths_normalized() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize * 2];
        add_kick(&mut samples, 0.2);
        add_hihat(&mut samples, 0.7);
        add_kick(&mut samples, 1.2);

        let transients =
            detect_transients(&samples, SAMPLE_RATE, &DetectorSettings::default()).unwrap();

        let max = transients.iter().map(|t| t.strength).fold(0.0f32, f32::max);
        assert!((max - 1.0).abs() < 1e-6);
        assert!(transients
            .iter()
            .all(|t| (0.0..=1.0).contains(&t.strength)));
    }

    #[test]
    fn test_empty_signal_fails() {
        let result = detect_transients(&[], SAMPLE_RATE, &DetectorSettings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_classify_kick() {
        assert_eq!(classify(1.0, 0.3, 0.1), TransientType::Kick);
    }

    #[test]
    fn test_classify_snare() {
        assert_eq!(classify(0.2, 1.0, 0.6), TransientType::Snare);
    }

    #[test]
    fn test_classify_hihat() {
        assert_eq!(classify(0.1, 0.3, 1.0), TransientType::Hihat);
    }

    #[test]
    fn test_classify_clap() {
        // Mid-dominant with suppressed lows and weak highs
        assert_eq!(classify(0.1, 1.0, 0.2), TransientType::Clap);
    }

    #[test]
    fn test_classify_perc() {
        // Mid-leaning but too much low for a clap, too little high for a snare
        assert_eq!(classify(0.5, 0.8, 0.3), TransientType::Perc);
    }

    #[test]
    fn test_classify_other() {
        // Low and mid tied with little high content fits no voice
        assert_eq!(classify(1.0, 1.0, 0.2), TransientType::Other);
    }
}
