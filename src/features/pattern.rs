//! Drum pattern extraction
//!
//! Folds every classified transient onto a single 4/4 bar of sixteenths at
//! the estimated tempo. Each grid cell keeps the strongest strength mapped
//! to it across the whole track; the exported on/off grid is the same grid
//! binarized by a threshold.

use crate::analysis::result::{DrumPattern, Transient, TransientType, PATTERN_STEPS};
use crate::error::AnalysisError;

/// Sequencer row for each percussive voice
fn row_for(transient_type: TransientType) -> usize {
    match transient_type {
        TransientType::Kick => 0,
        TransientType::Snare => 1,
        TransientType::Hihat | TransientType::Perc => 2,
        TransientType::Clap | TransientType::Other => 3,
    }
}

/// Quantizes transients into the 4-voice, 16-step drum pattern.
///
/// Transient times are taken modulo one bar (4 beats at `bpm`) and rounded
/// to the nearest sixteenth step; the final step wraps to step 0. With no
/// transients the pattern is empty.
///
/// # Arguments
///
/// * `transients` - Detected transients, strengths in [0, 1]
/// * `bpm` - Estimated tempo
/// * `threshold` - Velocity above which a cell reads as on
///
/// # Errors
///
/// Returns an error if `bpm` is zero or the threshold is outside [0, 1].
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::pattern::extract_pattern;
///
/// let pattern = extract_pattern(&[], 120, 0.2)?;
/// assert!(pattern.is_empty());
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn extract_pattern(
    transients: &[Transient],
    bpm: u32,
    threshold: f32,
) -> Result<DrumPattern, AnalysisError> {
    if bpm == 0 {
        return Err(AnalysisError::InvalidInput(
            "BPM must be positive".to_string(),
        ));
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(AnalysisError::InvalidInput(format!(
            "Pattern threshold must be in [0, 1], got {}",
            threshold
        )));
    }

    let beat_duration = 60.0 / bpm as f32;
    let bar_duration = beat_duration * 4.0;
    let step_duration = bar_duration / PATTERN_STEPS as f32;

    let mut pattern = DrumPattern::empty();
    for transient in transients {
        let position = transient.time % bar_duration;
        let step = (position / step_duration).round() as usize % PATTERN_STEPS;
        let row = row_for(transient.transient_type);
        pattern.velocities[row][step] = pattern.velocities[row][step].max(transient.strength);
    }

    for row in 0..pattern.velocities.len() {
        for step in 0..PATTERN_STEPS {
            pattern.steps[row][step] = pattern.velocities[row][step] > threshold;
        }
    }

    log::debug!(
        "Pattern: {} transients onto {} active cells",
        transients.len(),
        pattern
            .steps
            .iter()
            .flatten()
            .filter(|&&active| active)
            .count()
    );

    Ok(pattern)
}
