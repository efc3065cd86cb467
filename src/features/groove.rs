//! Swing and groove analysis
//!
//! Measures how far hihat and snare hits land from a straight sixteenth
//! grid. Off-beat (odd) sixteenth positions define swing: consistently late
//! off-beats give a positive swing factor, rushed ones negative. The output
//! is descriptive; its only contract is determinism for identical input.

use crate::analysis::result::{GrooveProfile, Transient, TransientType, PATTERN_STEPS};
use crate::error::AnalysisError;

/// Deviation seconds to swing-factor scale
const SWING_SCALE: f32 = 10.0;

/// Sixteenth notes per beat
const STEPS_PER_BEAT: f32 = 4.0;

/// Beats per bar (4/4 assumed throughout)
const BEATS_PER_BAR: f32 = 4.0;

/// Derives the groove profile from timing deviations of hihat and snare
/// hits against the beat grid.
///
/// Kicks anchor the grid and are excluded; only hihat and snare carry the
/// swing feel. With no qualifying transient the profile is the straight
/// default (swing 0, all pattern values 0.5).
///
/// # Arguments
///
/// * `transients` - Detected transients, ordered by time
/// * `bpm` - Estimated tempo
///
/// # Errors
///
/// Returns an error if `bpm` is zero.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::groove::analyze_groove;
///
/// let groove = analyze_groove(&[], 120)?;
/// assert_eq!(groove.swing_factor, 0.0);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn analyze_groove(transients: &[Transient], bpm: u32) -> Result<GrooveProfile, AnalysisError> {
    if bpm == 0 {
        return Err(AnalysisError::InvalidInput(
            "BPM must be positive".to_string(),
        ));
    }

    let beat_duration = 60.0 / bpm as f32;
    let sixteenth = beat_duration / STEPS_PER_BEAT;
    let bar_duration = beat_duration * BEATS_PER_BAR;

    let mut profile = GrooveProfile::default();
    let mut offbeat_deviations: Vec<f32> = Vec::new();

    for transient in transients {
        if !matches!(
            transient.transient_type,
            TransientType::Hihat | TransientType::Snare
        ) {
            continue;
        }

        // Signed deviation from the nearest sixteenth within the beat
        let position_in_beat = transient.time % beat_duration;
        let nearest = (position_in_beat / sixteenth).round();
        let deviation = position_in_beat - nearest * sixteenth;

        // Index 4 is the next beat's downbeat
        let beat_step = (nearest as usize) % STEPS_PER_BEAT as usize;
        if beat_step % 2 == 1 {
            offbeat_deviations.push(deviation);
        }

        let bar_step =
            ((transient.time % bar_duration) / sixteenth).round() as usize % PATTERN_STEPS;
        let felt = (0.5 + deviation).max(0.5);
        profile.groove_pattern[bar_step] = profile.groove_pattern[bar_step].max(felt);
    }

    if !offbeat_deviations.is_empty() {
        let mean: f32 = offbeat_deviations.iter().sum::<f32>() / offbeat_deviations.len() as f32;
        profile.swing_factor = (mean * SWING_SCALE).clamp(-0.5, 0.5);
    }

    log::debug!(
        "Groove: swing {:.3} from {} off-beat hits",
        profile.swing_factor,
        offbeat_deviations.len()
    );

    Ok(profile)
}
