//! Track-level derived metrics
//!
//! Small deterministic summaries computed from already-extracted features:
//! rhythm complexity from the quantized drum pattern, and harmonic character
//! from the pitch-class histogram. Both are heuristic scores in [0, 1] meant
//! for displays and remix-prompt building, not musicological claims.

use crate::analysis::result::{DrumPattern, HarmonicCharacter, PATTERN_STEPS};

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Weight of grid occupancy in the complexity blend
const OCCUPANCY_WEIGHT: f32 = 0.6;

/// Weight of off-beat syncopation in the complexity blend
const SYNCOPATION_WEIGHT: f32 = 0.4;

/// Tritone co-occurrence counts half as much as semitone clash
const TRITONE_WEIGHT: f32 = 0.5;

/// Scale applied to the raw clash sum before clamping
const DISSONANCE_SCALE: f32 = 6.0;

/// Computes rhythm complexity from the quantized drum pattern.
///
/// Blends two signals: how many of the 16 grid steps carry at least one
/// active voice (occupancy), and what share of active cells sit off the
/// quarter-note positions (syncopation). An empty pattern scores 0.
///
/// # Returns
///
/// Complexity score in [0, 1]
pub fn rhythm_complexity(pattern: &DrumPattern) -> f32 {
    let mut occupied_steps = 0usize;
    let mut active_cells = 0usize;
    let mut offbeat_cells = 0usize;

    for step in 0..PATTERN_STEPS {
        let mut step_active = false;
        for row in &pattern.steps {
            if row[step] {
                step_active = true;
                active_cells += 1;
                // Quarter notes land on steps 0, 4, 8, 12
                if step % 4 != 0 {
                    offbeat_cells += 1;
                }
            }
        }
        if step_active {
            occupied_steps += 1;
        }
    }

    if active_cells == 0 {
        return 0.0;
    }

    let occupancy = occupied_steps as f32 / PATTERN_STEPS as f32;
    let syncopation = offbeat_cells as f32 / active_cells as f32;

    (OCCUPANCY_WEIGHT * occupancy + SYNCOPATION_WEIGHT * syncopation).clamp(0.0, 1.0)
}

/// Computes harmonic character from the pitch-class histogram and the key
/// correlation achieved by the estimator.
///
/// Dissonance counts co-occurrence of adjacent semitones and tritone pairs in
/// the normalized histogram; harmoniousness blends the (non-negative) key
/// correlation with the absence of that clash. A silent histogram yields a
/// neutral 0.5/0.5 character.
///
/// # Arguments
///
/// * `histogram` - Pitch-class energy histogram (index 0 = C)
/// * `key_correlation` - Pearson correlation of the winning key template
pub fn harmonic_character(histogram: &[f32; 12], key_correlation: f32) -> HarmonicCharacter {
    let total: f32 = histogram.iter().sum();
    if total < EPSILON {
        return HarmonicCharacter::neutral();
    }

    let mut normalized = [0.0f32; 12];
    for (norm, &value) in normalized.iter_mut().zip(histogram.iter()) {
        *norm = value / total;
    }

    let mut semitone_clash = 0.0f32;
    let mut tritone_clash = 0.0f32;
    for i in 0..12 {
        semitone_clash += normalized[i] * normalized[(i + 1) % 12];
        tritone_clash += normalized[i] * normalized[(i + 6) % 12];
    }

    let dissonance =
        ((semitone_clash + TRITONE_WEIGHT * tritone_clash) * DISSONANCE_SCALE).clamp(0.0, 1.0);
    let harmoniousness = (0.5 * key_correlation.max(0.0) + 0.5 * (1.0 - dissonance)).clamp(0.0, 1.0);

    HarmonicCharacter {
        harmoniousness,
        dissonance,
    }
}
