//! Energy-derivative section segmentation
//!
//! Walks the smoothed energy profile and classifies each position with a
//! fixed priority cascade: track position first (intro/outro), then sharp
//! energy derivatives (drop/buildup/breakdown), then absolute energy bands
//! (chorus/prechorus/verse/bridge). A boundary commits only when the
//! candidate type changes and both the elapsed and the remaining time
//! exceed the minimum section length, so labels cannot flap. Silent
//! stretches never open a new section.
//!
//! The output is always contiguous and covers [0, duration] exactly; with
//! no committed boundary the whole track is one section.

use crate::analysis::result::{Section, SectionMood, SectionType, Transient};
use crate::error::AnalysisError;

/// Small value to prevent division by zero
const EPSILON: f32 = 1e-10;

/// Track share classified as intro regardless of energy
const INTRO_PORTION: f32 = 0.08;

/// Track position beyond which everything is outro
const OUTRO_PORTION: f32 = 0.92;

/// Smoothed-energy rise that marks a drop
const DROP_RISE: f32 = 0.25;

/// Smoothed-energy rise that marks a buildup
const BUILDUP_RISE: f32 = 0.12;

/// Smoothed-energy fall that marks a breakdown
const BREAKDOWN_FALL: f32 = -0.2;

/// Energy floor for a chorus
const CHORUS_ENERGY: f32 = 0.75;

/// Energy floor for a prechorus
const PRECHORUS_ENERGY: f32 = 0.55;

/// Energy floor for a verse
const VERSE_ENERGY: f32 = 0.35;

/// Energy below which a bin counts as silence and keeps the current label
const SILENCE_FLOOR: f32 = 1e-3;

/// Neighbor radius of the profile smoothing window
const SMOOTHING_RADIUS: usize = 1;

/// Transient-density weight in the intensity blend
const DENSITY_WEIGHT: f32 = 0.3;

/// Priority cascade for the candidate label at one profile position
fn classify(position: f32, energy: f32, change: f32) -> SectionType {
    if position < INTRO_PORTION {
        SectionType::Intro
    } else if position > OUTRO_PORTION {
        SectionType::Outro
    } else if change > DROP_RISE {
        SectionType::Drop
    } else if change > BUILDUP_RISE {
        SectionType::Buildup
    } else if change < BREAKDOWN_FALL {
        SectionType::Breakdown
    } else if energy > CHORUS_ENERGY {
        SectionType::Chorus
    } else if energy > PRECHORUS_ENERGY {
        SectionType::Prechorus
    } else if energy > VERSE_ENERGY {
        SectionType::Verse
    } else {
        SectionType::Bridge
    }
}

/// Deterministic mood from the section label and its energy
fn mood_for(section_type: SectionType, energy: f32) -> SectionMood {
    match section_type {
        SectionType::Intro | SectionType::Outro => SectionMood::Calm,
        SectionType::Verse => SectionMood::Mellow,
        SectionType::Bridge => {
            if energy < 0.3 {
                SectionMood::Dark
            } else {
                SectionMood::Mellow
            }
        }
        SectionType::Prechorus => SectionMood::Driving,
        SectionType::Buildup => SectionMood::Tense,
        SectionType::Chorus => SectionMood::Euphoric,
        SectionType::Drop => {
            if energy > 0.8 {
                SectionMood::Euphoric
            } else {
                SectionMood::Driving
            }
        }
        SectionType::Breakdown => SectionMood::Dark,
    }
}

/// Segments the track into labeled structural sections.
///
/// # Arguments
///
/// * `profile` - Normalized energy profile spanning the full duration
/// * `transients` - Detected transients (drives section intensity only)
/// * `duration` - Track duration in seconds
/// * `min_section_seconds` - Minimum committed section length
///
/// # Returns
///
/// Sections sorted by time, contiguous, covering exactly [0, duration]
///
/// # Errors
///
/// Returns an error if the profile is empty or the duration is not
/// positive.
///
/// # Example
///
/// ```no_run
/// use remix_dsp::features::structure::segment_sections;
///
/// let profile = vec![0.0f32; 32];
/// let sections = segment_sections(&profile, &[], 5.0, 2.0)?;
/// assert_eq!(sections.len(), 1);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn segment_sections(
    profile: &[f32],
    transients: &[Transient],
    duration: f32,
    min_section_seconds: f32,
) -> Result<Vec<Section>, AnalysisError> {
    if profile.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty energy profile".to_string(),
        ));
    }
    if duration <= 0.0 {
        return Err(AnalysisError::InvalidInput(
            "Duration must be positive".to_string(),
        ));
    }
    if min_section_seconds < 0.0 {
        return Err(AnalysisError::InvalidInput(
            "Minimum section length must be non-negative".to_string(),
        ));
    }

    let smoothed: Vec<f32> = (0..profile.len())
        .map(|i| {
            let lo = i.saturating_sub(SMOOTHING_RADIUS);
            let hi = (i + SMOOTHING_RADIUS).min(profile.len() - 1);
            profile[lo..=hi].iter().sum::<f32>() / (hi - lo + 1) as f32
        })
        .collect();

    let bin_time = |i: usize| i as f32 * duration / profile.len() as f32;

    // Walk the profile, committing a span whenever the candidate label
    // changes and both sides of the boundary are long enough
    let mut spans: Vec<(usize, usize, SectionType)> = Vec::new();
    let mut current_type = classify(0.0, smoothed[0], 0.0);
    let mut span_start_bin = 0usize;

    for i in 1..profile.len() {
        let energy = smoothed[i];
        let change = smoothed[i] - smoothed[i - 1];

        // Silence carries the current label forward
        if energy <= SILENCE_FLOOR && change.abs() <= SILENCE_FLOOR {
            continue;
        }

        let position = i as f32 / profile.len() as f32;
        let candidate = classify(position, energy, change);
        if candidate == current_type {
            continue;
        }

        let elapsed = bin_time(i) - bin_time(span_start_bin);
        let remaining = duration - bin_time(i);
        if elapsed > min_section_seconds && remaining > min_section_seconds {
            spans.push((span_start_bin, i, current_type));
            span_start_bin = i;
            current_type = candidate;
        }
    }
    spans.push((span_start_bin, profile.len(), current_type));

    // Transient density normalizer for the intensity blend
    let densities: Vec<f32> = spans
        .iter()
        .map(|&(start_bin, end_bin, _)| {
            let start = bin_time(start_bin);
            let end = if end_bin == profile.len() {
                duration
            } else {
                bin_time(end_bin)
            };
            let count = transients
                .iter()
                .filter(|t| t.time >= start && t.time < end)
                .count();
            count as f32 / (end - start).max(EPSILON)
        })
        .collect();
    let max_density = densities.iter().fold(0.0f32, |a, &b| a.max(b));

    let sections: Vec<Section> = spans
        .iter()
        .zip(densities.iter())
        .map(|(&(start_bin, end_bin, section_type), &density)| {
            let start = bin_time(start_bin);
            let end = if end_bin == profile.len() {
                duration
            } else {
                bin_time(end_bin)
            };

            let energy = smoothed[start_bin..end_bin].iter().sum::<f32>()
                / (end_bin - start_bin) as f32;
            let density_share = if max_density > EPSILON {
                density / max_density
            } else {
                0.0
            };
            let intensity =
                ((1.0 - DENSITY_WEIGHT) * energy + DENSITY_WEIGHT * density_share).clamp(0.0, 1.0);

            Section {
                start,
                end,
                section_type,
                energy: energy.clamp(0.0, 1.0),
                intensity,
                mood: mood_for(section_type, energy),
            }
        })
        .collect();

    log::debug!(
        "Sections: {} spans over {:.1}s",
        sections.len(),
        duration
    );

    Ok(sections)
}
