//! Fallback analysis construction
//!
//! The orchestrator never surfaces an error to callers: when the pipeline
//! fails (invalid input, numerical breakdown, panic), it substitutes a
//! complete neutral analysis so downstream collaborators always have every
//! field populated. This module builds that substitute.

use crate::analysis::result::{
    Analysis, AnalysisMetadata, DrumPattern, GrooveProfile, HarmonicCharacter, KeyEstimate,
    PitchClass, ScaleType, Section, SectionMood, SectionType, SpectralBalance, TempoEstimate,
};

/// Tempo used when estimation fails or is too uncertain to trust
pub const FALLBACK_BPM: u32 = 120;

/// Confidence attached to the fallback tempo
pub const FALLBACK_CONFIDENCE: f32 = 0.5;

/// Builds a complete neutral analysis for a signal of the given duration.
///
/// Used when the pipeline cannot produce a real result. The tempo is 120 BPM,
/// the key is C Major, and the track is covered by a single moderate-energy
/// verse section. Grids and profiles are zeroed, the spectral balance is
/// uniform so its sum-to-one invariant still holds.
///
/// # Arguments
///
/// * `duration_seconds` - Audio duration (0 for an empty signal)
/// * `sample_rate` - Sample rate in Hz
/// * `profile_bins` - Length of the zeroed energy profile
pub fn fallback_analysis(duration_seconds: f32, sample_rate: u32, profile_bins: usize) -> Analysis {
    let sections = if duration_seconds > 0.0 {
        vec![Section {
            start: 0.0,
            end: duration_seconds,
            section_type: SectionType::Verse,
            energy: 0.5,
            intensity: 0.5,
            mood: SectionMood::Mellow,
        }]
    } else {
        Vec::new()
    };

    Analysis {
        tempo: TempoEstimate {
            bpm: FALLBACK_BPM,
            confidence: FALLBACK_CONFIDENCE,
        },
        transients: Vec::new(),
        groove: GrooveProfile::default(),
        key: KeyEstimate {
            root: PitchClass::C,
            scale: ScaleType::Major,
        },
        spectral_balance: SpectralBalance::uniform(),
        sections,
        drum_pattern: DrumPattern::empty(),
        energy_profile: vec![0.0; profile_bins],
        rhythm_complexity: 0.0,
        harmony: HarmonicCharacter::neutral(),
        metadata: AnalysisMetadata {
            duration_seconds,
            sample_rate,
            processing_time_ms: 0.0,
        },
    }
}
