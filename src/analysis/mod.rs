//! Analysis results and track-level summaries
//!
//! Combines all feature extraction results into the final analysis:
//! - Result types
//! - Fallback construction for failed runs
//! - Derived metrics (rhythm complexity, harmonic character)

pub mod fallback;
pub mod metrics;
pub mod result;

pub use fallback::fallback_analysis;
pub use result::{
    Analysis, AnalysisMetadata, DrumPattern, GrooveProfile, HarmonicCharacter, KeyEstimate,
    PitchClass, ScaleType, Section, SectionMood, SectionType, SpectralBalance, TempoEstimate,
    Transient, TransientType,
};
