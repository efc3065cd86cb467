//! # Remix DSP
//!
//! An offline musical-structure analysis engine for remixing tools,
//! deriving tempo, percussive transients, key, groove, spectral balance,
//! structural sections, and a quantized drum pattern from decoded audio.
//!
//! ## Features
//!
//! - **Tempo**: Onset-envelope autocorrelation with octave correction
//! - **Transients**: One-pole filter-bank detection classified into six
//!   percussive voices
//! - **Key**: Pitch-class histogram correlated against Krumhansl-Kessler
//!   scale templates (major, minor, dorian, mixolydian)
//! - **Structure**: Energy-derivative segmentation into labeled sections
//! - **Never fails**: any internal failure degrades to a complete,
//!   deterministic fallback analysis
//!
//! ## Quick Start
//!
//! ```no_run
//! use remix_dsp::{analyze, AnalysisConfig, AudioSignal};
//!
//! // Decoded audio (any channel count; channel 0 is analyzed)
//! let samples: Vec<f32> = vec![0.0; 44100 * 30];
//! let signal = AudioSignal::from_mono(samples, 44100)?;
//!
//! let outcome = analyze(&signal, &AnalysisConfig::default());
//! let analysis = outcome.analysis();
//!
//! println!("{} BPM ({:.2})", analysis.tempo.bpm, analysis.tempo.confidence);
//! println!("Key: {}", analysis.key.name());
//! # Ok::<(), remix_dsp::AnalysisError>(())
//! ```
//!
//! ## Architecture
//!
//! The pipeline is strictly linear and purely computational:
//!
//! ```text
//! Signal → Onset Envelope → Tempo → Transients → {Groove, Pattern}
//!        → Key + Spectral Balance → Energy Profile → Sections → Analysis
//! ```
//!
//! Each call is an independent computation over immutable input; there is
//! no shared state between analyses.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analysis;
pub mod config;
pub mod error;
pub mod features;
pub mod signal;

// Re-export main types
pub use analysis::result::{
    Analysis, AnalysisMetadata, DrumPattern, GrooveProfile, HarmonicCharacter, KeyEstimate,
    PitchClass, ScaleType, Section, SectionMood, SectionType, SpectralBalance, TempoEstimate,
    Transient, TransientType,
};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use signal::AudioSignal;

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use analysis::fallback::{fallback_analysis, FALLBACK_BPM};
use analysis::metrics::{harmonic_character, rhythm_complexity};
use features::groove::analyze_groove;
use features::key::estimate_key;
use features::onset::compute_onset_series;
use features::pattern::extract_pattern;
use features::spectral::compute_spectral_balance;
use features::structure::{energy_profile, segment_sections};
use features::tempo::estimate_tempo;
use features::transient::{detect_transients, DetectorSettings};

/// Outcome of one analysis run
///
/// Callers always receive a complete [`Analysis`]: either the real result
/// or, when the pipeline failed, the deterministic fallback tagged with the
/// failure reason. No error ever crosses this boundary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum AnalysisOutcome {
    /// The pipeline ran to completion
    Complete(Analysis),

    /// The pipeline failed; `analysis` is the fallback substitute
    Degraded {
        /// Complete fallback analysis
        analysis: Analysis,
        /// Human-readable failure description
        reason: String,
    },
}

impl AnalysisOutcome {
    /// The analysis, real or fallback
    pub fn analysis(&self) -> &Analysis {
        match self {
            AnalysisOutcome::Complete(analysis) => analysis,
            AnalysisOutcome::Degraded { analysis, .. } => analysis,
        }
    }

    /// Consumes the outcome, returning the analysis
    pub fn into_analysis(self) -> Analysis {
        match self {
            AnalysisOutcome::Complete(analysis) => analysis,
            AnalysisOutcome::Degraded { analysis, .. } => analysis,
        }
    }

    /// True if the pipeline failed and the fallback was substituted
    pub fn is_degraded(&self) -> bool {
        matches!(self, AnalysisOutcome::Degraded { .. })
    }
}

/// Analyzes one track.
///
/// Runs the full pipeline over the signal's reference channel (channel 0).
/// Every failure mode, including panics from numeric edge cases, is caught
/// here and converted into [`AnalysisOutcome::Degraded`] carrying the
/// fallback analysis; callers never see an error or a partial result.
///
/// # Arguments
///
/// * `signal` - Decoded audio signal
/// * `config` - Analysis configuration parameters
///
/// # Example
///
/// ```no_run
/// use remix_dsp::{analyze, AnalysisConfig, AudioSignal};
///
/// let signal = AudioSignal::from_mono(vec![0.0f32; 44100 * 30], 44100)?;
/// let outcome = analyze(&signal, &AnalysisConfig::default());
///
/// if outcome.is_degraded() {
///     eprintln!("warning: analysis degraded to fallback");
/// }
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
pub fn analyze(signal: &AudioSignal, config: &AnalysisConfig) -> AnalysisOutcome {
    let start_time = Instant::now();

    let result = catch_unwind(AssertUnwindSafe(|| run_pipeline(signal, config, start_time)));

    let reason = match result {
        Ok(Ok(analysis)) => return AnalysisOutcome::Complete(analysis),
        Ok(Err(error)) => error.to_string(),
        Err(payload) => {
            if let Some(message) = payload.downcast_ref::<&str>() {
                format!("analysis panicked: {}", message)
            } else if let Some(message) = payload.downcast_ref::<String>() {
                format!("analysis panicked: {}", message)
            } else {
                "analysis panicked".to_string()
            }
        }
    };

    log::warn!("Analysis degraded to fallback: {}", reason);

    let mut analysis = fallback_analysis(
        signal.duration_seconds(),
        signal.sample_rate(),
        config.energy_profile_bins,
    );
    analysis.metadata.processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;

    AnalysisOutcome::Degraded { analysis, reason }
}

/// Runs the pipeline phases in order, propagating the first error
fn run_pipeline(
    signal: &AudioSignal,
    config: &AnalysisConfig,
    start_time: Instant,
) -> Result<Analysis, AnalysisError> {
    let samples = signal.reference_channel();
    let sample_rate = signal.sample_rate();
    let duration = signal.duration_seconds();

    log::debug!(
        "Starting analysis: {} samples at {} Hz ({} channels)",
        samples.len(),
        sample_rate,
        signal.channel_count()
    );

    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio signal".to_string(),
        ));
    }

    let phase = Instant::now();
    let onsets = compute_onset_series(samples, sample_rate, config.onset_rate_hz)?;
    log::debug!("Onset phase: {:.1} ms", phase.elapsed().as_secs_f32() * 1000.0);

    let phase = Instant::now();
    let measured_tempo = estimate_tempo(&onsets, config.min_bpm, config.max_bpm)?;
    drop(onsets);
    // An unreliable estimate would poison the groove and pattern phases;
    // keep the measured confidence so callers still see how weak it was
    let tempo = if measured_tempo.confidence <= config.min_tempo_confidence {
        log::warn!(
            "Tempo confidence {:.3} too low, substituting {} BPM",
            measured_tempo.confidence,
            FALLBACK_BPM
        );
        TempoEstimate {
            bpm: FALLBACK_BPM,
            confidence: measured_tempo.confidence,
        }
    } else {
        measured_tempo
    };
    log::debug!("Tempo phase: {:.1} ms", phase.elapsed().as_secs_f32() * 1000.0);

    let phase = Instant::now();
    let detector_settings = DetectorSettings {
        frame_rate_hz: config.transient_rate_hz,
        threshold: config.transient_threshold,
        min_gap_ms: config.transient_min_gap_ms,
        low_crossover_hz: config.low_crossover_hz,
        high_crossover_hz: config.high_crossover_hz,
    };
    let transients = detect_transients(samples, sample_rate, &detector_settings)?;
    log::debug!(
        "Transient phase: {} hits in {:.1} ms",
        transients.len(),
        phase.elapsed().as_secs_f32() * 1000.0
    );

    let phase = Instant::now();
    let groove = analyze_groove(&transients, tempo.bpm)?;
    let drum_pattern = extract_pattern(&transients, tempo.bpm, config.pattern_threshold)?;
    log::debug!("Rhythm phase: {:.1} ms", phase.elapsed().as_secs_f32() * 1000.0);

    let phase = Instant::now();
    let key_analysis = estimate_key(samples, sample_rate, config.key_frame_size, config.key_max_frames)?;
    let spectral_balance = compute_spectral_balance(
        samples,
        sample_rate,
        config.balance_frame_size,
        config.balance_max_frames,
    )?;
    log::debug!("Spectral phase: {:.1} ms", phase.elapsed().as_secs_f32() * 1000.0);

    let phase = Instant::now();
    let profile = energy_profile(samples, config.energy_profile_bins)?;
    let sections = segment_sections(&profile, &transients, duration, config.min_section_seconds)?;
    log::debug!(
        "Structure phase: {} sections in {:.1} ms",
        sections.len(),
        phase.elapsed().as_secs_f32() * 1000.0
    );

    let rhythm = rhythm_complexity(&drum_pattern);
    let harmony = harmonic_character(&key_analysis.histogram, key_analysis.correlation);

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!("Analysis complete in {:.1} ms", processing_time_ms);

    Ok(Analysis {
        tempo,
        transients,
        groove,
        key: key_analysis.estimate,
        spectral_balance,
        sections,
        drum_pattern,
        energy_profile: profile,
        rhythm_complexity: rhythm,
        harmony,
        metadata: AnalysisMetadata {
            duration_seconds: duration,
            sample_rate,
            processing_time_ms,
        },
    })
}
