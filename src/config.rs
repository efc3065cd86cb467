//! Configuration parameters for structure analysis

/// Analysis configuration parameters
///
/// Defaults are tuned for typical 44.1/48 kHz program material. All values are
/// plain tuning knobs; the pipeline validates them once at the start of a run.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    // Tempo estimation
    /// Minimum BPM to consider (default: 70.0)
    pub min_bpm: f32,

    /// Maximum BPM to consider (default: 180.0)
    pub max_bpm: f32,

    /// Tempo confidence at or below which the orchestrator substitutes the
    /// fallback BPM for downstream grid math (default: 0.1)
    pub min_tempo_confidence: f32,

    // Onset strength
    /// Onset envelope frame rate in frames per second (default: 100)
    ///
    /// The hop size is `sample_rate / onset_rate_hz`; the analysis frame is
    /// twice the hop.
    pub onset_rate_hz: u32,

    // Transient detection
    /// Transient detection frame rate in frames per second (default: 150)
    pub transient_rate_hz: u32,

    /// Combined band-onset threshold above which a transient fires
    /// (default: 0.05, mean-absolute-amplitude units)
    pub transient_threshold: f32,

    /// Minimum gap between kept transients in milliseconds (default: 30.0)
    /// Within the gap the earlier transient is kept and the later dropped.
    pub transient_min_gap_ms: f32,

    /// Low/mid band crossover frequency in Hz (default: 200.0)
    pub low_crossover_hz: f32,

    /// Mid/high band crossover frequency in Hz (default: 2000.0)
    pub high_crossover_hz: f32,

    // Key estimation
    /// FFT frame size for pitch-class analysis (default: 8192)
    ///
    /// Large enough to resolve semitones in the low octaves of the 50-2000 Hz
    /// analysis range.
    pub key_frame_size: usize,

    /// Maximum number of analysis frames for key estimation (default: 32)
    pub key_max_frames: usize,

    // Spectral balance
    /// FFT frame size for band-balance analysis (default: 2048)
    pub balance_frame_size: usize,

    /// Maximum number of analysis frames for band balance (default: 64)
    pub balance_max_frames: usize,

    // Section segmentation
    /// Number of bins in the track-level energy profile (default: 32)
    pub energy_profile_bins: usize,

    /// Minimum section length in seconds (default: 2.0)
    ///
    /// A section boundary needs at least this much elapsed time since the
    /// previous boundary and this much remaining track time.
    pub min_section_seconds: f32,

    // Drum pattern
    /// Velocity threshold for binarizing the drum-pattern grid (default: 0.2)
    pub pattern_threshold: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_bpm: 70.0,
            max_bpm: 180.0,
            min_tempo_confidence: 0.1,
            onset_rate_hz: 100,
            transient_rate_hz: 150,
            transient_threshold: 0.05,
            transient_min_gap_ms: 30.0,
            low_crossover_hz: 200.0,
            high_crossover_hz: 2000.0,
            key_frame_size: 8192,
            key_max_frames: 32,
            balance_frame_size: 2048,
            balance_max_frames: 64,
            energy_profile_bins: 32,
            min_section_seconds: 2.0,
            pattern_threshold: 0.2,
        }
    }
}
