//! Analysis result types
//!
//! Everything a caller receives from the pipeline lives here. All types are
//! plain data with serde derives so collaborators (sequencer UIs, remix
//! request builders, result displays) can serialize the aggregate directly.

use serde::{Deserialize, Serialize};

/// Note names in semitone order starting at C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Number of steps in the drum-pattern grid (one 4/4 bar of sixteenths)
pub const PATTERN_STEPS: usize = 16;

/// Number of voices (rows) in the drum-pattern grid
pub const PATTERN_ROWS: usize = 4;

/// One of the 12 pitch classes, octave-agnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    /// C
    C,
    /// C# / Db
    CSharp,
    /// D
    D,
    /// D# / Eb
    DSharp,
    /// E
    E,
    /// F
    F,
    /// F# / Gb
    FSharp,
    /// G
    G,
    /// G# / Ab
    GSharp,
    /// A
    A,
    /// A# / Bb
    ASharp,
    /// B
    B,
}

impl PitchClass {
    /// Pitch class from a semitone index (0 = C, 11 = B; wraps modulo 12)
    ///
    /// # Example
    ///
    /// ```
    /// use remix_dsp::PitchClass;
    ///
    /// assert_eq!(PitchClass::from_index(0), PitchClass::C);
    /// assert_eq!(PitchClass::from_index(9), PitchClass::A);
    /// assert_eq!(PitchClass::from_index(12), PitchClass::C);
    /// ```
    pub fn from_index(index: usize) -> Self {
        const CLASSES: [PitchClass; 12] = [
            PitchClass::C,
            PitchClass::CSharp,
            PitchClass::D,
            PitchClass::DSharp,
            PitchClass::E,
            PitchClass::F,
            PitchClass::FSharp,
            PitchClass::G,
            PitchClass::GSharp,
            PitchClass::A,
            PitchClass::ASharp,
            PitchClass::B,
        ];
        CLASSES[index % 12]
    }

    /// Semitone index of this pitch class (0 = C, 11 = B)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Note name (e.g. "C", "F#")
    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.index()]
    }
}

/// Scale flavor attached to a key estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    /// Major (Ionian)
    Major,
    /// Natural minor (Aeolian)
    Minor,
    /// Dorian mode (minor with raised 6th)
    Dorian,
    /// Mixolydian mode (major with lowered 7th)
    Mixolydian,
    /// No tonality detected (silent or atonal input)
    Unknown,
}

impl ScaleType {
    /// Human-readable scale label
    pub fn name(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::Minor => "Minor",
            ScaleType::Dorian => "Dorian",
            ScaleType::Mixolydian => "Mixolydian",
            ScaleType::Unknown => "Unknown",
        }
    }
}

/// Estimated key: root pitch class + scale flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyEstimate {
    /// Root note of the winning scale rotation
    pub root: PitchClass,

    /// Scale template that won the correlation
    pub scale: ScaleType,
}

impl KeyEstimate {
    /// Display name (e.g. "C Major", "A Minor", "D Dorian")
    ///
    /// # Example
    ///
    /// ```
    /// use remix_dsp::{KeyEstimate, PitchClass, ScaleType};
    ///
    /// let key = KeyEstimate { root: PitchClass::A, scale: ScaleType::Minor };
    /// assert_eq!(key.name(), "A Minor");
    /// ```
    pub fn name(&self) -> String {
        format!("{} {}", self.root.name(), self.scale.name())
    }
}

/// Tempo estimate with heuristic confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoEstimate {
    /// Estimated tempo in beats per minute, folded into the configured range
    pub bpm: u32,

    /// Confidence in [0, 1], a heuristic rather than a statistical guarantee
    pub confidence: f32,
}

/// Percussive category assigned to a detected transient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransientType {
    /// Low-dominant hit (bass drum)
    Kick,
    /// Mid-dominant hit with substantial high content
    Snare,
    /// High-dominant hit
    Hihat,
    /// Mid-dominant hit with suppressed lows
    Clap,
    /// Broadband mid/high hit that fits no specific voice
    Perc,
    /// Anything else that crossed the detection threshold
    Other,
}

impl TransientType {
    /// Lowercase label (matches the sequencer-row naming)
    pub fn name(self) -> &'static str {
        match self {
            TransientType::Kick => "kick",
            TransientType::Snare => "snare",
            TransientType::Hihat => "hihat",
            TransientType::Clap => "clap",
            TransientType::Perc => "perc",
            TransientType::Other => "other",
        }
    }

    /// Nominal center frequency for this voice in Hz
    ///
    /// An estimate by class, not a measured value.
    pub fn nominal_frequency_hz(self) -> f32 {
        match self {
            TransientType::Kick => 60.0,
            TransientType::Snare => 200.0,
            TransientType::Hihat => 8000.0,
            TransientType::Clap => 1500.0,
            TransientType::Perc => 2500.0,
            TransientType::Other => 1000.0,
        }
    }
}

/// A single detected percussive event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transient {
    /// Event time in seconds from track start
    pub time: f32,

    /// Onset strength normalized to [0, 1] across the track
    pub strength: f32,

    /// Classified percussive voice
    pub transient_type: TransientType,

    /// Nominal frequency estimate in Hz (by class, not measured)
    pub frequency: f32,
}

/// Swing/groove feel derived from off-beat timing deviations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrooveProfile {
    /// Mean off-beat deviation scaled to [-0.5, 0.5]; 0 = straight time,
    /// positive = late (swung), negative = rushed
    pub swing_factor: f32,

    /// Per-sixteenth timing feel; 0.5 = on the grid
    pub groove_pattern: [f32; PATTERN_STEPS],
}

impl Default for GrooveProfile {
    fn default() -> Self {
        Self {
            swing_factor: 0.0,
            groove_pattern: [0.5; PATTERN_STEPS],
        }
    }
}

/// Energy distribution across six frequency bands, summing to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpectralBalance {
    /// Below 100 Hz
    pub bass: f32,
    /// 100-300 Hz
    pub low_mid: f32,
    /// 300-1000 Hz
    pub mid: f32,
    /// 1-4 kHz
    pub high_mid: f32,
    /// 4-10 kHz
    pub high: f32,
    /// Above 10 kHz
    pub presence: f32,
}

impl SpectralBalance {
    /// The six ratios in ascending band order
    pub fn as_array(&self) -> [f32; 6] {
        [
            self.bass,
            self.low_mid,
            self.mid,
            self.high_mid,
            self.high,
            self.presence,
        ]
    }

    /// Uniform distribution (used for silent input so the sum-to-one
    /// invariant holds unconditionally)
    pub fn uniform() -> Self {
        let v = 1.0 / 6.0;
        Self {
            bass: v,
            low_mid: v,
            mid: v,
            high_mid: v,
            high: v,
            presence: v,
        }
    }
}

/// Structural label for a section of the track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionType {
    /// Opening span of the track
    Intro,
    /// Moderate-energy span
    Verse,
    /// Rising span leading into a chorus
    Prechorus,
    /// High-energy span
    Chorus,
    /// Low-energy contrasting span
    Bridge,
    /// Sharp energy fall
    Breakdown,
    /// Sustained energy rise
    Buildup,
    /// Sharp energy spike
    Drop,
    /// Closing span of the track
    Outro,
}

impl SectionType {
    /// Lowercase label
    pub fn name(self) -> &'static str {
        match self {
            SectionType::Intro => "intro",
            SectionType::Verse => "verse",
            SectionType::Prechorus => "prechorus",
            SectionType::Chorus => "chorus",
            SectionType::Bridge => "bridge",
            SectionType::Breakdown => "breakdown",
            SectionType::Buildup => "buildup",
            SectionType::Drop => "drop",
            SectionType::Outro => "outro",
        }
    }
}

/// Descriptive mood attached to a section (deterministic map from type and
/// energy; decoration for displays, not a measured quantity)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionMood {
    /// Low-key opening/closing feel
    Calm,
    /// Relaxed mid-energy feel
    Mellow,
    /// Forward-moving feel
    Driving,
    /// Anticipatory feel
    Tense,
    /// Peak-energy feel
    Euphoric,
    /// Subdued, heavy feel
    Dark,
}

/// A contiguous structural span of the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Start time in seconds (inclusive)
    pub start: f32,

    /// End time in seconds (exclusive; equals the next section's start)
    pub end: f32,

    /// Structural label
    pub section_type: SectionType,

    /// Mean normalized energy over the span, in [0, 1]
    pub energy: f32,

    /// Blend of energy and transient density, in [0, 1]
    pub intensity: f32,

    /// Descriptive mood
    pub mood: SectionMood,
}

impl Section {
    /// Section length in seconds
    pub fn duration(&self) -> f32 {
        self.end - self.start
    }
}

/// Quantized 4-voice, 16-step drum pattern
///
/// Rows are kick, snare, hihat/perc, clap/other. `velocities` holds the max
/// observed transient strength per cell; `steps` is the same grid binarized
/// by the configured threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumPattern {
    /// Max transient strength per cell, in [0, 1]
    pub velocities: [[f32; PATTERN_STEPS]; PATTERN_ROWS],

    /// Thresholded on/off grid
    pub steps: [[bool; PATTERN_STEPS]; PATTERN_ROWS],
}

impl DrumPattern {
    /// An all-zero pattern
    pub fn empty() -> Self {
        Self {
            velocities: [[0.0; PATTERN_STEPS]; PATTERN_ROWS],
            steps: [[false; PATTERN_STEPS]; PATTERN_ROWS],
        }
    }

    /// True if no cell has any velocity
    pub fn is_empty(&self) -> bool {
        self.velocities
            .iter()
            .all(|row| row.iter().all(|&v| v == 0.0))
    }
}

/// Deterministic harmonic-flavor scores derived from the pitch-class
/// histogram (no randomness; included in the idempotence guarantees)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HarmonicCharacter {
    /// How strongly the track fits a consonant tonal profile, in [0, 1]
    pub harmoniousness: f32,

    /// Semitone/tritone co-occurrence weight, in [0, 1]
    pub dissonance: f32,
}

impl HarmonicCharacter {
    /// Neutral scores for input with no tonal content
    pub fn neutral() -> Self {
        Self {
            harmoniousness: 0.5,
            dissonance: 0.5,
        }
    }
}

/// Analysis run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Audio duration in seconds
    pub duration_seconds: f32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Wall-clock processing time in milliseconds (not deterministic)
    pub processing_time_ms: f32,
}

/// Complete structure analysis of one track
///
/// Built once per input signal and immutable thereafter. Every field is
/// always present: on failure the orchestrator substitutes a complete
/// fallback rather than a partial result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Tempo estimate
    pub tempo: TempoEstimate,

    /// Detected percussive events, ordered by strictly increasing time
    pub transients: Vec<Transient>,

    /// Swing/groove feel
    pub groove: GrooveProfile,

    /// Key estimate
    pub key: KeyEstimate,

    /// Six-band energy distribution (sums to 1)
    pub spectral_balance: SpectralBalance,

    /// Contiguous structural sections covering [0, duration]
    pub sections: Vec<Section>,

    /// Quantized drum pattern
    pub drum_pattern: DrumPattern,

    /// Normalized track-level energy profile (fixed bin count)
    pub energy_profile: Vec<f32>,

    /// Blend of beat-position variety and syncopation density, in [0, 1]
    pub rhythm_complexity: f32,

    /// Deterministic harmonic-flavor scores
    pub harmony: HarmonicCharacter,

    /// Run metadata
    pub metadata: AnalysisMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_class_from_index_wraps() {
        assert_eq!(PitchClass::from_index(0), PitchClass::C);
        assert_eq!(PitchClass::from_index(11), PitchClass::B);
        assert_eq!(PitchClass::from_index(12), PitchClass::C);
        assert_eq!(PitchClass::from_index(21), PitchClass::A);
    }

    #[test]
    fn test_pitch_class_index_roundtrip() {
        for i in 0..12 {
            assert_eq!(PitchClass::from_index(i).index(), i);
        }
    }

    #[test]
    fn test_pitch_class_names() {
        assert_eq!(PitchClass::C.name(), "C");
        assert_eq!(PitchClass::FSharp.name(), "F#");
        assert_eq!(PitchClass::B.name(), "B");
    }

    #[test]
    fn test_key_estimate_name() {
        let key = KeyEstimate {
            root: PitchClass::C,
            scale: ScaleType::Major,
        };
        assert_eq!(key.name(), "C Major");

        let key = KeyEstimate {
            root: PitchClass::G,
            scale: ScaleType::Mixolydian,
        };
        assert_eq!(key.name(), "G Mixolydian");
    }

    #[test]
    fn test_spectral_balance_uniform_sums_to_one() {
        let balance = SpectralBalance::uniform();
        let sum: f32 = balance.as_array().iter().sum();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_section_duration() {
        let section = Section {
            start: 1.5,
            end: 4.0,
            section_type: SectionType::Verse,
            energy: 0.4,
            intensity: 0.4,
            mood: SectionMood::Mellow,
        };
        assert!((section.duration() - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_drum_pattern_empty() {
        let pattern = DrumPattern::empty();
        assert!(pattern.is_empty());
        assert!(pattern.steps.iter().all(|row| row.iter().all(|&s| !s)));
    }

    #[test]
    fn test_transient_type_names() {
        assert_eq!(TransientType::Kick.name(), "kick");
        assert_eq!(TransientType::Other.name(), "other");
    }

    #[test]
    fn test_analysis_serializes() {
        let analysis = Analysis {
            tempo: TempoEstimate {
                bpm: 120,
                confidence: 0.9,
            },
            transients: vec![Transient {
                time: 0.5,
                strength: 1.0,
                transient_type: TransientType::Kick,
                frequency: 60.0,
            }],
            groove: GrooveProfile::default(),
            key: KeyEstimate {
                root: PitchClass::C,
                scale: ScaleType::Major,
            },
            spectral_balance: SpectralBalance::uniform(),
            sections: vec![],
            drum_pattern: DrumPattern::empty(),
            energy_profile: vec![0.0; 32],
            rhythm_complexity: 0.0,
            harmony: HarmonicCharacter::neutral(),
            metadata: AnalysisMetadata {
                duration_seconds: 1.0,
                sample_rate: 44100,
                processing_time_ms: 0.0,
            },
        };

        let json = serde_json::to_string(&analysis).unwrap();
        let back: Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back, analysis);
    }
}
