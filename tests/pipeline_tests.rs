//! End-to-end tests for the analysis pipeline
//!
//! All input audio is synthesized in-process: decaying sine bursts for
//! percussion, sustained sine stacks for harmony. Assertions target the
//! musical facts baked into the synthesis (tempo, voices, key, structure)
//! rather than exact numeric outputs.

use remix_dsp::{
    analyze, AnalysisConfig, AudioSignal, PitchClass, ScaleType, SectionType, TransientType,
};

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

/// Sustained sine stack; `notes` are (midi, amplitude) pairs
fn add_chord(samples: &mut [f32], notes: &[(i32, f32)]) {
    for &(midi, amplitude) in notes {
        let freq = 440.0 * 2.0f32.powf((midi - 69) as f32 / 12.0);
        for (i, sample) in samples.iter_mut().enumerate() {
            let t = i as f32 / SAMPLE_RATE as f32;
            *sample += amplitude * (2.0 * std::f32::consts::PI * freq * t).sin();
        }
    }
}

/// Kicks every 0.5s for the whole duration: a 120 BPM four-on-the-floor
fn make_click_track(seconds: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; (seconds * SAMPLE_RATE as f32) as usize];
    let mut t = 0.0;
    while t < seconds {
        add_kick(&mut samples, t);
        t += 0.5;
    }
    samples
}

/// Kicks on the beat, hihats on the offbeat, C major chord underneath
fn make_program_track(seconds: f32) -> Vec<f32> {
    let mut samples = vec![0.0f32; (seconds * SAMPLE_RATE as f32) as usize];
    add_chord(
        &mut samples,
        &[(60, 0.05), (64, 0.03), (67, 0.04), (72, 0.025)],
    );
    let mut t = 0.0;
    while t < seconds {
        add_kick(&mut samples, t);
        add_hihat(&mut samples, t + 0.25);
        t += 0.5;
    }
    samples
}

fn assert_sections_cover(analysis: &remix_dsp::Analysis) {
    let sections = &analysis.sections;
    assert!(!sections.is_empty());
    assert!(sections[0].start.abs() < 1e-6);
    assert!((sections[sections.len() - 1].end - analysis.metadata.duration_seconds).abs() < 1e-3);
    for pair in sections.windows(2) {
        assert!((pair[0].end - pair[1].start).abs() < 1e-6);
    }
    for section in sections {
        assert!((0.0..=1.0).contains(&section.energy));
        assert!((0.0..=1.0).contains(&section.intensity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_track_tempo() {
        let samples = make_click_track(10.0);
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        assert!(!outcome.is_degraded());

        let analysis = outcome.analysis();
        assert!(
            (115..=125).contains(&analysis.tempo.bpm),
            "expected ~120 BPM, got {}",
            analysis.tempo.bpm
        );
        assert!(analysis.tempo.confidence > 0.5);
        assert!(analysis.transients.len() >= 15);
        assert!(analysis
            .transients
            .iter()
            .all(|t| t.transient_type == TransientType::Kick));
    }

    #[test]
    fn test_program_track_full_analysis() {
        let samples = make_program_track(8.0);
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        assert!(!outcome.is_degraded());
        let analysis = outcome.analysis();

        // Tempo: beats every 0.5s despite the denser offbeat layer
        assert!((115..=125).contains(&analysis.tempo.bpm));
        assert!(analysis.tempo.confidence > 0.5);

        // Both voices present
        let kicks = analysis
            .transients
            .iter()
            .filter(|t| t.transient_type == TransientType::Kick)
            .count();
        let hihats = analysis
            .transients
            .iter()
            .filter(|t| t.transient_type == TransientType::Hihat)
            .count();
        assert!(kicks >= 12, "expected >=12 kicks, got {}", kicks);
        assert!(hihats >= 12, "expected >=12 hihats, got {}", hihats);

        // Drum grid: kicks quantize to the quarter-note steps, hihats to
        // the offbeat eighths
        for step in [0, 4, 8, 12] {
            assert!(analysis.drum_pattern.steps[0][step], "kick step {}", step);
        }
        for step in [2, 6, 10, 14] {
            assert!(analysis.drum_pattern.steps[2][step], "hihat step {}", step);
        }

        // Straight offbeats are not swing
        assert!(analysis.groove.swing_factor.abs() < 0.05);

        assert!((0.2..=0.8).contains(&analysis.rhythm_complexity));

        let balance_total: f32 = analysis.spectral_balance.as_array().iter().sum();
        assert!((balance_total - 1.0).abs() < 1e-3);

        assert_eq!(
            analysis.energy_profile.len(),
            AnalysisConfig::default().energy_profile_bins
        );
        assert_sections_cover(analysis);

        assert!((7.9..=8.1).contains(&analysis.metadata.duration_seconds));
        assert_eq!(analysis.metadata.sample_rate, SAMPLE_RATE);
        assert!(analysis.metadata.processing_time_ms > 0.0);
    }

    #[test]
    fn test_chord_track_key() {
        let mut samples = vec![0.0f32; SAMPLE_RATE as usize * 8];
        add_chord(
            &mut samples,
            &[(60, 0.10), (62, 0.03), (64, 0.06), (65, 0.035), (67, 0.08), (69, 0.03), (71, 0.025), (72, 0.05)],
        );
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        assert!(!outcome.is_degraded());

        let key = &outcome.analysis().key;
        assert_eq!(key.root, PitchClass::C);
        assert_eq!(key.scale, ScaleType::Major);
    }

    #[test]
    fn test_silent_track_completes_with_empty_features() {
        let samples = vec![0.0f32; SAMPLE_RATE as usize * 5];
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        // Silence is a valid (if dull) input, not a failure
        assert!(!outcome.is_degraded());

        let analysis = outcome.analysis();
        assert!(analysis.transients.is_empty());
        assert!(analysis.drum_pattern.is_empty());
        assert_eq!(analysis.tempo.bpm, 120);
        assert_eq!(analysis.tempo.confidence, 0.0);
        assert_eq!(analysis.key.scale, ScaleType::Unknown);
        assert_eq!(analysis.sections.len(), 1);
        assert_eq!(analysis.sections[0].section_type, SectionType::Intro);

        let balance_total: f32 = analysis.spectral_balance.as_array().iter().sum();
        assert!((balance_total - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_signal_degrades_to_fallback() {
        let signal = AudioSignal::from_mono(vec![], SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        assert!(outcome.is_degraded());

        let analysis = outcome.analysis();
        assert_eq!(analysis.tempo.bpm, 120);
        assert!((analysis.tempo.confidence - 0.5).abs() < 1e-6);
        assert_eq!(analysis.key.root, PitchClass::C);
        assert_eq!(analysis.key.scale, ScaleType::Major);
        assert!(analysis.sections.is_empty());
        assert_eq!(analysis.metadata.duration_seconds, 0.0);
    }

    #[test]
    fn test_reference_channel_drives_analysis() {
        let clicks = make_click_track(10.0);
        let silence = vec![0.0f32; clicks.len()];
        let signal = AudioSignal::new(vec![clicks, silence], SAMPLE_RATE).unwrap();

        let outcome = analyze(&signal, &AnalysisConfig::default());
        assert!(!outcome.is_degraded());
        assert!((115..=125).contains(&outcome.analysis().tempo.bpm));
    }

    #[test]
    fn test_analysis_deterministic() {
        let samples = make_program_track(6.0);
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();
        let config = AnalysisConfig::default();

        let mut first = analyze(&signal, &config).into_analysis();
        let mut second = analyze(&signal, &config).into_analysis();

        // Wall-clock timing is the only field allowed to differ
        first.metadata.processing_time_ms = 0.0;
        second.metadata.processing_time_ms = 0.0;
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_round_trip() {
        let samples = make_program_track(6.0);
        let signal = AudioSignal::from_mono(samples, SAMPLE_RATE).unwrap();

        let analysis = analyze(&signal, &AnalysisConfig::default()).into_analysis();
        let json = serde_json::to_string(&analysis).unwrap();
        let restored: remix_dsp::Analysis = serde_json::from_str(&json).unwrap();
        assert_eq!(analysis, restored);
    }
}
