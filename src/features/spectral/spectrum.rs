//! Windowed magnitude spectra
//!
//! Computes Hann-windowed FFT magnitude frames at evenly spaced positions
//! across the signal. The frame count is bounded for cost control; frames
//! spread out to cover the full duration rather than clustering at the
//! start. The trailing spectrum half (above Nyquist) is discarded.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use crate::error::AnalysisError;

/// Magnitude spectra for a set of analysis frames
#[derive(Debug, Clone)]
pub struct SpectrumFrames {
    /// Per-frame magnitudes for bins 0..frame_size/2, scaled by 1/frame_size
    pub magnitudes: Vec<Vec<f32>>,

    /// Frequency width of one bin in Hz
    pub bin_hz: f32,
}

/// Computes bounded, evenly spaced magnitude spectrum frames.
///
/// A signal shorter than one frame is zero-padded into a single frame.
///
/// # Arguments
///
/// * `samples` - Audio samples
/// * `sample_rate` - Sample rate in Hz
/// * `frame_size` - FFT size in samples
/// * `max_frames` - Upper bound on the number of analysis frames
///
/// # Errors
///
/// Returns an error if the signal is empty or a parameter is zero.
pub fn magnitude_frames(
    samples: &[f32],
    sample_rate: u32,
    frame_size: usize,
    max_frames: usize,
) -> Result<SpectrumFrames, AnalysisError> {
    if samples.is_empty() {
        return Err(AnalysisError::InvalidInput(
            "Empty audio signal".to_string(),
        ));
    }
    if sample_rate == 0 {
        return Err(AnalysisError::InvalidInput(
            "Sample rate must be positive".to_string(),
        ));
    }
    if frame_size == 0 || max_frames == 0 {
        return Err(AnalysisError::InvalidInput(
            "Frame size and frame count must be positive".to_string(),
        ));
    }

    let window: Vec<f32> = (0..frame_size)
        .map(|n| {
            0.5 * (1.0
                - (2.0 * std::f32::consts::PI * n as f32 / (frame_size - 1).max(1) as f32).cos())
        })
        .collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(frame_size);

    // Evenly spaced frame starts covering the whole signal
    let available = samples.len().saturating_sub(frame_size);
    let num_frames = max_frames.min(available / frame_size + 1);
    let stride = if num_frames > 1 {
        available / (num_frames - 1)
    } else {
        0
    };

    let mut magnitudes = Vec::with_capacity(num_frames);
    let mut buffer = vec![Complex::new(0.0f32, 0.0); frame_size];

    for frame_index in 0..num_frames {
        let start = frame_index * stride;
        for (n, slot) in buffer.iter_mut().enumerate() {
            let sample = samples.get(start + n).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * window[n], 0.0);
        }

        fft.process(&mut buffer);

        let frame_magnitudes: Vec<f32> = buffer[..frame_size / 2]
            .iter()
            .map(|c| c.norm() / frame_size as f32)
            .collect();
        magnitudes.push(frame_magnitudes);
    }

    log::debug!(
        "Spectrum: {} frames of {} bins ({:.2} Hz/bin)",
        magnitudes.len(),
        frame_size / 2,
        sample_rate as f32 / frame_size as f32
    );

    Ok(SpectrumFrames {
        magnitudes,
        bin_hz: sample_rate as f32 / frame_size as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate_tone(freq: f32, duration_s: f32, sample_rate: u32) -> Vec<f32> {
        let num_samples = (duration_s * sample_rate as f32) as usize;
        (0..num_samples)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate as f32).sin())
            .collect()
    }

    #[test]
    fn test_tone_peaks_at_expected_bin() {
        let samples = generate_tone(440.0, 1.0, 44100);
        let frames = magnitude_frames(&samples, 44100, 2048, 8).unwrap();

        let expected_bin = (440.0 / frames.bin_hz).round() as usize;
        for frame in &frames.magnitudes {
            let peak_bin = frame
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            assert!(
                (peak_bin as i64 - expected_bin as i64).abs() <= 1,
                "peak at bin {}, expected ~{}",
                peak_bin,
                expected_bin
            );
        }
    }

    #[test]
    fn test_silence_all_zero() {
        let samples = vec![0.0f32; 44100];
        let frames = magnitude_frames(&samples, 44100, 2048, 8).unwrap();
        assert!(!frames.magnitudes.is_empty());
        for frame in &frames.magnitudes {
            assert!(frame.iter().all(|&m| m == 0.0));
        }
    }

    #[test]
    fn test_short_signal_zero_padded() {
        let samples = vec![0.5f32; 100];
        let frames = magnitude_frames(&samples, 44100, 2048, 8).unwrap();
        assert_eq!(frames.magnitudes.len(), 1);
        assert_eq!(frames.magnitudes[0].len(), 1024);
    }

    #[test]
    fn test_frame_count_bounded() {
        let samples = vec![0.1f32; 44100 * 10];
        let frames = magnitude_frames(&samples, 44100, 2048, 16).unwrap();
        assert!(frames.magnitudes.len() <= 16);
        assert!(frames.magnitudes.len() > 1);
    }

    #[test]
    fn test_bin_width() {
        let samples = vec![0.0f32; 8192];
        let frames = magnitude_frames(&samples, 44100, 8192, 4).unwrap();
        assert!((frames.bin_hz - 44100.0 / 8192.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_signal_fails() {
        assert!(magnitude_frames(&[], 44100, 2048, 8).is_err());
    }
}
