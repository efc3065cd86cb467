//! Decoded-audio container
//!
//! [`AudioSignal`] is the immutable input to the analysis pipeline: a sample
//! rate plus one or more channels of f32 samples in [-1.0, 1.0]. The host is
//! responsible for decoding compressed audio into this form. Analysis reads a
//! single reference channel (channel 0); the remaining channels are carried
//! for callers that need them but never touched by the pipeline.

use crate::error::AnalysisError;

/// Immutable decoded audio
///
/// # Example
///
/// ```
/// use remix_dsp::AudioSignal;
///
/// let signal = AudioSignal::from_mono(vec![0.0f32; 44100], 44100)?;
/// assert_eq!(signal.sample_rate(), 44100);
/// assert!((signal.duration_seconds() - 1.0).abs() < 1e-6);
/// # Ok::<(), remix_dsp::AnalysisError>(())
/// ```
#[derive(Debug, Clone)]
pub struct AudioSignal {
    sample_rate: u32,
    channels: Vec<Vec<f32>>,
}

impl AudioSignal {
    /// Create a signal from decoded channels
    ///
    /// # Arguments
    ///
    /// * `channels` - One or more channels of samples in [-1.0, 1.0]
    /// * `sample_rate` - Sample rate in Hz (must be > 0)
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidInput` if the sample rate is zero or no
    /// channels are provided. Empty channels are accepted (zero duration);
    /// the pipeline degrades gracefully on them.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self, AnalysisError> {
        if sample_rate == 0 {
            return Err(AnalysisError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        if channels.is_empty() {
            return Err(AnalysisError::InvalidInput(
                "At least one channel is required".to_string(),
            ));
        }
        Ok(Self {
            sample_rate,
            channels,
        })
    }

    /// Create a single-channel signal
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Result<Self, AnalysisError> {
        Self::new(vec![samples], sample_rate)
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// The reference channel (channel 0) that all analysis reads
    pub fn reference_channel(&self) -> &[f32] {
        &self.channels[0]
    }

    /// A specific channel, if present
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(|c| c.as_slice())
    }

    /// Duration of the reference channel in seconds
    pub fn duration_seconds(&self) -> f32 {
        self.channels[0].len() as f32 / self.sample_rate as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_sample_rate() {
        let result = AudioSignal::from_mono(vec![0.0; 100], 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_no_channels() {
        let result = AudioSignal::new(vec![], 44100);
        assert!(result.is_err());
    }

    #[test]
    fn test_accepts_empty_samples() {
        let signal = AudioSignal::from_mono(vec![], 44100).unwrap();
        assert_eq!(signal.duration_seconds(), 0.0);
        assert!(signal.reference_channel().is_empty());
    }

    #[test]
    fn test_duration_from_reference_channel() {
        let signal = AudioSignal::from_mono(vec![0.1; 22050], 44100).unwrap();
        assert!((signal.duration_seconds() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_reference_is_channel_zero() {
        let left = vec![0.25f32; 10];
        let right = vec![-0.5f32; 10];
        let signal = AudioSignal::new(vec![left.clone(), right.clone()], 48000).unwrap();
        assert_eq!(signal.channel_count(), 2);
        assert_eq!(signal.reference_channel(), left.as_slice());
        assert_eq!(signal.channel(1).unwrap(), right.as_slice());
        assert!(signal.channel(2).is_none());
    }
}
