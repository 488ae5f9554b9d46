//! Mono sample buffer in the canonical float domain.

use crate::error::{Error, Result};
use crate::normalize::{normalize, peak};

/// An owned mono buffer of `f32` samples plus its sample rate.
///
/// # Invariants
///
/// - `sample_rate > 0`
/// - Every sample is finite when the buffer is built through [`SampleBuffer::new`]
///
/// Stages take the buffer by value and hand back a new one; nothing else
/// holds a reference to it while a pipeline runs.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer, validating the sample rate and sample values.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `sample_rate` is zero
    /// - `NumericInstability` if any sample is NaN or infinite
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Result<Self> {
        if sample_rate == 0 {
            return Err(Error::invalid("buffer", "sample_rate", "must be > 0"));
        }
        let buffer = Self {
            samples,
            sample_rate,
        };
        buffer.check_finite("input")?;
        Ok(buffer)
    }

    /// An empty buffer at the given sample rate.
    pub fn empty(sample_rate: u32) -> Result<Self> {
        Self::new(Vec::new(), sample_rate)
    }

    /// A buffer of `len` zero samples.
    pub fn silence(len: usize, sample_rate: u32) -> Result<Self> {
        Self::new(vec![0.0; len], sample_rate)
    }

    /// Replace the samples, keeping the sample rate.
    ///
    /// Used by stages to hand back their output; call
    /// [`check_finite`](Self::check_finite) to re-establish the invariant.
    pub fn with_samples(&self, samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: self.sample_rate,
        }
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nyquist frequency in Hz.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 * 0.5
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Borrow the samples.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Mutably borrow the samples.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Consume the buffer and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Maximum absolute sample value.
    pub fn peak(&self) -> f32 {
        peak(&self.samples)
    }

    /// Peak-normalize and return the buffer.
    pub fn normalized(mut self) -> Self {
        normalize(&mut self.samples);
        self
    }

    /// Fail with `NumericInstability` at the first NaN or infinite sample.
    ///
    /// `stage` names what produced the samples, for the error report.
    pub fn check_finite(&self, stage: &'static str) -> Result<()> {
        match self.samples.iter().position(|s| !s.is_finite()) {
            Some(index) => Err(Error::NumericInstability { stage, index }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sample_rate_is_rejected() {
        let err = SampleBuffer::new(vec![0.0], 0).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                param: "sample_rate",
                ..
            }
        ));
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let err = SampleBuffer::new(vec![0.0, f32::NAN, 0.1], 48000).unwrap_err();
        assert_eq!(
            err,
            Error::NumericInstability {
                stage: "input",
                index: 1
            }
        );
    }

    #[test]
    fn empty_buffer_is_valid() {
        let buffer = SampleBuffer::empty(44100).unwrap();
        assert!(buffer.is_empty());
        assert_eq!(buffer.peak(), 0.0);
        assert_eq!(buffer.duration_secs(), 0.0);
    }

    #[test]
    fn duration_and_nyquist() {
        let buffer = SampleBuffer::silence(22050, 44100).unwrap();
        assert_eq!(buffer.duration_secs(), 0.5);
        assert_eq!(buffer.nyquist(), 22050.0);
    }

    #[test]
    fn with_samples_keeps_rate() {
        let buffer = SampleBuffer::silence(4, 8000).unwrap();
        let replaced = buffer.with_samples(vec![0.5; 10]);
        assert_eq!(replaced.sample_rate(), 8000);
        assert_eq!(replaced.len(), 10);
    }

    #[test]
    fn check_finite_reports_first_bad_index() {
        let buffer = SampleBuffer::silence(4, 8000)
            .unwrap()
            .with_samples(vec![0.0, 0.0, f32::INFINITY, f32::NAN]);
        assert_eq!(
            buffer.check_finite("distortion"),
            Err(Error::NumericInstability {
                stage: "distortion",
                index: 2
            })
        );
    }

    #[test]
    fn normalized_scales_peak() {
        let buffer = SampleBuffer::new(vec![0.1, -0.2], 8000).unwrap().normalized();
        assert!((buffer.peak() - 1.0).abs() < 1e-6);
    }
}
