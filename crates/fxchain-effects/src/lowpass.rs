//! One-pole recursive lowpass over a whole buffer.
//!
//! An RC-style exponential smoother:
//!
//! ```text
//! RC    = 1 / (2π * cutoff)
//! dt    = 1 / sample_rate
//! alpha = dt / (RC + dt)
//!
//! y[0] = 0
//! y[n] = y[n-1] + alpha * (x[n] - y[n-1])     for n >= 1
//! ```
//!
//! 6 dB/octave rolloff. As the cutoff rises past Nyquist, `alpha → 1` and the
//! filter approaches a pass-through (except for the first sample).
//!
//! The first output sample is forced to zero rather than seeded from `x[0]`.
//! Files processed by earlier versions depend on this, so it stays the
//! default; `seed_first_sample` opts into `y[0] = x[0]`.

use fxchain_core::{Error, Result, SampleBuffer};
use serde::{Deserialize, Serialize};

use crate::stage::{BufferStage, StageKind};

/// Lowpass parameters.
///
/// # Parameters
///
/// - `cutoff_hz`: −3 dB frequency, > 0. Values at or above Nyquist are accepted.
/// - `seed_first_sample`: Start from `x[0]` instead of 0
/// - `normalize`: Peak-normalize the filtered buffer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LowpassParams {
    /// Cutoff frequency in Hz.
    pub cutoff_hz: f32,
    /// Seed `y[0]` from the first input sample.
    pub seed_first_sample: bool,
    /// Peak-normalize the output.
    pub normalize: bool,
}

impl LowpassParams {
    /// Default cutoff frequency.
    pub const DEFAULT_CUTOFF_HZ: f32 = 2000.0;

    /// Create lowpass parameters with the default flags.
    pub fn new(cutoff_hz: f32) -> Self {
        Self {
            cutoff_hz,
            seed_first_sample: false,
            normalize: true,
        }
    }

    /// Set whether `y[0]` is seeded from `x[0]`.
    pub fn with_seed_first_sample(mut self, seed: bool) -> Self {
        self.seed_first_sample = seed;
        self
    }

    /// Set whether the output is peak-normalized.
    pub fn with_normalize(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    /// Smoothing coefficient for `sample_rate`, in (0, 1].
    pub fn alpha(&self, sample_rate: u32) -> f32 {
        let rc = 1.0 / (core::f32::consts::TAU * self.cutoff_hz);
        let dt = 1.0 / sample_rate as f32;
        dt / (rc + dt)
    }
}

impl Default for LowpassParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CUTOFF_HZ)
    }
}

impl BufferStage for LowpassParams {
    fn kind(&self) -> StageKind {
        StageKind::Lowpass
    }

    fn validate(&self) -> Result<()> {
        if !self.cutoff_hz.is_finite() || self.cutoff_hz <= 0.0 {
            return Err(Error::invalid(
                "lowpass",
                "cutoff_hz",
                format!("must be finite and > 0, got {}", self.cutoff_hz),
            ));
        }
        Ok(())
    }

    fn apply(&self, buffer: SampleBuffer) -> Result<SampleBuffer> {
        self.validate()?;
        let alpha = self.alpha(buffer.sample_rate());
        let x = buffer.samples();

        let mut y = vec![0.0f32; x.len()];
        if self.seed_first_sample && !x.is_empty() {
            y[0] = x[0];
        }
        for n in 1..x.len() {
            y[n] = y[n - 1] + alpha * (x[n] - y[n - 1]);
        }

        let out = buffer.with_samples(y);
        Ok(if self.normalize { out.normalized() } else { out })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_forced_to_zero() {
        let buffer = SampleBuffer::new(vec![1.0, 1.0, 1.0], 48000).unwrap();
        let out = LowpassParams::new(1000.0).apply(buffer).unwrap();
        assert_eq!(out.samples()[0], 0.0);
    }

    #[test]
    fn seeded_first_sample_follows_input() {
        let buffer = SampleBuffer::new(vec![0.5, 0.5, 0.5], 48000).unwrap();
        let out = LowpassParams::new(1000.0)
            .with_seed_first_sample(true)
            .with_normalize(false)
            .apply(buffer)
            .unwrap();
        assert_eq!(out.samples(), &[0.5, 0.5, 0.5]);
    }

    #[test]
    fn passes_dc() {
        let buffer = SampleBuffer::new(vec![0.5; 48000], 48000).unwrap();
        let out = LowpassParams::new(1000.0)
            .with_normalize(false)
            .apply(buffer)
            .unwrap();
        let last = *out.samples().last().unwrap();
        assert!((last - 0.5).abs() < 1e-4, "DC should settle, got {last}");
    }

    #[test]
    fn attenuates_nyquist() {
        let input: Vec<f32> = (0..4800)
            .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
            .collect();
        let buffer = SampleBuffer::new(input, 48000).unwrap();
        let out = LowpassParams::new(100.0)
            .with_normalize(false)
            .apply(buffer)
            .unwrap();
        let avg = out.samples().iter().map(|s| s.abs()).sum::<f32>() / 4800.0;
        assert!(avg < 0.05, "Nyquist signal should be attenuated, avg = {avg}");
    }

    #[test]
    fn alpha_matches_rc_formula() {
        let params = LowpassParams::new(2000.0);
        let rc = 1.0 / (2.0 * std::f32::consts::PI * 2000.0);
        let dt = 1.0 / 44100.0;
        assert!((params.alpha(44100) - dt / (rc + dt)).abs() < 1e-7);
    }

    #[test]
    fn alpha_approaches_one_for_huge_cutoff() {
        assert!(LowpassParams::new(1.0e9).alpha(44100) > 0.9999);
    }

    #[test]
    fn output_length_matches_input() {
        let buffer = SampleBuffer::new(vec![0.3; 1234], 22050).unwrap();
        let out = LowpassParams::default().apply(buffer).unwrap();
        assert_eq!(out.len(), 1234);
        assert_eq!(out.sample_rate(), 22050);
    }

    #[test]
    fn empty_buffer_is_fine() {
        let buffer = SampleBuffer::empty(44100).unwrap();
        let out = LowpassParams::default()
            .with_seed_first_sample(true)
            .apply(buffer)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn non_positive_cutoff_is_rejected() {
        for cutoff in [0.0, -100.0, f32::INFINITY] {
            let err = LowpassParams::new(cutoff).validate().unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidParameter {
                    param: "cutoff_hz",
                    ..
                }
            ));
        }
    }
}
