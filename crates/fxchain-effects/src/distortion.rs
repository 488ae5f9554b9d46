//! Hard-clipping distortion.
//!
//! ```text
//! y[n] = clamp(x[n] * gain, -threshold, threshold)
//! ```
//!
//! followed by peak normalization. Sample-wise, no state across samples.
//! The clip flattens the waveform tops and adds odd harmonics; the gain
//! decides how much of the waveform is above the threshold.

use fxchain_core::{Error, Result, SampleBuffer, hard_clip};
use serde::{Deserialize, Serialize};

use crate::stage::{BufferStage, StageKind};

/// Distortion parameters.
///
/// # Parameters
///
/// - `gain`: Linear pre-clip gain, ≥ 0 (0 yields silence)
/// - `threshold`: Clip level in the canonical domain, > 0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistortionParams {
    /// Linear gain applied before clipping.
    pub gain: f32,
    /// Symmetric clip threshold.
    pub threshold: f32,
}

impl DistortionParams {
    /// Default gain.
    pub const DEFAULT_GAIN: f32 = 8.0;
    /// Default clip threshold.
    pub const DEFAULT_THRESHOLD: f32 = 0.3;

    /// Create distortion parameters.
    pub fn new(gain: f32, threshold: f32) -> Self {
        Self { gain, threshold }
    }
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_GAIN, Self::DEFAULT_THRESHOLD)
    }
}

impl BufferStage for DistortionParams {
    fn kind(&self) -> StageKind {
        StageKind::Distortion
    }

    fn validate(&self) -> Result<()> {
        if !self.gain.is_finite() || self.gain < 0.0 {
            return Err(Error::invalid(
                "distortion",
                "gain",
                format!("must be finite and >= 0, got {}", self.gain),
            ));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(Error::invalid(
                "distortion",
                "threshold",
                format!("must be finite and > 0, got {}", self.threshold),
            ));
        }
        Ok(())
    }

    fn apply(&self, mut buffer: SampleBuffer) -> Result<SampleBuffer> {
        self.validate()?;
        for sample in buffer.samples_mut() {
            *sample = hard_clip(*sample * self.gain, self.threshold);
        }
        Ok(buffer.normalized())
    }
}
