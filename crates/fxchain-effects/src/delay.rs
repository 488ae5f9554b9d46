//! Single-tap echo.
//!
//! With `d = floor(sample_rate * delay_seconds)` the output is `d` samples
//! longer than the input:
//!
//! ```text
//! out[n]     = x[n]                    for n < len
//! out[n + d] += decay * x[n]           for n < len
//! ```
//!
//! One decayed repeat, no recirculation. The sum is peak-normalized.
//! A non-positive delay time leaves the buffer untouched.

use fxchain_core::{Error, Result, SampleBuffer};
use serde::{Deserialize, Serialize};

use crate::stage::{BufferStage, StageKind};

/// Longest accepted delay time in seconds.
pub const MAX_DELAY_SECONDS: f32 = 60.0;

/// Delay parameters.
///
/// # Parameters
///
/// - `delay_seconds`: Echo offset, ≤ [`MAX_DELAY_SECONDS`] (≤ 0 disables the stage)
/// - `decay`: Level of the repeat, in [0, 1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayParams {
    /// Delay time in seconds.
    pub delay_seconds: f32,
    /// Gain of the delayed copy.
    pub decay: f32,
}

impl DelayParams {
    /// Default delay time.
    pub const DEFAULT_DELAY_SECONDS: f32 = 0.25;
    /// Default decay.
    pub const DEFAULT_DECAY: f32 = 0.4;

    /// Create delay parameters.
    pub fn new(delay_seconds: f32, decay: f32) -> Self {
        Self {
            delay_seconds,
            decay,
        }
    }

    /// Delay length in whole samples at `sample_rate`.
    ///
    /// The product is taken in `f64` and allowed one `f32` epsilon of
    /// relative slack, so a delay time such as `0.65` (stored as
    /// `0.6499999762`) still lands on the exact sample count.
    pub fn delay_samples(&self, sample_rate: u32) -> usize {
        if self.delay_seconds <= 0.0 {
            return 0;
        }
        let exact = f64::from(sample_rate) * f64::from(self.delay_seconds);
        (exact + exact * f64::from(f32::EPSILON)).floor() as usize
    }
}

impl Default for DelayParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY_SECONDS, Self::DEFAULT_DECAY)
    }
}

impl BufferStage for DelayParams {
    fn kind(&self) -> StageKind {
        StageKind::Delay
    }

    fn validate(&self) -> Result<()> {
        if !self.delay_seconds.is_finite() || self.delay_seconds > MAX_DELAY_SECONDS {
            return Err(Error::invalid(
                "delay",
                "delay_seconds",
                format!(
                    "must be finite and <= {MAX_DELAY_SECONDS}, got {}",
                    self.delay_seconds
                ),
            ));
        }
        if !(0.0..1.0).contains(&self.decay) {
            return Err(Error::invalid(
                "delay",
                "decay",
                format!("must be in [0, 1), got {}", self.decay),
            ));
        }
        Ok(())
    }

    fn apply(&self, buffer: SampleBuffer) -> Result<SampleBuffer> {
        self.validate()?;
        if self.delay_seconds <= 0.0 {
            return Ok(buffer);
        }

        let d = self.delay_samples(buffer.sample_rate());
        let input = buffer.samples();
        let mut out = Vec::with_capacity(input.len() + d);
        out.extend_from_slice(input);
        out.resize(input.len() + d, 0.0);
        for (n, &x) in input.iter().enumerate() {
            out[n + d] += self.decay * x;
        }

        Ok(buffer.with_samples(out).normalized())
    }
}
