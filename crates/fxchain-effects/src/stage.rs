//! Stage trait, the closed stage enum, and ordered stage lists.
//!
//! ## Design Decisions
//!
//! - **Closed set**: the reference stages are a fixed enum with one typed
//!   parameter record per variant, so a stage list can be matched
//!   exhaustively and serialized without a lookup table.
//!
//! - **Pure stages**: [`BufferStage::apply`] takes the buffer by value and
//!   returns the transformed buffer. Nothing persists between calls.

use core::fmt;
use core::str::FromStr;

use fxchain_core::{Error, Result, SampleBuffer};
use serde::{Deserialize, Serialize};

use crate::delay::DelayParams;
use crate::distortion::DistortionParams;
use crate::lowpass::LowpassParams;

/// A buffer-in, buffer-out audio transformation.
///
/// Implemented by every parameter record and by [`Stage`] itself.
///
/// # Example
///
/// ```rust
/// use fxchain_core::SampleBuffer;
/// use fxchain_effects::{BufferStage, DistortionParams};
///
/// let stage = DistortionParams::new(2.0, 0.5);
/// let buffer = SampleBuffer::new(vec![0.1, 0.4, -0.4], 48000).unwrap();
/// let out = stage.apply(buffer).unwrap();
/// assert!((out.peak() - 1.0).abs() < 1e-6);
/// ```
pub trait BufferStage {
    /// Which kind of stage this is.
    fn kind(&self) -> StageKind;

    /// Check the parameters against their valid ranges.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` naming the first out-of-range parameter.
    fn validate(&self) -> Result<()>;

    /// Validate, then transform the buffer.
    fn apply(&self, buffer: SampleBuffer) -> Result<SampleBuffer>;
}

/// Discriminant of [`Stage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageKind {
    /// Hard-clipping distortion.
    Distortion,
    /// Single-tap echo.
    Delay,
    /// One-pole lowpass.
    Lowpass,
}

impl StageKind {
    /// All kinds in the default processing order.
    pub const DEFAULT_ORDER: [StageKind; 3] =
        [StageKind::Distortion, StageKind::Delay, StageKind::Lowpass];

    /// Lowercase identifier used in presets and logs.
    pub fn name(self) -> &'static str {
        match self {
            StageKind::Distortion => "distortion",
            StageKind::Delay => "delay",
            StageKind::Lowpass => "lowpass",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StageKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "distortion" | "dist" => Ok(StageKind::Distortion),
            "delay" | "echo" => Ok(StageKind::Delay),
            "lowpass" | "lpf" => Ok(StageKind::Lowpass),
            other => Err(Error::invalid(
                "pipeline",
                "stage",
                format!("unknown stage kind '{other}'"),
            )),
        }
    }
}

/// One configured stage.
///
/// Serialized with an internal `type` tag so presets read naturally:
///
/// ```toml
/// [[stages]]
/// type = "delay"
/// delay_seconds = 0.25
/// decay = 0.4
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Stage {
    /// Gain into hard clip.
    Distortion(DistortionParams),
    /// Single-tap echo.
    Delay(DelayParams),
    /// One-pole lowpass.
    Lowpass(LowpassParams),
}

impl BufferStage for Stage {
    fn kind(&self) -> StageKind {
        match self {
            Stage::Distortion(_) => StageKind::Distortion,
            Stage::Delay(_) => StageKind::Delay,
            Stage::Lowpass(_) => StageKind::Lowpass,
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            Stage::Distortion(p) => p.validate(),
            Stage::Delay(p) => p.validate(),
            Stage::Lowpass(p) => p.validate(),
        }
    }

    fn apply(&self, buffer: SampleBuffer) -> Result<SampleBuffer> {
        match self {
            Stage::Distortion(p) => p.apply(buffer),
            Stage::Delay(p) => p.apply(buffer),
            Stage::Lowpass(p) => p.apply(buffer),
        }
    }
}

impl From<DistortionParams> for Stage {
    fn from(params: DistortionParams) -> Self {
        Stage::Distortion(params)
    }
}

impl From<DelayParams> for Stage {
    fn from(params: DelayParams) -> Self {
        Stage::Delay(params)
    }
}

impl From<LowpassParams> for Stage {
    fn from(params: LowpassParams) -> Self {
        Stage::Lowpass(params)
    }
}

/// An ordered list of stages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StageList(Vec<Stage>);

impl StageList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a stage.
    pub fn push(&mut self, stage: impl Into<Stage>) {
        self.0.push(stage.into());
    }

    /// Append a stage, builder style.
    pub fn with(mut self, stage: impl Into<Stage>) -> Self {
        self.push(stage);
        self
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get a stage by index.
    pub fn get(&self, index: usize) -> Option<&Stage> {
        self.0.get(index)
    }

    /// Iterate over stages in processing order.
    pub fn iter(&self) -> core::slice::Iter<'_, Stage> {
        self.0.iter()
    }

    /// Kinds of the stages in processing order.
    pub fn kinds(&self) -> Vec<StageKind> {
        self.0.iter().map(|stage| stage.kind()).collect()
    }

    /// Stably reorder stages so their kinds follow `order`.
    ///
    /// Kinds missing from `order` keep their relative position after all
    /// ordered kinds.
    pub fn sort_by_order(&mut self, order: &[StageKind]) {
        let rank = |stage: &Stage| {
            let kind = stage.kind();
            order.iter().position(|&k| k == kind).unwrap_or(order.len())
        };
        self.0.sort_by_key(rank);
    }
}

impl FromIterator<Stage> for StageList {
    fn from_iter<I: IntoIterator<Item = Stage>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for StageList {
    type Item = Stage;
    type IntoIter = std::vec::IntoIter<Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a StageList {
    type Item = &'a Stage;
    type IntoIter = core::slice::Iter<'a, Stage>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
