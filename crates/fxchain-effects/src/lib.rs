//! fxchain Effects - buffer-level effect stages and the pipeline executor
//!
//! Each stage is a pure function of a [`SampleBuffer`](fxchain_core::SampleBuffer)
//! and a typed parameter record:
//!
//! - [`DistortionParams`] - Gain into a symmetric hard clip
//! - [`DelayParams`] - Single-tap echo that extends the buffer
//! - [`LowpassParams`] - One-pole recursive lowpass
//!
//! The closed [`Stage`] enum wraps one record per kind, a [`StageList`] orders
//! them, and a [`Pipeline`] runs the list all-or-nothing.
//!
//! ## Example
//!
//! ```rust
//! use fxchain_core::SampleBuffer;
//! use fxchain_effects::{DelayParams, DistortionParams, LowpassParams, Pipeline, StageList};
//!
//! let stages = StageList::new()
//!     .with(DistortionParams::new(8.0, 0.3))
//!     .with(DelayParams::new(0.25, 0.4))
//!     .with(LowpassParams::new(2000.0));
//!
//! let input: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.0627).sin()).collect();
//! let buffer = SampleBuffer::new(input, 44100).unwrap();
//!
//! let output = Pipeline::new(stages).process(buffer).unwrap();
//! assert_eq!(output.len(), 4410 + 11025);
//! ```

pub mod delay;
pub mod distortion;
pub mod lowpass;
pub mod pipeline;
pub mod stage;

pub use delay::{DelayParams, MAX_DELAY_SECONDS};
pub use distortion::DistortionParams;
pub use lowpass::LowpassParams;
pub use pipeline::{Pipeline, process};
pub use stage::{BufferStage, Stage, StageKind, StageList};
