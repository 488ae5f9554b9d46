//! fxchain Core - buffers and numeric plumbing for the effects pipeline
//!
//! This crate holds everything the effect stages share but that is not an
//! effect in itself.
//!
//! # Core Abstractions
//!
//! - [`SampleBuffer`] - Mono `f32` samples in the canonical ±1.0 domain plus a sample rate
//! - [`Error`] - The three failure kinds every stage and conversion can report
//!
//! ## Sample Conversion
//!
//! - [`SampleFormat`] / [`RawSamples`] - Integer and float PCM encodings
//! - [`to_canonical`] / [`from_canonical`] - Scale into and out of the canonical domain
//! - [`downmix`] - Average interleaved channels down to mono
//!
//! ## Normalization Guard
//!
//! - [`normalize`] - Peak-normalize in place with an epsilon guard for silence
//! - [`peak`] - Maximum absolute sample value
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`linear_to_db`], [`hard_clip`]
//!
//! # Example
//!
//! ```rust
//! use fxchain_core::{RawSamples, SampleFormat, from_canonical, to_canonical};
//!
//! let raw = RawSamples::I16(vec![0, 16384, -16384, 32767]);
//! let buffer = to_canonical(raw, 1, 44100).unwrap();
//! assert_eq!(buffer.samples()[1], 0.5);
//!
//! let back = from_canonical(&buffer, SampleFormat::I16);
//! assert_eq!(back.format(), SampleFormat::I16);
//! ```

pub mod buffer;
pub mod convert;
pub mod error;
pub mod math;
pub mod normalize;

pub use buffer::SampleBuffer;
pub use convert::{RawSamples, SampleFormat, downmix, from_canonical, to_canonical};
pub use error::{Error, Result};
pub use math::{db_to_linear, hard_clip, linear_to_db};
pub use normalize::{NORMALIZE_EPSILON, normalize, peak};
