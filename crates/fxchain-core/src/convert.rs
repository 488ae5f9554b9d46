//! Sample format conversion into and out of the canonical float domain.
//!
//! Integer PCM is scaled by its full-scale divisor so that full scale lands
//! on ±1.0:
//!
//! | Format | To canonical |
//! |--------|--------------|
//! | `U8`   | `(x - 128) / 128` |
//! | `I16`  | `x / 32768` |
//! | `I24`  | `x / 8388608` |
//! | `I32`  | `x / 2147483648` |
//! | `F32`, `F64` | unchanged |
//!
//! The reverse direction clamps to ±1.0 first, then scales, rounds and
//! saturates into the integer range, so an over-range float can never wrap
//! around to the opposite polarity.
//!
//! Interleaved multi-channel input is averaged down to mono before it
//! becomes a [`SampleBuffer`]. This is lossy and deliberate: the pipeline
//! only processes mono.

use core::fmt;
use core::str::FromStr;

use crate::buffer::SampleBuffer;
use crate::error::{Error, Result};

/// PCM sample encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleFormat {
    /// Unsigned 8-bit, midpoint 128.
    U8,
    /// Signed 16-bit.
    I16,
    /// Signed 24-bit, stored in an `i32`.
    I24,
    /// Signed 32-bit.
    I32,
    /// 32-bit IEEE float.
    F32,
    /// 64-bit IEEE float.
    F64,
}

impl SampleFormat {
    /// Resolve a format from a WAV-style bit depth and float flag.
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat` for any combination not listed in [`SampleFormat`].
    pub fn from_bits(bits_per_sample: u16, is_float: bool) -> Result<Self> {
        match (bits_per_sample, is_float) {
            (8, false) => Ok(Self::U8),
            (16, false) => Ok(Self::I16),
            (24, false) => Ok(Self::I24),
            (32, false) => Ok(Self::I32),
            (32, true) => Ok(Self::F32),
            (64, true) => Ok(Self::F64),
            (bits, true) => Err(Error::UnsupportedFormat(format!("{bits}-bit float"))),
            (bits, false) => Err(Error::UnsupportedFormat(format!("{bits}-bit integer"))),
        }
    }

    /// Bits per sample.
    pub fn bits_per_sample(self) -> u16 {
        match self {
            Self::U8 => 8,
            Self::I16 => 16,
            Self::I24 => 24,
            Self::I32 | Self::F32 => 32,
            Self::F64 => 64,
        }
    }

    /// Whether the format stores IEEE floats.
    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Short lowercase name (`"i16"`, `"f32"`...).
    pub fn name(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::I16 => "i16",
            Self::I24 => "i24",
            Self::I32 => "i32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        }
    }

    /// Full-scale magnitude: the divisor applied on the way in.
    pub fn full_scale(self) -> f64 {
        match self {
            Self::U8 => 128.0,
            Self::I16 => 32768.0,
            Self::I24 => 8_388_608.0,
            Self::I32 => 2_147_483_648.0,
            Self::F32 | Self::F64 => 1.0,
        }
    }
}

impl fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u8" | "pcm8" | "8" => Ok(Self::U8),
            "i16" | "pcm16" | "16" => Ok(Self::I16),
            "i24" | "pcm24" | "24" => Ok(Self::I24),
            "i32" | "pcm32" => Ok(Self::I32),
            "f32" | "float32" | "float" | "32" => Ok(Self::F32),
            "f64" | "float64" | "double" => Ok(Self::F64),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Interleaved raw samples tagged with their encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSamples {
    /// Unsigned 8-bit PCM.
    U8(Vec<u8>),
    /// Signed 16-bit PCM.
    I16(Vec<i16>),
    /// Signed 24-bit PCM in the low bits of each `i32`.
    I24(Vec<i32>),
    /// Signed 32-bit PCM.
    I32(Vec<i32>),
    /// 32-bit float.
    F32(Vec<f32>),
    /// 64-bit float.
    F64(Vec<f64>),
}

impl RawSamples {
    /// The encoding of these samples.
    pub fn format(&self) -> SampleFormat {
        match self {
            Self::U8(_) => SampleFormat::U8,
            Self::I16(_) => SampleFormat::I16,
            Self::I24(_) => SampleFormat::I24,
            Self::I32(_) => SampleFormat::I32,
            Self::F32(_) => SampleFormat::F32,
            Self::F64(_) => SampleFormat::F64,
        }
    }

    /// Number of interleaved samples (frames × channels).
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::I16(v) => v.len(),
            Self::I24(v) | Self::I32(v) => v.len(),
            Self::F32(v) => v.len(),
            Self::F64(v) => v.len(),
        }
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Scale every sample into the canonical domain, keeping interleaving.
    fn to_f32(&self) -> Vec<f32> {
        match self {
            Self::U8(v) => v.iter().map(|&s| (f32::from(s) - 128.0) / 128.0).collect(),
            Self::I16(v) => v.iter().map(|&s| f32::from(s) / 32768.0).collect(),
            Self::I24(v) => v
                .iter()
                .map(|&s| (f64::from(s) / SampleFormat::I24.full_scale()) as f32)
                .collect(),
            Self::I32(v) => v
                .iter()
                .map(|&s| (f64::from(s) / SampleFormat::I32.full_scale()) as f32)
                .collect(),
            Self::F32(v) => v.clone(),
            Self::F64(v) => v.iter().map(|&s| s as f32).collect(),
        }
    }
}

/// Average interleaved frames down to a single channel.
///
/// A trailing partial frame is dropped. `channels <= 1` copies the input.
///
/// # Example
///
/// ```rust
/// use fxchain_core::downmix;
///
/// let mono = downmix(&[1.0, 0.0, 0.5, 0.5], 2);
/// assert_eq!(mono, vec![0.5, 0.5]);
/// ```
pub fn downmix(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return interleaved.to_vec();
    }
    let scale = 1.0 / channels as f32;
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Convert raw interleaved samples into a mono canonical buffer.
///
/// # Errors
///
/// - `InvalidParameter` if `channels` or `sample_rate` is zero
/// - `NumericInstability` if float input contains NaN or infinity
pub fn to_canonical(raw: RawSamples, channels: u16, sample_rate: u32) -> Result<SampleBuffer> {
    if channels == 0 {
        return Err(Error::invalid("converter", "channels", "must be > 0"));
    }
    let interleaved = raw.to_f32();
    let mono = if channels > 1 {
        downmix(&interleaved, usize::from(channels))
    } else {
        interleaved
    };
    SampleBuffer::new(mono, sample_rate)
}

/// Quantize one canonical sample to an integer code in `[min, max]`.
#[inline]
fn quantize(sample: f32, full_scale: f64, min: f64, max: f64) -> f64 {
    (f64::from(sample.clamp(-1.0, 1.0)) * full_scale)
        .round()
        .clamp(min, max)
}

/// Convert a canonical buffer to raw samples in `target` format.
///
/// Integer targets clamp to ±1.0 before quantizing. Float targets are copied
/// unchanged.
pub fn from_canonical(buffer: &SampleBuffer, target: SampleFormat) -> RawSamples {
    let samples = buffer.samples();
    let full_scale = target.full_scale();
    match target {
        SampleFormat::U8 => RawSamples::U8(
            samples
                .iter()
                .map(|&s| (quantize(s, full_scale, -128.0, 127.0) + 128.0) as u8)
                .collect(),
        ),
        SampleFormat::I16 => RawSamples::I16(
            samples
                .iter()
                .map(|&s| quantize(s, full_scale, -32768.0, 32767.0) as i16)
                .collect(),
        ),
        SampleFormat::I24 => RawSamples::I24(
            samples
                .iter()
                .map(|&s| quantize(s, full_scale, -8_388_608.0, 8_388_607.0) as i32)
                .collect(),
        ),
        SampleFormat::I32 => RawSamples::I32(
            samples
                .iter()
                .map(|&s| quantize(s, full_scale, -2_147_483_648.0, 2_147_483_647.0) as i32)
                .collect(),
        ),
        SampleFormat::F32 => RawSamples::F32(samples.to_vec()),
        SampleFormat::F64 => RawSamples::F64(samples.iter().map(|&s| f64::from(s)).collect()),
    }
}
