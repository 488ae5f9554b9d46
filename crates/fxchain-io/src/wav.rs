//! WAV file reading and writing.

use crate::Result;
use fxchain_core::{
    Error as CoreError, RawSamples, SampleBuffer, SampleFormat, from_canonical, to_canonical,
};
use hound::{WavReader, WavWriter};
use std::io::Read;
use std::path::Path;

/// WAV file metadata extracted without loading sample data.
#[derive(Debug, Clone, PartialEq)]
pub struct WavInfo {
    /// Number of audio channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Total number of sample frames (samples per channel).
    pub num_frames: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Sample encoding.
    pub format: SampleFormat,
}

impl WavInfo {
    fn from_spec(spec: hound::WavSpec, total_samples: u64) -> Result<Self> {
        let format = SampleFormat::from_bits(
            spec.bits_per_sample,
            spec.sample_format == hound::SampleFormat::Float,
        )?;
        let num_frames = total_samples / u64::from(spec.channels.max(1));
        Ok(Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            num_frames,
            duration_secs: num_frames as f64 / f64::from(spec.sample_rate.max(1)),
            format,
        })
    }

    /// Bit depth per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.format.bits_per_sample()
    }
}

/// Read WAV metadata without loading sample data.
///
/// # Errors
///
/// `Wav` if the header cannot be parsed, `Core(UnsupportedFormat)` for a
/// bit depth the converter does not handle.
pub fn read_wav_info<P: AsRef<Path>>(path: P) -> Result<WavInfo> {
    let reader = WavReader::open(path)?;
    WavInfo::from_spec(reader.spec(), u64::from(reader.len()))
}

/// Read a WAV file into a canonical mono buffer.
///
/// Multi-channel files are mixed down to mono by averaging each frame.
///
/// # Example
/// ```ignore
/// let (buffer, info) = read_wav("input.wav")?;
/// println!("Loaded {} samples at {} Hz", buffer.len(), info.sample_rate);
/// ```
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(SampleBuffer, WavInfo)> {
    let path = path.as_ref();
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let info = WavInfo::from_spec(spec, u64::from(reader.len()))?;

    let raw = read_raw(reader, info.format)?;
    let buffer = to_canonical(raw, spec.channels, spec.sample_rate)?;

    tracing::debug!(
        path = %path.display(),
        format = %info.format,
        channels = info.channels,
        sample_rate = info.sample_rate,
        frames = buffer.len(),
        "read wav"
    );
    Ok((buffer, info))
}

fn read_raw<R: Read>(reader: WavReader<R>, format: SampleFormat) -> Result<RawSamples> {
    fn collect<R: Read, S: hound::Sample>(reader: WavReader<R>) -> Result<Vec<S>> {
        Ok(reader
            .into_samples::<S>()
            .collect::<std::result::Result<Vec<_>, _>>()?)
    }

    Ok(match format {
        // hound hands 8-bit PCM back re-centred on zero
        SampleFormat::U8 => RawSamples::U8(
            collect::<R, i8>(reader)?
                .into_iter()
                .map(|v| (i16::from(v) + 128) as u8)
                .collect(),
        ),
        SampleFormat::I16 => RawSamples::I16(collect(reader)?),
        SampleFormat::I24 => RawSamples::I24(collect(reader)?),
        SampleFormat::I32 => RawSamples::I32(collect(reader)?),
        SampleFormat::F32 => RawSamples::F32(collect(reader)?),
        SampleFormat::F64 => return Err(f64_unsupported()),
    })
}

fn f64_unsupported() -> crate::Error {
    CoreError::UnsupportedFormat("64-bit float WAV".to_string()).into()
}

/// Write a buffer as a mono WAV file in `format`.
///
/// Integer formats are quantized by rounding and saturate at full scale.
///
/// # Errors
///
/// `Core(UnsupportedFormat)` for 64-bit float, which WAV writers here do
/// not produce; `Wav` for any write failure.
///
/// # Example
/// ```ignore
/// let buffer = SampleBuffer::silence(48000, 48000)?;
/// write_wav("output.wav", &buffer, SampleFormat::I16)?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &SampleBuffer, format: SampleFormat) -> Result<()> {
    if format == SampleFormat::F64 {
        return Err(f64_unsupported());
    }

    let path = path.as_ref();
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: format.bits_per_sample(),
        sample_format: if format.is_float() {
            hound::SampleFormat::Float
        } else {
            hound::SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, spec)?;

    match from_canonical(buffer, format) {
        RawSamples::U8(samples) => {
            for v in samples {
                writer.write_sample((i16::from(v) - 128) as i8)?;
            }
        }
        RawSamples::I16(samples) => {
            for v in samples {
                writer.write_sample(v)?;
            }
        }
        RawSamples::I24(samples) | RawSamples::I32(samples) => {
            for v in samples {
                writer.write_sample(v)?;
            }
        }
        RawSamples::F32(samples) => {
            for v in samples {
                writer.write_sample(v)?;
            }
        }
        RawSamples::F64(_) => return Err(f64_unsupported()),
    }

    writer.finalize()?;
    tracing::debug!(path = %path.display(), %format, samples = buffer.len(), "wrote wav");
    Ok(())
}
