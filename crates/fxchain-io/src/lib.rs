//! WAV file I/O for the fxchain pipeline.
//!
//! Files are decoded through the sample converter, so every reader returns a
//! mono [`SampleBuffer`](fxchain_core::SampleBuffer) in the canonical ±1.0
//! domain, and every writer quantizes with rounding and saturation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fxchain_core::SampleFormat;
//! use fxchain_effects::{DistortionParams, Pipeline, StageList};
//! use fxchain_io::{read_wav, write_wav};
//!
//! let (buffer, info) = read_wav("input.wav")?;
//! println!("{} Hz, {} channel(s)", info.sample_rate, info.channels);
//!
//! let pipeline = Pipeline::new(StageList::new().with(DistortionParams::default()));
//! let processed = pipeline.process(buffer)?;
//!
//! write_wav("output.wav", &processed, SampleFormat::I16)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod wav;

pub use wav::{WavInfo, read_wav, read_wav_info, write_wav};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Format, parameter or sample error from the pipeline core.
    #[error(transparent)]
    Core(#[from] fxchain_core::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
