//! Test signal generation command.

use clap::{Args, ValueEnum};
use fxchain_core::{SampleBuffer, SampleFormat};
use fxchain_io::write_wav;
use std::f32::consts::TAU;
use std::path::PathBuf;

/// Waveform types for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliWaveform {
    /// Decaying tone with 2nd and 3rd harmonics
    #[default]
    Guitar,
    /// Plain sine
    Sine,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Waveform to synthesize
    #[arg(long, value_enum, default_value_t = CliWaveform::Guitar)]
    waveform: CliWaveform,

    /// Fundamental frequency in Hz
    #[arg(long, default_value = "440.0")]
    freq: f32,

    /// Duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "44100")]
    sample_rate: u32,

    /// Peak amplitude (0-1)
    #[arg(long, default_value = "1.0")]
    amplitude: f32,

    /// Output bit depth (8, 16, 24, or 32)
    #[arg(long, default_value = "16")]
    bit_depth: u16,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    if !(args.freq.is_finite() && args.freq > 0.0) {
        anyhow::bail!("--freq must be a positive frequency, got {}", args.freq);
    }
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be positive, got {}", args.duration);
    }
    if !(0.0..=1.0).contains(&args.amplitude) {
        anyhow::bail!("--amplitude must be in [0, 1], got {}", args.amplitude);
    }
    let format = SampleFormat::from_bits(args.bit_depth, false)?;

    let len = (args.duration * args.sample_rate as f32) as usize;
    let samples = match args.waveform {
        CliWaveform::Guitar => guitar(args.freq, len, args.sample_rate),
        CliWaveform::Sine => sine(args.freq, len, args.sample_rate),
    };
    let mut buffer = SampleBuffer::new(samples, args.sample_rate)?.normalized();
    for sample in buffer.samples_mut() {
        *sample *= args.amplitude;
    }

    println!(
        "Generating {:?} at {} Hz: {} samples ({:.2}s at {} Hz)",
        args.waveform,
        args.freq,
        buffer.len(),
        buffer.duration_secs(),
        args.sample_rate
    );
    write_wav(&args.output, &buffer, format)?;
    println!("Saved to {}", args.output.display());
    Ok(())
}

/// Harmonic-rich tone with an `exp(-3t)` envelope.
fn guitar(f0: f32, len: usize, sample_rate: u32) -> Vec<f32> {
    (0..len)
        .map(|n| {
            let t = n as f32 / sample_rate as f32;
            let w = TAU * f0 * t;
            let tone = w.sin() + 0.5 * (2.0 * w).sin() + 0.3 * (3.0 * w).sin();
            tone * (-3.0 * t).exp()
        })
        .collect()
}

fn sine(freq: f32, len: usize, sample_rate: u32) -> Vec<f32> {
    (0..len)
        .map(|n| (TAU * freq * n as f32 / sample_rate as f32).sin())
        .collect()
}
