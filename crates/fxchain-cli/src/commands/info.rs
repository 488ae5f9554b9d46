//! Display WAV file metadata.

use clap::Args;
use fxchain_core::linear_to_db;
use fxchain_io::{WavInfo, read_wav, read_wav_info};
use std::path::PathBuf;

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: PathBuf,

    /// Also decode the samples and report the mono peak level
    #[arg(long)]
    pub stats: bool,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;
    let file_size = std::fs::metadata(&args.file)?.len();

    row("File", args.file.display());
    row("Format", encoding(&info));
    row("Channels", info.channels);
    row("Sample Rate", format_args!("{} Hz", info.sample_rate));
    row(
        "Duration",
        format_args!("{:.3}s ({} frames)", info.duration_secs, info.num_frames),
    );
    row("File Size", format_bytes(file_size));

    if args.stats {
        let (buffer, _) = read_wav(&args.file)?;
        let peak = buffer.peak();
        row(
            "Peak",
            format_args!("{:.4} ({:.1} dBFS, mono)", peak, linear_to_db(peak)),
        );
    }

    Ok(())
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("{:<12} {value}", format!("{label}:"));
}

fn encoding(info: &WavInfo) -> String {
    let kind = if info.format.is_float() {
        "IEEE Float"
    } else {
        "PCM"
    };
    format!("{kind} {}-bit ({})", info.bits_per_sample(), info.format)
}

fn format_bytes(bytes: u64) -> String {
    match bytes {
        b if b < 1024 => format!("{b} B"),
        b if b < 1024 * 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
    }
}
