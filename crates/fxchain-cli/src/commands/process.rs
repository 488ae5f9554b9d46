//! File-based effect processing command.

use super::describe_stage;
use super::presets::resolve_preset;
use clap::Args;
use fxchain_config::{Control, ControlSet, MapperConfig, ParameterMapper, parse_control};
use fxchain_core::{SampleFormat, linear_to_db};
use fxchain_effects::{
    BufferStage, DelayParams, DistortionParams, LowpassParams, Pipeline, Stage, StageList,
};
use fxchain_io::{read_wav, write_wav};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Arguments that replace the explicit stage flags.
const STAGE_SOURCES: [&str; 3] = ["controls", "mapper_config", "preset"];

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Normalized control (e.g., "dist=0.5", "cutoff=2000"), repeatable
    #[arg(short, long = "control", value_parser = parse_control, conflicts_with = "preset")]
    controls: Vec<(Control, f32)>,

    /// Mapper settings (TOML) used with --control
    #[arg(long, value_name = "FILE", conflicts_with = "preset")]
    mapper_config: Option<PathBuf>,

    /// Factory preset name or preset file (TOML)
    #[arg(short, long, value_name = "NAME|FILE")]
    preset: Option<String>,

    /// Distortion gain (linear)
    #[arg(long, default_value_t = DistortionParams::DEFAULT_GAIN, conflicts_with_all = STAGE_SOURCES)]
    gain: f32,

    /// Distortion clip threshold
    #[arg(long, default_value_t = DistortionParams::DEFAULT_THRESHOLD, conflicts_with_all = STAGE_SOURCES)]
    clip: f32,

    /// Delay time in seconds (0 disables the echo)
    #[arg(long, default_value_t = DelayParams::DEFAULT_DELAY_SECONDS, conflicts_with_all = STAGE_SOURCES)]
    delay_time: f32,

    /// Level of the echo, in [0, 1)
    #[arg(long, default_value_t = DelayParams::DEFAULT_DECAY, conflicts_with_all = STAGE_SOURCES)]
    decay: f32,

    /// Lowpass cutoff in Hz
    #[arg(long, default_value_t = LowpassParams::DEFAULT_CUTOFF_HZ, conflicts_with_all = STAGE_SOURCES)]
    cutoff: f32,

    /// Seed the lowpass from the first input sample instead of zero
    #[arg(long)]
    seed_first_sample: bool,

    /// Output bit depth (8, 16, 24, or 32)
    #[arg(long, default_value = "16")]
    bit_depth: u16,

    /// Write IEEE float samples (with --bit-depth 32)
    #[arg(long)]
    float: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let format = SampleFormat::from_bits(args.bit_depth, args.float)?;

    let mut stages = build_stages(&args)?;
    if args.seed_first_sample {
        stages = stages.into_iter().map(seed_lowpass).collect();
    }
    let pipeline = Pipeline::new(stages);
    pipeline.validate()?;

    println!("Reading {}...", args.input.display());
    let (buffer, info) = read_wav(&args.input)?;
    println!(
        "  {} samples, {} Hz, {:.2}s ({} channel(s), {})",
        buffer.len(),
        info.sample_rate,
        buffer.duration_secs(),
        info.channels,
        info.format
    );

    if pipeline.is_empty() {
        println!("No stages, writing input unchanged");
    } else {
        println!("Processing with {} stage(s):", pipeline.len());
        for stage in pipeline.stages() {
            println!("  {}", describe_stage(stage));
        }
    }

    let input_len = buffer.len();
    let input_peak = buffer.peak();

    let pb = ProgressBar::new(pipeline.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    let output = pipeline.process_with(buffer, |_, stage| {
        pb.set_message(stage.kind().name());
        pb.inc(1);
    })?;
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  {input_len} samples, Peak {:.1} dB",
        linear_to_db(input_peak)
    );
    println!(
        "  Output: {} samples, Peak {:.1} dB",
        output.len(),
        linear_to_db(output.peak())
    );

    println!("\nWriting {} ({format})...", args.output.display());
    write_wav(&args.output, &output, format)?;
    println!("Done!");

    Ok(())
}

/// Pick the stage source: preset, then controls, then explicit flags.
fn build_stages(args: &ProcessArgs) -> anyhow::Result<StageList> {
    if let Some(name) = &args.preset {
        let preset = resolve_preset(name)?;
        println!("Using preset: {}", preset.name);
        return Ok(preset.stages);
    }

    if !args.controls.is_empty() || args.mapper_config.is_some() {
        let config = match &args.mapper_config {
            Some(path) => MapperConfig::load(path)?,
            None => MapperConfig::default(),
        };
        let mut controls = ControlSet::new();
        for &(control, value) in &args.controls {
            controls.insert(control, value)?;
        }
        let mapper = ParameterMapper::new(config);
        let deferred = mapper.deferred_controls(&controls);
        if !deferred.is_empty() {
            let names: Vec<&str> = deferred.iter().map(|c| c.name()).collect();
            println!("Not processed here: {}", names.join(", "));
        }
        tracing::debug!(controls = controls.len(), "mapping controls");
        return Ok(mapper.build_stage_list(&controls)?);
    }

    Ok(StageList::new()
        .with(DistortionParams::new(args.gain, args.clip))
        .with(DelayParams::new(args.delay_time, args.decay))
        .with(LowpassParams::new(args.cutoff)))
}

fn seed_lowpass(stage: Stage) -> Stage {
    match stage {
        Stage::Lowpass(p) => Stage::Lowpass(p.with_seed_first_sample(true)),
        other => other,
    }
}
