//! CLI command implementations.

pub mod generate;
pub mod info;
pub mod presets;
pub mod process;

use fxchain_core::linear_to_db;
use fxchain_effects::Stage;

/// One-line summary of a stage's parameters.
pub fn describe_stage(stage: &Stage) -> String {
    match stage {
        Stage::Distortion(p) => format!(
            "distortion  gain {:.2} ({:+.1} dB), threshold {:.3}",
            p.gain,
            linear_to_db(p.gain),
            p.threshold
        ),
        Stage::Delay(p) => format!(
            "delay       {:.3} s, decay {:.2}",
            p.delay_seconds, p.decay
        ),
        Stage::Lowpass(p) => {
            let mut line = format!("lowpass     {:.0} Hz", p.cutoff_hz);
            if p.seed_first_sample {
                line.push_str(", seeded");
            }
            if !p.normalize {
                line.push_str(", unnormalized");
            }
            line
        }
    }
}
