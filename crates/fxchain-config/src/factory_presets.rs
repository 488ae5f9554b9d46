//! Factory presets bundled with the library.
//!
//! Always available without external files. `demo` is the chain the
//! command line runs by default.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &["demo", "clean", "crunch", "slapback", "dark"];

/// TOML content for factory presets, embedded at compile time.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("demo", DEMO_PRESET),
    ("clean", CLEAN_PRESET),
    ("crunch", CRUNCH_PRESET),
    ("slapback", SLAPBACK_PRESET),
    ("dark", DARK_PRESET),
];

const DEMO_PRESET: &str = r#"
name = "Demo"
description = "Hard clip into a quarter-second echo, smoothed at 2 kHz"

[[stages]]
type = "distortion"
gain = 8.0
threshold = 0.3

[[stages]]
type = "delay"
delay_seconds = 0.25
decay = 0.4

[[stages]]
type = "lowpass"
cutoff_hz = 2000.0
"#;

const CLEAN_PRESET: &str = r#"
name = "Clean"
description = "No processing"
stages = []
"#;

const CRUNCH_PRESET: &str = r#"
name = "Crunch"
description = "Moderate drive with the top end rolled off"

[[stages]]
type = "distortion"
gain = 3.0
threshold = 0.6

[[stages]]
type = "lowpass"
cutoff_hz = 4500.0
"#;

const SLAPBACK_PRESET: &str = r#"
name = "Slapback"
description = "Short single repeat"

[[stages]]
type = "delay"
delay_seconds = 0.12
decay = 0.5
"#;

const DARK_PRESET: &str = r#"
name = "Dark"
description = "Low cutoff, seeded from the first sample"

[[stages]]
type = "lowpass"
cutoff_hz = 800.0
seed_first_sample = true
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use fxchain_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by name.
///
/// Matches the identifier first, then the preset's display name, both
/// case-insensitively.
///
/// ```rust
/// use fxchain_config::get_factory_preset;
///
/// let demo = get_factory_preset("Demo").unwrap();
/// assert_eq!(demo.len(), 3);
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    for (preset_name, toml) in FACTORY_PRESETS_TOML {
        if preset_name.to_lowercase() == name_lower {
            return Preset::from_toml(toml).ok();
        }
    }

    for (_, toml) in FACTORY_PRESETS_TOML {
        if let Ok(preset) = Preset::from_toml(toml)
            && preset.name.to_lowercase() == name_lower
        {
            return Some(preset);
        }
    }

    None
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check whether a name refers to a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
