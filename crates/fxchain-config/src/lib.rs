//! Controls, parameter mapping and presets for the fxchain pipeline.
//!
//! # Features
//!
//! - **Controls**: [`ControlSet`] holds the named UI control values of one request
//! - **Parameter Mapper**: [`ParameterMapper`] turns controls into an ordered
//!   [`StageList`](fxchain_effects::StageList), tuned by a TOML-loadable [`MapperConfig`]
//! - **Presets**: Load and save stage lists as TOML files
//! - **Factory Presets**: Built-in presets, `demo` among them
//!
//! # Example
//!
//! ```rust
//! use fxchain_config::{ControlSet, ParameterMapper};
//! use fxchain_effects::StageKind;
//!
//! let controls = ControlSet::from_pairs([
//!     ("cutoff", 2000.0),
//!     ("dist", 0.5),
//!     ("delay", 0.25),
//! ])
//! .unwrap();
//!
//! let stages = ParameterMapper::default().build_stage_list(&controls).unwrap();
//! assert_eq!(stages.kinds(), StageKind::DEFAULT_ORDER.to_vec());
//! ```

mod control;
mod error;
mod mapper;
mod preset;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use control::{Control, ControlSet, parse_control};
pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use mapper::{
    DEFAULT_DRIVE_SCALE_DB, MapperConfig, ParameterMapper, build_stage_list, clipping_threshold_db,
};
pub use preset::Preset;
