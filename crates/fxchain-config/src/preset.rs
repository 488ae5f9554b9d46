//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use fxchain_effects::{Pipeline, Stage, StageList};

use crate::error::ConfigError;

/// A named, saved stage list.
///
/// # TOML Format
///
/// ```toml
/// name = "Demo"
/// description = "Distortion into echo into a 2 kHz lowpass"
///
/// [[stages]]
/// type = "distortion"
/// gain = 8.0
/// threshold = 0.3
///
/// [[stages]]
/// type = "lowpass"
/// cutoff_hz = 2000.0
/// ```
///
/// Stage parameters left out take their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Stages in processing order.
    #[serde(default)]
    pub stages: StageList,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            stages: StageList::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a stage to the preset.
    pub fn with_stage(mut self, stage: impl Into<Stage>) -> Self {
        self.stages.push(stage);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset = Self::from_toml(&content)?;
        tracing::debug!(path = %path.display(), name = %preset.name, "loaded preset");
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the preset has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Check every stage's parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Ok(self.pipeline().validate()?)
    }

    /// Build a pipeline running this preset's stages.
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(self.stages.clone())
    }
}
