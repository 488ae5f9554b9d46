//! Normalized controls to stage parameters.
//!
//! # Mapping
//!
//! | Control | Stage | Parameter |
//! |---------|-------|-----------|
//! | `dist` | distortion | `gain = db_to_linear(dist * drive_scale_db)` |
//! | `clipping` | distortion | `threshold = db_to_linear(-0.1 - clipping * 1.9)` |
//! | `delay` | delay | `delay_seconds = delay * delay_time_scale`, `decay = delay_decay` |
//! | `cutoff` | lowpass | `cutoff_hz = cutoff` (Hz, not normalized) |
//!
//! A unipolar control enables its stage only when strictly above 0. When
//! `clipping` is on but `dist` is not, a unity-gain distortion stage acts as
//! a plain clipper. Stages come out in [`MapperConfig::order`] regardless of
//! the order controls were given in, and every mapped parameter is validated
//! rather than clamped.

use std::path::Path;

use fxchain_core::{Error, Result, db_to_linear};
use fxchain_effects::{
    BufferStage, DelayParams, DistortionParams, LowpassParams, StageKind, StageList,
};
use serde::{Deserialize, Serialize};

use crate::control::{Control, ControlSet};
use crate::error::ConfigError;

/// Default dB of drive per unit of `dist`.
pub const DEFAULT_DRIVE_SCALE_DB: f32 = 30.0;

/// Clip threshold in dB for a `clipping` control value.
///
/// 0 maps to -0.1 dB, 1 to -2.0 dB; larger values clip harder.
#[inline]
pub fn clipping_threshold_db(clipping: f32) -> f32 {
    -0.1 - clipping * 1.9
}

/// Tunable constants of the control mapping.
///
/// Every field has a default, so a TOML file only needs the fields it
/// changes:
///
/// ```toml
/// drive_scale_db = 40.0
/// delay_time_scale = 0.8
/// order = ["lowpass", "distortion", "delay"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    /// dB of drive per unit of `dist`.
    pub drive_scale_db: f32,
    /// Distortion threshold when `clipping` is off.
    pub default_threshold: f32,
    /// Seconds of delay per unit of `delay`.
    pub delay_time_scale: f32,
    /// Decay of the echo, in [0, 1).
    pub delay_decay: f32,
    /// Lowpass cutoff used when the `cutoff` control is off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_cutoff_hz: Option<f32>,
    /// Seed the lowpass from the first input sample.
    pub seed_first_sample: bool,
    /// Peak-normalize after the lowpass.
    pub normalize_lowpass: bool,
    /// Processing order, a permutation of the three stage kinds.
    pub order: Vec<StageKind>,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            drive_scale_db: DEFAULT_DRIVE_SCALE_DB,
            default_threshold: DistortionParams::DEFAULT_THRESHOLD,
            delay_time_scale: 1.0,
            delay_decay: 0.3,
            default_cutoff_hz: None,
            seed_first_sample: false,
            normalize_lowpass: true,
            order: StageKind::DEFAULT_ORDER.to_vec(),
        }
    }
}

impl MapperConfig {
    /// Load and validate a mapper configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> std::result::Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate a mapper configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, ConfigError> {
        let config: MapperConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert the configuration to a TOML string.
    pub fn to_toml(&self) -> std::result::Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field against its valid range.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` with stage `"mapper"` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.drive_scale_db.is_finite() || self.drive_scale_db < 0.0 {
            return Err(invalid(
                "drive_scale_db",
                format!("must be finite and >= 0, got {}", self.drive_scale_db),
            ));
        }
        if !self.default_threshold.is_finite() || self.default_threshold <= 0.0 {
            return Err(invalid(
                "default_threshold",
                format!("must be finite and > 0, got {}", self.default_threshold),
            ));
        }
        if !self.delay_time_scale.is_finite() || self.delay_time_scale < 0.0 {
            return Err(invalid(
                "delay_time_scale",
                format!("must be finite and >= 0, got {}", self.delay_time_scale),
            ));
        }
        if !(0.0..1.0).contains(&self.delay_decay) {
            return Err(invalid(
                "delay_decay",
                format!("must be in [0, 1), got {}", self.delay_decay),
            ));
        }
        if let Some(cutoff) = self.default_cutoff_hz
            && (!cutoff.is_finite() || cutoff <= 0.0)
        {
            return Err(invalid(
                "default_cutoff_hz",
                format!("must be finite and > 0, got {cutoff}"),
            ));
        }
        let is_permutation = self.order.len() == StageKind::DEFAULT_ORDER.len()
            && StageKind::DEFAULT_ORDER
                .iter()
                .all(|kind| self.order.contains(kind));
        if !is_permutation {
            return Err(invalid(
                "order",
                format!(
                    "must list distortion, delay and lowpass exactly once, got {:?}",
                    self.order
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(param: &'static str, reason: String) -> Error {
    Error::invalid("mapper", param, reason)
}

/// Builds stage lists from control sets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMapper {
    config: MapperConfig,
}

impl ParameterMapper {
    /// Create a mapper with the given configuration.
    pub fn new(config: MapperConfig) -> Self {
        Self { config }
    }

    /// The mapper's configuration.
    pub fn config(&self) -> &MapperConfig {
        &self.config
    }

    /// Map `controls` to an ordered, validated stage list.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the configuration or any mapped parameter is
    /// out of range.
    pub fn build_stage_list(&self, controls: &ControlSet) -> Result<StageList> {
        self.config.validate()?;
        let config = &self.config;
        let mut stages = StageList::new();

        let clip_threshold = controls
            .is_enabled(Control::Clipping)
            .then(|| db_to_linear(clipping_threshold_db(controls.value(Control::Clipping))));

        if controls.is_enabled(Control::Dist) {
            let gain = db_to_linear(controls.value(Control::Dist) * config.drive_scale_db);
            let threshold = clip_threshold.unwrap_or(config.default_threshold);
            stages.push(DistortionParams::new(gain, threshold));
        } else if let Some(threshold) = clip_threshold {
            stages.push(DistortionParams::new(1.0, threshold));
        }

        if controls.is_enabled(Control::Delay) {
            let delay_seconds = controls.value(Control::Delay) * config.delay_time_scale;
            stages.push(DelayParams::new(delay_seconds, config.delay_decay));
        }

        let cutoff = if controls.is_enabled(Control::Cutoff) {
            Some(controls.value(Control::Cutoff))
        } else {
            config.default_cutoff_hz
        };
        if let Some(cutoff_hz) = cutoff {
            stages.push(
                LowpassParams::new(cutoff_hz)
                    .with_seed_first_sample(config.seed_first_sample)
                    .with_normalize(config.normalize_lowpass),
            );
        }

        stages.sort_by_order(&config.order);
        stages.iter().try_for_each(BufferStage::validate)?;

        let deferred = self.deferred_controls(controls);
        if !deferred.is_empty() {
            tracing::debug!(?deferred, "controls left to external processors");
        }
        tracing::debug!(stages = ?stages.kinds(), "mapped controls");
        Ok(stages)
    }

    /// Enabled controls that no built-in stage implements.
    pub fn deferred_controls(&self, controls: &ControlSet) -> Vec<Control> {
        controls
            .iter()
            .map(|(control, _)| control)
            .filter(|&control| !control.is_core() && controls.is_enabled(control))
            .collect()
    }
}

/// Map `controls` with the default [`MapperConfig`].
pub fn build_stage_list(controls: &ControlSet) -> Result<StageList> {
    ParameterMapper::default().build_stage_list(controls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxchain_effects::Stage;

    fn controls(pairs: &[(&str, f32)]) -> ControlSet {
        ControlSet::from_pairs(pairs.iter().copied()).unwrap()
    }

    fn distortion(stages: &StageList) -> DistortionParams {
        match stages.iter().find(|s| s.kind() == StageKind::Distortion) {
            Some(Stage::Distortion(p)) => *p,
            other => panic!("expected a distortion stage, got {other:?}"),
        }
    }

    #[test]
    fn empty_controls_yield_no_stages() {
        let stages = build_stage_list(&ControlSet::new()).unwrap();
        assert!(stages.is_empty());
    }

    #[test]
    fn zero_controls_are_disabled() {
        let stages =
            build_stage_list(&controls(&[("dist", 0.0), ("delay", 0.0), ("cutoff", 0.0)])).unwrap();
        assert!(stages.is_empty());
    }

    #[test]
    fn dist_maps_through_drive_scale() {
        let stages = build_stage_list(&controls(&[("dist", 0.5)])).unwrap();
        let p = distortion(&stages);
        assert!((p.gain - db_to_linear(15.0)).abs() < 1e-4);
        assert!((p.threshold - 0.3).abs() < 1e-6);
    }

    #[test]
    fn drive_scale_is_configurable() {
        let mapper = ParameterMapper::new(MapperConfig {
            drive_scale_db: 40.0,
            ..MapperConfig::default()
        });
        let stages = mapper.build_stage_list(&controls(&[("dist", 1.0)])).unwrap();
        assert!((distortion(&stages).gain - 100.0).abs() < 1e-2);
    }

    #[test]
    fn clipping_overrides_threshold() {
        let stages = build_stage_list(&controls(&[("dist", 0.5), ("clipping", 1.0)])).unwrap();
        let expected = db_to_linear(-2.0);
        assert!((distortion(&stages).threshold - expected).abs() < 1e-6);
    }

    #[test]
    fn clipping_alone_is_unity_gain_clipper() {
        let stages = build_stage_list(&controls(&[("clipping", 0.5)])).unwrap();
        assert_eq!(stages.len(), 1);
        let p = distortion(&stages);
        assert_eq!(p.gain, 1.0);
        assert!((p.threshold - db_to_linear(-1.05)).abs() < 1e-6);
    }

    #[test]
    fn more_clipping_means_lower_threshold() {
        let mut last = f32::INFINITY;
        for step in 1..=10 {
            let c = step as f32 / 10.0;
            let threshold = distortion(&build_stage_list(&controls(&[("clipping", c)])).unwrap())
                .threshold;
            assert!(threshold < last, "threshold must fall as clipping rises");
            last = threshold;
        }
    }

    #[test]
    fn delay_uses_scale_and_fixed_decay() {
        let mapper = ParameterMapper::new(MapperConfig {
            delay_time_scale: 0.8,
            ..MapperConfig::default()
        });
        let stages = mapper.build_stage_list(&controls(&[("delay", 0.5)])).unwrap();
        let Some(Stage::Delay(p)) = stages.get(0) else {
            panic!("expected delay stage");
        };
        assert!((p.delay_seconds - 0.4).abs() < 1e-6);
        assert!((p.decay - 0.3).abs() < 1e-6);
    }

    #[test]
    fn cutoff_is_hz_and_falls_back_to_default() {
        let stages = build_stage_list(&controls(&[("cutoff", 1500.0)])).unwrap();
        assert_eq!(
            stages.get(0),
            Some(&Stage::Lowpass(LowpassParams::new(1500.0)))
        );

        let mapper = ParameterMapper::new(MapperConfig {
            default_cutoff_hz: Some(3000.0),
            seed_first_sample: true,
            ..MapperConfig::default()
        });
        let stages = mapper.build_stage_list(&ControlSet::new()).unwrap();
        assert_eq!(
            stages.get(0),
            Some(&Stage::Lowpass(
                LowpassParams::new(3000.0).with_seed_first_sample(true)
            ))
        );
    }

    #[test]
    fn stages_follow_fixed_order() {
        let set = controls(&[("cutoff", 2000.0), ("delay", 0.25), ("dist", 0.3)]);
        let stages = build_stage_list(&set).unwrap();
        assert_eq!(stages.kinds(), StageKind::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn order_override() {
        let order = vec![StageKind::Lowpass, StageKind::Delay, StageKind::Distortion];
        let mapper = ParameterMapper::new(MapperConfig {
            order: order.clone(),
            ..MapperConfig::default()
        });
        let set = controls(&[("cutoff", 2000.0), ("delay", 0.25), ("dist", 0.3)]);
        assert_eq!(mapper.build_stage_list(&set).unwrap().kinds(), order);
    }

    #[test]
    fn out_of_range_mapping_is_rejected_not_clamped() {
        let err = build_stage_list(&controls(&[("delay", 100.0)])).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                stage: "delay",
                param: "delay_seconds",
                ..
            }
        ));
    }

    #[test]
    fn runaway_drive_is_rejected() {
        let err = build_stage_list(&controls(&[("dist", 1.0e6)])).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { param: "gain", .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let bad_order = MapperConfig {
            order: vec![StageKind::Delay, StageKind::Delay, StageKind::Lowpass],
            ..MapperConfig::default()
        };
        assert!(matches!(
            bad_order.validate(),
            Err(Error::InvalidParameter { param: "order", .. })
        ));

        let bad_decay = MapperConfig {
            delay_decay: 1.0,
            ..MapperConfig::default()
        };
        let err = ParameterMapper::new(bad_decay)
            .build_stage_list(&controls(&[("delay", 0.2)]))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                stage: "mapper",
                param: "delay_decay",
                ..
            }
        ));
    }

    #[test]
    fn deferred_controls_are_reported() {
        let set = controls(&[
            ("dist", 0.4),
            ("chorus", 0.5),
            ("reverb", 0.0),
            ("pitchshift", -2.0),
        ]);
        let mapper = ParameterMapper::default();
        assert_eq!(
            mapper.deferred_controls(&set),
            vec![Control::Chorus, Control::Pitchshift]
        );
        assert_eq!(mapper.build_stage_list(&set).unwrap().len(), 1);
    }

    #[test]
    fn config_toml_partial_fields() {
        let config = MapperConfig::from_toml(
            r#"
drive_scale_db = 40.0
default_cutoff_hz = 2500.0
"#,
        )
        .unwrap();
        assert_eq!(config.drive_scale_db, 40.0);
        assert_eq!(config.default_cutoff_hz, Some(2500.0));
        assert_eq!(config.order, StageKind::DEFAULT_ORDER.to_vec());
    }

    #[test]
    fn config_toml_roundtrip() {
        let config = MapperConfig {
            order: vec![StageKind::Delay, StageKind::Distortion, StageKind::Lowpass],
            ..MapperConfig::default()
        };
        let parsed = MapperConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn config_toml_invalid_values_rejected() {
        let err = MapperConfig::from_toml("delay_decay = 1.5").unwrap_err();
        assert!(matches!(err, ConfigError::Core(_)));
    }
}
