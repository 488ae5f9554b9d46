//! Named UI controls and per-request control sets.
//!
//! Controls arrive from a front end as slider values, mostly in `[0, 1]`.
//! `cutoff` is the exception: it carries a frequency in Hz. Only `dist`,
//! `clipping`, `delay` and `cutoff` drive stages in this workspace; the rest
//! are recognized so callers can route them to an external processor.

use core::fmt;
use core::str::FromStr;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A recognized control name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Control {
    /// Distortion drive.
    Dist,
    /// Chorus depth (external).
    Chorus,
    /// Reverb amount (external).
    Reverb,
    /// Delay time.
    Delay,
    /// Compression amount (external).
    Comp,
    /// Lowpass cutoff in Hz.
    Cutoff,
    /// Bit reduction (external).
    Bitcrush,
    /// Clip hardness.
    Clipping,
    /// Pitch shift in semitones, bipolar (external).
    Pitchshift,
}

impl Control {
    /// Every control, in declaration order.
    pub const ALL: [Control; 9] = [
        Control::Dist,
        Control::Chorus,
        Control::Reverb,
        Control::Delay,
        Control::Comp,
        Control::Cutoff,
        Control::Bitcrush,
        Control::Clipping,
        Control::Pitchshift,
    ];

    /// Lowercase control name.
    pub fn name(self) -> &'static str {
        match self {
            Control::Dist => "dist",
            Control::Chorus => "chorus",
            Control::Reverb => "reverb",
            Control::Delay => "delay",
            Control::Comp => "comp",
            Control::Cutoff => "cutoff",
            Control::Bitcrush => "bitcrush",
            Control::Clipping => "clipping",
            Control::Pitchshift => "pitchshift",
        }
    }

    /// Bipolar controls are enabled by any non-zero value.
    pub fn is_bipolar(self) -> bool {
        matches!(self, Control::Pitchshift)
    }

    /// Whether the control maps onto a built-in stage.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            Control::Dist | Control::Delay | Control::Cutoff | Control::Clipping
        )
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Control {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Control::ALL
            .into_iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| ConfigError::UnknownControl(s.trim().to_string()))
    }
}

/// Control values for one request.
///
/// # Example
///
/// ```rust
/// use fxchain_config::{Control, ControlSet};
///
/// let controls = ControlSet::from_pairs([("dist", 0.5), ("cutoff", 2000.0)]).unwrap();
/// assert!(controls.is_enabled(Control::Dist));
/// assert!(!controls.is_enabled(Control::Delay));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlSet(BTreeMap<Control, f32>);

impl ControlSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `(name, value)` pairs.
    ///
    /// Later duplicates overwrite earlier ones.
    ///
    /// # Errors
    ///
    /// `UnknownControl` for an unrecognized name, `Core(InvalidParameter)`
    /// for a non-finite value.
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, f32)>,
        K: AsRef<str>,
    {
        let mut set = Self::new();
        for (name, value) in pairs {
            let control: Control = name.as_ref().parse()?;
            set.insert(control, value)?;
        }
        Ok(set)
    }

    /// Set a control value.
    ///
    /// # Errors
    ///
    /// `Core(InvalidParameter)` if `value` is NaN or infinite.
    pub fn insert(&mut self, control: Control, value: f32) -> Result<(), ConfigError> {
        if !value.is_finite() {
            return Err(fxchain_core::Error::invalid(
                "controls",
                control.name(),
                format!("must be finite, got {value}"),
            )
            .into());
        }
        self.0.insert(control, value);
        Ok(())
    }

    /// The value of a control, if present.
    pub fn get(&self, control: Control) -> Option<f32> {
        self.0.get(&control).copied()
    }

    /// The value of a control, 0 when absent.
    pub fn value(&self, control: Control) -> f32 {
        self.get(control).unwrap_or(0.0)
    }

    /// Whether the control turns its effect on.
    ///
    /// Unipolar controls need a value strictly above 0; bipolar ones any
    /// non-zero value.
    pub fn is_enabled(&self, control: Control) -> bool {
        let value = self.value(control);
        if control.is_bipolar() {
            value != 0.0
        } else {
            value > 0.0
        }
    }

    /// Iterate over `(control, value)` in control order.
    pub fn iter(&self) -> impl Iterator<Item = (Control, f32)> + '_ {
        self.0.iter().map(|(c, v)| (*c, *v))
    }

    /// Number of controls set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no control is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a `name=value` control argument.
///
/// Used as a clap value parser by the command line.
pub fn parse_control(arg: &str) -> Result<(Control, f32), ConfigError> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::ControlSyntax(arg.to_string()))?;
    let control: Control = name.parse()?;
    let value: f32 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::ControlSyntax(arg.to_string()))?;
    Ok((control, value))
}
