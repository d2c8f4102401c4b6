//! # Controller Layouts
//!
//! A layout tells the mapper which raw slots feed each semantic control.
//!
//! [`LayoutConfig`] is the declarative shape as written in TOML: every entry
//! is either a single spec string or a list of them. [`ControllerLayout`] is
//! the normalized form the mapper reads, with every spec string parsed once
//! at construction.
//!
//! ## Example
//!
//! ```toml
//! target = "xbox"
//! deadzone = 0.1
//!
//! [buttons]
//! A = "Button0"
//! START = ["Button9", "Button17"]
//!
//! [axes]
//! LX = "Axis0+"
//! LY = "Axis1-"
//!
//! [buttons_axes]
//! RT = "Button7+"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

use super::source::{SourceKind, SourceSpec};

/// Naming convention a layout speaks. Metadata only; the mapper never
/// consults it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Xbox,
    Ds4,
    #[serde(other)]
    Other,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Target::Xbox => "xbox",
            Target::Ds4 => "ds4",
            Target::Other => "other",
        };
        f.write_str(name)
    }
}

/// One layout entry: a single spec string or a list of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SourceList {
    One(String),
    Many(Vec<String>),
}

impl SourceList {
    fn as_slice(&self) -> &[String] {
        match self {
            SourceList::One(spec) => std::slice::from_ref(spec),
            SourceList::Many(specs) => specs,
        }
    }
}

impl From<&str> for SourceList {
    fn from(spec: &str) -> Self {
        SourceList::One(spec.to_string())
    }
}

impl From<&[&str]> for SourceList {
    fn from(specs: &[&str]) -> Self {
        SourceList::Many(specs.iter().map(|s| s.to_string()).collect())
    }
}

/// Declarative layout as found in configuration files.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct LayoutConfig {
    /// Semantic button -> raw button spec(s), OR-combined.
    #[serde(default)]
    pub buttons: BTreeMap<String, SourceList>,

    /// Semantic axis -> raw axis spec(s), summed.
    #[serde(default)]
    pub axes: BTreeMap<String, SourceList>,

    /// Semantic button -> raw axis spec(s) read as a digital fallback.
    #[serde(default)]
    pub axes_buttons: BTreeMap<String, SourceList>,

    /// Semantic axis -> raw button spec(s) whose analog value is summed in.
    #[serde(default)]
    pub buttons_axes: BTreeMap<String, SourceList>,

    #[serde(default)]
    pub deadzone: f32,

    #[serde(default)]
    pub target: Target,
}

/// Parsed sources per semantic name.
pub type SourceTable = BTreeMap<String, Vec<SourceSpec>>;

/// Immutable, normalized layout read by the mappers.
///
/// Entries whose spec strings are all malformed are kept with no sources, so
/// the control still shows up in the output as released / zero.
///
/// # Examples
///
/// ```
/// use gamepad_viewer::mapping::layout::{ControllerLayout, Target};
///
/// let layout = ControllerLayout::xbox();
/// assert_eq!(layout.target(), Target::Xbox);
/// assert_eq!(layout.buttons()["START"].len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ControllerLayout {
    buttons: SourceTable,
    axes: SourceTable,
    axes_buttons: SourceTable,
    buttons_axes: SourceTable,
    deadzone: f32,
    target: Target,
}

impl ControllerLayout {
    /// Normalizes a declarative layout, parsing every spec string once.
    #[must_use]
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            buttons: parse_table("buttons", &config.buttons, SourceKind::Button),
            axes: parse_table("axes", &config.axes, SourceKind::Axis),
            axes_buttons: parse_table("axes_buttons", &config.axes_buttons, SourceKind::Axis),
            buttons_axes: parse_table("buttons_axes", &config.buttons_axes, SourceKind::Button),
            deadzone: config.deadzone,
            target: config.target,
        }
    }

    /// Reference layout for Xbox-style naming on a standard gamepad.
    #[must_use]
    pub fn xbox() -> Self {
        Self::new(&xbox_config())
    }

    /// Reference layout for DualShock 4 naming on a standard gamepad.
    #[must_use]
    pub fn ds4() -> Self {
        Self::new(&ds4_config())
    }

    /// Reference layout for a naming convention, `None` for [`Target::Other`].
    #[must_use]
    pub fn preset(target: Target) -> Option<Self> {
        match target {
            Target::Xbox => Some(Self::xbox()),
            Target::Ds4 => Some(Self::ds4()),
            Target::Other => None,
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &SourceTable {
        &self.buttons
    }

    #[must_use]
    pub fn axes(&self) -> &SourceTable {
        &self.axes
    }

    #[must_use]
    pub fn axes_buttons(&self) -> &SourceTable {
        &self.axes_buttons
    }

    #[must_use]
    pub fn buttons_axes(&self) -> &SourceTable {
        &self.buttons_axes
    }

    #[must_use]
    pub fn deadzone(&self) -> f32 {
        self.deadzone
    }

    #[must_use]
    pub fn target(&self) -> Target {
        self.target
    }
}

impl From<&LayoutConfig> for ControllerLayout {
    fn from(config: &LayoutConfig) -> Self {
        Self::new(config)
    }
}

fn parse_table(
    table: &str,
    entries: &BTreeMap<String, SourceList>,
    kind: SourceKind,
) -> SourceTable {
    entries
        .iter()
        .map(|(name, list)| {
            let specs = list
                .as_slice()
                .iter()
                .filter_map(|text| {
                    let spec = SourceSpec::parse(text, kind);
                    if spec.is_none() {
                        warn!("Ignoring malformed {:?} source {:?} for {}.{}", kind, text, table, name);
                    }
                    spec
                })
                .collect();
            (name.clone(), specs)
        })
        .collect()
}

fn table(entries: &[(&str, SourceList)]) -> BTreeMap<String, SourceList> {
    entries
        .iter()
        .map(|(name, list)| (name.to_string(), list.clone()))
        .collect()
}

/// Declarative form of [`ControllerLayout::xbox`].
#[must_use]
pub fn xbox_config() -> LayoutConfig {
    LayoutConfig {
        buttons: table(&[
            ("A", "Button0".into()),
            ("B", "Button1".into()),
            ("X", "Button2".into()),
            ("Y", "Button3".into()),
            ("LEFT_SHOULDER", "Button4".into()),
            ("RIGHT_SHOULDER", "Button5".into()),
            ("BACK", "Button8".into()),
            // Some pads report START on slot 17
            ("START", (&["Button9", "Button17"][..]).into()),
            ("LEFT_THUMB", "Button10".into()),
            ("RIGHT_THUMB", "Button11".into()),
            ("DPAD_UP", "Button12".into()),
            ("DPAD_DOWN", "Button13".into()),
            ("DPAD_LEFT", "Button14".into()),
            ("DPAD_RIGHT", "Button15".into()),
            ("GUIDE", "Button16".into()),
        ]),
        axes: table(&[
            ("LX", "Axis0+".into()),
            ("LY", "Axis1-".into()),
            ("RX", "Axis2+".into()),
            ("RY", "Axis3-".into()),
        ]),
        axes_buttons: BTreeMap::new(),
        buttons_axes: table(&[
            ("LT", "Button6+".into()),
            ("RT", "Button7+".into()),
        ]),
        deadzone: 0.0,
        target: Target::Xbox,
    }
}

/// Declarative form of [`ControllerLayout::ds4`].
#[must_use]
pub fn ds4_config() -> LayoutConfig {
    LayoutConfig {
        buttons: table(&[
            ("CROSS", "Button0".into()),
            ("CIRCLE", "Button1".into()),
            ("SQUARE", "Button2".into()),
            ("TRIANGLE", "Button3".into()),
            ("LEFT_SHOULDER", "Button4".into()),
            ("RIGHT_SHOULDER", "Button5".into()),
            ("LEFT_TRIGGER", "Button6".into()),
            ("RIGHT_TRIGGER", "Button7".into()),
            ("SHARE", "Button8".into()),
            ("OPTIONS", "Button9".into()),
            ("LEFT_THUMB", "Button10".into()),
            ("RIGHT_THUMB", "Button11".into()),
            ("DPAD_UP", "Button12".into()),
            ("DPAD_DOWN", "Button13".into()),
            ("DPAD_LEFT", "Button14".into()),
            ("DPAD_RIGHT", "Button15".into()),
            ("PS", "Button16".into()),
            ("TOUCHPAD", "Button17".into()),
        ]),
        axes: table(&[
            ("LX", "Axis0+".into()),
            ("LY", "Axis1+".into()),
            ("RX", "Axis2+".into()),
            ("RY", "Axis3+".into()),
        ]),
        axes_buttons: BTreeMap::new(),
        buttons_axes: table(&[
            ("LT", "Button6+".into()),
            ("RT", "Button7+".into()),
        ]),
        deadzone: 0.0,
        target: Target::Ds4,
    }
}
