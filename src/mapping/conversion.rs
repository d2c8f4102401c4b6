//! # Conversion
//!
//! Entry point of the mapping core: one raw sample plus one layout in, one
//! semantic state out.
//!
//! Conversion is a total function. Malformed layout entries and short raw
//! samples degrade to released buttons and zero axes, and nothing here
//! returns an error, so a frame can never be dropped halfway through.

use serde::Serialize;
use std::collections::BTreeMap;

use super::alias::ButtonView;
use super::axes::AxisMapper;
use super::buttons::ButtonMapper;
use super::layout::ControllerLayout;
use crate::input::RawInputState;

/// Semantic state of a controller for one sample.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConversionResult {
    /// Resolved buttons, readable under Xbox or DualShock 4 names.
    pub buttons: ButtonView,
    /// Resolved axes. Not clamped.
    pub axes: BTreeMap<String, f32>,
}

impl ConversionResult {
    /// Axis by name, `None` if the layout does not define it.
    #[must_use]
    pub fn axis(&self, name: &str) -> Option<f32> {
        self.axes.get(name).copied()
    }

    /// Button by either naming convention, `None` if unknown.
    #[must_use]
    pub fn button(&self, name: &str) -> Option<bool> {
        self.buttons.get(name)
    }
}

/// Converts a raw sample into semantic state.
///
/// # Examples
///
/// ```
/// use gamepad_viewer::input::{RawButton, RawInputState};
/// use gamepad_viewer::mapping::conversion::convert;
/// use gamepad_viewer::mapping::layout::ControllerLayout;
///
/// let raw = RawInputState::new(vec![RawButton::digital(true)], vec![0.5, -0.3, 0.0, 0.0]);
/// let state = convert(&raw, &ControllerLayout::xbox());
///
/// assert_eq!(state.button("A"), Some(true));
/// assert_eq!(state.button("CROSS"), Some(true));
/// assert_eq!(state.axis("LX"), Some(0.5));
/// assert_eq!(state.axis("LY"), Some(0.3));
/// ```
#[must_use]
pub fn convert(raw: &RawInputState, layout: &ControllerLayout) -> ConversionResult {
    ConversionResult {
        buttons: ButtonView::new(ButtonMapper::new(layout).resolve(raw)),
        axes: AxisMapper::new(layout).resolve(raw),
    }
}

impl ControllerLayout {
    /// Method form of [`convert`].
    #[must_use]
    pub fn convert(&self, raw: &RawInputState) -> ConversionResult {
        convert(raw, self)
    }
}
