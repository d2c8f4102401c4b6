//! # Button Mapper
//!
//! Resolves every semantic button of a layout to a boolean.
//!
//! A button is pressed when any of its raw button sources is pressed. Entries
//! in `axes_buttons` additionally count an axis as a press once its signed
//! reading passes the layout deadzone, which is how a stick can stand in for
//! the D-pad (`DPAD_LEFT = "Axis0-"`).

use std::collections::BTreeMap;

use super::layout::ControllerLayout;
use super::source::SourceSpec;
use crate::input::RawInputState;

/// Resolves buttons for one layout.
#[derive(Debug, Clone, Copy)]
pub struct ButtonMapper<'a> {
    layout: &'a ControllerLayout,
}

impl<'a> ButtonMapper<'a> {
    #[must_use]
    pub fn new(layout: &'a ControllerLayout) -> Self {
        Self { layout }
    }

    /// Resolves every key of `buttons` and `axes_buttons`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::input::{RawButton, RawInputState};
    /// use gamepad_viewer::mapping::buttons::ButtonMapper;
    /// use gamepad_viewer::mapping::layout::ControllerLayout;
    ///
    /// let layout = ControllerLayout::xbox();
    /// let raw = RawInputState::new(vec![RawButton::digital(true)], vec![]);
    ///
    /// let buttons = ButtonMapper::new(&layout).resolve(&raw);
    /// assert!(buttons["A"]);
    /// assert!(!buttons["B"]);
    /// ```
    #[must_use]
    pub fn resolve(&self, raw: &RawInputState) -> BTreeMap<String, bool> {
        let mut values: BTreeMap<String, bool> = self
            .layout
            .buttons()
            .iter()
            .map(|(name, specs)| (name.clone(), any_button_pressed(raw, specs)))
            .collect();

        let deadzone = self.layout.deadzone();
        for (name, specs) in self.layout.axes_buttons() {
            let pressed = values.entry(name.clone()).or_insert(false);
            *pressed = *pressed || any_axis_pressed(raw, specs, deadzone);
        }

        values
    }
}

fn any_button_pressed(raw: &RawInputState, specs: &[SourceSpec]) -> bool {
    specs
        .iter()
        .any(|spec| raw.button(spec.index).is_some_and(|button| button.pressed))
}

fn any_axis_pressed(raw: &RawInputState, specs: &[SourceSpec], deadzone: f32) -> bool {
    specs
        .iter()
        .any(|spec| axis_pressed(raw.axis(spec.index).unwrap_or(0.0), spec, deadzone))
}

/// Digital reading of an axis. A zero reading is never a press, even when
/// the deadzone is negative.
fn axis_pressed(value: f32, spec: &SourceSpec, deadzone: f32) -> bool {
    spec.sign.apply(value) > deadzone && value != 0.0
}
