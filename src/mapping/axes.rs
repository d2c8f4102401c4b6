//! # Axis Mapper
//!
//! Resolves every semantic axis of a layout to a float.
//!
//! Raw axis sources are sign-applied and summed. Entries in `buttons_axes`
//! add the analog `value` of raw buttons, so a pressure-sensitive trigger can
//! be read as `RT` while the same slot also drives a digital button.
//!
//! No clamping happens here; two full-scale sources sum to 2.0.

use std::collections::BTreeMap;

use super::layout::ControllerLayout;
use super::source::SourceSpec;
use crate::input::RawInputState;

/// Resolves axes for one layout.
#[derive(Debug, Clone, Copy)]
pub struct AxisMapper<'a> {
    layout: &'a ControllerLayout,
}

impl<'a> AxisMapper<'a> {
    #[must_use]
    pub fn new(layout: &'a ControllerLayout) -> Self {
        Self { layout }
    }

    /// Resolves every key of `axes` and `buttons_axes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::input::{RawButton, RawInputState};
    /// use gamepad_viewer::mapping::axes::AxisMapper;
    /// use gamepad_viewer::mapping::layout::ControllerLayout;
    ///
    /// let layout = ControllerLayout::xbox();
    /// let mut buttons = vec![RawButton::default(); 8];
    /// buttons[7] = RawButton::analog(true, 0.75);
    /// let raw = RawInputState::new(buttons, vec![0.5, -0.3, 0.0, 0.0]);
    ///
    /// let axes = AxisMapper::new(&layout).resolve(&raw);
    /// assert_eq!(axes["LX"], 0.5);
    /// assert_eq!(axes["LY"], 0.3);
    /// assert_eq!(axes["RT"], 0.75);
    /// ```
    #[must_use]
    pub fn resolve(&self, raw: &RawInputState) -> BTreeMap<String, f32> {
        let mut values: BTreeMap<String, f32> = self
            .layout
            .axes()
            .iter()
            .map(|(name, specs)| (name.clone(), sum_axes(raw, specs)))
            .collect();

        for (name, specs) in self.layout.buttons_axes() {
            *values.entry(name.clone()).or_insert(0.0) += sum_button_values(raw, specs);
        }

        values
    }
}

fn sum_axes(raw: &RawInputState, specs: &[SourceSpec]) -> f32 {
    specs
        .iter()
        .map(|spec| spec.sign.apply(raw.axis(spec.index).unwrap_or(0.0)))
        .fold(0.0, |total, value| total + value)
}

fn sum_button_values(raw: &RawInputState, specs: &[SourceSpec]) -> f32 {
    specs
        .iter()
        .map(|spec| spec.sign.apply(raw.button(spec.index).map_or(0.0, |button| button.value)))
        .fold(0.0, |total, value| total + value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::RawButton;
    use crate::mapping::layout::{LayoutConfig, SourceList};

    fn layout_with(
        axes: &[(&str, SourceList)],
        buttons_axes: &[(&str, SourceList)],
    ) -> ControllerLayout {
        let mut config = LayoutConfig::default();
        for (name, list) in axes {
            config.axes.insert(name.to_string(), list.clone());
        }
        for (name, list) in buttons_axes {
            config.buttons_axes.insert(name.to_string(), list.clone());
        }
        ControllerLayout::new(&config)
    }

    #[test]
    fn test_sign_inversion() {
        let raw = RawInputState::new(vec![], vec![0.6]);
        for (spec, expected) in [("Axis0-", -0.6), ("Axis0+", 0.6), ("Axis0", 0.6)] {
            let layout = layout_with(&[("LX", spec.into())], &[]);
            assert_eq!(AxisMapper::new(&layout).resolve(&raw)["LX"], expected, "{}", spec);
        }
    }

    #[test]
    fn test_sum_across_sources() {
        let layout = layout_with(&[("Z", (&["Axis0+", "Axis1-"][..]).into())], &[]);
        let raw = RawInputState::new(vec![], vec![0.5, -0.25]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["Z"], 0.75);
    }

    #[test]
    fn test_no_clamping() {
        let layout = layout_with(&[("Z", (&["Axis0", "Axis1"][..]).into())], &[]);
        let raw = RawInputState::new(vec![], vec![1.0, 1.0]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["Z"], 2.0);
    }

    #[test]
    fn test_out_of_range_axis_is_zero() {
        let layout = layout_with(&[("RY", "Axis3-".into())], &[]);
        let raw = RawInputState::new(vec![], vec![0.1, 0.2]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["RY"], 0.0);
    }

    #[test]
    fn test_malformed_source_is_zero_but_present() {
        let layout = layout_with(&[("LX", "Button0".into())], &[]);
        let raw = RawInputState::new(vec![RawButton::digital(true)], vec![0.9]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw).get("LX"), Some(&0.0));
    }

    #[test]
    fn test_trigger_value_as_axis() {
        let layout = layout_with(&[], &[("RT", "Button7+".into())]);
        let mut buttons = vec![RawButton::default(); 8];
        buttons[7] = RawButton::analog(true, 0.75);
        let raw = RawInputState::new(buttons, vec![]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["RT"], 0.75);
    }

    #[test]
    fn test_trigger_value_uses_value_not_pressed() {
        let layout = layout_with(&[], &[("LT", "Button6-".into())]);
        let mut buttons = vec![RawButton::default(); 8];
        buttons[6] = RawButton::analog(false, 0.25);
        let raw = RawInputState::new(buttons, vec![]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["LT"], -0.25);
    }

    #[test]
    fn test_axis_and_button_contributions_add() {
        let layout = layout_with(&[("T", "Axis0+".into())], &[("T", "Button0-".into())]);
        let raw = RawInputState::new(vec![RawButton::analog(true, 0.5)], vec![0.75]);
        assert_eq!(AxisMapper::new(&layout).resolve(&raw)["T"], 0.25);
    }

    #[test]
    fn test_output_covers_both_tables() {
        let layout = layout_with(&[("LX", "Axis0".into())], &[("RT", "Button7".into())]);
        let values = AxisMapper::new(&layout).resolve(&RawInputState::default());
        assert_eq!(values.len(), 2);
        assert_eq!(values["LX"], 0.0);
        assert_eq!(values["RT"], 0.0);
    }
}
