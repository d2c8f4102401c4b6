//! # Input Module
//!
//! Raw gamepad samples and the devices that produce them.
//!
//! This module handles:
//! - The positional [`RawInputState`] sample consumed by the mapping core
//! - Sampling a Linux gamepad through evdev ([`evdev_pad`])
//! - Arranging kernel key/axis state into the standard slot order ([`standard`])

pub mod evdev_pad;
pub mod standard;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One raw button slot.
///
/// `value` is the analog reading in `[0, 1]`; digital buttons report `0.0`
/// or `1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawButton {
    pub pressed: bool,
    pub value: f32,
}

impl RawButton {
    /// A digital button reading (`value` follows `pressed`).
    #[must_use]
    pub fn digital(pressed: bool) -> Self {
        Self {
            pressed,
            value: if pressed { 1.0 } else { 0.0 },
        }
    }

    /// An analog button reading.
    #[must_use]
    pub fn analog(pressed: bool, value: f32) -> Self {
        Self { pressed, value }
    }
}

/// One sampled frame from a gamepad, indexed by raw slot.
///
/// # Examples
///
/// ```
/// use gamepad_viewer::input::{RawButton, RawInputState};
///
/// let raw = RawInputState::new(vec![RawButton::digital(true)], vec![0.5, -0.3]);
/// assert!(raw.button(0).unwrap().pressed);
/// assert_eq!(raw.axis(1), Some(-0.3));
/// assert_eq!(raw.axis(7), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawInputState {
    pub buttons: Vec<RawButton>,
    pub axes: Vec<f32>,
}

impl RawInputState {
    #[must_use]
    pub fn new(buttons: Vec<RawButton>, axes: Vec<f32>) -> Self {
        Self { buttons, axes }
    }

    /// Button at a raw slot, `None` when out of range.
    #[must_use]
    pub fn button(&self, index: usize) -> Option<&RawButton> {
        self.buttons.get(index)
    }

    /// Axis at a raw slot, `None` when out of range.
    #[must_use]
    pub fn axis(&self, index: usize) -> Option<f32> {
        self.axes.get(index).copied()
    }
}

/// Something that can be sampled for the current gamepad state.
#[cfg_attr(test, mockall::automock)]
pub trait GamepadSource {
    /// Read the gamepad's state right now.
    fn sample(&mut self) -> Result<RawInputState>;
}
