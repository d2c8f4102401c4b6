//! # Standard Slot Order
//!
//! Arranges Linux input state into the "standard gamepad" slot order that
//! the reference layouts are written against.
//!
//! ## Buttons
//!
//! | Slot | evdev source | Xbox | DualShock 4 |
//! |------|--------------|------|-------------|
//! | 0 | BTN_SOUTH | A | Cross |
//! | 1 | BTN_EAST | B | Circle |
//! | 2 | BTN_WEST | X | Square |
//! | 3 | BTN_NORTH | Y | Triangle |
//! | 4 | BTN_TL | LB | L1 |
//! | 5 | BTN_TR | RB | R1 |
//! | 6 | BTN_TL2 / ABS_Z | LT | L2 |
//! | 7 | BTN_TR2 / ABS_RZ | RT | R2 |
//! | 8 | BTN_SELECT | Back | Share |
//! | 9 | BTN_START | Start | Options |
//! | 10 | BTN_THUMBL | LS | L3 |
//! | 11 | BTN_THUMBR | RS | R3 |
//! | 12-15 | BTN_DPAD_* / ABS_HAT0* | D-Pad | D-Pad |
//! | 16 | BTN_MODE | Guide | PS |
//! | 17 | BTN_TOUCH | - | Touchpad |
//!
//! ## Axes
//!
//! | Slot | evdev source |
//! |------|--------------|
//! | 0 | ABS_X |
//! | 1 | ABS_Y |
//! | 2 | ABS_RX |
//! | 3 | ABS_RY |
//!
//! Stick axes are normalized to `-1.0..=1.0` from the range the device
//! reports; triggers to `0.0..=1.0`.

use evdev::{AbsoluteAxisType, Key};

use super::{RawButton, RawInputState};

/// Number of button slots in the standard order.
pub const STANDARD_BUTTON_COUNT: usize = 18;

/// Number of axis slots in the standard order.
pub const STANDARD_AXIS_COUNT: usize = 4;

/// Trigger travel past which an analog trigger also reads as pressed.
pub const TRIGGER_PRESS_THRESHOLD: f32 = 0.1;

/// Digital buttons with a single key source.
const KEY_SLOTS: [(usize, Key); 11] = [
    (0, Key::BTN_SOUTH),
    (1, Key::BTN_EAST),
    (2, Key::BTN_WEST),
    (3, Key::BTN_NORTH),
    (4, Key::BTN_TL),
    (5, Key::BTN_TR),
    (8, Key::BTN_SELECT),
    (9, Key::BTN_START),
    (10, Key::BTN_THUMBL),
    (11, Key::BTN_THUMBR),
    (16, Key::BTN_MODE),
];

/// Analog triggers: slot, digital click, analog axis.
const TRIGGER_SLOTS: [(usize, Key, AbsoluteAxisType); 2] = [
    (6, Key::BTN_TL2, AbsoluteAxisType::ABS_Z),
    (7, Key::BTN_TR2, AbsoluteAxisType::ABS_RZ),
];

/// D-Pad: slot, key, hat axis, hat direction.
const DPAD_SLOTS: [(usize, Key, AbsoluteAxisType, i32); 4] = [
    (12, Key::BTN_DPAD_UP, AbsoluteAxisType::ABS_HAT0Y, -1),
    (13, Key::BTN_DPAD_DOWN, AbsoluteAxisType::ABS_HAT0Y, 1),
    (14, Key::BTN_DPAD_LEFT, AbsoluteAxisType::ABS_HAT0X, -1),
    (15, Key::BTN_DPAD_RIGHT, AbsoluteAxisType::ABS_HAT0X, 1),
];

const TOUCHPAD_SLOT: usize = 17;

const STICK_AXES: [AbsoluteAxisType; STANDARD_AXIS_COUNT] = [
    AbsoluteAxisType::ABS_X,
    AbsoluteAxisType::ABS_Y,
    AbsoluteAxisType::ABS_RX,
    AbsoluteAxisType::ABS_RY,
];

/// Current reading of one absolute axis together with its reported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisReading {
    pub value: i32,
    pub minimum: i32,
    pub maximum: i32,
}

impl AxisReading {
    #[must_use]
    pub fn new(value: i32, minimum: i32, maximum: i32) -> Self {
        Self { value, minimum, maximum }
    }

    /// Fraction of travel in `0.0..=1.0`. A degenerate range reads 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::input::standard::AxisReading;
    ///
    /// assert_eq!(AxisReading::new(255, 0, 255).unit(), 1.0);
    /// assert_eq!(AxisReading::new(0, 0, 255).unit(), 0.0);
    /// assert_eq!(AxisReading::new(7, 0, 0).unit(), 0.0);
    /// ```
    #[must_use]
    pub fn unit(&self) -> f32 {
        if self.maximum <= self.minimum {
            return 0.0;
        }
        let span = self.maximum as f64 - self.minimum as f64;
        let fraction = (self.value as f64 - self.minimum as f64) / span;
        fraction.clamp(0.0, 1.0) as f32
    }

    /// Position in `-1.0..=1.0`, minimum mapping to -1.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::input::standard::AxisReading;
    ///
    /// assert_eq!(AxisReading::new(-32768, -32768, 32767).signed(), -1.0);
    /// assert_eq!(AxisReading::new(32767, -32768, 32767).signed(), 1.0);
    /// assert_eq!(AxisReading::new(3, 5, 5).signed(), 0.0);
    /// ```
    #[must_use]
    pub fn signed(&self) -> f32 {
        if self.maximum <= self.minimum {
            return 0.0;
        }
        self.unit() * 2.0 - 1.0
    }
}

/// Builds a standard-order sample from key and axis lookups.
///
/// `key` reports whether a key is held; `axis` returns the reading of an
/// axis, `None` when the device lacks it. Missing inputs read as released /
/// centered.
///
/// # Examples
///
/// ```
/// use evdev::{AbsoluteAxisType, Key};
/// use gamepad_viewer::input::standard::{sample_standard, AxisReading};
///
/// let raw = sample_standard(
///     |key| key == Key::BTN_SOUTH,
///     |axis| (axis == AbsoluteAxisType::ABS_X).then(|| AxisReading::new(255, 0, 255)),
/// );
/// assert!(raw.buttons[0].pressed);
/// assert_eq!(raw.axes[0], 1.0);
/// assert_eq!(raw.axes[1], 0.0);
/// ```
pub fn sample_standard<K, A>(key: K, axis: A) -> RawInputState
where
    K: Fn(Key) -> bool,
    A: Fn(AbsoluteAxisType) -> Option<AxisReading>,
{
    let mut buttons = vec![RawButton::default(); STANDARD_BUTTON_COUNT];

    for (slot, code) in KEY_SLOTS {
        buttons[slot] = RawButton::digital(key(code));
    }

    for (slot, click, abs) in TRIGGER_SLOTS {
        let value = axis(abs).map_or(0.0, |reading| reading.unit());
        let pressed = key(click) || value > TRIGGER_PRESS_THRESHOLD;
        // Digital-only triggers report full travel while held
        let value = if axis(abs).is_none() && pressed { 1.0 } else { value };
        buttons[slot] = RawButton::analog(pressed, value);
    }

    for (slot, code, hat, direction) in DPAD_SLOTS {
        let hat_pressed = axis(hat).is_some_and(|reading| reading.value.signum() == direction);
        buttons[slot] = RawButton::digital(key(code) || hat_pressed);
    }

    buttons[TOUCHPAD_SLOT] = RawButton::digital(key(Key::BTN_TOUCH));

    let axes = STICK_AXES
        .iter()
        .map(|&abs| axis(abs).map_or(0.0, |reading| reading.signed()))
        .collect();

    RawInputState::new(buttons, axes)
}
