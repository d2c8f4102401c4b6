//! # evdev Gamepad
//!
//! Opens a Linux gamepad through evdev and samples its current state.
//!
//! ## Device Detection
//!
//! When no device path is configured, every `/dev/input/event*` node is
//! probed in sorted order and the first one advertising `BTN_SOUTH` (the
//! primary face button every gamepad driver reports) is used.
//!
//! ## Sampling
//!
//! Samples read the kernel's current key and absolute-axis state directly
//! instead of draining the event queue, so polling at a fixed rate never
//! falls behind and never blocks.

use evdev::{AbsoluteAxisType, Device, Key};
use std::path::Path;
use tracing::{debug, info};

use super::standard::{sample_standard, AxisReading};
use super::{GamepadSource, RawInputState};
use crate::error::{GamepadViewerError, Result};

/// Directory scanned for input event nodes.
const INPUT_DIR: &str = "/dev/input";

/// Gamepad handle backed by an evdev device node.
pub struct EvdevGamepad {
    device: Device,
    device_path: String,
}

impl std::fmt::Debug for EvdevGamepad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevGamepad")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl EvdevGamepad {
    /// Opens the configured device, or the first gamepad found when `path`
    /// is empty.
    ///
    /// # Errors
    ///
    /// - `ControllerNotFound`: no gamepad found while scanning
    /// - `Controller`: the configured path is not a gamepad or cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use gamepad_viewer::input::evdev_pad::EvdevGamepad;
    ///
    /// let gamepad = EvdevGamepad::open("")?;
    /// println!("Connected to gamepad at: {}", gamepad.device_path());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open(path: &str) -> Result<Self> {
        if path.is_empty() {
            Self::detect()
        } else {
            Self::open_path(Path::new(path))
        }
    }

    /// Opens a specific event node.
    pub fn open_path(path: &Path) -> Result<Self> {
        let device = Device::open(path).map_err(|e| {
            GamepadViewerError::Controller(format!("Failed to open {}: {}", path.display(), e))
        })?;

        if !is_gamepad(&device) {
            return Err(GamepadViewerError::Controller(format!(
                "{} does not look like a gamepad",
                path.display()
            )));
        }

        let device_path = path.to_string_lossy().to_string();
        let gamepad = Self { device, device_path };
        info!("Opened gamepad {:?} at {}", gamepad.name().unwrap_or("unknown"), gamepad.device_path);

        Ok(gamepad)
    }

    /// Scans `/dev/input` for the first gamepad.
    pub fn detect() -> Result<Self> {
        let input_dir = Path::new(INPUT_DIR);

        if !input_dir.exists() {
            return Err(GamepadViewerError::Controller(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        let mut entries: Vec<_> = std::fs::read_dir(input_dir)
            .map_err(|e| GamepadViewerError::Controller(format!("Failed to read {}: {}", INPUT_DIR, e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| GamepadViewerError::Controller(format!("Failed to read directory entry: {}", e)))?;

        // Sorted so the same pad wins when several are plugged in
        entries.sort_by_key(|entry| entry.path());

        for entry in entries {
            let path = entry.path();

            let is_event_node = path
                .file_name()
                .is_some_and(|name| name.to_string_lossy().starts_with("event"));
            if !is_event_node {
                continue;
            }

            match Device::open(&path) {
                Ok(device) => {
                    let id = device.input_id();
                    debug!(
                        "Found input device: {} (vendor: 0x{:04x}, product: 0x{:04x})",
                        path.display(),
                        id.vendor(),
                        id.product()
                    );

                    if is_gamepad(&device) {
                        let device_path = path.to_string_lossy().to_string();
                        info!(
                            "Found gamepad {:?} at: {}",
                            device.name().unwrap_or("unknown"),
                            device_path
                        );
                        return Ok(Self { device, device_path });
                    }
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        Err(GamepadViewerError::ControllerNotFound)
    }

    /// The `/dev/input/eventX` path this gamepad was opened from.
    pub fn device_path(&self) -> &str {
        &self.device_path
    }

    /// Human-readable device name reported by the driver.
    pub fn name(&self) -> Option<&str> {
        self.device.name()
    }
}

impl GamepadSource for EvdevGamepad {
    fn sample(&mut self) -> Result<RawInputState> {
        let keys = self
            .device
            .get_key_state()
            .map_err(|e| GamepadViewerError::Controller(format!("Failed to read key state: {}", e)))?;
        let abs = self
            .device
            .get_abs_state()
            .map_err(|e| GamepadViewerError::Controller(format!("Failed to read axis state: {}", e)))?;
        let supported_axes = self.device.supported_absolute_axes();

        Ok(sample_standard(
            |key: Key| keys.contains(key),
            |axis: AbsoluteAxisType| {
                if !supported_axes.is_some_and(|axes| axes.contains(axis)) {
                    return None;
                }
                let info = abs.get(axis.0 as usize)?;
                Some(AxisReading::new(info.value, info.minimum, info.maximum))
            },
        ))
    }
}

fn is_gamepad(device: &Device) -> bool {
    device
        .supported_keys()
        .is_some_and(|keys| keys.contains(Key::BTN_SOUTH))
}
