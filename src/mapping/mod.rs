//! # Mapping Module
//!
//! Translates raw gamepad samples into named controls.
//!
//! This module handles:
//! - Parsing source specs such as `Button6+` and `Axis1-` ([`source`])
//! - Declarative and normalized controller layouts ([`layout`])
//! - Resolving semantic buttons and axes ([`buttons`], [`axes`])
//! - Looking buttons up under Xbox or DualShock 4 names ([`alias`])
//! - The [`convert`] entry point ([`conversion`])

pub mod alias;
pub mod axes;
pub mod buttons;
pub mod conversion;
pub mod layout;
pub mod source;

pub use conversion::{convert, ConversionResult};
pub use layout::{ControllerLayout, LayoutConfig, Target};
