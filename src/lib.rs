//! # Gamepad Viewer Library
//!
//! Translate raw gamepad samples into named Xbox / DualShock 4 control state.
//!
//! A raw sample is an unlabeled list of button and axis readings. A
//! [`ControllerLayout`](mapping::ControllerLayout) says which raw slots feed
//! each named control, and [`convert`](mapping::convert) turns the sample
//! into buttons such as `A` or `CROSS` and axes such as `LX` or `RT`.

pub mod config;
pub mod error;
pub mod input;
pub mod mapping;
pub mod output;
pub mod poller;
