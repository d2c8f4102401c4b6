//! # Button Aliases
//!
//! Xbox and DualShock 4 pads name the same physical buttons differently. The
//! [`ButtonView`] returned by a conversion answers lookups under either
//! convention, whichever one the active layout was written in.
//!
//! Lookup order for a name `k`:
//!
//! 1. the resolved value at `k`
//! 2. the value at [`xbox_to_ds4`]`(k)`
//! 3. the value at [`ds4_to_xbox`]`(k)`
//! 4. unknown (`None`)

use serde::Serialize;
use std::collections::BTreeMap;

/// DualShock 4 name for an Xbox button.
///
/// # Examples
///
/// ```
/// use gamepad_viewer::mapping::alias::xbox_to_ds4;
///
/// assert_eq!(xbox_to_ds4("A"), Some("CROSS"));
/// assert_eq!(xbox_to_ds4("DPAD_UP"), Some("DPAD_UP"));
/// assert_eq!(xbox_to_ds4("TOUCHPAD"), None);
/// ```
#[must_use]
pub fn xbox_to_ds4(name: &str) -> Option<&'static str> {
    let alias = match name {
        "DPAD_UP" => "DPAD_UP",
        "DPAD_DOWN" => "DPAD_DOWN",
        "DPAD_LEFT" => "DPAD_LEFT",
        "DPAD_RIGHT" => "DPAD_RIGHT",
        "START" => "OPTIONS",
        "BACK" => "SHARE",
        "LEFT_THUMB" => "LEFT_THUMB",
        "RIGHT_THUMB" => "RIGHT_THUMB",
        "LEFT_SHOULDER" => "LEFT_SHOULDER",
        "RIGHT_SHOULDER" => "RIGHT_SHOULDER",
        "GUIDE" => "PS",
        "A" => "CROSS",
        "B" => "CIRCLE",
        "X" => "SQUARE",
        "Y" => "TRIANGLE",
        "RIGHT_TRIGGER" => "RIGHT_TRIGGER",
        "LEFT_TRIGGER" => "LEFT_TRIGGER",
        _ => return None,
    };
    Some(alias)
}

/// Xbox name for a DualShock 4 button.
///
/// Both `OPTIONS` and `TOUCHPAD` read as `START`.
#[must_use]
pub fn ds4_to_xbox(name: &str) -> Option<&'static str> {
    let alias = match name {
        "DPAD_UP" => "DPAD_UP",
        "DPAD_DOWN" => "DPAD_DOWN",
        "DPAD_LEFT" => "DPAD_LEFT",
        "DPAD_RIGHT" => "DPAD_RIGHT",
        "PS" => "GUIDE",
        "TOUCHPAD" => "START",
        "SQUARE" => "X",
        "CROSS" => "A",
        "CIRCLE" => "B",
        "TRIANGLE" => "Y",
        "LEFT_SHOULDER" => "LEFT_SHOULDER",
        "RIGHT_SHOULDER" => "RIGHT_SHOULDER",
        "SHARE" => "BACK",
        "OPTIONS" => "START",
        "LEFT_THUMB" => "LEFT_THUMB",
        "RIGHT_THUMB" => "RIGHT_THUMB",
        "RIGHT_TRIGGER" => "RIGHT_TRIGGER",
        "LEFT_TRIGGER" => "LEFT_TRIGGER",
        _ => return None,
    };
    Some(alias)
}

/// Resolved buttons with alias-aware lookup.
///
/// Serializes as the plain resolved map, without alias entries.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use gamepad_viewer::mapping::alias::ButtonView;
///
/// let view = ButtonView::new(BTreeMap::from([("CROSS".to_string(), true)]));
/// assert_eq!(view.get("CROSS"), Some(true));
/// assert_eq!(view.get("A"), Some(true));
/// assert_eq!(view.get("B"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ButtonView {
    values: BTreeMap<String, bool>,
}

impl ButtonView {
    #[must_use]
    pub fn new(values: BTreeMap<String, bool>) -> Self {
        Self { values }
    }

    /// Looks a button up by either naming convention.
    ///
    /// A resolved `false` is a real reading and stops the search.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<bool> {
        self.direct(name)
            .or_else(|| xbox_to_ds4(name).and_then(|alias| self.direct(alias)))
            .or_else(|| ds4_to_xbox(name).and_then(|alias| self.direct(alias)))
    }

    /// `get(name)`, treating unknown names as released.
    #[must_use]
    pub fn is_pressed(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    /// Value under exactly this name, without aliasing.
    #[must_use]
    pub fn direct(&self, name: &str) -> Option<bool> {
        self.values.get(name).copied()
    }

    /// Resolved entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.values.iter().map(|(name, &pressed)| (name.as_str(), pressed))
    }

    /// Names currently pressed.
    pub fn pressed(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().filter(|&(_, pressed)| pressed).map(|(name, _)| name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, bool> {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XBOX_NAMES: [&str; 17] = [
        "DPAD_UP", "DPAD_DOWN", "DPAD_LEFT", "DPAD_RIGHT", "START", "BACK", "LEFT_THUMB",
        "RIGHT_THUMB", "LEFT_SHOULDER", "RIGHT_SHOULDER", "GUIDE", "A", "B", "X", "Y",
        "RIGHT_TRIGGER", "LEFT_TRIGGER",
    ];

    const DS4_NAMES: [&str; 18] = [
        "DPAD_UP", "DPAD_DOWN", "DPAD_LEFT", "DPAD_RIGHT", "PS", "TOUCHPAD", "SQUARE", "CROSS",
        "CIRCLE", "TRIANGLE", "LEFT_SHOULDER", "RIGHT_SHOULDER", "SHARE", "OPTIONS",
        "LEFT_THUMB", "RIGHT_THUMB", "RIGHT_TRIGGER", "LEFT_TRIGGER",
    ];

    fn view(entries: &[(&str, bool)]) -> ButtonView {
        ButtonView::new(entries.iter().map(|&(k, v)| (k.to_string(), v)).collect())
    }

    #[test]
    fn test_every_xbox_name_has_a_ds4_alias() {
        for name in XBOX_NAMES {
            assert!(xbox_to_ds4(name).is_some(), "{} has no alias", name);
        }
    }

    #[test]
    fn test_every_ds4_name_has_an_xbox_alias() {
        for name in DS4_NAMES {
            assert!(ds4_to_xbox(name).is_some(), "{} has no alias", name);
        }
    }

    #[test]
    fn test_tables_round_trip() {
        // TOUCHPAD shares START with OPTIONS, so it is the one one-way entry
        for name in XBOX_NAMES {
            let ds4 = xbox_to_ds4(name).unwrap();
            assert_eq!(ds4_to_xbox(ds4), Some(name), "{} -> {}", name, ds4);
        }
        for name in DS4_NAMES.iter().filter(|&&n| n != "TOUCHPAD") {
            let xbox = ds4_to_xbox(name).unwrap();
            assert_eq!(xbox_to_ds4(xbox), Some(*name), "{} -> {}", name, xbox);
        }
        assert_eq!(ds4_to_xbox("TOUCHPAD"), Some("START"));
    }

    #[test]
    fn test_direct_lookup_wins() {
        let buttons = view(&[("A", false), ("CROSS", true)]);
        assert_eq!(buttons.get("A"), Some(false));
    }

    #[test]
    fn test_forward_alias() {
        let buttons = view(&[("CROSS", true), ("OPTIONS", false)]);
        assert_eq!(buttons.get("A"), Some(true));
        assert_eq!(buttons.get("START"), Some(false));
    }

    #[test]
    fn test_reverse_alias() {
        let buttons = view(&[("A", true), ("GUIDE", true), ("START", true)]);
        assert_eq!(buttons.get("CROSS"), Some(true));
        assert_eq!(buttons.get("PS"), Some(true));
        assert_eq!(buttons.get("TOUCHPAD"), Some(true));
        assert_eq!(buttons.get("OPTIONS"), Some(true));
    }

    #[test]
    fn test_unknown_is_distinct_from_released() {
        let buttons = view(&[("A", false)]);
        assert_eq!(buttons.get("A"), Some(false));
        assert_eq!(buttons.get("B"), None);
        assert_eq!(buttons.get("LT"), None);
        assert!(!buttons.is_pressed("B"));
    }

    #[test]
    fn test_pressed_iterator() {
        let buttons = view(&[("A", true), ("B", false), ("X", true)]);
        assert_eq!(buttons.pressed().collect::<Vec<_>>(), vec!["A", "X"]);
        assert_eq!(buttons.len(), 3);
        assert!(!buttons.is_empty());
        assert!(ButtonView::default().is_empty());
    }

    #[test]
    fn test_map_holds_only_resolved_names() {
        let buttons = view(&[("CROSS", true)]);
        assert_eq!(buttons.get("A"), Some(true));
        assert_eq!(buttons.as_map().len(), 1);
        assert!(!buttons.as_map().contains_key("A"));
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let buttons = view(&[("A", true)]);
        assert_eq!(serde_json::to_string(&buttons).unwrap(), r#"{"A":true}"#);
    }
}
