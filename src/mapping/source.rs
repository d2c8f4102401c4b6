//! # Source Spec Parsing
//!
//! Parses the compact strings that point a semantic control at a raw slot.
//!
//! ## Grammar
//!
//! ```text
//! (Button|Axis|Axe|Axes) <digits> [+|-]
//! ```
//!
//! The prefix is matched case-insensitively. `Button` belongs to the button
//! family, the three `Ax*` spellings to the axis family. A trailing `-`
//! inverts the reading; `+` or nothing keeps it.
//!
//! | Spec | Kind | Index | Sign |
//! |------|------|-------|------|
//! | `Button0` | Button | 0 | + |
//! | `Axis1-` | Axis | 1 | - |
//! | `axes3+` | Axis | 3 | + |
//!
//! The index is written without leading zeros (`Button01` is a no-match).
//! Anything else is a no-match. Malformed specs are data, not faults, so
//! parsing returns `Option` rather than `Result`.

use serde::Serialize;

/// Which raw array a spec points into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SourceKind {
    Button,
    Axis,
}

/// Multiplier applied to a raw reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Sign {
    #[default]
    Positive,
    Negative,
}

impl Sign {
    /// `1.0` or `-1.0`.
    #[must_use]
    pub fn factor(self) -> f32 {
        match self {
            Sign::Positive => 1.0,
            Sign::Negative => -1.0,
        }
    }

    /// Applies the sign to a raw reading.
    #[must_use]
    pub fn apply(self, value: f32) -> f32 {
        self.factor() * value
    }
}

/// A parsed reference to one raw button or axis slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub index: usize,
    pub sign: Sign,
}

impl SourceSpec {
    /// Parses a spec string, expecting the given family.
    ///
    /// Returns `None` when the text does not match the grammar or names the
    /// other family.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamepad_viewer::mapping::source::{Sign, SourceKind, SourceSpec};
    ///
    /// let spec = SourceSpec::parse("Axis1-", SourceKind::Axis).unwrap();
    /// assert_eq!(spec.index, 1);
    /// assert_eq!(spec.sign, Sign::Negative);
    ///
    /// assert!(SourceSpec::parse("Axis1-", SourceKind::Button).is_none());
    /// assert!(SourceSpec::parse("Trigger2", SourceKind::Button).is_none());
    /// ```
    #[must_use]
    pub fn parse(text: &str, expected: SourceKind) -> Option<Self> {
        let (kind, rest) = split_prefix(text)?;
        if kind != expected {
            return None;
        }

        let (digits, sign) = match rest.as_bytes().last().copied()? {
            b'+' => (&rest[..rest.len() - 1], Sign::Positive),
            b'-' => (&rest[..rest.len() - 1], Sign::Negative),
            _ => (rest, Sign::Positive),
        };

        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        // Indices are slot names, so `01` names no slot
        if digits.len() > 1 && digits.starts_with('0') {
            return None;
        }

        // Overflowing indices can never address a slot anyway
        let index = digits.parse().ok()?;

        Some(Self { kind, index, sign })
    }

    /// Shorthand for `parse(text, SourceKind::Button)`.
    #[must_use]
    pub fn button(text: &str) -> Option<Self> {
        Self::parse(text, SourceKind::Button)
    }

    /// Shorthand for `parse(text, SourceKind::Axis)`.
    #[must_use]
    pub fn axis(text: &str) -> Option<Self> {
        Self::parse(text, SourceKind::Axis)
    }
}

/// Splits off the family prefix. Longest spelling first so `Axes` is not
/// read as `Axe` followed by an `s`.
fn split_prefix(text: &str) -> Option<(SourceKind, &str)> {
    const PREFIXES: [(&str, SourceKind); 4] = [
        ("button", SourceKind::Button),
        ("axis", SourceKind::Axis),
        ("axes", SourceKind::Axis),
        ("axe", SourceKind::Axis),
    ];

    PREFIXES.iter().find_map(|&(prefix, kind)| {
        let head = text.get(..prefix.len())?;
        head.eq_ignore_ascii_case(prefix)
            .then(|| (kind, &text[prefix.len()..]))
    })
}
