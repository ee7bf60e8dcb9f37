// SPDX-License-Identifier: MPL-2.0
//! Group identity and anchored-container configuration.
//!
//! A group is the anchored screen region a stack of notifications grows out
//! of. Its configuration is read from the container's attributes when the
//! group is first observed and is immutable for the group's lifetime; only
//! membership changes afterwards.

use std::collections::HashMap;
use std::fmt;

/// Identifier of a notification group (the container element id).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Screen edge the stack is anchored to.
///
/// Stacking always grows away from the anchor edge, so `bottom_*` anchors
/// flip the sign of every vertical offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Top center.
    TopCenter,
    /// Top-right corner.
    #[default]
    TopRight,
    /// Bottom-left corner.
    BottomLeft,
    /// Bottom center.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Parses a container `anchor` attribute value.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top_left" => Some(Anchor::TopLeft),
            "top_center" => Some(Anchor::TopCenter),
            "top_right" => Some(Anchor::TopRight),
            "bottom_left" => Some(Anchor::BottomLeft),
            "bottom_center" => Some(Anchor::BottomCenter),
            "bottom_right" => Some(Anchor::BottomRight),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_attr(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::TopCenter => "top_center",
            Anchor::TopRight => "top_right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::BottomCenter => "bottom_center",
            Anchor::BottomRight => "bottom_right",
        }
    }

    /// True for anchors along the bottom edge.
    #[must_use]
    pub fn is_bottom(&self) -> bool {
        matches!(
            self,
            Anchor::BottomLeft | Anchor::BottomCenter | Anchor::BottomRight
        )
    }

    /// Sign applied to offset magnitudes so the stack grows away from the
    /// anchor edge: `+1.0` for top anchors, `-1.0` for bottom anchors.
    #[must_use]
    pub fn direction(&self) -> f64 {
        if self.is_bottom() {
            -1.0
        } else {
            1.0
        }
    }
}

/// Container attribute names, the canonical configuration vocabulary.
pub const ATTR_ANCHOR: &str = "anchor";
pub const ATTR_GAP: &str = "gap";
pub const ATTR_MAX_VISIBLE: &str = "max-visible";

/// Immutable stacking configuration of one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupConfig {
    /// Anchor edge, controls the offset sign.
    pub anchor: Anchor,
    /// Gap between stacked items in pixels.
    pub gap: f64,
    /// Number of simultaneously fully-visible items; anything at or beyond
    /// this order is faded out and made non-interactive.
    pub max_visible: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            anchor: Anchor::default(),
            gap: 15.0,
            max_visible: 3,
        }
    }
}

impl GroupConfig {
    pub fn new(anchor: Anchor, gap: f64, max_visible: usize) -> Self {
        Self {
            anchor,
            gap,
            max_visible,
        }
    }

    /// Builds a config from a container's attribute map.
    ///
    /// Missing or malformed attributes fall back to the corresponding field
    /// of `fallback`; container markup is never a source of errors.
    #[must_use]
    pub fn from_attributes(attrs: &HashMap<String, String>, fallback: &GroupConfig) -> Self {
        let anchor = attrs
            .get(ATTR_ANCHOR)
            .and_then(|value| Anchor::parse(value))
            .unwrap_or(fallback.anchor);
        let gap = attrs
            .get(ATTR_GAP)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .filter(|gap| gap.is_finite() && *gap >= 0.0)
            .unwrap_or(fallback.gap);
        let max_visible = attrs
            .get(ATTR_MAX_VISIBLE)
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(fallback.max_visible);

        Self::new(anchor, gap, max_visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn anchor_attrs_round_trip() {
        for anchor in [
            Anchor::TopLeft,
            Anchor::TopCenter,
            Anchor::TopRight,
            Anchor::BottomLeft,
            Anchor::BottomCenter,
            Anchor::BottomRight,
        ] {
            assert_eq!(Anchor::parse(anchor.as_attr()), Some(anchor));
        }
    }

    #[test]
    fn unknown_anchor_does_not_parse() {
        assert_eq!(Anchor::parse("middle"), None);
        assert_eq!(Anchor::parse("bottom"), None);
    }

    #[test]
    fn bottom_anchors_flip_direction() {
        assert_eq!(Anchor::TopLeft.direction(), 1.0);
        assert_eq!(Anchor::TopRight.direction(), 1.0);
        assert_eq!(Anchor::BottomLeft.direction(), -1.0);
        assert_eq!(Anchor::BottomCenter.direction(), -1.0);
    }

    #[test]
    fn from_attributes_reads_all_fields() {
        let config = GroupConfig::from_attributes(
            &attrs(&[("anchor", "bottom_left"), ("gap", "20"), ("max-visible", "5")]),
            &GroupConfig::default(),
        );
        assert_eq!(config.anchor, Anchor::BottomLeft);
        assert_eq!(config.gap, 20.0);
        assert_eq!(config.max_visible, 5);
    }

    #[test]
    fn malformed_attributes_fall_back() {
        let fallback = GroupConfig::default();
        let config = GroupConfig::from_attributes(
            &attrs(&[("anchor", "sideways"), ("gap", "wide"), ("max-visible", "-2")]),
            &fallback,
        );
        assert_eq!(config, fallback);
    }

    #[test]
    fn negative_gap_falls_back() {
        let config = GroupConfig::from_attributes(
            &attrs(&[("gap", "-10")]),
            &GroupConfig::default(),
        );
        assert_eq!(config.gap, 15.0);
    }

    #[test]
    fn empty_attributes_yield_fallback() {
        let fallback = GroupConfig::new(Anchor::BottomRight, 8.0, 2);
        let config = GroupConfig::from_attributes(&HashMap::new(), &fallback);
        assert_eq!(config, fallback);
    }
}
