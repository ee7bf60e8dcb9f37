// SPDX-License-Identifier: MPL-2.0
//! The stack layout engine.
//!
//! [`compute_stack`] takes a group's currently visible members, in mount
//! order, and assigns every one of them an order, a signed target offset,
//! an opacity/interactivity state, and a depth. The computation starts from
//! scratch on every call: previous orders are never patched incrementally,
//! so the result only depends on the membership snapshot it was given.
//!
//! Who is in the snapshot is the caller's concern (hidden handles and
//! exiting instances are filtered out before layout runs); this module is
//! pure arithmetic over what it receives.

use super::group::GroupConfig;
use super::notification::NotificationId;

/// Depth assigned to the newest item; each older item sits one step behind.
pub const BASE_DEPTH: i32 = 50;

/// One visible member of a group, as the layout engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct StackItem {
    pub id: NotificationId,
    /// Rendered extent along the stacking axis, in pixels.
    pub extent: f64,
    /// True until the instance has been assigned an order once; such items
    /// get a synthetic entry keyframe.
    pub first_layout: bool,
}

impl StackItem {
    pub fn new(id: impl Into<NotificationId>, extent: f64) -> Self {
        Self {
            id: id.into(),
            extent,
            first_layout: false,
        }
    }

    #[must_use]
    pub fn entering(mut self) -> Self {
        self.first_layout = true;
        self
    }
}

/// Target state for one member, produced by [`compute_stack`].
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSlot {
    pub id: NotificationId,
    /// Zero-based rank, 0 = most recently mounted.
    pub order: usize,
    /// Signed resting offset along the stacking axis, in pixels.
    pub offset: f64,
    /// Synthetic starting offset one full step past the anchor edge;
    /// present only on an instance's very first layout.
    pub entry_offset: Option<f64>,
    /// 1.0 below the max-visible threshold, 0.0 at or beyond it.
    pub opacity: f64,
    /// Pointer events enabled below the threshold only.
    pub interactive: bool,
    /// z-order; strictly decreasing with order, so newer items cover older
    /// ones.
    pub depth: i32,
}

/// Computes the stack for `items`, given in mount order (oldest first).
///
/// Orders are assigned by reverse mount order and the returned slots are
/// sorted by order (newest first). `effective_max` is the max-visible
/// threshold after any flash allowance has been applied by the caller.
#[must_use]
pub fn compute_stack(
    config: &GroupConfig,
    effective_max: usize,
    items: &[StackItem],
) -> Vec<LayoutSlot> {
    let sign = config.anchor.direction();
    let mut slots = Vec::with_capacity(items.len());

    // Cumulative extent of all lower orders; order 0 rests at the edge.
    let mut magnitude = 0.0;

    for (order, item) in items.iter().rev().enumerate() {
        let step = item.extent + config.gap;
        let entry_offset = item
            .first_layout
            .then(|| sign * (magnitude - step));
        let within_max = order < effective_max;

        slots.push(LayoutSlot {
            id: item.id.clone(),
            order,
            offset: sign * magnitude,
            entry_offset,
            opacity: if within_max { 1.0 } else { 0.0 },
            interactive: within_max,
            depth: BASE_DEPTH - order as i32,
        });

        magnitude += step;
    }

    slots
}

/// Signed offset that puts an exiting instance one full step past the
/// anchor edge. The travel distance from slot `k` is the instance's current
/// offset plus one step, so it grows with both extent and last order.
#[must_use]
pub fn exit_offset(config: &GroupConfig, extent: f64) -> f64 {
    -config.anchor.direction() * (extent + config.gap)
}
