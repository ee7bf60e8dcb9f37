// SPDX-License-Identifier: MPL-2.0
//! Rendering handle port definition.
//!
//! The notification's on-screen box already exists, created and tagged by
//! the host, when the coordinator first observes it. The handle is the
//! coordinator's only view of that box: it reports layout state and accepts
//! the few writes layout decisions need. Handles are expected to be cheap
//! reference-like values (the host typically wraps an `Arc` or a DOM node
//! reference), hence the `Clone` bound and `&self` mutators.

/// The coordinator's view of a notification's rendered box.
pub trait RenderHandle: Clone + Send + 'static {
    /// Whether the box currently has no layout parentage (detached, or
    /// hidden by external means such as a feature flag).
    ///
    /// Hidden boxes occupy no stacking slot and are silently excluded from
    /// layout; a missing or already-detached box is never an error.
    fn is_hidden(&self) -> bool;

    /// Rendered extent along the stacking axis, in pixels.
    fn extent(&self) -> f64;

    /// Applies a z-order value.
    fn set_depth(&self, depth: i32);

    /// Enables or disables pointer events on the box.
    fn set_interactive(&self, interactive: bool);

    /// Detaches the box from the host tree. Called only by removal
    /// policies that own the node locally; server-owned nodes are taken
    /// down by the server's own patch.
    fn remove(&self);
}
