// SPDX-License-Identifier: MPL-2.0
//! Port definitions for external collaborators.
//!
//! The coordinator only ever talks to the outside world through these
//! traits: the host's rendering handles, the vendored animation engine, and
//! the server-bound event transport. Hosts implement them; the coordinator
//! stays ignorant of DOM, interpolation math, and wire encodings.

pub mod animation;
pub mod render;
pub mod server;

pub use animation::{AnimationEngine, AnimationError, Easing, Keyframes, PropertyTiming, Timing};
pub use render::RenderHandle;
pub use server::{ClearFlashPayload, ClearToastPayload, ServerEvent, ServerTransport};
