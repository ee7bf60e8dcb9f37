// SPDX-License-Identifier: MPL-2.0
//! Animation engine port definition.
//!
//! The generic tweened-property engine is an external capability: given a
//! target, keyframed properties, and timing parameters, it interpolates
//! asynchronously and resolves when finished. Its interpolation math is not
//! part of this crate; the coordinator only depends on this contract.
//!
//! # Completion semantics
//!
//! The returned future resolves once every animated property has finished.
//! If the target is gone by the time the engine looks at it, the engine
//! should resolve immediately (best effort) rather than error. No timeout
//! is imposed on the coordinator's side: a stalled backend stalls removal.

use std::fmt;
use std::time::Duration;

use futures_util::future::BoxFuture;

use super::render::RenderHandle;

/// Keyframe lists for the two animated properties.
///
/// Each list is a sequence of values the property passes through; a
/// single-element list animates from the current value to that value. An
/// empty list leaves the property untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Keyframes {
    /// Signed offsets along the stacking axis, in pixels.
    pub offset: Vec<f64>,
    /// Opacity values in `0.0..=1.0`.
    pub opacity: Vec<f64>,
}

/// Easing curve applied to a transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseOut,
    /// Cubic bezier control points (x1, y1, x2, y2).
    CubicBezier(f64, f64, f64, f64),
}

/// Timing override for a single property.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyTiming {
    pub duration: Duration,
    pub easing: Easing,
}

/// Timing parameters for one transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Duration for every property without an override.
    pub duration: Duration,
    pub easing: Easing,
    /// Independent timing for the opacity track, used by exits where the
    /// fade finishes ahead of the slide.
    pub opacity: Option<PropertyTiming>,
}

impl Timing {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            opacity: None,
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, timing: PropertyTiming) -> Self {
        self.opacity = Some(timing);
        self
    }

    /// Zero-duration timing for imperceptible snap repositioning.
    #[must_use]
    pub fn instant() -> Self {
        Self::new(Duration::ZERO, Easing::Linear)
    }

    #[must_use]
    pub fn is_instant(&self) -> bool {
        self.duration.is_zero() && self.opacity.is_none()
    }
}

/// Failure reported by the animation backend.
///
/// The coordinator swallows these at the awaited boundary, since a failed
/// exit animation must not block removal; the payload exists for
/// diagnostics only.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationError(pub String);

impl fmt::Display for AnimationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "animation backend failure: {}", self.0)
    }
}

impl std::error::Error for AnimationError {}

/// The external tween engine, reduced to a single call.
pub trait AnimationEngine<H: RenderHandle>: Send + Sync {
    /// Starts interpolating `keyframes` on `target` and returns a future
    /// that resolves when every property has finished.
    fn animate(
        &self,
        target: H,
        keyframes: Keyframes,
        timing: Timing,
    ) -> BoxFuture<'static, Result<(), AnimationError>>;
}
