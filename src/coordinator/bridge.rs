// SPDX-License-Identifier: MPL-2.0
//! Animation bridge between layout decisions and the external tween engine.
//!
//! The bridge owns the timing vocabulary (durations and easing curves) and
//! translates layout slots into engine calls. Every future it hands back is
//! infallible: backend failures are swallowed here, at the awaited
//! boundary, so a rejected transition can never block lifecycle progress.
//! Swallowed failures are recorded to diagnostics when a handle is
//! attached.

use std::time::Duration;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;

use crate::config::Config;
use crate::diagnostics::{DiagnosticsHandle, NotificationEvent};
use crate::domain::layout::LayoutSlot;
use crate::domain::notification::NotificationId;
use crate::port::animation::{
    AnimationEngine, AnimationError, Easing, Keyframes, PropertyTiming, Timing,
};
use crate::port::render::RenderHandle;

/// Entrance/reflow easing, an aggressive ease-out-quint-like curve.
pub const ENTER_EASING: Easing = Easing::CubicBezier(0.22, 1.0, 0.36, 1.0);
/// Exit easing for both the slide and the fade.
pub const EXIT_EASING: Easing = Easing::EaseOut;

/// Issues engine transitions for entrance, reflow, exit, and snap.
#[derive(Debug)]
pub struct AnimationBridge<E> {
    engine: E,
    enter_duration: Duration,
    exit_duration: Duration,
    exit_opacity_duration: Duration,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<E> AnimationBridge<E> {
    pub fn new(engine: E, config: &Config) -> Self {
        Self {
            engine,
            enter_duration: config.enter_duration(),
            exit_duration: config.exit_duration(),
            exit_opacity_duration: config.exit_opacity_duration(),
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics handle for swallowed-failure reporting.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.diagnostics = Some(handle);
    }

    /// Drives one instance toward its slot: offset and opacity over the
    /// enter duration. A first-layout slot gets its synthetic leading
    /// keyframe (one step past the edge, transparent) prepended so the
    /// entrance slides in rather than materializing at rest.
    ///
    /// Fire-and-forget: the caller spawns the future and moves on.
    pub fn enter_or_reflow<H>(&self, handle: H, slot: &LayoutSlot) -> BoxFuture<'static, ()>
    where
        H: RenderHandle,
        E: AnimationEngine<H>,
    {
        let mut keyframes = Keyframes {
            offset: vec![slot.offset],
            opacity: vec![slot.opacity],
        };
        if let Some(entry_offset) = slot.entry_offset {
            keyframes.offset.insert(0, entry_offset);
            keyframes.opacity.insert(0, 0.0);
        }

        let timing = Timing::new(self.enter_duration, ENTER_EASING);
        self.swallow(
            slot.id.clone(),
            self.engine.animate(handle, keyframes, timing),
        )
    }

    /// Slides the instance fully past the anchor edge while fading it out,
    /// with the fade on its own shorter clock. Resolves when both tracks
    /// finish; the caller awaits this before finalizing removal.
    pub fn exit<H>(
        &self,
        handle: H,
        id: NotificationId,
        exit_offset: f64,
    ) -> BoxFuture<'static, ()>
    where
        H: RenderHandle,
        E: AnimationEngine<H>,
    {
        let keyframes = Keyframes {
            offset: vec![exit_offset],
            opacity: vec![0.0],
        };
        let timing = Timing::new(self.exit_duration, EXIT_EASING).with_opacity(PropertyTiming {
            duration: self.exit_opacity_duration,
            easing: EXIT_EASING,
        });
        self.swallow(id, self.engine.animate(handle, keyframes, timing))
    }

    /// Snaps the instance to its cached target offset with zero duration,
    /// so a server-driven node update never fights an in-flight animation.
    pub fn snap<H>(&self, handle: H, id: NotificationId, offset: f64) -> BoxFuture<'static, ()>
    where
        H: RenderHandle,
        E: AnimationEngine<H>,
    {
        let keyframes = Keyframes {
            offset: vec![offset],
            opacity: Vec::new(),
        };
        self.swallow(id, self.engine.animate(handle, keyframes, Timing::instant()))
    }

    fn swallow(
        &self,
        id: NotificationId,
        animation: BoxFuture<'static, Result<(), AnimationError>>,
    ) -> BoxFuture<'static, ()> {
        let diagnostics = self.diagnostics.clone();
        async move {
            if let Err(err) = animation.await {
                if let Some(handle) = diagnostics {
                    handle.record(NotificationEvent::AnimationFailed { id, detail: err.0 });
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::BASE_DEPTH;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone)]
    struct NoopHandle;

    impl RenderHandle for NoopHandle {
        fn is_hidden(&self) -> bool {
            false
        }
        fn extent(&self) -> f64 {
            40.0
        }
        fn set_depth(&self, _depth: i32) {}
        fn set_interactive(&self, _interactive: bool) {}
        fn remove(&self) {}
    }

    #[derive(Debug, Clone, Default)]
    struct RecordingEngine {
        calls: Arc<Mutex<Vec<(Keyframes, Timing)>>>,
        fail: bool,
    }

    impl RecordingEngine {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(Keyframes, Timing)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl AnimationEngine<NoopHandle> for RecordingEngine {
        fn animate(
            &self,
            _target: NoopHandle,
            keyframes: Keyframes,
            timing: Timing,
        ) -> BoxFuture<'static, Result<(), AnimationError>> {
            self.calls.lock().unwrap().push((keyframes, timing));
            let result = if self.fail {
                Err(AnimationError("backend rejected".to_string()))
            } else {
                Ok(())
            };
            async move { result }.boxed()
        }
    }

    fn slot(entry: Option<f64>) -> LayoutSlot {
        LayoutSlot {
            id: NotificationId::new("toast-1"),
            order: 0,
            offset: 0.0,
            entry_offset: entry,
            opacity: 1.0,
            interactive: true,
            depth: BASE_DEPTH,
        }
    }

    fn bridge(engine: RecordingEngine) -> AnimationBridge<RecordingEngine> {
        AnimationBridge::new(engine, &Config::default())
    }

    #[test]
    fn reflow_animates_to_resting_slot_only() {
        let engine = RecordingEngine::default();
        let bridge = bridge(engine.clone());

        bridge
            .enter_or_reflow(NoopHandle, &slot(None))
            .now_or_never()
            .expect("immediate engine future");

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        let (keyframes, timing) = &calls[0];
        assert_eq!(keyframes.offset, vec![0.0]);
        assert_eq!(keyframes.opacity, vec![1.0]);
        assert_eq!(timing.duration, Duration::from_millis(550));
        assert_eq!(timing.easing, ENTER_EASING);
    }

    #[test]
    fn entrance_prepends_leading_keyframe() {
        let engine = RecordingEngine::default();
        let bridge = bridge(engine.clone());

        bridge
            .enter_or_reflow(NoopHandle, &slot(Some(-55.0)))
            .now_or_never()
            .expect("immediate engine future");

        let (keyframes, _) = &engine.calls()[0];
        assert_eq!(keyframes.offset, vec![-55.0, 0.0]);
        assert_eq!(keyframes.opacity, vec![0.0, 1.0]);
    }

    #[test]
    fn exit_fades_on_its_own_clock() {
        let engine = RecordingEngine::default();
        let bridge = bridge(engine.clone());

        bridge
            .exit(NoopHandle, NotificationId::new("toast-1"), -55.0)
            .now_or_never()
            .expect("immediate engine future");

        let (keyframes, timing) = &engine.calls()[0];
        assert_eq!(keyframes.offset, vec![-55.0]);
        assert_eq!(keyframes.opacity, vec![0.0]);
        assert_eq!(timing.duration, Duration::from_millis(300));
        let opacity = timing.opacity.expect("opacity override");
        assert_eq!(opacity.duration, Duration::from_millis(200));
        assert_eq!(opacity.easing, EXIT_EASING);
    }

    #[test]
    fn snap_is_instant_and_leaves_opacity_alone() {
        let engine = RecordingEngine::default();
        let bridge = bridge(engine.clone());

        bridge
            .snap(NoopHandle, NotificationId::new("toast-1"), 55.0)
            .now_or_never()
            .expect("immediate engine future");

        let (keyframes, timing) = &engine.calls()[0];
        assert_eq!(keyframes.offset, vec![55.0]);
        assert!(keyframes.opacity.is_empty());
        assert!(timing.is_instant());
    }

    #[test]
    fn backend_failure_is_swallowed_and_recorded() {
        let diagnostics = DiagnosticsHandle::new();
        let mut bridge = bridge(RecordingEngine::failing());
        bridge.set_diagnostics(diagnostics.clone());

        bridge
            .exit(NoopHandle, NotificationId::new("toast-1"), -55.0)
            .now_or_never()
            .expect("failure must still resolve");

        let events = diagnostics.snapshot();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0].event,
            NotificationEvent::AnimationFailed { .. }
        ));
    }

    #[test]
    fn backend_failure_without_diagnostics_is_silent() {
        let bridge = bridge(RecordingEngine::failing());
        bridge
            .exit(NoopHandle, NotificationId::new("toast-1"), -55.0)
            .now_or_never()
            .expect("failure must still resolve");
    }
}
