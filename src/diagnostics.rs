// SPDX-License-Identifier: MPL-2.0
//! Diagnostics for coordinator activity.
//!
//! Lifecycle transitions, suppressions, swallowed animation failures, and
//! outbound server events are recorded into a memory-bounded log behind a
//! cloneable handle. Attachment is optional: a coordinator without a handle
//! records nothing and pays nothing beyond a branch.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use crate::domain::notification::{DismissReason, NotificationId};

/// Default number of retained events.
pub const DEFAULT_LOG_CAPACITY: usize = 256;

/// One recorded coordinator event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationEvent {
    /// An instance mounted and entered the stack.
    Mounted { id: NotificationId, kind: String },
    /// A system instance was suppressed before layout ran.
    SuppressedAtMount { id: NotificationId },
    /// Dismissal was requested for the first time.
    DismissRequested {
        id: NotificationId,
        reason: DismissReason,
    },
    /// An instance reached the terminal phase and its policy ran.
    Removed { id: NotificationId, kind: String },
    /// The animation backend rejected a transition; the failure was
    /// swallowed and lifecycle continued.
    AnimationFailed { id: NotificationId, detail: String },
    /// An outbound event was handed to the server transport.
    ServerEventPushed { name: &'static str },
}

/// A recorded event with its capture time (monotonic).
#[derive(Debug, Clone)]
pub struct TimedEvent {
    pub at: Instant,
    pub event: NotificationEvent,
}

/// Memory-bounded event storage; pushing at capacity evicts the oldest.
#[derive(Debug)]
struct EventLog {
    events: VecDeque<TimedEvent>,
    capacity: usize,
}

impl EventLog {
    fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn push(&mut self, event: NotificationEvent) {
        if self.events.len() >= self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(TimedEvent {
            at: Instant::now(),
            event,
        });
    }
}

/// Cloneable handle to a shared event log.
#[derive(Debug, Clone)]
pub struct DiagnosticsHandle {
    log: Arc<Mutex<EventLog>>,
}

impl Default for DiagnosticsHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagnosticsHandle {
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            log: Arc::new(Mutex::new(EventLog::new(capacity))),
        }
    }

    /// Records an event. A poisoned log (a panic while recording elsewhere)
    /// is ignored; diagnostics never take the coordinator down.
    pub fn record(&self, event: NotificationEvent) {
        if let Ok(mut log) = self.log.lock() {
            log.push(event);
        }
    }

    /// Returns the retained events, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<TimedEvent> {
        self.log
            .lock()
            .map(|log| log.events.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.log.lock().map(|log| log.events.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut log) = self.log.lock() {
            log.events.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> NotificationId {
        NotificationId::new(raw)
    }

    #[test]
    fn new_handle_is_empty() {
        let handle = DiagnosticsHandle::new();
        assert!(handle.is_empty());
        assert!(handle.snapshot().is_empty());
    }

    #[test]
    fn events_are_retained_in_order() {
        let handle = DiagnosticsHandle::new();
        handle.record(NotificationEvent::Mounted {
            id: id("a"),
            kind: "flash".to_string(),
        });
        handle.record(NotificationEvent::Removed {
            id: id("a"),
            kind: "flash".to_string(),
        });

        let events: Vec<NotificationEvent> =
            handle.snapshot().into_iter().map(|e| e.event).collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], NotificationEvent::Mounted { .. }));
        assert!(matches!(events[1], NotificationEvent::Removed { .. }));
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let handle = DiagnosticsHandle::with_capacity(2);
        for name in ["a", "b", "c"] {
            handle.record(NotificationEvent::SuppressedAtMount { id: id(name) });
        }

        let events = handle.snapshot();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].event,
            NotificationEvent::SuppressedAtMount { id: id("b") }
        );
        assert_eq!(
            events[1].event,
            NotificationEvent::SuppressedAtMount { id: id("c") }
        );
    }

    #[test]
    fn clones_share_the_same_log() {
        let handle = DiagnosticsHandle::new();
        let clone = handle.clone();
        clone.record(NotificationEvent::ServerEventPushed {
            name: "clear-toast",
        });
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn clear_empties_the_log() {
        let handle = DiagnosticsHandle::new();
        handle.record(NotificationEvent::SuppressedAtMount { id: id("a") });
        handle.clear();
        assert!(handle.is_empty());
    }
}
