// SPDX-License-Identifier: MPL-2.0
//! Server transport port definition.
//!
//! The remote view-server owns the authoritative notification list; after
//! a removal the coordinator tells it what disappeared and the server
//! reconciles. The transport only needs to deliver a named event with a
//! payload to a server-bound component; wire encoding is the
//! implementor's concern, which is why payloads derive [`serde::Serialize`]
//! and nothing more.

use serde::Serialize;

use crate::domain::group::GroupId;
use crate::domain::notification::NotificationId;

/// Event name for clearing a server-rendered flash.
pub const CLEAR_FLASH_EVENT: &str = "lv:clear-flash";
/// Event name for clearing a server-owned toast.
pub const CLEAR_TOAST_EVENT: &str = "clear-toast";

/// Payload of a [`CLEAR_FLASH_EVENT`], carrying the flash's sub-kind key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearFlashPayload {
    pub key: String,
}

/// Payload of a [`CLEAR_TOAST_EVENT`], carrying the toast's identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearToastPayload {
    pub id: String,
}

/// Outbound event fired by a removal policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    /// Tell the server to clear a flash by sub-kind key. Not addressed to
    /// any particular component.
    ClearFlash(ClearFlashPayload),
    /// Tell the group's server-side owner to clear a toast by id.
    ClearToast {
        group: GroupId,
        payload: ClearToastPayload,
    },
}

impl ServerEvent {
    pub fn clear_flash(key: impl Into<String>) -> Self {
        ServerEvent::ClearFlash(ClearFlashPayload { key: key.into() })
    }

    pub fn clear_toast(group: GroupId, id: &NotificationId) -> Self {
        ServerEvent::ClearToast {
            group,
            payload: ClearToastPayload {
                id: id.as_str().to_string(),
            },
        }
    }

    /// Wire name of the event.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::ClearFlash(_) => CLEAR_FLASH_EVENT,
            ServerEvent::ClearToast { .. } => CLEAR_TOAST_EVENT,
        }
    }

    /// Group the event is addressed to, when it is component-scoped.
    #[must_use]
    pub fn target(&self) -> Option<&GroupId> {
        match self {
            ServerEvent::ClearFlash(_) => None,
            ServerEvent::ClearToast { group, .. } => Some(group),
        }
    }
}

/// Delivery of outbound events to the view-server.
pub trait ServerTransport: Send {
    fn push(&self, event: ServerEvent);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_flash_carries_key_and_has_no_target() {
        let event = ServerEvent::clear_flash("info");
        assert_eq!(event.name(), CLEAR_FLASH_EVENT);
        assert_eq!(event.target(), None);
        match event {
            ServerEvent::ClearFlash(payload) => assert_eq!(payload.key, "info"),
            ServerEvent::ClearToast { .. } => panic!("expected ClearFlash"),
        }
    }

    #[test]
    fn clear_toast_is_addressed_to_its_group() {
        let group = GroupId::new("notification-group");
        let id = NotificationId::new("toast-3");
        let event = ServerEvent::clear_toast(group.clone(), &id);
        assert_eq!(event.name(), CLEAR_TOAST_EVENT);
        assert_eq!(event.target(), Some(&group));
    }
}
