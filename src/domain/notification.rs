// SPDX-License-Identifier: MPL-2.0
//! Notification identity and mount-time metadata.
//!
//! A notification's configuration surface is read once when it mounts and
//! is immutable afterwards. Mutable per-instance state (order, cached
//! target offset, lifecycle phase) lives in the coordinator's side-table,
//! never here.

use std::fmt;
use std::time::Duration;

use super::group::GroupId;

/// Unique identifier for a notification instance.
///
/// This is the host-assigned element id, so server events can address the
/// same node the server rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotificationId(String);

impl NotificationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Closed enumeration of notification kinds, each with a distinct removal
/// policy.
///
/// The raw kind tag is kept as a string in [`NotificationMeta`] and only
/// resolved here; an unresolvable tag reaching removal is a fatal usage
/// error surfaced by the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Client-owned flash: removed locally, no server notice.
    Flash,
    /// Server-rendered flash: removed locally, then the server is told to
    /// clear the flash by its sub-kind key.
    LvFlash,
    /// Server-owned toast: the server is told to clear it by id and owns
    /// the node's actual destruction.
    LvToast,
    /// System banner (connection errors and the like): suppressed at mount
    /// when its governing condition is not currently true; no removal
    /// action of its own.
    System,
}

impl Kind {
    /// Resolves a raw kind tag. Returns `None` for anything outside the
    /// closed set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "flash" => Some(Kind::Flash),
            "lv-flash" => Some(Kind::LvFlash),
            "lv-toast" => Some(Kind::LvToast),
            "system" => Some(Kind::System),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_tag(&self) -> &'static str {
        match self {
            Kind::Flash => "flash",
            Kind::LvFlash => "lv-flash",
            Kind::LvToast => "lv-toast",
            Kind::System => "system",
        }
    }

    /// Whether this kind counts toward the flash allowance that widens a
    /// group's max-visible threshold.
    #[must_use]
    pub fn is_flash_category(&self) -> bool {
        matches!(self, Kind::Flash | Kind::LvFlash | Kind::System)
    }
}

/// Why a dismissal was requested.
///
/// The reason never changes the removal policy; it is carried for
/// diagnostics only. The wire payloads carry exactly the fields the server
/// contract names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The user acted on the notification (click, key press).
    User,
    /// The instance's own auto-dismiss timer elapsed.
    Timeout,
    /// The server pushed a dismissal.
    Server,
}

/// Per-notification configuration, read once at mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMeta {
    /// Instance identifier (the host element id).
    pub id: NotificationId,
    /// Raw kind tag as found on the element. Resolved via [`Kind::from_tag`]
    /// when a policy decision is needed.
    pub kind: String,
    /// Sub-kind key, used only by the `lv-flash` removal payload.
    pub flash_key: Option<String>,
    /// Which group this instance belongs to.
    pub group: GroupId,
    /// Auto-dismiss duration. `None` means sticky.
    pub auto_dismiss: Option<Duration>,
}

impl NotificationMeta {
    pub fn new(id: impl Into<NotificationId>, kind: impl Into<String>, group: GroupId) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            flash_key: None,
            group,
            auto_dismiss: None,
        }
    }

    #[must_use]
    pub fn with_flash_key(mut self, key: impl Into<String>) -> Self {
        self.flash_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_auto_dismiss(mut self, duration: Duration) -> Self {
        self.auto_dismiss = if duration.is_zero() {
            None
        } else {
            Some(duration)
        };
        self
    }

    /// Sets the auto-dismiss duration from a raw attribute value.
    ///
    /// Malformed or non-positive values mean sticky, never an error.
    #[must_use]
    pub fn with_duration_attr(mut self, raw: &str) -> Self {
        self.auto_dismiss = parse_duration_attr(raw);
        self
    }

    /// Resolved kind, if the tag belongs to the closed set.
    #[must_use]
    pub fn resolved_kind(&self) -> Option<Kind> {
        Kind::from_tag(&self.kind)
    }
}

/// Parses an auto-dismiss duration attribute (milliseconds).
///
/// Zero, negative, or unparseable input yields `None` (sticky).
#[must_use]
pub fn parse_duration_attr(raw: &str) -> Option<Duration> {
    let millis: i64 = raw.trim().parse().ok()?;
    if millis > 0 {
        Some(Duration::from_millis(millis as u64))
    } else {
        None
    }
}
