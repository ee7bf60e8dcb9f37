// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle coordination.
//!
//! The [`Coordinator`] owns every group's stacking state and drives each
//! notification instance through the `Mounted → Active → DismissRequested →
//! Removed` lifecycle. It is message-driven: the host (and the
//! [`runtime`](crate::runtime) driver) feeds it [`Message`]s, each handled
//! synchronously and atomically: a layout pass assigns every order and
//! constructs every animation start before the call returns. The
//! asynchronous tail of each reaction comes back as [`Effect`]s for the
//! caller to spawn.
//!
//! Mutable per-instance state (order, cached target offset, phase) lives in
//! [`InstanceRecord`] side-tables keyed by id, and the per-group stacking
//! snapshot is owned by the group's own state entry, created with the group
//! and dropped with it.

mod bridge;

pub use bridge::{AnimationBridge, ENTER_EASING, EXIT_EASING};

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use futures_util::future::BoxFuture;

use crate::config::Config;
use crate::diagnostics::{DiagnosticsHandle, NotificationEvent};
use crate::domain::group::{GroupConfig, GroupId};
use crate::domain::layout::{self, StackItem};
use crate::domain::notification::{DismissReason, Kind, NotificationId, NotificationMeta};
use crate::error::{Error, Result};
use crate::port::animation::AnimationEngine;
use crate::port::render::RenderHandle;
use crate::port::server::{ServerEvent, ServerTransport};

/// Lifecycle phase of one notification instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Just observed; entrance layout is being issued.
    Mounted,
    /// Steady state, eligible for snap repositioning and dismissal.
    Active,
    /// Exit animation in flight; excluded from layout, dismissal signals
    /// are ignored.
    DismissRequested,
    /// Terminal; the removal policy has run.
    Removed,
}

/// Commands and completions the coordinator reacts to.
#[derive(Debug)]
pub enum Message<H> {
    /// A tagged notification element appeared in a group.
    Mounted { meta: NotificationMeta, handle: H },
    /// Dismissal signal from outside (user click, server push).
    Dismiss {
        id: NotificationId,
        reason: DismissReason,
    },
    /// An instance's auto-dismiss timer elapsed.
    DismissTimerElapsed { id: NotificationId },
    /// The exit animation's completion future resolved.
    ExitFinished { id: NotificationId },
    /// The server mutated the instance's node in place.
    Updated { id: NotificationId },
}

/// Asynchronous tail of a handled message, to be spawned by the caller.
pub enum Effect {
    /// Fire-and-forget entrance/reflow/snap transition.
    Animate(BoxFuture<'static, ()>),
    /// Exit transition; when `done` resolves the caller must feed
    /// [`Message::ExitFinished`] back in so removal can finalize.
    AwaitExit {
        id: NotificationId,
        done: BoxFuture<'static, ()>,
    },
    /// Arm the instance's auto-dismiss timer; on elapse the caller feeds
    /// [`Message::DismissTimerElapsed`] back in.
    ArmTimer {
        id: NotificationId,
        after: Duration,
    },
}

impl fmt::Debug for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Animate(_) => f.write_str("Animate"),
            Effect::AwaitExit { id, .. } => f.debug_struct("AwaitExit").field("id", id).finish(),
            Effect::ArmTimer { id, after } => f
                .debug_struct("ArmTimer")
                .field("id", id)
                .field("after", after)
                .finish(),
        }
    }
}

/// Mutable per-instance state, keyed by id in its group's side-table.
#[derive(Debug)]
struct InstanceRecord<H> {
    meta: NotificationMeta,
    handle: H,
    phase: Phase,
    order: Option<usize>,
    target_offset: f64,
    laid_out: bool,
}

/// Per-group stacking state; lives exactly as long as the group.
#[derive(Debug)]
struct GroupState<H> {
    config: GroupConfig,
    /// Member ids in mount order (oldest first). Order assignment reverses
    /// this on every layout pass.
    members: Vec<NotificationId>,
    records: HashMap<NotificationId, InstanceRecord<H>>,
}

impl<H> GroupState<H> {
    fn new(config: GroupConfig) -> Self {
        Self {
            config,
            members: Vec::new(),
            records: HashMap::new(),
        }
    }
}

/// The notification-stack coordinator.
pub struct Coordinator<H, E, S>
where
    H: RenderHandle,
    E: AnimationEngine<H>,
    S: ServerTransport,
{
    defaults: Config,
    bridge: AnimationBridge<E>,
    transport: S,
    groups: HashMap<GroupId, GroupState<H>>,
    memberships: HashMap<NotificationId, GroupId>,
    diagnostics: Option<DiagnosticsHandle>,
}

impl<H, E, S> Coordinator<H, E, S>
where
    H: RenderHandle,
    E: AnimationEngine<H>,
    S: ServerTransport,
{
    pub fn new(config: Config, engine: E, transport: S) -> Self {
        let bridge = AnimationBridge::new(engine, &config);
        Self {
            defaults: config,
            bridge,
            transport,
            groups: HashMap::new(),
            memberships: HashMap::new(),
            diagnostics: None,
        }
    }

    /// Attaches a diagnostics handle for lifecycle and failure reporting.
    pub fn set_diagnostics(&mut self, handle: DiagnosticsHandle) {
        self.bridge.set_diagnostics(handle.clone());
        self.diagnostics = Some(handle);
    }

    /// Registers a group with the configuration read from its container.
    ///
    /// Group configuration is immutable for the group's lifetime, so a
    /// second registration of the same id is ignored. Groups mounted into
    /// without registration get the crate-level defaults.
    pub fn register_group(&mut self, id: GroupId, config: GroupConfig) {
        self.groups.entry(id).or_insert_with(|| GroupState::new(config));
    }

    /// Handles one message; the returned effects are the reaction's
    /// asynchronous tail. The only error is the fatal unknown-kind
    /// condition at removal time.
    pub fn handle_message(&mut self, message: Message<H>) -> Result<Vec<Effect>> {
        match message {
            Message::Mounted { meta, handle } => Ok(self.mount(meta, handle)),
            Message::Dismiss { id, reason } => Ok(self.dismiss(&id, reason)),
            Message::DismissTimerElapsed { id } => Ok(self.dismiss(&id, DismissReason::Timeout)),
            Message::ExitFinished { id } => self.finalize_removal(&id),
            Message::Updated { id } => Ok(self.snap_to_target(&id)),
        }
    }

    /// Mounts one instance: suppression check, membership insert, group
    /// reflow with entrance keyframes, and timer arming.
    fn mount(&mut self, meta: NotificationMeta, handle: H) -> Vec<Effect> {
        // A system banner whose condition is not currently true never
        // reaches layout at all.
        if meta.resolved_kind() == Some(Kind::System) && handle.is_hidden() {
            self.record_event(NotificationEvent::SuppressedAtMount {
                id: meta.id.clone(),
            });
            return Vec::new();
        }

        let id = meta.id.clone();
        let group_id = meta.group.clone();
        self.record_event(NotificationEvent::Mounted {
            id: id.clone(),
            kind: meta.kind.clone(),
        });

        let default_config = self.default_group_config();
        let group = self
            .groups
            .entry(group_id.clone())
            .or_insert_with(|| GroupState::new(default_config));
        if !group.members.contains(&id) {
            group.members.push(id.clone());
        }
        let auto_dismiss = meta.auto_dismiss;
        group.records.insert(
            id.clone(),
            InstanceRecord {
                meta,
                handle,
                phase: Phase::Mounted,
                order: None,
                target_offset: 0.0,
                laid_out: false,
            },
        );
        self.memberships.insert(id.clone(), group_id.clone());

        let mut effects = self.reflow(&group_id, None);

        if let Some(group) = self.groups.get_mut(&group_id) {
            if let Some(record) = group.records.get_mut(&id) {
                record.phase = Phase::Active;
            }
        }

        if let Some(after) = auto_dismiss {
            effects.push(Effect::ArmTimer { id, after });
        }
        effects
    }

    /// At-most-once transition into `DismissRequested`: siblings reflow to
    /// close the gap while the exit animation starts, in parallel.
    fn dismiss(&mut self, id: &NotificationId, reason: DismissReason) -> Vec<Effect> {
        let Some(group_id) = self.memberships.get(id).cloned() else {
            return Vec::new();
        };
        {
            let Some(group) = self.groups.get_mut(&group_id) else {
                return Vec::new();
            };
            let Some(record) = group.records.get_mut(id) else {
                return Vec::new();
            };
            if !matches!(record.phase, Phase::Mounted | Phase::Active) {
                // Re-entrant dismissal is an idempotent no-op.
                return Vec::new();
            }
            record.phase = Phase::DismissRequested;
        }
        self.record_event(NotificationEvent::DismissRequested {
            id: id.clone(),
            reason,
        });

        let mut effects = self.reflow(&group_id, Some(id));

        let Some(group) = self.groups.get(&group_id) else {
            return effects;
        };
        let Some(record) = group.records.get(id) else {
            return effects;
        };
        let exit_offset = layout::exit_offset(&group.config, record.handle.extent());
        effects.push(Effect::AwaitExit {
            id: id.clone(),
            done: self
                .bridge
                .exit(record.handle.clone(), id.clone(), exit_offset),
        });
        effects
    }

    /// Terminal transition, entered only once the exit animation has
    /// resolved. Applies the kind-specific removal policy and drops the
    /// side-table record.
    fn finalize_removal(&mut self, id: &NotificationId) -> Result<Vec<Effect>> {
        let Some(group_id) = self.memberships.get(id).cloned() else {
            return Ok(Vec::new());
        };
        let Some(group) = self.groups.get_mut(&group_id) else {
            return Ok(Vec::new());
        };
        let Some(record) = group.records.get_mut(id) else {
            return Ok(Vec::new());
        };
        if record.phase != Phase::DismissRequested {
            return Ok(Vec::new());
        }
        record.phase = Phase::Removed;

        let kind_tag = record.meta.kind.clone();
        let kind = Kind::from_tag(&kind_tag).ok_or_else(|| Error::UnknownKind {
            id: id.to_string(),
            kind: kind_tag.clone(),
        })?;

        let outbound = match kind {
            Kind::Flash => {
                record.handle.remove();
                None
            }
            Kind::LvFlash => {
                record.handle.remove();
                let key = record.meta.flash_key.clone().unwrap_or_default();
                Some(ServerEvent::clear_flash(key))
            }
            // The server owns the node; it comes down with the clear
            // round-trip, not here.
            Kind::LvToast => Some(ServerEvent::clear_toast(group_id.clone(), id)),
            Kind::System => None,
        };

        group.records.remove(id);
        group.members.retain(|member| member != id);
        self.memberships.remove(id);

        if let Some(event) = outbound {
            self.record_event(NotificationEvent::ServerEventPushed { name: event.name() });
            self.transport.push(event);
        }
        self.record_event(NotificationEvent::Removed {
            id: id.clone(),
            kind: kind_tag,
        });
        Ok(Vec::new())
    }

    /// Server patched the node in place: snap to the last computed target
    /// with zero duration so nothing fights the update visually.
    fn snap_to_target(&mut self, id: &NotificationId) -> Vec<Effect> {
        let Some(group_id) = self.memberships.get(id) else {
            return Vec::new();
        };
        let Some(group) = self.groups.get(group_id) else {
            return Vec::new();
        };
        let Some(record) = group.records.get(id) else {
            return Vec::new();
        };
        if !matches!(record.phase, Phase::Mounted | Phase::Active) {
            return Vec::new();
        }
        vec![Effect::Animate(self.bridge.snap(
            record.handle.clone(),
            id.clone(),
            record.target_offset,
        ))]
    }

    /// Recomputes the whole group's stack from a fresh membership snapshot
    /// and issues one transition per affected instance.
    ///
    /// `excluding` drops an instance already committed to exit so siblings
    /// shift to fill its slot immediately, in parallel with that exit.
    fn reflow(&mut self, group_id: &GroupId, excluding: Option<&NotificationId>) -> Vec<Effect> {
        let ignores_flashes = self.defaults.max_visible_ignores_flashes();
        let Some(group) = self.groups.get_mut(group_id) else {
            return Vec::new();
        };

        // Fresh visibility read on every pass; never cached across events.
        let mut items = Vec::new();
        let mut flash_allowance = 0usize;
        for member in &group.members {
            if excluding == Some(member) {
                continue;
            }
            let Some(record) = group.records.get(member) else {
                continue;
            };
            if !matches!(record.phase, Phase::Mounted | Phase::Active) {
                continue;
            }
            if record.handle.is_hidden() {
                continue;
            }
            if record
                .meta
                .resolved_kind()
                .is_some_and(|kind| kind.is_flash_category())
            {
                flash_allowance += 1;
            }
            items.push(StackItem {
                id: member.clone(),
                extent: record.handle.extent(),
                first_layout: !record.laid_out,
            });
        }

        let effective_max = if ignores_flashes {
            group.config.max_visible + flash_allowance
        } else {
            group.config.max_visible
        };

        let slots = layout::compute_stack(&group.config, effective_max, &items);
        let mut effects = Vec::with_capacity(slots.len());
        for slot in &slots {
            let Some(record) = group.records.get_mut(&slot.id) else {
                continue;
            };
            record.order = Some(slot.order);
            record.target_offset = slot.offset;
            record.laid_out = true;
            record.handle.set_depth(slot.depth);
            record.handle.set_interactive(slot.interactive);
            effects.push(Effect::Animate(
                self.bridge.enter_or_reflow(record.handle.clone(), slot),
            ));
        }
        effects
    }

    fn default_group_config(&self) -> GroupConfig {
        GroupConfig::new(
            Default::default(),
            self.defaults.gap(),
            self.defaults.max_visible(),
        )
    }

    fn record_event(&self, event: NotificationEvent) {
        if let Some(handle) = &self.diagnostics {
            handle.record(event);
        }
    }

    // --- Introspection ---

    /// Whether the coordinator currently tracks `id`.
    #[must_use]
    pub fn contains(&self, id: &NotificationId) -> bool {
        self.memberships.contains_key(id)
    }

    /// Current lifecycle phase of `id`.
    #[must_use]
    pub fn phase(&self, id: &NotificationId) -> Option<Phase> {
        let group = self.groups.get(self.memberships.get(id)?)?;
        group.records.get(id).map(|record| record.phase)
    }

    /// Order assigned by the most recent layout pass that included `id`.
    #[must_use]
    pub fn order_of(&self, id: &NotificationId) -> Option<usize> {
        let group = self.groups.get(self.memberships.get(id)?)?;
        group.records.get(id).and_then(|record| record.order)
    }

    /// Target offset cached by the most recent layout pass.
    #[must_use]
    pub fn target_offset(&self, id: &NotificationId) -> Option<f64> {
        let group = self.groups.get(self.memberships.get(id)?)?;
        group.records.get(id).map(|record| record.target_offset)
    }

    /// Stacking configuration of a known group.
    #[must_use]
    pub fn group_config(&self, id: &GroupId) -> Option<&GroupConfig> {
        self.groups.get(id).map(|group| &group.config)
    }

    /// Number of tracked (not yet removed) instances in a group.
    #[must_use]
    pub fn member_count(&self, id: &GroupId) -> usize {
        self.groups.get(id).map_or(0, |group| group.records.len())
    }
}
