// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core stacking logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and the stack
//! layout computation. It has no dependencies on external crates (except
//! `std`) to ensure testability and architectural purity.
//!
//! # Modules
//!
//! - [`group`]: Group identity and anchored-container configuration
//!   ([`GroupId`](group::GroupId), [`Anchor`](group::Anchor),
//!   [`GroupConfig`](group::GroupConfig))
//! - [`layout`]: The stack layout engine ([`compute_stack`](layout::compute_stack),
//!   [`LayoutSlot`](layout::LayoutSlot))
//! - [`notification`]: Notification identity and mount-time metadata
//!   ([`NotificationId`](notification::NotificationId), [`Kind`](notification::Kind),
//!   [`NotificationMeta`](notification::NotificationMeta))

pub mod group;
pub mod layout;
pub mod notification;
