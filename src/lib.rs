// SPDX-License-Identifier: MPL-2.0
//! `toast_stack` coordinates stacked, animated notifications against a
//! server-synchronized view.
//!
//! The crate is the client-side authority for *where* each notification
//! sits and *when* it leaves: a pure layout core computes newest-first
//! stacking orders and pixel offsets, a message-driven coordinator runs
//! each instance's lifecycle, and port traits abstract the three external
//! capabilities involved (rendered surface, tween engine, server
//! transport). A tokio [`runtime::Driver`] turns the synchronous
//! coordinator into an event loop.

#![doc(html_root_url = "https://docs.rs/toast_stack/0.1.0")]

pub mod config;
pub mod coordinator;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod port;
pub mod runtime;

pub use config::Config;
pub use coordinator::{Coordinator, Effect, Message, Phase};
pub use domain::group::{Anchor, GroupConfig, GroupId};
pub use domain::notification::{DismissReason, Kind, NotificationId, NotificationMeta};
pub use error::{Error, Result};
pub use port::{AnimationEngine, RenderHandle, ServerTransport};
pub use runtime::{Driver, Mailbox};
