// SPDX-License-Identifier: MPL-2.0
//! Asynchronous driver for the coordinator.
//!
//! [`Coordinator::handle_message`] is synchronous; this module supplies the
//! event loop around it. A [`Driver`] owns the coordinator and a message
//! channel, handles each inbound message, and spawns the returned effects
//! onto the tokio runtime. Effects that complete with a follow-up (exit
//! animations, auto-dismiss timers) feed their completion back into the
//! same channel, so ordering guarantees stay with the single consumer.
//!
//! Hosts talk to the driver through a cheap cloneable [`Mailbox`].

use tokio::sync::mpsc;

use crate::coordinator::{Coordinator, Effect, Message};
use crate::domain::notification::{DismissReason, NotificationId, NotificationMeta};
use crate::error::Result;
use crate::port::animation::AnimationEngine;
use crate::port::render::RenderHandle;
use crate::port::server::ServerTransport;

enum Envelope<H> {
    Message(Message<H>),
    Shutdown,
}

/// Cloneable sending side of a driver's channel.
///
/// Sends after the driver has stopped are silently dropped; a closed loop
/// has no use for further lifecycle input.
#[derive(Debug)]
pub struct Mailbox<H> {
    tx: mpsc::UnboundedSender<Envelope<H>>,
}

impl<H> Clone for Mailbox<H> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<H> Mailbox<H> {
    pub fn send(&self, message: Message<H>) {
        let _ = self.tx.send(Envelope::Message(message));
    }

    /// Announces a newly observed notification element.
    pub fn mount(&self, meta: NotificationMeta, handle: H) {
        self.send(Message::Mounted { meta, handle });
    }

    /// Requests dismissal of an instance.
    pub fn dismiss(&self, id: NotificationId, reason: DismissReason) {
        self.send(Message::Dismiss { id, reason });
    }

    /// Reports a server-driven in-place update of an instance's node.
    pub fn updated(&self, id: NotificationId) {
        self.send(Message::Updated { id });
    }

    /// Stops the driver after the messages already queued are handled.
    pub fn shutdown(&self) {
        let _ = self.tx.send(Envelope::Shutdown);
    }
}

/// Event loop that owns a [`Coordinator`] and runs it to completion.
pub struct Driver<H, E, S>
where
    H: RenderHandle,
    E: AnimationEngine<H>,
    S: ServerTransport,
{
    coordinator: Coordinator<H, E, S>,
    tx: mpsc::UnboundedSender<Envelope<H>>,
    rx: mpsc::UnboundedReceiver<Envelope<H>>,
}

impl<H, E, S> Driver<H, E, S>
where
    H: RenderHandle,
    E: AnimationEngine<H>,
    S: ServerTransport,
{
    pub fn new(coordinator: Coordinator<H, E, S>) -> (Self, Mailbox<H>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mailbox = Mailbox { tx: tx.clone() };
        (
            Self {
                coordinator,
                tx,
                rx,
            },
            mailbox,
        )
    }

    /// Runs until shutdown is requested. The driver keeps a sender of its
    /// own so in-flight exits and timers can always report back; dropping
    /// every mailbox therefore does not stop the loop.
    ///
    /// The only error that escapes is the coordinator's fatal unknown-kind
    /// condition; everything else is absorbed by the lifecycle itself.
    pub async fn run(mut self) -> Result<()> {
        while let Some(envelope) = self.rx.recv().await {
            match envelope {
                Envelope::Shutdown => break,
                Envelope::Message(message) => {
                    for effect in self.coordinator.handle_message(message)? {
                        self.spawn(effect);
                    }
                }
            }
        }
        Ok(())
    }

    fn spawn(&self, effect: Effect) {
        let tx = self.tx.clone();
        match effect {
            Effect::Animate(animation) => {
                tokio::spawn(animation);
            }
            Effect::AwaitExit { id, done } => {
                tokio::spawn(async move {
                    done.await;
                    let _ = tx.send(Envelope::Message(Message::ExitFinished { id }));
                });
            }
            Effect::ArmTimer { id, after } => {
                tokio::spawn(async move {
                    tokio::time::sleep(after).await;
                    let _ = tx.send(Envelope::Message(Message::DismissTimerElapsed { id }));
                });
            }
        }
    }
}
