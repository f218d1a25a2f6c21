use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::Instrument;

use crate::ask::Ask;
use crate::mailbox::Mailbox;
use crate::scheduler::Scheduler;
use crate::{ActorDeadError, Message};

/// Handle to an actor.
///
/// The actor keeps running as long as at least one handle is alive, or
/// until [`Actor::stop`] is called.
pub struct Actor<S> {
    mailbox: Arc<Mailbox<S>>,
}

impl<S: Send + Sync + 'static> Actor<S> {
    /// Spawns a new actor with the specified state and an optional label.
    ///
    /// Must be called within a tokio runtime.
    pub fn spawn(state: S, label: Option<&str>) -> Self {
        let (mailbox, inbox) = Mailbox::open();
        let mailbox = Arc::new(mailbox);
        let scheduler = Scheduler::new(Arc::downgrade(&mailbox), inbox);
        tokio::spawn(
            scheduler
                .run(state)
                .instrument(trace_span!("actor", label = label)),
        );
        Self { mailbox }
    }

    #[inline]
    pub(crate) fn from_mailbox(mailbox: Arc<Mailbox<S>>) -> Self {
        Self { mailbox }
    }

    /// Sends a message to the actor.
    #[inline]
    pub fn send<M: Message<S> + 'static>(
        &self,
        msg: M,
    ) -> Result<(), ActorDeadError> {
        self.mailbox.post(Box::new(msg))
    }

    /// Runs `f` against the actor's state, in order with the other
    /// messages, and returns its result.
    pub async fn ask<F, R>(&self, f: F) -> Result<R, ActorDeadError>
    where
        F: FnOnce(&mut S, &Actor<S>) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.send(Ask::new(f, reply_tx))?;
        reply_rx.await.map_err(|_| ActorDeadError)
    }

    /// Returns `true` once the actor was asked to stop or has exited.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.mailbox.is_stopped()
    }

    /// Asks the actor to stop.
    ///
    /// The actor is not guaranteed to stop immediately, but it will not
    /// handle further messages once it notices the request.
    #[inline]
    pub fn stop(&self) {
        self.mailbox.stop();
    }
}

impl<S> Clone for Actor<S> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            mailbox: Arc::clone(&self.mailbox),
        }
    }
}
