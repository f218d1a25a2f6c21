use std::sync::Weak;

use tokio::select;

use crate::Actor;
use crate::mailbox::{Envelope, Inbox, Mailbox};

/// Drives one actor: pulls messages off the inbox and applies them to
/// the state, one at a time, until the actor is stopped or every handle
/// is gone.
pub struct Scheduler<S> {
    mailbox: Weak<Mailbox<S>>,
    inbox: Inbox<S>,
}

impl<S: Send + Sync + 'static> Scheduler<S> {
    #[inline]
    pub fn new(mailbox: Weak<Mailbox<S>>, inbox: Inbox<S>) -> Self {
        Self { mailbox, inbox }
    }

    /// Waits for the next message. A stop request wins over queued
    /// messages.
    async fn next(&mut self) -> Option<Envelope<S>> {
        let Inbox { msg_rx, stop_rx } = &mut self.inbox;
        select! {
            biased;

            _ = stop_rx.changed() => None,
            msg = msg_rx.recv() => msg,
        }
    }

    pub async fn run(mut self, mut state: S) {
        debug!("started");
        let mut handled = 0u64;
        while let Some(msg) = self.next().await {
            trace!("received message: {msg:?}");

            let Some(mailbox) = self.mailbox.upgrade() else {
                warn!("last mailbox has been dropped, discard the message");
                break;
            };
            let handle = Actor::from_mailbox(mailbox);
            trace_span!("proc msg", seq = handled).in_scope(|| {
                msg.handle_box(&mut state, &handle);
            });
            handled += 1;
        }
        // Queued messages (and their reply senders) are dropped here, so
        // any asker still waiting observes the actor as dead.
        self.inbox.msg_rx.close();
        debug!(handled, "will terminate");
    }
}
