use std::fmt::Debug;

use tokio::sync::{mpsc, watch};

use crate::{Actor, ActorDeadError};

/// Helper trait for handling boxed messages.
pub trait BoxMessage<S>: Send + Debug + 'static {
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>);
}

/// The message that an actor can handle.
pub trait Message<S>: BoxMessage<S> {
    /// Handles the message with mutable access to the actor's state.
    fn handle(self, state: &mut S, handle: &Actor<S>);
}

impl<S, M: Message<S>> BoxMessage<S> for M {
    #[inline]
    fn handle_box(self: Box<Self>, state: &mut S, handle: &Actor<S>) {
        (*self).handle(state, handle)
    }
}

impl<S, M: Message<S> + ?Sized> Message<S> for Box<M> {
    #[inline]
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        self.handle_box(state, handle)
    }
}

/// A message on its way to the actor.
pub type Envelope<S> = Box<dyn Message<S>>;

/// The sending half, shared by every [`Actor`] handle.
pub struct Mailbox<S> {
    msg_tx: mpsc::UnboundedSender<Envelope<S>>,
    stop_tx: watch::Sender<bool>,
}

/// The receiving half, owned by the actor task.
pub struct Inbox<S> {
    pub msg_rx: mpsc::UnboundedReceiver<Envelope<S>>,
    pub stop_rx: watch::Receiver<bool>,
}

impl<S: Send + Sync + 'static> Mailbox<S> {
    pub fn open() -> (Self, Inbox<S>) {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (stop_tx, stop_rx) = watch::channel(false);
        (Mailbox { msg_tx, stop_tx }, Inbox { msg_rx, stop_rx })
    }

    /// Posts a message, unless the actor was asked to stop or is gone.
    pub fn post(&self, msg: Envelope<S>) -> Result<(), ActorDeadError> {
        if self.is_stopped() {
            return Err(ActorDeadError);
        }
        self.msg_tx.send(msg).map_err(|_| ActorDeadError)
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        *self.stop_tx.borrow() || self.msg_tx.is_closed()
    }

    #[inline]
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }
}
