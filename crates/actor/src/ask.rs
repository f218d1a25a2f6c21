use std::fmt::{self, Debug};
use std::marker::PhantomData;

use tokio::sync::oneshot;

use crate::{Actor, Message};

/// A message that runs a closure against the state and sends the result
/// back to the asker.
pub struct Ask<S, F, R> {
    f: F,
    reply_tx: oneshot::Sender<R>,
    _state: PhantomData<fn(&mut S)>,
}

impl<S, F, R> Ask<S, F, R> {
    #[inline]
    pub fn new(f: F, reply_tx: oneshot::Sender<R>) -> Self {
        Self {
            f,
            reply_tx,
            _state: PhantomData,
        }
    }
}

impl<S, F, R> Debug for Ask<S, F, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ask").finish_non_exhaustive()
    }
}

impl<S, F, R> Message<S> for Ask<S, F, R>
where
    S: 'static,
    F: FnOnce(&mut S, &Actor<S>) -> R + Send + 'static,
    R: Send + 'static,
{
    fn handle(self, state: &mut S, handle: &Actor<S>) {
        let value = (self.f)(state, handle);
        // The asker may have given up waiting.
        self.reply_tx.send(value).ok();
    }
}
