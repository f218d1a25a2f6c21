mod builder;
mod state;
#[cfg(test)]
mod tests;

use std::fmt::{self, Debug};
use std::time::Duration;

use mr_doctor_actor::{Actor, ActorDeadError};
use tokio::sync::oneshot;

use crate::conversation::{Conversation, Turn};
use crate::error::SubmitError;
use crate::model_client::ModelClient;
use crate::notice::Notice;
pub use builder::AdvisorBuilder;
use state::{AdvisorStage, CancelRequest, PendingRequest, Submit};

type TurnCallback = Box<dyn Fn(&Turn) + Send + Sync>;
type NoticeCallback = Box<dyn Fn(&Notice) + Send + Sync>;
type ComposingCallback = Box<dyn Fn(bool) + Send + Sync>;

struct AdvisorState {
    model_client: ModelClient,
    request_timeout: Option<Duration>,
    conversation: Conversation,
    stage: AdvisorStage,
    pending: Option<PendingRequest>,
    next_request_id: u64,

    on_turn: Option<TurnCallback>,
    on_notice: Option<NoticeCallback>,
    on_composing: Option<ComposingCallback>,
}

/// The advisory orchestrator of one chat session.
///
/// The advisor owns the conversation and the "composing" flag. Every
/// accepted message goes through the same steps: the user turn is logged
/// right away, the text is triaged locally, one request goes out to the
/// model provider, and exactly one advisor turn is logged when it
/// settles. If the provider fails, times out or the request is
/// cancelled, the advisor answers with a canned reply and raises a
/// [`Notice`] instead of surfacing the error.
///
/// Only one message is in flight at a time. Submitting while a reply is
/// being composed is rejected with [`SubmitError::Busy`].
#[derive(Clone)]
pub struct Advisor {
    handle: Actor<AdvisorState>,
}

impl Advisor {
    fn spawn_from_builder(builder: AdvisorBuilder) -> Self {
        let AdvisorBuilder {
            model_client,
            request_timeout,
            on_turn,
            on_notice,
            on_composing,
        } = builder;

        let state = AdvisorState {
            model_client,
            request_timeout,
            conversation: Default::default(),
            stage: Default::default(),
            pending: None,
            next_request_id: 1,
            on_turn,
            on_notice,
            on_composing,
        };
        Self {
            handle: Actor::spawn(state, Some("advisor")),
        }
    }

    /// Submits a user message and returns a handle to the pending reply.
    ///
    /// Empty or whitespace-only messages are rejected without touching
    /// the conversation or the provider.
    pub async fn submit<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<PendingReply, SubmitError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.handle
            .send(Submit {
                input: input.into(),
                reply_tx,
            })
            .map_err(|_| SubmitError::Stopped)?;
        reply_rx.await.unwrap_or(Err(SubmitError::Stopped))
    }

    /// Submits a user message and waits for the advisor turn.
    ///
    /// The returned turn carries the reply text and the triage alerts.
    pub async fn respond<S: Into<String>>(
        &self,
        input: S,
    ) -> Result<Turn, SubmitError> {
        let pending = self.submit(input).await?;
        pending.wait().await.map_err(|_| SubmitError::Stopped)
    }

    /// Returns a snapshot of the conversation.
    pub async fn conversation(&self) -> Result<Conversation, ActorDeadError> {
        self.handle
            .ask(|state, _| state.conversation.clone())
            .await
    }

    /// Returns `true` while a reply is being composed.
    pub async fn is_composing(&self) -> Result<bool, ActorDeadError> {
        self.handle.ask(|state, _| state.is_composing()).await
    }

    /// Stops the advisor. Further calls fail with "stopped" errors.
    #[inline]
    pub fn stop(&self) {
        self.handle.stop();
    }
}

/// A reply that is still being composed.
///
/// Dropping the handle does not cancel anything, the advisor turn is
/// still logged when the request settles.
pub struct PendingReply {
    request_id: u64,
    reply_rx: oneshot::Receiver<Turn>,
    handle: Actor<AdvisorState>,
}

impl PendingReply {
    /// Returns the id of the request, unique within the advisor.
    #[inline]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    /// Abandons the request.
    ///
    /// The provider call is aborted and the advisor answers with its
    /// canned reply, so the conversation still gets its advisor turn.
    /// Has no effect once the reply has arrived.
    #[inline]
    pub fn cancel(&self) {
        self.handle.send(CancelRequest(self.request_id)).ok();
    }

    /// Waits for the advisor turn.
    pub async fn wait(self) -> Result<Turn, ActorDeadError> {
        self.reply_rx.await.map_err(|_| ActorDeadError)
    }
}

impl Debug for PendingReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReply")
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
