use std::fmt::{self, Debug};

use mr_doctor_actor::{Actor, Message};
use mr_doctor_model::ModelRequest;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;
use tokio::time;
use tracing::Instrument;

use super::{AdvisorState, PendingReply};
use crate::conversation::Turn;
use crate::error::{ReplyFailure, SubmitError};
use crate::fallback;
use crate::notice::Notice;
use crate::triage::{self, Alert};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AdvisorStage {
    #[default]
    Idle,
    Composing,
}

/// The one request in flight, with everything needed to finish its turn.
pub struct PendingRequest {
    id: u64,
    input: String,
    alerts: Vec<Alert>,
    task: AbortHandle,
    reply_tx: oneshot::Sender<Turn>,
}

impl AdvisorState {
    #[inline]
    pub(super) fn is_composing(&self) -> bool {
        self.stage == AdvisorStage::Composing
    }

    fn submit(
        &mut self,
        input: String,
        handle: &Actor<Self>,
    ) -> Result<PendingReply, SubmitError> {
        if input.trim().is_empty() {
            trace!("ignored an empty message");
            return Err(SubmitError::EmptyInput);
        }
        if self.stage != AdvisorStage::Idle {
            debug!("rejected a message while composing");
            return Err(SubmitError::Busy);
        }

        let alerts = triage::classify(&input);
        self.push_turn(Turn::user(input.clone()));
        self.set_stage(AdvisorStage::Composing);

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        debug!(request_id, alerts = alerts.len(), "accepted a message");

        let task = self.spawn_request(request_id, input.clone(), handle);
        let (reply_tx, reply_rx) = oneshot::channel();
        self.pending = Some(PendingRequest {
            id: request_id,
            input,
            alerts,
            task,
            reply_tx,
        });

        Ok(PendingReply {
            request_id,
            reply_rx,
            handle: handle.clone(),
        })
    }

    /// Runs the request on its own task and reports back with
    /// [`RequestFinished`]. A second task watches the first one, so the
    /// advisor hears back even if the provider panics.
    fn spawn_request(
        &self,
        request_id: u64,
        input: String,
        handle: &Actor<Self>,
    ) -> AbortHandle {
        let model_client = self.model_client.clone();
        let request_timeout = self.request_timeout;
        let handle = handle.clone();

        let request = async move {
            let request = async move {
                model_client
                    .send_request(ModelRequest::new(input))
                    .await
                    .map_err(|err| ReplyFailure::from_provider_error(&*err))
            };
            match request_timeout {
                Some(limit) => time::timeout(limit, request)
                    .await
                    .unwrap_or(Err(ReplyFailure::TimedOut(limit))),
                None => request.await,
            }
        };
        let task = tokio::spawn(
            request.instrument(debug_span!("advice request", request_id)),
        );
        let abort_handle = task.abort_handle();

        tokio::spawn(async move {
            let result = match task.await {
                Ok(result) => result,
                Err(err) if err.is_panic() => {
                    error!(request_id, "advice request panicked");
                    Err(ReplyFailure::Unavailable(
                        "the request failed unexpectedly".to_owned(),
                    ))
                }
                Err(_) => Err(ReplyFailure::Cancelled),
            };
            handle.send(RequestFinished { request_id, result }).ok();
        });
        abort_handle
    }

    fn finish_request(
        &mut self,
        request_id: u64,
        result: Result<String, ReplyFailure>,
    ) {
        let Some(pending) = self.pending.take_if(|p| p.id == request_id)
        else {
            // Cancelled requests may still report back.
            trace!(request_id, "discarded a stale reply");
            return;
        };

        let content = match result {
            Ok(reply) => reply,
            Err(failure) => {
                warn!(request_id, "using fallback reply: {failure}");
                let notice = Notice::for_failure(failure);
                if let Some(on_notice) = &self.on_notice {
                    on_notice(&notice);
                }
                fallback::reply_for(&pending.input).to_owned()
            }
        };

        let turn = Turn::ai(content, pending.alerts);
        self.push_turn(turn.clone());
        self.set_stage(AdvisorStage::Idle);
        debug!(request_id, "finished a reply");

        // The caller may have dropped its handle.
        pending.reply_tx.send(turn).ok();
    }

    fn cancel_request(&mut self, request_id: u64) {
        let Some(pending) = &self.pending else {
            return;
        };
        if pending.id != request_id {
            return;
        }
        pending.task.abort();
        self.finish_request(request_id, Err(ReplyFailure::Cancelled));
    }

    fn push_turn(&mut self, turn: Turn) {
        if let Some(on_turn) = &self.on_turn {
            on_turn(&turn);
        }
        self.conversation.push(turn);
    }

    fn set_stage(&mut self, stage: AdvisorStage) {
        if self.stage == stage {
            return;
        }
        self.stage = stage;
        if let Some(on_composing) = &self.on_composing {
            on_composing(stage == AdvisorStage::Composing);
        }
    }
}

#[derive(Debug)]
pub struct Submit {
    pub input: String,
    pub reply_tx: oneshot::Sender<Result<PendingReply, SubmitError>>,
}

impl Message<AdvisorState> for Submit {
    fn handle(self, state: &mut AdvisorState, handle: &Actor<AdvisorState>) {
        let result = state.submit(self.input, handle);
        // The request is already running even if the caller went away.
        self.reply_tx.send(result).ok();
    }
}

struct RequestFinished {
    request_id: u64,
    result: Result<String, ReplyFailure>,
}

impl Debug for RequestFinished {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestFinished")
            .field("request_id", &self.request_id)
            .field("ok", &self.result.is_ok())
            .finish()
    }
}

impl Message<AdvisorState> for RequestFinished {
    #[inline]
    fn handle(self, state: &mut AdvisorState, _handle: &Actor<AdvisorState>) {
        state.finish_request(self.request_id, self.result);
    }
}

#[derive(Debug)]
pub struct CancelRequest(pub u64);

impl Message<AdvisorState> for CancelRequest {
    #[inline]
    fn handle(self, state: &mut AdvisorState, _handle: &Actor<AdvisorState>) {
        state.cancel_request(self.0);
    }
}
