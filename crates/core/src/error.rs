use std::time::Duration;

use mr_doctor_model::{ErrorKind, ModelProviderError};

/// Why a message was not accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    /// The message was empty or whitespace only. Nothing happened.
    #[error("the message is empty")]
    EmptyInput,
    /// A reply is still being composed for the previous message.
    #[error("a reply is still being composed")]
    Busy,
    /// The advisor is no longer running.
    #[error("the advisor has stopped")]
    Stopped,
}

/// Why the advice service did not produce the reply.
///
/// None of these reach the user as an error: the advisor answers with a
/// canned reply instead and raises a [`Notice`](crate::Notice).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ReplyFailure {
    /// The service could not be reached or refused the request.
    #[error("advice service unavailable: {0}")]
    Unavailable(String),
    /// The service answered with something that is not a reply.
    #[error("advice service sent a malformed reply: {0}")]
    Malformed(String),
    /// No reply arrived in time.
    #[error("advice service did not reply within {0:?}")]
    TimedOut(Duration),
    /// The request was abandoned by the caller.
    #[error("the request was cancelled")]
    Cancelled,
}

impl ReplyFailure {
    pub(crate) fn from_provider_error(err: &dyn ModelProviderError) -> Self {
        match err.kind() {
            ErrorKind::Malformed => ReplyFailure::Malformed(err.to_string()),
            ErrorKind::Unavailable | ErrorKind::RateLimitExceeded => {
                ReplyFailure::Unavailable(err.to_string())
            }
        }
    }
}
