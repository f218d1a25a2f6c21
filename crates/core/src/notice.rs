use serde::Serialize;

use crate::error::ReplyFailure;

/// A non-blocking notification shown next to the conversation.
///
/// Raised when the advice service failed and a canned reply was used.
/// The canned reply is still added to the conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Text meant for the user.
    pub message: String,
    /// What went wrong, for logs and diagnostics.
    #[serde(serialize_with = "serialize_display")]
    pub failure: ReplyFailure,
}

impl Notice {
    pub(crate) fn for_failure(failure: ReplyFailure) -> Self {
        let message = match failure {
            ReplyFailure::Unavailable(_) | ReplyFailure::Malformed(_) => {
                "Couldn't connect to the advice service. Showing offline \
                 guidance instead."
            }
            ReplyFailure::TimedOut(_) => {
                "The advice service is taking too long. Showing offline \
                 guidance instead."
            }
            ReplyFailure::Cancelled => {
                "Request cancelled. Showing offline guidance instead."
            }
        };
        Self {
            message: message.to_owned(),
            failure,
        }
    }
}

fn serialize_display<S: serde::Serializer>(
    failure: &ReplyFailure,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(failure)
}
