use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The service could not be reached, or it answered with a
    /// non-success status.
    Unavailable,
    /// The service answered, but the payload has an unexpected shape.
    Malformed,
    /// The upstream quota is exhausted.
    RateLimitExceeded,
}

impl ErrorKind {
    /// Returns `true` if the error is about the reply payload rather
    /// than reaching the service.
    #[inline]
    pub fn is_malformed(self) -> bool {
        self == ErrorKind::Malformed
    }
}
