//! Wire types of the relay contract.
//!
//! The client posts a [`ChatRequest`]. A relay answers with a
//! [`ChatReply`] on success, or with a [`ChatError`] and a non-success
//! status.

use serde::{Deserialize, Serialize};

/// Request body.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The raw user message.
    pub message: String,
}

/// Success body.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The generated reply.
    pub response: String,
}

/// Failure body.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatError {
    /// What went wrong.
    pub error: String,
}
