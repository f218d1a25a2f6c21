//! Core logic of the health-advice assistant: symptom triage, canned
//! bilingual replies and the advisory orchestrator that ties them to a
//! model provider.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod advisor;
pub mod conversation;
mod error;
pub mod fallback;
pub mod language;
mod model_client;
mod notice;
pub mod triage;

pub use advisor::{Advisor, AdvisorBuilder, PendingReply};
pub use error::{ReplyFailure, SubmitError};
pub use notice::Notice;
