use mr_doctor_model::ErrorKind;
use serde::{Deserialize, Serialize};

/// How the fake service answers one request.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum PresetReply {
    /// Reply with this text.
    Text(String),
    /// Fail with this kind of error.
    Failure(ErrorKind),
}

impl PresetReply {
    /// Creates a successful preset.
    #[inline]
    pub fn text<S: Into<String>>(text: S) -> Self {
        PresetReply::Text(text.into())
    }

    /// Creates a failing preset.
    #[inline]
    pub fn failure(kind: ErrorKind) -> Self {
        PresetReply::Failure(kind)
    }
}
