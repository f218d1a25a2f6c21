//! Conversation-related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::triage::Alert;

/// Who wrote a turn.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person asking.
    User,
    /// The advisor.
    Ai,
}

/// One message in the conversation.
///
/// Turns are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    id: String,
    content: String,
    sender: Sender,
    timestamp: DateTime<Utc>,
    alerts: Vec<Alert>,
}

impl Turn {
    pub(crate) fn user(content: String) -> Self {
        Self::new(content, Sender::User, vec![])
    }

    pub(crate) fn ai(content: String, alerts: Vec<Alert>) -> Self {
        Self::new(content, Sender::Ai, alerts)
    }

    fn new(content: String, sender: Sender, alerts: Vec<Alert>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            sender,
            timestamp: Utc::now(),
            alerts,
        }
    }

    /// Returns the unique id of this turn.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the text of this turn.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns who wrote this turn.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns when this turn was created.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the triage alerts attached to this turn.
    ///
    /// Only advisor turns carry alerts. They belong to the user message
    /// right before it.
    #[inline]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}

/// An append-only log of turns, oldest first.
#[derive(Clone, Default, Debug, Serialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    #[inline]
    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Returns all turns in chronological order.
    #[inline]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Returns the number of turns.
    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Returns `true` if nothing has been said yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Returns the latest turn.
    #[inline]
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::{Severity, classify};

    #[test]
    fn test_turns_are_ordered_and_unique() {
        let mut conversation = Conversation::default();
        conversation.push(Turn::user("I have a fever".to_owned()));
        conversation.push(Turn::ai(
            "Rest well.".to_owned(),
            classify("I have a fever"),
        ));

        let turns = conversation.turns();
        assert_eq!(conversation.len(), 2);
        assert_eq!(turns[0].sender(), Sender::User);
        assert!(turns[0].alerts().is_empty());
        assert_eq!(turns[1].sender(), Sender::Ai);
        assert_eq!(turns[1].alerts()[0].severity, Severity::Warning);
        assert_ne!(turns[0].id(), turns[1].id());
        assert!(turns[0].timestamp() <= turns[1].timestamp());
    }

    #[test]
    fn test_serialize_turn() {
        let turn = Turn::ai("ok".to_owned(), classify("chest pain"));
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["sender"], "ai");
        assert_eq!(value["alerts"][0]["severity"], "emergency");
    }
}
