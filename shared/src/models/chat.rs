//! Conversation and message models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserRef;

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: i64,
    #[serde(default)]
    pub conversation_id: Option<i64>,
    pub sender_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Conversation between two or more users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: i64,
    #[serde(default)]
    pub participants: Vec<UserRef>,
    #[serde(default)]
    pub last_message: Option<Message>,
}

impl Conversation {
    /// Participants other than `user_id`
    pub fn others(&self, user_id: i64) -> impl Iterator<Item = &UserRef> {
        self.participants.iter().filter(move |p| p.id != user_id)
    }
}

/// Body of `POST /chats/conversations`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationCreate {
    pub participant_ids: Vec<i64>,
}

/// Body of `POST /chats/conversations/{id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreate {
    pub content: String,
}
