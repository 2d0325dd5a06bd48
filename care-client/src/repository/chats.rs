//! `/chats`

use shared::models::{Conversation, ConversationCreate, Message, MessageCreate};

use crate::CareClient;
use crate::chat::attachment::with_attachment;
use crate::error::{ClientError, ClientResult};

pub struct ChatRepository<'a> {
    client: &'a CareClient,
}

impl<'a> ChatRepository<'a> {
    pub fn new(client: &'a CareClient) -> Self {
        Self { client }
    }

    pub async fn conversations(&self) -> ClientResult<Vec<Conversation>> {
        self.client.get("/chats/conversations").await
    }

    pub async fn start_conversation(&self, participant_ids: &[i64]) -> ClientResult<Conversation> {
        self.client.require_session()?;
        if participant_ids.is_empty() {
            return Err(ClientError::Validation("Selecione ao menos um participante".into()));
        }
        self.client
            .post(
                "/chats/conversations",
                &ConversationCreate {
                    participant_ids: participant_ids.to_vec(),
                },
            )
            .await
    }

    /// Messages of a conversation, oldest first
    pub async fn messages(&self, conversation_id: i64) -> ClientResult<Vec<Message>> {
        let mut messages: Vec<Message> = self
            .client
            .get(&format!("/chats/conversations/{conversation_id}/messages"))
            .await?;
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    pub async fn send_message(&self, conversation_id: i64, content: &str) -> ClientResult<Message> {
        self.client.require_session()?;
        let content = content.trim();
        if content.is_empty() {
            return Err(ClientError::Validation("Mensagem vazia".into()));
        }
        self.client
            .post(
                &format!("/chats/conversations/{conversation_id}/messages"),
                &MessageCreate {
                    content: content.to_string(),
                },
            )
            .await
    }

    /// Send `content` with a filename marker appended; no file bytes are uploaded
    pub async fn send_with_attachment(
        &self,
        conversation_id: i64,
        content: &str,
        file_name: &str,
    ) -> ClientResult<Message> {
        self.client.require_session()?;
        let content = with_attachment(content, file_name)?;
        self.send_message(conversation_id, &content).await
    }
}
