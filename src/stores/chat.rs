use parking_lot::RwLock;
use uuid::Uuid;

use crate::models::message::ChatMessage;
use crate::utils::utc_now;

#[derive(Debug, Default)]
pub struct ChatStore {
    inner: RwLock<Vec<ChatMessage>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post(&self, author: Uuid, unit: &str, body: String) -> ChatMessage {
        let message = ChatMessage {
            id: Uuid::new_v4(),
            author,
            unit: unit.to_string(),
            body,
            created_at: utc_now(),
        };
        self.inner.write().push(message.clone());
        message
    }

    /// Messages for one unit, oldest first, optionally capped to the most
    /// recent `limit`.
    pub fn for_unit(&self, unit: &str, limit: Option<usize>) -> Vec<ChatMessage> {
        let messages: Vec<ChatMessage> = self
            .inner
            .read()
            .iter()
            .filter(|m| m.unit == unit)
            .cloned()
            .collect();

        match limit {
            Some(limit) if messages.len() > limit => messages[messages.len() - limit..].to_vec(),
            _ => messages,
        }
    }
}
