use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE_ID: &str = "welcome";

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI farming assistant. How can I help you today? You can ask me about crop diseases, farming practices, or get advice on your specific farming challenges.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn welcome() -> Self {
        Self {
            id: WELCOME_MESSAGE_ID.to_string(),
            role: Role::Assistant,
            content: WELCOME_MESSAGE.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn display_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Hands out millisecond ids that never repeat within one conversation.
#[derive(Debug, Default)]
pub struct MessageIds {
    last: i64,
}

impl MessageIds {
    pub fn next(&mut self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        self.last = candidate.max(self.last + 1);
        self.last.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_even_within_the_same_millisecond() {
        let now = Utc::now();
        let mut ids = MessageIds::default();
        let first: i64 = ids.next(now).parse().unwrap();
        let second: i64 = ids.next(now).parse().unwrap();
        assert_eq!(first, now.timestamp_millis());
        assert_eq!(second, first + 1);
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Role::Assistant).unwrap(), "assistant");
    }
}
