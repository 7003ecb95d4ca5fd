use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ChatId, Post};

/// What a conversation was last shown.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub last_topic: Option<String>,
    pub last_post: Option<Post>,
}

/// Per-chat sessions, created on first write and never expired.
// TODO: evict sessions idle for longer than a few refresh cycles if chat count grows.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<ChatId, Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, chat_id: ChatId) -> Option<Session> {
        self.sessions.lock().await.get(&chat_id).cloned()
    }

    pub async fn last_topic(&self, chat_id: ChatId) -> Option<String> {
        self.sessions
            .lock()
            .await
            .get(&chat_id)
            .and_then(|s| s.last_topic.clone())
    }

    /// Record the post just rendered for this chat.
    pub async fn record(&self, chat_id: ChatId, topic: &str, post: &Post) {
        let mut map = self.sessions.lock().await;
        let session = map.entry(chat_id).or_default();
        session.last_topic = Some(topic.to_string());
        session.last_post = Some(post.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn session_is_created_on_first_record() {
        let store = SessionStore::new();
        let chat = ChatId(7);
        assert_eq!(store.get(chat).await, None);
        assert_eq!(store.last_topic(chat).await, None);

        let post = Post {
            id: "1".to_string(),
            title: "A cat".to_string(),
            image_url: "http://x/a.jpg".to_string(),
        };
        store.record(chat, "cats", &post).await;

        let session = store.get(chat).await.unwrap();
        assert_eq!(session.last_topic.as_deref(), Some("cats"));
        assert_eq!(session.last_post, Some(post));
        assert_eq!(store.get(ChatId(8)).await, None);
    }
}
