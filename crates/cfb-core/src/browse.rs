//! Start / navigation behaviour, independent of the chat platform.
//!
//! Selection is uniform random everywhere: a random topic for `/start` and
//! the Random button, a random post from the last topic for Prev and Next.
//! Prev and Next are the same draw; there is no cursor.

use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::{
    cache::PostCache,
    domain::{ChatId, MessageRef, NavAction, Post},
    messaging::{port::MessagingPort, types::PhotoCard},
    session::SessionStore,
    Result,
};

pub const GREETING: &str = "Finding a random cute post…";
pub const EMPTY_CACHE_MESSAGE: &str = "Oops, something went wrong lol, try again later.";

/// Where a selected post is rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    Send(ChatId),
    Edit(MessageRef),
}

impl Delivery {
    fn chat_id(self) -> ChatId {
        match self {
            Self::Send(chat_id) => chat_id,
            Self::Edit(msg) => msg.chat_id,
        }
    }
}

/// Outcome of one selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Shown {
    Post { topic: String, post: Post },
    Empty { topic: Option<String> },
}

pub struct Browser {
    topics: Vec<String>,
    cache: Arc<PostCache>,
    sessions: Arc<SessionStore>,
    messenger: Arc<dyn MessagingPort>,
}

fn pick<T: Clone>(items: &[T]) -> Option<T> {
    let mut rng = rand::thread_rng();
    items.choose(&mut rng).cloned()
}

pub fn empty_topic_notice(topic: Option<&str>) -> String {
    match topic {
        Some(t) => format!("No cached posts for r/{t}."),
        None => "No cached posts yet.".to_string(),
    }
}

impl Browser {
    pub fn new(
        topics: Vec<String>,
        cache: Arc<PostCache>,
        sessions: Arc<SessionStore>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            topics,
            cache,
            sessions,
            messenger,
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// `/start`: greet, then send a random post as a new message.
    pub async fn start(&self, chat_id: ChatId) -> Result<Shown> {
        if let Err(e) = self.messenger.send_text(chat_id, GREETING).await {
            tracing::warn!("failed to send greeting to chat {}: {e}", chat_id.0);
        }
        self.show_random(Delivery::Send(chat_id)).await
    }

    /// Random topic, then random post from it.
    pub async fn show_random(&self, delivery: Delivery) -> Result<Shown> {
        match pick(&self.topics[..]) {
            Some(topic) => self.show_from_topic(&topic, delivery).await,
            None => {
                self.messenger
                    .send_text(delivery.chat_id(), EMPTY_CACHE_MESSAGE)
                    .await?;
                Ok(Shown::Empty { topic: None })
            }
        }
    }

    /// Random post from `topic`, recorded in the chat's session and rendered.
    ///
    /// An empty cache entry sends the failure text and leaves the session alone.
    pub async fn show_from_topic(&self, topic: &str, delivery: Delivery) -> Result<Shown> {
        let posts = self.cache.get(topic).await;
        let Some(post) = pick(&posts[..]) else {
            self.messenger
                .send_text(delivery.chat_id(), EMPTY_CACHE_MESSAGE)
                .await?;
            return Ok(Shown::Empty {
                topic: Some(topic.to_string()),
            });
        };

        self.sessions.record(delivery.chat_id(), topic, &post).await;
        let card = PhotoCard::for_post(topic, &post);

        match delivery {
            Delivery::Send(chat_id) => {
                self.messenger.send_photo(chat_id, &card).await?;
            }
            Delivery::Edit(msg) => self.edit_or_log(msg, &card).await,
        }

        Ok(Shown::Post {
            topic: topic.to_string(),
            post,
        })
    }

    /// Button press on a previously sent post message.
    pub async fn navigate(&self, msg: MessageRef, action: NavAction) -> Result<Shown> {
        let topic = self.sessions.last_topic(msg.chat_id).await;
        let posts = match &topic {
            Some(t) => self.cache.get(t).await,
            None => Arc::from(Vec::new()),
        };

        let topic = match topic {
            Some(t) if !posts.is_empty() => t,
            other => {
                let notice = empty_topic_notice(other.as_deref());
                if let Err(e) = self.messenger.edit_caption(msg, &notice).await {
                    tracing::warn!("failed to edit caption: {e}");
                }
                return Ok(Shown::Empty { topic: other });
            }
        };

        match action {
            NavAction::Random => self.show_random(Delivery::Edit(msg)).await,
            NavAction::Prev | NavAction::Next => {
                let Some(post) = pick(&posts[..]) else {
                    return Ok(Shown::Empty { topic: Some(topic) });
                };
                self.sessions.record(msg.chat_id, &topic, &post).await;
                self.edit_or_log(msg, &PhotoCard::for_post(&topic, &post))
                    .await;
                Ok(Shown::Post { topic, post })
            }
        }
    }

    async fn edit_or_log(&self, msg: MessageRef, card: &PhotoCard) {
        if let Err(e) = self.messenger.edit_photo(msg, card).await {
            tracing::warn!("failed to edit media: {e}");
        }
    }
}
