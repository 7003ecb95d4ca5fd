use async_trait::async_trait;

use crate::{
    domain::{ChatId, MessageRef},
    messaging::types::PhotoCard,
    Result,
};

/// Outbound side of the chat platform.
///
/// Every call is a plain request/response; the core decides which failures
/// are surfaced and which are logged and dropped.
#[async_trait]
pub trait MessagingPort: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef>;

    async fn send_photo(&self, chat_id: ChatId, card: &PhotoCard) -> Result<MessageRef>;

    /// Replace the photo, caption and keyboard of an existing message.
    async fn edit_photo(&self, msg: MessageRef, card: &PhotoCard) -> Result<()>;

    async fn edit_caption(&self, msg: MessageRef, caption: &str) -> Result<()>;

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()>;
}
