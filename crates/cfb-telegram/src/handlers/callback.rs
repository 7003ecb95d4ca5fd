use std::sync::Arc;

use teloxide::prelude::*;

use cfb_core::domain::{ChatId, MessageId, MessageRef, NavAction};

use crate::router::AppState;

pub async fn handle_callback(
    _bot: Bot,
    q: CallbackQuery,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    // Always answer first so the button spinner clears.
    if let Err(e) = state.messenger.answer_callback_query(&q.id).await {
        tracing::warn!("failed to answer callback query: {e}");
    }

    let Some(msg) = q.message.as_ref() else {
        return Ok(());
    };
    let Some(action) = q.data.as_deref().and_then(NavAction::parse) else {
        tracing::debug!("ignoring callback data {:?}", q.data);
        return Ok(());
    };

    let target = MessageRef {
        chat_id: ChatId(msg.chat.id.0),
        message_id: MessageId(msg.id.0),
    };
    if let Err(e) = state.browser.navigate(target, action).await {
        tracing::warn!("navigation {} failed: {e}", action.code());
    }

    Ok(())
}
