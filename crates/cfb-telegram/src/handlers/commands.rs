use std::sync::Arc;

use teloxide::prelude::*;

use cfb_core::domain::ChatId;

use crate::router::AppState;

pub const START_COMMAND: &str = "start";

/// Lowercased command name of `/name@bot args`, or `None` for plain text.
fn command_name(text: &str) -> Option<String> {
    let token = text.split_whitespace().next()?.strip_prefix('/')?;
    let name = token.split('@').next().unwrap_or(token);
    Some(name.to_lowercase())
}

pub async fn handle_command(_bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(cmd) = msg.text().and_then(command_name) else {
        return Ok(());
    };
    if cmd != START_COMMAND {
        tracing::debug!("ignoring command /{cmd}");
        return Ok(());
    }

    let chat_id = ChatId(msg.chat.id.0);
    if let Err(e) = state.browser.start(chat_id).await {
        tracing::warn!("/start failed for chat {}: {e}", chat_id.0);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_name_strips_bot_suffix_and_args() {
        assert_eq!(command_name("/start@cute_bot").as_deref(), Some("start"));
        assert_eq!(command_name("  /Start  extra words ").as_deref(), Some("start"));
        assert_eq!(command_name("/help").as_deref(), Some("help"));
        assert_eq!(command_name("hello /start"), None);
        assert_eq!(command_name(""), None);
    }
}
