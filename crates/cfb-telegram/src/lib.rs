//! Telegram adapter (teloxide).
//!
//! This crate implements the `cfb-core` MessagingPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{
    prelude::*,
    types::{InlineKeyboardButton, InlineKeyboardMarkup, InputFile, InputMedia, InputMediaPhoto},
};

pub mod handlers;
pub mod router;

use cfb_core::{
    domain::{ChatId, MessageId, MessageRef},
    errors::Error,
    messaging::{
        port::MessagingPort,
        types::{InlineKeyboard, PhotoCard},
    },
    Result,
};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn tg_chat(chat_id: ChatId) -> teloxide::types::ChatId {
        teloxide::types::ChatId(chat_id.0)
    }

    fn tg_msg_id(message_id: MessageId) -> teloxide::types::MessageId {
        teloxide::types::MessageId(message_id.0)
    }

    fn map_err(e: teloxide::RequestError) -> Error {
        Error::External(format!("telegram error: {e}"))
    }

    fn photo(card: &PhotoCard) -> Result<InputFile> {
        let url = reqwest::Url::parse(&card.image_url)
            .map_err(|e| Error::External(format!("bad image url {}: {e}", card.image_url)))?;
        Ok(InputFile::url(url))
    }
}

pub fn to_markup(keyboard: &InlineKeyboard) -> InlineKeyboardMarkup {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.callback_data.clone()))
                .collect()
        })
        .collect();
    InlineKeyboardMarkup::new(rows)
}

#[async_trait]
impl MessagingPort for TelegramMessenger {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_message(Self::tg_chat(chat_id), text.to_string())
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn send_photo(&self, chat_id: ChatId, card: &PhotoCard) -> Result<MessageRef> {
        let msg = self
            .bot
            .send_photo(Self::tg_chat(chat_id), Self::photo(card)?)
            .caption(card.caption.clone())
            .reply_markup(to_markup(&card.keyboard))
            .await
            .map_err(Self::map_err)?;

        Ok(MessageRef {
            chat_id,
            message_id: MessageId(msg.id.0),
        })
    }

    async fn edit_photo(&self, msg: MessageRef, card: &PhotoCard) -> Result<()> {
        let media =
            InputMedia::Photo(InputMediaPhoto::new(Self::photo(card)?).caption(card.caption.clone()));
        self.bot
            .edit_message_media(
                Self::tg_chat(msg.chat_id),
                Self::tg_msg_id(msg.message_id),
                media,
            )
            .reply_markup(to_markup(&card.keyboard))
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn edit_caption(&self, msg: MessageRef, caption: &str) -> Result<()> {
        self.bot
            .edit_message_caption(Self::tg_chat(msg.chat_id), Self::tg_msg_id(msg.message_id))
            .caption(caption.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_id.to_string())
            .await
            .map_err(Self::map_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::InlineKeyboardButtonKind;

    use super::*;

    #[test]
    fn navigation_keyboard_maps_to_callback_buttons() {
        let markup = to_markup(&InlineKeyboard::navigation());
        assert_eq!(markup.inline_keyboard.len(), 1);

        let data: Vec<String> = markup.inline_keyboard[0]
            .iter()
            .map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(d) => d.clone(),
                other => panic!("unexpected button kind {other:?}"),
            })
            .collect();
        assert_eq!(data, vec!["prev", "random", "next"]);
        assert_eq!(markup.inline_keyboard[0][1].text, "🔁 Random");
    }

    #[test]
    fn rejects_unparseable_image_url() {
        let card = PhotoCard {
            image_url: "not a url".to_string(),
            caption: String::new(),
            keyboard: InlineKeyboard::navigation(),
        };
        assert!(TelegramMessenger::photo(&card).is_err());
    }
}
