use crate::domain::{NavAction, Post};

/// Inline keyboard (buttons), laid out as rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineKeyboard {
    pub rows: Vec<Vec<InlineButton>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub callback_data: String,
}

impl InlineKeyboard {
    /// Prev / Random / Next on a single row.
    pub fn navigation() -> Self {
        let row: Vec<InlineButton> = NavAction::ALL
            .into_iter()
            .map(|action| InlineButton {
                label: action.label().to_string(),
                callback_data: action.code().to_string(),
            })
            .collect();
        Self { rows: vec![row] }
    }
}

/// A photo message: image, caption and buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoCard {
    pub image_url: String,
    pub caption: String,
    pub keyboard: InlineKeyboard,
}

impl PhotoCard {
    pub fn for_post(topic: &str, post: &Post) -> Self {
        Self {
            image_url: post.image_url.clone(),
            caption: caption_for(topic, post),
            keyboard: InlineKeyboard::navigation(),
        }
    }
}

pub fn caption_for(topic: &str, post: &Post) -> String {
    format!("{}\n/{topic}", post.title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_keyboard_is_one_row_of_three() {
        let kb = InlineKeyboard::navigation();
        assert_eq!(kb.rows.len(), 1);
        let codes: Vec<&str> = kb.rows[0]
            .iter()
            .map(|b| b.callback_data.as_str())
            .collect();
        assert_eq!(codes, vec!["prev", "random", "next"]);
    }

    #[test]
    fn caption_is_title_then_topic() {
        let post = Post {
            id: "1".to_string(),
            title: "A cat".to_string(),
            image_url: "http://x/a.jpg".to_string(),
        };
        let card = PhotoCard::for_post("cats", &post);
        assert_eq!(card.caption, "A cat\n/cats");
        assert_eq!(card.image_url, "http://x/a.jpg");
    }
}
