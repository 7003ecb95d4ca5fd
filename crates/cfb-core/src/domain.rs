/// Telegram chat id (numeric). Sessions are keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Telegram message id (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a Telegram message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// One normalized image post.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub image_url: String,
}

/// Navigation button codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Prev,
    Random,
    Next,
}

impl NavAction {
    pub const ALL: [NavAction; 3] = [NavAction::Prev, NavAction::Random, NavAction::Next];

    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "prev" => Some(Self::Prev),
            "random" => Some(Self::Random),
            "next" => Some(Self::Next),
            _ => None,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::Prev => "prev",
            Self::Random => "random",
            Self::Next => "next",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Prev => "⬅️ Prev",
            Self::Random => "🔁 Random",
            Self::Next => "➡️ Next",
        }
    }
}
