//! Feed client contract and result normalization.
//!
//! Adapters (PullPush today) implement [`FeedSource`] and return raw errors;
//! [`fetch_or_empty`] is the only entry point the refresh loop uses, and it
//! never propagates a failure.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{domain::Post, Result};

pub const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];

const UNTITLED: &str = "(no title)";

/// Search response body: `{ "data": [ { "id", "title", "url", ... } ] }`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<RawSubmission>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawSubmission {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Port for fetching one bounded page of posts for a topic.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, topic: &str) -> Result<Vec<Post>>;
}

pub fn is_image_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl RawSubmission {
    /// Normalize into a [`Post`]; `None` when the url is missing or not an image.
    pub fn into_post(self) -> Option<Post> {
        let url = self.url.filter(|u| !u.trim().is_empty())?;
        if !is_image_url(&url) {
            return None;
        }
        Some(Post {
            id: self.id.unwrap_or_default(),
            title: self.title.unwrap_or_else(|| UNTITLED.to_string()),
            image_url: url,
        })
    }
}

impl SearchResponse {
    /// Keep image posts in response order, at most `max_posts` of them.
    pub fn into_posts(self, max_posts: usize) -> Vec<Post> {
        self.data
            .into_iter()
            .filter_map(RawSubmission::into_post)
            .take(max_posts)
            .collect()
    }
}

/// Fetch a topic, logging and discarding any failure as an empty page.
pub async fn fetch_or_empty(source: &dyn FeedSource, topic: &str) -> Vec<Post> {
    match source.fetch(topic).await {
        Ok(posts) => posts,
        Err(e) => {
            tracing::warn!("failed to fetch r/{topic}: {e}");
            Vec::new()
        }
    }
}
