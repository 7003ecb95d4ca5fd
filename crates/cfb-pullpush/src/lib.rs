//! PullPush adapter (subreddit submission search).
//!
//! One GET per topic: newest link posts, one page of at most `max_posts`,
//! adult content excluded. Only image posts survive normalization.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use cfb_core::{
    config::Config,
    domain::Post,
    errors::Error,
    feed::{FeedSource, SearchResponse},
    Result,
};

#[derive(Clone, Debug)]
pub struct PullPushClient {
    endpoint: String,
    max_posts: usize,
    http: reqwest::Client,
}

impl PullPushClient {
    pub fn new(endpoint: impl Into<String>, max_posts: usize, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            max_posts: max_posts.max(1),
            http,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self> {
        Self::new(
            cfg.feed_endpoint.clone(),
            cfg.max_posts_per_topic,
            cfg.request_timeout,
        )
    }

    pub fn search_url(&self, topic: &str) -> Result<Url> {
        let size = self.max_posts.to_string();
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("subreddit", topic),
                ("size", size.as_str()),
                ("sort", "new"),
                ("type", "link"),
                ("over_18", "false"),
            ],
        )
        .map_err(|e| Error::Config(format!("invalid feed endpoint {}: {e}", self.endpoint)))
    }
}

#[async_trait]
impl FeedSource for PullPushClient {
    async fn fetch(&self, topic: &str) -> Result<Vec<Post>> {
        let url = self.search_url(topic)?;
        let resp = self.http.get(url).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::External(format!(
                "pullpush search failed: {status} {}",
                body.chars().take(200).collect::<String>()
            )));
        }

        let body: SearchResponse = resp.json().await?;
        let posts = body.into_posts(self.max_posts);
        tracing::debug!(topic, count = posts.len(), "pullpush page parsed");
        Ok(posts)
    }
}
