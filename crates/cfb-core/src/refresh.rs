//! Background cache refresh.
//!
//! One cycle walks every configured topic sequentially, fetches a page and
//! swaps the topic's cache entry. Then the loop sleeps for the configured
//! interval. A failing topic only logs; it never stops the cycle.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    cache::PostCache,
    feed::{fetch_or_empty, FeedSource},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CycleSummary {
    pub updated: usize,
    pub empty: usize,
}

pub struct Refresher {
    cache: Arc<PostCache>,
    source: Arc<dyn FeedSource>,
    topics: Vec<String>,
    interval: Duration,
}

impl Refresher {
    pub fn new(
        cache: Arc<PostCache>,
        source: Arc<dyn FeedSource>,
        topics: Vec<String>,
        interval: Duration,
    ) -> Self {
        Self {
            cache,
            source,
            topics,
            interval,
        }
    }

    /// Fetch one topic; returns the number of posts now cached from this fetch.
    ///
    /// An empty page (no image posts, or a failed fetch) leaves the previous
    /// entry untouched.
    pub async fn refresh_topic(&self, topic: &str) -> usize {
        let posts = fetch_or_empty(self.source.as_ref(), topic).await;
        if posts.is_empty() {
            tracing::info!("no posts found for r/{topic}");
            return 0;
        }
        let n = posts.len();
        self.cache.replace(topic, posts).await;
        tracing::info!("fetched {n} posts from r/{topic}");
        n
    }

    pub async fn run_cycle(&self) -> CycleSummary {
        let mut summary = CycleSummary::default();
        for topic in &self.topics {
            if self.refresh_topic(topic).await > 0 {
                summary.updated += 1;
            } else {
                summary.empty += 1;
            }
        }
        tracing::info!(
            updated = summary.updated,
            empty = summary.empty,
            "feed cache updated"
        );
        summary
    }

    /// Run cycles forever (until `cancel` fires), sleeping `interval` between them.
    pub fn spawn(self: Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = self.run_cycle() => {}
                }
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = sleep(self.interval) => {}
                }
            }
            tracing::info!("feed refresh loop stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::{domain::Post, Error, Result};

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("post {id}"),
            image_url: format!("http://x/{id}.jpg"),
        }
    }

    /// Topics absent from `pages` fail with a transport error.
    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<String, Vec<Post>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn with(pages: &[(&str, Vec<Post>)]) -> Self {
            Self {
                pages: pages
                    .iter()
                    .map(|(t, p)| (t.to_string(), p.clone()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl FeedSource for FakeSource {
        async fn fetch(&self, topic: &str) -> Result<Vec<Post>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages
                .get(topic)
                .cloned()
                .ok_or_else(|| Error::External(format!("timeout fetching {topic}")))
        }
    }

    fn topics(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn cycle_replaces_each_topic_exactly() {
        let cache = Arc::new(PostCache::new());
        cache.replace("cats", vec![post("old")]).await;
        let source = Arc::new(FakeSource::with(&[
            ("cats", vec![post("1"), post("2")]),
            ("dogs", vec![post("3")]),
        ]));
        let refresher = Refresher::new(
            cache.clone(),
            source,
            topics(&["cats", "dogs"]),
            Duration::from_secs(900),
        );

        let summary = refresher.run_cycle().await;
        assert_eq!(summary, CycleSummary { updated: 2, empty: 0 });
        assert_eq!(&*cache.get("cats").await, &[post("1"), post("2")]);
        assert_eq!(&*cache.get("dogs").await, &[post("3")]);
    }

    #[tokio::test]
    async fn failed_topic_keeps_prior_entry_and_others_still_refresh() {
        let cache = Arc::new(PostCache::new());
        cache.replace("cats", vec![post("old")]).await;
        let source = Arc::new(FakeSource::with(&[("dogs", vec![post("3")])]));
        let refresher = Refresher::new(
            cache.clone(),
            source.clone(),
            topics(&["cats", "dogs", "foxes"]),
            Duration::from_secs(900),
        );

        let summary = refresher.run_cycle().await;
        assert_eq!(summary, CycleSummary { updated: 1, empty: 2 });
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(&*cache.get("cats").await, &[post("old")]);
        assert_eq!(&*cache.get("dogs").await, &[post("3")]);
        assert!(cache.get("foxes").await.is_empty());
    }

    #[tokio::test]
    async fn empty_page_keeps_prior_entry() {
        let cache = Arc::new(PostCache::new());
        cache.replace("cats", vec![post("old")]).await;
        let source = Arc::new(FakeSource::with(&[("cats", vec![])]));
        let refresher = Refresher::new(
            cache.clone(),
            source,
            topics(&["cats"]),
            Duration::from_secs(900),
        );

        assert_eq!(refresher.refresh_topic("cats").await, 0);
        assert_eq!(&*cache.get("cats").await, &[post("old")]);
    }

    #[tokio::test]
    async fn spawned_loop_populates_cache_and_stops_on_cancel() {
        let cache = Arc::new(PostCache::new());
        let source = Arc::new(FakeSource::with(&[("cats", vec![post("1")])]));
        let refresher = Arc::new(Refresher::new(
            cache.clone(),
            source.clone(),
            topics(&["cats"]),
            Duration::from_secs(3600),
        ));

        let cancel = CancellationToken::new();
        let handle = refresher.spawn(cancel.clone());

        for _ in 0..200 {
            if !cache.get("cats").await.is_empty() {
                break;
            }
            sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(&*cache.get("cats").await, &[post("1")]);

        cancel.cancel();
        handle.await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
