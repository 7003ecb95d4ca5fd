use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;

use crate::domain::Post;

/// Topic → posts table, fully replaced per topic on every refresh.
///
/// Entries are immutable snapshots: `replace` swaps the `Arc`, so a reader
/// holding a snapshot never observes a half-written sequence.
#[derive(Default)]
pub struct PostCache {
    entries: RwLock<HashMap<String, Arc<[Post]>>>,
}

impl PostCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty when the topic is unknown or has never been populated.
    pub async fn get(&self, topic: &str) -> Arc<[Post]> {
        self.entries
            .read()
            .await
            .get(topic)
            .cloned()
            .unwrap_or_else(|| Arc::from(Vec::new()))
    }

    pub async fn replace(&self, topic: &str, posts: Vec<Post>) {
        self.entries
            .write()
            .await
            .insert(topic.to_string(), Arc::from(posts));
    }
}
