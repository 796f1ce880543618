//! In-memory post storage.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use crate::posts::model::{seed_posts, Post};

/// Errors returned by store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Post `{0}` already exists")]
    DuplicateId(String),
}

/// A shared, append-only list of posts in creation order.
///
/// Clones share the same list. The duplicate check and the append run under
/// one write guard, so concurrent creates cannot both claim an id.
#[derive(Debug, Clone, Default)]
pub struct PostStore {
    posts: Arc<RwLock<Vec<Post>>>,
}

impl PostStore {
    /// Create a store holding `posts`.
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(RwLock::new(posts)),
        }
    }

    /// Create a store holding the seed posts.
    pub fn seeded() -> Self {
        Self::new(seed_posts())
    }

    /// All posts, oldest first.
    pub async fn list(&self) -> Vec<Post> {
        self.posts.read().await.clone()
    }

    /// The post with exactly this id.
    pub async fn get(&self, id: &str) -> Option<Post> {
        self.posts.read().await.iter().find(|p| p.id == id).cloned()
    }

    /// Append a post unless its id is taken.
    pub async fn insert(&self, post: Post) -> Result<Post, StoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|p| p.id == post.id) {
            return Err(StoreError::DuplicateId(post.id));
        }
        posts.push(post.clone());
        Ok(post)
    }

    pub async fn len(&self) -> usize {
        self.posts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.posts.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_store() {
        let store = PostStore::seeded();
        assert_eq!(store.len().await, 3);
        assert_eq!(store.get("my_first_post").await.unwrap().content, "Hello!");
        assert!(store.get("my first post").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_preserves_order() {
        let store = PostStore::default();
        assert!(store.is_empty().await);

        store.insert(Post::new("First", "1")).await.unwrap();
        store.insert(Post::new("Second", "2")).await.unwrap();

        let ids: Vec<_> = store.list().await.into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let store = PostStore::seeded();
        let err = store
            .insert(Post::new("My  First Post", "again"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateId("my_first_post".to_string()));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = PostStore::default();
        let other = store.clone();
        store.insert(Post::new("Shared", "x")).await.unwrap();
        assert!(other.get("shared").await.is_some());
    }

    #[tokio::test]
    async fn test_concurrent_inserts_claim_id_once() {
        let store = PostStore::default();
        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.insert(Post::new("Same Title", i.to_string())).await
            }));
        }

        let mut created = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
