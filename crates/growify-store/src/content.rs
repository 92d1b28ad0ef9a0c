//! Scheduled-post and generated-content storage.

use std::collections::HashMap;

use growify_core::{GeneratedContent, PostStatus, ScheduledPost};
use tokio::sync::RwLock;

use crate::StoreError;

/// In-memory store for user-authored content.
#[derive(Debug, Default)]
pub struct MemoryContentStore {
    scheduled: RwLock<HashMap<String, ScheduledPost>>,
    generated: RwLock<HashMap<String, GeneratedContent>>,
}

impl MemoryContentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save_scheduled_post(&self, post: ScheduledPost) {
        let mut scheduled = self.scheduled.write().await;
        scheduled.insert(post.id.clone(), post);
    }

    /// A user's scheduled posts, soonest first.
    pub async fn scheduled_posts(&self, user_id: &str) -> Vec<ScheduledPost> {
        let scheduled = self.scheduled.read().await;
        let mut posts: Vec<ScheduledPost> = scheduled
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        posts.sort_by_key(|p| p.scheduled_for);
        posts
    }

    pub async fn update_post_status(&self, id: &str, status: PostStatus) -> Result<(), StoreError> {
        let mut scheduled = self.scheduled.write().await;
        let post = scheduled.get_mut(id).ok_or_else(|| StoreError::NotFound {
            kind: "scheduled post",
            id: id.to_string(),
        })?;
        post.status = status;
        Ok(())
    }

    pub async fn delete_scheduled_post(&self, id: &str) -> Result<(), StoreError> {
        let mut scheduled = self.scheduled.write().await;
        scheduled
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                kind: "scheduled post",
                id: id.to_string(),
            })
    }

    pub async fn save_generated_content(&self, content: GeneratedContent) {
        let mut generated = self.generated.write().await;
        generated.insert(content.id.clone(), content);
    }

    /// A user's saved drafts, newest first.
    pub async fn generated_content(&self, user_id: &str) -> Vec<GeneratedContent> {
        let generated = self.generated.read().await;
        let mut drafts: Vec<GeneratedContent> = generated
            .values()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect();
        drafts.sort_by_key(|c| std::cmp::Reverse(c.created_at));
        drafts
    }

    pub async fn delete_generated_content(&self, id: &str) -> Result<(), StoreError> {
        let mut generated = self.generated.write().await;
        generated
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound {
                kind: "generated content",
                id: id.to_string(),
            })
    }
}
