use async_trait::async_trait;

use crate::domain::{Post, PostId};

use super::HostError;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Persists a new post and returns it as stored by the host.
    async fn create_post(&self, post: Post) -> Result<Post, HostError>;

    async fn get_post(&self, id: &PostId) -> Result<Option<Post>, HostError>;

    /// Replaces the stored post, props included.
    async fn update_post(&self, post: &Post) -> Result<Post, HostError>;
}
