use async_trait::async_trait;

use crate::domain::{ChannelId, PostId, UserId};

use super::HostError;

/// Posts visible only to one user and never persisted in the channel.
#[async_trait]
pub trait EphemeralMessenger: Send + Sync {
    async fn send_ephemeral(
        &self,
        user_id: &UserId,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<PostId, HostError>;

    async fn update_ephemeral(
        &self,
        user_id: &UserId,
        post_id: &PostId,
        channel_id: &ChannelId,
        message: &str,
    ) -> Result<(), HostError>;

    async fn delete_ephemeral(&self, user_id: &UserId, post_id: &PostId) -> Result<(), HostError>;
}
