use async_trait::async_trait;

use crate::domain::{ChannelId, UserId};

use super::HostError;

/// Read-only view of the host's users and channels.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn is_channel_member(
        &self,
        channel_id: &ChannelId,
        user_id: &UserId,
    ) -> Result<bool, HostError>;

    /// Space-separated role names, e.g. `"system_user system_admin"`.
    async fn user_roles(&self, user_id: &UserId) -> Result<String, HostError>;

    async fn channel_display_name(&self, channel_id: &ChannelId)
    -> Result<Option<String>, HostError>;
}
