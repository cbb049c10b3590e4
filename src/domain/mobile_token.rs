use serde::{Deserialize, Serialize};

use super::{ChannelId, PostId, UserId};

/// Single-use credential for the browser-only mobile recording flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileToken {
    pub user_id: UserId,
    pub channel_id: ChannelId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_id: Option<PostId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ephemeral_post_id: Option<PostId>,
    /// Unix seconds.
    pub expires_at: i64,
}

impl MobileToken {
    pub fn new(
        user_id: UserId,
        channel_id: ChannelId,
        root_id: Option<PostId>,
        expires_at: i64,
    ) -> Self {
        Self {
            user_id,
            channel_id,
            root_id,
            ephemeral_post_id: None,
            expires_at,
        }
    }

    pub fn is_expired_at(&self, now_unix: i64) -> bool {
        now_unix >= self.expires_at
    }

    pub fn is_well_formed(&self) -> bool {
        !self.user_id.is_empty() && !self.channel_id.is_empty()
    }
}
