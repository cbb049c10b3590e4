use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{Directory, EphemeralMessenger};
use crate::domain::{FileId, MobileToken, PostId, SiteUrl, UserId};

use super::{MobileTokenError, MobileTokenService, UploadError, UploadService, VoiceUpload};

/// How long the "sent" confirmation stays visible before it is removed.
pub const EPHEMERAL_CONFIRMATION_TTL: Duration = Duration::from_secs(6);

#[derive(Debug, Clone)]
pub struct MobileUploadReceipt {
    pub post_id: PostId,
    pub file_id: FileId,
    pub permalink: String,
}

/// Upload path for the recording page opened from the slash command link.
pub struct MobileUploadService {
    tokens: Arc<MobileTokenService>,
    directory: Arc<dyn Directory>,
    uploads: Arc<UploadService>,
    messenger: Arc<dyn EphemeralMessenger>,
    site_url: SiteUrl,
    confirmation_ttl: Duration,
}

impl MobileUploadService {
    pub fn new(
        tokens: Arc<MobileTokenService>,
        directory: Arc<dyn Directory>,
        uploads: Arc<UploadService>,
        messenger: Arc<dyn EphemeralMessenger>,
        site_url: SiteUrl,
    ) -> Self {
        Self {
            tokens,
            directory,
            uploads,
            messenger,
            site_url,
            confirmation_ttl: EPHEMERAL_CONFIRMATION_TTL,
        }
    }

    pub fn with_confirmation_ttl(mut self, ttl: Duration) -> Self {
        self.confirmation_ttl = ttl;
        self
    }

    pub fn site_url(&self) -> &SiteUrl {
        &self.site_url
    }

    /// Resolves the token. A logged-in session must belong to the token's user.
    pub async fn authorize(
        &self,
        token: &str,
        session_user: Option<&UserId>,
    ) -> Result<MobileToken, MobileUploadError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MobileUploadError::MissingToken);
        }

        let grant = self
            .tokens
            .lookup(token)
            .await
            .map_err(MobileUploadError::InvalidToken)?;

        if let Some(user) = session_user {
            if *user != grant.user_id {
                return Err(MobileUploadError::WrongUser);
            }
        }
        Ok(grant)
    }

    /// The token's user must still belong to the token's channel.
    pub async fn ensure_member(&self, grant: &MobileToken) -> Result<(), MobileUploadError> {
        let is_member = self
            .directory
            .is_channel_member(&grant.channel_id, &grant.user_id)
            .await
            .unwrap_or(false);
        if is_member {
            Ok(())
        } else {
            Err(MobileUploadError::NotChannelMember)
        }
    }

    #[tracing::instrument(skip_all, fields(user_id = %grant.user_id, channel_id = %grant.channel_id))]
    pub async fn upload(
        &self,
        token: &str,
        grant: MobileToken,
        data: Vec<u8>,
        mime_type: String,
        duration: String,
    ) -> Result<MobileUploadReceipt, MobileUploadError> {
        self.ensure_member(&grant).await?;

        let token = token.trim();
        self.claim(token).await?;

        let uploaded = match self
            .uploads
            .upload(VoiceUpload {
                user_id: grant.user_id.clone(),
                channel_id: grant.channel_id.clone(),
                root_id: grant.root_id.clone(),
                duration,
                mime_type,
                data,
            })
            .await
        {
            Ok(uploaded) => uploaded,
            Err(e) => {
                if let Err(restore) = self.tokens.restore(token, &grant).await {
                    tracing::error!(error = %restore, "Failed to restore mobile token");
                }
                return Err(MobileUploadError::Upload(e));
            }
        };

        let post_id = uploaded.post.id.clone();
        let permalink = self.site_url.permalink(&post_id);

        if let Some(ephemeral_id) = grant.ephemeral_post_id.clone() {
            self.confirm_sent(&grant, ephemeral_id, &permalink).await;
        }

        Ok(MobileUploadReceipt {
            post_id,
            file_id: uploaded.file_id,
            permalink,
        })
    }

    /// Deletes the token before any post exists. Only the caller whose
    /// delete removed the entry may proceed.
    async fn claim(&self, token: &str) -> Result<(), MobileUploadError> {
        match self.tokens.consume(token).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(MobileUploadError::InvalidToken(MobileTokenError::NotFound)),
            Err(e) => Err(MobileUploadError::InvalidToken(e)),
        }
    }

    async fn confirm_sent(&self, grant: &MobileToken, ephemeral_id: PostId, permalink: &str) {
        let message = format!("✅ Voice message sent.\n{}", permalink);
        if let Err(e) = self
            .messenger
            .update_ephemeral(&grant.user_id, &ephemeral_id, &grant.channel_id, &message)
            .await
        {
            tracing::warn!(error = %e, "Failed to update recording prompt");
        }

        let messenger = Arc::clone(&self.messenger);
        let user_id = grant.user_id.clone();
        let ttl = self.confirmation_ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Err(e) = messenger.delete_ephemeral(&user_id, &ephemeral_id).await {
                tracing::debug!(error = %e, "Failed to remove recording prompt");
            }
        });
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MobileUploadError {
    #[error("missing token")]
    MissingToken,
    #[error("token invalid or expired: {0}")]
    InvalidToken(MobileTokenError),
    #[error("token belongs to another user")]
    WrongUser,
    #[error("not a channel member")]
    NotChannelMember,
    #[error("upload: {0}")]
    Upload(UploadError),
}
