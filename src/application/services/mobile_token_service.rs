use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;

use crate::application::config::ConfigStore;
use crate::application::ports::{HostError, KvStore};
use crate::domain::{ChannelId, MobileToken, PostId, UserId};

pub const MOBILE_TOKEN_KEY_PREFIX: &str = "vm_mobile_token_";

const TOKEN_BYTES: usize = 32;

/// Issues and redeems the one-time tokens behind the mobile recording page.
pub struct MobileTokenService {
    kv: Arc<dyn KvStore>,
    config: Arc<ConfigStore>,
}

impl MobileTokenService {
    pub fn new(kv: Arc<dyn KvStore>, config: Arc<ConfigStore>) -> Self {
        Self { kv, config }
    }

    pub async fn issue(
        &self,
        user_id: &UserId,
        channel_id: &ChannelId,
        root_id: Option<&PostId>,
    ) -> Result<String, MobileTokenError> {
        let token = generate_token();
        let ttl = self.config.snapshot().mobile_token_ttl_seconds();
        let ttl = i64::try_from(ttl).unwrap_or(i64::MAX);
        let expires_at = Utc::now().timestamp().saturating_add(ttl);

        let grant = MobileToken::new(
            user_id.clone(),
            channel_id.clone(),
            root_id.cloned(),
            expires_at,
        );
        self.store(&token, &grant).await?;

        tracing::debug!(user_id = %user_id, channel_id = %channel_id, expires_at, "Mobile token issued");
        Ok(token)
    }

    /// Returns the grant behind `token` if it exists and has not expired.
    /// Expired tokens are removed as a side effect.
    pub async fn lookup(&self, token: &str) -> Result<MobileToken, MobileTokenError> {
        let key = storage_key(token);
        let raw = self
            .kv
            .get(&key)
            .await
            .map_err(MobileTokenError::Host)?
            .ok_or(MobileTokenError::NotFound)?;

        let grant: MobileToken = serde_json::from_slice(&raw)
            .map_err(|e| MobileTokenError::Invalid(e.to_string()))?;
        if !grant.is_well_formed() {
            return Err(MobileTokenError::Invalid(
                "missing user or channel".to_string(),
            ));
        }

        if grant.is_expired_at(Utc::now().timestamp()) {
            if let Err(e) = self.kv.delete(&key).await {
                tracing::warn!(error = %e, "Failed to delete expired mobile token");
            }
            return Err(MobileTokenError::Expired);
        }

        Ok(grant)
    }

    /// Remembers the ephemeral prompt so it can be updated after upload.
    pub async fn attach_ephemeral_post(
        &self,
        token: &str,
        post_id: &PostId,
    ) -> Result<(), MobileTokenError> {
        if token.trim().is_empty() || post_id.is_empty() {
            return Ok(());
        }
        let mut grant = self.lookup(token).await?;
        grant.ephemeral_post_id = Some(post_id.clone());
        self.store(token, &grant).await
    }

    /// Invalidates the token after a successful upload.
    pub async fn consume(&self, token: &str) -> Result<bool, MobileTokenError> {
        self.kv
            .delete(&storage_key(token))
            .await
            .map_err(MobileTokenError::Host)
    }

    /// Puts a claimed token back after the upload it guarded failed.
    pub async fn restore(&self, token: &str, grant: &MobileToken) -> Result<(), MobileTokenError> {
        self.store(token, grant).await
    }

    async fn store(&self, token: &str, grant: &MobileToken) -> Result<(), MobileTokenError> {
        let payload =
            serde_json::to_vec(grant).map_err(|e| MobileTokenError::Invalid(e.to_string()))?;
        self.kv
            .set(&storage_key(token), payload)
            .await
            .map_err(MobileTokenError::Host)
    }
}

fn storage_key(token: &str) -> String {
    format!("{}{}", MOBILE_TOKEN_KEY_PREFIX, token)
}

fn generate_token() -> String {
    let bytes: [u8; TOKEN_BYTES] = rand::random();
    URL_SAFE_NO_PAD.encode(bytes)
}

#[derive(Debug, thiserror::Error)]
pub enum MobileTokenError {
    #[error("token not found")]
    NotFound,
    #[error("token expired")]
    Expired,
    #[error("token invalid: {0}")]
    Invalid(String),
    #[error("kv store: {0}")]
    Host(HostError),
}
