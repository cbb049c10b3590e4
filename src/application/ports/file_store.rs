use async_trait::async_trait;

use crate::domain::{ChannelId, FileId};

use super::HostError;

/// The host's attachment storage.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn upload_file(
        &self,
        data: &[u8],
        channel_id: &ChannelId,
        filename: &str,
    ) -> Result<FileId, HostError>;

    async fn get_file(&self, id: &FileId) -> Result<Vec<u8>, HostError>;
}
