use async_trait::async_trait;

use super::HostError;

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<(), HostError>;

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, HostError>;

    /// Removes the key. Returns whether it was present.
    async fn delete(&self, key: &str) -> Result<bool, HostError>;
}
