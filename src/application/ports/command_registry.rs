use async_trait::async_trait;

use super::HostError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub trigger: String,
    pub display_name: String,
    pub auto_complete: bool,
    pub auto_complete_desc: String,
    pub auto_complete_hint: String,
}

#[async_trait]
pub trait CommandRegistry: Send + Sync {
    async fn register_command(&self, command: CommandDefinition) -> Result<(), HostError>;

    async fn unregister_command(&self, trigger: &str) -> Result<(), HostError>;
}
