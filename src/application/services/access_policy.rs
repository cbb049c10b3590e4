use std::sync::Arc;

use crate::application::config::{ALLOW_ALL_ROLES, ConfigStore};
use crate::application::ports::Directory;
use crate::domain::UserId;

const PRIVILEGED_ROLES: [&str; 2] = ["system_admin", "team_admin"];

/// Who may record voice messages, per the `AllowedRoles` setting.
pub struct AccessPolicy {
    config: Arc<ConfigStore>,
    directory: Arc<dyn Directory>,
}

impl AccessPolicy {
    pub fn new(config: Arc<ConfigStore>, directory: Arc<dyn Directory>) -> Self {
        Self { config, directory }
    }

    /// Everyone when roles are "all"; otherwise only system or team admins.
    pub async fn is_user_allowed(&self, user_id: &UserId) -> bool {
        if self.config.snapshot().allowed_roles() == ALLOW_ALL_ROLES {
            return true;
        }

        match self.directory.user_roles(user_id).await {
            Ok(roles) => {
                let roles = roles.to_lowercase();
                PRIVILEGED_ROLES.iter().any(|r| roles.contains(r))
            }
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Role lookup failed");
                false
            }
        }
    }
}
