use std::sync::Arc;

use voice_message::application::config::PluginConfiguration;
use voice_message::application::services::AccessPolicy;
use voice_message::domain::UserId;
use voice_message::infrastructure::host::InMemoryHost;

use crate::helpers::fixtures::config_store;

fn policy(host: &Arc<InMemoryHost>, allowed_roles: &str) -> AccessPolicy {
    let settings = PluginConfiguration {
        allowed_roles: allowed_roles.to_string(),
        ..Default::default()
    };
    AccessPolicy::new(config_store(settings), host.clone())
}

#[tokio::test]
async fn given_all_roles_when_checking_plain_user_then_allowed() {
    let host = Arc::new(InMemoryHost::new());

    assert!(policy(&host, "all").is_user_allowed(&UserId::new("anyone")).await);
}

#[tokio::test]
async fn given_empty_roles_setting_when_checking_then_defaults_to_all() {
    let host = Arc::new(InMemoryHost::new());

    assert!(policy(&host, "").is_user_allowed(&UserId::new("anyone")).await);
}

#[tokio::test]
async fn given_admin_only_when_checking_plain_user_then_denied() {
    let host = Arc::new(InMemoryHost::new());
    host.set_user_roles(&UserId::new("u1"), "system_user");

    assert!(!policy(&host, "admin").is_user_allowed(&UserId::new("u1")).await);
}

#[tokio::test]
async fn given_admin_only_when_checking_admins_then_allowed() {
    let host = Arc::new(InMemoryHost::new());
    host.set_user_roles(&UserId::new("sys"), "system_user system_admin");
    host.set_user_roles(&UserId::new("team"), "team_user TEAM_ADMIN");
    let policy = policy(&host, "admin");

    assert!(policy.is_user_allowed(&UserId::new("sys")).await);
    assert!(policy.is_user_allowed(&UserId::new("team")).await);
}
