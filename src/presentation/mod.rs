pub mod config;
pub mod handlers;
pub mod hooks;
pub mod pages;
pub mod router;
pub mod state;

pub use config::{Environment, Settings, SettingsError};
pub use hooks::PluginHooks;
pub use router::create_router;
pub use state::{AppState, HostPorts};
