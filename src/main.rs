use std::sync::Arc;

use tokio::net::TcpListener;

use voice_message::application::config::ConfigStore;
use voice_message::domain::SiteUrl;
use voice_message::infrastructure::audio::WhisperClient;
use voice_message::infrastructure::host::InMemoryHost;
use voice_message::infrastructure::observability::{TracingConfig, init_tracing};
use voice_message::presentation::{
    AppState, Environment, HostPorts, PluginHooks, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig::new(environment.as_str(), settings.logging.json),
        settings.server.port,
    );

    let host = Arc::new(InMemoryHost::new());
    let seeded = host.add_members_from_pairs(&settings.host.seed_members);
    if seeded > 0 {
        tracing::info!(seeded, "Seeded channel memberships");
    }

    let engine = Arc::new(WhisperClient::new()?);
    let site_url = SiteUrl::parse(settings.host.site_url.as_deref());
    let state = AppState::new(
        HostPorts::from_host(host),
        engine,
        Arc::new(ConfigStore::default()),
        site_url,
    );

    let hooks = PluginHooks::new(&state);
    hooks.on_activate(settings.plugin.clone()).await?;

    let router = create_router(state);
    let address = settings.bind_address();
    let listener = TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    hooks.on_deactivate().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
