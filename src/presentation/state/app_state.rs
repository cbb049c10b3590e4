use std::sync::Arc;

use crate::application::config::ConfigStore;
use crate::application::ports::{
    CommandRegistry, Directory, EphemeralMessenger, FileStore, KvStore, PostStore,
    TranscriptionEngine,
};
use crate::application::services::{
    AccessPolicy, AutoTranscriber, MobileTokenService, MobileUploadService, TranscriptionService,
    UploadService, VoiceCommand,
};
use crate::domain::SiteUrl;

/// Every host capability the plugin consumes.
#[derive(Clone)]
pub struct HostPorts {
    pub posts: Arc<dyn PostStore>,
    pub files: Arc<dyn FileStore>,
    pub kv: Arc<dyn KvStore>,
    pub directory: Arc<dyn Directory>,
    pub messenger: Arc<dyn EphemeralMessenger>,
    pub commands: Arc<dyn CommandRegistry>,
}

impl HostPorts {
    /// All ports served by one adapter.
    pub fn from_host<H>(host: Arc<H>) -> Self
    where
        H: PostStore + FileStore + KvStore + Directory + EphemeralMessenger + CommandRegistry + 'static,
    {
        Self {
            posts: host.clone(),
            files: host.clone(),
            kv: host.clone(),
            directory: host.clone(),
            messenger: host.clone(),
            commands: host,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConfigStore>,
    pub access: Arc<AccessPolicy>,
    pub directory: Arc<dyn Directory>,
    pub auto_transcriber: Arc<AutoTranscriber>,
    pub uploads: Arc<UploadService>,
    pub transcription: Arc<TranscriptionService>,
    pub mobile_uploads: Arc<MobileUploadService>,
    pub voice_command: Arc<VoiceCommand>,
    pub site_url: SiteUrl,
}

impl AppState {
    pub fn new(
        host: HostPorts,
        engine: Arc<dyn TranscriptionEngine>,
        config: Arc<ConfigStore>,
        site_url: SiteUrl,
    ) -> Self {
        let auto_transcriber = Arc::new(AutoTranscriber::new(
            Arc::clone(&config),
            Arc::clone(&host.posts),
            Arc::clone(&engine),
        ));
        Self::with_auto_transcriber(host, engine, config, site_url, auto_transcriber)
    }

    /// Same wiring around a caller-built auto-transcriber.
    pub fn with_auto_transcriber(
        host: HostPorts,
        engine: Arc<dyn TranscriptionEngine>,
        config: Arc<ConfigStore>,
        site_url: SiteUrl,
        auto_transcriber: Arc<AutoTranscriber>,
    ) -> Self {
        let access = Arc::new(AccessPolicy::new(
            Arc::clone(&config),
            Arc::clone(&host.directory),
        ));
        let tokens = Arc::new(MobileTokenService::new(
            Arc::clone(&host.kv),
            Arc::clone(&config),
        ));
        let uploads = Arc::new(UploadService::new(
            Arc::clone(&host.files),
            Arc::clone(&host.posts),
            Arc::clone(&auto_transcriber),
        ));
        let transcription = Arc::new(TranscriptionService::new(
            Arc::clone(&config),
            Arc::clone(&host.posts),
            Arc::clone(&host.files),
            Arc::clone(&host.directory),
            engine,
        ));
        let mobile_uploads = Arc::new(MobileUploadService::new(
            Arc::clone(&tokens),
            Arc::clone(&host.directory),
            Arc::clone(&uploads),
            Arc::clone(&host.messenger),
            site_url.clone(),
        ));
        let voice_command = Arc::new(VoiceCommand::new(
            Arc::clone(&config),
            Arc::clone(&access),
            tokens,
            Arc::clone(&host.messenger),
            Arc::clone(&host.commands),
            site_url.clone(),
        ));

        Self {
            config,
            access,
            directory: host.directory,
            auto_transcriber,
            uploads,
            transcription,
            mobile_uploads,
            voice_command,
            site_url,
        }
    }
}
