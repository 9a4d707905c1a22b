use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::flows::chat::ChatFlow;
use crate::flows::crops::CropFlow;
use crate::flows::detection::DetectionFlow;
use crate::interfaces::advisory::AdvisoryEngine;
use crate::interfaces::random::RandomSource;
use crate::interfaces::session::SessionRepository;
use crate::providers::local_storage::LocalStorageSessionStore;
use crate::providers::random::SystemRandom;
use crate::services::advisory::MockAdvisoryEngine;
use crate::services::auth::AuthService;
use crate::services::dashboard::DashboardService;
use crate::services::profile::ProfileEditor;

/// Process-wide collaborators, built once and handed to every view.
#[derive(Clone)]
pub struct KisanApp {
    config: Config,
    sessions: Arc<dyn SessionRepository>,
    engine: Arc<dyn AdvisoryEngine>,
    random: Arc<dyn RandomSource>,
}

impl KisanApp {
    pub fn from_config(config: &Config) -> Result<Self> {
        let storage = config.storage_path();
        debug!(storage = %storage.to_string_lossy(), "opening local storage");
        let sessions: Arc<dyn SessionRepository> =
            Arc::new(LocalStorageSessionStore::new(&storage)?);
        let random: Arc<dyn RandomSource> = Arc::new(SystemRandom);
        let engine: Arc<dyn AdvisoryEngine> =
            Arc::new(MockAdvisoryEngine::new(random.clone(), &config.latency));
        Ok(Self::with_parts(config.clone(), sessions, engine, random))
    }

    pub fn with_parts(
        config: Config,
        sessions: Arc<dyn SessionRepository>,
        engine: Arc<dyn AdvisoryEngine>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            config,
            sessions,
            engine,
            random,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sessions(&self) -> Arc<dyn SessionRepository> {
        self.sessions.clone()
    }

    pub fn auth(&self) -> AuthService {
        AuthService::new(
            self.sessions.clone(),
            self.random.clone(),
            self.config.latency.auth(),
        )
    }

    pub fn profile_editor(&self) -> Result<ProfileEditor> {
        ProfileEditor::open(self.sessions.clone())
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(self.sessions.clone(), self.random.clone())
    }

    pub fn chat(&self) -> ChatFlow {
        ChatFlow::new(self.engine.clone())
    }

    pub fn detection(&self) -> DetectionFlow {
        DetectionFlow::new(self.engine.clone())
    }

    pub fn crops(&self) -> CropFlow {
        CropFlow::new(self.engine.clone())
    }
}
