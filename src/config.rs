use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{KisanAiError, Result};
use crate::interfaces::random::RandomSource;

fn default_chat_ms() -> u64 {
    1500
}

fn default_analysis_ms() -> u64 {
    2000
}

fn default_recommendation_ms() -> u64 {
    2000
}

fn default_auth_ms() -> u64 {
    1500
}

/// Artificial delays, in milliseconds, standing in for remote inference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LatencyConfig {
    #[serde(default = "default_chat_ms")]
    pub chat_ms: u64,
    #[serde(default = "default_analysis_ms")]
    pub analysis_ms: u64,
    #[serde(default = "default_recommendation_ms")]
    pub recommendation_ms: u64,
    #[serde(default = "default_auth_ms")]
    pub auth_ms: u64,
    #[serde(default)]
    pub jitter_ms: u64,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            chat_ms: default_chat_ms(),
            analysis_ms: default_analysis_ms(),
            recommendation_ms: default_recommendation_ms(),
            auth_ms: default_auth_ms(),
            jitter_ms: 0,
        }
    }
}

impl LatencyConfig {
    pub fn zero() -> Self {
        Self {
            chat_ms: 0,
            analysis_ms: 0,
            recommendation_ms: 0,
            auth_ms: 0,
            jitter_ms: 0,
        }
    }

    fn latency(&self, base_ms: u64) -> Latency {
        Latency::new(
            Duration::from_millis(base_ms),
            Duration::from_millis(self.jitter_ms),
        )
    }

    pub fn chat(&self) -> Latency {
        self.latency(self.chat_ms)
    }

    pub fn analysis(&self) -> Latency {
        self.latency(self.analysis_ms)
    }

    pub fn recommendation(&self) -> Latency {
        self.latency(self.recommendation_ms)
    }

    pub fn auth(&self) -> Latency {
        self.latency(self.auth_ms)
    }
}

/// A bounded delay: `base` plus a uniform draw from `[0, jitter]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub base: Duration,
    pub jitter: Duration,
}

impl Latency {
    pub fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn sample(&self, random: &dyn RandomSource) -> Duration {
        let jitter_ms = self.jitter.as_millis() as usize;
        if jitter_ms == 0 {
            return self.base;
        }
        let extra = random.index(jitter_ms.saturating_add(1));
        self.base + Duration::from_millis(extra as u64)
    }

    pub async fn wait(&self, random: &dyn RandomSource) {
        let delay = self.sample(random);
        if delay.is_zero() {
            return;
        }
        tracing::trace!(delay_ms = delay.as_millis() as u64, "simulating latency");
        tokio::time::sleep(delay).await;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage_dir: Option<String>,
    #[serde(default)]
    pub latency: LatencyConfig,
}

impl Config {
    pub fn convention_defaults() -> Self {
        Self {
            storage_dir: Some(
                crate::runtime_paths::default_storage_dir()
                    .to_string_lossy()
                    .to_string(),
            ),
            latency: LatencyConfig::default(),
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            KisanAiError::Config(format!("failed to read {}: {e}", path.to_string_lossy()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            KisanAiError::Config(format!("invalid config {}: {e}", path.to_string_lossy()))
        })
    }

    /// Reads `path` when it exists, otherwise falls back to convention defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => {
                let mut config = Self::from_file(path)?;
                if config.storage_dir.is_none() {
                    config.storage_dir = Self::convention_defaults().storage_dir;
                }
                Ok(config)
            }
            Some(path) => {
                tracing::info!(
                    config_path = %path.to_string_lossy(),
                    "config file not found, using defaults"
                );
                Ok(Self::convention_defaults())
            }
            None => Ok(Self::convention_defaults()),
        }
    }

    pub fn storage_path(&self) -> PathBuf {
        self.storage_dir
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(crate::runtime_paths::default_storage_dir)
    }
}
