use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::TempoConfig;

/// Loads the Tempo configuration and hands out snapshots.
pub struct ConfigLoader {
    config: Arc<RwLock<TempoConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > TEMPO_CONFIG env > ~/.tempo/tempo.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("TEMPO_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".tempo")
            .join("tempo.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> tempo_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<TempoConfig>(&raw).map_err(|e| {
                tempo_core::TempoError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            TempoConfig::default()
        };

        // Apply environment variable overrides
        let config = Self::apply_env_overrides(config);

        // Validate config — log warnings, fail on errors
        match config.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
            }
            Err(e) => {
                return Err(tempo_core::TempoError::Config(e));
            }
        }

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> TempoConfig {
        self.config.read().clone()
    }

    /// Get a shared reference for subscription.
    pub fn shared(&self) -> Arc<RwLock<TempoConfig>> {
        Arc::clone(&self.config)
    }

    /// Path the config was read from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (TEMPO_AGENT_URL, TEMPO_TASK_URL, etc.)
    fn apply_env_overrides(mut config: TempoConfig) -> TempoConfig {
        if let Ok(v) = std::env::var("TEMPO_AGENT_URL") {
            config.backend.agent_url = v;
        }
        if let Ok(v) = std::env::var("TEMPO_TASK_URL") {
            config.backend.task_url = v;
        }
        if let Ok(v) = std::env::var("TEMPO_MEMORY_URL") {
            config.backend.memory_url = v;
        }
        if let Ok(v) = std::env::var("TEMPO_LOG_LEVEL") {
            config.logging.level = v;
        }
        // Identity: env fills in when the config file doesn't set one.
        // The file takes priority, env is the fallback.
        if config.backend.user_id.is_none() {
            if let Ok(v) = std::env::var("TEMPO_USER_ID") {
                config.backend.user_id = Some(v);
            }
        }
        config
    }
}
