use serde::{Deserialize, Serialize};

/// Root configuration — maps to `tempo.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoConfig {
    pub backend: BackendConfig,
    pub memory: MemoryConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

// ── Backend endpoints ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the agent execution / memory backend.
    pub agent_url: String,
    /// Base URL of the task store API.
    pub task_url: String,
    /// Base URL of the long-term memory API. Usually the agent backend.
    pub memory_url: String,
    /// Default user identity sent with agent and memory requests.
    pub user_id: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            agent_url: "http://localhost:8000".into(),
            task_url: "http://localhost:8001/api".into(),
            memory_url: "http://localhost:8000".into(),
            user_id: None,
        }
    }
}

// ── Memory tiers ───────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// How many of the most recent turns L1 holds.
    pub l1_window: usize,
    /// FIFO bound on absorbed L2 records.
    pub l2_capacity: usize,
    /// Discard stale L3 responses when loads overlap, instead of
    /// last-completion-wins.
    pub discard_stale_loads: bool,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            l1_window: 5,
            l2_capacity: 50,
            discard_stale_loads: false,
        }
    }
}

// ── UI defaults ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// "light", "dark", or "system".
    pub theme: String,
    /// "day", "week", or "month".
    pub view_mode: String,
    /// Stream chat responses instead of waiting for the full result.
    pub streaming: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "system".into(),
            view_mode: "day".into(),
            streaming: true,
        }
    }
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub level: String,
    /// "text" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

impl TempoConfig {
    /// Validate the config. Returns human-readable warnings for suspicious
    /// values; errors only for settings nothing downstream can work with.
    pub fn validate(&self) -> Result<Vec<String>, String> {
        let mut warnings = Vec::new();

        for (field, url) in [
            ("backend.agent_url", &self.backend.agent_url),
            ("backend.task_url", &self.backend.task_url),
            ("backend.memory_url", &self.backend.memory_url),
        ] {
            if url.is_empty() {
                return Err(format!("{field} must not be empty"));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("{field} must be an http(s) URL, got {url:?}"));
            }
            if url.ends_with('/') {
                warnings.push(format!("{field} has a trailing slash; paths are appended with one"));
            }
        }

        if self.memory.l1_window == 0 {
            return Err("memory.l1_window must be at least 1".into());
        }
        if self.memory.l2_capacity == 0 {
            return Err("memory.l2_capacity must be at least 1".into());
        }
        if self.memory.l2_capacity > 1000 {
            warnings.push(format!(
                "memory.l2_capacity = {} is very large for an in-memory tier",
                self.memory.l2_capacity
            ));
        }

        if !matches!(self.ui.theme.as_str(), "light" | "dark" | "system") {
            warnings.push(format!("unknown ui.theme {:?}, falling back to system", self.ui.theme));
        }
        if !matches!(self.logging.format.as_str(), "text" | "json") {
            warnings.push(format!("unknown logging.format {:?}, using text", self.logging.format));
        }

        Ok(warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TempoConfig::default();
        assert!(config.validate().unwrap().is_empty());
        assert_eq!(config.memory.l2_capacity, 50);
        assert_eq!(config.memory.l1_window, 5);
    }

    #[test]
    fn test_bad_url_rejected() {
        let mut config = TempoConfig::default();
        config.backend.agent_url = "localhost:8000".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_window_rejected() {
        let mut config = TempoConfig::default();
        config.memory.l1_window = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_trailing_slash_warns() {
        let mut config = TempoConfig::default();
        config.backend.task_url = "http://localhost:8001/api/".into();
        let warnings = config.validate().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("trailing slash"));
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: TempoConfig = toml::from_str(
            r#"
            [memory]
            l1_window = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.memory.l1_window, 10);
        assert_eq!(config.memory.l2_capacity, 50);
        assert_eq!(config.backend.agent_url, "http://localhost:8000");
    }
}
