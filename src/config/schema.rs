use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Assistant endpoint receiving `{ history, message }` POSTs.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Overall timeout for one exchange, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// TCP/TLS connect timeout, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_endpoint() -> String {
    // The relay the original front-end shipped against.
    "http://localhost:8080/gemini/".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        let home =
            UserDirs::new().map_or_else(|| PathBuf::from("."), |u| u.home_dir().to_path_buf());

        Self {
            config_path: home.join(".careline").join("config.toml"),
            endpoint: default_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

impl Config {
    /// Load `~/.careline/config.toml`, creating it with defaults on first run.
    pub fn load_or_init() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        let careline_dir = home.join(".careline");
        let config_path = careline_dir.join("config.toml");

        if !careline_dir.exists() {
            fs::create_dir_all(&careline_dir).context("Failed to create .careline directory")?;
        }

        if config_path.exists() {
            let contents =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let mut config: Config =
                toml::from_str(&contents).context("Failed to parse config file")?;
            // Set the computed path that is skipped during serialization
            config.config_path = config_path;
            Ok(config)
        } else {
            let mut config = Config::default();
            config.config_path = config_path;
            config.save()?;
            Ok(config)
        }
    }

    /// Environment variables win over file values (container deployments).
    pub fn apply_env_overrides(&mut self) {
        // Endpoint: CARELINE_ENDPOINT
        if let Ok(endpoint) = std::env::var("CARELINE_ENDPOINT") {
            if !endpoint.is_empty() {
                self.endpoint = endpoint;
            }
        }
    }

    /// Serialize to TOML and write to `config_path`.
    pub fn save(&self) -> Result<()> {
        let toml_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        let parent_dir = self
            .config_path
            .parent()
            .context("Config path must have a parent directory")?;
        fs::create_dir_all(parent_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                parent_dir.display()
            )
        })?;

        fs::write(&self.config_path, toml_str)
            .with_context(|| format!("Failed to write {}", self.config_path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn env_override_test_guard() -> std::sync::MutexGuard<'static, ()> {
        static ENV_OVERRIDE_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());
        ENV_OVERRIDE_TEST_LOCK
            .lock()
            .expect("env override test lock poisoned")
    }

    #[test]
    fn defaults_match_shipped_endpoint() {
        let config = Config::default();
        assert_eq!(config.endpoint, "http://localhost:8080/gemini/");
        assert_eq!(config.request_timeout_secs, 120);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn env_override_endpoint() {
        let _env_guard = env_override_test_guard();
        let mut config = Config::default();

        std::env::set_var("CARELINE_ENDPOINT", "http://10.0.0.5:9000/assistant/");
        config.apply_env_overrides();
        assert_eq!(config.endpoint, "http://10.0.0.5:9000/assistant/");

        std::env::remove_var("CARELINE_ENDPOINT");
    }

    #[test]
    fn env_override_empty_value_ignored() {
        let _env_guard = env_override_test_guard();
        let mut config = Config::default();
        let original = config.endpoint.clone();

        std::env::set_var("CARELINE_ENDPOINT", "");
        config.apply_env_overrides();
        assert_eq!(config.endpoint, original);

        std::env::remove_var("CARELINE_ENDPOINT");
    }

    #[test]
    fn save_then_parse_roundtrip() {
        let tmp = TempDir::new().unwrap();

        let mut config = Config::default();
        config.config_path = tmp.path().join("config.toml");
        config.endpoint = "http://localhost:3000/chat/".to_string();
        config.request_timeout_secs = 30;
        config.save().unwrap();

        let contents = fs::read_to_string(&config.config_path).unwrap();
        let parsed: Config = toml::from_str(&contents).unwrap();
        assert_eq!(parsed.endpoint, "http://localhost:3000/chat/");
        assert_eq!(parsed.request_timeout_secs, 30);
        assert_eq!(parsed.connect_timeout_secs, 10);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let parsed: Config = toml::from_str(r#"endpoint = "http://example.test/api/""#).unwrap();
        assert_eq!(parsed.endpoint, "http://example.test/api/");
        assert_eq!(parsed.request_timeout_secs, 120);
        assert_eq!(parsed.connect_timeout_secs, 10);
    }
}
