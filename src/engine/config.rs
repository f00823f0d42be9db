// XO AI Engine — Configuration
//
// Loaded once at process start from ~/.xo/config.toml (or an explicit path),
// then overridden by CLI flags. Every key is optional. The API key is never
// read from the file: only the *name* of its environment variable is.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::atoms::constants::*;
use crate::atoms::error::{EngineError, EngineResult};
use crate::engine::models::DEFAULT_MODEL_LABEL;
use crate::engine::modes::Mode;
use crate::engine::types::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub provider: ProviderKind,
    /// Overrides the provider's default base URL.
    pub base_url: Option<String>,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    /// Model label (see engine::models).
    pub model: String,
    pub mode: Mode,
    pub temperature: f64,
    pub max_tokens: u32,
    pub stream: bool,
    /// Send only the last N log entries. Unset sends the full history.
    pub history_window: Option<usize>,
    /// Canned assistant message seeded into every new or reset log.
    pub greeting: Option<String>,
    pub show_timestamps: bool,
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            provider: ProviderKind::default(),
            base_url: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            model: DEFAULT_MODEL_LABEL.to_string(),
            mode: Mode::default(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            stream: false,
            history_window: None,
            greeting: None,
            show_timestamps: false,
            api_key: None,
        }
    }
}

impl EngineConfig {
    /// `~/.xo/config.toml`, when a home directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the default file if present, then pick up the API key.
    pub fn load() -> EngineResult<Self> {
        let cfg = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => {
                debug!("[config] No config file; using defaults");
                Self::default()
            }
        };
        Ok(cfg.with_env())
    }

    /// Parse a specific file. A missing explicit path is an error.
    pub fn load_from(path: &Path) -> EngineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            EngineError::config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        let cfg = Self::from_toml_str(&text)?;
        info!("[config] Loaded {}", path.display());
        Ok(cfg)
    }

    pub fn from_toml_str(text: &str) -> EngineResult<Self> {
        let cfg: EngineConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> EngineResult<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(EngineError::config(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.temperature
            )));
        }
        if self.max_tokens == 0 {
            return Err(EngineError::config("max_tokens must be greater than 0"));
        }
        if self.provider == ProviderKind::Custom && self.base_url.is_none() {
            return Err(EngineError::config("provider = \"custom\" requires base_url"));
        }
        Ok(())
    }

    /// Read the API key from `api_key_env`. Blank values count as unset.
    pub fn with_env(mut self) -> Self {
        self.api_key = std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// The message shown when the credential is missing.
    pub fn missing_key_message(&self) -> String {
        format!(
            "{} is not set in the environment. Please configure it before using {}.",
            self.api_key_env, ASSISTANT_NAME
        )
    }

    /// Provider settings for one call, or a configuration error when the
    /// credential is missing.
    pub fn provider_config(&self) -> EngineResult<ProviderConfig> {
        let api_key = self
            .api_key()
            .ok_or_else(|| EngineError::config(self.missing_key_message()))?;
        Ok(ProviderConfig {
            kind: self.provider,
            api_key: api_key.to_string(),
            base_url: self.base_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_product() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.provider, ProviderKind::Groq);
        assert_eq!(cfg.api_key_env, "GROQ_API_KEY");
        assert_eq!(cfg.model, "llama3-70b-8192");
        assert_eq!(cfg.mode, Mode::FriendlyChat);
        assert_eq!(cfg.temperature, 0.4);
        assert_eq!(cfg.max_tokens, 1024);
        assert!(!cfg.stream);
        assert_eq!(cfg.history_window, None);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = EngineConfig::from_toml_str(
            r#"
            mode = "Study Helper"
            stream = true
            history_window = 6
            "#,
        )
        .unwrap();
        assert_eq!(cfg.mode, Mode::StudyHelper);
        assert!(cfg.stream);
        assert_eq!(cfg.history_window, Some(6));
        assert_eq!(cfg.max_tokens, 1024);
    }

    #[test]
    fn api_key_in_file_is_ignored() {
        let cfg = EngineConfig::from_toml_str("api_key = \"sk-from-file\"").unwrap();
        assert_eq!(cfg.api_key(), None);
    }

    #[test]
    fn invalid_values_are_config_errors() {
        assert!(EngineConfig::from_toml_str("temperature = 3.5").unwrap_err().is_config());
        assert!(EngineConfig::from_toml_str("max_tokens = 0").unwrap_err().is_config());
        assert!(EngineConfig::from_toml_str("provider = \"custom\"").unwrap_err().is_config());
        assert!(EngineConfig::from_toml_str("mode = \"Day Trader\"").unwrap_err().is_config());
    }

    #[test]
    fn missing_key_is_a_config_error_naming_the_variable() {
        let cfg = EngineConfig::default();
        let err = cfg.provider_config().unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(
            "GROQ_API_KEY is not set in the environment. Please configure it before using XO AI."
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let cfg = EngineConfig::default().with_api_key("   ");
        assert!(cfg.provider_config().is_err());
    }

    #[test]
    fn key_flows_into_provider_config() {
        let cfg = EngineConfig { base_url: Some("http://localhost:9".into()), ..Default::default() }
            .with_api_key("gsk_test");
        let pc = cfg.provider_config().unwrap();
        assert_eq!(pc.api_key, "gsk_test");
        assert_eq!(pc.kind, ProviderKind::Groq);
        assert_eq!(pc.base_url.as_deref(), Some("http://localhost:9"));
    }

    #[test]
    fn env_var_name_is_configurable() {
        let var = "XO_TEST_KEY_ENV_NAME_CONFIGURABLE";
        std::env::set_var(var, "gsk_env");
        let cfg = EngineConfig { api_key_env: var.into(), ..Default::default() }.with_env();
        assert_eq!(cfg.api_key(), Some("gsk_env"));
        std::env::remove_var(var);
    }

    #[test]
    fn load_from_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"mixtral-8x7b-32768\"\nshow_timestamps = true").unwrap();
        let cfg = EngineConfig::load_from(file.path()).unwrap();
        assert_eq!(cfg.model, "mixtral-8x7b-32768");
        assert!(cfg.show_timestamps);
    }

    #[test]
    fn load_from_missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.is_config());
    }
}
