//! Configuration management.

mod channel;

pub use channel::ChannelProfile;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "SHORTSMITH_CONFIG_PATH";

/// Environment variables checked for the Gemini API key, in order.
pub const API_KEY_ENVS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// First non-blank API key among [`API_KEY_ENVS`].
pub(crate) fn api_key_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    API_KEY_ENVS
        .iter()
        .find_map(|name| lookup(name).filter(|v| !v.trim().is_empty()))
}

/// Main configuration for shortsmith.
#[derive(Debug, Clone, Default)]
pub struct StudioConfig {
    /// LLM provider configuration.
    pub llm: LlmConfig,
    /// Channel profile used by every prompt.
    pub channel: ChannelProfile,
    /// Logging settings from the config file.
    pub logging: LoggingSettings,
    /// Path the configuration was loaded from, if any.
    pub source: Option<PathBuf>,
}

/// LLM provider configuration.
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Model name.
    pub model: Option<String>,
    /// API key (can be an environment variable reference like `${GEMINI_API_KEY}`).
    pub api_key: Option<String>,
    /// Base URL of the Generative Language API.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds (0 disables).
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds (0 disables).
    pub connect_timeout_ms: Option<u64>,
}

/// Logging settings from the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSettings {
    /// Log format: "pretty" or "json".
    pub format: Option<String>,
    /// Log file path.
    pub file: Option<String>,
    /// Filter directive, e.g. `shortsmith=debug`.
    pub filter: Option<String>,
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// LLM configuration.
    pub llm: Option<ConfigFileLlm>,
    /// Channel profile.
    pub channel: Option<ChannelProfile>,
    /// Logging configuration.
    pub logging: Option<LoggingSettings>,
}

/// LLM section in config file.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFileLlm {
    /// Model name.
    pub model: Option<String>,
    /// API key.
    pub api_key: Option<String>,
    /// Base URL.
    pub base_url: Option<String>,
    /// Request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: Option<u64>,
}

impl StudioConfig {
    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(path: &Path) -> crate::Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| crate::Error::OperationFailed {
                operation: "read_config_file".to_string(),
                cause: format!("{}: {e}", path.display()),
            })?;

        let mut config = Self::from_toml(&contents)?;
        config.source = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for [`ConfigFile`].
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        let file: ConfigFile =
            toml::from_str(contents).map_err(|e| crate::Error::OperationFailed {
                operation: "parse_config_file".to_string(),
                cause: e.to_string(),
            })?;

        Ok(Self::from_config_file(file))
    }

    /// Loads configuration from the default location.
    ///
    /// Checks `<platform config dir>/shortsmith/config.toml`, then
    /// `~/.config/shortsmith/config.toml`. Returns the default configuration
    /// if neither exists or parses.
    #[must_use]
    pub fn load_default() -> Self {
        let Some(base_dirs) = directories::BaseDirs::new() else {
            return Self::default();
        };

        let candidates = [
            base_dirs.config_dir().join("shortsmith").join("config.toml"),
            base_dirs
                .home_dir()
                .join(".config")
                .join("shortsmith")
                .join("config.toml"),
        ];

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_file(path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable config file");
                },
            }
        }

        Self::default()
    }

    /// Resolves configuration: explicit path, then `SHORTSMITH_CONFIG_PATH`,
    /// then the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicitly named file cannot be loaded.
    pub fn resolve(path: Option<&Path>) -> crate::Result<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV)
            && !env_path.trim().is_empty()
        {
            return Self::load_from_file(Path::new(&env_path));
        }

        Ok(Self::load_default())
    }

    /// Converts a `ConfigFile` to `StudioConfig`.
    fn from_config_file(file: ConfigFile) -> Self {
        let mut config = Self::default();

        if let Some(llm) = file.llm {
            config.llm.model = llm.model;
            config.llm.api_key = llm.api_key;
            config.llm.base_url = llm.base_url;
            config.llm.timeout_ms = llm.timeout_ms;
            config.llm.connect_timeout_ms = llm.connect_timeout_ms;
        }
        if let Some(channel) = file.channel {
            config.channel = channel;
        }
        if let Some(logging) = file.logging {
            config.logging = logging;
        }

        config
    }

    /// Applies environment variable overrides from the process environment.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Applies overrides using the given variable lookup.
    #[must_use]
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup("SHORTSMITH_MODEL").filter(|v| !v.trim().is_empty()) {
            self.llm.model = Some(model);
        }
        if let Some(timeout_ms) = lookup("SHORTSMITH_LLM_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.llm.timeout_ms = Some(timeout_ms);
        }
        if let Some(connect_ms) =
            lookup("SHORTSMITH_LLM_CONNECT_TIMEOUT_MS").and_then(|v| v.parse().ok())
        {
            self.llm.connect_timeout_ms = Some(connect_ms);
        }

        self.llm.api_key = match self.llm.api_key.take() {
            Some(key) => expand_env_reference(&key, &lookup),
            None => None,
        }
        .or_else(|| api_key_from(&lookup));

        self
    }

    /// Sets the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.llm.model = Some(model.into());
        self
    }

}

/// Expands a `${VAR}` reference; other values pass through unchanged.
///
/// Returns `None` when the referenced variable is unset or empty.
fn expand_env_reference<F>(value: &str, lookup: &F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let trimmed = value.trim();
    match trimmed
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    {
        Some(name) => lookup(name).filter(|v| !v.trim().is_empty()),
        None if trimmed.is_empty() => None,
        None => Some(trimmed.to_string()),
    }
}
