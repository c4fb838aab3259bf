//! # Configuration
//!
//! Provider credentials and endpoints, with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.parley/config.toml`. Loading never fails: a missing,
//! unreadable, or malformed file logs a warning and yields the defaults, so
//! callers always get a usable snapshot.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_MODEL_NAME: &str = "gpt-4o-mini";
pub const DEFAULT_MCP_SERVER: &str = "https://huggingface.co/mcp";

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_mcp_server() -> String {
    DEFAULT_MCP_SERVER.to_string()
}

// ============================================================================
// Config Snapshot
// ============================================================================

/// Immutable snapshot of the provider configuration.
///
/// Empty string means "not configured" for every credential field;
/// `model_name` and `hugging_face_mcp_server` carry fixed defaults.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AiConfig {
    pub azure_openai_endpoint: String,
    pub azure_openai_api_key: String,
    pub github_models_token: String,
    pub hugging_face_token: String,
    pub hugging_face_mcp_server: String,
    pub model_name: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            azure_openai_endpoint: String::new(),
            azure_openai_api_key: String::new(),
            github_models_token: String::new(),
            hugging_face_token: String::new(),
            hugging_face_mcp_server: default_mcp_server(),
            model_name: default_model_name(),
        }
    }
}

impl AiConfig {
    /// True when both the Azure endpoint and API key are set.
    pub fn has_azure_config(&self) -> bool {
        !self.azure_openai_endpoint.is_empty() && !self.azure_openai_api_key.is_empty()
    }

    /// True when a GitHub Models token is set.
    pub fn has_github_config(&self) -> bool {
        !self.github_models_token.is_empty()
    }

    /// True when at least one chat provider is configured.
    pub fn has_valid_ai_provider(&self) -> bool {
        self.has_github_config() || self.has_azure_config()
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Store
// ============================================================================

/// Read/write access to the configuration snapshot. The gateway only reads;
/// a settings surface would also save. Injected so tests can substitute an
/// in-memory store.
pub trait ConfigStore: Send + Sync {
    /// Returns the current snapshot. Never fails — any read problem yields
    /// the default config.
    fn load(&self) -> AiConfig;

    /// Persists the snapshot.
    fn save(&self, config: &AiConfig) -> Result<(), ConfigError>;
}

/// File-backed store at `~/.parley/config.toml` (or an explicit path).
pub struct FileConfigStore {
    path: Option<PathBuf>,
}

impl FileConfigStore {
    /// Store rooted at the default location, `~/.parley/config.toml`.
    pub fn new() -> Self {
        Self {
            path: default_config_path(),
        }
    }

    /// Store rooted at an explicit path (tests, `--config` flag).
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> AiConfig {
        let mut config = match &self.path {
            Some(path) if path.exists() => match fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<AiConfig>(&contents) {
                    Ok(config) => {
                        info!("Loaded config from {}", path.display());
                        config
                    }
                    Err(e) => {
                        warn!("Malformed config at {}: {e}, using defaults", path.display());
                        AiConfig::default()
                    }
                },
                Err(e) => {
                    warn!("Could not read config at {}: {e}, using defaults", path.display());
                    AiConfig::default()
                }
            },
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                AiConfig::default()
            }
            None => {
                warn!("Could not determine home directory, using default config");
                AiConfig::default()
            }
        };
        apply_env_overrides(&mut config);
        config
    }

    fn save(&self, config: &AiConfig) -> Result<(), ConfigError> {
        let path = match &self.path {
            Some(p) => p,
            None => {
                return Err(ConfigError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no config path available",
                )));
            }
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;
        fs::write(path, contents).map_err(ConfigError::Io)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Returns the path to `~/.parley/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley").join("config.toml"))
}

/// Env vars override file values when set and non-empty.
fn apply_env_overrides(config: &mut AiConfig) {
    let overrides: [(&str, &mut String); 6] = [
        ("AZURE_OPENAI_ENDPOINT", &mut config.azure_openai_endpoint),
        ("AZURE_OPENAI_API_KEY", &mut config.azure_openai_api_key),
        ("GITHUB_MODELS_TOKEN", &mut config.github_models_token),
        ("HUGGING_FACE_TOKEN", &mut config.hugging_face_token),
        ("HUGGING_FACE_MCP_SERVER", &mut config.hugging_face_mcp_server),
        ("MODEL_NAME", &mut config.model_name),
    ];
    for (var, field) in overrides {
        if let Ok(value) = std::env::var(var)
            && !value.is_empty()
        {
            debug!("Config override from env: {var}");
            *field = value;
        }
    }
}

// ============================================================================
// Validation
// ============================================================================

/// Checks whether a configuration is usable for chat: a tool-server token,
/// at least one chat provider, a model name, and well-formed URLs for every
/// endpoint-shaped field that is set.
pub fn validate(config: &AiConfig) -> bool {
    if config.hugging_face_token.is_empty() {
        error!("Validation failed: Hugging Face token is required");
        return false;
    }

    if !config.has_valid_ai_provider() {
        error!("Validation failed: no AI provider configured");
        return false;
    }

    if config.model_name.is_empty() {
        error!("Validation failed: model name is required");
        return false;
    }

    if !config.azure_openai_endpoint.is_empty()
        && Url::parse(&config.azure_openai_endpoint).is_err()
    {
        error!("Validation failed: Azure endpoint is not an absolute URL");
        return false;
    }

    if !config.hugging_face_mcp_server.is_empty()
        && Url::parse(&config.hugging_face_mcp_server).is_err()
    {
        error!("Validation failed: MCP server is not an absolute URL");
        return false;
    }

    true
}
