//! Server configuration.
//!
//! Resolved once at startup. Each setting comes from its environment
//! variable if set and non-empty, else from the optional JSON config file,
//! else from the default. The API key has one more fallback: an interactive
//! prompt when stdin is a terminal.

use std::fmt;
use std::io::{IsTerminal, Write};
use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use ortho_completion::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL, redact_key};

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_PROFILE: &str = "basic";

pub const ENV_BIND: &str = "ORTHO_BIND";
pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_API_BASE_URL: &str = "ORTHO_API_BASE_URL";
pub const ENV_MODEL: &str = "ORTHO_MODEL";
pub const ENV_PROFILE: &str = "ORTHO_INTAKE_PROFILE";
pub const ENV_REQUIRED_FIELDS: &str = "ORTHO_REQUIRED_FIELDS";
pub const ENV_LOG_FORMAT: &str = "ORTHO_LOG_FORMAT";
pub const ENV_CONFIG_PATH: &str = "ORTHO_CONFIG";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines for a terminal.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(eyre::eyre!("unknown log format '{other}' (expected text or json)")),
        }
    }
}

/// On-disk config file. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub api_key: Option<String>,
    pub api_base_url: Option<String>,
    pub model: Option<String>,
    pub intake_profile: Option<String>,
    pub required_fields: Option<Vec<String>>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// `None` until supplied by env, file, or prompt.
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub intake_profile: String,
    /// Replaces the profile's own required fields when set.
    pub required_fields: Option<Vec<String>>,
    pub log_format: LogFormat,
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("api_key", &self.api_key.as_deref().map(redact_key))
            .field("api_base_url", &self.api_base_url)
            .field("model", &self.model)
            .field("intake_profile", &self.intake_profile)
            .field("required_fields", &self.required_fields)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServerConfig {
    /// Load from the process environment and the config file, prompting for
    /// the API key if neither provides one.
    pub fn load() -> eyre::Result<Self> {
        let env = |key: &str| std::env::var(key).ok();
        let file = match config_path(&env) {
            Some(path) => load_file(&path)?,
            None => FileConfig::default(),
        };

        let mut config = Self::resolve(env, file)?;
        if config.api_key.is_none() {
            config.api_key = Some(prompt_for_api_key()?);
        }
        Ok(config)
    }

    /// Combine environment lookups with file settings and defaults.
    pub fn resolve<F>(env: F, file: FileConfig) -> eyre::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let bind_str = lookup(ENV_BIND)
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind: SocketAddr = bind_str
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid bind address '{bind_str}': {e}"))?;

        let required_fields: Option<Vec<String>> = lookup(ENV_REQUIRED_FIELDS)
            .map(|list| list.split(',').map(str::to_string).collect())
            .or(file.required_fields)
            .map(|keys| {
                keys.into_iter()
                    .map(|k| k.trim().to_string())
                    .filter(|k| !k.is_empty())
                    .collect()
            });
        if required_fields.as_ref().is_some_and(Vec::is_empty) {
            return Err(eyre::eyre!(
                "required-field override names no fields; unset {ENV_REQUIRED_FIELDS} to use the profile's own"
            ));
        }

        let log_format = match lookup(ENV_LOG_FORMAT) {
            Some(s) => s.parse()?,
            None => file.log_format.unwrap_or_default(),
        };

        Ok(Self {
            bind,
            api_key: lookup(ENV_API_KEY)
                .or(file.api_key)
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty()),
            api_base_url: lookup(ENV_API_BASE_URL)
                .or(file.api_base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: lookup(ENV_MODEL)
                .or(file.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            intake_profile: lookup(ENV_PROFILE)
                .or(file.intake_profile)
                .unwrap_or_else(|| DEFAULT_PROFILE.to_string()),
            required_fields,
            log_format,
        })
    }

    pub fn api_key(&self) -> eyre::Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| eyre::eyre!("{ENV_API_KEY} is not set"))
    }
}

/// `$ORTHO_CONFIG`, else `<config dir>/ortho-planner/config.json` if it exists.
fn config_path(env: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    if let Some(path) = env(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    let path = dirs::config_dir()?.join("ortho-planner").join("config.json");
    path.exists().then_some(path)
}

pub fn load_file(path: &std::path::Path) -> eyre::Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    let config = serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("invalid config at {}: {e}", path.display()))?;
    Ok(config)
}

fn prompt_for_api_key() -> eyre::Result<String> {
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        return Err(eyre::eyre!(
            "{ENV_API_KEY} is not set and no terminal is available to enter it"
        ));
    }

    eprint!("OpenAI API key: ");
    std::io::stderr().flush()?;

    let mut key = String::new();
    stdin.read_line(&mut key)?;
    let key = key.trim();
    if key.is_empty() {
        return Err(eyre::eyre!("API key cannot be empty"));
    }
    Ok(key.to_string())
}
