//! Application configuration.
//!
//! Layers a TOML config file under environment overrides with the
//! `CODEDECK_` prefix (e.g. `CODEDECK_GATEWAY__API_KEY`). The gateway API
//! key is configuration injected at process start, never compiled in.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::gateway::GenerationConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
    pub workspace: WorkspaceConfig,
}

/// HTTP server binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 4180,
        }
    }
}

/// Generative endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Static API key for the endpoint. Absent means the gateway fails
    /// closed with a configuration error.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    /// Endpoint base URL, up to and excluding `/models`.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling knobs sent with every request.
    pub generation: GenerationSettings,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout_secs: 60,
            generation: GenerationSettings::default(),
        }
    }
}

/// Sampling knobs as they appear in the config file.
///
/// Kept separate from the wire schema so the `[gateway.generation]` section
/// stays snake_case like every other section; converted at client
/// construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub top_k: u32,
    pub top_p: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        let wire = GenerationConfig::default();
        Self {
            temperature: wire.temperature,
            top_k: wire.top_k,
            top_p: wire.top_p,
            max_output_tokens: wire.max_output_tokens,
        }
    }
}

impl From<GenerationSettings> for GenerationConfig {
    fn from(settings: GenerationSettings) -> Self {
        Self {
            temperature: settings.temperature,
            top_k: settings.top_k,
            top_p: settings.top_p,
            max_output_tokens: settings.max_output_tokens,
        }
    }
}

/// Logging defaults, overridable from the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Workspace boot behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Seed the store with the stock starter document at boot.
    pub seed_starter_file: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            seed_starter_file: true,
        }
    }
}

/// The default config file path (`~/.config/codedeck/config.toml` or the
/// platform equivalent).
pub fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir().ok_or_else(|| anyhow!("could not determine config directory"))?;
    Ok(dir.join("codedeck").join("config.toml"))
}

/// Load configuration from an optional file plus environment overrides.
///
/// A missing file is not an error; defaults apply.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let settings = Config::builder()
        .add_source(
            File::from(path.to_path_buf())
                .format(FileFormat::Toml)
                .required(false),
        )
        .add_source(Environment::with_prefix("CODEDECK").separator("__"))
        .build()
        .context("building configuration")?;

    settings
        .try_deserialize()
        .context("deserializing configuration")
}

/// Write the default configuration to `path`, creating parent directories.
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating config directory {}", parent.display()))?;
    }
    let rendered = toml::to_string_pretty(&AppConfig::default())
        .context("serializing default configuration")?;
    fs::write(path, rendered)
        .with_context(|| format!("writing default config to {}", path.display()))?;
    Ok(())
}
