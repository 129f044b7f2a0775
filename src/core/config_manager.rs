// src/core/config_manager.rs
//! Configuration from an optional config.yaml plus environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::config::{ExportConfig, PdfConverterConfig};
use crate::utils::ensure_dir_exists;

pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev";
pub const DEFAULT_CHAT_MODEL: &str = "google/gemini-2.5-flash-lite";
pub const DEFAULT_ANALYSIS_MODEL: &str = "google/gemini-2.5-flash-lite";
pub const DEFAULT_LINKEDIN_MODEL: &str = "google/gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_TTL_HOURS: u64 = 72;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub gateway: GatewayConfig,
    pub converter: PdfConverterConfig,
}

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub name: String,
    pub data_path: PathBuf,
    pub output_path: PathBuf,
    pub workspace_path: PathBuf,
    pub session_path: PathBuf,
    /// Suggestion progress untouched this long is swept on start.
    pub session_ttl: Duration,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub chat_model: String,
    pub analysis_model: String,
    pub linkedin_model: String,
    pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GATEWAY_URL.to_string(),
            api_key: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
            linkedin_model: DEFAULT_LINKEDIN_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// One environment's block in config.yaml. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    data_dir: Option<PathBuf>,
    gateway: Option<GatewayConfig>,
    pdf_converter: Option<PdfConverterConfig>,
    session_ttl_hours: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ConfigFile {
    local: EnvironmentSection,
    production: EnvironmentSection,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.yaml"))
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        let env = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", env);

        let section = Self::read_section(config_path, &env)?;

        let base_dir = match std::env::var("FLOWCV_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => match section.data_dir {
                Some(dir) => resolve_path(&dir)?,
                None if env == "production" => PathBuf::from("/app"),
                None => std::env::current_dir().context("Failed to get current directory")?,
            },
        };

        let mut gateway = section.gateway.unwrap_or_default();
        if let Ok(url) = std::env::var("LLM_GATEWAY_URL") {
            gateway.base_url = url;
        }
        if let Ok(key) = std::env::var("LLM_GATEWAY_API_KEY") {
            gateway.api_key = Some(key);
        }
        gateway.base_url = gateway.base_url.trim_end_matches('/').to_string();

        let mut converter = section.pdf_converter.unwrap_or_default();
        if let Ok(program) = std::env::var("PDF_CONVERTER") {
            converter.program = program;
        }

        let session_ttl_hours = match std::env::var("SESSION_TTL_HOURS") {
            Ok(value) => value
                .parse::<u64>()
                .with_context(|| format!("SESSION_TTL_HOURS must be a number of hours, got {}", value))?,
            Err(_) => section.session_ttl_hours.unwrap_or(DEFAULT_SESSION_TTL_HOURS),
        };

        Ok(Self {
            environment: EnvironmentConfig {
                name: env,
                data_path: base_dir.join("data"),
                output_path: base_dir.join("out"),
                workspace_path: base_dir.join("tmp_workspace"),
                session_path: base_dir.join("data").join("sessions"),
                session_ttl: Duration::from_secs(session_ttl_hours * 3600),
            },
            gateway,
            converter,
        })
    }

    fn read_section(config_path: &Path, env: &str) -> Result<EnvironmentSection> {
        if !config_path.exists() {
            info!("No {} found, using defaults", config_path.display());
            return Ok(EnvironmentSection::default());
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(match env {
            "production" => file.production,
            _ => file.local,
        })
    }

    pub fn export_config(&self) -> ExportConfig {
        ExportConfig::new()
            .with_output_dir(self.environment.output_path.clone())
            .with_workspace_dir(self.environment.workspace_path.clone())
            .with_converter(self.converter.clone())
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        ensure_dir_exists(&self.environment.data_path).await?;
        ensure_dir_exists(&self.environment.output_path).await?;
        ensure_dir_exists(&self.environment.workspace_path).await?;
        ensure_dir_exists(&self.environment.session_path).await?;
        Ok(())
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        // For relative paths, resolve from current working directory
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_section_parses_partial_gateway() {
        let file: ConfigFile = serde_yaml::from_str(
            "local:\n  data_dir: /srv/flowcv\n  gateway:\n    chat_model: test/model\n    timeout_seconds: 5\n",
        )
        .unwrap();
        let gateway = file.local.gateway.unwrap();
        assert_eq!(gateway.chat_model, "test/model");
        assert_eq!(gateway.timeout_seconds, 5);
        assert_eq!(gateway.base_url, DEFAULT_GATEWAY_URL);
        assert_eq!(file.local.data_dir, Some(PathBuf::from("/srv/flowcv")));
        assert!(file.production.gateway.is_none());
        assert_eq!(file.local.session_ttl_hours, None);
    }

    #[test]
    fn test_session_ttl_from_yaml() {
        let file: ConfigFile = serde_yaml::from_str("production:\n  session_ttl_hours: 24\n").unwrap();
        assert_eq!(file.production.session_ttl_hours, Some(24));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let section = ConfigManager::read_section(&dir.path().join("config.yaml"), "local").unwrap();
        assert!(section.gateway.is_none());
        assert!(section.pdf_converter.is_none());
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "local: [unclosed").unwrap();
        assert!(ConfigManager::read_section(&path, "local").is_err());
    }

    #[test]
    fn test_resolve_path_keeps_absolute() {
        assert_eq!(resolve_path(Path::new("/abs")).unwrap(), PathBuf::from("/abs"));
        assert!(resolve_path(Path::new("rel")).unwrap().is_absolute());
    }
}
