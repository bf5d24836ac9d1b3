//! Configuration management for the screening service
//!
//! Provides TOML-based configuration with defaults, environment overrides and validation.
//! Location: ~/.mdd-screener/config.toml

use crate::errors::{Result, ScreenError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration for the screening service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default = "CollaboratorConfig::extractor_default")]
    pub extractor: CollaboratorConfig,
    #[serde(default = "CollaboratorConfig::assessor_default")]
    pub assessor: CollaboratorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origin: String,
}

/// Connection settings for one external collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorConfig {
    pub url: String,
    pub timeout_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

impl CollaboratorConfig {
    /// Symptom extractor defaults: short timeout
    pub fn extractor_default() -> Self {
        Self {
            url: "http://localhost:8000".to_string(),
            timeout_ms: 10_000,
        }
    }

    /// Narrative assessor defaults: generation is latency-heavy
    pub fn assessor_default() -> Self {
        Self {
            url: "http://localhost:8001".to_string(),
            timeout_ms: 60_000,
        }
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Built-in defaults for both collaborators
    pub fn defaults() -> Self {
        Self {
            server: ServerConfig::default(),
            extractor: CollaboratorConfig::extractor_default(),
            assessor: CollaboratorConfig::assessor_default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from file or defaults, then apply process environment overrides
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let mut config = match path {
            Some(config_path) => Self::load_from_file(&config_path)?,
            None => Self::load_default()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ScreenError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ScreenError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Config::defaults())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".mdd-screener").join("config.toml"))
    }

    /// Apply environment overrides through a lookup function
    ///
    /// Recognised keys: `NLP_SERVICE_URL`, `NLP_SERVICE_TIMEOUT`, `RAG_SERVICE_URL`,
    /// `RAG_SERVICE_TIMEOUT`, `PORT`, `CORS_ORIGIN`, `LOG_LEVEL`, `APP_ENV`.
    /// Unparseable numeric values are ignored and the previous value kept.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let production = lookup("APP_ENV").as_deref() == Some("production");

        if let Some(url) = lookup("NLP_SERVICE_URL") {
            self.extractor.url = url;
        }
        if let Some(ms) = lookup("NLP_SERVICE_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.extractor.timeout_ms = ms;
        }
        if let Some(url) = lookup("RAG_SERVICE_URL") {
            self.assessor.url = url;
        }
        if let Some(ms) = lookup("RAG_SERVICE_TIMEOUT").and_then(|v| v.parse().ok()) {
            self.assessor.timeout_ms = ms;
        }
        if let Some(port) = lookup("PORT").and_then(|v| v.parse().ok()) {
            self.server.port = port;
        }
        if let Some(origin) = lookup("CORS_ORIGIN") {
            self.server.cors_origin = origin;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        self.extractor.url = ensure_protocol(&self.extractor.url, production);
        self.assessor.url = ensure_protocol(&self.assessor.url, production);
        self.server.cors_origin = ensure_protocol(&self.server.cors_origin, production);
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, collaborator) in [("extractor", &self.extractor), ("assessor", &self.assessor)] {
            if collaborator.url.trim().is_empty() {
                return Err(ScreenError::ConfigError(format!("{} url must not be empty", name)));
            }
            if collaborator.timeout_ms == 0 {
                return Err(ScreenError::ConfigError(format!(
                    "{} timeout_ms must be greater than 0",
                    name
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ScreenError::ConfigError(
                "server port must be greater than 0".to_string(),
            ));
        }

        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(ScreenError::ConfigError(format!(
                    "Invalid log level: {}",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| ScreenError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ScreenError::ConfigError(format!("Failed to create config dir: {}", e))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| ScreenError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Socket address the HTTP surface binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Prefix a scheme onto bare host names
///
/// Hosting platforms hand out hostnames without a scheme; production traffic goes over https.
pub fn ensure_protocol(url: &str, production: bool) -> String {
    let url = url.trim();
    if url.is_empty() || url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    let scheme = if production { "https://" } else { "http://" };
    format!("{}{}", scheme, url)
}
