//! Configuration management
//!
//! This module handles loading and parsing configuration for the Elternantrag
//! wizard. Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// PDF template / output configuration
    #[serde(default)]
    pub pdf: PdfConfig,
    /// Visitor session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// PDF template and output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Path to the (possibly protection-locked) application form template
    #[serde(default = "default_template_path")]
    pub template_path: PathBuf,
    /// Directory the filled document and the decrypted scratch copy are
    /// written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File name of the filled document (also the download name)
    #[serde(default = "default_output_filename")]
    pub output_filename: String,
    /// File name of the decrypted scratch copy inside `output_dir`
    #[serde(default = "default_scratch_filename")]
    pub scratch_filename: String,
    /// Fixed value for the "Adresse der Behörde" field on page 1
    #[serde(default)]
    pub authority_address: String,
    /// Set the read-only flag on every filled field
    #[serde(default = "default_lock_fields")]
    pub lock_fields: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            template_path: default_template_path(),
            output_dir: default_output_dir(),
            output_filename: default_output_filename(),
            scratch_filename: default_scratch_filename(),
            authority_address: String::new(),
            lock_fields: default_lock_fields(),
        }
    }
}

impl PdfConfig {
    /// Full path of the filled output document
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_filename)
    }

    /// Full path of the decrypted scratch copy
    pub fn scratch_path(&self) -> PathBuf {
        self.output_dir.join(&self.scratch_filename)
    }
}

fn default_template_path() -> PathBuf {
    PathBuf::from("forms/antrag-auf-elterngeld.pdf")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_output_filename() -> String {
    "Elterngeld_Antrag_Ausgefuellt.pdf".to_string()
}

fn default_scratch_filename() -> String {
    "antrag_entsperrt.pdf".to_string()
}

fn default_lock_fields() -> bool {
    true
}

/// Visitor session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Session expiry after inactivity, in minutes
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            expiry_minutes: default_expiry_minutes(),
        }
    }
}

fn default_cookie_name() -> String {
    "elternantrag_session".to_string()
}

fn default_expiry_minutes() -> i64 {
    60
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - ELTERNANTRAG_SERVER_HOST
    /// - ELTERNANTRAG_SERVER_PORT
    /// - ELTERNANTRAG_PDF_TEMPLATE
    /// - ELTERNANTRAG_PDF_OUTPUT_DIR
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("ELTERNANTRAG_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("ELTERNANTRAG_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(template) = std::env::var("ELTERNANTRAG_PDF_TEMPLATE") {
            self.pdf.template_path = PathBuf::from(template);
        }
        if let Ok(dir) = std::env::var("ELTERNANTRAG_PDF_OUTPUT_DIR") {
            self.pdf.output_dir = PathBuf::from(dir);
        }
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load(path).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.pdf.template_path,
            PathBuf::from("forms/antrag-auf-elterngeld.pdf")
        );
        assert_eq!(config.pdf.output_filename, "Elterngeld_Antrag_Ausgefuellt.pdf");
        assert!(config.pdf.lock_fields);
        assert_eq!(config.session.cookie_name, "elternantrag_session");
        assert_eq!(config.session.expiry_minutes, 60);
    }

    #[test]
    fn test_load_empty_file_returns_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "server:\n  port: 3000\npdf:\n  authority_address: \"Elterngeldstelle Pankow\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.pdf.authority_address, "Elterngeldstelle Pankow");
        assert_eq!(config.pdf.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_load_invalid_yaml_reports_location() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "server:\n  port: [not a port\n").unwrap();

        let err = Config::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_env_overrides() {
        let _guard = lock_env();
        std::env::set_var("ELTERNANTRAG_SERVER_PORT", "9999");
        std::env::set_var("ELTERNANTRAG_PDF_TEMPLATE", "/tmp/other-template.pdf");

        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load_with_env(path).unwrap();

        assert_eq!(config.server.port, 9999);
        assert_eq!(config.pdf.template_path, PathBuf::from("/tmp/other-template.pdf"));

        std::env::remove_var("ELTERNANTRAG_SERVER_PORT");
        std::env::remove_var("ELTERNANTRAG_PDF_TEMPLATE");
    }

    #[test]
    fn test_env_override_invalid_port_ignored() {
        let _guard = lock_env();
        std::env::set_var("ELTERNANTRAG_SERVER_PORT", "not-a-port");

        let path = std::path::Path::new("nonexistent_config.yml");
        let config = Config::load_with_env(path).unwrap();
        assert_eq!(config.server.port, 8080);

        std::env::remove_var("ELTERNANTRAG_SERVER_PORT");
    }

    #[test]
    fn test_output_paths_join_output_dir() {
        let config = Config::default();
        assert_eq!(
            config.pdf.output_path(),
            PathBuf::from("output/Elterngeld_Antrag_Ausgefuellt.pdf")
        );
        assert_eq!(
            config.pdf.scratch_path(),
            PathBuf::from("output/antrag_entsperrt.pdf")
        );
    }
}
