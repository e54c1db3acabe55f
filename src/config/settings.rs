//! Configuration settings for kiln.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub tls: TlsConfig,
    pub setup: SetupConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            tls: TlsConfig::default(),
            setup: SetupConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations or use defaults.
    pub fn load() -> Result<Self> {
        let config_paths = [
            // Current directory
            PathBuf::from("kiln.toml"),
            PathBuf::from("config.toml"),
            // User config directory
            dirs::config_dir()
                .map(|p| p.join("kiln/config.toml"))
                .unwrap_or_default(),
            // Home directory
            dirs::home_dir()
                .map(|p| p.join(".kiln/config.toml"))
                .unwrap_or_default(),
        ];

        for path in &config_paths {
            if path.exists() {
                tracing::info!("Loading config from: {}", path.display());
                return Self::from_file(path);
            }
        }

        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be > 0".to_string()).into());
        }
        if self.server.site_root.is_empty() {
            return Err(ConfigError::MissingField("server.site_root".to_string()).into());
        }
        if self.tls.common_name.is_empty() {
            return Err(ConfigError::MissingField("tls.common_name".to_string()).into());
        }
        if self.tls.validity_days == 0 {
            return Err(ConfigError::Invalid("tls.validity_days must be > 0".to_string()).into());
        }
        for target in &self.setup.targets {
            if target.pattern.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "setup target {} has an empty pattern",
                    target.path
                ))
                .into());
            }
            if !target.replacement.contains("{app_id}") {
                return Err(ConfigError::Invalid(format!(
                    "setup target {} replacement is missing the {{app_id}} placeholder",
                    target.path
                ))
                .into());
            }
        }
        Ok(())
    }

    /// Expand the site root path.
    pub fn site_root(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.server.site_root);
        PathBuf::from(expanded.as_ref())
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the listening socket to
    pub bind: String,
    /// Listening port
    pub port: u16,
    /// Directory served as the site root
    pub site_root: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8443,
            site_root: ".".to_string(),
        }
    }
}

/// TLS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Serve over HTTPS (falls back to HTTP if the TLS context cannot be built)
    pub enabled: bool,
    /// Path to the server certificate (PEM)
    pub cert_path: String,
    /// Path to the server private key (PEM)
    pub key_path: String,
    /// Common name for generated certificates
    pub common_name: String,
    /// Organization for generated certificates
    pub organization: String,
    /// Validity period for generated certificates, in days
    pub validity_days: u32,
    /// Additional hostnames or IP addresses the certificate should cover
    pub extra_hosts: Vec<String>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cert_path: "certs/server.crt".to_string(),
            key_path: "certs/server.key".to_string(),
            common_name: "localhost".to_string(),
            organization: "Dev".to_string(),
            validity_days: 365,
            extra_hosts: Vec::new(),
        }
    }
}

impl TlsConfig {
    /// Expanded certificate path.
    pub fn cert_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.cert_path).as_ref())
    }

    /// Expanded private key path.
    pub fn key_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.key_path).as_ref())
    }
}

/// Project setup (identifier patching) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Directory containing the project files to patch
    pub project_dir: String,
    /// Environment file created on first setup, relative to the project dir
    pub env_file: String,
    /// Development endpoint URL written to the environment file
    pub dev_endpoint_url: String,
    /// Production endpoint URL written to the environment file
    pub prod_endpoint_url: String,
    /// Files patched with the app id
    pub targets: Vec<PatchTargetConfig>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            project_dir: ".".to_string(),
            env_file: ".env".to_string(),
            dev_endpoint_url: "https://dev.example.invalid".to_string(),
            prod_endpoint_url: "https://example.invalid".to_string(),
            targets: PatchTargetConfig::default_targets(),
        }
    }
}

impl SetupConfig {
    /// Expanded project directory.
    pub fn project_dir(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.project_dir).as_ref())
    }
}

/// One file patched during setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchTargetConfig {
    /// Path relative to the project directory
    pub path: String,
    /// Regex matched against the file contents
    pub pattern: String,
    /// Replacement text; `{app_id}` is substituted with the validated id
    pub replacement: String,
    /// Whether a missing file fails the run
    #[serde(default)]
    pub required: bool,
}

impl PatchTargetConfig {
    /// The fixed default target set: two required files and one optional.
    pub fn default_targets() -> Vec<Self> {
        vec![
            Self {
                path: "index.html".to_string(),
                pattern: "appId: '[^']*'".to_string(),
                replacement: "appId: '{app_id}'".to_string(),
                required: true,
            },
            Self {
                path: "js/app-init.js".to_string(),
                pattern: r#"const APP_ID = "[^"]*";"#.to_string(),
                replacement: r#"const APP_ID = "{app_id}";"#.to_string(),
                required: true,
            },
            Self {
                path: "preview.html".to_string(),
                pattern: "appId: '[^']*'".to_string(),
                replacement: "appId: '{app_id}'".to_string(),
                required: false,
            },
        ]
    }
}
