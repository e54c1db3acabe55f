//! Error types for kiln.

use thiserror::Error;

/// Main error type for kiln operations.
#[derive(Error, Debug)]
pub enum KilnError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Certificate error: {0}")]
    Cert(#[from] CertError),

    #[error("Serve error: {0}")]
    Serve(#[from] ServeError),

    #[error("Patch error: {0}")]
    Patch(#[from] PatchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Certificate provisioning errors.
#[derive(Error, Debug)]
pub enum CertError {
    #[error("Certificate generation failed: {0}")]
    Generate(#[from] rcgen::Error),

    #[error("Failed to create certificate directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write private key {path}: {source}")]
    WriteKey {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write certificate {path}: {source}")]
    WriteCert {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove {path}: {source}")]
    Remove {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the serving path.
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read certificate file {path}: {source}")]
    LoadCert {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read private key file {path}: {source}")]
    LoadKey {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No certificates found in {0}")]
    NoCertificate(String),

    #[error("No private key found in {0}")]
    NoPrivateKey(String),

    #[error("TLS configuration rejected: {0}")]
    TlsConfig(#[from] rustls::Error),
}

/// Errors from the identifier patcher.
#[derive(Error, Debug)]
pub enum PatchError {
    #[error("Invalid app id {0:?}: expected 10 digits, a hyphen, then 8 alphanumerics")]
    InvalidAppId(String),

    #[error("Invalid target pattern {pattern:?}: {source}")]
    BadPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Replacement for {path:?} is missing the {{app_id}} placeholder")]
    BadReplacement { path: String },
}

/// Result type alias for kiln operations.
pub type Result<T> = std::result::Result<T, KilnError>;
