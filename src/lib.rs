//! Kiln: Local HTTPS Development Server
//!
//! Serves a static site over HTTPS with automatically generated self-signed
//! certificates, and patches a platform-issued app id into project files.

pub mod config;
pub mod error;
pub mod patch;
pub mod serve;
pub mod tls;

pub use config::Config;
pub use error::{CertError, ConfigError, KilnError, PatchError, Result, ServeError};
pub use patch::{AppId, EnvFileOutcome, PatchReport, TargetOutcome, TargetReport};
pub use serve::{run_site_server, site_router, ServeMode};
pub use tls::{ensure_material, material_status, CertProvider, CertSubject, RcgenProvider};
