//! Certificate bootstrap.
//!
//! Existence on disk is the only state: material is created once and reused
//! across restarts until deleted externally.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::TlsConfig;
use crate::error::CertError;

use super::provider::{CertProvider, CertSubject};

/// On-disk presence of the key and certificate files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialStatus {
    pub key_present: bool,
    pub cert_present: bool,
}

impl MaterialStatus {
    /// Both files exist.
    pub fn is_complete(&self) -> bool {
        self.key_present && self.cert_present
    }
}

/// Check which certificate files are present on disk.
pub fn material_status(tls: &TlsConfig) -> MaterialStatus {
    MaterialStatus {
        key_present: tls.key_path().exists(),
        cert_present: tls.cert_path().exists(),
    }
}

/// Ensure the key and certificate exist, invoking the provider if either is
/// missing.
///
/// When both files are already present the provider is not invoked. Provider
/// failure propagates: the caller must not attempt to serve without material.
pub fn ensure_material(provider: &dyn CertProvider, tls: &TlsConfig) -> Result<(), CertError> {
    let cert_path = tls.cert_path();
    let key_path = tls.key_path();

    if material_status(tls).is_complete() {
        debug!(cert = %cert_path.display(), "Reusing existing certificate material");
        return Ok(());
    }

    info!(
        cert = %cert_path.display(),
        key = %key_path.display(),
        "Generating certificate material"
    );

    create_parent_dir(&cert_path)?;
    create_parent_dir(&key_path)?;

    provider.provision(
        &CertSubject::from_tls_config(tls),
        tls.validity_days,
        &key_path,
        &cert_path,
    )
}

/// Delete existing material so the next bootstrap regenerates it.
pub fn remove_material(tls: &TlsConfig) -> Result<(), CertError> {
    for path in [tls.key_path(), tls.cert_path()] {
        if path.exists() {
            fs::remove_file(&path).map_err(|source| CertError::Remove {
                path: path.display().to_string(),
                source,
            })?;
            info!(path = %path.display(), "Removed certificate material");
        }
    }
    Ok(())
}

fn create_parent_dir(path: &Path) -> Result<(), CertError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| CertError::CreateDir {
                path: parent.display().to_string(),
                source,
            })?;
        }
    }
    Ok(())
}
