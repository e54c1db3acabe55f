//! Certificate providers.
//!
//! Generation sits behind the [`CertProvider`] trait; [`RcgenProvider`] is
//! the in-process implementation.

use std::fs;
use std::net::IpAddr;
use std::path::Path;

use rcgen::{
    CertificateParams, DnType, ExtendedKeyUsagePurpose, KeyPair, KeyUsagePurpose, SanType,
};
use tracing::debug;

use crate::config::TlsConfig;
use crate::error::CertError;

/// Subject and host coverage for an issued certificate.
#[derive(Debug, Clone)]
pub struct CertSubject {
    /// Common name in the distinguished name
    pub common_name: String,
    /// Organization in the distinguished name
    pub organization: String,
    /// Hostnames or IP addresses covered in addition to localhost
    pub extra_hosts: Vec<String>,
}

impl CertSubject {
    /// Build a subject from the TLS configuration.
    pub fn from_tls_config(tls: &TlsConfig) -> Self {
        Self {
            common_name: tls.common_name.clone(),
            organization: tls.organization.clone(),
            extra_hosts: tls.extra_hosts.clone(),
        }
    }
}

/// Given a subject and validity period, produce a private key and self-signed
/// certificate on disk, or fail.
pub trait CertProvider {
    fn provision(
        &self,
        subject: &CertSubject,
        validity_days: u32,
        key_path: &Path,
        cert_path: &Path,
    ) -> Result<(), CertError>;
}

/// In-process provider backed by rcgen.
#[derive(Debug, Default)]
pub struct RcgenProvider;

impl RcgenProvider {
    fn build_params(subject: &CertSubject, validity_days: u32) -> Result<CertificateParams, CertError> {
        let mut params = CertificateParams::default();

        params
            .distinguished_name
            .push(DnType::CommonName, subject.common_name.as_str());
        params
            .distinguished_name
            .push(DnType::OrganizationName, subject.organization.as_str());

        // Subject Alternative Names (what the cert is valid for)
        params.subject_alt_names = vec![
            SanType::DnsName("localhost".try_into().map_err(rcgen::Error::from)?),
            SanType::IpAddress(IpAddr::V4([127, 0, 0, 1].into())),
            SanType::IpAddress(IpAddr::V6([0, 0, 0, 0, 0, 0, 0, 1].into())),
        ];
        for host in subject
            .extra_hosts
            .iter()
            .chain(std::iter::once(&subject.common_name))
        {
            if host.as_str() == "localhost" {
                continue;
            }
            let san = match host.parse::<IpAddr>() {
                Ok(ip) => SanType::IpAddress(ip),
                Err(_) => SanType::DnsName(host.as_str().try_into().map_err(rcgen::Error::from)?),
            };
            if !params.subject_alt_names.contains(&san) {
                params.subject_alt_names.push(san);
            }
        }

        params.not_before = time::OffsetDateTime::now_utc();
        params.not_after =
            time::OffsetDateTime::now_utc() + time::Duration::days(i64::from(validity_days));

        // Key usage for a server certificate
        params.key_usages = vec![
            KeyUsagePurpose::DigitalSignature,
            KeyUsagePurpose::KeyEncipherment,
        ];
        params.extended_key_usages = vec![ExtendedKeyUsagePurpose::ServerAuth];

        Ok(params)
    }
}

impl CertProvider for RcgenProvider {
    fn provision(
        &self,
        subject: &CertSubject,
        validity_days: u32,
        key_path: &Path,
        cert_path: &Path,
    ) -> Result<(), CertError> {
        let params = Self::build_params(subject, validity_days)?;

        let key_pair = KeyPair::generate()?;
        let cert = params.self_signed(&key_pair)?;

        fs::write(cert_path, cert.pem()).map_err(|source| CertError::WriteCert {
            path: cert_path.display().to_string(),
            source,
        })?;
        fs::write(key_path, key_pair.serialize_pem()).map_err(|source| CertError::WriteKey {
            path: key_path.display().to_string(),
            source,
        })?;

        // Restrictive permissions on the key file (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(key_path, perms).map_err(|source| CertError::WriteKey {
                path: key_path.display().to_string(),
                source,
            })?;
        }

        debug!(
            cert = %cert_path.display(),
            key = %key_path.display(),
            "Generated self-signed certificate"
        );
        Ok(())
    }
}
