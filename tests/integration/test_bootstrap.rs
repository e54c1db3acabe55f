//! Certificate bootstrap pipeline tests.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use kiln::config::TlsConfig;
use kiln::serve::{build_acceptor, load_rustls_config, ServeMode};
use kiln::tls::{
    ensure_material, material_status, remove_material, CertProvider, CertSubject, RcgenProvider,
};

fn tls_config_in(dir: &TempDir) -> TlsConfig {
    TlsConfig {
        cert_path: dir.path().join("certs/server.crt").display().to_string(),
        key_path: dir.path().join("certs/server.key").display().to_string(),
        ..TlsConfig::default()
    }
}

#[test]
fn test_bootstrap_then_tls_context() {
    let dir = TempDir::new().unwrap();
    let tls = tls_config_in(&dir);

    ensure_material(&RcgenProvider, &tls).unwrap();
    assert!(material_status(&tls).is_complete());

    // The generated material must load into a working TLS context
    let config = load_rustls_config(&tls.cert_path(), &tls.key_path()).unwrap();
    drop(config);

    let (mode, acceptor) = build_acceptor(&tls);
    assert_eq!(mode, ServeMode::Https);
    assert!(acceptor.is_some());
}

#[test]
fn test_restart_reuses_material() {
    let dir = TempDir::new().unwrap();
    let tls = tls_config_in(&dir);

    ensure_material(&RcgenProvider, &tls).unwrap();
    let first = fs::read_to_string(tls.cert_path()).unwrap();

    // Second bootstrap must not touch the files
    ensure_material(&RcgenProvider, &tls).unwrap();
    let second = fs::read_to_string(tls.cert_path()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_preexisting_material_never_invokes_provider() {
    struct CountingProvider {
        calls: AtomicUsize,
    }

    impl CertProvider for CountingProvider {
        fn provision(
            &self,
            _subject: &CertSubject,
            _validity_days: u32,
            key_path: &Path,
            cert_path: &Path,
        ) -> Result<(), kiln::CertError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fs::write(key_path, "key").unwrap();
            fs::write(cert_path, "cert").unwrap();
            Ok(())
        }
    }

    let dir = TempDir::new().unwrap();
    let tls = tls_config_in(&dir);
    let provider = CountingProvider {
        calls: AtomicUsize::new(0),
    };

    ensure_material(&provider, &tls).unwrap();
    ensure_material(&provider, &tls).unwrap();
    ensure_material(&provider, &tls).unwrap();

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_corrupt_material_falls_back_to_http() {
    let dir = TempDir::new().unwrap();
    let tls = tls_config_in(&dir);

    fs::create_dir_all(dir.path().join("certs")).unwrap();
    fs::write(tls.cert_path(), "-----BEGIN GARBAGE-----").unwrap();
    fs::write(tls.key_path(), "-----BEGIN GARBAGE-----").unwrap();

    // Material "exists", so bootstrap leaves it alone...
    ensure_material(&RcgenProvider, &tls).unwrap();

    // ...and the TLS context attempt fails into the HTTP fallback
    let (mode, acceptor) = build_acceptor(&tls);
    assert_eq!(mode, ServeMode::Http);
    assert!(acceptor.is_none());
}

#[test]
fn test_regenerate_produces_fresh_material() {
    let dir = TempDir::new().unwrap();
    let tls = tls_config_in(&dir);

    ensure_material(&RcgenProvider, &tls).unwrap();
    let first = fs::read_to_string(tls.cert_path()).unwrap();

    remove_material(&tls).unwrap();
    assert!(!material_status(&tls).is_complete());

    ensure_material(&RcgenProvider, &tls).unwrap();
    let second = fs::read_to_string(tls.cert_path()).unwrap();
    assert_ne!(first, second);
}
