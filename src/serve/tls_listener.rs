//! TLS context construction and the encrypted accept loop.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnectionBuilder;
use hyper_util::service::TowerToHyperService;
use rustls_pemfile::{certs, private_key};
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{debug, warn};

use crate::error::ServeError;

/// Build a server-side rustls config from PEM files on disk.
pub fn load_rustls_config(
    cert_path: &Path,
    key_path: &Path,
) -> Result<Arc<rustls::ServerConfig>, ServeError> {
    let file = File::open(cert_path).map_err(|source| ServeError::LoadCert {
        path: cert_path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let cert_chain: Vec<_> =
        certs(&mut reader)
            .collect::<Result<_, _>>()
            .map_err(|source| ServeError::LoadCert {
                path: cert_path.display().to_string(),
                source,
            })?;
    if cert_chain.is_empty() {
        return Err(ServeError::NoCertificate(cert_path.display().to_string()));
    }

    let file = File::open(key_path).map_err(|source| ServeError::LoadKey {
        path: key_path.display().to_string(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let key = private_key(&mut reader)
        .map_err(|source| ServeError::LoadKey {
            path: key_path.display().to_string(),
            source,
        })?
        .ok_or_else(|| ServeError::NoPrivateKey(key_path.display().to_string()))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(cert_chain, key)?;

    Ok(Arc::new(config))
}

/// Accept TLS connections indefinitely, serving the router on each.
///
/// A failed handshake drops that connection only; it does not demote the
/// server to plain HTTP.
pub async fn serve_tls(
    listener: TcpListener,
    acceptor: TlsAcceptor,
    app: Router,
) -> Result<(), ServeError> {
    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Accept error: {e}");
                continue;
            }
        };
        debug!(%remote_addr, "New connection");

        let acceptor = acceptor.clone();
        let service = TowerToHyperService::new(app.clone());

        tokio::spawn(async move {
            match acceptor.accept(stream).await {
                Ok(tls_stream) => {
                    let io = TokioIo::new(tls_stream);
                    if let Err(e) = ConnectionBuilder::new(TokioExecutor::new())
                        .serve_connection_with_upgrades(io, service)
                        .await
                    {
                        debug!(%remote_addr, "Connection error: {e}");
                    }
                }
                Err(e) => {
                    warn!(%remote_addr, "TLS handshake failed: {e}");
                }
            }
        });
    }
}
