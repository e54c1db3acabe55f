//! Static site serving over HTTPS, with plain-HTTP fallback.
//!
//! The listener is bound once; if the TLS context cannot be built from the
//! on-disk material, the same socket serves unencrypted traffic instead.

mod router;
mod tls_listener;

pub use router::site_router;
pub use tls_listener::{load_rustls_config, serve_tls};

use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;
use tracing::{info, warn};

use crate::config::{Config, TlsConfig};
use crate::error::{Result, ServeError};

/// Protocol the listener ends up speaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServeMode {
    Https,
    Http,
}

/// Attempt to build the TLS acceptor, falling back to plain HTTP on failure.
///
/// Failure here means the context could not be constructed from the files on
/// disk; it is reported and serving continues unencrypted.
pub fn build_acceptor(tls: &TlsConfig) -> (ServeMode, Option<TlsAcceptor>) {
    match load_rustls_config(&tls.cert_path(), &tls.key_path()) {
        Ok(config) => (ServeMode::Https, Some(TlsAcceptor::from(config))),
        Err(e) => {
            warn!("Failed to build TLS context: {e}");
            warn!("Falling back to unencrypted HTTP on the same port");
            (ServeMode::Http, None)
        }
    }
}

/// Bind the listening socket and serve the site indefinitely.
///
/// Termination is by external signal only; there is no graceful shutdown
/// path.
pub async fn run_site_server(config: &Config) -> Result<()> {
    let site_root = config.site_root();
    let app = site_router(&site_root);

    let addr = format!("{}:{}", config.server.bind, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: addr.clone(),
            source,
        })?;

    let (mode, acceptor) = if config.tls.enabled {
        build_acceptor(&config.tls)
    } else {
        (ServeMode::Http, None)
    };

    match (mode, acceptor) {
        (ServeMode::Https, Some(acceptor)) => {
            info!(
                root = %site_root.display(),
                "Serving on https://{addr}"
            );
            serve_tls(listener, acceptor, app).await?;
        }
        _ => {
            info!(
                root = %site_root.display(),
                "Serving on http://{addr}"
            );
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
