//! CLI command handlers.

use anyhow::Result;

use kiln::config::Config;
use kiln::patch::{self, AppId};
use kiln::serve;
use kiln::tls::{self, RcgenProvider};

use super::output;

/// Run the bootstrap-and-serve sequence.
///
/// Certificate-provider failure is fatal: it propagates and no serving is
/// attempted.
pub async fn run_serve(
    mut config: Config,
    port: Option<u16>,
    root: Option<String>,
    no_tls: bool,
) -> Result<()> {
    if let Some(p) = port {
        config.server.port = p;
    }
    if let Some(r) = root {
        config.server.site_root = r;
    }
    if no_tls {
        config.tls.enabled = false;
    }

    if config.tls.enabled {
        tls::ensure_material(&RcgenProvider, &config.tls)?;
        tls::print_trust_instructions(&config.tls.cert_path());
    }

    serve::run_site_server(&config).await?;
    Ok(())
}

/// Validate the app id and patch it into the project files.
pub fn run_setup(
    config: &Config,
    raw_id: &str,
    project_dir: Option<String>,
    json: bool,
) -> Result<()> {
    let id = AppId::parse(raw_id)?;

    let mut setup = config.setup.clone();
    if let Some(dir) = project_dir {
        setup.project_dir = dir;
    }

    let report = patch::run_setup(&setup, &id)?;
    output::print_patch_report(&report, json);
    Ok(())
}

/// Report certificate material status, provisioning it if missing.
pub fn run_cert(config: &Config, regenerate: bool, json: bool) -> Result<()> {
    if regenerate {
        tls::remove_material(&config.tls)?;
    }

    let reused = tls::material_status(&config.tls).is_complete();
    tls::ensure_material(&RcgenProvider, &config.tls)?;

    output::print_cert_status(&config.tls, reused, json);
    tls::print_trust_instructions(&config.tls.cert_path());
    Ok(())
}
