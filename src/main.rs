//! Kiln entry point.

use clap::{Parser, Subcommand};
use kiln::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// Kiln: local HTTPS development server and project setup tool
#[derive(Parser, Debug)]
#[command(name = "kiln")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site over HTTPS, generating a certificate if needed
    Serve {
        /// Listening port
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory served as the site root
        #[arg(short, long)]
        root: Option<String>,
        /// Serve plain HTTP without certificate bootstrap
        #[arg(long)]
        no_tls: bool,
        /// Emit logs as JSON
        #[arg(long)]
        json_logs: bool,
    },
    /// Patch the app id into the project files
    Setup {
        /// Platform-issued app id, e.g. 2008275057-VqJkXjxy
        app_id: String,
        /// Project directory containing the files to patch
        #[arg(long)]
        project_dir: Option<String>,
    },
    /// Show or regenerate the certificate material
    Cert {
        /// Delete existing material and generate fresh files
        #[arg(long)]
        regenerate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let is_serve = matches!(args.command, Command::Serve { .. });

    if !is_serve {
        // Minimal logging for CLI commands
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    match args.command {
        Command::Serve {
            port,
            root,
            no_tls,
            json_logs,
        } => {
            init_serve_tracing(json_logs);

            // Install rustls crypto provider for HTTPS support
            if !no_tls {
                rustls::crypto::aws_lc_rs::default_provider()
                    .install_default()
                    .expect("Failed to install rustls crypto provider");
            }

            tracing::info!("Starting kiln v{}", env!("CARGO_PKG_VERSION"));

            let config = load_config(&args.config)?;
            cli::run_serve(config, port, root, no_tls).await
        }
        Command::Setup {
            app_id,
            project_dir,
        } => {
            let config = load_config(&args.config)?;
            cli::run_setup(&config, &app_id, project_dir, args.json)
        }
        Command::Cert { regenerate } => {
            let config = load_config(&args.config)?;
            cli::run_cert(&config, regenerate, args.json)
        }
    }
}

/// Initialize tracing for server mode.
fn init_serve_tracing(json_logs: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn load_config(path: &Option<String>) -> kiln::Result<Config> {
    match path {
        Some(p) => Config::from_file(p),
        None => Config::load(),
    }
}
