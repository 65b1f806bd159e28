//! Uptimey dashboard server
//!
//! Serves the dashboard page, its ajax endpoint and the bundled assets

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};
use uptimey::server::{serve, App};
use uptimey::{Registry, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "uptimey-server")]
#[command(about = "Host uptime dashboard with embedded assets")]
struct Args {
    /// Path to a TOML config file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Bind address [default: 127.0.0.1]
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port number [default: 8000]
    #[arg(short = 'P', long)]
    port: Option<u16>,

    /// Serve assets from disk instead of the embedded copies
    #[arg(long)]
    local: bool,

    /// Directory local mode reads from [default: .]
    #[arg(long)]
    local_root: Option<PathBuf>,

    /// Asset subtree mounted at /assets [default: /assets]
    #[arg(long)]
    root_prefix: Option<String>,
}

impl Args {
    /// File values first, then CLI overrides
    fn into_config(self) -> anyhow::Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load(path)?,
            None => ServerConfig::default(),
        };

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.local {
            config.assets.use_local_disk = true;
        }
        if let Some(root) = self.local_root {
            config.assets.local_root = root;
        }
        if let Some(prefix) = self.root_prefix {
            config.assets.root_prefix = prefix;
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = args.into_config()?;

    info!("Starting Uptimey");
    info!(
        "Assets: local={}, local_root={:?}, root_prefix={}",
        config.assets.use_local_disk, config.assets.local_root, config.assets.root_prefix
    );

    let registry = Arc::new(Registry::bundled());
    let app = match App::new(&config.assets, registry) {
        Ok(app) => Arc::new(app),
        Err(e) => {
            error!("Failed to load dashboard assets: {}", e);
            return Err(e.into());
        }
    };

    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", listener.local_addr()?);

    serve(app, listener, async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down..."),
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    })
    .await?;

    info!("Server stopped");
    Ok(())
}
