//! CLI entry point for the census responder.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use census_registry::PongBuilder;
use census_responder::{Config, Responder};

#[derive(Debug, Parser)]
#[command(name = "census-responder", about = "Answers overlay crawler pings over UDP")]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let now_millis = chrono::Utc::now().timestamp_millis();
    let registry = Arc::new(RwLock::new(config.registry(now_millis)));
    let builder = PongBuilder::new(config.responder_config());

    let responder = Responder::bind(config.bind, builder, registry).await?;
    info!(addr = %responder.local_addr()?, "census responder listening");
    responder.run().await
}
