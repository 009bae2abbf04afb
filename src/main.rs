use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use guideline_engine::api::{AppState, create_router};
use guideline_engine::config::ConfigLoader;

/// HTTP server for the child support guideline engine.
#[derive(Debug, Parser)]
struct Cli {
    /// Directory holding guideline.yaml and schedules/.
    #[arg(long, env = "GUIDELINE_CONFIG_DIR", default_value = "./config/guideline")]
    config: PathBuf,

    /// Serve only the embedded statutory schedule and skip the config directory.
    #[arg(long)]
    statutory: bool,

    /// Address to listen on.
    #[arg(long, env = "GUIDELINE_BIND_ADDR", default_value = "127.0.0.1:3000")]
    bind: SocketAddr,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    let config = if cli.statutory {
        ConfigLoader::statutory()
    } else {
        ConfigLoader::load(&cli.config).inspect_err(|err| {
            warn!(path = %cli.config.display(), error = %err, "Failed to load configuration");
        })?
    };

    let app = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(cli.bind).await?;
    info!(addr = %cli.bind, "Guideline engine listening");

    axum::serve(listener, app).await?;
    Ok(())
}
