use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use parrot_core::{InMemoryStore, SimulationConfig, UploadStore};

mod error;
mod handlers;
mod multipart;
mod server;

use server::ApiServer;

#[derive(Parser)]
#[command(name = "parrot-server")]
#[command(about = "Mock transcription service: simulated uploads, progress, and failures")]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 4000)]
    port: u16,

    /// Probability an upload request is rejected before acceptance.
    #[arg(long)]
    upload_failure_rate: Option<f64>,

    /// Probability a request stalls past client timeouts.
    #[arg(long)]
    timeout_rate: Option<f64>,

    /// Probability an accepted upload ultimately fails processing.
    #[arg(long)]
    processing_failure_rate: Option<f64>,

    /// Minimum simulated processing time in milliseconds.
    #[arg(long)]
    min_processing_ms: Option<u64>,

    /// Maximum simulated processing time in milliseconds.
    #[arg(long)]
    max_processing_ms: Option<u64>,

    /// Progress driver tick period in milliseconds.
    #[arg(long)]
    tick_ms: Option<u64>,
}

impl Cli {
    /// Defaults from [`SimulationConfig`], overridden by whatever flags were
    /// given.
    fn simulation_config(&self) -> SimulationConfig {
        let mut config = SimulationConfig::default();
        if let Some(rate) = self.upload_failure_rate {
            config.upload_failure_rate = rate;
        }
        if let Some(rate) = self.timeout_rate {
            config.timeout_rate = rate;
        }
        if let Some(rate) = self.processing_failure_rate {
            config.processing_failure_rate = rate;
        }
        if let Some(ms) = self.min_processing_ms {
            config.min_processing_ms = ms;
        }
        if let Some(ms) = self.max_processing_ms {
            config.max_processing_ms = ms;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.simulation_config();
    config.validate().context("invalid simulation config")?;

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port)
        .parse()
        .context("invalid host/port")?;

    info!(
        upload_failure_rate = config.upload_failure_rate,
        timeout_rate = config.timeout_rate,
        processing_failure_rate = config.processing_failure_rate,
        min_processing_ms = config.min_processing_ms,
        max_processing_ms = config.max_processing_ms,
        "starting parrot"
    );

    let config = Arc::new(config);
    let store: Arc<dyn UploadStore> = Arc::new(InMemoryStore::new((*config).clone()));
    let server = ApiServer::new(addr, store, config);
    server.run().await
}
