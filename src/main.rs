//! Damage inference server - main entry point.

use std::path::PathBuf;

use clap::Parser;

use shm_infer::server::{run_server, ServerConfig};

#[derive(Parser)]
#[command(
    name = "shm-infer",
    about = "HTTP inference server for structural damage classification",
    version
)]
struct Cli {
    /// Address to bind
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding lstm.onnx, cnn.onnx and cnn_lstm.onnx
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Maximum upload size in bytes
    #[arg(long)]
    max_upload_size: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "shm_infer=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    // CLI flags override env-derived defaults.
    let defaults = ServerConfig::default();
    let config = ServerConfig {
        host: cli.host.unwrap_or(defaults.host),
        port: cli.port.unwrap_or(defaults.port),
        models_dir: cli.models_dir.unwrap_or(defaults.models_dir),
        max_upload_size: cli.max_upload_size.unwrap_or(defaults.max_upload_size),
    };

    run_server(config).await
}
