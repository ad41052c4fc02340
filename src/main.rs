use clap::Parser;
use tracing_subscriber::EnvFilter;

use boxdbot::cli::{run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional; ignore a missing file.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("boxdbot=info")),
        )
        .init();

    let cli = Cli::parse();
    run(cli).await
}
