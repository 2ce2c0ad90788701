mod cli;
mod run;
mod shutdown;

use anyhow::Context;
use clap::Parser;
use insight_engine::config::{load_from_file, EngineConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let opts = cli::Opts::parse();
    let config = match &opts.config {
        Some(path) => load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "insight engine starting");

    if opts.once {
        let orchestrator = run::build(&config);
        println!("{}", orchestrator.digest());
        return Ok(());
    }

    run::run(config).await
}
