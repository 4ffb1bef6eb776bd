mod cli;
mod config;
mod constants;
mod event_adapter;
mod render;

use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging - RUST_LOG wins over the verbosity flag
    let default_filter = if cli.verbose() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .init();

    log::info!("Trip planner starting...");

    cli.run().await
}
