//! PackVault - Pokemon TCG collection tracker
//!
//! Set RUST_LOG to control log output (e.g. RUST_LOG=debug, RUST_LOG=packvault=trace).

use clap::Parser;
use packvault::cli::{run, Args};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    log::debug!("Data directory: {}", args.data_dir);

    if let Err(e) = run(args).await {
        log::error!("Command failed: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
