mod cli;

use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    clipfetch::observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => clipfetch::api::run(args.address).await?,
    }

    Ok(())
}
