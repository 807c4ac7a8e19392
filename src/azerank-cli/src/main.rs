mod cli;
mod commands;
mod config;
mod file_io;
mod render;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "azerank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Rank(args) => {
            commands::rank::handle(args).await?;
        }

        Commands::Parse(args) => {
            commands::parse::handle(args)?;
        }

        Commands::Configure {
            base_url,
            fight_style,
            timeout,
            show,
        } => {
            let updates = commands::configure::Updates {
                base_url,
                fight_style,
                timeout,
            };
            commands::configure::handle(updates, show)?;
        }
    }

    Ok(())
}
