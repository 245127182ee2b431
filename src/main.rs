use clap::Parser;
use orbit_update::{cmd, settings::Settings, Result};
use std::{path::PathBuf, process};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(name = env!("CARGO_BIN_NAME"))]
pub struct Cli {
    #[command(flatten)]
    cmd: cmd::Cmd,

    /// Configuration file to use
    #[arg(short = 'c', default_value = "settings.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("error: {e:?}");
        process::exit(1);
    }

    Ok(())
}

async fn run(cli: Cli) -> Result {
    let settings = Settings::new(&cli.config)?;
    cli.cmd.run(&settings).await
}
