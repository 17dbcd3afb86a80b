use std::path::{Path, PathBuf};

use clap::Parser;
use registrard::config::Config;
use registrard::{logging, server};

const DEFAULT_CONFIG_PATH: &str = "registrar.toml";

#[derive(Debug, Parser)]
#[command(name = "registrard", version, about = "University enrollment records service")]
struct Args {
    /// TOML config file (defaults to ./registrar.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,

    /// Override database.path
    #[arg(long)]
    database: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::from_file(DEFAULT_CONFIG_PATH)?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(path) = &args.database {
        config.database.path = path.clone();
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init_logging(&config.logging)?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting registrard");

    server::run(config).await
}
