//! PlanNET Server - Main entry point
//!
//! Planarian interactome explorer backed by Neo4j.

use anyhow::Result;
use clap::{Parser, Subcommand};
use plannet_server::Config;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "plannet-server")]
#[command(about = "Planarian interaction network explorer")]
struct Cli {
    /// Path to a YAML config file (defaults to ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the datasets this deployment serves
    Datasets,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,plannet_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            plannet_server::start_server(config).await
        }
        Commands::Datasets => {
            let registry = config.registry()?;
            for dataset in registry.iter() {
                match &dataset.citation_url {
                    Some(url) => println!("{}\t{}\t{}", dataset.name, dataset.year, url),
                    None => println!("{}\t{}", dataset.name, dataset.year),
                }
            }
            Ok(())
        }
    }
}
