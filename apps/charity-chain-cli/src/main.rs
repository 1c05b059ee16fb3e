use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

mod commands;
mod config;
mod error;

use config::ConfigOverrides;
use error::CliResult;

#[derive(Parser)]
#[command(name = "charity-chain")]
#[command(about = "Charity Chain CLI - Register NGO campaigns on an EVM campaign factory")]
#[command(version)]
struct Cli {
    /// Client configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// JSON-RPC endpoint acting as the wallet provider
    #[arg(long, global = true)]
    rpc_url: Option<Url>,

    /// Campaign factory address
    #[arg(long, global = true)]
    factory: Option<Address>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the already authorized wallet session without prompting
    Session,

    /// Request account access from the wallet provider
    Connect,

    /// Fetch the native to display-currency rate
    Price {
        /// Native amount to convert
        #[arg(short, long)]
        amount: Option<String>,
    },

    /// Register a new campaign (NGO) with the factory
    CreateCampaign {
        /// Minimum contribution in native units, e.g. 0.01
        #[arg(short, long)]
        minimum: String,

        /// Campaign name
        #[arg(short, long)]
        name: String,

        /// Campaign description
        #[arg(short, long)]
        description: String,

        /// Image URL
        #[arg(short, long)]
        image_url: String,

        /// Legal document URL
        #[arg(short, long, default_value = "")]
        legal_doc_url: String,
    },

    /// List campaigns deployed by the factory
    Campaigns,

    /// Deploy the campaign factory from a compiled artifact
    DeployFactory {
        /// Artifact JSON with `interface` and `bytecode`
        #[arg(short, long)]
        artifact: PathBuf,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let overrides = ConfigOverrides {
        config: cli.config,
        rpc_url: cli.rpc_url,
        factory: cli.factory,
    };

    match cli.command {
        Commands::Session => commands::session::execute(&overrides).await,

        Commands::Connect => commands::connect::execute(&overrides).await,

        Commands::Price { amount } => commands::price::execute(&overrides, amount).await,

        Commands::CreateCampaign {
            minimum,
            name,
            description,
            image_url,
            legal_doc_url,
        } => {
            commands::create_campaign::execute(
                &overrides,
                minimum,
                name,
                description,
                image_url,
                legal_doc_url,
            )
            .await
        }

        Commands::Campaigns => commands::campaigns::execute(&overrides).await,

        Commands::DeployFactory { artifact } => {
            commands::deploy_factory::execute(&overrides, artifact).await
        }
    }
}
