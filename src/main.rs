use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
#[cfg(feature = "lambda")]
use tracing::info;

use truesight_adapter::handler::request::AdapterRequest;
use truesight_adapter::handler::{EnvHandler, Handle};

/// TrueSight adapter: image moderation scores for an oracle network.
///
/// Fetches an image from IPFS by content hash, classifies it with AWS
/// Rekognition, and answers with five confidence scores.
#[derive(Parser)]
#[command(name = "truesight-adapter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the generic HTTP adapter (POST / with the job request as body)
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on
        #[arg(long, env = "PORT", default_value = "8080")]
        port: u16,

        /// Address to bind
        #[arg(long, env = "BIND", default_value = "0.0.0.0")]
        bind: String,
    },

    /// Run inside a function runtime, taking the job request as the event
    #[cfg(feature = "lambda")]
    Lambda,

    /// Run inside a function runtime, taking the job request as a proxy event body
    #[cfg(feature = "lambda")]
    LambdaProxy,

    /// Run a single job locally and print the response payload
    Check {
        /// Job run ID to echo back
        #[arg(long, default_value = "1")]
        id: String,

        /// IPFS content hash of the image
        hash: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("truesight_adapter=info")),
        )
        .init();

    let cli = Cli::parse();
    let handler: Arc<dyn Handle> = Arc::new(EnvHandler);

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            truesight_adapter::web::run_server(handler, port, &bind).await?;
        }

        #[cfg(feature = "lambda")]
        Commands::Lambda => {
            info!("Starting function runtime (event shape)");
            truesight_adapter::runtime::run_events(handler).await?;
        }

        #[cfg(feature = "lambda")]
        Commands::LambdaProxy => {
            info!("Starting function runtime (proxy event shape)");
            truesight_adapter::runtime::run_proxy_events(handler).await?;
        }

        Commands::Check { id, hash } => {
            let response = handler.handle(AdapterRequest::new(id, hash)).await;
            let status = response.status_code.to_string();
            if response.is_success() {
                println!("{}", status.green().bold());
            } else {
                println!("{}", status.red().bold());
            }
            println!("{}", serde_json::to_string_pretty(&response.payload)?);
        }
    }

    Ok(())
}
