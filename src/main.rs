//! # Main — CLI Entry Point
//!
//! `serve` runs the HTTP API (and optionally the static site build);
//! `estimate` evaluates the cost calculator from the command line.
//!
//! Settings can come from flags, the environment, or a `.env` file in the
//! working directory. `LOG_FORMAT=json` switches to JSON logs; `RUST_LOG`
//! controls verbosity.

use anyhow::Result;
use clap::{Parser, Subcommand};
use renovate_leads::{estimate, server};
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(
    name = "renovate-leads",
    about = "Lead-capture API and cost calculator for a renovation contractor"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "HOST", default_value = "0.0.0.0")]
        host: IpAddr,
        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 5000)]
        port: u16,
        /// Directory to serve static files from (the built site)
        #[arg(long, env = "STATIC_DIR")]
        static_dir: Option<PathBuf>,
        /// URL that receives every new contact as JSON
        #[arg(long, env = "CONTACT_WEBHOOK_URL")]
        contact_webhook_url: Option<url::Url>,
        /// Timeout for one webhook delivery, in seconds
        #[arg(long, env = "WEBHOOK_TIMEOUT_SECS", default_value_t = 10)]
        webhook_timeout_secs: u64,
    },
    /// Print a cost breakdown as JSON
    Estimate {
        /// kitchen, bathroom, flooring, roofing, exterior or full_home
        #[arg(long)]
        project_type: String,
        /// Area in square feet (only used for flooring)
        #[arg(long, default_value_t = 100)]
        square_footage: u32,
        /// standard, premium, luxury, or a numeric multiplier
        #[arg(long, default_value = "1.0")]
        quality: String,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
            contact_webhook_url,
            webhook_timeout_secs,
        } => {
            let config = server::ServerConfig {
                host,
                port,
                static_dir,
                contact_webhook_url,
                webhook_timeout: Duration::from_secs(webhook_timeout_secs),
            };
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(server::run(config))
        }
        Commands::Estimate {
            project_type,
            square_footage,
            quality,
        } => {
            let breakdown =
                estimate::estimate_from_input(&project_type, Some(square_footage), &quality)?;
            println!("{}", serde_json::to_string_pretty(&breakdown)?);
            Ok(())
        }
    }
}
