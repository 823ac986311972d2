use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use storybook_generator::{app::App, config::Config, server};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storybook-generator")]
#[command(about = "Serve illustrated children's stories generated from a prompt")]
struct CliArgs {
    /// Address to listen on, overriding BIND_ADDR.
    #[arg(long, value_name = "ADDR", value_parser = parse_bind_arg)]
    bind: Option<SocketAddr>,
}

fn parse_bind_arg(input: &str) -> std::result::Result<SocketAddr, String> {
    input
        .parse()
        .map_err(|_| format!("Invalid address '{}'. Expected format: HOST:PORT", input))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storybook_generator=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting storybook-generator");

    let args = CliArgs::parse();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; story requests will fail until it is configured");
    }
    if config.fal_key.is_none() {
        warn!("FAL_KEY is not set; story requests will fail until it is configured");
    }

    let bind_addr = args.bind.unwrap_or(config.bind_addr);
    let app = Arc::new(App::from_config(&config));

    let listener = TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, server::router(app)).await?;

    Ok(())
}
