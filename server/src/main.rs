use anyhow::Result;
use axum::Router;
use clap::Parser;
use gamesearch_core::EngineConfig;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Corpus directory or file
    #[arg(long, default_value = "./videogames")]
    corpus: String,
    /// JSON engine config
    #[arg(long)]
    config: Option<String>,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };
    let app: Router = build_app(&args.corpus, config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
