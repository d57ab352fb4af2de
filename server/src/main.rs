use anyhow::{Context, Result};
use clap::Parser;
use search_server::build_app_from_dir;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Directory of pages to index at startup
    #[arg(long, default_value = "input_pages")]
    input: PathBuf,
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
    // Blocking build completes before the listener accepts any query.
    let app = build_app_from_dir(&args.input)?;

    let listener = TcpListener::bind((args.host.as_str(), args.port))
        .await
        .with_context(|| format!("binding {}:{}", args.host, args.port))?;
    tracing::info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
