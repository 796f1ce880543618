//! Blog posts server.
//!
//! Serves an in-memory list of blog posts over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request     ┌─────────┐    ┌──────────────┐    ┌────────────┐
//!     ──────────────────▶│  http   │───▶│   routing    │───▶│   posts    │
//!                        │ server  │    │ route table  │    │  handlers  │
//!                        └─────────┘    └──────────────┘    └─────┬──────┘
//!                                                                 │
//!                                                                 ▼
//!     Client Response    ┌─────────┐                        ┌────────────┐
//!     ◀──────────────────│response │◀───────────────────────│ post store │
//!                        │normalize│                        └────────────┘
//!                        └─────────┘
//! ```
//!
//! # Endpoints
//! - `GET /posts`
//! - `GET /posts/{id}`
//! - `POST /posts` (`content-type: application/json`)

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use blog_posts::config::load_or_default;
use blog_posts::lifecycle::signals::spawn_signal_handler;
use blog_posts::observability::{logging, metrics};
use blog_posts::{HttpServer, ServerError, Shutdown};

#[derive(Parser)]
#[command(name = "blog-posts")]
#[command(about = "In-memory blog posts HTTP server", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "BLOG_POSTS_CONFIG")]
    config: Option<PathBuf>,

    /// Listening port, overrides the configuration file.
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Log level, overrides the configuration file.
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_or_default(cli.config.as_deref()).map_err(ServerError::from)?;
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }

    logging::init_logging(&config.observability.log_level)?;

    tracing::info!("blog-posts v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        seed = config.store.seed,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr).map_err(ServerError::from)?;
    }

    let listener = TcpListener::bind(config.listener.bind_address())
        .await
        .map_err(ServerError::from)?;

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
