//! Quilt Planner Web Server Binary
//!
//! Serves the quilt REST API for a browser front end. The quilt starts
//! from the saved configuration (active color, calculator inputs, zoom).
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings (127.0.0.1:3001)
//! quilt-planner-web
//!
//! # Listen on all interfaces
//! quilt-planner-web --host 0.0.0.0 --port 8080
//! ```

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use tracing::warn;

use quilt_planner::config::Config;
use quilt_planner::logging::{init_logging, LogTarget};
use quilt_planner::web;

/// Quilt Planner Web Server - REST API for the quilt designer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&LogTarget::Stderr, args.verbose)?;

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {e:#}");
        Config::default()
    });

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .with_context(|| format!("Invalid address {}:{}", args.host, args.port))?;

    web::run_server(config, addr).await
}
