use std::io;

use tracing_subscriber::EnvFilter;
use wqi_mcp::ScorerServer;

fn main() -> io::Result<()> {
    // stdout carries the protocol; diagnostics go to stderr.
    let filter = EnvFilter::try_from_env("WQI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let server = ScorerServer::new();
    tracing::info!("wqi-scorerd listening on stdio");
    server.serve_stdio()
}
