#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! walletd Harness
//!
//! Serves canned walletd JSON-RPC answers so the CLI and client can be
//! exercised without a synced wallet daemon.

use walletd_harness::{canned_walletd, MockDaemon};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    walletd_logging::init("info", false);

    let port: u16 = std::env::var("WALLETD_HARNESS_PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(transport::DEFAULT_PORT);

    let daemon = MockDaemon::start_on(port, canned_walletd).await?;

    println!("walletd harness listening on {}", daemon.addr());
    println!("RPC endpoint: {}", daemon.endpoint().base_url());
    println!("Press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;
    for request in daemon.requests() {
        tracing::info!(method = request.method().unwrap_or("?"), id = ?request.id(), "served");
    }

    Ok(())
}
