// SPDX-License-Identifier: CC0-1.0

//! walletd-rpc umbrella crate.
//!
//! Re-exports the pieces most callers need: [`WalletClient`] and its
//! parameter and result types, the [`HttpTransport`] channel, and the
//! [`Transport`] trait for plugging in other channels.
//!
//! ```no_run
//! use walletd_rpc::{Endpoint, WalletClient};
//!
//! # async fn demo() -> Result<(), walletd_rpc::TransportError> {
//! let wallet = WalletClient::connect(Endpoint::new("127.0.0.1", 8070));
//! let status = wallet.get_status().await?;
//! println!("{} / {}", status.block_count, status.known_block_count);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![doc(test(attr(warn(unused))))]

pub use client::*;
pub use http::HttpTransport;
pub use transport::{Credentials, JsonRpcRequest, JsonRpcResponse, RequestIdGenerator};

/// Miscellaneous metadata about the walletd-rpc workspace.
pub mod walletd_meta {
    /// Version string for the umbrella crate, as reported by Cargo.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}
