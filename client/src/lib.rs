#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `walletd-client` — Typed walletd Operations
//!
//! [`WalletClient`] turns friendly Rust arguments into walletd JSON-RPC
//! calls and decodes the answers into typed results.
//!
//! Every operation follows the same rules:
//!
//! - optional arguments that were not supplied are left out of the request
//!   entirely; an explicit, possibly empty, address list is always sent and
//!   means "all addresses" when empty
//! - `extra` payloads are hex-encoded before they are sent
//! - `payment_id` and `extra` are mutually exclusive; supplying both fails
//!   with [`TransportError::Validation`] before anything is sent
//! - daemon errors arrive as [`TransportError::Rpc`], never as an empty
//!   success value
//!
//! Amounts are integer minor units (divide by 1 000 000 000 for display);
//! they are forwarded unchanged.
//!
//! ## Example
//! ```no_run
//! use walletd_client::{Endpoint, TransactionParams, Transfer, WalletClient};
//!
//! # async fn demo() -> Result<(), walletd_client::TransportError> {
//! let wallet = WalletClient::connect(Endpoint::default());
//!
//! let balance = wallet.get_balance(None).await?;
//! println!("available: {}", balance.available_balance);
//!
//! let params = TransactionParams::new(vec![Transfer::new("dnx1...", 500)])
//!     .with_payment_id("f5d7b1e4...");
//! let hash = wallet.send_transaction(params).await?;
//! println!("sent {}", hash);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;

mod addresses;
mod fusion;
mod params;
mod transactions;
mod types;
mod wallet;

pub use params::{
    BlockRange, CreateAddressParams, FusionParams, TransactionFilter, TransactionParams, Transfer,
    DEFAULT_ANONYMITY, DEFAULT_FEE,
};
pub use transport::{DynTransport, Endpoint, Params, RpcErrorObject, Transport, TransportError};
pub use types::{
    Balance, FusionEstimate, SpendKeys, Status, TransactionHashesInBlock, TransactionRecord,
    TransactionState, TransactionTransfer, TransactionsInBlock, ValidatedAddress,
};

/// Result type for wallet operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Client for a walletd daemon.
///
/// The client holds nothing but a shared transport, so clones are cheap and
/// all of them talk over the same channel (and the same id sequence).
#[derive(Clone)]
pub struct WalletClient {
    transport: DynTransport,
}

impl std::fmt::Debug for WalletClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletClient").field("transport", &"<dyn Transport>").finish()
    }
}

impl WalletClient {
    /// Wraps any transport.
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self { transport: Arc::new(transport) }
    }

    /// Wraps an already shared transport.
    pub fn from_transport(transport: DynTransport) -> Self { Self { transport } }

    /// Client over HTTP, opening a fresh connection per call.
    pub fn connect(endpoint: Endpoint) -> Self { Self::new(http::HttpTransport::new(endpoint)) }

    /// The underlying transport.
    pub fn transport(&self) -> &DynTransport { &self.transport }

    /// Sends `method` with `params` and decodes the result as `R`.
    async fn call<R: DeserializeOwned>(&self, method: &str, params: Params) -> Result<R> {
        let value = self.transport.send(method, &params).await?;
        serde_json::from_value(value).map_err(|e| {
            tracing::warn!(method, "unexpected result shape: {}", e);
            TransportError::MalformedResponse(format!("{}: {}", method, e))
        })
    }

    /// Sends `method` and only checks that the daemon reported success.
    async fn call_unit(&self, method: &str, params: Params) -> Result<()> {
        self.transport.send(method, &params).await?;
        Ok(())
    }
}

/// Turns a `json!({...})` literal into named parameters.
fn object(value: Value) -> Params {
    match value {
        Value::Object(map) => map,
        _ => Params::new(),
    }
}
