#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `walletd-transport` — Foundational Communication Layer
//!
//! This crate defines the **core transport abstraction** used by every
//! walletd-rpc crate.
//!
//! It provides the interface (`Transport` trait) through which a JSON-RPC
//! method call reaches a walletd daemon, together with the wire envelopes,
//! the endpoint description and the error taxonomy every caller sees.
//!
//! ## Core Concepts
//!
//! ### `Transport` Trait
//! Defines how a single call is sent (`send`), returning the deserialized
//! [`serde_json::Value`] of the response `result` field. The HTTP backend in
//! `walletd-http` implements it; tests implement it in memory.
//!
//! ### `TransportError`
//! Enumerates the four classes of failure a caller must be able to tell
//! apart: local validation, HTTP transport, daemon-reported RPC errors and
//! malformed responses. Nothing is swallowed; every failure is a value.
//!
//! ### `DynTransport`
//! A type-erased (`Arc<dyn Transport>`) handle so clients can share one
//! channel without generic parameters.
//!
//! ### Envelopes
//! [`JsonRpcRequest`] and [`JsonRpcResponse`] model the JSON-RPC 2.0 frames
//! exchanged with walletd, and [`RequestIdGenerator`] hands out the
//! strictly increasing request ids.
//!
//! ## Example
//! ```no_run
//! use transport::{DynTransport, Params, TransportError};
//!
//! async fn demo(transport: DynTransport) -> Result<(), TransportError> {
//!     let status = transport.send("getStatus", &Params::new()).await?;
//!     println!("height = {}", status["blockCount"]);
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

mod endpoint;
mod envelope;

pub use endpoint::{
    Credentials, Endpoint, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PREFIX, DEFAULT_SCHEME,
};
pub use envelope::{JsonRpcRequest, JsonRpcResponse, RequestIdGenerator, JSONRPC_VERSION};

/// Type alias for structured error handling in transport operations.
pub type Result<T> = std::result::Result<T, TransportError>;

/// Named JSON-RPC parameters, as walletd expects them.
pub type Params = serde_json::Map<String, Value>;

/// The error object carried by a JSON-RPC error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcErrorObject {
    /// Numeric error code (e.g. `-32000` for walletd application errors).
    pub code: i64,
    /// Human readable error message.
    pub message: String,
    /// Optional structured detail, e.g. `{"application_code": 15}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl fmt::Display for RpcErrorObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, " data: {}", data)?;
        }
        Ok(())
    }
}

/// Canonical error type for all transport implementations and the wallet
/// client built on top of them.
///
/// Each variant corresponds to a distinct failure mode, so callers can
/// decide for themselves whether a retry makes sense.
#[derive(thiserror::Error, Debug)]
pub enum TransportError {
    /// A locally detected contract violation. No request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An HTTP-level failure (connection refused, timeout, interrupted body).
    #[error("HTTP transport error: {0}")]
    Http(String),

    /// The daemon returned an explicit JSON-RPC error object.
    #[error("RPC error: {0}")]
    Rpc(RpcErrorObject),

    /// The response body was not a JSON-RPC envelope of the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl TransportError {
    /// Returns the daemon error object if this is an RPC error.
    pub fn rpc_error(&self) -> Option<&RpcErrorObject> {
        match self {
            TransportError::Rpc(obj) => Some(obj),
            _ => None,
        }
    }

    /// True if the failure was detected before any request left the process.
    pub fn is_validation(&self) -> bool { matches!(self, TransportError::Validation(_)) }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self { TransportError::MalformedResponse(err.to_string()) }
}

/// The base transport trait for single-call delivery.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a single RPC call.
    ///
    /// The request is identified by its `method` name and a mapping of named
    /// parameters. Implementations return the value of the `"result"` field
    /// from the corresponding JSON-RPC response, or the appropriate
    /// [`TransportError`]. Calls are at-most-once: implementations never
    /// retry on their own.
    async fn send(&self, method: &str, params: &Params) -> Result<Value>;

    /// Returns the configured endpoint or connection descriptor.
    ///
    /// For network transports, this is the base URL. For in-memory
    /// transports, it may be a symbolic name.
    fn endpoint(&self) -> &str;
}

/// Type alias for a shared, dynamically dispatched transport instance.
///
/// ```
/// use transport::DynTransport;
///
/// fn use_transport(t: DynTransport) {
///     println!("Using endpoint: {}", t.endpoint());
/// }
/// ```
pub type DynTransport = Arc<dyn Transport>;

/// Gets a random free port assigned by the OS.
///
/// This function binds to `127.0.0.1:0`, which causes the OS to assign
/// an available port. The listener is then dropped and the port number
/// is returned.
///
/// # Errors
///
/// Returns an error if binding to the address fails.
pub fn get_random_free_port() -> std::io::Result<u16> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
