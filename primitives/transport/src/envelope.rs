//! JSON-RPC 2.0 frames exchanged with walletd.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use serde_json::Value;

use crate::{Params, RpcErrorObject, TransportError};

/// Protocol version marker sent with every request.
pub const JSONRPC_VERSION: &str = "2.0";

/// A single JSON-RPC request frame.
#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<'a> {
    /// Method name, e.g. `getBalance`.
    pub method: &'a str,
    /// Named parameters.
    pub params: &'a Params,
    /// Correlation id.
    pub id: u64,
    /// Always [`JSONRPC_VERSION`].
    pub jsonrpc: &'static str,
}

impl<'a> JsonRpcRequest<'a> {
    /// Builds a request frame for `method` with the given id.
    pub fn new(method: &'a str, params: &'a Params, id: u64) -> Self {
        Self { method, params, id, jsonrpc: JSONRPC_VERSION }
    }
}

/// Minimal structure representing a JSON-RPC response envelope.
///
/// Exactly one of `result` and `error` is expected to be present; anything
/// else is reported as [`TransportError::MalformedResponse`].
#[derive(Debug)]
pub struct JsonRpcResponse {
    /// The value returned by the RPC call, if successful.
    pub result: Option<Value>,
    /// The error object returned by the server, if any.
    pub error: Option<RpcErrorObject>,
    /// The identifier correlating request and response.
    pub id: Value,
}

impl JsonRpcResponse {
    /// Parses a raw response body.
    pub fn parse(body: &str) -> Result<Self, TransportError> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            TransportError::MalformedResponse(format!("{} (body: {})", e, body))
        })?;
        Self::from_value(value)
    }

    /// Interprets an already decoded JSON document as a response envelope.
    pub fn from_value(value: Value) -> Result<Self, TransportError> {
        let Value::Object(mut obj) = value else {
            return Err(TransportError::MalformedResponse(format!(
                "expected a JSON object, got {}",
                value
            )));
        };

        let id = obj.remove("id").unwrap_or(Value::Null);
        let error = match obj.remove("error") {
            None | Some(Value::Null) => None,
            Some(raw) => Some(serde_json::from_value::<RpcErrorObject>(raw.clone()).map_err(
                |e| TransportError::MalformedResponse(format!("invalid error object {}: {}", raw, e)),
            )?),
        };
        let result = obj.remove("result");

        if error.is_none() && result.is_none() {
            return Err(TransportError::MalformedResponse(
                "response carries neither result nor error".to_string(),
            ));
        }

        Ok(Self { result, error, id })
    }

    /// Converts the envelope into the call outcome.
    pub fn into_result(self) -> Result<Value, TransportError> {
        match (self.error, self.result) {
            (Some(error), _) => Err(TransportError::Rpc(error)),
            (None, Some(result)) => Ok(result),
            (None, None) => Err(TransportError::MalformedResponse(
                "response carries neither result nor error".to_string(),
            )),
        }
    }
}

/// Hands out request ids: 1, 2, 3, … without gaps or repeats.
///
/// The increment is a single atomic operation, so concurrent callers sharing
/// one generator never observe the same id.
#[derive(Debug, Default)]
pub struct RequestIdGenerator {
    last: AtomicU64,
}

impl RequestIdGenerator {
    /// A generator whose first id is 1.
    pub fn new() -> Self { Self::default() }

    /// Allocates the next id.
    pub fn next_id(&self) -> u64 { self.last.fetch_add(1, Ordering::SeqCst) + 1 }

    /// The most recently allocated id, or 0 if none has been handed out.
    pub fn last_id(&self) -> u64 { self.last.load(Ordering::SeqCst) }
}
