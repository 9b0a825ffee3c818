#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! # `walletd-http` — HTTP Transport Backend for walletd-rpc
//!
//! This crate provides the HTTP implementation of the
//! [`transport::Transport`] trait: the channel every wallet operation is
//! sent through.
//!
//! ## Overview
//!
//! - Implements [`HttpTransport`], a thin wrapper over [`reqwest::Client`]
//! - Composes the base URL once from an [`Endpoint`]; credentials travel as
//!   URL userinfo and are sent as HTTP basic auth
//! - Allocates strictly increasing request ids, safe under concurrent use
//! - Uses a caller-supplied shared client, or a fresh client scoped to a
//!   single call
//!
//! ## Example
//! ```no_run
//! use transport::{Endpoint, Params, Transport};
//! use walletd_http::HttpTransport;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let endpoint = Endpoint::default().with_credentials("rpcuser", "rpcpassword");
//! let transport = HttpTransport::new(endpoint);
//!
//! let status = transport.send("getStatus", &Params::new()).await.unwrap();
//! println!("{:#?}", status);
//! # });
//! ```

use async_trait::async_trait;
use serde_json::Value;
use transport::{
    Endpoint, JsonRpcRequest, JsonRpcResponse, Params, RequestIdGenerator, Transport,
    TransportError,
};

/// A concrete implementation of the [`Transport`] trait using HTTP.
///
/// `HttpTransport` performs no result typing. It sends one JSON-RPC request
/// per call and returns the `result` field as a [`serde_json::Value`].
/// Failures are normalized into [`TransportError`] variants:
///
/// - connection, timeout and body-read failures are [`TransportError::Http`]
/// - a daemon error object is [`TransportError::Rpc`], intact
/// - a body that is not a JSON-RPC envelope is
///   [`TransportError::MalformedResponse`]
///
/// Calls are never retried.
pub struct HttpTransport {
    /// Connection target this transport was built from.
    target: Endpoint,
    /// `scheme://[user:pass@]host:port[/prefix]`, composed once.
    url: String,
    /// Shared client, if the caller supplied one.
    client: Option<reqwest::Client>,
    /// Request id allocator.
    ids: RequestIdGenerator,
}

impl HttpTransport {
    /// Constructs a transport that opens a fresh connection for every call.
    ///
    /// # Example
    /// ```
    /// use transport::{Endpoint, Transport};
    /// use walletd_http::HttpTransport;
    ///
    /// let transport = HttpTransport::new(Endpoint::new("127.0.0.1", 8070));
    /// assert_eq!(transport.endpoint(), "http://127.0.0.1:8070/json_rpc");
    /// ```
    pub fn new(endpoint: Endpoint) -> Self {
        let url = endpoint.base_url();
        logging::trace("HTTP", &format!("→ initializing HTTP transport for {}", endpoint.host()));
        Self { target: endpoint, url, client: None, ids: RequestIdGenerator::new() }
    }

    /// Constructs a transport that sends every call over `client`.
    ///
    /// Connection pooling is then up to the client; the transport only
    /// borrows it per call.
    pub fn with_client(endpoint: Endpoint, client: reqwest::Client) -> Self {
        Self { client: Some(client), ..Self::new(endpoint) }
    }

    /// The endpoint this transport targets.
    pub fn target(&self) -> &Endpoint { &self.target }

    /// The most recently allocated request id, or 0 before the first call.
    pub fn last_id(&self) -> u64 { self.ids.last_id() }

    /// True if calls go through a caller-supplied client.
    pub fn has_shared_client(&self) -> bool { self.client.is_some() }

    async fn post(
        &self,
        client: &reqwest::Client,
        request: &JsonRpcRequest<'_>,
    ) -> Result<Value, TransportError> {
        let resp = client.post(&self.url).json(request).send().await.map_err(|e| {
            tracing::error!(
                method = request.method,
                id = request.id,
                "HTTP Transport - Request failed: {}",
                e
            );
            TransportError::Http(e.to_string())
        })?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| {
            tracing::error!(
                method = request.method,
                id = request.id,
                "HTTP Transport - Failed to read body: {}",
                e
            );
            TransportError::Http(e.to_string())
        })?;

        let response = JsonRpcResponse::parse(&text).map_err(|e| match e {
            TransportError::MalformedResponse(msg) if !status.is_success() => {
                tracing::error!(
                    method = request.method,
                    id = request.id,
                    %status,
                    "HTTP Transport - Unexpected body"
                );
                TransportError::MalformedResponse(format!("HTTP {}: {}", status, msg))
            }
            other => other,
        })?;

        if let Some(got) = response.id.as_u64() {
            if got != request.id {
                return Err(TransportError::MalformedResponse(format!(
                    "response id {} does not match request id {}",
                    got, request.id
                )));
            }
        }

        response.into_result().map_err(|e| {
            if let TransportError::Rpc(obj) = &e {
                tracing::warn!(
                    method = request.method,
                    id = request.id,
                    code = obj.code,
                    "daemon returned error: {}",
                    obj.message
                );
            }
            e
        })
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("target", &self.target)
            .field("shared_client", &self.client.is_some())
            .field("last_id", &self.ids.last_id())
            .finish()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    /// Sends a single JSON-RPC request and returns its `result` field as JSON.
    ///
    /// The id is allocated before any I/O happens, so a failed or cancelled
    /// call still consumes it. Without a shared client, the client created
    /// for this call is dropped on every exit path, closing its connection.
    ///
    /// # Errors
    /// - [`TransportError::Http`] if the request cannot be sent or its body
    ///   cannot be read
    /// - [`TransportError::Rpc`] if the daemon returns an error object
    /// - [`TransportError::MalformedResponse`] if the body is not a valid
    ///   JSON-RPC envelope for this request, whatever the HTTP status; the
    ///   status is named in the message when it is not 2xx
    async fn send(&self, method: &str, params: &Params) -> Result<Value, TransportError> {
        let id = self.ids.next_id();
        logging::trace(
            "HTTP",
            &format!("→ POST {} (method: {}, id: {})", self.target.host(), method, id),
        );
        let request = JsonRpcRequest::new(method, params, id);

        let result = match &self.client {
            Some(client) => self.post(client, &request).await,
            None => {
                let client = reqwest::Client::builder()
                    .build()
                    .map_err(|e| TransportError::Http(e.to_string()))?;
                self.post(&client, &request).await
            }
        };

        if result.is_ok() {
            tracing::debug!(method, id, "rpc call succeeded");
        }
        result
    }

    /// Returns the composed base URL.
    fn endpoint(&self) -> &str { &self.url }
}
