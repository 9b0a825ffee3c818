#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! walletd Harness
//!
//! A small HTTP server that speaks walletd's JSON-RPC dialect. Tests start a
//! [`MockDaemon`] with a responder closure, point a client at
//! [`MockDaemon::endpoint`], and afterwards inspect every request the daemon
//! saw. The `walletd-harness` binary serves [`canned_walletd`] for manual
//! experiments.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use serde_json::{json, Value};
use thiserror::Error;
use tokio::task::JoinHandle;
use transport::{get_random_free_port, Endpoint};
use warp::http::StatusCode;
use warp::Filter;

/// Errors that can occur while starting the harness
#[derive(Debug, Error)]
pub enum HarnessError {
    /// No port could be reserved
    #[error("could not reserve a port: {0}")]
    Port(#[from] std::io::Error),

    /// The server never accepted connections
    #[error("server on {0} did not come up")]
    NotListening(SocketAddr),
}

/// What the daemon answers to one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `{"id": <request id>, "result": <value>}`
    Result(Value),
    /// `{"id": <request id>, "error": {"code", "message", "data"?}}`
    Error {
        /// JSON-RPC error code
        code: i64,
        /// Error message
        message: String,
        /// Optional detail
        data: Option<Value>,
    },
    /// The body is sent verbatim.
    Raw(String),
    /// Wait before answering with the inner reply.
    Delayed(Duration, Box<Reply>),
    /// Answer with the inner reply under this HTTP status instead of 200.
    Status(u16, Box<Reply>),
}

impl Reply {
    /// Shorthand for an error reply without data.
    pub fn error(code: i64, message: impl Into<String>) -> Self {
        Reply::Error { code, message: message.into(), data: None }
    }
}

/// One request as observed by the daemon.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request path, e.g. `/json_rpc`
    pub path: String,
    /// `Authorization` header, if any
    pub authorization: Option<String>,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Parsed body; a JSON string holding the raw text if it was not JSON
    pub body: Value,
}

impl RecordedRequest {
    /// The JSON-RPC method name.
    pub fn method(&self) -> Option<&str> { self.body.get("method").and_then(Value::as_str) }

    /// The JSON-RPC id.
    pub fn id(&self) -> Option<u64> { self.body.get("id").and_then(Value::as_u64) }

    /// The JSON-RPC params object.
    pub fn params(&self) -> Option<&serde_json::Map<String, Value>> {
        self.body.get("params").and_then(Value::as_object)
    }
}

type Responder = dyn Fn(&Value) -> Reply + Send + Sync;

struct State {
    responder: Box<Responder>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// A running mock daemon. The server stops when this value is dropped.
pub struct MockDaemon {
    addr: SocketAddr,
    state: Arc<State>,
    task: JoinHandle<()>,
}

impl MockDaemon {
    /// Starts a daemon on a free loopback port.
    ///
    /// `responder` sees each parsed request body and decides the reply. The
    /// daemon serves every path, so endpoints with or without a prefix reach
    /// it.
    pub async fn start<F>(responder: F) -> Result<Self, HarnessError>
    where
        F: Fn(&Value) -> Reply + Send + Sync + 'static,
    {
        Self::start_on(get_random_free_port()?, responder).await
    }

    /// Starts a daemon on a specific loopback port.
    pub async fn start_on<F>(port: u16, responder: F) -> Result<Self, HarnessError>
    where
        F: Fn(&Value) -> Reply + Send + Sync + 'static,
    {
        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let state =
            Arc::new(State { responder: Box::new(responder), requests: Mutex::new(Vec::new()) });

        let routes = create_routes(Arc::clone(&state));
        let task = tokio::spawn(async move {
            warp::serve(routes).run(addr).await;
        });

        for _ in 0..100 {
            if tokio::net::TcpStream::connect(addr).await.is_ok() {
                tracing::debug!(%addr, "mock walletd listening");
                return Ok(Self { addr, state, task });
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        task.abort();
        Err(HarnessError::NotListening(addr))
    }

    /// Starts a daemon that answers every request with the same reply.
    pub async fn replying(reply: Reply) -> Result<Self, HarnessError> {
        Self::start(move |_| reply.clone()).await
    }

    /// Socket address the daemon listens on.
    pub fn addr(&self) -> SocketAddr { self.addr }

    /// Endpoint for this daemon with the default `json_rpc` prefix.
    pub fn endpoint(&self) -> Endpoint { Endpoint::new("127.0.0.1", self.addr.port()) }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        match self.state.requests.lock() {
            Ok(requests) => requests.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) { self.task.abort(); }
}

/// Create the HTTP server routes
fn create_routes(
    state: Arc<State>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let state_filter = warp::any().map(move || Arc::clone(&state));

    warp::post()
        .and(state_filter)
        .and(warp::path::full())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::header::optional::<String>("content-type"))
        .and(warp::body::bytes())
        .and_then(handle_rpc_request)
}

/// Handle RPC requests
async fn handle_rpc_request(
    state: Arc<State>,
    path: warp::path::FullPath,
    authorization: Option<String>,
    content_type: Option<String>,
    body: Bytes,
) -> Result<impl warp::Reply, warp::Rejection> {
    let parsed = serde_json::from_slice::<Value>(&body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()));

    let recorded = RecordedRequest {
        path: path.as_str().to_string(),
        authorization,
        content_type,
        body: parsed.clone(),
    };
    match state.requests.lock() {
        Ok(mut requests) => requests.push(recorded),
        Err(poisoned) => poisoned.into_inner().push(recorded),
    }

    let reply = if parsed.is_object() {
        (state.responder)(&parsed)
    } else {
        Reply::error(-32700, "Parse error")
    };
    let id = parsed.get("id").cloned().unwrap_or(Value::Null);
    let (status, text) = render(reply, id).await;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    Ok(warp::reply::with_status(
        warp::reply::with_header(text, "content-type", "application/json"),
        status,
    ))
}

async fn render(mut reply: Reply, id: Value) -> (u16, String) {
    let mut status = 200;
    loop {
        match reply {
            Reply::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                reply = *inner;
            }
            Reply::Status(code, inner) => {
                status = code;
                reply = *inner;
            }
            Reply::Raw(text) => return (status, text),
            Reply::Result(result) => {
                return (status, json!({"jsonrpc": "2.0", "id": id, "result": result}).to_string())
            }
            Reply::Error { code, message, data } => {
                let mut error = json!({"code": code, "message": message});
                if let Some(data) = data {
                    error["data"] = data;
                }
                return (status, json!({"jsonrpc": "2.0", "id": id, "error": error}).to_string());
            }
        }
    }
}

/// Canned answers for the walletd methods, used by the standalone binary.
pub fn canned_walletd(request: &Value) -> Reply {
    let method = request.get("method").and_then(Value::as_str).unwrap_or_default();
    let params = request.get("params").cloned().unwrap_or_else(|| json!({}));
    let address = "dnx1harness0000000000000000000000000000000000000000000000000000000000000";

    match method {
        "save" | "reset" | "export" | "deleteAddress" | "sendDelayedTransaction"
        | "deleteDelayedTransaction" => Reply::Result(json!({})),
        "getStatus" => Reply::Result(json!({
            "blockCount": 274124,
            "knownBlockCount": 274124,
            "lastBlockHash": "7a5b1f7c02f54df7d0b1c1fb4a0c3c32c2d26a7dbf3bc0b1e1f2a7f3f06b8d10",
            "peerCount": 8
        })),
        "getBalance" => Reply::Result(json!({"availableBalance": 10000000000u64, "lockedAmount": 0})),
        "getAddresses" => Reply::Result(json!({"addresses": [address]})),
        "createAddress" => Reply::Result(json!({"address": address})),
        "createAddressList" => Reply::Result(json!({"addresses": [address]})),
        "getViewKey" => Reply::Result(json!({
            "viewSecretKey": "f66997b99f9a8444417f09b4bca710e7afe9285d581a5aa641cd4ac0b29f5d00"
        })),
        "getSpendKeys" => Reply::Result(json!({
            "spendPublicKey": "3550a41b004520030941183b7f3e5ec075042cdde492044ea5064e4a1d99a3ba",
            "spendSecretKey": "f66997b99f9a8444417f09b4bca710e7afe9285d581a5aa641cd4ac0b29f5d00"
        })),
        "getMnemonicSeed" => Reply::Result(json!({"mnemonicSeed": "harness seed words"})),
        "validateAddress" => Reply::Result(json!({
            "address": params.get("address").cloned().unwrap_or(Value::Null),
            "isvalid": true,
            "spendPublicKey": "3550a41b004520030941183b7f3e5ec075042cdde492044ea5064e4a1d99a3ba",
            "viewPublicKey": "1f8c3c5e0b3bb2b62a1a8a8e9f4d2fd1d12e1bb0c5f5b6d9c2a1f0e9d8c7b6a5"
        })),
        "sendTransaction" | "createDelayedTransaction" | "sendFusionTransaction" => {
            Reply::Result(json!({
                "transactionHash": "1b87a4f3c8e7d6b5a4938271605f4e3d2c1b0a9f8e7d6c5b4a39281706f5e4d3"
            }))
        }
        "getDelayedTransactionHashes" | "getUnconfirmedTransactionHashes" => {
            Reply::Result(json!({"transactionHashes": []}))
        }
        "estimateFusion" => Reply::Result(json!({"fusionReadyCount": 0, "totalOutputCount": 3})),
        "createIntegratedAddress" => {
            Reply::Result(json!({"integratedAddress": format!("{}integrated", address)}))
        }
        "getBlockHashes" => {
            let count = params.get("blockCount").and_then(Value::as_u64).unwrap_or_default();
            let hashes: Vec<String> = (0..count).map(|i| format!("{:064x}", i + 1)).collect();
            Reply::Result(json!({"blockHashes": hashes}))
        }
        "getTransaction" => Reply::Result(json!({
            "transaction": {
                "transactionHash": params.get("transactionHash").cloned().unwrap_or(Value::Null),
                "blockIndex": 274120,
                "timestamp": 1700000000,
                "isBase": false,
                "unlockTime": 0,
                "amount": 500000000,
                "fee": 5000000,
                "extra": "",
                "paymentId": "",
                "state": 0,
                "transfers": [{"address": address, "amount": 500000000, "type": 0}]
            }
        })),
        "getTransactions" | "getTransactionHashes" => Reply::Result(json!({"items": []})),
        _ => Reply::error(-32601, format!("Unknown method: {}", method)),
    }
}
