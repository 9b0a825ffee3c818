//! In-memory transport that records every call.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use walletd_client::{Params, Transport, TransportError};

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<(String, Params)>>,
    replies: HashMap<String, Value>,
}

impl RecordingTransport {
    pub fn new() -> Self { Self::default() }

    /// Answers `method` with `result`; other methods get `{}`.
    pub fn reply(mut self, method: &str, result: Value) -> Self {
        self.replies.insert(method.to_string(), result);
        self
    }

    pub fn calls(&self) -> Vec<(String, Params)> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Params of the only recorded call, checking its method name.
    pub fn single_call(&self, method: &str) -> Value {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {:?}", calls);
        assert_eq!(calls[0].0, method);
        Value::Object(calls[0].1.clone())
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, method: &str, params: &Params) -> Result<Value, TransportError> {
        self.calls.lock().expect("calls lock").push((method.to_string(), params.clone()));
        Ok(self.replies.get(method).cloned().unwrap_or_else(|| json!({})))
    }

    fn endpoint(&self) -> &str { "memory://walletd" }
}
