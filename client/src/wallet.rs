//! Whole-wallet operations: persistence, resync, balance and status.

use serde_json::json;

use crate::types::{Balance, Status, ViewKeyReply};
use crate::{object, Params, Result, WalletClient};

impl WalletClient {
    /// Persists the wallet container to disk.
    pub async fn save(&self) -> Result<()> { self.call_unit("save", Params::new()).await }

    /// Resynchronises the wallet from the start of the chain.
    ///
    /// With `view_secret_key`, the daemon instead replaces the container with
    /// a new wallet for that key and creates an address for it.
    pub async fn reset(&self, view_secret_key: Option<&str>) -> Result<()> {
        let params = match view_secret_key {
            Some(key) => object(json!({"viewSecretKey": key})),
            None => Params::new(),
        };
        self.call_unit("reset", params).await
    }

    /// Writes a copy of the wallet container to `file_name` on the daemon host.
    pub async fn export(&self, file_name: &str) -> Result<()> {
        self.call_unit("export", object(json!({"fileName": file_name}))).await
    }

    /// Balance of one address, or of the whole wallet when `address` is `None`.
    pub async fn get_balance(&self, address: Option<&str>) -> Result<Balance> {
        let params = match address {
            Some(address) => object(json!({"address": address})),
            None => Params::new(),
        };
        self.call("getBalance", params).await
    }

    /// Synchronisation status.
    pub async fn get_status(&self) -> Result<Status> { self.call("getStatus", Params::new()).await }

    /// The wallet's private view key.
    pub async fn get_view_key(&self) -> Result<String> {
        let reply: ViewKeyReply = self.call("getViewKey", Params::new()).await?;
        Ok(reply.view_secret_key)
    }
}
