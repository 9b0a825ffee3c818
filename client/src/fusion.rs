//! Fusion transactions, which merge many small outputs into fewer large ones.

use serde_json::json;

use crate::params::{to_params, FusionParams};
use crate::types::{FusionEstimate, TransactionHashReply};
use crate::{object, Result, WalletClient};

impl WalletClient {
    /// Consolidates small outputs into one. Returns the transaction hash.
    pub async fn send_fusion_transaction(&self, params: &FusionParams) -> Result<String> {
        let reply: TransactionHashReply =
            self.call("sendFusionTransaction", to_params(params)?).await?;
        Ok(reply.transaction_hash)
    }

    /// Counts outputs below `threshold` that a fusion could consolidate.
    /// An empty `addresses` slice covers the whole wallet.
    pub async fn estimate_fusion(
        &self,
        threshold: u64,
        addresses: &[String],
    ) -> Result<FusionEstimate> {
        let params = object(json!({"threshold": threshold, "addresses": addresses}));
        self.call("estimateFusion", params).await
    }
}
