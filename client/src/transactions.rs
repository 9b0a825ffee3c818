//! Transaction history, sending and delayed transactions.

use serde_json::json;

use crate::params::{to_params, TransactionFilter, TransactionParams};
use crate::types::{
    BlockHashesReply, ItemsReply, TransactionHashReply, TransactionHashesInBlock,
    TransactionHashesReply, TransactionRecord, TransactionReply, TransactionsInBlock,
};
use crate::{object, Params, Result, WalletClient};

impl WalletClient {
    /// Hashes of transactions still in the pool.
    ///
    /// An empty `addresses` slice covers the whole wallet; it is sent either
    /// way.
    pub async fn get_unconfirmed_transaction_hashes(
        &self,
        addresses: &[String],
    ) -> Result<Vec<String>> {
        let params = object(json!({"addresses": addresses}));
        let reply: TransactionHashesReply =
            self.call("getUnconfirmedTransactionHashes", params).await?;
        Ok(reply.transaction_hashes)
    }

    /// Hashes of `block_count` blocks starting at `first_block_index`.
    pub async fn get_block_hashes(
        &self,
        first_block_index: u64,
        block_count: u64,
    ) -> Result<Vec<String>> {
        let params =
            object(json!({"firstBlockIndex": first_block_index, "blockCount": block_count}));
        let reply: BlockHashesReply = self.call("getBlockHashes", params).await?;
        Ok(reply.block_hashes)
    }

    /// Details of one transaction.
    pub async fn get_transaction(&self, transaction_hash: &str) -> Result<TransactionRecord> {
        let params = object(json!({"transactionHash": transaction_hash}));
        let reply: TransactionReply = self.call("getTransaction", params).await?;
        Ok(reply.transaction)
    }

    /// Transactions matching `filter`, grouped by block.
    pub async fn get_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionsInBlock>> {
        let reply: ItemsReply<TransactionsInBlock> =
            self.call("getTransactions", to_params(filter)?).await?;
        Ok(reply.items)
    }

    /// Like [`get_transactions`](Self::get_transactions), hashes only.
    pub async fn get_transaction_hashes(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<TransactionHashesInBlock>> {
        let reply: ItemsReply<TransactionHashesInBlock> =
            self.call("getTransactionHashes", to_params(filter)?).await?;
        Ok(reply.items)
    }

    /// Creates, signs and relays a transaction. Returns its hash.
    ///
    /// # Errors
    /// [`TransportError::Validation`](crate::TransportError::Validation),
    /// without contacting the daemon, if `params` has no transfers or sets
    /// both a payment id and an extra payload.
    pub async fn send_transaction(&self, params: TransactionParams) -> Result<String> {
        let params = params.to_params("sourceAddresses")?;
        let reply: TransactionHashReply = self.call("sendTransaction", params).await?;
        Ok(reply.transaction_hash)
    }

    /// Hashes of transactions created but not yet relayed.
    pub async fn get_delayed_transaction_hashes(&self) -> Result<Vec<String>> {
        let reply: TransactionHashesReply =
            self.call("getDelayedTransactionHashes", Params::new()).await?;
        Ok(reply.transaction_hashes)
    }

    /// Creates and signs a transaction without relaying it. Returns its hash.
    ///
    /// Same contract as [`send_transaction`](Self::send_transaction).
    pub async fn create_delayed_transaction(&self, params: TransactionParams) -> Result<String> {
        let params = params.to_params("addresses")?;
        let reply: TransactionHashReply = self.call("createDelayedTransaction", params).await?;
        Ok(reply.transaction_hash)
    }

    /// Relays a delayed transaction.
    pub async fn send_delayed_transaction(&self, transaction_hash: &str) -> Result<()> {
        let params = object(json!({"transactionHash": transaction_hash}));
        self.call_unit("sendDelayedTransaction", params).await
    }

    /// Discards a delayed transaction.
    pub async fn delete_delayed_transaction(&self, transaction_hash: &str) -> Result<()> {
        let params = object(json!({"transactionHash": transaction_hash}));
        self.call_unit("deleteDelayedTransaction", params).await
    }
}
