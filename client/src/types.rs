//! Typed results of wallet operations.
//!
//! walletd names fields in camelCase. Structures the daemon is known to
//! extend between versions keep unrecognised fields in `other`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wallet balance in minor units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Balance {
    /// Spendable now
    pub available_balance: u64,
    /// Locked until outputs mature
    pub locked_amount: u64,
    /// Fields this version does not know about
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Synchronisation state of the wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Status {
    /// Blocks processed by the wallet
    pub block_count: u64,
    /// Blocks known to the network
    pub known_block_count: u64,
    /// Hash of the last processed block
    pub last_block_hash: String,
    /// Connected peers
    pub peer_count: u64,
    /// Fields this version does not know about
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Status {
    /// True once the wallet has caught up with the network.
    pub fn is_synced(&self) -> bool { self.block_count >= self.known_block_count }
}

/// Spend key pair of one address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendKeys {
    /// Hex public spend key
    pub spend_public_key: String,
    /// Hex secret spend key
    pub spend_secret_key: String,
}

/// Outcome of `validate_address`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    /// The address as checked
    #[serde(default)]
    pub address: String,
    /// Whether the address is well formed
    pub isvalid: bool,
    /// Public spend key encoded in the address
    #[serde(default)]
    pub spend_public_key: String,
    /// Public view key encoded in the address
    #[serde(default)]
    pub view_public_key: String,
}

/// How much a fusion transaction could consolidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionEstimate {
    /// Outputs below the threshold that can be fused
    pub fusion_ready_count: u64,
    /// All outputs considered
    pub total_output_count: u64,
}

/// Lifecycle of a transaction, as walletd numbers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// In a block
    Succeeded,
    /// Relay failed
    Failed,
    /// Dropped from the pool
    Cancelled,
    /// Created but not relayed
    Created,
    /// Deleted before relay
    Deleted,
}

impl TransactionState {
    /// Maps walletd's numeric state.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Succeeded),
            1 => Some(Self::Failed),
            2 => Some(Self::Cancelled),
            3 => Some(Self::Created),
            4 => Some(Self::Deleted),
            _ => None,
        }
    }
}

/// One movement of funds inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionTransfer {
    /// Address involved; empty for outputs the wallet cannot attribute
    #[serde(default)]
    pub address: String,
    /// Signed amount; negative when funds leave the wallet
    pub amount: i64,
    /// walletd transfer type (0 usual, 1 donation, 2 change)
    #[serde(rename = "type", default)]
    pub kind: u8,
}

/// A transaction as reported by walletd.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Hex transaction hash
    pub transaction_hash: String,
    /// Containing block, or `u32::MAX` while unconfirmed
    pub block_index: u64,
    /// Unix time the block was mined; 0 while unconfirmed
    pub timestamp: u64,
    /// Coinbase transaction
    pub is_base: bool,
    /// Block height or timestamp before which outputs stay locked
    pub unlock_time: u64,
    /// Net effect on the wallet; negative for outgoing
    pub amount: i64,
    /// Fee paid, in minor units
    pub fee: u64,
    /// Hex-encoded extra field
    #[serde(default)]
    pub extra: String,
    /// Payment id carried in the extra field, if any
    #[serde(default)]
    pub payment_id: String,
    /// Raw state code, see [`TransactionRecord::state`]
    #[serde(rename = "state")]
    pub state_code: u8,
    /// Per-address movements
    #[serde(default)]
    pub transfers: Vec<TransactionTransfer>,
    /// Fields this version does not know about
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl TransactionRecord {
    /// Decoded state, if walletd sent a known code.
    pub fn state(&self) -> Option<TransactionState> { TransactionState::from_code(self.state_code) }
}

/// Transactions of one block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsInBlock {
    /// Hash of the block
    pub block_hash: String,
    /// Wallet transactions it contains
    pub transactions: Vec<TransactionRecord>,
}

/// Transaction hashes of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionHashesInBlock {
    /// Hash of the block
    pub block_hash: String,
    /// Hashes of the wallet transactions it contains
    pub transaction_hashes: Vec<String>,
}

// Single-field envelopes walletd wraps its answers in.

#[derive(Deserialize)]
pub(crate) struct AddressReply {
    pub address: String,
}

#[derive(Deserialize)]
pub(crate) struct AddressesReply {
    pub addresses: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ViewKeyReply {
    pub view_secret_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionHashReply {
    pub transaction_hash: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TransactionHashesReply {
    pub transaction_hashes: Vec<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BlockHashesReply {
    pub block_hashes: Vec<String>,
}

#[derive(Deserialize)]
pub(crate) struct TransactionReply {
    pub transaction: TransactionRecord,
}

#[derive(Deserialize)]
pub(crate) struct ItemsReply<T> {
    pub items: Vec<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MnemonicSeedReply {
    pub mnemonic_seed: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct IntegratedAddressReply {
    pub integrated_address: String,
}
