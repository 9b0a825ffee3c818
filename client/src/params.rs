//! Parameter structures for the option-heavy operations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use transport::{Params, TransportError};

/// Mixin count used when none is given.
pub const DEFAULT_ANONYMITY: u32 = 3;
/// Default fee in minor units (0.005 coin).
pub const DEFAULT_FEE: u64 = 5_000_000;

/// One destination of a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Receiving address
    pub address: String,
    /// Amount in minor units
    pub amount: u64,
}

impl Transfer {
    /// Pays `amount` minor units to `address`.
    pub fn new(address: impl Into<String>, amount: u64) -> Self {
        Self { address: address.into(), amount }
    }
}

/// Keys for `create_address`. With neither key set, the daemon generates a
/// fresh spend key pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressParams {
    /// Import an address from its private spend key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend_secret_key: Option<String>,
    /// Create a tracking (view-only) address from a public spend key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spend_public_key: Option<String>,
}

/// Arguments shared by `send_transaction` and `create_delayed_transaction`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionParams {
    /// Destinations, in order. At least one is required.
    pub transfers: Vec<Transfer>,
    /// Payment id; mutually exclusive with `extra`
    pub payment_id: Option<String>,
    /// Raw extra bytes, sent hex-encoded; mutually exclusive with `payment_id`
    pub extra: Option<Vec<u8>>,
    /// Mixin count
    pub anonymity: u32,
    /// Fee in minor units
    pub fee: u64,
    /// Addresses to take funds from; all wallet addresses when absent
    pub source_addresses: Option<Vec<String>>,
    /// Where change goes
    pub change_address: Option<String>,
    /// Block height or timestamp before which outputs stay locked
    pub unlock_time: u64,
}

impl TransactionParams {
    /// Pays `transfers` with the default anonymity, fee and unlock time.
    pub fn new(transfers: Vec<Transfer>) -> Self {
        Self {
            transfers,
            payment_id: None,
            extra: None,
            anonymity: DEFAULT_ANONYMITY,
            fee: DEFAULT_FEE,
            source_addresses: None,
            change_address: None,
            unlock_time: 0,
        }
    }

    /// Sets the payment id.
    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }

    /// Sets the extra payload.
    pub fn with_extra(mut self, extra: impl Into<Vec<u8>>) -> Self {
        self.extra = Some(extra.into());
        self
    }

    /// Sets the mixin count.
    pub fn with_anonymity(mut self, anonymity: u32) -> Self {
        self.anonymity = anonymity;
        self
    }

    /// Sets the fee.
    pub fn with_fee(mut self, fee: u64) -> Self {
        self.fee = fee;
        self
    }

    /// Restricts the addresses funds are taken from.
    pub fn with_source_addresses(mut self, addresses: Vec<String>) -> Self {
        self.source_addresses = Some(addresses);
        self
    }

    /// Sets the change address.
    pub fn with_change_address(mut self, address: impl Into<String>) -> Self {
        self.change_address = Some(address.into());
        self
    }

    /// Sets the unlock time.
    pub fn with_unlock_time(mut self, unlock_time: u64) -> Self {
        self.unlock_time = unlock_time;
        self
    }

    /// Checks the local contract without building a request.
    ///
    /// Empty `payment_id` and `extra` values count as absent.
    pub fn validate(&self) -> Result<(), TransportError> {
        if self.transfers.is_empty() {
            return Err(TransportError::Validation(
                "at least one transfer is required".to_string(),
            ));
        }
        let has_payment_id = self.payment_id.as_deref().is_some_and(|p| !p.is_empty());
        let has_extra = self.extra.as_deref().is_some_and(|e| !e.is_empty());
        if has_payment_id && has_extra {
            return Err(TransportError::Validation(
                "payment_id and extra cannot be set together".to_string(),
            ));
        }
        Ok(())
    }

    /// Builds the wire parameters. walletd names the source address list
    /// `sourceAddresses` for `sendTransaction` and `addresses` for
    /// `createDelayedTransaction`, hence `source_key`.
    pub(crate) fn to_params(&self, source_key: &str) -> Result<Params, TransportError> {
        self.validate()?;

        let mut params = Params::new();
        params.insert("transfers".to_string(), json!(self.transfers));
        params.insert("anonymity".to_string(), json!(self.anonymity));
        params.insert("fee".to_string(), json!(self.fee));
        params.insert("unlockTime".to_string(), json!(self.unlock_time));
        if let Some(addresses) = &self.source_addresses {
            params.insert(source_key.to_string(), json!(addresses));
        }
        if let Some(change) = self.change_address.as_deref().filter(|c| !c.is_empty()) {
            params.insert("changeAddress".to_string(), json!(change));
        }
        if let Some(payment_id) = self.payment_id.as_deref().filter(|p| !p.is_empty()) {
            params.insert("paymentId".to_string(), json!(payment_id));
        } else if let Some(extra) = self.extra.as_deref().filter(|e| !e.is_empty()) {
            params.insert("extra".to_string(), Value::String(hex::encode(extra)));
        }
        Ok(params)
    }
}

/// Where a block scan starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum BlockRange {
    /// Start at the block with this hash
    #[serde(rename = "blockHash")]
    FromHash(String),
    /// Start at this block height
    #[serde(rename = "firstBlockIndex")]
    FromIndex(u64),
}

/// Selection for `get_transactions` and `get_transaction_hashes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilter {
    /// Only transactions touching these addresses; all when empty
    pub addresses: Vec<String>,
    /// First block to scan
    #[serde(flatten)]
    pub start: BlockRange,
    /// Number of blocks to scan
    pub block_count: u64,
    /// Only transactions carrying this payment id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_id: Option<String>,
}

impl TransactionFilter {
    /// Every transaction in `block_count` blocks starting at `start`.
    pub fn new(start: BlockRange, block_count: u64) -> Self {
        Self { addresses: Vec::new(), start, block_count, payment_id: None }
    }

    /// Restricts the scan to `addresses`.
    pub fn with_addresses(mut self, addresses: Vec<String>) -> Self {
        self.addresses = addresses;
        self
    }

    /// Restricts the scan to one payment id.
    pub fn with_payment_id(mut self, payment_id: impl Into<String>) -> Self {
        self.payment_id = Some(payment_id.into());
        self
    }
}

/// Arguments for `send_fusion_transaction`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FusionParams {
    /// Outputs below this amount are fused
    pub threshold: u64,
    /// Mixin count
    pub anonymity: u32,
    /// Addresses whose outputs are fused
    pub addresses: Vec<String>,
    /// Receives the fused output
    pub destination_address: String,
}

/// Serializes a parameter structure into named parameters.
pub(crate) fn to_params<T: Serialize>(value: &T) -> Result<Params, TransportError> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(TransportError::Validation(format!(
            "parameters must form an object, got {}",
            other
        ))),
        Err(e) => Err(TransportError::Validation(e.to_string())),
    }
}
