//! Address management.

use serde_json::json;

use crate::params::{to_params, CreateAddressParams};
use crate::types::{
    AddressReply, AddressesReply, IntegratedAddressReply, MnemonicSeedReply, SpendKeys,
    ValidatedAddress,
};
use crate::{object, Params, Result, WalletClient};

impl WalletClient {
    /// Adds an address to the wallet and returns it.
    ///
    /// See [`CreateAddressParams`] for importing or tracking existing keys.
    pub async fn create_address(&self, keys: &CreateAddressParams) -> Result<String> {
        let reply: AddressReply = self.call("createAddress", to_params(keys)?).await?;
        Ok(reply.address)
    }

    /// Imports several addresses from their private spend keys.
    ///
    /// `scan_height` tells the daemon where to start looking for their
    /// outputs.
    pub async fn create_address_list(
        &self,
        spend_secret_keys: &[String],
        scan_height: Option<u64>,
    ) -> Result<Vec<String>> {
        let mut params = object(json!({"spendSecretKeys": spend_secret_keys}));
        if let Some(height) = scan_height {
            params.insert("scanHeights".to_string(), json!(height));
        }
        let reply: AddressesReply = self.call("createAddressList", params).await?;
        Ok(reply.addresses)
    }

    /// Removes an address from the wallet.
    pub async fn delete_address(&self, address: &str) -> Result<()> {
        self.call_unit("deleteAddress", object(json!({"address": address}))).await
    }

    /// Spend key pair of an address in this wallet.
    pub async fn get_spend_keys(&self, address: &str) -> Result<SpendKeys> {
        self.call("getSpendKeys", object(json!({"address": address}))).await
    }

    /// Every address in the wallet.
    pub async fn get_addresses(&self) -> Result<Vec<String>> {
        let reply: AddressesReply = self.call("getAddresses", Params::new()).await?;
        Ok(reply.addresses)
    }

    /// Mnemonic seed of a deterministic address.
    pub async fn get_mnemonic_seed(&self, address: &str) -> Result<String> {
        let reply: MnemonicSeedReply =
            self.call("getMnemonicSeed", object(json!({"address": address}))).await?;
        Ok(reply.mnemonic_seed)
    }

    /// Combines `address` and `payment_id` into an integrated address.
    pub async fn create_integrated_address(
        &self,
        address: &str,
        payment_id: &str,
    ) -> Result<String> {
        let params = object(json!({"address": address, "paymentId": payment_id}));
        let reply: IntegratedAddressReply = self.call("createIntegratedAddress", params).await?;
        Ok(reply.integrated_address)
    }

    /// Asks the daemon whether `address` is well formed.
    pub async fn validate_address(&self, address: &str) -> Result<ValidatedAddress> {
        self.call("validateAddress", object(json!({"address": address}))).await
    }
}
