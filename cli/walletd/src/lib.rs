#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]

//! walletd CLI
//!
//! Argument definitions and command execution for the `walletd-cli` binary.
//! The binary itself only wires these together and prints the outcome.

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use client::{TransactionParams, Transfer, TransportError, WalletClient};
use config::{Config, ConfigError};
use serde_json::{json, Value};
use thiserror::Error;

/// Errors reported by the CLI once its arguments are parsed
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The daemon call failed
    #[error(transparent)]
    Wallet(#[from] TransportError),

    /// The result could not be rendered
    #[error("failed to render result: {0}")]
    Output(#[from] serde_json::Error),
}

/// Command-line interface for a walletd daemon.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "walletd-cli", about = "Command-line front end for a walletd daemon", version)]
pub struct Cli {
    /// What to do
    #[command(subcommand)]
    pub command: Command,
    /// Config file (default: `{config_dir}/walletd-rpc/config.toml`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Daemon host
    #[arg(long, global = true)]
    pub host: Option<String>,
    /// Daemon RPC port
    #[arg(long, global = true)]
    pub port: Option<u16>,
    /// RPC user
    #[arg(long, global = true)]
    pub user: Option<String>,
    /// RPC password
    #[arg(long, global = true)]
    pub password: Option<String>,
}

/// Available walletd-cli commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronisation status
    Status,
    /// List wallet addresses
    Addresses,
    /// Balance of the wallet, or of one address
    Balance {
        /// Address to query; the whole wallet when omitted
        address: Option<String>,
    },
    /// Private view key
    ViewKey,
    /// Generate a new address
    CreateAddress,
    /// Remove an address
    DeleteAddress {
        /// Address to remove
        address: String,
    },
    /// Check an address
    ValidateAddress {
        /// Address to check
        address: String,
    },
    /// Show one transaction
    Transaction {
        /// Transaction hash
        hash: String,
    },
    /// Send funds to a single destination
    Send {
        /// Destination address
        address: String,
        /// Amount in minor units
        amount: u64,
        /// Payment id
        #[arg(long, conflicts_with = "extra")]
        payment_id: Option<String>,
        /// Extra payload as hex
        #[arg(long)]
        extra: Option<HexBytes>,
        /// Fee in minor units
        #[arg(long)]
        fee: Option<u64>,
        /// Mixin count
        #[arg(long)]
        anonymity: Option<u32>,
    },
    /// List delayed transactions
    DelayedHashes,
    /// Relay a delayed transaction
    SendDelayed {
        /// Transaction hash
        hash: String,
    },
    /// Discard a delayed transaction
    DeleteDelayed {
        /// Transaction hash
        hash: String,
    },
    /// Count outputs a fusion could consolidate
    EstimateFusion {
        /// Outputs below this amount are counted
        threshold: u64,
    },
    /// Persist the wallet
    Save,
}

/// Bytes given on the command line as hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexBytes(pub Vec<u8>);

impl FromStr for HexBytes {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { hex::decode(s).map(HexBytes) }
}

impl Cli {
    /// Loads the configuration file and applies the command-line overrides.
    ///
    /// An explicit `--config` must exist; the default location may be absent.
    pub fn resolve_config(&self) -> Result<Config, CliError> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => match Config::default_path() {
                Ok(path) => Config::from_file_or_default(path)?,
                Err(ConfigError::ConfigDirUnavailable) => Config::default(),
                Err(e) => return Err(e.into()),
            },
        };

        if let Some(host) = &self.host {
            config.endpoint.host = host.clone();
        }
        if let Some(port) = self.port {
            config.endpoint.port = port;
        }
        if let Some(user) = &self.user {
            config.endpoint.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            config.endpoint.password = Some(password.clone());
        }
        Ok(config)
    }
}

/// Runs `command` against the daemon and returns what should be printed.
pub async fn run(client: &WalletClient, command: &Command) -> Result<Value, CliError> {
    tracing::debug!(?command, "running command");
    let value = match command {
        Command::Status => serde_json::to_value(client.get_status().await?)?,
        Command::Addresses => json!(client.get_addresses().await?),
        Command::Balance { address } => {
            serde_json::to_value(client.get_balance(address.as_deref()).await?)?
        }
        Command::ViewKey => json!({"viewSecretKey": client.get_view_key().await?}),
        Command::CreateAddress => {
            json!({"address": client.create_address(&Default::default()).await?})
        }
        Command::DeleteAddress { address } => {
            client.delete_address(address).await?;
            json!({"deleted": address})
        }
        Command::ValidateAddress { address } => {
            serde_json::to_value(client.validate_address(address).await?)?
        }
        Command::Transaction { hash } => serde_json::to_value(client.get_transaction(hash).await?)?,
        Command::Send { address, amount, payment_id, extra, fee, anonymity } => {
            let mut params = TransactionParams::new(vec![Transfer::new(address.clone(), *amount)]);
            params.payment_id = payment_id.clone();
            params.extra = extra.as_ref().map(|e| e.0.clone());
            if let Some(fee) = fee {
                params = params.with_fee(*fee);
            }
            if let Some(anonymity) = anonymity {
                params = params.with_anonymity(*anonymity);
            }
            json!({"transactionHash": client.send_transaction(params).await?})
        }
        Command::DelayedHashes => json!(client.get_delayed_transaction_hashes().await?),
        Command::SendDelayed { hash } => {
            client.send_delayed_transaction(hash).await?;
            json!({"sent": hash})
        }
        Command::DeleteDelayed { hash } => {
            client.delete_delayed_transaction(hash).await?;
            json!({"deleted": hash})
        }
        Command::EstimateFusion { threshold } => {
            serde_json::to_value(client.estimate_fusion(*threshold, &[]).await?)?
        }
        Command::Save => {
            client.save().await?;
            json!({"saved": true})
        }
    };
    Ok(value)
}
