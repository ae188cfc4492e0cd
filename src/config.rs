//! Configuration read from the environment (and a `.env` file, if present).
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use alloy::primitives::Address;
use eyre::{eyre, Result};

use crate::utils::constants::{DEFAULT_POLL_SECS, DEFAULT_ROUTER_ADDRESS};

/// RPC endpoint used when `SWAPDESK_RPC_URL` is not set
const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON-RPC endpoint of the chain (`SWAPDESK_RPC_URL`)
    pub rpc_url: String,
    /// Uniswap V2 router (`SWAPDESK_ROUTER_ADDRESS`)
    pub router_address: Address,
    /// Pools file used instead of factory discovery (`SWAPDESK_POOLS_FILE`)
    pub pools_file: Option<PathBuf>,
    /// Interval between reserve refreshes (`SWAPDESK_POLL_SECS`)
    pub poll_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: DEFAULT_RPC_URL.to_string(),
            router_address: DEFAULT_ROUTER_ADDRESS,
            pools_file: None,
            poll_interval: Duration::from_secs(DEFAULT_POLL_SECS),
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the configuration from the environment.
    ///
    /// # Errors
    /// * If `SWAPDESK_ROUTER_ADDRESS` is not an address
    /// * If `SWAPDESK_POLL_SECS` is not a positive integer
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, falling back to defaults.
    ///
    /// # Errors
    /// * If `SWAPDESK_ROUTER_ADDRESS` is not an address
    /// * If `SWAPDESK_POLL_SECS` is not a positive integer
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let router_address = match lookup("SWAPDESK_ROUTER_ADDRESS") {
            Some(value) => Address::from_str(value.trim())
                .map_err(|e| eyre!("SWAPDESK_ROUTER_ADDRESS is not an address: {e}"))?,
            None => defaults.router_address,
        };

        let poll_interval = match lookup("SWAPDESK_POLL_SECS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(eyre!("SWAPDESK_POLL_SECS must be a positive integer, got {value:?}")),
            },
            None => defaults.poll_interval,
        };

        Ok(Self {
            rpc_url: lookup("SWAPDESK_RPC_URL").unwrap_or(defaults.rpc_url),
            router_address,
            pools_file: lookup("SWAPDESK_POOLS_FILE").map(PathBuf::from),
            poll_interval,
        })
    }
}
