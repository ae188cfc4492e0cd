//! Application context: configuration plus the chain connection built from it.

use eyre::{eyre, Error, Result};

use alloy::{
    network::Ethereum,
    providers::{Provider, ProviderBuilder, RootProvider},
};
use url::Url;

use crate::config::Config;

/// Application context shared by the chain reads.
pub struct AppContext {
    /// HTTP connection to the configured RPC endpoint
    pub provider: RootProvider<Ethereum>,
    /// Configuration the context was built from
    pub config: Config,
}

impl AppContext {
    /// Creates a context connected to `config.rpc_url`.
    ///
    /// # Errors
    /// * If the RPC URL cannot be parsed
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self {
            provider: Self::http_provider(&config.rpc_url)?,
            config,
        })
    }

    /// Creates an HTTP provider for `rpc_url`.
    ///
    /// # Errors
    /// * If URL parsing fails
    pub fn http_provider(rpc_url: &str) -> Result<RootProvider<Ethereum>, Error> {
        let url = Url::parse(rpc_url).map_err(|e| eyre!("Invalid RPC URL {rpc_url:?}: {e}"))?;
        let provider = ProviderBuilder::new().on_http(url);
        Ok((*provider.root()).clone())
    }
}
