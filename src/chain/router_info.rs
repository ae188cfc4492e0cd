use alloy::primitives::Address;
use eyre::Result;
use log::info;

use super::contracts::IUniswapV2Router02;
use crate::utils::app_context::AppContext;

/// Details read from a Uniswap V2 router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterInfo {
    /// The router itself
    pub router: Address,
    /// The factory whose pairs the router trades through
    pub factory: Address,
}

/// Reads the factory address from `router`.
///
/// # Errors
/// * If the contract call fails
pub async fn get_router_info(ctx: &AppContext, router: Address) -> Result<RouterInfo> {
    let router_contract = IUniswapV2Router02::new(router, &ctx.provider);
    let factory = router_contract.factory().call().await?._0;

    info!("chain::router_info: router {router} uses factory {factory}");
    Ok(RouterInfo { router, factory })
}
