use alloy::primitives::{Address, U256};
use eyre::Result;
use futures_util::future::{join, join_all};
use log::{debug, info, warn};

use super::contracts::{IUniswapV2Factory, IUniswapV2Pair, IERC20};
use crate::exchange::pool::Pool;
use crate::utils::app_context::AppContext;
use crate::utils::format::shorten_address;

/// Retrieves up to `limit` pools created by `factory`, with names and reserves.
///
/// Pairs whose reads fail are skipped with a warning rather than failing the
/// whole discovery.
///
/// # Errors
/// * If the pair count cannot be read from the factory
pub async fn fetch_pools(ctx: &AppContext, factory: Address, limit: usize) -> Result<Vec<Pool>> {
    let factory_contract = IUniswapV2Factory::new(factory, &ctx.provider);
    let total: U256 = factory_contract.allPairsLength().call().await?._0;
    let count = total.saturating_to::<usize>().min(limit);

    info!("chain::pools: factory {factory} has {total} pairs, reading {count}");

    let factory_contract = &factory_contract;
    let address_calls = (0..count).map(|index| async move {
        factory_contract.allPairs(U256::from(index)).call().await
    });

    let mut pair_addresses = Vec::with_capacity(count);
    for (index, result) in join_all(address_calls).await.into_iter().enumerate() {
        match result {
            Ok(pair) => pair_addresses.push(pair._0),
            Err(e) => warn!("chain::pools: Failed to read pair #{index}: {e}"),
        }
    }

    let pool_reads = join_all(pair_addresses.iter().map(|pair| fetch_pool(ctx, *pair))).await;

    let mut pools = Vec::with_capacity(pool_reads.len());
    for (pair, result) in pair_addresses.iter().zip(pool_reads) {
        match result {
            Ok(pool) => pools.push(pool),
            Err(e) => warn!("chain::pools: Skipping pair {pair}: {e}"),
        }
    }

    info!("chain::pools: Loaded {} pools", pools.len());
    Ok(pools)
}

/// Reads one pair: its tokens, their names and the current reserves.
///
/// # Errors
/// * If any pair call fails
/// * If the pair reports the same token on both sides
pub async fn fetch_pool(ctx: &AppContext, pair: Address) -> Result<Pool> {
    let pair_contract = IUniswapV2Pair::new(pair, &ctx.provider);

    let token0 = pair_contract.token0().call().await?._0;
    let token1 = pair_contract.token1().call().await?._0;
    let reserves = pair_contract.getReserves().call().await?;

    let (token0_name, token1_name) =
        join(fetch_token_name(ctx, token0), fetch_token_name(ctx, token1)).await;

    Pool::new(
        pair,
        (token0, token0_name),
        (token1, token1_name),
        U256::from(reserves.reserve0),
        U256::from(reserves.reserve1),
    )
}

/// Re-reads reserves for every pool.
///
/// Pools whose read fails keep their previous reserves.
pub async fn refresh_reserves(ctx: &AppContext, pools: &[Pool]) -> Vec<Pool> {
    let reserve_reads = pools.iter().map(|pool| async move {
        let pair_contract = IUniswapV2Pair::new(pool.address, &ctx.provider);
        pair_contract.getReserves().call().await
    });

    join_all(reserve_reads)
        .await
        .into_iter()
        .zip(pools)
        .map(|(result, pool)| match result {
            Ok(reserves) => {
                let updated =
                    pool.with_reserves(U256::from(reserves.reserve0), U256::from(reserves.reserve1));
                debug!("chain::pools: {updated:?}");
                updated
            }
            Err(e) => {
                warn!("chain::pools: Failed to refresh reserves of {}: {e}", pool.address);
                pool.clone()
            }
        })
        .collect()
}

/// Display name of a token: `name()`, else `symbol()`, else its short address.
async fn fetch_token_name(ctx: &AppContext, token: Address) -> String {
    let token_contract = IERC20::new(token, &ctx.provider);

    match token_contract.name().call().await {
        Ok(name) if !name._0.is_empty() => return name._0,
        Ok(_) => {}
        Err(e) => debug!("chain::pools: name() failed for {token}: {e}"),
    }

    match token_contract.symbol().call().await {
        Ok(symbol) if !symbol._0.is_empty() => symbol._0,
        _ => shorten_address(&token),
    }
}
