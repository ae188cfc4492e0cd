use alloy::primitives::{keccak256, Address, U256};

use super::pool::Pool;

/// Deterministic address derived from a short label, e.g. "A" or "P1"
pub fn address_from_str(label: &str) -> Address {
    Address::from_word(keccak256(label.as_bytes()))
}

#[allow(clippy::unwrap_used)]
pub fn pool(id: &str, token0: &str, token1: &str, reserve0: u64, reserve1: u64) -> Pool {
    Pool::new(
        address_from_str(id),
        (address_from_str(token0), token0.to_string()),
        (address_from_str(token1), token1.to_string()),
        U256::from(reserve0),
        U256::from(reserve1),
    )
    .unwrap()
}

pub fn pools(pool_args: &[(&str, &str, &str, u64, u64)]) -> Vec<Pool> {
    pool_args
        .iter()
        .map(|(id, token0, token1, reserve0, reserve1)| {
            pool(id, token0, token1, *reserve0, *reserve1)
        })
        .collect()
}

/// Whole token amount with 18 decimals
pub fn units(amount: u64) -> U256 {
    U256::from(amount) * U256::from(10).pow(U256::from(18))
}
