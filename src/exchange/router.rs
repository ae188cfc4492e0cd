//! Unsigned call requests for the ERC-20 approval and the router swap.
//!
//! The desk only prepares the requests; signing and sending them is left to
//! the connected wallet.
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;

use super::index::find_pool;
use super::pool::Pool;
use crate::chain::contracts::{IUniswapV2Router02, IERC20};
use crate::utils::constants::SWAP_DEADLINE_SECS;

/// What the user wants to trade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapIntent {
    /// Token sold
    pub from_token: Address,
    /// Token bought
    pub to_token: Address,
    /// Raw amount sold
    pub amount_in: U256,
}

impl SwapIntent {
    /// The pool the swap would route through
    #[must_use]
    pub fn pool<'a>(&self, pools: &'a [Pool]) -> Option<&'a Pool> {
        find_pool(pools, &self.from_token, &self.to_token)
    }

    /// A positive amount over an existing pool
    #[must_use]
    pub fn is_valid(&self, pools: &[Pool]) -> bool {
        !self.amount_in.is_zero() && self.pool(pools).is_some()
    }
}

/// Unix timestamp after which the router rejects the swap.
#[must_use]
pub fn deadline(now_unix: u64) -> U256 {
    U256::from(now_unix.saturating_add(SWAP_DEADLINE_SECS))
}

/// Current unix time in seconds.
#[must_use]
pub fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

/// `approve(spender, MAX)` on `token`, so the router can pull any amount.
#[must_use]
pub fn approve_request(token: Address, spender: Address) -> TransactionRequest {
    let call = IERC20::approveCall {
        spender,
        value: U256::MAX,
    };
    TransactionRequest::default()
        .with_to(token)
        .with_input(call.abi_encode())
}

/// `swapExactTokensForTokens` on `router` for the intent, paying out to `recipient`.
///
/// The path is the direct pair `[from, to]` and the deadline is
/// `now_unix + 1200` seconds.
#[must_use]
pub fn swap_request(
    router: Address,
    intent: &SwapIntent,
    recipient: Address,
    now_unix: u64,
    amount_out_min: U256,
) -> TransactionRequest {
    let call = IUniswapV2Router02::swapExactTokensForTokensCall {
        amountIn: intent.amount_in,
        amountOutMin: amount_out_min,
        path: vec![intent.from_token, intent.to_token],
        to: recipient,
        deadline: deadline(now_unix),
    };
    TransactionRequest::default()
        .with_from(recipient)
        .with_to(router)
        .with_input(call.abi_encode())
}
