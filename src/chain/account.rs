use alloy::primitives::Address;
use futures_util::future::join_all;
use log::{info, warn};

use super::contracts::IERC20;
use crate::exchange::wallet::WalletSnapshot;
use crate::utils::app_context::AppContext;

/// Reads the balance of `account` and the allowance it granted `spender` for
/// each token.
///
/// Failed reads are logged and left out of the snapshot, so the balance reads
/// as unknown and the allowance as zero.
pub async fn fetch_wallet_snapshot(
    ctx: &AppContext,
    account: Address,
    tokens: &[Address],
    spender: Address,
) -> WalletSnapshot {
    let reads = tokens.iter().map(|token| async move {
        let token_contract = IERC20::new(*token, &ctx.provider);
        let balance = token_contract.balanceOf(account).call().await;
        let allowance = token_contract.allowance(account, spender).call().await;
        (*token, balance, allowance)
    });

    let mut snapshot = WalletSnapshot::new(account);
    for (token, balance, allowance) in join_all(reads).await {
        match balance {
            Ok(balance) => snapshot.set_balance(token, balance._0),
            Err(e) => warn!("chain::account: Failed to read balance of {token}: {e}"),
        }
        match allowance {
            Ok(allowance) => snapshot.set_allowance(token, allowance._0),
            Err(e) => warn!("chain::account: Failed to read allowance of {token}: {e}"),
        }
    }

    info!(
        "chain::account: Read {} balances and {} allowances for {account}",
        snapshot.balances.len(),
        snapshot.allowances.len()
    );
    snapshot
}
