//! Balances and router allowances of the connected account.
use std::collections::HashMap;

use alloy::primitives::{Address, U256};

/// What the connected wallet holds, as last read from the chain.
///
/// Balances and allowances are keyed by token; allowances are the amounts
/// the router may spend on the account's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSnapshot {
    /// Connected account, if any
    pub account: Option<Address>,
    /// Map of token address to the account's balance
    pub balances: HashMap<Address, U256>,
    /// Map of token address to the router's allowance
    pub allowances: HashMap<Address, U256>,
}

impl WalletSnapshot {
    /// Creates an empty snapshot for `account`.
    #[must_use]
    pub fn new(account: Address) -> Self {
        Self {
            account: Some(account),
            ..Self::default()
        }
    }

    /// Balance of `token`, or `None` when it has not been read yet.
    #[must_use]
    pub fn balance(&self, token: &Address) -> Option<U256> {
        self.balances.get(token).copied()
    }

    /// Router allowance for `token`; unread allowances count as zero.
    #[must_use]
    pub fn allowance(&self, token: &Address) -> U256 {
        self.allowances.get(token).copied().unwrap_or_default()
    }

    /// Records a balance read.
    pub fn set_balance(&mut self, token: Address, balance: U256) {
        self.balances.insert(token, balance);
    }

    /// Records an allowance read.
    pub fn set_allowance(&mut self, token: Address, allowance: U256) {
        self.allowances.insert(token, allowance);
    }
}
