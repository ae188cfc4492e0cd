//! The swap form: the latest snapshot of external state plus the user's
//! selections, and the view derived from them.
//!
//! Every external event (new pools or reserves, wallet reads, call state
//! changes, user input) replaces part of the snapshot; [`SwapSession::view`]
//! recomputes everything else from scratch.
use std::time::{Duration, Instant};

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use log::{debug, info};

use super::eligibility::Eligibility;
use super::index::{available_tokens, counterpart_tokens, TokenNames};
use super::pool::Pool;
use super::quote::{FeeRate, SwapQuote};
use super::router::{approve_request, swap_request, SwapIntent};
use super::tx_state::{classify, CallState, TxStatus};
use super::wallet::WalletSnapshot;
use crate::utils::constants::AUTO_RESET_DELAY;
use crate::utils::format::parse_amount;

/// Everything the swap form shows, derived from one snapshot.
#[derive(Debug, Clone)]
pub struct SessionView {
    /// Tokens that can be sold
    pub tokens: TokenNames,
    /// Tokens that can be bought for the selected input token
    pub counterparts: TokenNames,
    /// Selected input token
    pub from_token: Option<Address>,
    /// Selected output token
    pub to_token: Option<Address>,
    /// Pool pairing the selected tokens
    pub pool: Option<Pool>,
    /// Parsed input amount
    pub amount_in: U256,
    /// Quote through the pool, if one can be computed
    pub quote: Option<SwapQuote>,
    /// Expected output, zero without a quote
    pub amount_out: U256,
    /// Wallet balance of the input token
    pub from_balance: Option<U256>,
    /// Wallet balance of the output token
    pub to_balance: Option<U256>,
    /// Approve/swap predicates and the action label
    pub eligibility: Eligibility,
    /// Folded status of both calls
    pub status: TxStatus,
    /// Message to display, if any
    pub message: Option<String>,
}

impl SessionView {
    /// The swap action is available and there is a pool to route through.
    #[must_use]
    pub const fn swap_enabled(&self) -> bool {
        self.eligibility.can_swap && self.pool.is_some()
    }
}

/// State of one swap form.
#[derive(Debug, Clone)]
pub struct SwapSession {
    /// Known pools
    pools: Vec<Pool>,
    /// Fee charged by the router
    fee: FeeRate,
    /// Router address, the spender of approvals
    router: Address,
    /// Selected input token
    from_token: Option<Address>,
    /// Selected output token
    to_token: Option<Address>,
    /// Input as the user typed it
    input_text: String,
    /// Input parsed with 18 decimals
    amount_in: U256,
    /// Latest wallet reads
    wallet: WalletSnapshot,
    /// Approval call state
    approve_state: CallState,
    /// Swap call state
    swap_state: CallState,
    /// Terminal status on display and when it appeared
    terminal: Option<(TxStatus, Instant)>,
    /// How long a terminal status stays before the form resets
    reset_delay: Duration,
}

impl SwapSession {
    /// Creates a session over `pools`, selling token0 of the first pool by default.
    #[must_use]
    pub fn new(pools: Vec<Pool>, router: Address) -> Self {
        let from_token = pools.first().map(|pool| pool.token0_address);
        Self {
            pools,
            fee: FeeRate::default(),
            router,
            from_token,
            to_token: None,
            input_text: "0".to_string(),
            amount_in: U256::ZERO,
            wallet: WalletSnapshot::default(),
            approve_state: CallState::None,
            swap_state: CallState::None,
            terminal: None,
            reset_delay: AUTO_RESET_DELAY,
        }
    }

    /// Uses a different fee, for routers other than Uniswap V2.
    #[must_use]
    pub fn with_fee(mut self, fee: FeeRate) -> Self {
        self.fee = fee;
        self
    }

    /// Known pools
    #[must_use]
    pub fn pools(&self) -> &[Pool] {
        &self.pools
    }

    /// Input as the user typed it
    #[must_use]
    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    /// Parsed input amount
    #[must_use]
    pub const fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// Selected input token
    #[must_use]
    pub const fn from_token(&self) -> Option<Address> {
        self.from_token
    }

    /// Selected output token
    #[must_use]
    pub const fn to_token(&self) -> Option<Address> {
        self.to_token
    }

    /// Latest wallet reads
    #[must_use]
    pub const fn wallet(&self) -> &WalletSnapshot {
        &self.wallet
    }

    /// Updates the input amount from user text.
    ///
    /// Blank text is ignored. Text that does not parse as a non-negative
    /// amount with at most 18 decimals is ignored too and the previous
    /// amount stays.
    pub fn set_input(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }

        match parse_amount(trimmed) {
            Ok(amount) => {
                self.input_text = trimmed.to_string();
                self.amount_in = amount;
            }
            Err(e) => debug!("session: ignoring amount {trimmed:?}: {e}"),
        }
    }

    /// Selects the token to sell.
    pub fn select_from_token(&mut self, token: Address) {
        self.from_token = Some(token);
    }

    /// Selects the token to buy.
    pub fn select_to_token(&mut self, token: Address) {
        self.to_token = Some(token);
    }

    /// Replaces the pool list, e.g. after a reserve refresh.
    pub fn update_pools(&mut self, pools: Vec<Pool>) {
        if self.from_token.is_none() {
            self.from_token = pools.first().map(|pool| pool.token0_address);
        }
        self.pools = pools;
    }

    /// Replaces the wallet snapshot.
    pub fn update_wallet(&mut self, wallet: WalletSnapshot) {
        self.wallet = wallet;
    }

    /// Records a new approval call state observed at `now`.
    pub fn set_approve_state(&mut self, state: CallState, now: Instant) {
        self.approve_state = state;
        self.track_status(now);
    }

    /// Records a new swap call state observed at `now`.
    pub fn set_swap_state(&mut self, state: CallState, now: Instant) {
        self.swap_state = state;
        self.track_status(now);
    }

    /// Current folded status of both calls
    #[must_use]
    pub fn status(&self) -> TxStatus {
        classify(&self.approve_state, &self.swap_state)
    }

    /// When the form will reset, if a terminal status is showing.
    #[must_use]
    pub fn reset_due(&self) -> Option<Instant> {
        self.terminal.as_ref().map(|(_, since)| *since + self.reset_delay)
    }

    /// Resets the form once a terminal status has been shown long enough.
    ///
    /// Returns `true` if the form was reset.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.reset_due() {
            Some(due) if now >= due => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    /// Derives the full view from the current snapshot.
    #[must_use]
    pub fn view(&self) -> SessionView {
        let tokens = available_tokens(&self.pools);
        let counterparts = self
            .from_token
            .map(|from| counterpart_tokens(&self.pools, &from))
            .unwrap_or_default();

        let intent = self.intent();
        let pool = intent.as_ref().and_then(|intent| intent.pool(&self.pools));
        let quote = match (pool, self.from_token) {
            (Some(pool), Some(from)) => SwapQuote::new(pool, &from, self.amount_in, self.fee),
            _ => None,
        };

        let from_balance = self.from_token.and_then(|token| self.wallet.balance(&token));
        let to_balance = self.to_token.and_then(|token| self.wallet.balance(&token));
        let allowance = self
            .from_token
            .map(|token| self.wallet.allowance(&token))
            .unwrap_or_default();

        let eligibility = Eligibility::evaluate(
            self.amount_in,
            allowance,
            from_balance,
            &self.approve_state,
            &self.swap_state,
        );
        let status = self.status();
        let message = status.message();

        SessionView {
            tokens,
            counterparts,
            from_token: self.from_token,
            to_token: self.to_token,
            pool: pool.cloned(),
            amount_in: self.amount_in,
            amount_out: quote.as_ref().map_or(U256::ZERO, SwapQuote::amount_out),
            quote,
            from_balance,
            to_balance,
            eligibility,
            status,
            message,
        }
    }

    /// The swap the form would submit right now.
    #[must_use]
    pub fn intent(&self) -> Option<SwapIntent> {
        Some(SwapIntent {
            from_token: self.from_token?,
            to_token: self.to_token?,
            amount_in: self.amount_in,
        })
    }

    /// Approval request for the input token, if approving is possible.
    ///
    /// The request is sent from the wallet's account when one is known.
    #[must_use]
    pub fn approve_request(&self) -> Option<TransactionRequest> {
        let from = self.from_token?;
        if !self.view().eligibility.can_approve {
            return None;
        }
        let request = approve_request(from, self.router);
        Some(match self.wallet.account {
            Some(account) => request.with_from(account),
            None => request,
        })
    }

    /// Swap request for the current intent, if swapping is possible.
    ///
    /// `slippage_bps` sets `amountOutMin` that far below the quote. Without
    /// a tolerance `amountOutMin` is zero.
    #[must_use]
    pub fn swap_request(
        &self,
        recipient: Address,
        now_unix: u64,
        slippage_bps: Option<u16>,
    ) -> Option<TransactionRequest> {
        let view = self.view();
        if !view.eligibility.can_swap {
            return None;
        }
        let intent = self.intent().filter(|intent| intent.is_valid(&self.pools))?;
        let amount_out_min = match (slippage_bps, &view.quote) {
            (Some(bps), Some(quote)) => quote.minimum_out(bps),
            _ => U256::ZERO,
        };
        Some(swap_request(
            self.router,
            &intent,
            recipient,
            now_unix,
            amount_out_min,
        ))
    }

    /// Starts or clears the reset timer after a call state change.
    fn track_status(&mut self, now: Instant) {
        let status = self.status();
        if !status.is_terminal() {
            self.terminal = None;
            return;
        }

        let unchanged = matches!(&self.terminal, Some((shown, _)) if *shown == status);
        if !unchanged {
            debug!("session: {status:?} shown, reset in {:?}", self.reset_delay);
            self.terminal = Some((status, now));
        }
    }

    /// Returns the form to its idle state.
    fn reset(&mut self) {
        info!("session: resetting swap form");
        self.input_text = "0".to_string();
        self.amount_in = U256::ZERO;
        self.to_token = None;
        self.approve_state = CallState::None;
        self.swap_state = CallState::None;
        self.terminal = None;
    }
}
