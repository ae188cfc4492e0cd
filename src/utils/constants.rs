use std::time::Duration;

use alloy::primitives::{address, Address};

/// Uniswap V2 router the desk talks to unless configured otherwise
pub const DEFAULT_ROUTER_ADDRESS: Address = address!("0x756D6E08Be7C15f6045e87CeA0D9d03bfba87592");
/// Decimals assumed for every token amount typed or displayed
pub const TOKEN_DECIMALS: u8 = 18;
/// Swap deadline, counted from the moment the request is built
pub const SWAP_DEADLINE_SECS: u64 = 20 * 60;
/// How long a success or failure message stays before the form resets
pub const AUTO_RESET_DELAY: Duration = Duration::from_secs(5);
/// Default interval between reserve refreshes
pub const DEFAULT_POLL_SECS: u64 = 12;
