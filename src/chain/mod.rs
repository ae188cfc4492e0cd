//! # Chain Module
//!
//! Read-only access to the Uniswap V2 contracts the desk works with. Pools,
//! router details and wallet balances are read here and handed to the pure
//! `exchange` code; nothing in this module signs or sends transactions.

/// Wallet balance and allowance reads
pub mod account;
/// Contract bindings
pub mod contracts;
/// Pool discovery and reserve refreshes
pub mod pools;
/// Router details
pub mod router_info;
