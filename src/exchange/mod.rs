//! # Exchange Module
//!
//! The logic behind the swap form: which tokens can be traded against which,
//! the pool for a pair, the constant-product quote, whether the user may
//! approve or swap, and the status of the approval and swap calls.
//! Everything here is synchronous and works on snapshots handed in by the
//! caller.

/// Approve/swap predicates and the action label
pub mod eligibility;
/// Token discovery and pair lookup
pub mod index;
/// Pool data structures
pub mod pool;
/// Constant-product quotes
pub mod quote;
/// Router call requests
pub mod router;
/// Swap form state and derived view
pub mod session;
/// Test helpers and utilities
#[cfg(test)]
mod test_helpers;
/// Approval and swap call lifecycle
pub mod tx_state;
/// Wallet balances and allowances
pub mod wallet;
