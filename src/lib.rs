/*!
 * # Swapdesk - Uniswap V2 Swap Desk Core
 *
 * Swapdesk holds the logic of a token swap form for Uniswap V2 style
 * exchanges on EVM chains. Wallet connectivity and signing stay with the
 * wallet; swapdesk reads chain state, computes what the form shows, and
 * prepares the calls the wallet submits.
 *
 * ## Core Features
 *
 * - **Pool Index**: tradable tokens, counterparts and pair lookup
 * - **Quotes**: constant-product output with the 0.3% router fee, in `U256`
 * - **Eligibility**: allowance and balance checks behind the action button
 * - **Call Status**: approval and swap lifecycles folded into one message,
 *   with an automatic reset of the form
 *
 * ## Module Structure
 *
 * - `chain`: Contract bindings and read-only chain access
 * - `config`: Configuration management
 * - `exchange`: Pool index, quotes, eligibility and the swap session
 * - `utils`: Utility functions and helpers
 */

/// Read-only chain access
pub mod chain;
/// Configuration management
pub mod config;
/// Swap form logic
pub mod exchange;
/// Utility functions and helpers
pub mod utils;
