//! Constant-product output quotes for a single pool.
//!
//! All arithmetic is integer `U256` arithmetic with floor division, so a
//! quote agrees with the settled swap as long as reserves do not move in
//! between.
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use eyre::{bail, eyre, Error, Result};

use super::index::find_pool;
use super::pool::{Direction, Pool};

/// Basis points in 100%
const BPS_DENOMINATOR: u64 = 10_000;

/// Swap fee expressed as the share of the input that reaches the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRate {
    /// Numerator of the share kept
    numerator: u64,
    /// Denominator of the share kept
    denominator: u64,
}

impl FeeRate {
    /// 0.3% fee of the Uniswap V2 router: 997 / 1000 of the input is swapped
    pub const UNISWAP_V2: Self = Self {
        numerator: 997,
        denominator: 1000,
    };

    /// Creates a fee rate keeping `numerator / denominator` of the input.
    ///
    /// # Errors
    ///
    /// Returns an error if the denominator is zero or the numerator exceeds it.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            bail!("Fee denominator must be positive");
        }
        if numerator > denominator {
            bail!("Fee numerator {numerator} exceeds denominator {denominator}");
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// The input amount left after the fee, rounded down.
    /// `None` on overflow.
    #[must_use]
    pub fn apply(&self, amount_in: U256) -> Option<U256> {
        amount_in
            .checked_mul(U256::from(self.numerator))
            .map(|amount| amount / U256::from(self.denominator))
    }
}

impl Default for FeeRate {
    fn default() -> Self {
        Self::UNISWAP_V2
    }
}

impl FromStr for FeeRate {
    type Err = Error;

    /// Parses `numerator/denominator`, e.g. `997/1000`.
    fn from_str(s: &str) -> Result<Self> {
        let (numerator, denominator) = s
            .split_once('/')
            .ok_or_else(|| eyre!("Fee rate {s:?} is not of the form numerator/denominator"))?;
        Self::new(numerator.trim().parse()?, denominator.trim().parse()?)
    }
}

/// Output amount for selling `amount_in` against `reserve_in`/`reserve_out`.
///
/// ```text
/// amount_in_with_fee = amount_in * 997 / 1000
/// amount_out = amount_in_with_fee * reserve_out / (reserve_in + amount_in_with_fee)
/// ```
///
/// Returns `None` when `reserve_in` is zero or the arithmetic overflows.
#[must_use]
pub fn get_amount_out(
    amount_in: U256,
    reserve_in: U256,
    reserve_out: U256,
    fee: FeeRate,
) -> Option<U256> {
    if reserve_in.is_zero() {
        return None;
    }

    let amount_in_with_fee = fee.apply(amount_in)?;
    let numerator = amount_in_with_fee.checked_mul(reserve_out)?;
    let denominator = reserve_in.checked_add(amount_in_with_fee)?;

    Some(numerator / denominator)
}

/// A quote for a single swap through one pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapQuote {
    /// The pair contract quoted against
    pool: Address,
    /// Which side of the pool is sold
    direction: Direction,
    /// The amount sold
    amount_in: U256,
    /// The amount expected back
    amount_out: U256,
    /// Reserve of the sold token at quote time
    reserve_in: U256,
    /// Reserve of the bought token at quote time
    reserve_out: U256,
}

impl SwapQuote {
    /// Quotes selling `amount_in` of `token_in` into `pool`.
    ///
    /// Returns `None` if the token is not part of the pool, its reserve is
    /// empty, or the amounts overflow.
    #[must_use]
    pub fn new(pool: &Pool, token_in: &Address, amount_in: U256, fee: FeeRate) -> Option<Self> {
        let direction = pool.direction(token_in)?;
        let (reserve_in, reserve_out) = pool.reserves(direction);
        let amount_out = get_amount_out(amount_in, reserve_in, reserve_out, fee)?;

        Some(Self {
            pool: pool.address,
            direction,
            amount_in,
            amount_out,
            reserve_in,
            reserve_out,
        })
    }

    /// The pair contract this quote was computed against
    #[must_use]
    pub const fn pool(&self) -> Address {
        self.pool
    }

    /// Direction of the swap in the pool
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// The amount sold
    #[must_use]
    pub const fn amount_in(&self) -> U256 {
        self.amount_in
    }

    /// The amount expected back
    #[must_use]
    pub const fn amount_out(&self) -> U256 {
        self.amount_out
    }

    /// Reserves `(in, out)` the quote was computed from
    #[must_use]
    pub const fn reserves(&self) -> (U256, U256) {
        (self.reserve_in, self.reserve_out)
    }

    /// Smallest acceptable output given a slippage tolerance in basis points.
    ///
    /// Tolerances above 100% are clamped, yielding zero.
    #[must_use]
    pub fn minimum_out(&self, slippage_bps: u16) -> U256 {
        let slippage = u64::from(slippage_bps).min(BPS_DENOMINATOR);
        // amount_out < reserve_out, far below U256::MAX / 10_000
        self.amount_out.saturating_mul(U256::from(BPS_DENOMINATOR - slippage))
            / U256::from(BPS_DENOMINATOR)
    }
}

/// Finds the pool pairing the tokens and quotes the swap through it.
#[must_use]
pub fn quote(
    pools: &[Pool],
    token_in: &Address,
    token_out: &Address,
    amount_in: U256,
    fee: FeeRate,
) -> Option<SwapQuote> {
    let pool = find_pool(pools, token_in, token_out)?;
    SwapQuote::new(pool, token_in, amount_in, fee)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exchange::test_helpers::*;

    #[test]
    fn test_amount_out_example() {
        let amount_out = get_amount_out(
            U256::from(1_000),
            U256::from(1_000_000),
            U256::from(1_000_000),
            FeeRate::UNISWAP_V2,
        );
        assert_eq!(amount_out, Some(U256::from(996)));
    }

    #[test]
    fn test_amount_out_table() {
        for (amount_in, reserve_in, reserve_out, expected) in &[
            // amount_in, reserve_in, reserve_out, expected
            (0_u64, 100_u64, 200_u64, 0_u64),
            (10, 100, 200, 16),
            (20, 100, 200, 31),
            (10, 200, 100, 4),
            (1, 100, 200, 0),
            (1_000, 1, 1_000, 998),
        ] {
            assert_eq!(
                get_amount_out(
                    U256::from(*amount_in),
                    U256::from(*reserve_in),
                    U256::from(*reserve_out),
                    FeeRate::UNISWAP_V2,
                ),
                Some(U256::from(*expected)),
                "amount_in={amount_in} reserves={reserve_in}/{reserve_out}"
            );
        }
    }

    #[test]
    fn test_amount_out_monotonic() {
        let reserve_in = units(1_000);
        let reserve_out = units(3_000);
        let mut previous = U256::ZERO;

        for step in 0..500_u64 {
            let amount_in = U256::from(step * step * 1_000_003);
            let amount_out =
                get_amount_out(amount_in, reserve_in, reserve_out, FeeRate::UNISWAP_V2).unwrap();
            assert!(amount_out >= previous, "output decreased at step {step}");
            assert!(amount_out < reserve_out);
            previous = amount_out;
        }
    }

    #[test]
    fn test_amount_out_empty_reserve_in() {
        assert_eq!(
            get_amount_out(U256::from(10), U256::ZERO, U256::from(100), FeeRate::UNISWAP_V2),
            None
        );
    }

    #[test]
    fn test_amount_out_overflow() {
        assert_eq!(
            get_amount_out(U256::MAX, U256::from(1), U256::from(1), FeeRate::UNISWAP_V2),
            None
        );
    }

    #[test]
    fn test_fee_rate() {
        assert_eq!(FeeRate::default(), FeeRate::UNISWAP_V2);
        assert_eq!(FeeRate::UNISWAP_V2.apply(U256::from(1_000)), Some(U256::from(997)));
        assert_eq!(FeeRate::UNISWAP_V2.apply(U256::from(999)), Some(U256::from(996)));

        let no_fee = FeeRate::new(1, 1).unwrap();
        assert_eq!(no_fee.apply(U256::from(1_000)), Some(U256::from(1_000)));

        assert_eq!(
            FeeRate::new(1, 0).unwrap_err().to_string(),
            "Fee denominator must be positive"
        );
        assert!(FeeRate::new(1001, 1000).is_err());
    }

    #[test]
    fn test_fee_rate_from_str() {
        assert_eq!("997/1000".parse::<FeeRate>().unwrap(), FeeRate::UNISWAP_V2);
        assert_eq!(" 9975 / 10000 ".parse::<FeeRate>().unwrap(), FeeRate::new(9975, 10_000).unwrap());
        assert!("997".parse::<FeeRate>().is_err());
        assert!("a/1000".parse::<FeeRate>().is_err());
        assert!("2/1".parse::<FeeRate>().is_err());
    }

    #[test]
    fn test_swap_quote_uses_direction() {
        let pool = pool("P1", "A", "B", 100, 200);

        let forward =
            SwapQuote::new(&pool, &address_from_str("A"), U256::from(10), FeeRate::UNISWAP_V2)
                .unwrap();
        assert_eq!(forward.direction(), Direction::ZeroForOne);
        assert_eq!(forward.amount_out(), U256::from(16));
        assert_eq!(forward.reserves(), (U256::from(100), U256::from(200)));

        let reverse =
            SwapQuote::new(&pool, &address_from_str("B"), U256::from(10), FeeRate::UNISWAP_V2)
                .unwrap();
        assert_eq!(reverse.direction(), Direction::OneForZero);
        assert_eq!(reverse.amount_out(), U256::from(4));

        assert!(
            SwapQuote::new(&pool, &address_from_str("C"), U256::from(10), FeeRate::UNISWAP_V2)
                .is_none()
        );
    }

    #[test]
    fn test_quote_missing_pool() {
        let pools = pools(&[("P1", "A", "B", 100, 200)]);
        let a = address_from_str("A");
        let b = address_from_str("B");
        let c = address_from_str("C");

        assert!(quote(&pools, &a, &c, U256::from(10), FeeRate::UNISWAP_V2).is_none());
        let found = quote(&pools, &b, &a, U256::from(10), FeeRate::UNISWAP_V2).unwrap();
        assert_eq!(found.pool(), address_from_str("P1"));
        assert_eq!(found.amount_in(), U256::from(10));
    }

    #[test]
    fn test_minimum_out() {
        let pool = pool("P1", "A", "B", 1_000_000, 1_000_000);
        let quote =
            SwapQuote::new(&pool, &address_from_str("A"), U256::from(1_000), FeeRate::UNISWAP_V2)
                .unwrap();

        assert_eq!(quote.minimum_out(0), U256::from(996));
        // 0.5%: 996 * 9950 / 10000 = 991.02
        assert_eq!(quote.minimum_out(50), U256::from(991));
        assert_eq!(quote.minimum_out(10_000), U256::ZERO);
        assert_eq!(quote.minimum_out(u16::MAX), U256::ZERO);
    }
}
