//! A Uniswap V2 style pool snapshot and the direction of a swap through it.
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use alloy::primitives::{Address, U256};
use eyre::{bail, eyre, Error, Result};
use serde::{Deserialize, Serialize};

/// The direction of a swap in a liquidity pool.
///
/// A pool pairs token0 and token1, so a swap either sells token0 for token1
/// or token1 for token0.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Direction {
    /// Swap from token0 to token1 in the pool
    ZeroForOne,
    /// Swap from token1 to token0 in the pool
    OneForZero,
}

impl Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Debug for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroForOne => write!(f, "0>1"),
            Self::OneForZero => write!(f, "1>0"),
        }
    }
}

/// Pool as it comes from the factory or a pools file.
///
/// Reserves are raw token amounts; 18 decimals are assumed when they are
/// shown to a user.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    /// The address of the pair contract
    pub address: Address,
    /// The address of the first token in the pool
    pub token0_address: Address,
    /// Display name of the first token
    pub token0_name: String,
    /// The address of the second token in the pool
    pub token1_address: Address,
    /// Display name of the second token
    pub token1_name: String,
    /// The reserve amount of the first token
    pub reserve0: U256,
    /// The reserve amount of the second token
    pub reserve1: U256,
}

impl Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pool(0xabc.., 1000 WETH / 2000 USDC)
        write!(
            f,
            "Pool({}, {} {} / {} {})",
            self.address, self.reserve0, self.token0_name, self.reserve1, self.token1_name
        )
    }
}

impl Pool {
    /// Creates a new pool.
    ///
    /// # Errors
    ///
    /// Returns an error if token0 and token1 are the same address.
    pub fn new(
        address: Address,
        (token0_address, token0_name): (Address, String),
        (token1_address, token1_name): (Address, String),
        reserve0: U256,
        reserve1: U256,
    ) -> Result<Self, Error> {
        if token0_address == token1_address {
            bail!("Pool token0 and token1 must be different");
        }

        Ok(Self {
            address,
            token0_address,
            token0_name,
            token1_address,
            token1_name,
            reserve0,
            reserve1,
        })
    }

    /// Returns `true` if the token is one of the two sides of this pool.
    #[must_use]
    pub fn contains(&self, token: &Address) -> bool {
        self.token0_address == *token || self.token1_address == *token
    }

    /// Returns `true` if this pool pairs `token_a` with `token_b`, in either order.
    #[must_use]
    pub fn pairs(&self, token_a: &Address, token_b: &Address) -> bool {
        token_a != token_b && self.contains(token_a) && self.contains(token_b)
    }

    /// Both sides of the pool as `(address, name)` pairs.
    #[must_use]
    pub fn tokens(&self) -> [(Address, &str); 2] {
        [
            (self.token0_address, self.token0_name.as_str()),
            (self.token1_address, self.token1_name.as_str()),
        ]
    }

    /// The other side of the pool, if `token` is one side of it.
    #[must_use]
    pub fn counterpart(&self, token: &Address) -> Option<(Address, &str)> {
        if self.token0_address == *token {
            Some((self.token1_address, self.token1_name.as_str()))
        } else if self.token1_address == *token {
            Some((self.token0_address, self.token0_name.as_str()))
        } else {
            None
        }
    }

    /// The direction of a swap selling `token_in` into this pool.
    #[must_use]
    pub fn direction(&self, token_in: &Address) -> Option<Direction> {
        if self.token0_address == *token_in {
            Some(Direction::ZeroForOne)
        } else if self.token1_address == *token_in {
            Some(Direction::OneForZero)
        } else {
            None
        }
    }

    /// Returns `(reserve_in, reserve_out)` for a swap in the given direction.
    #[must_use]
    pub const fn reserves(&self, direction: Direction) -> (U256, U256) {
        match direction {
            Direction::ZeroForOne => (self.reserve0, self.reserve1),
            Direction::OneForZero => (self.reserve1, self.reserve0),
        }
    }

    /// Returns a copy of this pool with new reserves.
    #[must_use]
    pub fn with_reserves(&self, reserve0: U256, reserve1: U256) -> Self {
        Self {
            reserve0,
            reserve1,
            ..self.clone()
        }
    }
}

/// Serialized shape of a pool.
///
/// Addresses are hex strings, reserves are decimal or `0x` prefixed strings
/// so 256-bit amounts survive JSON untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PoolRecord {
    /// Pair contract address
    pub address: String,
    /// First token address
    pub token0_address: String,
    /// First token display name
    pub token0_name: String,
    /// Second token address
    pub token1_address: String,
    /// Second token display name
    pub token1_name: String,
    /// First token reserve
    #[serde(default)]
    pub reserve0: Option<String>,
    /// Second token reserve
    #[serde(default)]
    pub reserve1: Option<String>,
}

impl TryFrom<PoolRecord> for Pool {
    type Error = Error;

    fn try_from(record: PoolRecord) -> Result<Self, Error> {
        Self::new(
            parse_address(&record.address)?,
            (parse_address(&record.token0_address)?, record.token0_name),
            (parse_address(&record.token1_address)?, record.token1_name),
            parse_reserve(record.reserve0.as_deref())?,
            parse_reserve(record.reserve1.as_deref())?,
        )
    }
}

impl From<&Pool> for PoolRecord {
    fn from(pool: &Pool) -> Self {
        Self {
            address: pool.address.to_string(),
            token0_address: pool.token0_address.to_string(),
            token0_name: pool.token0_name.clone(),
            token1_address: pool.token1_address.to_string(),
            token1_name: pool.token1_name.clone(),
            reserve0: Some(pool.reserve0.to_string()),
            reserve1: Some(pool.reserve1.to_string()),
        }
    }
}

/// Parses a JSON array of pool records.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or any record is not a valid pool.
pub fn pools_from_json(json: &str) -> Result<Vec<Pool>> {
    let records: Vec<PoolRecord> = serde_json::from_str(json)?;
    records.into_iter().map(Pool::try_from).collect()
}

/// Serializes pools as a pretty-printed JSON array of pool records.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn pools_to_json(pools: &[Pool]) -> Result<String> {
    let records: Vec<PoolRecord> = pools.iter().map(PoolRecord::from).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Parses a hex address string.
fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim()).map_err(|e| eyre!("Invalid address {value:?}: {e}"))
}

/// Parses an optional reserve string, missing reserves read as zero.
fn parse_reserve(value: Option<&str>) -> Result<U256> {
    match value.map(str::trim) {
        None | Some("") => Ok(U256::ZERO),
        Some(value) => U256::from_str(value).map_err(|e| eyre!("Invalid reserve {value:?}: {e}")),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::exchange::test_helpers::*;

    #[test]
    fn test_same_tokens() {
        let token = address_from_str("A");
        let pool = Pool::new(
            address_from_str("P1"),
            (token, "A".to_string()),
            (token, "A".to_string()),
            U256::from(100),
            U256::from(200),
        );
        assert_eq!(
            pool.err().unwrap().to_string(),
            "Pool token0 and token1 must be different"
        );
    }

    #[test]
    fn test_direction_and_reserves() {
        let pool = pool("P1", "A", "B", 100, 200);

        let forward = pool.direction(&address_from_str("A")).unwrap();
        let reverse = pool.direction(&address_from_str("B")).unwrap();
        assert_eq!(forward, Direction::ZeroForOne);
        assert_eq!(reverse, Direction::OneForZero);
        assert!(pool.direction(&address_from_str("C")).is_none());

        assert_eq!(pool.reserves(forward), (U256::from(100), U256::from(200)));
        assert_eq!(pool.reserves(reverse), (U256::from(200), U256::from(100)));
    }

    #[test]
    fn test_counterpart() {
        let pool = pool("P1", "A", "B", 100, 200);
        assert_eq!(
            pool.counterpart(&address_from_str("A")),
            Some((address_from_str("B"), "B"))
        );
        assert_eq!(
            pool.counterpart(&address_from_str("B")),
            Some((address_from_str("A"), "A"))
        );
        assert_eq!(pool.counterpart(&address_from_str("C")), None);
    }

    #[test]
    fn test_pairs_rejects_same_token() {
        let pool = pool("P1", "A", "B", 100, 200);
        let a = address_from_str("A");
        let b = address_from_str("B");
        assert!(pool.pairs(&a, &b));
        assert!(pool.pairs(&b, &a));
        assert!(!pool.pairs(&a, &a));
    }

    #[test]
    fn test_pools_from_json() {
        let json = r#"[
            {
                "address": "0x0000000000000000000000000000000000000001",
                "token0Address": "0x00000000000000000000000000000000000000aa",
                "token0Name": "Token A",
                "token1Address": "0x00000000000000000000000000000000000000bb",
                "token1Name": "Token B",
                "reserve0": "1000000000000000000000",
                "reserve1": "0x3e8"
            },
            {
                "address": "0x0000000000000000000000000000000000000002",
                "token0Address": "0x00000000000000000000000000000000000000aa",
                "token0Name": "Token A",
                "token1Address": "0x00000000000000000000000000000000000000cc",
                "token1Name": "Token C"
            }
        ]"#;

        let pools = pools_from_json(json).unwrap();
        assert_eq!(pools.len(), 2);
        assert_eq!(
            pools[0].reserve0,
            U256::from(1_000_000_000_000_000_000_000_u128)
        );
        assert_eq!(pools[0].reserve1, U256::from(1000));
        assert_eq!(pools[1].reserve0, U256::ZERO);
        assert_eq!(pools[1].token1_name, "Token C");
    }

    #[test]
    fn test_pools_from_json_invalid_address() {
        let json = r#"[{
            "address": "not-an-address",
            "token0Address": "0x00000000000000000000000000000000000000aa",
            "token0Name": "A",
            "token1Address": "0x00000000000000000000000000000000000000bb",
            "token1Name": "B"
        }]"#;

        let err = pools_from_json(json).unwrap_err();
        assert!(err.to_string().starts_with("Invalid address"));
    }
}
