//! Token discovery and pair lookup over a list of pools.
//!
//! Every function here is a pure function of the pool list it is handed, so
//! callers recompute them whenever the list changes instead of keeping an
//! index in sync.
use std::collections::HashMap;

use alloy::primitives::Address;

use super::pool::Pool;

/// Map of token address to display name.
pub type TokenNames = HashMap<Address, String>;

/// Returns every token that appears on either side of any pool.
///
/// Tokens are collapsed by address; when pools disagree on a name the last
/// pool listed wins.
#[must_use]
pub fn available_tokens(pools: &[Pool]) -> TokenNames {
    let mut tokens = TokenNames::with_capacity(pools.len() * 2);
    for pool in pools {
        for (address, name) in pool.tokens() {
            tokens.insert(address, name.to_string());
        }
    }
    tokens
}

/// Returns the tokens that share at least one pool with `from_token`.
///
/// `from_token` itself is never part of the result.
#[must_use]
pub fn counterpart_tokens(pools: &[Pool], from_token: &Address) -> TokenNames {
    pools
        .iter()
        .filter_map(|pool| pool.counterpart(from_token))
        .filter(|(address, _)| address != from_token)
        .map(|(address, name)| (address, name.to_string()))
        .collect()
}

/// Finds the pool pairing `token_a` and `token_b`, in either order.
///
/// A missing pool is a normal outcome; the caller disables the swap.
#[must_use]
pub fn find_pool<'a>(pools: &'a [Pool], token_a: &Address, token_b: &Address) -> Option<&'a Pool> {
    pools.iter().find(|pool| pool.pairs(token_a, token_b))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::exchange::test_helpers::*;

    fn sample_pools() -> Vec<Pool> {
        pools(&[
            ("P1", "A", "B", 100, 200),
            ("P2", "A", "C", 300, 100),
            ("P3", "C", "D", 500, 500),
            ("P4", "B", "A", 10, 10),
        ])
    }

    #[test]
    fn test_available_tokens_is_union() {
        let pools = sample_pools();
        let tokens = available_tokens(&pools);

        let expected: HashSet<Address> = pools
            .iter()
            .flat_map(|pool| [pool.token0_address, pool.token1_address])
            .collect();
        let actual: HashSet<Address> = tokens.keys().copied().collect();

        assert_eq!(tokens.len(), 4);
        assert_eq!(actual, expected);
        assert_eq!(tokens[&address_from_str("D")], "D");
    }

    #[test]
    fn test_available_tokens_empty() {
        assert!(available_tokens(&[]).is_empty());
    }

    #[test]
    fn test_counterpart_tokens() {
        let pools = sample_pools();

        for (token, expected) in [
            ("A", vec!["B", "C"]),
            ("B", vec!["A"]),
            ("C", vec!["A", "D"]),
            ("D", vec!["C"]),
            ("E", vec![]),
        ] {
            let from = address_from_str(token);
            let counterparts = counterpart_tokens(&pools, &from);

            assert!(!counterparts.contains_key(&from));
            let actual: HashSet<Address> = counterparts.keys().copied().collect();
            let expected: HashSet<Address> =
                expected.into_iter().map(address_from_str).collect();
            assert_eq!(actual, expected, "counterparts of {token}");
        }
    }

    #[test]
    fn test_find_pool_order_independent() {
        let pools = sample_pools();
        let labels = ["A", "B", "C", "D", "E"];

        for a in labels {
            for b in labels {
                let token_a = address_from_str(a);
                let token_b = address_from_str(b);
                assert_eq!(
                    find_pool(&pools, &token_a, &token_b),
                    find_pool(&pools, &token_b, &token_a),
                    "find_pool({a}, {b})"
                );
            }
        }
    }

    #[test]
    fn test_find_pool() {
        let pools = sample_pools();
        let a = address_from_str("A");
        let c = address_from_str("C");
        let d = address_from_str("D");

        assert_eq!(find_pool(&pools, &c, &a).unwrap().address, address_from_str("P2"));
        // First listed pool wins when a pair is listed twice
        assert_eq!(
            find_pool(&pools, &address_from_str("B"), &a).unwrap().address,
            address_from_str("P1")
        );
        assert!(find_pool(&pools, &a, &d).is_none());
        assert!(find_pool(&pools, &a, &a).is_none());
    }
}
