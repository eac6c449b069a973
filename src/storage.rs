#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

//! Initial storage for the BatchAuction contract.
//!
//! The contract's storage record is laid out as a balanced comb of `Pair`s with
//! fields in alphabetical order:
//!
//! ```text
//! address_to_balance, admin, bidding_end, bidding_start, bids,
//! bids_priority_queue, min_bid_price, mint_index, next_bid_id,
//! nft_contract_address, owner_to_bids, quantity_under_bid, total_supply
//! ```
//!
//! Big maps and maps start empty (`{}`) and counters start at `0`. The
//! template is hard-wired to this one contract; nothing here checks that the
//! compiled artifact actually expects this shape.

use crate::types::{DeploymentParameters, StorageExpression};

/// Renders the storage literal for `params`. Pure and deterministic.
#[must_use]
pub fn render_storage(params: &DeploymentParameters) -> StorageExpression {
    StorageExpression::new(format!(
        "(Pair (Pair (Pair {{}} (Pair \"{admin}\" \"{bidding_end}\")) \
         (Pair \"{bidding_start}\" (Pair {{}} {{}}))) \
         (Pair (Pair {min_bid_price} (Pair 0 0)) \
         (Pair (Pair \"{nft}\" {{}}) (Pair 0 {total_supply}))))",
        admin = params.admin(),
        bidding_end = params.bidding_end(),
        bidding_start = params.bidding_start(),
        min_bid_price = params.min_bid_price(),
        nft = params.nft_contract_address(),
        total_supply = params.total_supply(),
    ))
}

#[cfg(test)]
mod tests {
    use super::render_storage;
    use crate::types::DeploymentParameters;

    fn reference_params() -> DeploymentParameters {
        DeploymentParameters::new(
            "tz1A",
            "2021-01-01T00:00:00Z",
            "2021-01-02T00:00:00Z",
            "500",
            "KT1X",
            "10",
        )
    }

    #[test]
    fn given_reference_params_when_rendered_then_matches_contract_layout() {
        let storage = render_storage(&reference_params());

        assert_eq!(
            storage.as_str(),
            "(Pair (Pair (Pair {} (Pair \"tz1A\" \"2021-01-02T00:00:00Z\")) \
             (Pair \"2021-01-01T00:00:00Z\" (Pair {} {}))) \
             (Pair (Pair 500 (Pair 0 0)) \
             (Pair (Pair \"KT1X\" {}) (Pair 0 10))))"
        );
    }

    #[test]
    fn given_reference_params_when_rendered_then_each_value_appears_once() {
        let storage = render_storage(&reference_params());
        let rendered = storage.as_str();

        for needle in [
            "\"tz1A\"",
            "\"2021-01-01T00:00:00Z\"",
            "\"2021-01-02T00:00:00Z\"",
            "\"KT1X\"",
            " 500 ",
            " 10)",
        ] {
            assert_eq!(rendered.matches(needle).count(), 1, "{needle} in {rendered}");
        }
        assert_eq!(rendered.matches("{}").count(), 4);
        assert_eq!(rendered.matches("(Pair 0 0)").count(), 1);
        assert_eq!(rendered.matches("(Pair 0 10)").count(), 1);
    }

    #[test]
    fn given_same_params_when_rendered_twice_then_output_is_identical() {
        let params = reference_params();

        assert_eq!(render_storage(&params), render_storage(&params.clone()));
    }

    #[test]
    fn given_parentheses_when_rendered_then_they_balance() {
        let storage = render_storage(&reference_params());
        let depth = storage
            .as_str()
            .chars()
            .try_fold(0_i32, |depth, c| match c {
                '(' => Some(depth + 1),
                ')' if depth > 0 => Some(depth - 1),
                ')' => None,
                _ => Some(depth),
            });

        assert_eq!(depth, Some(0));
    }
}
