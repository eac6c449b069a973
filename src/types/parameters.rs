use serde::{Deserialize, Serialize};

/// Caller-supplied values substituted into the BatchAuction storage.
///
/// Every field is kept exactly as given. Addresses, timestamps and integers are
/// not checked locally; a malformed value is only rejected by the chain when the
/// origination is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentParameters {
    admin: String,
    bidding_start: String,
    bidding_end: String,
    min_bid_price: String,
    nft_contract_address: String,
    total_supply: String,
}

impl DeploymentParameters {
    #[must_use]
    pub fn new(
        admin: impl Into<String>,
        bidding_start: impl Into<String>,
        bidding_end: impl Into<String>,
        min_bid_price: impl Into<String>,
        nft_contract_address: impl Into<String>,
        total_supply: impl Into<String>,
    ) -> Self {
        Self {
            admin: admin.into(),
            bidding_start: bidding_start.into(),
            bidding_end: bidding_end.into(),
            min_bid_price: min_bid_price.into(),
            nft_contract_address: nft_contract_address.into(),
            total_supply: total_supply.into(),
        }
    }

    #[must_use]
    pub fn admin(&self) -> &str {
        &self.admin
    }

    /// ISO 8601 timestamp at which bidding opens
    #[must_use]
    pub fn bidding_start(&self) -> &str {
        &self.bidding_start
    }

    /// ISO 8601 timestamp at which bidding closes
    #[must_use]
    pub fn bidding_end(&self) -> &str {
        &self.bidding_end
    }

    /// Minimum bid price per NFT, in mutez
    #[must_use]
    pub fn min_bid_price(&self) -> &str {
        &self.min_bid_price
    }

    #[must_use]
    pub fn nft_contract_address(&self) -> &str {
        &self.nft_contract_address
    }

    #[must_use]
    pub fn total_supply(&self) -> &str {
        &self.total_supply
    }
}
