#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

pub const KNOWN_FLAGS: &[&str] = &[
    "--config",
    "--artifact",
    "--rpc-url",
    "--confirmations",
    "--admin",
    "--bidding-start",
    "--bidding-end",
    "--min-bid-price",
    "--nft-contract",
    "--total-supply",
    "--client-bin",
    "--base-dir",
    "--burn-cap",
    "--json",
    "--dry-run",
    "--help",
    "--version",
];

pub const HELP_TEXT: &str = "\
Originate the BatchAuction contract on a Tezos network.

Usage: batch-auction-deploy <network> [options]

  <network>              network name; the node is https://<network>.smartpy.io

Options:
  --config <path>        config file (default: .deploy/config.toml)
  --artifact <path>      compiled contract (default: smart_contracts/michelson/batch_auction.tz)
  --rpc-url <url>        node URL, replaces the one derived from <network>
  --confirmations <n>    blocks to wait for after inclusion, at least 1 (default: 1)
  --admin <address>      auction administrator
  --bidding-start <ts>   ISO 8601 time at which bidding opens
  --bidding-end <ts>     ISO 8601 time at which bidding closes
  --min-bid-price <n>    minimum bid per NFT, in mutez
  --nft-contract <addr>  FA2 contract minting the NFTs
  --total-supply <n>     number of NFTs on sale
  --client-bin <path>    octez-client binary (default: octez-client)
  --base-dir <path>      octez-client base directory
  --burn-cap <tez>       maximum storage burn (default: 5)
  --json                 print the result as a single JSON object
  --dry-run              print the endpoint and storage without originating
  -h, --help             show this help
  -v, --version          show the version

The signing key is read from PRIVATE_KEY (a .env file is honoured) and
imported with `octez-client import secret key`, so it is briefly visible in
that process's arguments and then stored in the base directory. Point
--base-dir at a private per-run directory (e.g. one made with `mktemp -d`)
and remove it afterwards, or supply an `encrypted:` key.
Each successful run originates a NEW contract; re-running is not idempotent.
";

#[must_use]
pub fn suggest_flags(typo: &str) -> Vec<String> {
    KNOWN_FLAGS
        .iter()
        .map(|flag| (flag, strsim::levenshtein(typo, flag)))
        .filter(|(_, dist)| *dist <= 3)
        .min_by_key(|(_, dist)| *dist)
        .map(|(flag, _)| vec![(*flag).to_string()])
        .unwrap_or_default()
}
