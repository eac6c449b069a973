#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

mod action;
mod args;
mod parser;

pub use action::{CliAction, DeployArgs, OutputFormat};
pub use args::{suggest_flags, HELP_TEXT, KNOWN_FLAGS};
pub use parser::{parse_cli_args, CliError};

#[cfg(test)]
mod tests;
