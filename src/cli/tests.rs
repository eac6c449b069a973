#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

#[cfg(test)]
mod bdd_tests {
    #![allow(clippy::expect_used, clippy::panic)]

    use crate::cli::{parse_cli_args, suggest_flags, CliAction, CliError, DeployArgs, OutputFormat};
    use std::path::PathBuf;

    fn given_cli_args(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_string()).collect()
    }

    fn deploy_args(args: &[&str]) -> DeployArgs {
        match parse_cli_args(&given_cli_args(args)).expect("parse") {
            CliAction::Deploy(deploy) => deploy,
            other => panic!("expected deploy action, got {other:?}"),
        }
    }

    #[test]
    fn when_help_flag_then_show_help() {
        let action = parse_cli_args(&given_cli_args(&["ghostnet", "-h"])).expect("parse");

        assert!(matches!(action, CliAction::ShowHelp));
    }

    #[test]
    fn when_version_flag_then_show_version() {
        let action = parse_cli_args(&given_cli_args(&["--version"])).expect("parse");

        assert!(matches!(action, CliAction::ShowVersion));
    }

    #[test]
    fn when_only_network_then_deploy_with_text_output() {
        let deploy = deploy_args(&["ghostnet"]);

        assert_eq!(deploy.network, "ghostnet");
        assert_eq!(deploy.output, OutputFormat::Text);
        assert!(!deploy.dry_run);
        assert_eq!(deploy.overrides, crate::config::ConfigOverrides::default());
    }

    #[test]
    fn when_no_network_then_missing_required_argument() {
        let err = parse_cli_args(&given_cli_args(&["--json"])).expect_err("missing network");

        assert_eq!(
            err,
            CliError::MissingRequiredArg {
                arg: "network".to_string()
            }
        );
        assert_eq!(err.to_string(), "Missing required argument: network");
    }

    #[test]
    fn when_value_flags_given_then_overrides_are_populated() {
        let deploy = deploy_args(&[
            "--artifact",
            "out/batch_auction.tz",
            "mainnet",
            "--confirmations",
            "2",
            "--admin=tz1Admin",
            "--total-supply",
            "10",
            "--json",
            "--dry-run",
        ]);

        assert_eq!(deploy.network, "mainnet");
        assert_eq!(
            deploy.overrides.artifact_path,
            Some(PathBuf::from("out/batch_auction.tz"))
        );
        assert_eq!(deploy.overrides.confirmations, Some(2));
        assert_eq!(deploy.overrides.admin.as_deref(), Some("tz1Admin"));
        assert_eq!(deploy.overrides.total_supply.as_deref(), Some("10"));
        assert_eq!(deploy.output, OutputFormat::Json);
        assert!(deploy.dry_run);
    }

    #[test]
    fn when_flag_value_missing_then_missing_required_argument() {
        let err = parse_cli_args(&given_cli_args(&["ghostnet", "--admin", "--json"]))
            .expect_err("missing value");

        assert_eq!(
            err,
            CliError::MissingRequiredArg {
                arg: "admin".to_string()
            }
        );
    }

    #[test]
    fn when_confirmations_not_numeric_then_invalid_value() {
        let err = parse_cli_args(&given_cli_args(&["ghostnet", "--confirmations", "two"]))
            .expect_err("invalid value");

        assert!(matches!(err, CliError::InvalidArgValue { ref arg, .. } if arg == "confirmations"));
    }

    #[test]
    fn when_confirmations_zero_then_invalid_value() {
        let err = parse_cli_args(&given_cli_args(&["ghostnet", "--confirmations", "0"]))
            .expect_err("zero confirmations");

        assert_eq!(
            err,
            CliError::InvalidArgValue {
                arg: "confirmations".to_string(),
                error: "must be at least 1".to_string(),
            }
        );
    }

    #[test]
    fn when_unknown_flag_then_error_and_suggestion() {
        let err = parse_cli_args(&given_cli_args(&["ghostnet", "--artefact", "x.tz"]))
            .expect_err("unknown flag");

        assert_eq!(err.to_string(), "Unknown flag: --artefact");
        assert_eq!(suggest_flags("--artefact"), vec!["--artifact".to_string()]);
    }

    #[test]
    fn when_two_networks_then_unexpected_argument() {
        let err = parse_cli_args(&given_cli_args(&["ghostnet", "mainnet"]))
            .expect_err("two positionals");

        assert_eq!(
            err,
            CliError::UnexpectedArg {
                arg: "mainnet".to_string()
            }
        );
    }

    #[test]
    fn when_typo_is_far_from_every_flag_then_no_suggestion() {
        assert!(suggest_flags("--completely-unrelated").is_empty());
    }
}
