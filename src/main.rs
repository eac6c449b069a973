#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use deployer::cli::{parse_cli_args, suggest_flags, CliAction, CliError, DeployArgs, OutputFormat, HELP_TEXT};
use deployer::config::{load_config, private_key_from_env};
use deployer::output::{emit_dry_run, emit_error, emit_result};
use deployer::{render_storage, DeployError, Deployer, OctezClient, Result};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = match parse_cli_args(&args) {
        Ok(CliAction::ShowHelp) => {
            print!("{HELP_TEXT}");
            0
        }
        Ok(CliAction::ShowVersion) => {
            println!("batch-auction-deploy {}", env!("CARGO_PKG_VERSION"));
            0
        }
        Ok(CliAction::Deploy(deploy_args)) => run(deploy_args).await,
        Err(err) => {
            let json = args.iter().any(|arg| arg == "--json");
            report_cli_error(err, json)
        }
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn report_cli_error(err: CliError, json: bool) -> i32 {
    let suggestion = match &err {
        CliError::UnknownFlag { flag } => suggest_flags(flag).into_iter().next(),
        _ => None,
    };
    let error = DeployError::from(err);

    if json {
        emit_error(OutputFormat::Json, &error);
    } else {
        eprintln!("{error}");
        if let Some(suggestion) = suggestion {
            eprintln!("Did you mean: {suggestion}?");
        }
        eprintln!("Run 'batch-auction-deploy --help' for usage");
    }
    error.exit_code()
}

async fn run(args: DeployArgs) -> i32 {
    let output = args.output;
    match deploy(args).await {
        Ok(code) => code,
        Err(err) => {
            emit_error(output, &err);
            err.exit_code()
        }
    }
}

async fn deploy(args: DeployArgs) -> Result<i32> {
    let DeployArgs {
        network,
        overrides,
        output,
        dry_run,
    } = args;

    let config = load_config(&network, overrides).await?;
    let endpoint = config.endpoint()?;
    let params = config.parameters();

    if dry_run {
        emit_dry_run(output, &endpoint, &config.artifact_path, &render_storage(&params));
        return Ok(0);
    }

    let private_key = private_key_from_env()?;
    let client = OctezClient::new(config.octez_settings(private_key)?);

    let mut deployer =
        Deployer::new(config.artifact_path.clone()).with_confirmations(config.confirmations);
    if output == OutputFormat::Json {
        deployer = deployer.quiet();
    }

    info!(%network, %endpoint, "deploying BatchAuction");
    let result = deployer.deploy(&params, &client).await;
    emit_result(output, &result);
    Ok(result.exit_code())
}
