use assert_cmd::Command;
use predicates::str::contains;
use serde_json::Value;

fn deploy_command(workdir: &std::path::Path) -> Command {
    let binary_path = assert_cmd::cargo::cargo_bin!("batch-auction-deploy");
    let mut command = Command::new(binary_path);
    command.current_dir(workdir).env_remove("PRIVATE_KEY");
    command
}

fn parse_json_stdout(output: &[u8]) -> Result<Value, String> {
    let raw = String::from_utf8_lossy(output).trim().to_string();
    serde_json::from_str::<Value>(&raw).map_err(|err| {
        format!("Given CLI JSON output, When parsed, Then parsing should succeed: {err}. Raw: {raw}")
    })
}

#[test]
fn given_help_flag_when_invoked_then_usage_is_printed() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .args(["--help"])
        .assert()
        .success()
        .stdout(contains("Usage: batch-auction-deploy <network>"))
        .stdout(contains("not idempotent"))
        .stdout(contains("private per-run directory"));
    Ok(())
}

#[test]
fn given_version_flag_when_invoked_then_package_version_is_printed() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .args(["-v"])
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn given_no_network_when_invoked_then_missing_argument_exits_with_two() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .assert()
        .code(2)
        .stderr(contains("Missing required argument: network"));
    Ok(())
}

#[test]
fn given_typo_flag_when_invoked_then_suggestion_is_rendered_on_stderr() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .args(["ghostnet", "--dryrun"])
        .assert()
        .code(2)
        .stderr(contains("Unknown flag: --dryrun"))
        .stderr(contains("Did you mean: --dry-run?"));
    Ok(())
}

#[test]
fn given_dry_run_when_invoked_then_endpoint_and_storage_are_printed() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .args([
            "ghostnet",
            "--dry-run",
            "--admin",
            "tz1A",
            "--bidding-start",
            "2021-01-01T00:00:00Z",
            "--bidding-end",
            "2021-01-02T00:00:00Z",
            "--min-bid-price",
            "500",
            "--nft-contract",
            "KT1X",
            "--total-supply",
            "10",
        ])
        .assert()
        .success()
        .stdout(contains("Endpoint: https://ghostnet.smartpy.io/"))
        .stdout(contains(
            "(Pair (Pair (Pair {} (Pair \"tz1A\" \"2021-01-02T00:00:00Z\")) (Pair \"2021-01-01T00:00:00Z\" (Pair {} {}))) (Pair (Pair 500 (Pair 0 0)) (Pair (Pair \"KT1X\" {}) (Pair 0 10))))",
        ))
        .stdout(contains("nothing was originated"));
    Ok(())
}

#[test]
fn given_dry_run_in_json_mode_when_invoked_then_single_envelope_is_printed() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let assert = deploy_command(dir.path())
        .args(["mainnet", "--dry-run", "--json", "--rpc-url", "http://127.0.0.1:8732"])
        .assert()
        .success();

    let json = parse_json_stdout(&assert.get_output().stdout)?;
    if json["ok"] != Value::Bool(true) || !json["t"].is_number() {
        return Err(format!("Given --dry-run --json, Then ok/t should be set. Got: {json}"));
    }
    if json["d"]["endpoint"] != Value::String("http://127.0.0.1:8732/".to_string()) {
        return Err(format!("Given --rpc-url, Then it should replace the network endpoint. Got: {json}"));
    }
    if !json["d"]["storage"]
        .as_str()
        .is_some_and(|storage| storage.contains("\"tz1ZczbHu1iLWRa88n9CUiCKDGex5ticp19S\""))
    {
        return Err(format!("Given no --admin, Then the default admin should be used. Got: {json}"));
    }
    Ok(())
}

#[test]
fn given_config_file_when_dry_run_then_file_values_are_used() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let config_dir = dir.path().join(".deploy");
    std::fs::create_dir_all(&config_dir).map_err(|e| e.to_string())?;
    std::fs::write(
        config_dir.join("config.toml"),
        "admin = \"tz1FromFile\"\nprovider_domain = \"example.org\"\n",
    )
    .map_err(|e| e.to_string())?;

    deploy_command(dir.path())
        .args(["ghostnet", "--dry-run"])
        .assert()
        .success()
        .stdout(contains("Endpoint: https://ghostnet.example.org/"))
        .stdout(contains("\"tz1FromFile\""));
    Ok(())
}

#[test]
fn given_missing_private_key_when_deploying_then_config_error_exits_with_two() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    deploy_command(dir.path())
        .args(["ghostnet"])
        .assert()
        .code(2)
        .stderr(contains("PRIVATE_KEY is not set"));
    Ok(())
}

#[test]
fn given_missing_artifact_when_deploying_then_load_failure_exits_with_three() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let missing = dir.path().join("missing.tz");
    let assert = deploy_command(dir.path())
        .env("PRIVATE_KEY", "edsk-not-used")
        .args([
            "ghostnet",
            "--json",
            "--client-bin",
            "/nonexistent/octez-client",
            "--artifact",
        ])
        .arg(&missing)
        .assert()
        .code(3);

    let json = parse_json_stdout(&assert.get_output().stdout)?;
    if json["ok"] != Value::Bool(false) || json["err"]["code"] != Value::String("LOAD".to_string()) {
        return Err(format!("Given a missing artifact, Then a LOAD failure is expected. Got: {json}"));
    }
    Ok(())
}

#[test]
fn given_json_mode_without_network_when_invoked_then_cli_error_envelope_is_printed(
) -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let assert = deploy_command(dir.path()).args(["--json"]).assert().code(2);

    let json = parse_json_stdout(&assert.get_output().stdout)?;
    if json["err"]["code"] != Value::String("CLI_ERROR".to_string()) {
        return Err(format!("Given --json without network, Then code should be CLI_ERROR. Got: {json}"));
    }
    if json["err"]["msg"] != Value::String("Missing required argument: network".to_string()) {
        return Err(format!("Given --json without network, Then msg should name the argument. Got: {json}"));
    }
    Ok(())
}

#[test]
fn given_missing_artifact_in_text_mode_when_deploying_then_failure_is_printed_once(
) -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let missing = dir.path().join("missing.tz");
    let assert = deploy_command(dir.path())
        .env("PRIVATE_KEY", "edsk-not-used")
        .args(["ghostnet", "--client-bin", "/nonexistent/octez-client", "--artifact"])
        .arg(&missing)
        .assert()
        .code(3);

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let occurrences = stdout.matches("Failed to load contract artifact").count();
    if occurrences != 1 || !stdout.contains("Deployment failed: Failed to load contract artifact") {
        return Err(format!(
            "Given a missing artifact, Then the failure should be reported exactly once. Got: {stdout}"
        ));
    }
    Ok(())
}
