#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![forbid(unsafe_code)]

use crate::{DeployError, Result};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;

const MAX_EXTERNAL_OUTPUT_CAPTURE_BYTES: usize = 1_048_576;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub truncated: bool,
}

impl CommandOutput {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Suffix for errors derived from parsing the captured output.
    #[must_use]
    pub const fn truncation_note(&self) -> &'static str {
        if self.truncated {
            " (client output exceeded the capture limit and was truncated)"
        } else {
            ""
        }
    }

    /// Last non-empty line of stderr, falling back to stdout
    #[must_use]
    pub fn failure_detail(&self) -> &str {
        last_line(&self.stderr)
            .or_else(|| last_line(&self.stdout))
            .unwrap_or("no output")
    }
}

fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rev().find(|line| !line.is_empty())
}

struct StreamCapture {
    bytes: Vec<u8>,
    truncated: bool,
}

/// Runs `program` to completion, capturing bounded stdout and stderr.
///
/// Arguments are never logged since they may carry key material.
///
/// # Errors
/// Returns `DeployError::Io` if the program cannot be spawned, cannot be waited
/// on or does not exit within `timeout`, and `DeployError::Internal` if an
/// output reader task fails.
pub async fn run_external_command(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<CommandOutput> {
    tracing::debug!(program, arg_count = args.len(), "running external command");

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|err| {
            DeployError::Io(std::io::Error::new(
                err.kind(),
                format!("Failed to execute {program}: {err}"),
            ))
        })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| DeployError::Internal(format!("Failed to capture {program} stdout")))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| DeployError::Internal(format!("Failed to capture {program} stderr")))?;

    let stdout_task = tokio::spawn(async move {
        capture_stream_limited(stdout, MAX_EXTERNAL_OUTPUT_CAPTURE_BYTES).await
    });
    let stderr_task = tokio::spawn(async move {
        capture_stream_limited(stderr, MAX_EXTERNAL_OUTPUT_CAPTURE_BYTES).await
    });

    let status = if let Ok(wait_result) = tokio::time::timeout(timeout, child.wait()).await {
        wait_result.map_err(|err| {
            DeployError::Io(std::io::Error::new(
                err.kind(),
                format!("Failed to wait for {program}: {err}"),
            ))
        })?
    } else {
        let _ = child.kill().await;
        return Err(DeployError::Io(std::io::Error::new(
            ErrorKind::TimedOut,
            format!(
                "{program} timed out after {} ms",
                timeout.as_millis()
            ),
        )));
    };

    let stdout_capture = stdout_task
        .await
        .map_err(|err| DeployError::Internal(format!("Failed to read {program} stdout: {err}")))??;
    let stderr_capture = stderr_task
        .await
        .map_err(|err| DeployError::Internal(format!("Failed to read {program} stderr: {err}")))??;

    let exit_code = status.code().map_or(1, |code| code);
    tracing::debug!(program, exit_code, "external command finished");
    if stdout_capture.truncated || stderr_capture.truncated {
        tracing::warn!(
            program,
            limit_bytes = MAX_EXTERNAL_OUTPUT_CAPTURE_BYTES,
            "external command output truncated"
        );
    }

    Ok(CommandOutput {
        exit_code,
        stdout: String::from_utf8_lossy(&stdout_capture.bytes).into_owned(),
        stderr: String::from_utf8_lossy(&stderr_capture.bytes).into_owned(),
        truncated: stdout_capture.truncated || stderr_capture.truncated,
    })
}

async fn capture_stream_limited<R>(mut stream: R, max_bytes: usize) -> Result<StreamCapture>
where
    R: AsyncRead + Unpin,
{
    let mut bytes = Vec::new();
    let mut truncated = false;
    let mut chunk = [0_u8; 8_192];

    loop {
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            break;
        }

        let remaining = max_bytes.saturating_sub(bytes.len());
        if remaining == 0 {
            truncated = true;
            continue;
        }

        let to_copy = remaining.min(read);
        bytes.extend_from_slice(&chunk[..to_copy]);
        if to_copy < read {
            truncated = true;
        }
    }

    Ok(StreamCapture { bytes, truncated })
}
