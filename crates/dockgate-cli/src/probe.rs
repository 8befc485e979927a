use std::io::ErrorKind;
use std::process::Command;
use thiserror::Error;
use tracing::{debug, warn};

/// Go template passed to `docker version --format`, producing `linux-20.10.7`.
pub const VERSION_FORMAT: &str = "{{.Server.Os}}-{{.Server.Version}}";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("runtime probe: '{0}' not found in PATH")]
    NotFound(String),
    #[error("runtime probe: cannot connect to the daemon (is it running?): {0}")]
    DaemonUnreachable(String),
    #[error("runtime probe: permission denied talking to the daemon: {0}")]
    PermissionDenied(String),
    #[error("runtime probe: '{bin} version' exited with {status}: {stderr}")]
    Failed {
        bin: String,
        status: String,
        stderr: String,
    },
    #[error("runtime probe: '{0} version' printed nothing")]
    EmptyOutput(String),
    #[error("runtime probe: failed to run '{bin}': {source}")]
    Io {
        bin: String,
        source: std::io::Error,
    },
}

/// Ask the runtime binary for its `<platform>-<version>` string.
pub fn probe_version(runtime_bin: &str) -> Result<String, ProbeError> {
    debug!("probing {runtime_bin} version");
    let output = Command::new(runtime_bin)
        .args(["version", "--format", VERSION_FORMAT])
        .output()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => ProbeError::NotFound(runtime_bin.to_owned()),
            _ => ProbeError::Io {
                bin: runtime_bin.to_owned(),
                source: e,
            },
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        warn!("{runtime_bin} version failed: {stderr}");
        return Err(classify_failure(
            runtime_bin,
            &output.status.to_string(),
            stderr,
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.trim();
    if version.is_empty() {
        return Err(ProbeError::EmptyOutput(runtime_bin.to_owned()));
    }
    debug!("{runtime_bin} reported version string {version}");
    Ok(version.to_owned())
}

/// Map a failed `version` invocation to a probe error using its stderr.
pub fn classify_failure(runtime_bin: &str, status: &str, stderr: String) -> ProbeError {
    let lower = stderr.to_lowercase();
    if lower.contains("cannot connect to the docker daemon")
        || lower.contains("is the docker daemon running")
        || lower.contains("error during connect")
    {
        ProbeError::DaemonUnreachable(stderr)
    } else if lower.contains("permission denied") {
        ProbeError::PermissionDenied(stderr)
    } else {
        ProbeError::Failed {
            bin: runtime_bin.to_owned(),
            status: status.to_owned(),
            stderr,
        }
    }
}
