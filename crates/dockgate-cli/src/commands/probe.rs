use crate::probe::probe_version;
use dockgate_preflight::VersionChecker;
use tracing::info;

pub fn run(checker: &VersionChecker, runtime_bin: &str, json_output: bool) -> Result<u8, String> {
    let version_string = probe_version(runtime_bin).map_err(|e| e.to_string())?;
    info!("{runtime_bin} reports {version_string}");
    super::report(checker, &version_string, json_output)
}
