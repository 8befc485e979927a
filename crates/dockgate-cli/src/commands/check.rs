use dockgate_preflight::VersionChecker;
use tracing::debug;

pub fn run(
    checker: &VersionChecker,
    version_string: &str,
    json_output: bool,
) -> Result<u8, String> {
    debug!(
        "checking '{version_string}' against minimum {}",
        checker.minimum()
    );
    super::report(checker, version_string, json_output)
}
