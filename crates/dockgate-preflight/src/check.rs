use crate::config::PreflightConfig;
use crate::diagnostic::{DiagnosticResult, PreflightError, Reason};
use crate::platform::gate;
use crate::version::{interpret, InterpretedVersion, ParsedVersion, VersionTriplet};

/// Oldest Docker release known to work.
pub const MIN_DOCKER_VERSION: VersionTriplet = VersionTriplet::new(18, 9, 0);

pub const DEFAULT_RUNTIME_NAME: &str = "Docker";

/// Compares runtime version strings against a fixed minimum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChecker {
    minimum: VersionTriplet,
    runtime_name: String,
}

impl Default for VersionChecker {
    fn default() -> Self {
        Self::new(MIN_DOCKER_VERSION)
    }
}

impl VersionChecker {
    /// A minimum given without patch (e.g. `20.10`) is treated as `20.10.0`.
    pub fn new(minimum: VersionTriplet) -> Self {
        Self {
            minimum: minimum.with_default_patch(),
            runtime_name: DEFAULT_RUNTIME_NAME.to_owned(),
        }
    }

    pub fn from_config(config: &PreflightConfig) -> Self {
        Self::new(config.minimum_version).with_runtime_name(&config.runtime_name)
    }

    /// Name used in remediation messages, e.g. "Docker".
    #[must_use]
    pub fn with_runtime_name(mut self, name: &str) -> Self {
        self.runtime_name = name.to_owned();
        self
    }

    pub fn minimum(&self) -> VersionTriplet {
        self.minimum
    }

    pub fn runtime_name(&self) -> &str {
        &self.runtime_name
    }

    /// Check a `<platform>-<version>` string as reported by the runtime.
    ///
    /// The platform gate runs first, so an unsupported platform is reported
    /// whatever the version part says. Versions that cannot be verified are
    /// accepted with a remediation message in `fix`.
    pub fn check(&self, raw: &str) -> DiagnosticResult {
        self.check_interpreted(&interpret(raw))
    }

    /// Same as [`check`](Self::check) for a string already split by
    /// [`interpret`].
    pub fn check_interpreted(&self, interpreted: &InterpretedVersion) -> DiagnosticResult {
        if let Some(rejected) = gate(&interpreted.platform) {
            return rejected;
        }

        match interpreted.version {
            ParsedVersion::Numeric(version) if version.meets(&self.minimum) => {
                DiagnosticResult::ok()
            }
            ParsedVersion::Numeric(_) => {
                DiagnosticResult::failure(Reason::VersionLow, PreflightError::MinVersionNotMet)
            }
            ParsedVersion::Trusted(_) | ParsedVersion::Unparsable => {
                DiagnosticResult::advisory(self.install_official_fix(&interpreted.detected))
            }
        }
    }

    fn install_official_fix(&self, detected: &str) -> String {
        format!(
            "Install the official release of {} (Minimum recommended version is {}, current version is {detected})",
            self.runtime_name, self.minimum
        )
    }
}

/// Check `raw` against [`MIN_DOCKER_VERSION`].
pub fn check_version(raw: &str) -> DiagnosticResult {
    VersionChecker::default().check(raw)
}
