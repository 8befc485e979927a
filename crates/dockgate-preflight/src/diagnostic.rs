use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Machine-readable reason code attached to a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    WindowsContainers,
    VersionLow,
}

impl Reason {
    pub fn code(self) -> &'static str {
        match self {
            Self::WindowsContainers => "PROVIDER_DOCKER_WINDOWS_CONTAINERS",
            Self::VersionLow => "PROVIDER_DOCKER_VERSION_LOW",
        }
    }

    /// Suggested user action. Rendering it is up to the caller; it is not
    /// part of the diagnostic's `fix` field.
    pub fn hint(self) -> &'static str {
        match self {
            Self::WindowsContainers => {
                "Change container type to \"linux\" in Docker Desktop settings"
            }
            Self::VersionLow => "Upgrade Docker to a newer release",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Reason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Error classification of a failed check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PreflightError {
    #[error("docker container type is windows")]
    WindowsContainers,
    #[error("docker version is less than the minimum required")]
    MinVersionNotMet,
}

impl Serialize for PreflightError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a version check.
///
/// A default value means the installation passed with nothing to report.
/// `error` is only ever set together with `reason`, and `fix` is only
/// non-empty when the version was accepted without being verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiagnosticResult {
    pub reason: Option<Reason>,
    pub error: Option<PreflightError>,
    pub fix: String,
}

impl DiagnosticResult {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failure(reason: Reason, error: PreflightError) -> Self {
        Self {
            reason: Some(reason),
            error: Some(error),
            fix: String::new(),
        }
    }

    pub fn advisory(fix: String) -> Self {
        Self {
            reason: None,
            error: None,
            fix,
        }
    }

    /// The reason code, or `""` when there is none.
    pub fn reason_code(&self) -> &'static str {
        self.reason.map_or("", Reason::code)
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none() && self.fix.is_empty()
    }

    pub fn is_blocking(&self) -> bool {
        self.error.is_some()
    }

    pub fn needs_improvement(&self) -> bool {
        self.error.is_none() && !self.fix.is_empty()
    }
}
