use crate::diagnostic::{DiagnosticResult, PreflightError, Reason};
use std::fmt;

/// Host platform tag taken from the `<platform>-` prefix of a version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Windows hosts run Docker in Windows-containers mode by default.
    Windows,
    Other(String),
}

impl Platform {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "windows" => Self::Windows,
            other => Self::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Windows => "windows",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Windows)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reject platforms whose default execution mode cannot be driven.
///
/// Returns `None` when the platform may proceed to version interpretation.
pub fn gate(platform: &Platform) -> Option<DiagnosticResult> {
    if platform.is_supported() {
        None
    } else {
        Some(DiagnosticResult::failure(
            Reason::WindowsContainers,
            PreflightError::WindowsContainers,
        ))
    }
}
