//! Version preflight checks for locally installed container runtimes.
//!
//! This crate decides whether the version string reported by a Docker
//! installation (`<platform>-<version>`, e.g. `linux-20.10.7`) is usable:
//! the platform gate (`platform`) rejects Windows-containers hosts, the
//! interpreter (`version`) classifies the version part, and the checker
//! (`check`) compares it against a minimum and builds a `DiagnosticResult`.
//! Everything here is pure; obtaining the string is the caller's job.

pub mod check;
pub mod config;
pub mod diagnostic;
pub mod platform;
pub mod version;

pub use check::{check_version, VersionChecker, MIN_DOCKER_VERSION};
pub use config::{ConfigError, PreflightConfig};
pub use diagnostic::{DiagnosticResult, PreflightError, Reason};
pub use platform::{gate, Platform};
pub use version::{
    interpret, BuildTag, InterpretedVersion, ParsedVersion, VersionParseError, VersionTriplet,
};
