//! Interpretation of runtime version strings.
//!
//! A raw string has the shape `<platform>-<version>`. The version part is
//! classified, in order, as a trusted build tag (`dev`, `library-import`), a
//! numeric `MM.mm[.pp]` version with optional `-`, `+` or `~` metadata
//! suffix, or an unparsable residue.

use crate::platform::Platform;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// First two components need at least two digits (`%02d`). Build metadata may
// follow `-`, `+` or `~`, e.g. `20.10.7-20180720214833-f61e0f7`, `20.10.7+azure`.
// Letters glued to a component (`18.09.1rc`, `18.09.x`) are not metadata.
static NUMERIC_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,})\.(\d{2,})(?:\.(\d+))?(?:[-+~].*)?$").expect("valid version pattern")
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VersionParseError {
    #[error("invalid version '{0}': expected MAJOR.MINOR[.PATCH]")]
    Format(String),
    #[error("invalid version component '{0}'")]
    Component(String),
}

/// A `major.minor[.patch]` version.
///
/// `patch` is `None` when the reported version did not carry one. An absent
/// patch is never compared, so `18.09` meets a minimum of `18.09.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionTriplet {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
}

impl VersionTriplet {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    pub const fn without_patch(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    /// Copy with an absent patch set to zero, for use as a minimum.
    #[must_use]
    pub const fn with_default_patch(self) -> Self {
        Self {
            major: self.major,
            minor: self.minor,
            patch: match self.patch {
                Some(patch) => Some(patch),
                None => Some(0),
            },
        }
    }

    /// Whether this version is at least `minimum`, comparing only the
    /// components both sides supplied.
    pub fn meets(&self, minimum: &Self) -> bool {
        if self.major != minimum.major {
            return self.major > minimum.major;
        }
        if self.minor != minimum.minor {
            return self.minor > minimum.minor;
        }
        match (self.patch, minimum.patch) {
            (Some(patch), Some(min_patch)) => patch >= min_patch,
            _ => true,
        }
    }
}

impl fmt::Display for VersionTriplet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}", self.major, self.minor)?;
        if let Some(patch) = self.patch {
            write!(f, ".{patch}")?;
        }
        Ok(())
    }
}

impl FromStr for VersionTriplet {
    type Err = VersionParseError;

    /// Parse a configured version such as `18.09.0`, `18.9.0` or `18.09`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split('.').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(VersionParseError::Format(s.to_owned()));
        }
        let mut nums = Vec::with_capacity(parts.len());
        for part in &parts {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(VersionParseError::Component((*part).to_owned()));
            }
            nums.push(
                part.parse::<u32>()
                    .map_err(|_| VersionParseError::Component((*part).to_owned()))?,
            );
        }
        Ok(Self {
            major: nums[0],
            minor: nums[1],
            patch: nums.get(2).copied(),
        })
    }
}

impl TryFrom<String> for VersionTriplet {
    type Error = VersionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<VersionTriplet> for String {
    fn from(v: VersionTriplet) -> Self {
        v.to_string()
    }
}

/// Non-numeric version identifiers of legitimate source builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTag {
    /// Set by `make binary && make install`.
    Dev,
    /// Set when the daemon is built with a plain `go build` of the package.
    LibraryImport,
}

impl BuildTag {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "dev" => Some(Self::Dev),
            "library-import" => Some(Self::LibraryImport),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dev => "dev",
            Self::LibraryImport => "library-import",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedVersion {
    Numeric(VersionTriplet),
    Trusted(BuildTag),
    Unparsable,
}

impl ParsedVersion {
    pub fn parse(version: &str) -> Self {
        if let Some(tag) = BuildTag::from_tag(version) {
            return Self::Trusted(tag);
        }
        parse_numeric(version).map_or(Self::Unparsable, Self::Numeric)
    }
}

fn parse_numeric(version: &str) -> Option<VersionTriplet> {
    let caps = NUMERIC_VERSION.captures(version)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .map(|m| m.as_str().parse())
        .transpose()
        .ok()?;
    Some(VersionTriplet {
        major,
        minor,
        patch,
    })
}

/// A raw version string split into its platform and classified version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretedVersion {
    pub platform: Platform,
    /// The version part exactly as reported.
    pub detected: String,
    pub version: ParsedVersion,
}

/// Split `<platform>-<version>` at the first dash and classify the version.
///
/// A string without a dash has no platform prefix; it is treated as an
/// unsupported-format version on an unknown platform.
pub fn interpret(raw: &str) -> InterpretedVersion {
    match raw.split_once('-') {
        Some((platform, version)) => InterpretedVersion {
            platform: Platform::from_tag(platform),
            detected: version.to_owned(),
            version: ParsedVersion::parse(version),
        },
        None => InterpretedVersion {
            platform: Platform::Other(String::new()),
            detected: raw.to_owned(),
            version: ParsedVersion::Unparsable,
        },
    }
}
