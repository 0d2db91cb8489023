//! Domain value objects: WorkspaceName, RequiredVersion, ToolVersion.
//!
//! # Design
//!
//! These are pure value types, equality-by-value, no identity. This file's
//! only job is to define the types, their string representations, their
//! `FromStr` parsers, and the version compatibility predicate.

use crate::domain::error::DomainError;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── WorkspaceName ────────────────────────────────────────────────────────────

/// A Terraform workspace handle.
///
/// Only one workspace is active at a time for a given project directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WorkspaceName(String);

impl WorkspaceName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidWorkspace {
                value: name,
                reason: "workspace name is empty".into(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WorkspaceName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for WorkspaceName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for WorkspaceName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WorkspaceName> for String {
    fn from(value: WorkspaceName) -> Self {
        value.0
    }
}

// ── ToolVersion ──────────────────────────────────────────────────────────────

/// The version reported by the installed Terraform binary.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ToolVersion(Version);

impl ToolVersion {
    pub fn new(version: Version) -> Self {
        Self(version)
    }

    pub fn version(&self) -> &Version {
        &self.0
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ToolVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_lenient(s).map(Self)
    }
}

// ── RequiredVersion ──────────────────────────────────────────────────────────

/// The Terraform version required by the configuration.
///
/// `Latest` places no constraint on the installed binary. A pinned version is
/// satisfied by any installed version that is greater than or equal to it
/// within the same major version.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequiredVersion {
    #[default]
    Latest,
    Pinned {
        version: Version,
        /// The string as written in the configuration.
        configured: String,
    },
}

impl RequiredVersion {
    pub const LATEST: &'static str = "latest";

    pub fn is_latest(&self) -> bool {
        matches!(self, Self::Latest)
    }

    /// The requirement as configured, before normalisation.
    pub fn configured(&self) -> &str {
        match self {
            Self::Latest => Self::LATEST,
            Self::Pinned { configured, .. } => configured,
        }
    }

    /// Whether `installed` is compatible with this requirement.
    pub fn is_satisfied_by(&self, installed: &ToolVersion) -> bool {
        match self {
            Self::Latest => true,
            Self::Pinned {
                version: required, ..
            } => {
                let installed = installed.version();
                installed.major == required.major && installed >= required
            }
        }
    }
}

impl fmt::Display for RequiredVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => f.write_str(Self::LATEST),
            Self::Pinned { version, .. } => version.fmt(f),
        }
    }
}

impl FromStr for RequiredVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(Self::LATEST) {
            return Ok(Self::Latest);
        }
        parse_lenient(s).map(|version| Self::Pinned {
            version,
            configured: s.trim().to_string(),
        })
    }
}

/// Parse a version, accepting a leading `v` and missing minor/patch parts.
fn parse_lenient(raw: &str) -> Result<Version, DomainError> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let core_len = trimmed
        .find(|c| c == '-' || c == '+')
        .unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(core_len);
    let padded = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };

    Version::parse(&padded).map_err(|e| DomainError::InvalidVersion {
        value: raw.to_string(),
        reason: e.to_string(),
    })
}
