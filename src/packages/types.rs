//! Common types shared by typings and not-needed packages

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::packages::error::RegistryError;

/// Version of a typings package: a major version with an optional minor.
///
/// A missing minor matches every minor release of that major line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypingVersion {
    pub major: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minor: Option<u64>,
}

impl TypingVersion {
    pub fn new(major: u64, minor: Option<u64>) -> Self {
        Self { major, minor }
    }

    pub fn major(major: u64) -> Self {
        Self { major, minor: None }
    }

    /// Whether a concrete `major.minor` release satisfies this version.
    pub fn matches(&self, major: u64, minor: u64) -> bool {
        self.major == major && self.minor.is_none_or(|m| m == minor)
    }
}

impl fmt::Display for TypingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.minor {
            Some(minor) => write!(f, "{}.{}", self.major, minor),
            None => write!(f, "{}", self.major),
        }
    }
}

/// Version requested by a dependency: either any version or a typing version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "RawDependencyVersion")]
pub enum DependencyVersion {
    /// `*`, resolved to the latest tracked version
    Any,
    Typing(TypingVersion),
}

impl DependencyVersion {
    pub const WILDCARD: &'static str = "*";
}

impl From<TypingVersion> for DependencyVersion {
    fn from(version: TypingVersion) -> Self {
        DependencyVersion::Typing(version)
    }
}

impl fmt::Display for DependencyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DependencyVersion::Any => f.write_str(Self::WILDCARD),
            DependencyVersion::Typing(version) => version.fmt(f),
        }
    }
}

impl FromStr for DependencyVersion {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == Self::WILDCARD {
            return Ok(DependencyVersion::Any);
        }

        let invalid = || RegistryError::InvalidVersionSpecifier(s.to_string());
        let mut parts = s.strip_prefix('v').unwrap_or(s).split('.');
        let major = parts
            .next()
            .and_then(|p| p.parse::<u64>().ok())
            .ok_or_else(invalid)?;
        let minor = match parts.next() {
            Some(p) => Some(p.parse::<u64>().map_err(|_| invalid())?),
            None => None,
        };
        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(DependencyVersion::Typing(TypingVersion::new(major, minor)))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDependencyVersion {
    Wildcard(String),
    Typing(TypingVersion),
}

impl TryFrom<RawDependencyVersion> for DependencyVersion {
    type Error = RegistryError;

    fn try_from(raw: RawDependencyVersion) -> Result<Self, Self::Error> {
        match raw {
            RawDependencyVersion::Wildcard(s) if s == Self::WILDCARD => Ok(DependencyVersion::Any),
            RawDependencyVersion::Wildcard(s) => Err(RegistryError::InvalidVersionSpecifier(s)),
            RawDependencyVersion::Typing(version) => Ok(DependencyVersion::Typing(version)),
        }
    }
}

/// Identifies one resolvable package: a name plus the version requested.
///
/// Also the shape of a declared dependency in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
pub struct PackageId {
    pub name: String,
    pub version: DependencyVersion,
}

impl PackageId {
    pub fn new(name: impl Into<String>, version: impl Into<DependencyVersion>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// Licenses a typings package may be published under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum License {
    #[default]
    #[serde(rename = "MIT")]
    Mit,
    #[serde(rename = "Apache-2.0")]
    Apache20,
}

impl License {
    pub fn as_str(&self) -> &'static str {
        match self {
            License::Mit => "MIT",
            License::Apache20 => "Apache-2.0",
        }
    }

    /// Resolve the license declared in an upstream `package.json`.
    ///
    /// MIT is the default and must not be spelled out.
    pub fn from_package_json(license: Option<&str>) -> Result<Self, RegistryError> {
        match license {
            None => Ok(License::Mit),
            Some("MIT") => Err(RegistryError::RedundantLicense),
            Some("Apache-2.0") => Ok(License::Apache20),
            Some(other) => Err(RegistryError::InvalidLicense {
                license: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for License {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub github_username: Option<String>,
}

/// Redirects imports of `package_name` to a specific older version
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMapping {
    pub package_name: String,
    pub version: TypingVersion,
}

/// A runtime dependency copied into the published `package.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageJsonDependency {
    pub name: String,
    pub version: String,
}
