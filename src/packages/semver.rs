use std::cmp::Ordering;

use semver::Version;

use crate::packages::error::RegistryError;

/// Parse a version label into a semver::Version, normalizing partial versions.
///
/// Catalog labels are usually `MAJOR.MINOR`, so missing components are
/// padded with zeros.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "1.2" -> Version(1, 2, 0)
/// - "1.2.3" -> Version(1, 2, 3)
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Same as [`parse_version`], failing with the offending label.
pub fn parse_label(label: &str) -> Result<Version, RegistryError> {
    parse_version(label).ok_or_else(|| RegistryError::InvalidVersion(label.to_string()))
}

/// Newest-first ordering on (major, minor, patch).
pub fn compare_descending(a: &Version, b: &Version) -> Ordering {
    b.cmp(a)
}
