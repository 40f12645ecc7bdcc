//! All tracked versions of a single typings package

use indexmap::IndexMap;
use semver::Version;

use crate::packages::error::RegistryError;
use crate::packages::semver::{compare_descending, parse_label};
use crate::packages::types::{DependencyVersion, TypingVersion};
use crate::packages::typings::{TypingsData, TypingsDataRaw};

/// Versions of one package, ordered from newest to oldest.
///
/// Newest first so that the current version is published first; publishing
/// an older version would otherwise reset the "latest" tag.
#[derive(Debug, Clone)]
pub struct TypingsVersions {
    versions: Vec<(Version, TypingsData)>,
}

impl TypingsVersions {
    /// Build the index from version labels (e.g. `"1.2"`) to raw records.
    ///
    /// The newest version is marked latest. Fails on an empty map, on an
    /// unparseable label and on two labels naming the same `major.minor`.
    pub fn new(name: &str, data: IndexMap<String, TypingsDataRaw>) -> Result<Self, RegistryError> {
        let mut parsed = data
            .into_iter()
            .map(|(label, raw)| parse_label(&label).map(|version| (version, raw)))
            .collect::<Result<Vec<_>, _>>()?;

        if parsed.is_empty() {
            return Err(RegistryError::PackageNotFound(name.to_string()));
        }

        parsed.sort_by(|(a, _), (b, _)| compare_descending(a, b));
        // Lookups only see major.minor, so a patch difference is still a tie.
        if let Some(pair) = parsed
            .windows(2)
            .find(|pair| (pair[0].0.major, pair[0].0.minor) == (pair[1].0.major, pair[1].0.minor))
        {
            return Err(RegistryError::DuplicateVersion {
                name: name.to_string(),
                version: format!("{}.{}", pair[0].0.major, pair[0].0.minor),
            });
        }

        let versions = parsed
            .into_iter()
            .enumerate()
            .map(|(index, (version, raw))| (version, TypingsData::new(raw, index == 0)))
            .collect();

        Ok(Self { versions })
    }

    /// All tracked versions, newest first.
    pub fn get_all(&self) -> impl Iterator<Item = &TypingsData> {
        self.versions.iter().map(|(_, data)| data)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn get(&self, version: &DependencyVersion) -> Result<&TypingsData, RegistryError> {
        match version {
            DependencyVersion::Any => Ok(self.get_latest()),
            DependencyVersion::Typing(version) => self.get_latest_match(version),
        }
    }

    pub fn try_get(&self, version: &DependencyVersion) -> Option<&TypingsData> {
        match version {
            DependencyVersion::Any => Some(self.get_latest()),
            DependencyVersion::Typing(version) => self.try_get_latest_match(version),
        }
    }

    pub fn get_latest(&self) -> &TypingsData {
        // Construction rejects an empty version map.
        &self.versions[0].1
    }

    pub fn get_latest_match(&self, version: &TypingVersion) -> Result<&TypingsData, RegistryError> {
        self.try_get_latest_match(version)
            .ok_or_else(|| RegistryError::VersionNotFound(version.to_string()))
    }

    /// Newest version whose major matches and, if given, whose minor matches.
    pub fn try_get_latest_match(&self, version: &TypingVersion) -> Option<&TypingsData> {
        self.versions
            .iter()
            .find(|(v, _)| version.matches(v.major, v.minor))
            .map(|(_, data)| data)
    }
}
