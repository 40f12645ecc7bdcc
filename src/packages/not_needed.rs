//! Stub packages for libraries that now ship their own typings

use indexmap::IndexMap;
use semver::Version;
use serde::Deserialize;

use crate::config::Settings;
use crate::packages::base::{PackageBase, PackageMetadata, full_npm_name};
use crate::packages::error::RegistryError;
use crate::packages::semver::parse_label;
use crate::packages::types::License;
use crate::packages::typings::LOWEST_TYPESCRIPT_VERSION;

/// One entry of `notNeededPackages.json`
///
/// Unknown keys are collected so validation can name them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotNeededPackageRaw {
    pub library_name: Option<String>,
    pub typings_package_name: Option<String>,
    #[serde(rename = "sourceRepoURL")]
    pub source_repo_url: Option<String>,
    pub as_of_version: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Top-level shape of `notNeededPackages.json`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotNeededPackagesFile {
    pub packages: Vec<NotNeededPackageRaw>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotNeededPackage {
    base: PackageBase,
    source_repo_url: String,
    version: Version,
}

impl NotNeededPackage {
    pub fn new(raw: NotNeededPackageRaw) -> Result<Self, RegistryError> {
        if let Some(key) = raw.extra.keys().next() {
            return Err(RegistryError::UnexpectedKey(key.clone()));
        }

        let package = raw
            .typings_package_name
            .clone()
            .unwrap_or_else(|| "<unnamed>".to_string());
        let required = |value: Option<String>, field: &'static str| {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| RegistryError::MissingField {
                    package: package.clone(),
                    field,
                })
        };

        let library_name = required(raw.library_name, "libraryName")?;
        let name = required(raw.typings_package_name, "typingsPackageName")?;
        let source_repo_url = required(raw.source_repo_url, "sourceRepoURL")?;
        let as_of_version = required(raw.as_of_version, "asOfVersion")?;

        Ok(Self {
            base: PackageBase { name, library_name },
            source_repo_url,
            version: parse_label(&as_of_version)?,
        })
    }

    pub fn source_repo_url(&self) -> &str {
        &self.source_repo_url
    }

    /// First version of the library that ships its own typings
    pub fn version(&self) -> &Version {
        &self.version
    }

    pub fn readme(&self, settings: &Settings) -> String {
        format!(
            "This is a stub types definition for {library} ({repo}).\n\n\
             {library} provides its own type definitions, so you don't need {npm} installed!",
            library = self.library_name(),
            repo = self.source_repo_url,
            npm = full_npm_name(settings, self.name()),
        )
    }

    pub fn deprecated_message(&self) -> String {
        format!(
            "This is a stub types definition. {} provides its own type definitions, so you do not need this installed.",
            self.name()
        )
    }
}

impl PackageMetadata for NotNeededPackage {
    fn base(&self) -> &PackageBase {
        &self.base
    }

    fn major(&self) -> u64 {
        self.version.major
    }

    fn minor(&self) -> u64 {
        self.version.minor
    }

    /// A not-needed package has no other versions.
    fn is_latest(&self) -> bool {
        true
    }

    fn license(&self) -> License {
        License::Mit
    }

    fn declared_modules(&self) -> &[String] {
        &[]
    }

    fn globals(&self) -> &[String] {
        &[]
    }

    fn project_name(&self) -> &str {
        &self.source_repo_url
    }

    fn min_typescript_version(&self) -> &str {
        LOWEST_TYPESCRIPT_VERSION
    }

    fn is_not_needed(&self) -> bool {
        true
    }
}
