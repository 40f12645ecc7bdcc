use std::path::PathBuf;

use thiserror::Error;

use crate::packages::types::PackageId;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("No such package {0}.")]
    PackageNotFound(String),

    #[error("Could not find version {0}")]
    VersionNotFound(String),

    #[error("No typings available for {0}")]
    TypingsNotFound(PackageId),

    #[error("Cannot find not-needed package {0}")]
    NotNeededNotFound(String),

    #[error("Unable to parse version {0}")]
    InvalidVersion(String),

    #[error("Invalid version specifier '{0}': expected '*', 'MAJOR' or 'MAJOR.MINOR'")]
    InvalidVersionSpecifier(String),

    #[error("Unexpected key in not-needed package: {0}")]
    UnexpectedKey(String),

    #[error("Not-needed package {package} is missing required field '{field}'")]
    MissingField { package: String, field: &'static str },

    #[error("Specifying '\"license\": \"MIT\"' is redundant, this is the default.")]
    RedundantLicense,

    #[error("'package.json' license is \"{license}\".\nExpected one of: [\"MIT\", \"Apache-2.0\"]")]
    InvalidLicense { license: String },

    #[error("Expected '{previous}' to sort before '{next}'")]
    NotSorted { previous: String, next: String },

    #[error("Package {0} has multiple versions.")]
    MultipleVersions(String),

    #[error("Package {0} appears more than once in the catalog")]
    DuplicatePackage(String),

    #[error("Package {name} has more than one label for version {version}")]
    DuplicateVersion { name: String, version: String },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
