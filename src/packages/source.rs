//! Backing data for the registry

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::RegistryConfig;
use crate::packages::error::RegistryError;
use crate::packages::not_needed::{NotNeededPackage, NotNeededPackagesFile};
use crate::packages::typings::TypingsDataRaw;

/// Catalog contents: package name -> version label -> record, in file order
pub type TypesData = IndexMap<String, IndexMap<String, TypingsDataRaw>>;

/// Trait for reading the catalog snapshot the registry is built from
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// Reads every typings record, keyed by package name then version label
    async fn read_types_data(&self) -> Result<TypesData, RegistryError>;

    /// Reads and validates the not-needed stub list
    async fn read_not_needed_packages(&self) -> Result<Vec<NotNeededPackage>, RegistryError>;
}

/// Reads the catalog and stub list from JSON files on disk
#[derive(Debug, Clone)]
pub struct FileDataSource {
    types_data_path: PathBuf,
    not_needed_path: PathBuf,
}

impl FileDataSource {
    pub fn new(types_data_path: impl Into<PathBuf>, not_needed_path: impl Into<PathBuf>) -> Self {
        Self {
            types_data_path: types_data_path.into(),
            not_needed_path: not_needed_path.into(),
        }
    }

    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.types_data_path(), config.not_needed_packages_path())
    }

    async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, RegistryError> {
        debug!("Reading {:?}", path);
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| RegistryError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&content).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[async_trait::async_trait]
impl DataSource for FileDataSource {
    async fn read_types_data(&self) -> Result<TypesData, RegistryError> {
        Self::read_json(&self.types_data_path).await
    }

    async fn read_not_needed_packages(&self) -> Result<Vec<NotNeededPackage>, RegistryError> {
        let file: NotNeededPackagesFile = Self::read_json(&self.not_needed_path).await?;
        file.packages
            .into_iter()
            .map(NotNeededPackage::new)
            .collect()
    }
}
