//! In-memory registry over the whole typings catalog

use std::collections::HashSet;

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::{debug, info};

use crate::config::Settings;
use crate::packages::base::{AnyPackage, PackageMetadata};
use crate::packages::error::RegistryError;
use crate::packages::name::mangle_scoped_package;
use crate::packages::not_needed::NotNeededPackage;
use crate::packages::source::{DataSource, TypesData};
use crate::packages::types::PackageId;
use crate::packages::typings::TypingsData;
use crate::packages::versions::TypingsVersions;

/// Every typings package (all tracked versions) plus the not-needed stubs.
///
/// Built once from a loaded snapshot and read-only afterwards.
#[derive(Debug, Clone)]
pub struct AllPackages {
    data: IndexMap<String, TypingsVersions>,
    not_needed: Vec<NotNeededPackage>,
    settings: Settings,
}

impl AllPackages {
    /// Build the registry from a catalog snapshot and a validated stub list.
    ///
    /// Catalog keys are mangled; two keys mangling to the same name are rejected.
    /// A not-needed package may not share its name with a typings package or
    /// with another not-needed package.
    pub fn from(
        data: TypesData,
        not_needed: Vec<NotNeededPackage>,
        settings: Settings,
    ) -> Result<Self, RegistryError> {
        let mut index = IndexMap::with_capacity(data.len());
        for (name, versions) in data {
            let key = mangle_scoped_package(&name);
            match index.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(RegistryError::DuplicatePackage(entry.key().clone()));
                }
                Entry::Vacant(entry) => {
                    let versions = TypingsVersions::new(&name, versions)?;
                    entry.insert(versions);
                }
            }
        }

        let mut stub_names = HashSet::with_capacity(not_needed.len());
        for pkg in &not_needed {
            let key = mangle_scoped_package(pkg.name());
            if index.contains_key(&key) || !stub_names.insert(key.clone()) {
                return Err(RegistryError::DuplicatePackage(key));
            }
        }

        debug!(
            "Built registry with {} typings packages and {} not-needed packages",
            index.len(),
            not_needed.len()
        );

        Ok(Self {
            data: index,
            not_needed,
            settings,
        })
    }

    /// Load typings and not-needed packages.
    pub async fn read<S: DataSource + ?Sized>(
        source: &S,
        settings: Settings,
    ) -> Result<Self, RegistryError> {
        let data = source.read_types_data().await?;
        let not_needed = source.read_not_needed_packages().await?;
        info!(
            "Loaded {} typings packages and {} not-needed packages",
            data.len(),
            not_needed.len()
        );
        Self::from(data, not_needed, settings)
    }

    /// Every typings entry, including older versions, sorted by name.
    pub async fn read_typings<S: DataSource + ?Sized>(
        source: &S,
        settings: Settings,
    ) -> Result<Vec<TypingsData>, RegistryError> {
        let all = Self::from(source.read_types_data().await?, Vec::new(), settings)?;
        Ok(all.all_typings()?.into_iter().cloned().collect())
    }

    /// The latest entry of every typings package, sorted by name.
    pub async fn read_latest_typings<S: DataSource + ?Sized>(
        source: &S,
        settings: Settings,
    ) -> Result<Vec<TypingsData>, RegistryError> {
        let all = Self::from(source.read_types_data().await?, Vec::new(), settings)?;
        Ok(all.all_latest_typings()?.into_iter().cloned().collect())
    }

    /// Read one package that has exactly one tracked version.
    ///
    /// Meant for single-package maintenance tasks; do not call this in a loop.
    pub async fn read_single<S: DataSource + ?Sized>(
        source: &S,
        name: &str,
    ) -> Result<TypingsData, RegistryError> {
        let mut data = source.read_types_data().await?;
        let raw = data
            .swap_remove(name)
            .ok_or_else(|| RegistryError::PackageNotFound(name.to_string()))?;
        if raw.len() > 1 {
            return Err(RegistryError::MultipleVersions(name.to_string()));
        }

        debug!("Reading single package {}", name);
        let versions = TypingsVersions::new(name, raw)?;
        Ok(versions.get_latest().clone())
    }

    pub async fn read_single_not_needed<S: DataSource + ?Sized>(
        source: &S,
        name: &str,
    ) -> Result<NotNeededPackage, RegistryError> {
        source
            .read_not_needed_packages()
            .await?
            .into_iter()
            .find(|pkg| pkg.name() == name)
            .ok_or_else(|| RegistryError::NotNeededNotFound(name.to_string()))
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn versions(&self, name: &str) -> Option<&TypingsVersions> {
        self.data.get(&mangle_scoped_package(name))
    }

    pub fn get_not_needed_package(&self, name: &str) -> Option<&NotNeededPackage> {
        self.not_needed.iter().find(|pkg| pkg.name() == name)
    }

    pub fn has_typing_for(&self, dep: &PackageId) -> bool {
        self.try_get_typings_data(dep).is_some()
    }

    /// Resolve `dep` to a concrete tracked version.
    ///
    /// A package without typings resolves to `dep` itself.
    pub fn try_resolve(&self, dep: &PackageId) -> Result<PackageId, RegistryError> {
        match self.versions(&dep.name) {
            Some(versions) => Ok(versions.get(&dep.version)?.id()),
            None => Ok(dep.clone()),
        }
    }

    /// Gets the latest version of a package, e.g. node v10 for node v6.
    pub fn get_latest<'a>(&'a self, pkg: &'a TypingsData) -> Result<&'a TypingsData, RegistryError> {
        if pkg.is_latest() {
            Ok(pkg)
        } else {
            self.get_latest_version(pkg.name())
        }
    }

    pub fn get_latest_version(&self, package_name: &str) -> Result<&TypingsData, RegistryError> {
        self.try_get_latest_version(package_name)
            .ok_or_else(|| RegistryError::PackageNotFound(package_name.to_string()))
    }

    pub fn try_get_latest_version(&self, package_name: &str) -> Option<&TypingsData> {
        self.versions(package_name).map(TypingsVersions::get_latest)
    }

    pub fn get_typings_data(&self, id: &PackageId) -> Result<&TypingsData, RegistryError> {
        self.try_get_typings_data(id)
            .ok_or_else(|| RegistryError::TypingsNotFound(id.clone()))
    }

    pub fn try_get_typings_data(&self, id: &PackageId) -> Option<&TypingsData> {
        self.versions(&id.name)?.try_get(&id.version)
    }

    /// Typings entries followed by not-needed packages.
    pub fn all_packages(&self) -> Result<Vec<AnyPackage<'_>>, RegistryError> {
        let typings = self.all_typings()?;
        Ok(typings
            .into_iter()
            .map(AnyPackage::Typings)
            .chain(self.not_needed.iter().map(AnyPackage::NotNeeded))
            .collect())
    }

    /// Every tracked version of every package; includes `foo/v0` style directories.
    pub fn all_typings(&self) -> Result<Vec<&TypingsData>, RegistryError> {
        let all: Vec<_> = self.data.values().flat_map(TypingsVersions::get_all).collect();
        assert_sorted(all, |t| t.name())
    }

    pub fn all_latest_typings(&self) -> Result<Vec<&TypingsData>, RegistryError> {
        let latest: Vec<_> = self.data.values().map(TypingsVersions::get_latest).collect();
        assert_sorted(latest, |t| t.name())
    }

    pub fn all_not_needed(&self) -> &[NotNeededPackage] {
        &self.not_needed
    }

    /// Dependencies of `pkg` that have typings, then its test dependencies.
    ///
    /// Dependencies without typings are skipped. Test dependencies resolve to
    /// their latest version.
    pub fn all_dependency_typings<'a>(
        &'a self,
        pkg: &'a TypingsData,
    ) -> impl Iterator<Item = Result<&'a TypingsData, RegistryError>> + 'a {
        let dependencies = pkg.dependencies().iter().filter_map(move |dep| {
            self.versions(&dep.name)
                .map(|versions| versions.get(&dep.version))
        });
        let test_dependencies = pkg.test_dependencies().iter().filter_map(move |name| {
            self.versions(name)
                .map(|versions| Ok(versions.get_latest()))
        });
        dependencies.chain(test_dependencies)
    }
}

/// Check that `items` is already in ascending order by `key`.
///
/// A failure means the catalog broke an ordering invariant.
pub fn assert_sorted<T, F>(items: Vec<T>, key: F) -> Result<Vec<T>, RegistryError>
where
    F: Fn(&T) -> &str,
{
    if let Some(pair) = items.windows(2).find(|pair| key(&pair[0]) > key(&pair[1])) {
        return Err(RegistryError::NotSorted {
            previous: key(&pair[0]).to_string(),
            next: key(&pair[1]).to_string(),
        });
    }
    Ok(items)
}
