//! Attributes shared by every package in the catalog

use std::path::PathBuf;

use crate::config::Settings;
use crate::packages::name::{mangle_scoped_package, unmangle_scoped_package};
use crate::packages::not_needed::NotNeededPackage;
use crate::packages::types::{License, PackageId, TypingVersion};
use crate::packages::typings::TypingsData;

/// Identity fields embedded in both typings and not-needed packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageBase {
    /// Typings package name, e.g. `foo` for `@types/foo`
    pub name: String,
    /// Name of the library the typings describe
    pub library_name: String,
}

/// `@types/foo` for a package `foo`.
pub fn full_npm_name(settings: &Settings, package_name: &str) -> String {
    format!(
        "@{}/{}",
        settings.scope_name,
        mangle_scoped_package(package_name)
    )
}

/// Accessors common to typings and not-needed packages
pub trait PackageMetadata {
    fn base(&self) -> &PackageBase;
    fn major(&self) -> u64;
    fn minor(&self) -> u64;
    fn is_latest(&self) -> bool;
    fn license(&self) -> License;
    fn declared_modules(&self) -> &[String];
    fn globals(&self) -> &[String];
    fn project_name(&self) -> &str;
    fn min_typescript_version(&self) -> &str;

    fn is_not_needed(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        &self.base().name
    }

    fn library_name(&self) -> &str {
        &self.base().library_name
    }

    /// `@foo/bar` for a package tracked as `foo__bar`
    fn unescaped_name(&self) -> String {
        unmangle_scoped_package(self.name()).unwrap_or_else(|| self.name().to_string())
    }

    /// Short description for debug output.
    fn desc(&self) -> String {
        if self.is_latest() {
            self.name().to_string()
        } else {
            format!("{} v{}.{}", self.name(), self.major(), self.minor())
        }
    }

    fn id(&self) -> PackageId {
        PackageId::new(
            self.name(),
            TypingVersion::new(self.major(), Some(self.minor())),
        )
    }

    fn full_npm_name(&self, settings: &Settings) -> String {
        full_npm_name(settings, self.name())
    }

    /// `@types%2ffoo` for a package `foo`, for use inside URLs.
    fn full_escaped_npm_name(&self, settings: &Settings) -> String {
        format!("@{}%2f{}", settings.scope_name, self.name())
    }

    fn output_directory(&self, settings: &Settings) -> PathBuf {
        settings.output_dir.join(self.desc())
    }
}

/// Either kind of package, borrowed from the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyPackage<'a> {
    Typings(&'a TypingsData),
    NotNeeded(&'a NotNeededPackage),
}

impl<'a> AnyPackage<'a> {
    pub fn as_typings(&self) -> Option<&'a TypingsData> {
        match self {
            AnyPackage::Typings(data) => Some(data),
            AnyPackage::NotNeeded(_) => None,
        }
    }

    pub fn as_not_needed(&self) -> Option<&'a NotNeededPackage> {
        match self {
            AnyPackage::Typings(_) => None,
            AnyPackage::NotNeeded(pkg) => Some(pkg),
        }
    }

    fn metadata(&self) -> &'a dyn PackageMetadata {
        match self {
            AnyPackage::Typings(data) => *data,
            AnyPackage::NotNeeded(pkg) => *pkg,
        }
    }
}

impl PackageMetadata for AnyPackage<'_> {
    fn base(&self) -> &PackageBase {
        self.metadata().base()
    }

    fn major(&self) -> u64 {
        self.metadata().major()
    }

    fn minor(&self) -> u64 {
        self.metadata().minor()
    }

    fn is_latest(&self) -> bool {
        self.metadata().is_latest()
    }

    fn license(&self) -> License {
        self.metadata().license()
    }

    fn declared_modules(&self) -> &[String] {
        self.metadata().declared_modules()
    }

    fn globals(&self) -> &[String] {
        self.metadata().globals()
    }

    fn project_name(&self) -> &str {
        self.metadata().project_name()
    }

    fn min_typescript_version(&self) -> &str {
        self.metadata().min_typescript_version()
    }

    fn is_not_needed(&self) -> bool {
        matches!(self, AnyPackage::NotNeeded(_))
    }
}
