//! Typed registry over the typings package catalog
//!
//! This module loads the catalog of typings packages and the list of
//! not-needed stub packages, and resolves a package name plus a (possibly
//! partial) version to one tracked release.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ DataSource  │────▶│ AllPackages │────▶│ TypingsVersions  │
//! │ (load JSON) │     │ (registry)  │     │ (per-name index) │
//! └─────────────┘     └─────────────┘     └──────────────────┘
//!                            │                     │
//!                            ▼                     ▼
//!                     ┌─────────────┐       ┌─────────────┐
//!                     │ NotNeeded   │       │ TypingsData │
//!                     │ (stubs)     │       │ (one entry) │
//!                     └─────────────┘       └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`all_packages`]: the registry and its lookup/iteration operations
//! - [`versions`]: newest-first version index for one package name
//! - [`typings`]: catalog records and validated typings entries
//! - [`not_needed`]: stub packages for libraries shipping their own typings
//! - [`base`]: accessors shared by both kinds of package
//! - [`name`]: scoped package name mangling
//! - [`source`]: async trait for loading the catalog, plus a file-backed impl
//! - [`types`]: version specifiers, package ids and licenses
//! - [`semver`]: version label parsing
//! - [`error`]: error type for every registry operation

pub mod all_packages;
pub mod base;
pub mod error;
pub mod name;
pub mod not_needed;
pub mod semver;
pub mod source;
pub mod types;
pub mod typings;
pub mod versions;

pub use all_packages::AllPackages;
pub use base::{AnyPackage, PackageMetadata};
pub use error::RegistryError;
pub use not_needed::NotNeededPackage;
pub use source::{DataSource, FileDataSource};
pub use types::{DependencyVersion, PackageId, TypingVersion};
pub use typings::TypingsData;
pub use versions::TypingsVersions;
