//! Typings packages tracked by the catalog

use serde::Deserialize;

use crate::packages::base::{PackageBase, PackageMetadata};
use crate::packages::types::{
    Contributor, License, PackageId, PackageJsonDependency, PathMapping,
};

/// TypeScript versions a package may declare as its minimum, oldest first
pub const SUPPORTED_TYPESCRIPT_VERSIONS: &[&str] = &[
    "2.0", "2.1", "2.2", "2.3", "2.4", "2.5", "2.6", "2.7", "2.8", "2.9", "3.0", "3.1", "3.2",
    "3.3", "3.4", "3.5", "3.6", "3.7", "3.8", "3.9",
];

pub const LOWEST_TYPESCRIPT_VERSION: &str = "2.0";

/// One catalog record, as written by the definition parser
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingsDataRaw {
    pub typings_package_name: String,
    pub library_name: String,
    pub library_major_version: u64,
    pub library_minor_version: u64,
    /// Set for packages living in a `vN` subdirectory
    #[serde(default)]
    pub library_version_directory_name: Option<String>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default)]
    pub dependencies: Vec<PackageId>,
    #[serde(default)]
    pub test_dependencies: Vec<String>,
    #[serde(default)]
    pub path_mappings: Vec<PathMapping>,
    #[serde(default)]
    pub types_versions: Vec<String>,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub license: License,
    #[serde(default)]
    pub package_json_dependencies: Vec<PackageJsonDependency>,
    #[serde(default)]
    pub content_hash: String,
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub globals: Vec<String>,
    #[serde(default)]
    pub declared_modules: Vec<String>,
    #[serde(default)]
    pub min_ts_version: Option<String>,
}

/// A validated typings package at one tracked version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingsData {
    base: PackageBase,
    major: u64,
    minor: u64,
    is_latest: bool,
    license: License,
    dependencies: Vec<PackageId>,
    test_dependencies: Vec<String>,
    path_mappings: Vec<PathMapping>,
    types_versions: Vec<String>,
    files: Vec<String>,
    contributors: Vec<Contributor>,
    package_json_dependencies: Vec<PackageJsonDependency>,
    content_hash: String,
    project_name: String,
    globals: Vec<String>,
    declared_modules: Vec<String>,
    min_typescript_version: String,
    library_version_directory_name: Option<String>,
}

impl TypingsData {
    pub fn new(raw: TypingsDataRaw, is_latest: bool) -> Self {
        let min_typescript_version = raw
            .min_ts_version
            .filter(|v| SUPPORTED_TYPESCRIPT_VERSIONS.contains(&v.as_str()))
            .unwrap_or_else(|| LOWEST_TYPESCRIPT_VERSION.to_string());

        Self {
            base: PackageBase {
                name: raw.typings_package_name,
                library_name: raw.library_name,
            },
            major: raw.library_major_version,
            minor: raw.library_minor_version,
            is_latest,
            license: raw.license,
            dependencies: raw.dependencies,
            test_dependencies: raw.test_dependencies,
            path_mappings: raw.path_mappings,
            types_versions: raw.types_versions,
            files: raw.files,
            contributors: raw.contributors,
            package_json_dependencies: raw.package_json_dependencies,
            content_hash: raw.content_hash,
            project_name: raw.project_name,
            globals: raw.globals,
            declared_modules: raw.declared_modules,
            min_typescript_version,
            library_version_directory_name: raw.library_version_directory_name,
        }
    }

    pub fn dependencies(&self) -> &[PackageId] {
        &self.dependencies
    }

    /// Test dependencies always resolve to the latest tracked version.
    pub fn test_dependencies(&self) -> &[String] {
        &self.test_dependencies
    }

    pub fn path_mappings(&self) -> &[PathMapping] {
        &self.path_mappings
    }

    pub fn types_versions(&self) -> &[String] {
        &self.types_versions
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    pub fn package_json_dependencies(&self) -> &[PackageJsonDependency] {
        &self.package_json_dependencies
    }

    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// `v3` for a package living in `foo/v3`
    pub fn version_directory_name(&self) -> Option<String> {
        self.library_version_directory_name
            .as_ref()
            .map(|dir| format!("v{dir}"))
    }

    /// Path to this package, relative to the definitions repository.
    pub fn sub_directory_path(&self) -> String {
        match self.version_directory_name() {
            Some(dir) if !self.is_latest => format!("{}/{}", self.name(), dir),
            _ => self.name().to_string(),
        }
    }
}

impl PackageMetadata for TypingsData {
    fn base(&self) -> &PackageBase {
        &self.base
    }

    fn major(&self) -> u64 {
        self.major
    }

    fn minor(&self) -> u64 {
        self.minor
    }

    fn is_latest(&self) -> bool {
        self.is_latest
    }

    fn license(&self) -> License {
        self.license
    }

    fn declared_modules(&self) -> &[String] {
        &self.declared_modules
    }

    fn globals(&self) -> &[String] {
        &self.globals
    }

    fn project_name(&self) -> &str {
        &self.project_name
    }

    fn min_typescript_version(&self) -> &str {
        &self.min_typescript_version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::packages::types::{DependencyVersion, TypingVersion};
    use rstest::rstest;
    use serde_json::json;
    use std::path::PathBuf;

    fn raw_jquery(major: u64, minor: u64) -> TypingsDataRaw {
        serde_json::from_value(json!({
            "typingsPackageName": "jquery",
            "libraryName": "jQuery",
            "libraryMajorVersion": major,
            "libraryMinorVersion": minor,
            "libraryVersionDirectoryName": major.to_string(),
            "contributors": [
                { "name": "Boris Yankov", "url": "https://github.com/borisyankov", "githubUsername": "borisyankov" }
            ],
            "dependencies": [{ "name": "sizzle", "version": "*" }],
            "testDependencies": ["jquery-mockjax"],
            "pathMappings": [{ "packageName": "sizzle", "version": { "major": 2 } }],
            "files": ["index.d.ts", "misc.d.ts"],
            "license": "MIT",
            "contentHash": "abc123",
            "projectName": "https://jquery.com",
            "globals": ["jQuery", "$"],
            "declaredModules": ["jquery"],
            "minTsVersion": "2.3"
        }))
        .unwrap()
    }

    #[test]
    fn new_copies_raw_fields() {
        let data = TypingsData::new(raw_jquery(3, 3), true);

        assert_eq!(data.name(), "jquery");
        assert_eq!(data.library_name(), "jQuery");
        assert_eq!((data.major(), data.minor()), (3, 3));
        assert!(data.is_latest());
        assert_eq!(data.license(), License::Mit);
        assert_eq!(
            data.dependencies(),
            &[PackageId::new("sizzle", DependencyVersion::Any)]
        );
        assert_eq!(data.test_dependencies(), &["jquery-mockjax".to_string()]);
        assert_eq!(data.path_mappings()[0].version, TypingVersion::major(2));
        assert_eq!(data.contributors()[0].github_username.as_deref(), Some("borisyankov"));
        assert_eq!(data.files().len(), 2);
        assert_eq!(data.content_hash(), "abc123");
        assert_eq!(data.project_name(), "https://jquery.com");
        assert_eq!(data.globals(), &["jQuery".to_string(), "$".to_string()]);
        assert_eq!(data.declared_modules(), &["jquery".to_string()]);
        assert_eq!(data.min_typescript_version(), "2.3");
        assert!(!data.is_not_needed());
    }

    #[rstest]
    #[case(Some("2.8"), "2.8")]
    #[case(Some("1.8"), LOWEST_TYPESCRIPT_VERSION)]
    #[case(Some("next"), LOWEST_TYPESCRIPT_VERSION)]
    #[case(None, LOWEST_TYPESCRIPT_VERSION)]
    fn unsupported_min_typescript_version_falls_back_to_lowest(
        #[case] recorded: Option<&str>,
        #[case] expected: &str,
    ) {
        let mut raw = raw_jquery(3, 3);
        raw.min_ts_version = recorded.map(str::to_string);
        assert_eq!(TypingsData::new(raw, true).min_typescript_version(), expected);
    }

    #[test]
    fn latest_package_describes_itself_by_name() {
        let settings = Settings::default();
        let data = TypingsData::new(raw_jquery(3, 3), true);

        assert_eq!(data.desc(), "jquery");
        assert_eq!(data.sub_directory_path(), "jquery");
        assert_eq!(data.full_npm_name(&settings), "@types/jquery");
        assert_eq!(data.full_escaped_npm_name(&settings), "@types%2fjquery");
        assert_eq!(data.output_directory(&settings), PathBuf::from("output/jquery"));
        assert_eq!(
            data.id(),
            PackageId::new("jquery", TypingVersion::new(3, Some(3)))
        );
    }

    #[test]
    fn older_package_describes_itself_with_version() {
        let settings = Settings::default();
        let data = TypingsData::new(raw_jquery(2, 1), false);

        assert_eq!(data.desc(), "jquery v2.1");
        assert_eq!(data.version_directory_name().as_deref(), Some("v2"));
        assert_eq!(data.sub_directory_path(), "jquery/v2");
        assert_eq!(
            data.output_directory(&settings),
            PathBuf::from("output/jquery v2.1")
        );
    }

    #[test]
    fn scoped_package_uses_unescaped_name() {
        let mut raw = raw_jquery(1, 0);
        raw.typings_package_name = "babel__core".to_string();
        let data = TypingsData::new(raw, true);

        assert_eq!(data.unescaped_name(), "@babel/core");
        assert_eq!(data.full_npm_name(&Settings::default()), "@types/babel__core");
    }

    #[test]
    fn raw_record_requires_names_and_versions() {
        let result = serde_json::from_value::<TypingsDataRaw>(json!({
            "typingsPackageName": "jquery",
            "libraryName": "jQuery"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn raw_record_rejects_unknown_license() {
        let result = serde_json::from_value::<TypingsDataRaw>(json!({
            "typingsPackageName": "jquery",
            "libraryName": "jQuery",
            "libraryMajorVersion": 3,
            "libraryMinorVersion": 3,
            "license": "GPL-3.0"
        }));
        assert!(result.is_err());
    }
}
