//! Catalog fixture utilities

use std::path::PathBuf;

use serde_json::{Value, json};
use tempfile::TempDir;

use typings_registry::packages::FileDataSource;

/// A catalog record for `name` at `major.minor`
pub fn typings_record(name: &str, major: u64, minor: u64) -> Value {
    let directory = if minor == 0 {
        major.to_string()
    } else {
        format!("{major}.{minor}")
    };
    json!({
        "typingsPackageName": name,
        "libraryName": name,
        "libraryMajorVersion": major,
        "libraryMinorVersion": minor,
        "libraryVersionDirectoryName": directory,
        "license": "MIT",
        "contentHash": format!("{name}-{major}.{minor}"),
        "projectName": format!("https://example.com/{name}"),
        "minTsVersion": "2.8"
    })
}

/// Catalog and stub list written to a temp directory
pub struct Fixture {
    _temp_dir: TempDir,
    pub types_data_path: PathBuf,
    pub not_needed_path: PathBuf,
}

impl Fixture {
    /// Serializes through `json!`, so object keys come out sorted.
    pub fn new(types_data: Value, not_needed: Value) -> Self {
        Self::from_raw(
            &types_data.to_string(),
            &json!({ "packages": not_needed }).to_string(),
        )
    }

    /// Writes both files verbatim, keeping key order as written.
    pub fn from_raw(types_data: &str, not_needed: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let types_data_path = temp_dir.path().join("definitions.json");
        let not_needed_path = temp_dir.path().join("notNeededPackages.json");
        std::fs::write(&types_data_path, types_data).unwrap();
        std::fs::write(&not_needed_path, not_needed).unwrap();

        Self {
            _temp_dir: temp_dir,
            types_data_path,
            not_needed_path,
        }
    }

    pub fn source(&self) -> FileDataSource {
        FileDataSource::new(&self.types_data_path, &self.not_needed_path)
    }
}

/// A small catalog: `a` {1.0, 1.1}, `b` {2.0}, `@scope/pkg` {3.0},
/// `consumer` depending on `a@1`, `express` and testing with `b`.
pub fn standard_catalog() -> Fixture {
    let mut consumer = typings_record("consumer", 1, 0);
    consumer["dependencies"] = json!([
        { "name": "a", "version": { "major": 1 } },
        { "name": "express", "version": "*" }
    ]);
    consumer["testDependencies"] = json!(["b"]);

    Fixture::new(
        json!({
            "a": {
                "1.0": typings_record("a", 1, 0),
                "1.1": typings_record("a", 1, 1)
            },
            "b": { "2.0": typings_record("b", 2, 0) },
            "consumer": { "1.0": consumer },
            "scope__pkg": { "3.0": typings_record("scope__pkg", 3, 0) }
        }),
        json!([{
            "libraryName": "Moment",
            "typingsPackageName": "moment",
            "sourceRepoURL": "https://github.com/moment/moment",
            "asOfVersion": "2.10.0"
        }]),
    )
}
