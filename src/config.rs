use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::packages::error::RegistryError;

/// npm scope typings are published under (`@types/foo`)
pub const DEFAULT_SCOPE_NAME: &str = "types";

/// Base directory for generated package output
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Catalog file written by the definition parser
pub const TYPES_DATA_FILENAME: &str = "definitions.json";

/// Stub list kept at the root of the definitions repository
pub const NOT_NEEDED_PACKAGES_FILENAME: &str = "notNeededPackages.json";

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    pub scope_name: String,
    pub output_dir: PathBuf,
    /// Directory holding the catalog; see [`data_dir`] for the fallback
    pub data_dir: Option<PathBuf>,
    pub definitely_typed_dir: PathBuf,
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            scope_name: DEFAULT_SCOPE_NAME.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            data_dir: None,
            definitely_typed_dir: PathBuf::from("."),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl RegistryConfig {
    /// Load configuration from a JSON file. Missing fields use defaults.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| RegistryError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn settings(&self) -> Settings {
        Settings {
            scope_name: self.scope_name.clone(),
            output_dir: self.output_dir.clone(),
        }
    }

    pub fn types_data_path(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(data_dir)
            .join(TYPES_DATA_FILENAME)
    }

    pub fn not_needed_packages_path(&self) -> PathBuf {
        self.definitely_typed_dir.join(NOT_NEEDED_PACKAGES_FILENAME)
    }
}

/// Values the registry needs to derive published names and output paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub scope_name: String,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        RegistryConfig::default().settings()
    }
}

/// Returns the path to the data directory for typings-registry.
/// Uses $XDG_DATA_HOME/typings-registry if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/typings-registry,
/// or ./typings-registry if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("typings-registry")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registry_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<RegistryConfig>(json!({
            "scopeName": "mytypes"
        }))
        .unwrap();

        assert_eq!(result.scope_name, "mytypes");
        assert_eq!(result.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(result.data_dir, None);
        assert_eq!(result.log_format, LogFormat::Text);
    }

    #[test]
    fn registry_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<RegistryConfig>(json!({
            "scopeName": "types",
            "outputDir": "/tmp/out",
            "dataDir": "/tmp/data",
            "definitelyTypedDir": "/src/DefinitelyTyped",
            "logLevel": "debug",
            "logFormat": "json"
        }))
        .unwrap();

        assert_eq!(
            result,
            RegistryConfig {
                scope_name: "types".to_string(),
                output_dir: PathBuf::from("/tmp/out"),
                data_dir: Some(PathBuf::from("/tmp/data")),
                definitely_typed_dir: PathBuf::from("/src/DefinitelyTyped"),
                log_level: "debug".to_string(),
                log_format: LogFormat::Json,
            }
        );
        assert_eq!(
            result.types_data_path(),
            PathBuf::from("/tmp/data/definitions.json")
        );
        assert_eq!(
            result.not_needed_packages_path(),
            PathBuf::from("/src/DefinitelyTyped/notNeededPackages.json")
        );
    }

    #[test]
    fn from_file_reports_path_on_invalid_json() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = RegistryConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, RegistryError::Json { path: p, .. } if p == path));
    }

    #[test]
    fn settings_default_uses_types_scope() {
        let settings = Settings::default();
        assert_eq!(settings.scope_name, "types");
        assert_eq!(settings.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn data_dir_with_env_uses_xdg_data_home_when_set() {
        let path = data_dir_with_env(
            Some("/tmp/test-data".to_string()),
            Some(PathBuf::from("/home/user")),
        );

        assert_eq!(path, PathBuf::from("/tmp/test-data/typings-registry"));
    }

    #[test]
    fn data_dir_with_env_falls_back_to_home_local_share() {
        let path = data_dir_with_env(None, Some(PathBuf::from("/home/user")));

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/typings-registry")
        );
    }

    #[test]
    fn data_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = data_dir_with_env(None, None);
        assert_eq!(path, PathBuf::from("./typings-registry"));
    }
}
