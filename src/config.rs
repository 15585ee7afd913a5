use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory name used under the XDG config and data homes
const APP_DIR: &str = "laravel-registry";

/// Laravel versions with curated packages, newest first
pub const DEFAULT_PLATFORM_VERSIONS: &[&str] =
    &["latest", "12.x", "11.x", "10.x", "9.x", "8.x", "7.x", "6.x"];

/// PHP versions with runtime-specific constraints, newest first
pub const DEFAULT_RUNTIME_VERSIONS: &[&str] = &["8.4", "8.3", "8.2", "8.1", "8.0", "7.4", "7.3"];

/// Registry configuration structure
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryConfig {
    /// Laravel version keys accepted by lookups
    pub platform_versions: Vec<String>,
    /// PHP version keys accepted by community lookups
    pub runtime_versions: Vec<String>,
    /// Directory to read the documents from instead of the bundled copies
    pub data_dir: Option<PathBuf>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            platform_versions: to_strings(DEFAULT_PLATFORM_VERSIONS),
            runtime_versions: to_strings(DEFAULT_RUNTIME_VERSIONS),
            data_dir: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl RegistryConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the given file, or the default config file if it exists, or defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = config_path();
                if default_path.is_file() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Returns the path to the config directory for laravel-registry.
/// Uses $XDG_CONFIG_HOME/laravel-registry if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/laravel-registry,
/// or ./laravel-registry if neither is available.
pub fn config_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_CONFIG_HOME").ok(),
        dirs::home_dir(),
        ".config",
    )
}

/// Returns the path to the default config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

/// Returns the path to the data directory for laravel-registry.
/// Uses $XDG_DATA_HOME/laravel-registry if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/laravel-registry.
pub fn data_dir() -> PathBuf {
    app_dir_with_env(
        std::env::var("XDG_DATA_HOME").ok(),
        dirs::home_dir(),
        ".local/share",
    )
}

/// Returns the default path of the log file, used when `--log-file` is given
/// without a path.
pub fn log_path() -> PathBuf {
    data_dir().join("laravel-registry.log")
}

fn app_dir_with_env(
    xdg_home: Option<String>,
    home_dir: Option<PathBuf>,
    home_suffix: &str,
) -> PathBuf {
    let base_dir = xdg_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(home_suffix)))
        .unwrap_or_else(|| PathBuf::from("."));

    base_dir.join(APP_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn registry_config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<RegistryConfig>(json!({
            "platformVersions": ["latest", "13.x", "12.x"]
        }))
        .unwrap();

        assert_eq!(result.platform_versions, vec!["latest", "13.x", "12.x"]);
        assert_eq!(
            result.runtime_versions,
            RegistryConfig::default().runtime_versions
        );
        assert_eq!(result.data_dir, None);
    }

    #[test]
    fn registry_config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<RegistryConfig>(json!({
            "platformVersions": ["latest", "12.x"],
            "runtimeVersions": ["8.4", "8.3"],
            "dataDir": "/srv/registry"
        }))
        .unwrap();

        assert_eq!(
            result,
            RegistryConfig {
                platform_versions: vec!["latest".to_string(), "12.x".to_string()],
                runtime_versions: vec!["8.4".to_string(), "8.3".to_string()],
                data_dir: Some(PathBuf::from("/srv/registry")),
            }
        );
    }

    #[test]
    fn load_reads_config_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"runtimeVersions": ["8.5", "8.4"]}"#).unwrap();

        let config = RegistryConfig::load(&path).unwrap();

        assert_eq!(config.runtime_versions, vec!["8.5", "8.4"]);
        assert_eq!(
            config.platform_versions,
            RegistryConfig::default().platform_versions
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.json");

        assert!(matches!(
            RegistryConfig::load(&path),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn load_reports_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"platformVersions": "latest"}"#).unwrap();

        assert!(matches!(
            RegistryConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn app_dir_with_env_uses_xdg_home_when_set() {
        let path = app_dir_with_env(
            Some("/tmp/test-config".to_string()),
            Some(PathBuf::from("/home/user")),
            ".config",
        );

        assert_eq!(path, PathBuf::from("/tmp/test-config/laravel-registry"));
    }

    #[test]
    fn app_dir_with_env_falls_back_to_home_suffix() {
        let path = app_dir_with_env(None, Some(PathBuf::from("/home/user")), ".local/share");

        assert_eq!(
            path,
            PathBuf::from("/home/user/.local/share/laravel-registry")
        );
    }

    #[test]
    fn log_path_is_inside_data_dir() {
        let path = log_path();

        assert_eq!(path.parent(), Some(data_dir().as_path()));
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("laravel-registry.log")
        );
    }

    #[test]
    fn app_dir_with_env_falls_back_to_current_dir_when_no_dirs_available() {
        let path = app_dir_with_env(None, None, ".config");
        assert_eq!(path, PathBuf::from("./laravel-registry"));
    }
}
