//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the root folder
pub const ROOT_FOLDER_ENV: &str = "LSA_ROOT_FOLDER";

/// Optional settings read from `config.toml`
///
/// Every field may be absent; a missing or unreadable file never stops startup.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct TomlConfig {
    pub root_folder: Option<PathBuf>,
    pub port: Option<u16>,
    pub db_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
    pub server_url: Option<String>,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    /// Read and parse a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Load the platform config file, or defaults when there is none
    pub fn load() -> Self {
        let Ok(path) = config_file_path() else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&Path>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(root_folder) = &toml_config.root_folder {
        return root_folder.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get configuration file path for the platform
pub fn config_file_path() -> Result<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("lsa").join("config.toml"));

    if let Some(path) = user_config {
        if path.exists() {
            return Ok(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/lsa/config.toml");
        if system_config.exists() {
            return Ok(system_config);
        }
    }

    Err(Error::Config("No config file found".to_string()))
}

/// Get OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/lsa (or /var/lib/lsa for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("lsa"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/lsa"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/lsa
        dirs::data_dir()
            .map(|d| d.join("lsa"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/lsa"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\lsa
        dirs::data_local_dir()
            .map(|d| d.join("lsa"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\lsa"))
    } else {
        PathBuf::from("./lsa_data")
    }
}

/// Create the root folder if needed
pub fn ensure_directory_exists(root_folder: &Path) -> Result<()> {
    std::fs::create_dir_all(root_folder)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    const TEST_ENV: &str = "LSA_TEST_ROOT_FOLDER";

    #[test]
    #[serial]
    fn test_cli_argument_wins() {
        env::set_var(TEST_ENV, "/tmp/from-env");
        let toml = TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/from-toml")),
            ..Default::default()
        };

        let resolved = resolve_root_folder(Some(Path::new("/tmp/from-cli")), TEST_ENV, &toml);
        assert_eq!(resolved, PathBuf::from("/tmp/from-cli"));

        env::remove_var(TEST_ENV);
    }

    #[test]
    #[serial]
    fn test_env_beats_toml() {
        env::set_var(TEST_ENV, "/tmp/from-env");
        let toml = TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/from-toml")),
            ..Default::default()
        };

        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &toml),
            PathBuf::from("/tmp/from-env")
        );

        env::remove_var(TEST_ENV);
    }

    #[test]
    #[serial]
    fn test_toml_then_default() {
        env::remove_var(TEST_ENV);
        let toml = TomlConfig {
            root_folder: Some(PathBuf::from("/tmp/from-toml")),
            ..Default::default()
        };
        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &toml),
            PathBuf::from("/tmp/from-toml")
        );

        assert_eq!(
            resolve_root_folder(None, TEST_ENV, &TomlConfig::default()),
            default_root_folder()
        );
    }

    #[test]
    fn test_parse_toml_config() {
        let config = TomlConfig::from_toml_str(
            r#"
            root_folder = "/srv/lsa"
            port = 5050
            csv_path = "/srv/lsa/respuestas.csv"
            log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.root_folder, Some(PathBuf::from("/srv/lsa")));
        assert_eq!(config.port, Some(5050));
        assert_eq!(config.csv_path, Some(PathBuf::from("/srv/lsa/respuestas.csv")));
        assert_eq!(config.db_path, None);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_empty_toml_is_all_defaults() {
        assert_eq!(TomlConfig::from_toml_str("").unwrap(), TomlConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("port = \"not a number\"").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_default_root_folder_not_empty() {
        assert!(!default_root_folder().as_os_str().is_empty());
    }
}
