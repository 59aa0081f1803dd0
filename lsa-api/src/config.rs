//! Server configuration
//!
//! Each setting resolves in order: command line (or its environment variable),
//! then `config.toml`, then a default under the root folder.

use std::path::{Path, PathBuf};

use lsa_common::config::{resolve_root_folder, TomlConfig, ROOT_FOLDER_ENV};

pub const DEFAULT_PORT: u16 = 5000;
pub const DATABASE_FILE: &str = "lsa.db";
pub const CSV_FILE: &str = "results.csv";

/// Values supplied on the command line or through `LSA_*` variables
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub port: Option<u16>,
    pub root_folder: Option<PathBuf>,
    pub db_path: Option<PathBuf>,
    pub csv_path: Option<PathBuf>,
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub root_folder: PathBuf,
    pub db_path: PathBuf,
    pub csv_path: PathBuf,
}

impl ServerConfig {
    pub fn resolve(overrides: Overrides, toml: &TomlConfig) -> Self {
        let root_folder =
            resolve_root_folder(overrides.root_folder.as_deref(), ROOT_FOLDER_ENV, toml);

        let db_path = overrides
            .db_path
            .or_else(|| toml.db_path.clone())
            .unwrap_or_else(|| root_folder.join(DATABASE_FILE));

        let csv_path = overrides
            .csv_path
            .or_else(|| toml.csv_path.clone())
            .unwrap_or_else(|| root_folder.join(CSV_FILE));

        Self {
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            root_folder,
            db_path,
            csv_path,
        }
    }

    pub fn root_folder(&self) -> &Path {
        &self.root_folder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_live_under_root_folder() {
        let overrides = Overrides {
            root_folder: Some(PathBuf::from("/srv/lsa")),
            ..Default::default()
        };
        let config = ServerConfig::resolve(overrides, &TomlConfig::default());

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.db_path, PathBuf::from("/srv/lsa/lsa.db"));
        assert_eq!(config.csv_path, PathBuf::from("/srv/lsa/results.csv"));
    }

    #[test]
    fn test_toml_fills_gaps_and_cli_wins() {
        let toml = TomlConfig::from_toml_str(
            r#"
            port = 8080
            csv_path = "/data/answers.csv"
            db_path = "/data/lsa.db"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            port: Some(9000),
            root_folder: Some(PathBuf::from("/srv/lsa")),
            db_path: Some(PathBuf::from("/tmp/other.db")),
            csv_path: None,
        };
        let config = ServerConfig::resolve(overrides, &toml);

        assert_eq!(config.port, 9000);
        assert_eq!(config.db_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.csv_path, PathBuf::from("/data/answers.csv"));
        assert_eq!(config.root_folder(), Path::new("/srv/lsa"));
    }
}
