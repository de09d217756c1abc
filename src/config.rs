// ⚙️ Configuration - TOML file with environment overrides

use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const ENV_BIND_ADDRESS: &str = "SWIFT_BIND_ADDRESS";
pub const ENV_DATABASE_PATH: &str = "SWIFT_DATABASE_PATH";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub seed: SeedConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("swift.db"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub csv_path: Option<PathBuf>,
    /// Seed from `csv_path` when the server starts
    pub on_startup: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DirectoryError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Load `path` if given, otherwise start from defaults; then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn apply_env(&mut self) {
        if let Ok(bind_address) = std::env::var(ENV_BIND_ADDRESS) {
            self.server.bind_address = bind_address;
        }
        if let Ok(path) = std::env::var(ENV_DATABASE_PATH) {
            self.database.path = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.database.path.as_os_str().is_empty() {
            return Err(DirectoryError::Config {
                message: "database.path must not be empty".to_string(),
            });
        }

        self.bind_address()?;

        if self.seed.on_startup && self.seed.csv_path.is_none() {
            return Err(DirectoryError::Config {
                message: "seed.on_startup requires seed.csv_path".to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> Result<SocketAddr> {
        self.server
            .bind_address
            .parse()
            .map_err(|e| DirectoryError::Config {
                message: format!(
                    "invalid server.bind_address '{}': {}",
                    self.server.bind_address, e
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.database.path, PathBuf::from("swift.db"));
        assert!(!config.seed.on_startup);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind_address = "127.0.0.1:3000"

[database]
path = "/var/lib/swift/swift.db"

[seed]
csv_path = "swift_codes.csv"
on_startup = true

[logging]
verbose = true
json = true
"#;

        let config = Config::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address().unwrap().port(), 3000);
        assert_eq!(config.database.path, PathBuf::from("/var/lib/swift/swift.db"));
        assert_eq!(config.seed.csv_path, Some(PathBuf::from("swift_codes.csv")));
        assert!(config.logging.json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_toml_str("[database]\npath = \"other.db\"\n").unwrap();

        assert_eq!(config.database.path, PathBuf::from("other.db"));
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn test_invalid_values() {
        let bad_address = Config::from_toml_str("[server]\nbind_address = \"nowhere\"\n").unwrap();
        assert!(matches!(bad_address.validate(), Err(DirectoryError::Config { .. })));

        let seed_without_csv = Config::from_toml_str("[seed]\non_startup = true\n").unwrap();
        assert!(seed_without_csv.validate().is_err());

        assert!(Config::from_toml_str("[server\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[server]\nbind_address = \"127.0.0.1:9090\"\n")
            .unwrap();

        let config = Config::from_file(temp_file.path()).unwrap();

        assert_eq!(config.server.bind_address, "127.0.0.1:9090");
    }
}
