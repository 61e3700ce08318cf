//! Server configuration read from the environment

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use checklist_core::StorageMode;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_DATA_DIR: &str = ".checklist-data";

/// Which backend the stores use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    File,
    Memory,
}

impl StorageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Memory => "memory",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    /// Allowed CORS origin; `None` allows any origin
    pub cors_origin: Option<String>,
    pub data_dir: PathBuf,
    pub storage: StorageKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            cors_origin: Some(DEFAULT_CORS_ORIGIN.to_string()),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            storage: StorageKind::File,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let host = parse_or(var("HOST"), "HOST", defaults.host);
        let port = parse_or(var("PORT"), "PORT", defaults.port);

        let cors_origin = match var("CORS_ORIGIN") {
            Some(origin) if origin == "*" => None,
            Some(origin) => Some(origin),
            None => defaults.cors_origin,
        };

        let data_dir = var("TASKS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let storage = match var("TASKS_STORAGE").map(|v| v.to_ascii_lowercase()) {
            Some(raw) => match raw.as_str() {
                "file" => StorageKind::File,
                "memory" => StorageKind::Memory,
                _ => {
                    tracing::warn!(value = %raw, "unknown TASKS_STORAGE, using file storage");
                    StorageKind::File
                }
            },
            None => defaults.storage,
        };

        Self {
            host,
            port,
            cors_origin,
            data_dir,
            storage,
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    pub fn tasks_storage(&self) -> StorageMode {
        self.storage_for("tasks.json")
    }

    pub fn users_storage(&self) -> StorageMode {
        self.storage_for("users.json")
    }

    fn storage_for(&self, file_name: &str) -> StorageMode {
        match self.storage {
            StorageKind::File => StorageMode::File(self.data_dir.join(file_name)),
            StorageKind::Memory => StorageMode::Memory,
        }
    }
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, name: &str, default: T) -> T {
    match raw {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(value = %raw, "invalid {}, using default", name);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.cors_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.storage, StorageKind::File);
        assert_eq!(
            config.tasks_storage(),
            StorageMode::File(PathBuf::from(".checklist-data").join("tasks.json"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("CORS_ORIGIN", "*"),
            ("TASKS_STORAGE", "Memory"),
        ]);
        assert_eq!(config.addr(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert!(config.cors_origin.is_none());
        assert_eq!(config.users_storage(), StorageMode::Memory);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("TASKS_STORAGE", "s3")]);
        assert_eq!(config.port, 3001);
        assert_eq!(config.storage, StorageKind::File);
    }
}
