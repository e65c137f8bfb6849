use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_API_URL: &str = "http://localhost:3001";
const DEFAULT_MIRROR_DIR: &str = ".puppy-mirror";

/// Where the server keeps its records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// One JSON file per resource under `dir`.
    Filesystem { dir: PathBuf },
    /// One JSONB row per record. `tls` requests an encrypted connection
    /// without certificate verification.
    Postgres { url: String, tls: bool },
}

impl StorageBackend {
    pub fn label(&self) -> &'static str {
        match self {
            StorageBackend::Filesystem { .. } => "filesystem",
            StorageBackend::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub storage: StorageBackend,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let storage = match lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                let tls = lookup("DATABASE_SSL")
                    .map(|raw| parse_flag(&raw))
                    .transpose()
                    .map_err(|_| "DATABASE_SSL must be true or false".to_string())?
                    .unwrap_or(true);
                StorageBackend::Postgres { url, tls }
            }
            None => StorageBackend::Filesystem {
                dir: PathBuf::from(
                    lookup("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
                ),
            },
        };

        let cors_origin = lookup("CORS_ORIGIN").filter(|origin| !origin.trim().is_empty());

        Ok(Self {
            port,
            storage,
            cors_origin,
        })
    }
}

/// Settings for the headless sync agent.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_url: String,
    pub mirror_dir: PathBuf,
    pub sync_interval: Duration,
    pub health_interval: Duration,
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("PUPPY_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let mirror_dir = PathBuf::from(
            lookup("PUPPY_MIRROR_DIR").unwrap_or_else(|| DEFAULT_MIRROR_DIR.to_string()),
        );

        Ok(Self {
            api_url,
            mirror_dir,
            sync_interval: seconds(&lookup, "SYNC_INTERVAL_SECS", 2)?,
            health_interval: seconds(&lookup, "HEALTH_INTERVAL_SECS", 30)?,
            request_timeout: seconds(&lookup, "REQUEST_TIMEOUT_SECS", 10)?,
        })
    }
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<Duration, String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => Err(format!("{} must be a positive number of seconds", key)),
            Ok(secs) => Ok(Duration::from_secs(secs)),
        },
        None => Ok(Duration::from_secs(default)),
    }
}

fn parse_flag(raw: &str) -> Result<bool, ()> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_to_filesystem_on_3001() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, 3001);
        assert_eq!(
            config.storage,
            StorageBackend::Filesystem {
                dir: PathBuf::from("data")
            }
        );
        assert!(config.cors_origin.is_none());
    }

    #[test]
    fn test_database_url_selects_postgres_with_tls() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/puppy"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(
            config.storage,
            StorageBackend::Postgres {
                url: "postgres://localhost/puppy".to_string(),
                tls: true
            }
        );
        assert_eq!(config.storage.label(), "postgres");
    }

    #[test]
    fn test_database_ssl_can_be_disabled() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/puppy"),
            ("DATABASE_SSL", "false"),
        ]))
        .unwrap();

        assert!(matches!(config.storage, StorageBackend::Postgres { tls: false, .. }));
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = AppConfig::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[(
            "PUPPY_API_URL",
            "http://pi.local:3001/",
        )]))
        .unwrap();

        assert_eq!(config.api_url, "http://pi.local:3001");
        assert_eq!(config.sync_interval, Duration::from_secs(2));
        assert_eq!(config.health_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_client_config_rejects_zero_interval() {
        let result = ClientConfig::from_lookup(lookup_from(&[("SYNC_INTERVAL_SECS", "0")]));
        assert!(result.is_err());
    }
}
