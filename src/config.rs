use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Medaccess";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Local data API serving the department datasets.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Dashboard listens on loopback unless told otherwise.
pub const DEFAULT_BIND_ADDR: ([u8; 4], u16) = ([127, 0, 0, 1], 3000);

/// GeoJSON department boundaries, relative to the working directory.
pub const DEFAULT_BOUNDARIES_PATH: &str = "departements.geojson";

/// Per-request timeout for backend calls.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_BACKEND_URL: &str = "MEDACCESS_BACKEND_URL";
pub const ENV_BIND: &str = "MEDACCESS_BIND";
pub const ENV_BOUNDARIES: &str = "MEDACCESS_BOUNDARIES";
pub const ENV_TIMEOUT_SECS: &str = "MEDACCESS_TIMEOUT_SECS";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medaccess=info,medaccess_lib=info,tower_http=warn"
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Runtime configuration for the dashboard server.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the REST backend, without trailing slash.
    pub backend_url: String,
    pub bind_addr: SocketAddr,
    pub boundaries_path: PathBuf,
    pub request_timeout: Duration,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            bind_addr: SocketAddr::from(DEFAULT_BIND_ADDR),
            boundaries_path: PathBuf::from(DEFAULT_BOUNDARIES_PATH),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl DashboardConfig {
    /// Read overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    /// Unset variables keep their defaults; set-but-invalid ones are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BACKEND_URL) {
            let trimmed = url.trim().trim_end_matches('/');
            if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    var: ENV_BACKEND_URL,
                    value: url,
                });
            }
            config.backend_url = trimmed.to_string();
        }

        if let Some(bind) = lookup(ENV_BIND) {
            config.bind_addr = bind.trim().parse().map_err(|_| ConfigError::Invalid {
                var: ENV_BIND,
                value: bind.clone(),
            })?;
        }

        if let Some(path) = lookup(ENV_BOUNDARIES) {
            if path.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    var: ENV_BOUNDARIES,
                    value: path,
                });
            }
            config.boundaries_path = PathBuf::from(path.trim());
        }

        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            let parsed = secs.trim().parse::<u64>().ok().filter(|s| *s > 0);
            let Some(parsed) = parsed else {
                return Err(ConfigError::Invalid {
                    var: ENV_TIMEOUT_SECS,
                    value: secs,
                });
            };
            config.request_timeout = Duration::from_secs(parsed);
        }

        Ok(config)
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
        move |var| map.get(var).cloned()
    }

    #[test]
    fn defaults_point_at_local_backend() {
        let config = DashboardConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.bind_addr.port(), 3000);
        assert!(config.bind_addr.ip().is_loopback());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn empty_environment_keeps_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(config.boundaries_path, PathBuf::from(DEFAULT_BOUNDARIES_PATH));
    }

    #[test]
    fn overrides_are_applied() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_BACKEND_URL, "https://data.example.org/"),
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_BOUNDARIES, "/srv/geo/departements.geojson"),
            (ENV_TIMEOUT_SECS, "3"),
        ]))
        .unwrap();

        assert_eq!(config.backend_url, "https://data.example.org");
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.boundaries_path,
            PathBuf::from("/srv/geo/departements.geojson")
        );
        assert_eq!(config.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn backend_url_without_scheme_is_rejected() {
        let err = DashboardConfig::from_lookup(lookup_from(&[(ENV_BACKEND_URL, "localhost:8000")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: ENV_BACKEND_URL,
                value: "localhost:8000".into()
            }
        );
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let result = DashboardConfig::from_lookup(lookup_from(&[(ENV_BIND, "not-an-address")]));
        assert!(matches!(result, Err(ConfigError::Invalid { var: ENV_BIND, .. })));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = DashboardConfig::from_lookup(lookup_from(&[(ENV_TIMEOUT_SECS, "0")]));
        assert!(matches!(result, Err(ConfigError::Invalid { var: ENV_TIMEOUT_SECS, .. })));
    }

    #[test]
    fn app_name_is_medaccess() {
        assert_eq!(APP_NAME, "Medaccess");
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
