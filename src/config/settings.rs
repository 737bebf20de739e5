use std::env;
use std::path::PathBuf;

use log::{debug, warn};

pub const MONGO_DB_URL: &str = "MONGO_DB_URL";
pub const MONGO_CA_FILE: &str = "MONGO_CA_FILE";

/// Connection settings read from the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub mongo_db_url: Option<String>,
    /// PEM bundle used to verify the server certificate. When unset the
    /// driver's bundled roots are used.
    pub mongo_ca_file: Option<PathBuf>,
}

impl Settings {
    /// Load a `.env` file if one exists, then read the process environment.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("ignoring unreadable .env file: {}", e),
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            mongo_db_url: non_empty(MONGO_DB_URL),
            mongo_ca_file: non_empty(MONGO_CA_FILE).map(PathBuf::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_reads_url_and_ca_file() {
        let settings = Settings::from_lookup(lookup(&[
            (MONGO_DB_URL, "mongodb://localhost:27017"),
            (MONGO_CA_FILE, "/etc/ssl/ca.pem"),
        ]));
        assert_eq!(settings.mongo_db_url.as_deref(), Some("mongodb://localhost:27017"));
        assert_eq!(settings.mongo_ca_file, Some(PathBuf::from("/etc/ssl/ca.pem")));
    }

    #[test]
    fn test_missing_and_blank_values_are_none() {
        let settings = Settings::from_lookup(lookup(&[(MONGO_DB_URL, "   ")]));
        assert!(settings.mongo_db_url.is_none());
        assert!(settings.mongo_ca_file.is_none());
    }
}
