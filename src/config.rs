//! Server configuration from the environment.
//!
//! `PORT` wins if set. Otherwise `APP_ENV=production` (or `NODE_ENV=production` when
//! `APP_ENV` is unset) listens on 3051 and anything else on 3050. The store lives at
//! `COASTERS_FILE`, or `<DATA_PATH>/coasters.json` with `DATA_PATH` defaulting to `data`.

use std::collections::HashMap;
use std::path::PathBuf;

pub const DEVELOPMENT_PORT: u16 = 3050;
pub const PRODUCTION_PORT: u16 = 3051;
pub const DEFAULT_DATA_PATH: &str = "data";
pub const STORE_FILE_NAME: &str = "coasters.json";

/// Runtime mode; selects the default port.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn from_str(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn default_port(self) -> u16 {
        match self {
            Environment::Development => DEVELOPMENT_PORT,
            Environment::Production => PRODUCTION_PORT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub environment: Environment,
    pub bind_addr: String,
    pub port: u16,
    pub store_path: PathBuf,
}

impl ServerConfig {
    /// Load from process env.
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars().collect())
    }

    /// Build from a variable map. For tests.
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        let get = |k: &str| vars.get(k).map(|v| v.trim()).filter(|v| !v.is_empty());

        let environment = get("APP_ENV")
            .or_else(|| get("NODE_ENV"))
            .map(Environment::from_str)
            .unwrap_or(Environment::Development);
        let port = get("PORT")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| environment.default_port());
        let bind_addr = get("BIND_ADDR").unwrap_or("0.0.0.0").to_string();
        let store_path = match get("COASTERS_FILE") {
            Some(file) => PathBuf::from(file),
            None => PathBuf::from(get("DATA_PATH").unwrap_or(DEFAULT_DATA_PATH)).join(STORE_FILE_NAME),
        };

        Self {
            environment,
            bind_addr,
            port,
            store_path,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_are_development() {
        let config = ServerConfig::from_vars(HashMap::new());
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, 3050);
        assert_eq!(config.store_path, PathBuf::from("data").join("coasters.json"));
        assert_eq!(config.listen_addr(), "0.0.0.0:3050");
    }

    #[test]
    fn production_uses_production_port() {
        let config = ServerConfig::from_vars(vars(&[("APP_ENV", "Production")]));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.port, 3051);
    }

    #[test]
    fn node_env_selects_environment_when_app_env_unset() {
        let config = ServerConfig::from_vars(vars(&[("NODE_ENV", "production")]));
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.port, 3051);

        let config = ServerConfig::from_vars(vars(&[
            ("APP_ENV", "development"),
            ("NODE_ENV", "production"),
        ]));
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.port, 3050);
    }

    #[test]
    fn explicit_port_and_paths_override() {
        let config = ServerConfig::from_vars(vars(&[
            ("APP_ENV", "production"),
            ("PORT", "8080"),
            ("DATA_PATH", "/var/lib/coasters"),
        ]));
        assert_eq!(config.port, 8080);
        assert_eq!(config.store_path, PathBuf::from("/var/lib/coasters/coasters.json"));

        let config = ServerConfig::from_vars(vars(&[
            ("DATA_PATH", "/ignored"),
            ("COASTERS_FILE", "/tmp/store.json"),
        ]));
        assert_eq!(config.store_path, PathBuf::from("/tmp/store.json"));
    }

    #[test]
    fn unparseable_port_falls_back() {
        let config = ServerConfig::from_vars(vars(&[("PORT", "http")]));
        assert_eq!(config.port, 3050);
    }
}
