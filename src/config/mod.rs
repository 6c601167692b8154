mod errors;
#[cfg(test)]
mod tests;

use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

pub use errors::ConfigError;

pub const BASE_URL_ENV: &str = "BILL_IMPORT_BASE_URL";
pub const TOKEN_ENV: &str = "BILL_IMPORT_TOKEN";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig
}

/// Where the upload and commit endpoints live and how to call them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub upload_path: String,
    pub commit_path: String,
    /// Menu tag sent with every upload so the backend picks the bill template.
    pub menu: String,
    pub token: Option<String>
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            upload_path: "/api/bills/import/upload".to_string(),
            commit_path: "/api/bills".to_string(),
            menu: "bill".to_string(),
            token: None
        }
    }
}

impl Config {
    /// Reads the TOML file when given, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default()
        };

        config.apply_overrides(env::var(BASE_URL_ENV).ok(), env::var(TOKEN_ENV).ok());

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source
        })?;

        debug!("Loaded configuration from [{}]", path.display());

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        if config.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".to_string()));
        }

        Ok(config)
    }

    fn apply_overrides(&mut self, base_url: Option<String>, token: Option<String>) {
        if let Some(base_url) = base_url.filter(|value| !value.trim().is_empty()) {
            self.api.base_url = base_url;
        }

        if let Some(token) = token.filter(|value| !value.trim().is_empty()) {
            self.api.token = Some(token);
        }
    }
}
