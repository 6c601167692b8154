use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read configuration [{path}]: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("Configuration is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration is invalid: {0}")]
    Invalid(String)
}
