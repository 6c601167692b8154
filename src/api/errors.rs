use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP client could not be built: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to [{url}] failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error
    },
    #[error("Request to [{url}] returned status [{status}] without a readable body")]
    Status {
        url: String,
        status: u16
    },
    #[error("Response from [{url}] could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Could not read file [{path}]: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("Invalid CSV input: {0}")]
    Csv(#[from] csv::Error),
    #[error("Background worker failed: {0}")]
    Worker(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Response reported success but carried no data")]
    MissingData
}

impl ApiError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        Self::Transport { url: url.to_string(), source }
    }

    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        Self::Decode { url: url.to_string(), source }
    }

    pub fn file(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::File { path: path.display().to_string(), source }
    }
}
