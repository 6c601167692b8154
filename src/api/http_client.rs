use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::api::{ApiError, ApiResponse, BillService, CommitReceipt, CommitRequest, UploadData, UploadService};
use crate::config::ApiConfig;

const USER_AGENT: &str = concat!("bill-import/", env!("CARGO_PKG_VERSION"));

/// Backend client for the upload and commit endpoints.
pub struct HttpBillingApi {
    config: ApiConfig,
    http_client: reqwest::Client
}

impl HttpBillingApi {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self::with_client(config, http_client))
    }

    pub fn with_client(config: ApiConfig, http_client: reqwest::Client) -> Self {
        Self { config, http_client }
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.bearer_auth(token),
            None => request
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<ApiResponse<T>, ApiError> {
        let response = self.authorize(request).send().await
            .map_err(|error| ApiError::transport(url, error))?;

        let status = response.status();
        let body = response.bytes().await
            .map_err(|error| ApiError::transport(url, error))?;

        debug!("[{url}] answered with status [{status}] and {} bytes", body.len());

        // Failure statuses usually still carry an envelope with the reason.
        match serde_json::from_slice::<ApiResponse<T>>(&body) {
            Ok(envelope) => Ok(envelope),
            Err(error) if status.is_success() => Err(ApiError::decode(url, error)),
            Err(_) => Err(ApiError::Status { url: url.to_string(), status: status.as_u16() })
        }
    }
}

#[async_trait]
impl UploadService for HttpBillingApi {
    async fn upload(&self, file: &Path, correlation_key: &str) -> Result<ApiResponse<UploadData>, ApiError> {
        let url = self.endpoint(&self.config.upload_path);
        let bytes = tokio::fs::read(file).await.map_err(|error| ApiError::file(file, error))?;
        let file_name = file.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        info!("Uploading [{file_name}] ({} bytes) for import [{correlation_key}]", bytes.len());

        let form = Form::new()
            .text("correlation_key", correlation_key.to_string())
            .text("menu", self.config.menu.clone())
            .part("file", Part::bytes(bytes).file_name(file_name));

        self.send(self.http_client.post(&url).multipart(form), &url).await
    }
}

#[async_trait]
impl BillService for HttpBillingApi {
    async fn commit(&self, request: &CommitRequest) -> Result<ApiResponse<CommitReceipt>, ApiError> {
        let url = self.endpoint(&self.config.commit_path);

        info!(
            "Committing import [{}] with excluded rows [{}]",
            request.correlation_key, request.excluded_rows
        );

        self.send(self.http_client.post(&url).json(request), &url).await
    }
}
