mod csv_preview;
mod envelope;
mod errors;
mod http_client;
mod payloads;

use std::path::Path;

use async_trait::async_trait;

pub use csv_preview::CsvPreviewService;
pub use envelope::{ApiResponse, Pagination};
pub use errors::ApiError;
pub use http_client::HttpBillingApi;
pub use payloads::{BillForm, CommitReceipt, CommitRequest, UploadData};

/// Parses an uploaded spreadsheet into rows plus an authoritative summary.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(&self, file: &Path, correlation_key: &str) -> Result<ApiResponse<UploadData>, ApiError>;
}

/// Finalizes the bill for a correlation key, dropping the excluded rows.
#[async_trait]
pub trait BillService: Send + Sync {
    async fn commit(&self, request: &CommitRequest) -> Result<ApiResponse<CommitReceipt>, ApiError>;
}
