use serde::{Deserialize, Serialize};

use crate::api::ApiError;

const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Uniform response wrapper used by every backend endpoint.
///
/// Callers branch on `success` only; `message` and `error` are free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub pagination: Option<Pagination>
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            pagination: None
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
            pagination: None
        }
    }

    /// Text to show the operator when the call did not succeed.
    pub fn failure_message(&self) -> String {
        [self.message.as_deref(), self.error.as_deref()].into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string()
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Rejected(self.failure_message()));
        }

        self.data.ok_or(ApiError::MissingData)
    }
}
