use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Another request for import [{correlation_key}] is still in flight")]
    Busy {
        correlation_key: String
    },
    #[error("Import [{correlation_key}] has no rows to submit")]
    EmptyBatch {
        correlation_key: String
    },
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Api(#[from] ApiError)
}

impl WorkflowError {
    pub fn busy(correlation_key: &str) -> Self {
        Self::Busy { correlation_key: correlation_key.to_string() }
    }

    pub fn empty_batch(correlation_key: &str) -> Self {
        Self::EmptyBatch { correlation_key: correlation_key.to_string() }
    }
}
