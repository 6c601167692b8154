use std::path::Path;
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::api::{ApiError, ApiResponse, BillForm, BillService, CommitReceipt, CommitRequest, UploadService};
use crate::engine::{Action, ExclusionOutcome, ImportSession, Transition};
use crate::types::RowNumber;
use crate::workflow::WorkflowError;

/// Drives one import screen: upload, local exclusions, then commit.
///
/// Only one request may be outstanding at a time. The busy flag is cleared
/// when the request settles; a request that never settles leaves it set.
/// Local state is only touched when the backend reports success.
pub struct ImportWorkflow<U, B> {
    uploader: Arc<U>,
    biller: Arc<B>,
    correlation_key: String,
    session: ImportSession,
    busy: bool
}

impl<U: UploadService, B: BillService> ImportWorkflow<U, B> {
    pub fn new(uploader: Arc<U>, biller: Arc<B>) -> Self {
        Self::resume(uploader, biller, new_correlation_key(), ImportSession::new())
    }

    /// Picks up a session previously parked with [`ImportWorkflow::into_parts`].
    pub fn resume(uploader: Arc<U>, biller: Arc<B>, correlation_key: String, session: ImportSession) -> Self {
        Self {
            uploader,
            biller,
            correlation_key,
            session,
            busy: false
        }
    }

    pub fn into_parts(self) -> (String, ImportSession) {
        (self.correlation_key, self.session)
    }

    pub fn correlation_key(&self) -> &str {
        &self.correlation_key
    }

    pub fn session(&self) -> &ImportSession {
        &self.session
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub async fn upload(&mut self, file: &Path) -> Result<Transition, WorkflowError> {
        self.begin_request()?;
        let response = self.uploader.upload(file, &self.correlation_key).await;
        self.busy = false;

        let data = settle(response)?;

        Ok(self.session.dispatch(Action::LoadBatch {
            rows: data.items,
            summary: data.summary
        }))
    }

    pub fn dispatch(&mut self, action: Action) -> Transition {
        self.session.dispatch(action)
    }

    pub fn exclude_row(&mut self, row_number: RowNumber, house_no: &str) -> ExclusionOutcome {
        self.session.exclude_row(row_number, house_no)
    }

    /// Commits the batch as a draft or published bill, then starts a fresh import.
    pub async fn submit(&mut self, form: BillForm) -> Result<CommitReceipt, WorkflowError> {
        if self.busy {
            return Err(WorkflowError::busy(&self.correlation_key));
        }

        if self.session.is_empty() {
            return Err(WorkflowError::empty_batch(&self.correlation_key));
        }

        let request = CommitRequest {
            correlation_key: self.correlation_key.clone(),
            form,
            excluded_rows: self.session.exclusion_list()
        };

        self.busy = true;
        let response = self.biller.commit(&request).await;
        self.busy = false;

        let receipt = settle(response)?;

        info!("Import [{}] committed as bill [{}]", self.correlation_key, receipt.id);

        self.session.reset();
        self.correlation_key = new_correlation_key();

        Ok(receipt)
    }

    pub fn cancel(&mut self) {
        self.session.reset();
    }

    fn begin_request(&mut self) -> Result<(), WorkflowError> {
        if self.busy {
            return Err(WorkflowError::busy(&self.correlation_key));
        }

        self.busy = true;

        Ok(())
    }
}

fn new_correlation_key() -> String {
    Uuid::new_v4().to_string()
}

fn settle<T>(response: Result<ApiResponse<T>, ApiError>) -> Result<T, WorkflowError> {
    let envelope = response?;

    if !envelope.success {
        let message = envelope.failure_message();
        warn!("Backend rejected request: {message}");
        return Err(WorkflowError::Rejected(message));
    }

    Ok(envelope.into_result()?)
}
