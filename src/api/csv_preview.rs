use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tokio::task::spawn_blocking;
use tracing::{error, info, warn};

use crate::api::{ApiError, ApiResponse, UploadData, UploadService};
use crate::models::{ImportSummary, ImportedRow, RowStatus};
use crate::types::{Money, RowNumber};

/// File position of the record at `index`, counted from 1.
pub(crate) fn row_number_at(index: usize) -> Option<RowNumber> {
    index.checked_add(1).and_then(|number| RowNumber::try_from(number).ok())
}

/// One record of the bill spreadsheet export, before validation.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(default)]
    house_no: String,
    #[serde(default)]
    member_name: String,
    #[serde(default)]
    total_price: String,
    #[serde(default)]
    remark: Option<String>
}

/// Offline stand-in for the upload service that parses CSV exports locally.
///
/// Produces the same rows and summary shape as the backend so a file can be
/// previewed (and its exclusions rehearsed) without network access.
#[derive(Debug, Clone, Default)]
pub struct CsvPreviewService {
    known_units: Option<Arc<HashSet<String>>>
}

impl CsvPreviewService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows whose house number is not in `units` will be marked invalid.
    pub fn with_known_units(units: HashSet<String>) -> Self {
        Self {
            known_units: Some(Arc::new(units))
        }
    }

    /// Reads a unit registry with one house number per line; `#` starts a comment.
    pub fn load_units(path: &Path) -> Result<HashSet<String>, ApiError> {
        let content = fs::read_to_string(path).map_err(|error| ApiError::file(path, error))?;

        Ok(content.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect())
    }

    pub fn parse_file(&self, path: &Path) -> Result<UploadData, ApiError> {
        let file = File::open(path).map_err(|error| ApiError::file(path, error))?;

        self.parse(BufReader::new(file))
    }

    /// Rows are numbered from 1 in file order; unreadable records keep their number but are skipped.
    pub fn parse<R: Read>(&self, reader: R) -> Result<UploadData, ApiError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        reader.headers()?;

        let mut items = Vec::new();

        for (index, result) in reader.deserialize::<RawRecord>().enumerate() {
            let Some(row_number) = row_number_at(index) else {
                error!("CSV record [{index}] is beyond the supported row numbers, skipping");
                continue;
            };

            match result {
                Ok(record) => items.push(self.validate(row_number, record)),
                Err(error) => {
                    error!("CSV deserialization error on row [{row_number}]: {error}");
                }
            }
        }

        let summary = ImportSummary::from_rows(&items);

        info!(
            "Parsed {} rows ({} valid, {} invalid), valid total {}",
            summary.total_rows, summary.valid_rows, summary.invalid_rows, summary.total_price
        );

        Ok(UploadData { items, summary })
    }

    fn validate(&self, row_number: RowNumber, record: RawRecord) -> ImportedRow {
        let mut reasons = Vec::new();

        if record.house_no.is_empty() {
            reasons.push("house number is missing".to_string());
        } else if let Some(units) = &self.known_units {
            if !units.contains(&record.house_no) {
                reasons.push(format!("unit [{}] not found", record.house_no));
            }
        }

        let total_price = if record.total_price.is_empty() {
            reasons.push("amount is missing".to_string());
            Money::ZERO
        } else {
            match Money::from_str(&record.total_price) {
                Ok(amount) if amount.is_negative() => {
                    reasons.push(format!("amount [{}] is negative", record.total_price));
                    amount
                },
                Ok(amount) => amount,
                Err(error) => {
                    reasons.push(format!("amount [{}] is malformed: {error}", record.total_price));
                    Money::ZERO
                }
            }
        };

        let status = if reasons.is_empty() { RowStatus::Valid } else { RowStatus::Invalid };
        let reason = (!reasons.is_empty()).then(|| reasons.join("; "));

        if let Some(reason) = &reason {
            warn!("Row [{row_number}] is invalid: {reason}");
        }

        ImportedRow {
            row_number,
            house_no: record.house_no,
            member_name: record.member_name,
            total_price,
            remark: record.remark.filter(|remark| !remark.is_empty()),
            status,
            reason
        }
    }
}

#[async_trait]
impl UploadService for CsvPreviewService {
    async fn upload(&self, file: &Path, correlation_key: &str) -> Result<ApiResponse<UploadData>, ApiError> {
        info!("Parsing [{}] locally for import [{correlation_key}]", file.display());

        let service = self.clone();
        let path: PathBuf = file.to_path_buf();

        let parsed = spawn_blocking(move || service.parse_file(&path)).await
            .map_err(|error| ApiError::Worker(error.to_string()))?;

        // Mirror the backend: unreadable uploads are rejections, not transport failures.
        Ok(match parsed {
            Ok(data) => ApiResponse::ok(data),
            Err(error) => ApiResponse::failure(error.to_string())
        })
    }
}
