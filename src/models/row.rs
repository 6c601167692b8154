use serde::{Deserialize, Serialize};

use crate::models::RowStatus;
use crate::types::{Money, RowNumber};

/// A single line of an uploaded billing spreadsheet, as parsed by the upload service.
///
/// `row_number` is assigned upstream and stays stable for the lifetime of the
/// batch, so it is the only identifier used for exclusions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedRow {
    pub row_number: RowNumber,
    pub house_no: String,
    #[serde(default)]
    pub member_name: String,
    /// Amount owed by this row, authoritative at parse time.
    pub total_price: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    pub status: RowStatus,
    /// Why the row was marked invalid, when the parser gave a reason.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>
}

impl ImportedRow {
    pub fn is_valid(&self) -> bool {
        self.status.is_valid()
    }
}
