use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{ImportSummary, ImportedRow};
use crate::types::BillId;

/// `data` of a successful upload: the parsed rows with the summary fields inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadData {
    #[serde(default)]
    pub items: Vec<ImportedRow>,
    #[serde(flatten)]
    pub summary: ImportSummary
}

/// Operator-entered bill header fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillForm {
    pub title: String,
    pub bill_type: String,
    /// Billing period label, e.g. `2026-10`.
    pub period: String,
    pub due_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
    /// `false` saves a draft.
    #[serde(default)]
    pub publish: bool
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRequest {
    pub correlation_key: String,
    #[serde(flatten)]
    pub form: BillForm,
    /// Comma-joined row numbers removed before commit.
    pub excluded_rows: String
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    #[serde(alias = "bill_id", deserialize_with = "deserialize_bill_id")]
    pub id: BillId
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBillId {
    Number(u64),
    Text(String)
}

fn deserialize_bill_id<'de, D>(deserializer: D) -> Result<BillId, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawBillId::deserialize(deserializer)? {
        RawBillId::Number(id) => id.to_string(),
        RawBillId::Text(id) => id
    })
}
