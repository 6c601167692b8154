use super::{ImportSummary, ImportedRow, RowStatus};

use anyhow::Result;

use crate::types::{Money, RowNumber};

fn create_row(row_number: RowNumber, house_no: &str, major: i64, status: RowStatus) -> ImportedRow {
    ImportedRow {
        row_number,
        house_no: house_no.to_string(),
        member_name: format!("Member {house_no}"),
        total_price: Money::from_major(major).unwrap_or_default(),
        remark: None,
        status,
        reason: None
    }
}

#[test]
fn test_row_deserializes_from_upload_payload() -> Result<()> {
    let payload = r#"{
        "row_number": 4,
        "house_no": "12/7",
        "member_name": "Somchai",
        "total_price": 1250.5,
        "remark": "water",
        "status": 1
    }"#;

    let row: ImportedRow = serde_json::from_str(payload)?;

    assert_eq!(row.row_number, 4);
    assert_eq!(row.total_price.minor_units(), 125_050);
    assert_eq!(row.remark.as_deref(), Some("water"));
    assert!(row.is_valid());
    assert!(row.reason.is_none());

    Ok(())
}

#[test]
fn test_row_status_rejects_unknown_codes() {
    let result = serde_json::from_str::<RowStatus>("2");

    assert!(result.is_err());
    assert_eq!(serde_json::from_str::<RowStatus>("0").ok(), Some(RowStatus::Invalid));
}

#[test]
fn test_row_status_serializes_as_integer_code() -> Result<()> {
    let row = create_row(1, "101", 500, RowStatus::Invalid);
    let value = serde_json::to_value(&row)?;

    assert_eq!(value["status"], 0);
    assert_eq!(value["total_price"], "฿500");
    assert!(value.get("remark").is_none());

    Ok(())
}

#[test]
fn test_summary_deserializes_formatted_total() -> Result<()> {
    let summary: ImportSummary = serde_json::from_str(
        r#"{"total_rows": 3, "valid_rows": 2, "invalid_rows": 1, "total_price": "฿1,200"}"#
    )?;

    assert_eq!(summary.total_price.minor_units(), 120_000);
    assert!(summary.is_balanced());

    Ok(())
}

#[test]
fn test_summary_from_rows_counts_only_valid_amounts() {
    let rows = vec![
        create_row(1, "101", 500, RowStatus::Valid),
        create_row(2, "102", 300, RowStatus::Invalid),
        create_row(3, "103", 700, RowStatus::Valid),
    ];

    let summary = ImportSummary::from_rows(&rows);

    assert_eq!(summary.total_rows, 3);
    assert_eq!(summary.valid_rows, 2);
    assert_eq!(summary.invalid_rows, 1);
    assert_eq!(summary.total_price.to_string(), "฿1,200");
}

#[test]
fn test_summary_subtract_never_underflows_counters() {
    let mut summary = ImportSummary::default();
    summary.subtract(&create_row(1, "101", 0, RowStatus::Invalid));

    assert_eq!(summary.total_rows, 0);
    assert_eq!(summary.invalid_rows, 0);
    assert!(summary.is_balanced());
}
