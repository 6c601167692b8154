use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Result};

fn run_cli(args: &[&str]) -> Result<std::process::Output> {
    let binary_path = env!("CARGO_BIN_EXE_bill-import");

    Ok(Command::new(binary_path)
        .args(args)
        .env_remove("BILL_IMPORT_BASE_URL")
        .env_remove("BILL_IMPORT_TOKEN")
        .output()?)
}

fn sample(name: &str) -> String {
    Path::new("samples").join(name).display().to_string()
}

fn split_tables(stdout: &str) -> Result<(Vec<&str>, Vec<&str>)> {
    let (rows, totals) = stdout.split_once("\n\n").ok_or_else(|| anyhow!("Summary table missing from output"))?;

    Ok((rows.lines().collect(), totals.lines().collect()))
}

#[test]
fn test_cli_previews_sample_rows_and_summary() -> Result<()> {
    let output = run_cli(&["preview", &sample("october.csv")])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let (rows, totals) = split_tables(&stdout)?;

    assert_eq!(rows[0], "row_number,house_no,member_name,total_price,status,remark");
    assert_eq!(rows.len(), 6);
    assert_eq!(rows[2], "2,102,Boonmee Chai,฿0,invalid,check meter");
    assert_eq!(totals[0], "total_rows,valid_rows,invalid_rows,total_price,excluded_rows");
    assert_eq!(totals[1], "5,3,2,\"฿2,450.50\",");

    Ok(())
}

#[test]
fn test_cli_preview_applies_exclusions_and_unit_registry() -> Result<()> {
    let output = run_cli(&["preview", &sample("october.csv"), "--units", &sample("units.txt"), "--exclude", "2,3"])?;

    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let (rows, totals) = split_tables(&stdout)?;

    assert_eq!(rows.len(), 4);
    assert!(rows[3].starts_with("5,105,Ekkachai Pong,฿750,invalid"));
    assert_eq!(totals[1], "3,1,2,฿500,\"2,3\"");

    Ok(())
}

#[test]
fn test_cli_preview_reports_emptied_batch() -> Result<()> {
    let output = run_cli(&["preview", &sample("october.csv"), "--exclude", "1,2,3,4,5"])?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("Last item removed"));

    Ok(())
}

#[test]
fn test_cli_preview_fails_for_missing_file() -> Result<()> {
    let output = run_cli(&["preview", &sample("missing.csv")])?;

    assert!(!output.status.success());

    Ok(())
}

#[test]
fn test_cli_import_fails_cleanly_when_backend_is_unreachable() -> Result<()> {
    let binary_path = env!("CARGO_BIN_EXE_bill-import");
    let output = Command::new(binary_path)
        .args([
            "import", &sample("october.csv"),
            "--title", "October common fee",
            "--bill-type", "common_fee",
            "--period", "2026-10",
            "--due-date", "2026-10-31",
        ])
        .env("BILL_IMPORT_BASE_URL", "http://127.0.0.1:9")
        .output()?;

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8(output.stderr)?.contains("127.0.0.1:9"));

    Ok(())
}
