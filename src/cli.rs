use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use crate::api::{BillForm, BillService, CsvPreviewService, HttpBillingApi, UploadService};
use crate::config::Config;
use crate::engine::{ExclusionOutcome, ImportSession};
use crate::types::RowNumber;
use crate::workflow::ImportWorkflow;

#[derive(Parser)]
#[command(name = "bill-import")]
#[command(about = "Preview, trim and commit bulk bill imports")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// error, warn, info, debug or trace
    #[arg(long, global = true, default_value = "error")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Commands
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a CSV export locally and print the rows that would be imported
    Preview(PreviewArgs),
    /// Upload a spreadsheet, drop rows and commit the bill
    Import(ImportArgs)
}

#[derive(Args)]
pub struct PreviewArgs {
    pub file: PathBuf,
    /// File listing known house numbers, one per line
    #[arg(long)]
    pub units: Option<PathBuf>,
    /// Row numbers to drop before printing
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<RowNumber>
}

#[derive(Args)]
pub struct ImportArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub bill_type: String,
    /// Billing period label, e.g. 2026-10
    #[arg(long)]
    pub period: String,
    /// Due date as YYYY-MM-DD
    #[arg(long)]
    pub due_date: NaiveDate,
    #[arg(long)]
    pub remark: Option<String>,
    /// Row numbers to drop before committing
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<RowNumber>,
    /// Publish the bill instead of saving a draft
    #[arg(long)]
    pub publish: bool
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Preview(args) => preview(args).await,
        Commands::Import(args) => {
            let config = Config::load(cli.config.as_deref())?;
            import(args, config).await
        }
    }
}

async fn preview(args: PreviewArgs) -> Result<()> {
    let uploader = match &args.units {
        Some(path) => CsvPreviewService::with_known_units(CsvPreviewService::load_units(path)?),
        None => CsvPreviewService::new()
    };

    let data = uploader.upload(&args.file, "preview").await?.into_result()?;
    let mut session = ImportSession::new();
    session.load_batch(data.items, data.summary);

    for row_number in &args.exclude {
        if exclude(&mut session, *row_number) == ExclusionOutcome::BatchEmptied {
            eprintln!("{}", ExclusionOutcome::BatchEmptied.message().unwrap_or_default());
            return Ok(());
        }
    }

    write_preview_to_stdout(&session)
}

async fn import(args: ImportArgs, config: Config) -> Result<()> {
    let api = Arc::new(HttpBillingApi::new(config.api)?);
    let mut workflow = ImportWorkflow::new(api.clone(), api);

    workflow.upload(&args.file).await?;

    for row_number in &args.exclude {
        if exclude_from_workflow(&mut workflow, *row_number) == ExclusionOutcome::BatchEmptied {
            bail!("Every row was excluded, nothing left to commit");
        }
    }

    let form = BillForm {
        title: args.title,
        bill_type: args.bill_type,
        period: args.period,
        due_date: args.due_date,
        remark: args.remark,
        publish: args.publish
    };

    let receipt = workflow.submit(form).await?;

    info!("Bill [{}] created", receipt.id);
    println!("{}", receipt.id);

    Ok(())
}

fn house_no_of(session: &ImportSession, row_number: RowNumber) -> Option<String> {
    session.rows().iter()
        .find(|row| row.row_number == row_number)
        .map(|row| row.house_no.clone())
}

fn exclude(session: &mut ImportSession, row_number: RowNumber) -> ExclusionOutcome {
    let Some(house_no) = house_no_of(session, row_number) else {
        warn!("Row [{row_number}] is not part of the import, skipping");
        return ExclusionOutcome::Unchanged;
    };

    session.exclude_row(row_number, &house_no)
}

fn exclude_from_workflow<U: UploadService, B: BillService>(workflow: &mut ImportWorkflow<U, B>, row_number: RowNumber) -> ExclusionOutcome {
    let Some(house_no) = house_no_of(workflow.session(), row_number) else {
        warn!("Row [{row_number}] is not part of the import, skipping");
        return ExclusionOutcome::Unchanged;
    };

    workflow.exclude_row(row_number, &house_no)
}

fn preview_writer<W: Write>(output: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(output)
}

fn write_preview_to_stdout(session: &ImportSession) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    {
        let mut rows = preview_writer(&mut output);
        rows.write_record(["row_number", "house_no", "member_name", "total_price", "status", "remark"])?;

        for row in session.rows() {
            rows.write_record([
                row.row_number.to_string(),
                row.house_no.clone(),
                row.member_name.clone(),
                row.total_price.to_string(),
                row.status.label().to_string(),
                row.remark.clone().unwrap_or_default()
            ])?;
        }

        rows.flush()?;
    }

    writeln!(output)?;

    if let Some(summary) = session.summary() {
        let mut totals = preview_writer(&mut output);
        totals.write_record(["total_rows", "valid_rows", "invalid_rows", "total_price", "excluded_rows"])?;
        totals.write_record([
            summary.total_rows.to_string(),
            summary.valid_rows.to_string(),
            summary.invalid_rows.to_string(),
            summary.total_price.to_string(),
            session.exclusion_list()
        ])?;
        totals.flush()?;
    }

    output.flush()?;

    Ok(())
}
