use anyhow::{Context, Result};
use configuration::{DatabaseSettings, OutputFormat};
use core_types::ReportKind;
use database::{Database, LoadSummary};
use formatter::ReportWriter;
use indicatif::{ProgressBar, ProgressStyle};
use ingest::{Dataset, JsonDataLoader};
use std::path::PathBuf;

use crate::cli::RunOptions;

/// One report file produced by a run.
#[derive(Debug, Clone)]
pub struct WrittenReport {
    pub kind: ReportKind,
    pub rows: usize,
    pub path: PathBuf,
}

/// What a successful run did.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_dir: PathBuf,
    pub load: LoadSummary,
    pub reports: Vec<WrittenReport>,
}

/// Reads both input files, loads them into the store and writes the four reports.
///
/// Inputs are validated before the store is touched, so a bad file never
/// opens a connection.
pub async fn run(
    options: &RunOptions,
    format: OutputFormat,
    db_settings: &DatabaseSettings,
) -> Result<RunSummary> {
    let dataset = JsonDataLoader::new(&options.rooms, &options.students)?.load()?;

    let writer = ReportWriter::new(&options.output_dir, format)?;

    let db = database::connect(db_settings)
        .await
        .context("Failed to connect to the database")?;

    execute(db, &dataset, &writer).await
}

/// Runs the store-side part of the pipeline. The connection is closed on every
/// path before the result is returned.
pub async fn execute(db: Database, dataset: &Dataset, writer: &ReportWriter) -> Result<RunSummary> {
    let result = load_and_report(&db, dataset, writer).await;
    db.close().await;
    result
}

async fn load_and_report(
    db: &Database,
    dataset: &Dataset,
    writer: &ReportWriter,
) -> Result<RunSummary> {
    database::create_tables(db.pool()).await?;

    let repo = db.repository();
    let load = repo.load(&dataset.rooms, &dataset.students).await?;

    database::add_indexes(db.pool()).await?;

    let progress_bar = ProgressBar::new(ReportKind::ALL.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let engine = repo.reports();
    let mut reports = Vec::with_capacity(ReportKind::ALL.len());
    for kind in ReportKind::ALL {
        progress_bar.set_message(kind.file_stem());
        let table = engine.run(kind).await?;
        let path = writer.write(&table)?;
        reports.push(WrittenReport {
            kind,
            rows: table.len(),
            path,
        });
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    Ok(RunSummary {
        output_dir: writer.directory().to_path_buf(),
        load,
        reports,
    })
}
