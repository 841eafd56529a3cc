use clap::Parser;
use comfy_table::Table;
use comfy_table::presets::UTF8_FULL;
use configuration::{ConfigError, Settings};
use database::DbError;
use formatter::FormatError;
use ingest::IngestError;

mod cli;
mod logging;
mod pipeline;

use cli::{Cli, prompt_format};
use pipeline::RunSummary;

/// The main entry point for the roomstat report generator.
///
/// Failures are reported on one line and the process still exits normally.
#[tokio::main]
async fn main() {
    // Load DATABASE_URL and friends from a .env file, if there is one.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = match configuration::load_config() {
        Ok(settings) => settings,
        Err(e) => {
            report_failure(&e.into());
            return;
        }
    };

    // The guard must outlive every log statement.
    let _log_guard = match logging::init_tracing(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Logging is disabled: {e:#}");
            None
        }
    };

    match run(cli, &settings).await {
        Ok(summary) => print_summary(&summary),
        Err(e) => report_failure(&e),
    }
}

async fn run(cli: Cli, settings: &Settings) -> anyhow::Result<RunSummary> {
    let options = cli.resolve(settings);

    let format = match options.format {
        Some(format) => format,
        None => {
            let stdin = std::io::stdin();
            prompt_format(&mut stdin.lock(), &mut std::io::stdout())?
        }
    };
    tracing::info!(%format, output_dir = %options.output_dir.display(), "Starting run.");

    pipeline::run(&options, format, &settings.database).await
}

fn print_summary(summary: &RunSummary) {
    println!(
        "\nAll your reports have been saved to the directory '{}'.",
        summary.output_dir.display()
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Report", "Rows", "File"]);
    for report in &summary.reports {
        table.add_row(vec![
            report.kind.title().to_string(),
            report.rows.to_string(),
            report.path.display().to_string(),
        ]);
    }
    println!("{table}");
    println!(
        "Loaded {} rooms and {} students.",
        summary.load.rooms, summary.load.students
    );
}

fn report_failure(err: &anyhow::Error) {
    if is_expected(err) {
        let line = one_line(err);
        tracing::error!(error = %line, "Run failed.");
        println!("Could not generate the reports. Error: {line}");
    } else {
        tracing::error!(error = ?err, "Run failed.");
        println!("Unexpected error: {err:?}");
    }
}

/// Joins the cause chain with `": "`, skipping a cause whose text is already
/// part of the line (sqlx repeats the driver message in its own source).
fn one_line(err: &anyhow::Error) -> String {
    let mut line = String::new();
    for cause in err.chain() {
        let text = cause.to_string();
        if line.contains(&text) {
            continue;
        }
        if !line.is_empty() {
            line.push_str(": ");
        }
        line.push_str(&text);
    }
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whether the failure comes from input, configuration, the store or the output,
/// as opposed to a bug.
fn is_expected(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.is::<IngestError>()
            || cause.is::<DbError>()
            || cause.is::<FormatError>()
            || cause.is::<ConfigError>()
            || cause.is::<std::io::Error>()
    })
}
