use std::path::PathBuf;

use clap::Parser;
use roster_recon::Result;
use roster_recon::logging::{self, LogConfig};
use roster_recon::merge::{self, DEFAULT_SKIP_ROWS, ReconcileOptions};
use tracing::error;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    logging::init(&LogConfig {
        file: cli.log_file.clone(),
        console: !cli.no_console,
    })?;

    let options = ReconcileOptions {
        source_a: cli.roster,
        source_b: cli.registration,
        output: cli.output,
        skip_rows: cli.skip_rows,
        reorder: !cli.no_reorder,
    };

    match merge::reconcile(&options) {
        Ok(summary) => {
            if cli.json_summary {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            Ok(())
        }
        Err(failure) => {
            error!("an error occurred during the merge process: {failure}");
            Err(failure)
        }
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Reconcile a roster export against a registration report."
)]
struct Cli {
    /// Roster export workbook (columns "First name" / "Last name").
    roster: PathBuf,

    /// Registration report workbook (columns "First names" / "Surname").
    registration: PathBuf,

    /// Destination for the merged workbook.
    output: PathBuf,

    /// Leading metadata rows to discard from the registration report.
    #[arg(long, default_value_t = DEFAULT_SKIP_ROWS)]
    skip_rows: usize,

    /// Keep columns in join order instead of the preferred order.
    #[arg(long)]
    no_reorder: bool,

    /// Also write log lines to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Suppress console logging.
    #[arg(long)]
    no_console: bool,

    /// Print the run summary as JSON on stdout.
    #[arg(long)]
    json_summary: bool,
}
