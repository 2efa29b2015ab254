use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use vitalscan_lib::pipeline::processor::{build_processor_from_env, read_ocr_text, ProcessingError};
use vitalscan_lib::VitalsReport;

#[derive(Parser, Debug)]
#[command(
    name = "vitalscan",
    version,
    about = "Extract vitals from scanned medical reports and summarize triage risk"
)]
struct Cli {
    #[arg(long, global = true, help = "Output the report record as JSON")]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the pipeline over OCR text read from a file ("-" for stdin)
    Analyze { input: PathBuf },
    /// OCR a scanned PDF with the configured tools, then run the pipeline
    Scan { pdf: PathBuf },
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    vitalscan_lib::init_tracing();

    let cli = Cli::parse();
    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(cli: &Cli) -> Result<(), ProcessingError> {
    let report = match &cli.command {
        Commands::Analyze { input } => vitalscan_lib::run(&read_ocr_text(input)?),
        Commands::Scan { pdf } => build_processor_from_env()?.process_pdf(pdf)?,
    };
    print_report(&report, cli.json)
}

fn print_report(report: &VitalsReport, json: bool) -> Result<(), ProcessingError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.to_record())?);
    } else {
        println!("{}", report.narrative.full_text());
    }
    Ok(())
}
