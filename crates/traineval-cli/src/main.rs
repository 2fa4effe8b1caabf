use std::path::PathBuf;

use clap::Parser;
use eyre::Result;

use traineval_cli::{RunOptions, run};
use traineval_export::delivery::REPORT_FILE_NAME;

/// Generate a training evaluation PDF report from an evaluation workbook.
#[derive(Debug, Parser)]
#[command(name = "generate-report", version, about)]
struct Cli {
    /// Evaluation workbook (.xlsx) with a "Summary" sheet.
    #[arg(short, long)]
    input: PathBuf,

    /// PDF whose page text is drawn faintly behind the matching report page.
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output PDF file, or a directory to write the default file name into.
    #[arg(short, long, default_value = REPORT_FILE_NAME)]
    output: PathBuf,

    /// JSON config overriding the defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also write scores and page counts as JSON.
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = run(&RunOptions {
        input: cli.input,
        template: cli.template,
        output: cli.output,
        config: cli.config,
        summary: cli.summary,
    })?;

    println!("{}", outcome.report_path.display());
    if let Some(path) = outcome.summary_path {
        println!("{}", path.display());
    }
    Ok(())
}
