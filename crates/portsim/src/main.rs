use clap::Parser;
use portsim::{Args, init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let report = run(&args)?;

    tracing::info!(
        median = report.summary.median_value,
        max = report.summary.max.terminal,
        min = report.summary.min.terminal,
        "portsim finished"
    );
    Ok(())
}
