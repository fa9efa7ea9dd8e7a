//! Command-line arguments and the top-level run

use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use color_eyre::eyre::{WrapErr, eyre};
use portsim_core::config::ReportConfig;
use portsim_core::report::{Report, run_report};
use portsim_core::source::PriceSource;

use crate::output::{emit_report, save_paths_csv};
use crate::sources::{CsvDirSource, HttpPriceSource};

#[derive(Parser, Debug, Clone)]
#[command(name = "portsim")]
#[command(about = "Monte Carlo projection of portfolio growth from historical prices")]
#[command(group(ArgGroup::new("source").required(true).args(["prices_dir", "url_template"])))]
pub struct Args {
    /// Path to the YAML report configuration
    #[arg(short, long)]
    pub config: PathBuf,

    /// Directory holding one `<TICKER>.csv` per holding
    #[arg(long)]
    pub prices_dir: Option<PathBuf>,

    /// URL template for price CSVs, e.g. `https://host/{ticker}.csv?from={start}`
    #[arg(long)]
    pub url_template: Option<String>,

    /// Seed for the simulation (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulated paths (overrides the config file)
    #[arg(long)]
    pub simulations: Option<usize>,

    /// Months to simulate (overrides the config file)
    #[arg(long)]
    pub months: Option<usize>,

    /// Write the JSON report here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write every simulated path as a CSV table
    #[arg(long)]
    pub paths_csv: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration.
    pub fn apply_overrides(&self, config: &mut ReportConfig) {
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(simulations) = self.simulations {
            config.simulations = simulations;
        }
        if let Some(months) = self.months {
            config.months = months;
        }
    }
}

pub fn load_config(path: &Path) -> color_eyre::Result<ReportConfig> {
    let yaml = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("reading config {}", path.display()))?;
    parse_config(&yaml).wrap_err_with(|| format!("parsing config {}", path.display()))
}

pub fn parse_config(yaml: &str) -> Result<ReportConfig, serde_saphyr::Error> {
    serde_saphyr::from_str(yaml)
}

fn price_source(args: &Args) -> color_eyre::Result<Box<dyn PriceSource>> {
    match (&args.prices_dir, &args.url_template) {
        (Some(dir), _) => Ok(Box::new(CsvDirSource::new(dir))),
        (None, Some(template)) => Ok(Box::new(
            HttpPriceSource::new(template).wrap_err("building HTTP client")?,
        )),
        (None, None) => Err(eyre!("either --prices-dir or --url-template is required")),
    }
}

/// Load, simulate, and write outputs.
pub fn run(args: &Args) -> color_eyre::Result<Report> {
    let mut config = load_config(&args.config)?;
    args.apply_overrides(&mut config);

    tracing::info!(
        portfolio = %config.name,
        holdings = config.holdings.len(),
        simulations = config.simulations,
        months = config.months,
        "running report"
    );

    let source = price_source(args)?;
    let report = run_report(&config, source.as_ref())?;

    emit_report(&report, args.output.as_deref()).wrap_err("writing report")?;
    if let Some(path) = &args.paths_csv {
        save_paths_csv(&report.batch, path)
            .wrap_err_with(|| format!("writing paths to {}", path.display()))?;
    }

    tracing::info!(seed = report.seed, "report complete");
    Ok(report)
}
