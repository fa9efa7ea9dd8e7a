//! Report sinks: JSON report and a per-path CSV table

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use portsim_core::model::SimulationBatch;
use portsim_core::report::Report;

/// Write the report as pretty JSON followed by a newline.
pub fn write_report_json<W: Write>(report: &Report, mut writer: W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()
}

/// Write the report to `path`, or to stdout when `path` is `None`.
pub fn emit_report(report: &Report, path: Option<&Path>) -> io::Result<()> {
    match path {
        Some(path) => write_report_json(report, BufWriter::new(File::create(path)?)),
        None => write_report_json(report, io::stdout().lock()),
    }
}

/// One row per month: `month, sim_1, sim_2, ...`
pub fn write_paths_csv<W: Write>(batch: &SimulationBatch, writer: W) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["month".to_string()];
    header.extend(batch.paths.iter().map(|p| p.id.to_string()));
    wtr.write_record(&header)?;

    for (m, month) in batch.months.iter().enumerate() {
        let mut row = Vec::with_capacity(batch.len() + 1);
        row.push(month.to_string());
        row.extend(
            batch
                .paths
                .iter()
                .map(|p| p.growth.get(m).map(f64::to_string).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn save_paths_csv(batch: &SimulationBatch, path: &Path) -> csv::Result<()> {
    write_paths_csv(batch, File::create(path)?)
}
