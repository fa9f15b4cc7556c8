use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::DigestResult;
use crate::merge::{Report, Row};
use crate::metric::MetricStrategy;

pub fn csv_header(strategy: &dyn MetricStrategy) -> String {
    format!("Cards,Board,Action,{},Count", strategy.label())
}

/// Cards and board hold commas, so they are always quoted.
pub fn csv_line(row: &Row) -> String {
    format!(
        "\"{}\",\"{}\",{},{},{}",
        row.cards, row.board, row.action, row.average, row.count
    )
}

pub fn write_csv<W: Write>(out: &mut W, report: &Report, strategy: &dyn MetricStrategy) -> io::Result<()> {
    writeln!(out, "{}", csv_header(strategy))?;
    for row in report.values().flatten() {
        writeln!(out, "{}", csv_line(row))?;
    }
    Ok(())
}

pub fn write_json<W: Write>(out: &mut W, report: &Report) -> DigestResult<()> {
    let rows: Vec<&Row> = report.values().flatten().collect();
    serde_json::to_writer_pretty(&mut *out, &rows)?;
    writeln!(out)?;
    Ok(())
}

pub fn write_report<W: Write>(
    out: &mut W,
    report: &Report,
    format: OutputFormat,
    strategy: &dyn MetricStrategy,
) -> DigestResult<()> {
    match format {
        OutputFormat::Csv => write_csv(out, report, strategy)?,
        OutputFormat::Json => write_json(out, report)?,
        OutputFormat::Table => {
            for (street, rows) in report {
                writeln!(out, "{}", crate::display::rows_table(*street, rows, strategy))?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Writes to `path`, or stdout when no path is given.
pub fn emit(
    path: Option<&Path>,
    report: &Report,
    format: OutputFormat,
    strategy: &dyn MetricStrategy,
) -> DigestResult<()> {
    match path {
        Some(path) => {
            let mut out = BufWriter::new(File::create(path)?);
            write_report(&mut out, report, format, strategy)
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_report(&mut out, report, format, strategy)
        }
    }
}
