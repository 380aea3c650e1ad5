//! Batch command implementation.
//!
//! Reads one JSON request per line and writes one result row per request.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use transit_lib::prelude::*;

use crate::display::{BatchRow, Format, write_rows};

/// Parses every non-blank line of `text` into a request, keeping its line number.
fn parse_requests(text: &str) -> Result<Vec<(usize, EstimateRequest)>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let request = serde_json::from_str(line)
                .with_context(|| format!("Invalid request on line {}", index + 1))?;
            Ok((index + 1, request))
        })
        .collect()
}

/// Estimate every request in `requests_path`.
pub(crate) fn batch(
    config: &Path,
    requests_path: &Path,
    format: Format,
    output: Option<&Path>,
    quiet: bool,
) -> Result<()> {
    let engine = super::load_engine(config)?;
    let text = std::fs::read_to_string(requests_path)
        .with_context(|| format!("Failed to read requests: {}", requests_path.display()))?;
    let requests = parse_requests(&text)?;

    // Setup progress bar
    let progress = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(requests.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} requests ({percent}%) {msg}")?
                .progress_chars("=>-"),
        );
        pb
    };

    let mut rows = Vec::with_capacity(requests.len());
    let mut unknown = 0usize;
    for (line, request) in &requests {
        let report = engine.estimate_report(request);
        if !report.estimate.is_known() {
            unknown += 1;
        }
        rows.push(BatchRow::new(*line, &report));
        progress.inc(1);
    }
    progress.finish_with_message(format!(
        "{} estimated, {} without estimate",
        rows.len() - unknown,
        unknown
    ));

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output: {}", path.display()))?;
            write_rows(&rows, BufWriter::new(file), format)?;
            if !quiet {
                println!("Output written to: {}", path.display());
            }
        }
        None => write_rows(&rows, std::io::stdout().lock(), format)?,
    }

    if !quiet {
        let stats = engine.stats().snapshot();
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "{}", serde_json::to_string(&stats)?)?;
    }
    Ok(())
}
