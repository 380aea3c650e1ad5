//! Display utilities and output formatting for the transit CLI.

use anyhow::Result;
use chrono::NaiveDate;
use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;
use transit_lib::{EstimateReport, HolidayCalendar, OrderTime, WorkingDays, date_of};

/// Output format for batch results.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
}

/// One line of batch output.
#[derive(Serialize)]
pub(crate) struct BatchRow {
    pub(crate) line: usize,
    pub(crate) route: String,
    pub(crate) min_days: i64,
    pub(crate) max_days: i64,
}

impl BatchRow {
    pub(crate) fn new(line: usize, report: &EstimateReport) -> Self {
        Self {
            line,
            route: report.route.to_string(),
            min_days: report.estimate.min_days,
            max_days: report.estimate.max_days,
        }
    }
}

/// Write batch rows in the specified format.
pub(crate) fn write_rows<W: Write>(rows: &[BatchRow], mut writer: W, format: Format) -> Result<()> {
    match format {
        Format::Csv => {
            writeln!(writer, "line,route,min_days,max_days")?;
            for row in rows {
                writeln!(
                    writer,
                    "{},{},{},{}",
                    row.line, row.route, row.min_days, row.max_days
                )?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, rows)?;
            writeln!(writer)?;
        }
        Format::Ndjson => {
            for row in rows {
                serde_json::to_writer(&mut writer, row)?;
                writeln!(writer)?;
            }
        }
    }
    writer.flush()?;
    Ok(())
}

/// Calendar dates of an estimate for an order placed at `order_time`.
pub(crate) fn delivery_dates(
    report: &EstimateReport,
    calendar: &HolidayCalendar,
    order_time: OrderTime,
) -> Option<(NaiveDate, NaiveDate)> {
    if !report.estimate.is_known() {
        return None;
    }
    let working_days = report
        .baseline
        .map_or(WorkingDays::default(), |baseline| baseline.working_days);
    let date = |days: i64| {
        let days = u32::try_from(days).ok()?;
        date_of(calendar.advance_business_days(order_time.day, days, working_days))
    };
    Some((date(report.estimate.min_days)?, date(report.estimate.max_days)?))
}
