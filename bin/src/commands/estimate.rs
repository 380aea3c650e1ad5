//! Estimate command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use transit_lib::HolidayCalendar;
use transit_lib::prelude::*;

use crate::display::delivery_dates;

/// Estimate delivery days for the request stored in `request_path`.
pub(crate) fn estimate(config: &Path, request_path: &Path) -> Result<()> {
    let engine = super::load_engine(config)?;
    let text = std::fs::read_to_string(request_path)
        .with_context(|| format!("Failed to read request: {}", request_path.display()))?;
    let request: EstimateRequest = serde_json::from_str(&text)
        .with_context(|| format!("Invalid request: {}", request_path.display()))?;

    let report = engine.estimate_report(&request);

    println!("Route:    {}", report.route);
    match report.baseline {
        Some(baseline) => println!(
            "Baseline: {} (service {})",
            baseline.estimate, baseline.service
        ),
        None => println!("Baseline: none"),
    }
    if let Some(outcome) = report.analytical {
        match outcome.score {
            Some(score) => println!("Score:    {score:.4}"),
            None => println!("Score:    QA lookup"),
        }
    }
    println!("Estimate: {}", report.estimate);

    if let Some(order_time) = request.order_time {
        let calendar = engine
            .calendars()
            .get(request.origin_country)
            .cloned()
            .unwrap_or_else(|| HolidayCalendar::anchored_at(order_time.day));
        if let Some((first, last)) = delivery_dates(&report, &calendar, order_time) {
            println!(
                "Delivery: {} - {}",
                first.format("%Y-%m-%d"),
                last.format("%Y-%m-%d")
            );
        }
    }

    Ok(())
}
