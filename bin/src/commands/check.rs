//! Check command implementation.

use anyhow::Result;
use std::path::Path;

/// Load every configured table and print their sizes.
pub(crate) fn check(config: &Path) -> Result<()> {
    let engine = super::load_engine(config)?;
    let sizes = engine.tables().sizes();

    println!("{:<20} {:>10}", "TABLE", "ROWS");
    println!("{}", "-".repeat(31));
    for (name, rows) in [
        ("service_info", sizes.service_info),
        ("country_pairs", sizes.country_pairs),
        ("cascade_services", sizes.cascade_services),
        ("zip_pairs", sizes.zip_pairs),
        ("range_members", sizes.range_members),
        ("range_estimates", sizes.range_estimates),
        ("origin_zips", sizes.origin_zips),
        ("exclusions", sizes.exclusions),
        ("base_services", sizes.base_services),
    ] {
        println!("{name:<20} {rows:>10}");
    }
    if sizes.skipped_rows > 0 {
        println!("{:<20} {:>10}", "(skipped)", sizes.skipped_rows);
    }

    let mut countries: Vec<_> = engine.calendars().countries().collect();
    countries.sort_unstable();
    println!("\nHoliday calendars: {}", countries.len());
    for country in countries {
        if let Some(calendar) = engine.calendars().get(country) {
            println!("  country {country:<6} {} holidays", calendar.holiday_count());
        }
    }

    match engine.analytical() {
        Some(stage) => {
            let estimator = &stage.estimator;
            println!("\nAnalytical model: country {}", stage.country);
            println!(
                "  default:    {} thresholds, {} history rows",
                estimator.default_model().thresholds.thresholds().len(),
                estimator.default_model().history.total_len()
            );
            if let Some(model) = estimator.experiment_model() {
                println!(
                    "  experiment: {} thresholds, {} history rows",
                    model.thresholds.thresholds().len(),
                    model.history.total_len()
                );
            }
            println!("  opt-outs:   {}", stage.opt_outs.len());
        }
        None => println!("\nAnalytical model: disabled"),
    }

    Ok(())
}
