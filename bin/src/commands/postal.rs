//! Postal command implementation.

use anyhow::Result;
use transit_lib::{CountryId, PostalCode, Truncatable};

/// Show how a raw postal code normalizes for each lookup.
pub(crate) fn postal(country: &str, code: &str) -> Result<()> {
    let country: CountryId = country.parse()?;

    println!("Country: {country} ({:?})", country.postal_radix());
    match PostalCode::origin(Some(code), country) {
        Some(origin) => println!("Origin (history): {} ({origin})", origin.value()),
        None => println!("Origin (history): missing"),
    }

    let big = PostalCode::big_origin(Some(code), country);
    println!("Origin (cascade): {} ({big})", big.value());

    let prefixes: Vec<String> = big
        .prefixes()
        .map(|prefix| prefix.value().to_string())
        .collect();
    println!("Prefix chain:     {}", prefixes.join(" -> "));

    Ok(())
}
