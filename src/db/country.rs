use std::collections::BTreeSet;

use duckdb::{params, Connection};
use log::info;

use crate::{db::queries::Queries, extract::IndicatorRecord};

/// Distinct (name, ISO3 code) pairs present in the records.
pub fn distinct_countries(data: &[IndicatorRecord]) -> BTreeSet<(String, String)> {
    data.iter()
        .map(|e| (e.country_name().to_string(), e.iso3_code.clone()))
        .collect()
}

/// Insert the countries found in the records.  A country whose name or ISO3
/// code is already in the table is skipped.  Returns the number of rows
/// actually inserted.
pub fn preload_country_data(
    conn: &Connection,
    data: &[IndicatorRecord],
) -> Result<usize, duckdb::Error> {
    let countries = distinct_countries(data);
    let mut stmt = conn.prepare(Queries::INSERT_COUNTRY_DATA)?;
    let mut n = 0;
    for (name, iso3_code) in &countries {
        n += stmt.execute(params![name, iso3_code])?;
    }
    info!(
        "inserted {} new countries out of {} in the data",
        n,
        countries.len()
    );
    Ok(n)
}
