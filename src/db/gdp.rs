use std::collections::HashMap;

use duckdb::{params, Connection};
use log::{debug, info};

use crate::{db::queries::Queries, error::EtlError, extract::IndicatorRecord};

/// Value stored when the API has no observation for the country and year.
pub const MISSING_VALUE: f64 = 0.0;

/// Map of ISO3 code to the country id, for all rows in the `country` table.
pub fn country_mapping(conn: &Connection) -> Result<HashMap<String, i32>, duckdb::Error> {
    let mut stmt = conn.prepare(Queries::SELECT_COUNTRY_IDS)?;
    let mapping = stmt
        .query_map([], |row| {
            Ok((row.get::<usize, String>(1)?, row.get::<usize, i32>(0)?))
        })?
        .collect::<Result<HashMap<_, _>, _>>()?;
    Ok(mapping)
}

/// Parse the record year, e.g. "2022".
pub fn parse_year(date: &str) -> Result<i32, EtlError> {
    date.trim().parse::<i32>().map_err(|_| EtlError::InvalidYear {
        date: date.to_string(),
    })
}

/// A null (or zero) observation is stored as [MISSING_VALUE].
pub fn observed_value(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v != 0.0 => v,
        _ => MISSING_VALUE,
    }
}

/// Insert one `gdp` row per record, in record order.  Country ids are resolved
/// by ISO3 code against the `country` table, so the countries need to be
/// loaded first.  Stops at the first record with an unknown ISO3 code.
///
/// Returns the number of rows inserted.
pub fn load_data(conn: &Connection, data: &[IndicatorRecord]) -> Result<usize, EtlError> {
    let mapping = country_mapping(conn)?;
    debug!("resolving against {} countries", mapping.len());

    let mut stmt = conn.prepare(Queries::INSERT_GDP_DATA)?;
    let mut n = 0;
    for entry in data {
        let country_id = match mapping.get(&entry.iso3_code) {
            Some(id) => *id,
            None => {
                return Err(EtlError::MissingReference {
                    iso3_code: entry.iso3_code.clone(),
                })
            }
        };
        let year = parse_year(&entry.date)?;
        let value = observed_value(entry.value);
        n += stmt.execute(params![country_id, year, value])?;
    }
    info!("inserted {} rows into gdp table", n);
    Ok(n)
}
