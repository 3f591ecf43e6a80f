use duckdb::Connection;
use log::info;

use crate::{
    db::{
        country::preload_country_data,
        gdp::load_data,
        schema::{create_tables, reset_gdp_table},
    },
    error::EtlError,
    extract::{extract_data, PageSource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EtlSummary {
    pub records: usize,
    pub countries_inserted: usize,
    pub facts_inserted: usize,
}

/// Extract the indicator and reload it into the database.
///
/// Nothing is written if the extraction fails.  The gdp table is dropped
/// before the load transaction starts, so if loading fails the countries
/// added by this run are rolled back and the gdp table is left absent.
pub fn run_etl(
    conn: &mut Connection,
    source: &impl PageSource,
    api_url: &str,
    per_page: u32,
) -> Result<EtlSummary, EtlError> {
    let data = extract_data(source, api_url, per_page)?;

    reset_gdp_table(conn)?;
    let tx = conn.transaction()?;
    create_tables(&tx)?;
    let countries_inserted = preload_country_data(&tx, &data)?;
    let facts_inserted = load_data(&tx, &data)?;
    tx.commit()?;

    let summary = EtlSummary {
        records: data.len(),
        countries_inserted,
        facts_inserted,
    };
    info!("{:?}", summary);
    Ok(summary)
}
