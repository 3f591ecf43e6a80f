use duckdb::Connection;
use log::debug;

use crate::db::queries::Queries;

/// Drop the fact table (and its id sequence) so the next load starts empty.
/// The `country` table is kept and accumulates across runs.
pub fn reset_gdp_table(conn: &Connection) -> Result<(), duckdb::Error> {
    conn.execute_batch(Queries::DROP_GDP_TABLE)?;
    debug!("dropped gdp table");
    Ok(())
}

/// Create the `country` and `gdp` tables if they don't exist.
pub fn create_tables(conn: &Connection) -> Result<(), duckdb::Error> {
    conn.execute_batch(Queries::CREATE_COUNTRY_TABLE)?;
    conn.execute_batch(Queries::CREATE_GDP_TABLE)?;
    debug!("country and gdp tables are in place");
    Ok(())
}
