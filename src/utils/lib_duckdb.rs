use std::path::Path;

use duckdb::{AccessMode, Config, Connection};

use crate::error::EtlError;

/// Open the DuckDB database file, creating its parent directory if needed.
/// Use `AccessMode::ReadOnly` when only reading the report.
pub fn open_duckdb(duckdb_path: &str, access_mode: AccessMode) -> Result<Connection, EtlError> {
    if let Some(dir) = Path::new(duckdb_path).parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let config = Config::default().access_mode(access_mode)?;
    Ok(Connection::open_with_flags(duckdb_path, config)?)
}
