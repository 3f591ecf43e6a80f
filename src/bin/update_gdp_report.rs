use std::{error::Error, path::Path, path::PathBuf};

use clap::Parser;
use duckdb::AccessMode;
use gdp_etl::{
    config::EtlConfig,
    error::EtlError,
    etl::run_etl,
    extract::HttpPageSource,
    report::{generate_pivoted_report, write_report_to_file},
    utils::lib_duckdb::open_duckdb,
};
use log::{error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Environment name, e.g., test, prod
    #[arg(short, long, default_value = "prod")]
    env: String,

    /// Override the DUCKDB_PATH environment variable
    #[arg(long)]
    duckdb_path: Option<String>,

    /// Override the REPORT_DIR environment variable
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Only regenerate the report from what is already in the database
    #[arg(long, default_value_t = false)]
    report_only: bool,
}

/// Reload the GDP data and write the pivoted report.  Run it once a year,
/// after the World Bank publishes the new annual figures.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let env_file = format!(".env/{}.env", args.env);
    if dotenvy::from_path(Path::new(&env_file)).is_err() {
        info!("No {} file, using the process environment", env_file);
    }
    let mut config = EtlConfig::from_env()?;
    if let Some(path) = args.duckdb_path {
        config.duckdb_path = path;
    }
    if let Some(dir) = args.report_dir {
        config.report_dir = dir;
    }

    if !args.report_only {
        let source = HttpPageSource::new(config.http_timeout)?;
        let mut conn = open_duckdb(&config.duckdb_path, AccessMode::ReadWrite)?;
        match run_etl(&mut conn, &source, &config.api_url, config.per_page) {
            Ok(summary) => info!(
                "Loaded {} records, {} new countries",
                summary.facts_inserted, summary.countries_inserted
            ),
            Err(e @ EtlError::Extraction { .. }) => {
                error!("{}", e);
                return Err(e.into());
            }
            Err(e) => {
                error!("Load failed, rolled back: {}", e);
                return Err(e.into());
            }
        }
    }

    let conn = open_duckdb(&config.duckdb_path, AccessMode::ReadOnly)?;
    let report = generate_pivoted_report(&conn, &config.report)?;
    let path = write_report_to_file(
        &report,
        &config.report,
        &config.report_dir,
        &config.report_file,
    )?;
    info!("Report written to {}", path.display());

    Ok(())
}
