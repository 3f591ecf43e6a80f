use std::{env, path::PathBuf, str::FromStr, time::Duration};

use crate::{error::EtlError, report::ReportOptions};

pub const DEFAULT_API_URL: &str = "https://api.worldbank.org/v2/country/ARG;BOL;BRA;CHL;COL;ECU;GUY;PRY;PER;SUR;URY;VEN/indicator/NY.GDP.MKTP.CD?format=json";

#[derive(Debug, Clone, PartialEq)]
pub struct EtlConfig {
    pub api_url: String,
    pub per_page: u32,
    pub http_timeout: Duration,
    pub duckdb_path: String,
    pub report_dir: PathBuf,
    pub report_file: String,
    pub report: ReportOptions,
}

impl EtlConfig {
    /// Read the configuration from the environment variables.  Only
    /// `DUCKDB_PATH` is required.
    pub fn from_env() -> Result<EtlConfig, EtlError> {
        EtlConfig::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<EtlConfig, EtlError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let duckdb_path = lookup("DUCKDB_PATH").ok_or_else(|| EtlError::Config {
            name: "DUCKDB_PATH".to_string(),
            reason: "not set".to_string(),
        })?;
        let years = match lookup("REPORT_YEARS") {
            Some(s) => parse_years(&s)?,
            None => ReportOptions::default().years,
        };
        Ok(EtlConfig {
            api_url: lookup("WB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            per_page: parse_or("WB_PER_PAGE", lookup("WB_PER_PAGE"), 50)?,
            http_timeout: Duration::from_secs(parse_or(
                "HTTP_TIMEOUT_SECS",
                lookup("HTTP_TIMEOUT_SECS"),
                60,
            )?),
            duckdb_path,
            report_dir: PathBuf::from(lookup("REPORT_DIR").unwrap_or_else(|| "reports".to_string())),
            report_file: lookup("REPORT_FILE").unwrap_or_else(|| "pivoted_report.txt".to_string()),
            report: ReportOptions { years },
        })
    }
}

fn parse_or<T: FromStr>(name: &str, value: Option<String>, default: T) -> Result<T, EtlError>
where
    T::Err: std::fmt::Display,
{
    match value {
        None => Ok(default),
        Some(s) => s.trim().parse::<T>().map_err(|e| EtlError::Config {
            name: name.to_string(),
            reason: format!("{:?}: {}", s, e),
        }),
    }
}

/// Parse a comma separated list of years, e.g. "2019,2020,2021".
fn parse_years(s: &str) -> Result<Vec<i32>, EtlError> {
    s.split(',')
        .filter(|e| !e.trim().is_empty())
        .map(|e| parse_or("REPORT_YEARS", Some(e.to_string()), 0))
        .collect()
}
