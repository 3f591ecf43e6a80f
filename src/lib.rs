//! Load the World Bank GDP indicator for a set of countries into DuckDB and
//! produce a report pivoted by year.

pub mod config;
pub mod db;
pub mod error;
pub mod etl;
pub mod extract;
pub mod report;
pub mod utils;
