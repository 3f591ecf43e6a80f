// Pivoted GDP report: one row per country, one column per year, values in
// billions of current US$.

use std::{
    fs,
    path::{Path, PathBuf},
};

use duckdb::Connection;
use log::info;
use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};
use tabled::{builder::Builder, settings::Style};

use crate::{db::gdp::MISSING_VALUE, db::queries::Queries, error::EtlError};

pub const NO_DATA: &str = "No data";

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Years to pivot into columns, in column order.
    pub years: Vec<i32>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            years: (2019..=2023).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub id: i32,
    pub name: String,
    pub iso3_code: String,
    /// One formatted value per report year.
    pub values: Vec<String>,
}

/// Format the largest stored value for a country and year.  Both a missing
/// row and the zero sentinel show as "No data", otherwise the value is
/// shown in billions with two decimals.
pub fn format_value(value: Option<f64>) -> String {
    match value {
        None => NO_DATA.to_string(),
        Some(v) if v == MISSING_VALUE => NO_DATA.to_string(),
        Some(v) => match Decimal::from_f64(v) {
            Some(x) => {
                let mut billions = (x / Decimal::from(1_000_000_000))
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
                billions.rescale(2);
                billions.to_string()
            }
            None => format!("{:.2}", v / 1e9),
        },
    }
}

/// Pivot the `gdp` table by year.  Countries without any gdp rows are
/// included.  Rows are sorted by country id.
pub fn generate_pivoted_report(
    conn: &Connection,
    options: &ReportOptions,
) -> Result<Vec<ReportRow>, EtlError> {
    let query = Queries::select_pivot_report(&options.years);
    let mut stmt = conn.prepare(&query)?;
    let n_years = options.years.len();
    let rows = stmt
        .query_map([], |row| {
            let mut values = Vec::with_capacity(n_years);
            for i in 0..n_years {
                values.push(format_value(row.get::<usize, Option<f64>>(3 + i)?));
            }
            Ok(ReportRow {
                id: row.get(0)?,
                name: row.get(1)?,
                iso3_code: row.get(2)?,
                values,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Make an ASCII table from the report rows.
pub fn ascii_table(data: &[ReportRow], options: &ReportOptions) -> tabled::Table {
    let mut builder = Builder::new();
    let mut header = vec!["ID".to_string(), "Name".to_string(), "ISO3 Code".to_string()];
    header.extend(options.years.iter().map(|y| y.to_string()));
    builder.push_record(header);
    for row in data {
        let mut record = vec![row.id.to_string(), row.name.clone(), row.iso3_code.clone()];
        record.extend(row.values.iter().cloned());
        builder.push_record(record);
    }
    let mut table = builder.build();
    table.with(Style::markdown());
    table
}

/// Write the report to `dir/filename`, creating `dir` if needed.
pub fn write_report_to_file(
    data: &[ReportRow],
    options: &ReportOptions,
    dir: &Path,
    filename: &str,
) -> Result<PathBuf, EtlError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, format!("{}\n", ascii_table(data, options)))?;
    info!("wrote {} report rows to {}", data.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use duckdb::params;
    use std::error::Error;

    use crate::db::schema::create_tables;

    use super::*;

    #[test]
    fn format_values() {
        assert_eq!(format_value(None), "No data");
        assert_eq!(format_value(Some(0.0)), "No data");
        assert_eq!(format_value(Some(631133384439.944)), "631.13");
        assert_eq!(format_value(Some(487902572164.348)), "487.90");
        assert_eq!(format_value(Some(2_005_000_000.0)), "2.01");
        assert_eq!(format_value(Some(1_234_567_890_123.0)), "1234.57");
        assert_eq!(format_value(Some(-1_500_000_000.0)), "-1.50");
    }

    #[test]
    fn report_rows() -> Result<(), Box<dyn Error>> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        conn.execute_batch(
            r#"
INSERT INTO country (name, iso3_code) VALUES ('Argentina', 'ARG'), ('Brazil', 'BRA'), ('Peru', 'PER');
"#,
        )?;
        // insert facts out of country order
        conn.execute(Queries::INSERT_GDP_DATA, params![2, 2022, 631133384439.944])?;
        conn.execute(Queries::INSERT_GDP_DATA, params![1, 2020, 0.0])?;
        conn.execute(Queries::INSERT_GDP_DATA, params![1, 2021, 487902572164.348])?;

        let rows = generate_pivoted_report(&conn, &ReportOptions::default())?;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            rows[0].values,
            vec!["No data", "No data", "487.90", "No data", "No data"]
        );
        assert_eq!(rows[1].name, "Brazil");
        assert_eq!(rows[1].values[3], "631.13");
        // no gdp rows at all
        assert_eq!(rows[2].iso3_code, "PER");
        assert!(rows[2].values.iter().all(|v| v == NO_DATA));
        Ok(())
    }

    #[test]
    fn custom_years() -> Result<(), Box<dyn Error>> {
        let conn = Connection::open_in_memory()?;
        create_tables(&conn)?;
        conn.execute("INSERT INTO country (name, iso3_code) VALUES ('Chile', 'CHL');", [])?;
        conn.execute(Queries::INSERT_GDP_DATA, params![1, 2010, 218537551220.0])?;
        let options = ReportOptions {
            years: vec![2010, 2023],
        };
        let rows = generate_pivoted_report(&conn, &options)?;
        assert_eq!(rows[0].values, vec!["218.54", "No data"]);
        Ok(())
    }

    #[test]
    fn write_file() -> Result<(), Box<dyn Error>> {
        let dir = tempfile::tempdir()?;
        let rows = vec![ReportRow {
            id: 1,
            name: "Brazil".to_string(),
            iso3_code: "BRA".to_string(),
            values: vec![
                "No data".to_string(),
                "No data".to_string(),
                "No data".to_string(),
                "631.13".to_string(),
                "No data".to_string(),
            ],
        }];
        let path = write_report_to_file(
            &rows,
            &ReportOptions::default(),
            &dir.path().join("reports"),
            "pivoted_report.txt",
        )?;
        let content = fs::read_to_string(path)?;
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("ISO3 Code"));
        assert!(lines[0].contains("2023"));
        assert!(lines[2].contains("Brazil"));
        assert!(lines[2].contains("631.13"));
        Ok(())
    }
}
