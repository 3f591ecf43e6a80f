//! All the SQL used against the GDP database.

use itertools::Itertools;

pub struct Queries {}

impl Queries {
    pub const CREATE_COUNTRY_TABLE: &'static str = r#"
CREATE SEQUENCE IF NOT EXISTS country_id_seq START 1;
CREATE TABLE IF NOT EXISTS country (
    id INTEGER PRIMARY KEY DEFAULT nextval('country_id_seq'),
    name VARCHAR UNIQUE,
    iso3_code VARCHAR UNIQUE
);
"#;

    pub const CREATE_GDP_TABLE: &'static str = r#"
CREATE SEQUENCE IF NOT EXISTS gdp_id_seq START 1;
CREATE TABLE IF NOT EXISTS gdp (
    id INTEGER PRIMARY KEY DEFAULT nextval('gdp_id_seq'),
    country_id INTEGER NOT NULL,
    year INTEGER NOT NULL,
    value DOUBLE NOT NULL,
    FOREIGN KEY (country_id) REFERENCES country(id)
);
"#;

    pub const DROP_GDP_TABLE: &'static str = r#"
DROP TABLE IF EXISTS gdp;
DROP SEQUENCE IF EXISTS gdp_id_seq;
"#;

    pub const INSERT_COUNTRY_DATA: &'static str =
        "INSERT INTO country (name, iso3_code) VALUES (?, ?) ON CONFLICT DO NOTHING;";

    pub const SELECT_COUNTRY_IDS: &'static str = "SELECT id, iso3_code FROM country;";

    pub const INSERT_GDP_DATA: &'static str =
        "INSERT INTO gdp (country_id, year, value) VALUES (?, ?, ?);";

    /// One column per year with the largest value stored for that country and
    /// year, `NULL` if there is no row.  Columns are named after the year.
    pub fn select_pivot_report(years: &[i32]) -> String {
        let columns = years
            .iter()
            .map(|year| format!("    MAX(CASE WHEN g.year = {year} THEN g.value END) AS \"{year}\""))
            .join(",\n");
        let sep = if years.is_empty() { "" } else { "," };
        format!(
            r#"
SELECT
    c.id,
    c.name,
    c.iso3_code{sep}
{columns}
FROM country c
LEFT JOIN gdp g ON c.id = g.country_id
GROUP BY c.id, c.name, c.iso3_code
ORDER BY c.id;
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pivot_query_has_one_column_per_year() {
        let sql = Queries::select_pivot_report(&[2019, 2020]);
        assert!(sql.contains(r#"MAX(CASE WHEN g.year = 2019 THEN g.value END) AS "2019","#));
        assert!(sql.contains(r#"MAX(CASE WHEN g.year = 2020 THEN g.value END) AS "2020""#));
        assert!(sql.contains("ORDER BY c.id"));
    }

    #[test]
    fn pivot_query_without_years() {
        let sql = Queries::select_pivot_report(&[]);
        assert!(!sql.contains("MAX("));
        assert!(sql.contains("c.iso3_code\n"));
    }
}
