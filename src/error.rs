use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    /// A page of the indicator API came back with a non-success status.
    #[error("Failed to fetch data from page {page}. Status code: {status}")]
    Extraction { page: u32, status: u16 },

    /// A record references a country that was never loaded into `country`.
    #[error("Country ID not found for ISO3 code: {iso3_code}")]
    MissingReference { iso3_code: String },

    #[error("invalid year in record date: {date:?}")]
    InvalidYear { date: String },

    #[error("invalid configuration for {name}: {reason}")]
    Config { name: String, reason: String },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    DuckDb(#[from] duckdb::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EtlError {
    /// Business-logic failures, as opposed to infrastructure errors bubbling
    /// up from the network, the store or the filesystem.
    pub fn is_data_failure(&self) -> bool {
        matches!(
            self,
            EtlError::Extraction { .. } | EtlError::MissingReference { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let e = EtlError::Extraction {
            page: 3,
            status: 404,
        };
        assert_eq!(
            e.to_string(),
            "Failed to fetch data from page 3. Status code: 404"
        );
        assert!(e.is_data_failure());

        let e = EtlError::MissingReference {
            iso3_code: "USA".to_string(),
        };
        assert_eq!(e.to_string(), "Country ID not found for ISO3 code: USA");
        assert!(e.is_data_failure());

        let e = EtlError::InvalidYear {
            date: "2020Q1".to_string(),
        };
        assert!(!e.is_data_failure());
    }
}
