// Paginated extraction of an indicator from the World Bank API.
// https://datahelpdesk.worldbank.org/knowledgebase/articles/898581-api-basic-call-structures
//
// A successful page is a two element JSON array:
// [ {"page": 1, "pages": 2, "per_page": 50, "total": 60, ...}, [ {record}, ... ] ]

use std::time::Duration;

use log::{debug, info};
use reqwest::Url;
use serde::Deserialize;

use crate::error::EtlError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedId {
    #[serde(default)]
    pub id: String,
    pub value: String,
}

/// One observation of the indicator for a country and a year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IndicatorRecord {
    pub country: NamedId,
    #[serde(rename = "countryiso3code")]
    pub iso3_code: String,
    pub date: String,
    pub value: Option<f64>,
}

impl IndicatorRecord {
    pub fn new(name: &str, iso3_code: &str, date: &str, value: Option<f64>) -> IndicatorRecord {
        IndicatorRecord {
            country: NamedId {
                id: String::new(),
                value: name.to_string(),
            },
            iso3_code: iso3_code.to_string(),
            date: date.to_string(),
            value,
        }
    }

    pub fn country_name(&self) -> &str {
        &self.country.value
    }
}

#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub pages: u32,
}

/// Status code and body of one HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can GET a url.  Lets the extraction run against a fake in tests.
pub trait PageSource {
    fn get(&self, url: &Url) -> Result<RawResponse, EtlError>;
}

pub struct HttpPageSource {
    client: reqwest::blocking::Client,
}

impl HttpPageSource {
    pub fn new(timeout: Duration) -> Result<HttpPageSource, EtlError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(HttpPageSource { client })
    }
}

impl PageSource for HttpPageSource {
    fn get(&self, url: &Url) -> Result<RawResponse, EtlError> {
        let resp = self.client.get(url.clone()).send()?;
        let status = resp.status().as_u16();
        let body = resp.text()?;
        Ok(RawResponse { status, body })
    }
}

/// Append the `page` and `per_page` query parameters to the base url.
pub fn page_url(base_url: &Url, page: u32, per_page: u32) -> Url {
    let mut url = base_url.clone();
    url.query_pairs_mut()
        .append_pair("page", &page.to_string())
        .append_pair("per_page", &per_page.to_string());
    url
}

fn parse_page(body: &str) -> Result<(PageMeta, Vec<IndicatorRecord>), EtlError> {
    // the record list is `null` when the query matches nothing
    let (meta, records): (PageMeta, Option<Vec<IndicatorRecord>>) = serde_json::from_str(body)?;
    Ok((meta, records.unwrap_or_default()))
}

/// Fetch all the pages starting from page 1 and concatenate the records in
/// page order.  Fails on the first non-success status, without returning any
/// of the records fetched so far.
pub fn extract_data(
    source: &impl PageSource,
    base_url: &str,
    per_page: u32,
) -> Result<Vec<IndicatorRecord>, EtlError> {
    let base_url = Url::parse(base_url).map_err(|e| EtlError::Config {
        name: "api url".to_string(),
        reason: e.to_string(),
    })?;
    let mut all_data: Vec<IndicatorRecord> = Vec::new();
    let mut page = 1;
    loop {
        let url = page_url(&base_url, page, per_page);
        debug!("GET {}", url);
        let response = source.get(&url)?;
        if !response.is_success() {
            return Err(EtlError::Extraction {
                page,
                status: response.status,
            });
        }
        let (meta, records) = parse_page(&response.body)?;
        all_data.extend(records);
        if meta.pages <= page {
            break;
        }
        page += 1;
    }
    info!("extracted {} records from {} page(s)", all_data.len(), page);
    Ok(all_data)
}
