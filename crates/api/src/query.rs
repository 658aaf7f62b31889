//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Query parameters for `GET /group` (`?keyword=&page=&per_page=`).
///
/// `page`/`per_page` are part of the contract but this listing deliberately
/// returns the full set; see DESIGN.md.
#[derive(Debug, Deserialize)]
pub struct GroupListParams {
    pub keyword: Option<String>,
    #[allow(dead_code)]
    pub page: Option<i64>,
    #[allow(dead_code)]
    pub per_page: Option<i64>,
}

/// Optional strict date window (`?startDate=&endDate=`), validated against
/// `YYYY-MM-DD HH:MM:SS` before use.
#[derive(Debug, Deserialize)]
pub struct DateWindowParams {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
}

/// Query parameters for the settlement report
/// (`?startDate=&endDate=&page=&per_page=`).
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
