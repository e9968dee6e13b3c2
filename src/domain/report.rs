use crate::domain::selector::{Selector, SortOrder};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Maximum length of a report name accepted by the API.
pub const MAX_REPORT_NAME_LEN: usize = 50;

/// Report state once the CSV can be downloaded.
pub const STATE_COMPLETED: &str = "COMPLETED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomReportDateRange {
    #[serde(rename = "LAST_WEEK")]
    LastWeek,
    #[serde(rename = "LAST_2_WEEKS")]
    Last2Weeks,
    #[serde(rename = "LAST_4_WEEKS")]
    Last4Weeks,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomReportGranularity {
    Daily,
    Weekly,
}

/// Body of an Impression Share report creation request.
///
/// Absent optionals are left out of the JSON and the API applies its defaults
/// (`LAST_WEEK`, `DAILY`). `WEEKLY` reports can't carry `startTime`/`endTime`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomReportRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<CustomReportDateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granularity: Option<CustomReportGranularity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<Selector>,
}

impl CustomReportRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date_range: None,
            granularity: None,
            start_time: None,
            end_time: None,
            selector: None,
        }
    }

    pub fn with_date_range(mut self, date_range: CustomReportDateRange) -> Self {
        self.date_range = Some(date_range);
        self
    }

    pub fn with_granularity(mut self, granularity: CustomReportGranularity) -> Self {
        self.granularity = Some(granularity);
        self
    }

    pub fn with_window(mut self, start_time: NaiveDate, end_time: NaiveDate) -> Self {
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self
    }

    pub fn with_selector(mut self, selector: Selector) -> Self {
        self.selector = Some(selector);
        self
    }
}

/// Query parameters for listing reports. Pagination is passed through as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpressionShareReportRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,
}

/// Report metadata as returned by the create, list and get endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImpressionShareReport {
    pub id: i64,
    pub name: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub granularity: Option<String>,
    pub download_uri: Option<String>,
    pub dimensions: Vec<String>,
    pub metrics: Vec<String>,
    pub state: String,
    pub creation_time: Option<String>,
    pub modification_time: Option<String>,
    pub date_range: Option<String>,
}

impl ImpressionShareReport {
    /// The download URI, if the API has published a non-empty one.
    pub fn download_uri(&self) -> Option<&str> {
        self.download_uri.as_deref().filter(|uri| !uri.trim().is_empty())
    }

    pub fn is_ready(&self) -> bool {
        self.state == STATE_COMPLETED && self.download_uri().is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageDetail {
    pub total_results: u64,
    pub start_index: u64,
    pub items_per_page: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponseBody {
    #[serde(default)]
    pub errors: Vec<ErrorResponseItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponseItem {
    #[serde(default)]
    pub message_code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Envelope carrying at most one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpressionShareReportResponse {
    #[serde(default)]
    pub data: Option<ImpressionShareReport>,
    #[serde(default)]
    pub pagination: Option<PageDetail>,
    #[serde(default)]
    pub error: Option<ErrorResponseBody>,
}

/// Envelope carrying a page of reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpressionShareReportsResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<ImpressionShareReport>,
    #[serde(default)]
    pub pagination: Option<PageDetail>,
    #[serde(default)]
    pub error: Option<ErrorResponseBody>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<ImpressionShareReport>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<ImpressionShareReport>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Envelopes that may report an API error alongside a success status.
pub trait ApiEnvelope {
    fn api_error(&self) -> Option<&ErrorResponseBody>;
}

impl ApiEnvelope for ImpressionShareReportResponse {
    fn api_error(&self) -> Option<&ErrorResponseBody> {
        self.error.as_ref()
    }
}

impl ApiEnvelope for ImpressionShareReportsResponse {
    fn api_error(&self) -> Option<&ErrorResponseBody> {
        self.error.as_ref()
    }
}

/// One row of a downloaded daily Impression Share report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyImpressionShareReportRecord {
    pub date: NaiveDate,
    pub app_name: String,
    pub adam_id: i64,
    pub country_or_region: String,
    pub search_term: String,
    pub low_impression_share: f64,
    pub high_impression_share: f64,
    pub rank: String,
    pub search_popularity: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyImpressionShareReport {
    pub records: Vec<DailyImpressionShareReportRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_omits_absent_fields() {
        let request = CustomReportRequest::new("weekly share")
            .with_granularity(CustomReportGranularity::Weekly)
            .with_date_range(CustomReportDateRange::Last2Weeks);

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "weekly share",
                "dateRange": "LAST_2_WEEKS",
                "granularity": "WEEKLY"
            })
        );
    }

    #[test]
    fn test_create_request_dates_use_iso_format() {
        let request = CustomReportRequest::new("june").with_window(
            NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2022, 6, 30).unwrap(),
        );

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startTime"], "2022-06-01");
        assert_eq!(json["endTime"], "2022-06-30");
        assert!(json.get("selector").is_none());
    }

    #[test]
    fn test_report_response_parsing() {
        let body = r#"{
            "data": {
                "id": 12345,
                "name": "share",
                "startTime": "2022-06-01",
                "endTime": "2022-06-07",
                "granularity": "DAILY",
                "downloadUri": "https://example.com/report.csv",
                "dimensions": ["adamId", "searchTerm"],
                "metrics": ["lowImpressionShare", "highImpressionShare"],
                "state": "COMPLETED",
                "creationTime": "2022-06-08T10:00:00.000",
                "modificationTime": "2022-06-08T10:05:00.000",
                "dateRange": "CUSTOM"
            },
            "pagination": null,
            "error": null
        }"#;

        let response: ImpressionShareReportResponse = serde_json::from_str(body).unwrap();
        let report = response.data.unwrap();
        assert_eq!(report.id, 12345);
        assert_eq!(report.dimensions.len(), 2);
        assert!(report.is_ready());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_report_not_ready_without_uri() {
        let report = ImpressionShareReport {
            id: 1,
            state: "COMPLETED".to_string(),
            download_uri: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(!report.is_ready());
        assert!(report.download_uri().is_none());

        let report = ImpressionShareReport {
            state: "QUEUED".to_string(),
            download_uri: Some("https://example.com/r.csv".to_string()),
            ..report
        };
        assert!(!report.is_ready());
    }

    #[test]
    fn test_reports_response_null_data() {
        let body = r#"{"data": null, "pagination": {"totalResults": 0, "startIndex": 0, "itemsPerPage": 0}, "error": null}"#;
        let response: ImpressionShareReportsResponse = serde_json::from_str(body).unwrap();
        assert!(response.data.is_empty());
        assert_eq!(response.pagination.unwrap().total_results, 0);
    }

    #[test]
    fn test_listing_query_serialization() {
        let request = ImpressionShareReportRequest {
            limit: Some(20),
            sort_order: Some(SortOrder::Ascending),
            ..Default::default()
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({"limit": 20, "sortOrder": "ASCENDING"}));
    }
}
