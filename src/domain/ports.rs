use crate::domain::report::{
    CustomReportRequest, DailyImpressionShareReport, ImpressionShareReport,
    ImpressionShareReportRequest, ImpressionShareReportResponse, ImpressionShareReportsResponse,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Connection settings for the Search Ads API.
pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn access_token(&self) -> &str;
    fn org_id(&self) -> i64;
    fn timeout(&self) -> Duration;
    fn user_agent(&self) -> &str;
}

/// Impression Share report endpoints.
///
/// Every call is a single request/response round trip. Dropping the returned
/// future aborts the request in flight.
#[async_trait]
pub trait ImpressionShareReports: Send + Sync {
    async fn create_report(
        &self,
        request: &CustomReportRequest,
    ) -> Result<ImpressionShareReportResponse>;

    async fn list_reports(
        &self,
        params: &ImpressionShareReportRequest,
    ) -> Result<ImpressionShareReportsResponse>;

    async fn get_report(&self, report_id: i64) -> Result<ImpressionShareReportResponse>;

    async fn download_report(
        &self,
        report: &ImpressionShareReport,
    ) -> Result<DailyImpressionShareReport>;
}
