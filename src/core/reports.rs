use crate::core::client::ApiClient;
use crate::core::csv_report::parse_daily_report;
use crate::core::ImpressionShareReports;
use crate::domain::report::{
    CustomReportRequest, DailyImpressionShareReport, ImpressionShareReport,
    ImpressionShareReportRequest, ImpressionShareReportResponse, ImpressionShareReportsResponse,
};
use crate::utils::error::{AsaError, Result};
use crate::utils::validation::Validate;
use async_trait::async_trait;

const CUSTOM_REPORTS_PATH: &str = "custom-reports";

/// Impression Share reports over the custom-reports endpoints.
///
/// Documented API limits, not enforced here: 10 report creations per 24 hours,
/// 150 listing calls and 30 detail calls per 15 minutes.
#[derive(Debug, Clone)]
pub struct ImpressionShareReportService {
    client: ApiClient,
}

impl ImpressionShareReportService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches a report by id, then downloads it if it's ready.
    pub async fn download_report_by_id(&self, report_id: i64) -> Result<DailyImpressionShareReport> {
        let response = self.get_report(report_id).await?;
        let report = response.data.ok_or_else(|| AsaError::EmptyResponse {
            context: format!("report {}", report_id),
        })?;
        self.download_report(&report).await
    }
}

#[async_trait]
impl ImpressionShareReports for ImpressionShareReportService {
    async fn create_report(
        &self,
        request: &CustomReportRequest,
    ) -> Result<ImpressionShareReportResponse> {
        request.validate()?;
        tracing::info!("📝 Creating impression share report '{}'", request.name);

        let response: ImpressionShareReportResponse =
            self.client.post_json(CUSTOM_REPORTS_PATH, request).await?;
        if let Some(report) = &response.data {
            tracing::info!("📝 Report {} created (state: {})", report.id, report.state);
        }
        Ok(response)
    }

    async fn list_reports(
        &self,
        params: &ImpressionShareReportRequest,
    ) -> Result<ImpressionShareReportsResponse> {
        params.validate()?;

        let response: ImpressionShareReportsResponse = self
            .client
            .get_json(CUSTOM_REPORTS_PATH, Some(params))
            .await?;
        tracing::debug!("Listed {} reports", response.data.len());
        Ok(response)
    }

    async fn get_report(&self, report_id: i64) -> Result<ImpressionShareReportResponse> {
        let path = format!("{}/{}", CUSTOM_REPORTS_PATH, report_id);
        self.client.get_json::<(), _>(&path, None).await
    }

    async fn download_report(
        &self,
        report: &ImpressionShareReport,
    ) -> Result<DailyImpressionShareReport> {
        let uri = report.download_uri().ok_or_else(|| AsaError::ReportNotReady {
            id: report.id,
            state: report.state.clone(),
        })?;

        tracing::info!("📥 Downloading report {}", report.id);
        let data = self.client.get_bytes(uri).await?;
        let parsed = parse_daily_report(&data)?;
        tracing::info!("📥 Report {}: {} records", report.id, parsed.records.len());
        Ok(parsed)
    }
}
