use crate::domain::report::{
    CustomReportGranularity, CustomReportRequest, ImpressionShareReportRequest,
    MAX_REPORT_NAME_LEN,
};
use crate::utils::error::{AsaError, Result};
use chrono::NaiveDate;
use url::Url;

/// Earliest start date the API accepts for Impression Share reports.
pub const EARLIEST_REPORT_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2020, 4, 12) {
    Some(date) => date,
    None => panic!("invalid earliest report date"),
};

/// Longest report window the API accepts, in days.
pub const MAX_REPORT_WINDOW_DAYS: i64 = 30;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(AsaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AsaError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AsaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(AsaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AsaError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

fn request_error(field: &str, message: impl Into<String>) -> AsaError {
    AsaError::Validation {
        field: field.to_string(),
        message: message.into(),
    }
}

impl Validate for CustomReportRequest {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(request_error("name", "Report name is required"));
        }
        let name_len = self.name.chars().count();
        if name_len > MAX_REPORT_NAME_LEN {
            return Err(request_error(
                "name",
                format!(
                    "Report name is {} characters, maximum is {}",
                    name_len, MAX_REPORT_NAME_LEN
                ),
            ));
        }

        let has_window = self.start_time.is_some() || self.end_time.is_some();
        if self.granularity == Some(CustomReportGranularity::Weekly) && has_window {
            return Err(request_error(
                "granularity",
                "WEEKLY reports can't have startTime/endTime, use dateRange instead",
            ));
        }

        if let Some(start) = self.start_time {
            if start < EARLIEST_REPORT_DATE {
                return Err(request_error(
                    "startTime",
                    format!("Reports can't start before {}", EARLIEST_REPORT_DATE),
                ));
            }
        }

        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start > end {
                return Err(request_error(
                    "startTime",
                    format!("startTime {} is after endTime {}", start, end),
                ));
            }
            let days = (end - start).num_days();
            if days > MAX_REPORT_WINDOW_DAYS {
                return Err(request_error(
                    "endTime",
                    format!(
                        "Report window is {} days, maximum is {}",
                        days, MAX_REPORT_WINDOW_DAYS
                    ),
                ));
            }
        }

        if let Some(selector) = &self.selector {
            for condition in &selector.conditions {
                if condition.values.is_empty() {
                    return Err(request_error(
                        "selector",
                        format!("Condition on '{}' has no values", condition.field),
                    ));
                }
            }
        }

        Ok(())
    }
}

impl Validate for ImpressionShareReportRequest {
    fn validate(&self) -> Result<()> {
        if self.limit == Some(0) {
            return Err(request_error("limit", "Limit must be at least 1"));
        }
        if let Some(field) = &self.field {
            if field.trim().is_empty() {
                return Err(request_error("field", "Field cannot be empty"));
            }
        }
        Ok(())
    }
}
