#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::{AsaError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Connection settings for one organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub base_url: String,
    pub access_token: String,
    pub org_id: i64,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            access_token: String::new(),
            org_id: 0,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: concat!("asa-reports/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ApiSettings {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>, org_id: i64) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
            org_id,
            ..Default::default()
        }
    }
}

impl ConfigProvider for ApiSettings {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn access_token(&self) -> &str {
        &self.access_token
    }

    fn org_id(&self) -> i64 {
        self.org_id
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Validate for ApiSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.base_url)?;

        if self.access_token.trim().is_empty() {
            return Err(AsaError::MissingConfig {
                field: "api.access_token".to_string(),
            });
        }
        if self.org_id <= 0 {
            return Err(AsaError::MissingConfig {
                field: "api.org_id".to_string(),
            });
        }

        validation::validate_positive_number("api.timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("api.user_agent", &self.user_agent)?;
        Ok(())
    }
}
