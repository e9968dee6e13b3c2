pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::config::{toml_config::AsaConfig, ApiSettings};
pub use crate::core::{client::ApiClient, reports::ImpressionShareReportService, ImpressionShareReports};
pub use domain::money::{cents_or_zero, Cents, Money};
pub use utils::error::{AsaError, Result};
