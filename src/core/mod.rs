pub mod client;
pub mod csv_report;
pub mod reports;

pub use crate::domain::ports::{ConfigProvider, ImpressionShareReports};
pub use crate::utils::error::Result;
