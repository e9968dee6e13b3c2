use crate::config::toml_config::{AsaConfig, OutputFormat};
use crate::config::ApiSettings;
use crate::domain::report::{
    CustomReportDateRange, CustomReportGranularity, CustomReportRequest,
    ImpressionShareReportRequest,
};
use crate::domain::money::{Cents, Money};
use crate::domain::selector::{ConditionOperator, Selector, SortOrder};
use crate::utils::error::{AsaError, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "asa-reports")]
#[command(about = "Apple Search Ads Impression Share report client")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[arg(long, global = true)]
    pub org_id: Option<i64>,

    #[arg(long, global = true, env = "ASA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create an Impression Share report
    Create(CreateArgs),
    /// List Impression Share reports
    List(ListArgs),
    /// Show a single report
    Get { id: i64 },
    /// Download and parse a completed report
    Download(DownloadArgs),
    /// Offline money helpers
    #[command(subcommand)]
    Money(MoneyCommand),
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long, value_enum)]
    pub date_range: Option<DateRangeArg>,

    #[arg(long, value_enum)]
    pub granularity: Option<GranularityArg>,

    #[arg(long, help = "Start date, YYYY-MM-DD")]
    pub start: Option<NaiveDate>,

    #[arg(long, help = "End date, YYYY-MM-DD")]
    pub end: Option<NaiveDate>,

    #[arg(long = "country", help = "Alpha-2 country or region code, repeatable")]
    pub countries: Vec<String>,

    #[arg(long = "adam-id", help = "App Store app id, repeatable")]
    pub adam_ids: Vec<i64>,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub field: Option<String>,

    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long)]
    pub offset: Option<u32>,

    #[arg(long, value_enum)]
    pub sort_order: Option<SortOrderArg>,
}

#[derive(Debug, Clone, Args)]
pub struct DownloadArgs {
    pub id: i64,

    #[arg(long, help = "Write to this file instead of stdout")]
    pub output: Option<String>,

    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum MoneyCommand {
    /// Print an amount in cents
    Cents { amount: String },
    /// Multiply an amount by a factor
    Scale {
        amount: String,
        currency: String,
        #[arg(allow_negative_numbers = true)]
        factor: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DateRangeArg {
    #[value(name = "last-week")]
    LastWeek,
    #[value(name = "last-2-weeks")]
    Last2Weeks,
    #[value(name = "last-4-weeks")]
    Last4Weeks,
}

impl From<DateRangeArg> for CustomReportDateRange {
    fn from(value: DateRangeArg) -> Self {
        match value {
            DateRangeArg::LastWeek => CustomReportDateRange::LastWeek,
            DateRangeArg::Last2Weeks => CustomReportDateRange::Last2Weeks,
            DateRangeArg::Last4Weeks => CustomReportDateRange::Last4Weeks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GranularityArg {
    Daily,
    Weekly,
}

impl From<GranularityArg> for CustomReportGranularity {
    fn from(value: GranularityArg) -> Self {
        match value {
            GranularityArg::Daily => CustomReportGranularity::Daily,
            GranularityArg::Weekly => CustomReportGranularity::Weekly,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortOrderArg {
    Ascending,
    Descending,
}

impl From<SortOrderArg> for SortOrder {
    fn from(value: SortOrderArg) -> Self {
        match value {
            SortOrderArg::Ascending => SortOrder::Ascending,
            SortOrderArg::Descending => SortOrder::Descending,
        }
    }
}

impl CliConfig {
    /// Loads the config file, if any, then applies command line overrides.
    pub fn load(&self) -> Result<AsaConfig> {
        let mut config = match &self.config {
            Some(path) => AsaConfig::from_file(path)?,
            None => AsaConfig::default(),
        };
        self.apply_overrides(&mut config.api);
        Ok(config)
    }

    fn apply_overrides(&self, api: &mut ApiSettings) {
        if let Some(base_url) = &self.base_url {
            api.base_url = base_url.clone();
        }
        if let Some(org_id) = self.org_id {
            api.org_id = org_id;
        }
        if let Some(token) = &self.access_token {
            api.access_token = token.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            api.timeout_seconds = timeout;
        }
    }
}

impl MoneyCommand {
    /// Runs an offline money helper and returns the line to print.
    ///
    /// Input goes through the strict parser, never the zero fallback.
    pub fn execute(&self) -> Result<String> {
        match self {
            MoneyCommand::Cents { amount } => {
                let cents: Cents = amount.parse()?;
                Ok(cents.value().to_string())
            }
            MoneyCommand::Scale {
                amount,
                currency,
                factor,
            } => {
                let money = Money::new(amount.as_str(), currency.as_str());
                money.try_amount_cents()?;
                if !factor.is_finite() {
                    return Err(AsaError::Validation {
                        field: "factor".to_string(),
                        message: format!("Factor must be a finite number, got {}", factor),
                    });
                }
                Ok(money.scale(*factor).to_string())
            }
        }
    }
}

impl CreateArgs {
    pub fn to_request(&self) -> CustomReportRequest {
        let mut request = CustomReportRequest::new(self.name.clone());
        request.date_range = self.date_range.map(Into::into);
        request.granularity = self.granularity.map(Into::into);
        request.start_time = self.start;
        request.end_time = self.end;

        let mut selector = Selector::default();
        if !self.countries.is_empty() {
            selector = Selector::countries_or_regions(self.countries.iter().cloned());
        }
        if !self.adam_ids.is_empty() {
            selector = selector.with_condition(
                "adamId",
                ConditionOperator::In,
                self.adam_ids.iter().map(|id| id.to_string()),
            );
        }
        if !selector.is_empty() {
            request.selector = Some(selector);
        }
        request
    }
}

impl ListArgs {
    pub fn to_request(&self) -> ImpressionShareReportRequest {
        ImpressionShareReportRequest {
            field: self.field.clone(),
            limit: self.limit,
            offset: self.offset,
            sort_order: self.sort_order.map(Into::into),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_command_builds_request() {
        let cli = CliConfig::parse_from([
            "asa-reports",
            "--org-id",
            "42",
            "create",
            "--name",
            "june",
            "--granularity",
            "daily",
            "--start",
            "2022-06-01",
            "--end",
            "2022-06-30",
            "--country",
            "US",
            "--country",
            "GB",
            "--adam-id",
            "123",
        ]);
        assert_eq!(cli.org_id, Some(42));

        let Command::Create(args) = &cli.command else {
            panic!("expected create command");
        };
        let request = args.to_request();
        assert_eq!(request.granularity, Some(CustomReportGranularity::Daily));
        assert_eq!(request.start_time, NaiveDate::from_ymd_opt(2022, 6, 1));

        let selector = request.selector.unwrap();
        assert_eq!(selector.conditions.len(), 2);
        assert_eq!(selector.conditions[0].values, vec!["US", "GB"]);
        assert_eq!(selector.conditions[1].values, vec!["123"]);
    }

    #[test]
    fn test_create_without_filters_has_no_selector() {
        let cli = CliConfig::parse_from([
            "asa-reports",
            "create",
            "--name",
            "weekly",
            "--date-range",
            "last-2-weeks",
        ]);
        let Command::Create(args) = &cli.command else {
            panic!("expected create command");
        };
        let request = args.to_request();
        assert_eq!(request.date_range, Some(CustomReportDateRange::Last2Weeks));
        assert!(request.selector.is_none());
    }

    #[test]
    fn test_overrides_win_over_file_defaults() {
        let cli = CliConfig::parse_from([
            "asa-reports",
            "--base-url",
            "http://localhost:9000/api/v4",
            "--access-token",
            "tok",
            "--org-id",
            "5",
            "get",
            "17",
        ]);
        let config = cli.load().unwrap();
        assert_eq!(config.api.base_url, "http://localhost:9000/api/v4");
        assert_eq!(config.api.access_token, "tok");
        assert_eq!(config.api.org_id, 5);
        assert!(matches!(cli.command, Command::Get { id: 17 }));
    }

    #[test]
    fn test_money_scale_accepts_negative_factor() {
        let cli = CliConfig::parse_from(["asa-reports", "money", "scale", "1.00", "USD", "-0.5"]);
        match cli.command {
            Command::Money(MoneyCommand::Scale { factor, .. }) => assert_eq!(factor, -0.5),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_money_commands_run_without_api_config() {
        let cli = CliConfig::parse_from(["asa-reports", "money", "cents", "100.1"]);
        let Command::Money(command) = &cli.command else {
            panic!("expected money command");
        };
        assert_eq!(command.execute().unwrap(), "10010");

        let cli = CliConfig::parse_from(["asa-reports", "money", "scale", "19.99", "CHF", "1.5"]);
        let Command::Money(command) = &cli.command else {
            panic!("expected money command");
        };
        assert_eq!(command.execute().unwrap(), "29.98 CHF");
    }

    #[test]
    fn test_money_commands_reject_bad_input() {
        let cents = MoneyCommand::Cents {
            amount: "12,34".to_string(),
        };
        assert!(matches!(cents.execute(), Err(AsaError::InvalidAmount { .. })));

        let scale = MoneyCommand::Scale {
            amount: "1.00".to_string(),
            currency: "USD".to_string(),
            factor: f64::NAN,
        };
        assert!(matches!(scale.execute(), Err(AsaError::Validation { .. })));
    }
}
