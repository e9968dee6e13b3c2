use asa_reports::config::cli::{Command, DownloadArgs, LogFormat};
use asa_reports::config::toml_config::{AsaConfig, OutputFormat};
use asa_reports::core::csv_report::write_daily_report;
use asa_reports::utils::error::ErrorSeverity;
use asa_reports::utils::{logger, validation::Validate};
use asa_reports::{
    ApiClient, CliConfig, ImpressionShareReportService, ImpressionShareReports, Result,
};
use clap::Parser;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    match cli.log_format {
        LogFormat::Text => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli.command);

    if let Err(e) = run(&cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,      // 報表尚未完成
            ErrorSeverity::Medium => 2,   // 可重試
            ErrorSeverity::High => 1,     // 請求或資料錯誤
            ErrorSeverity::Critical => 3, // 配置或系統錯誤
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: &CliConfig) -> Result<()> {
    match &cli.command {
        Command::Create(args) => {
            let (_, service) = connect(cli)?;
            let response = service.create_report(&args.to_request()).await?;
            print_json(&response.data)
        }
        Command::List(args) => {
            let (_, service) = connect(cli)?;
            let response = service.list_reports(&args.to_request()).await?;
            if let Some(page) = &response.pagination {
                tracing::info!(
                    "Page: {} of {} results from index {}",
                    response.data.len(),
                    page.total_results,
                    page.start_index
                );
            }
            print_json(&response.data)
        }
        Command::Get { id } => {
            let (_, service) = connect(cli)?;
            let response = service.get_report(*id).await?;
            print_json(&response.data)
        }
        Command::Download(args) => {
            let (config, service) = connect(cli)?;
            download(&service, &config, args).await
        }
        Command::Money(command) => {
            println!("{}", command.execute()?);
            Ok(())
        }
    }
}

// money 指令不需要 API 設定，只有遠端指令才載入
fn connect(cli: &CliConfig) -> Result<(AsaConfig, ImpressionShareReportService)> {
    let config = cli.load()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let service = ImpressionShareReportService::new(ApiClient::new(&config.api)?);
    tracing::info!("Using organization {}", config.api.org_id);
    Ok((config, service))
}

async fn download(
    service: &ImpressionShareReportService,
    config: &AsaConfig,
    args: &DownloadArgs,
) -> Result<()> {
    let report = service.download_report_by_id(args.id).await?;

    let format = args.format.unwrap_or(config.output.format);
    let data = match format {
        OutputFormat::Json => serde_json::to_vec_pretty(&report.records)?,
        OutputFormat::Csv => write_daily_report(&report)?,
    };

    match args.output.as_deref().or(config.output.path.as_deref()) {
        Some(path) => {
            let path = Path::new(path);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, &data)?;
            tracing::info!("📁 {} records saved to: {}", report.records.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&data)?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
