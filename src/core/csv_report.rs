use crate::domain::report::{DailyImpressionShareReport, DailyImpressionShareReportRecord};
use crate::utils::error::Result;

/// Parses a downloaded Impression Share CSV.
///
/// Columns are matched by header name, so their order doesn't matter. Any row
/// that fails to deserialize fails the whole report.
pub fn parse_daily_report(data: &[u8]) -> Result<DailyImpressionShareReport> {
    // 移除 UTF-8 BOM，否則第一個欄位名稱無法對應
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let mut records = Vec::new();
    for row in reader.deserialize::<DailyImpressionShareReportRecord>() {
        records.push(row?);
    }

    tracing::debug!("Parsed {} impression share records", records.len());
    Ok(DailyImpressionShareReport { records })
}

/// Serializes records back to CSV with the API's column names.
pub fn write_daily_report(report: &DailyImpressionShareReport) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in &report.records {
        writer.serialize(record)?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::AsaError;
    use chrono::NaiveDate;

    const SAMPLE: &str = "\
date,appName,adamId,countryOrRegion,searchTerm,lowImpressionShare,highImpressionShare,rank,searchPopularity
2022-06-01,My App,123456789,US,photo editor,0.11,0.2,ONE,5
2022-06-01,My App,123456789,GB,photo filters,0.31,0.4,GREATER_THAN_FIVE,3
2022-06-02,My App,123456789,US,photo editor,0.1,0.21,TWO,5
";

    #[test]
    fn test_parse_daily_report() {
        let report = parse_daily_report(SAMPLE.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 3);

        let first = &report.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
        assert_eq!(first.app_name, "My App");
        assert_eq!(first.adam_id, 123456789);
        assert_eq!(first.country_or_region, "US");
        assert_eq!(first.search_term, "photo editor");
        assert_eq!(first.low_impression_share, 0.11);
        assert_eq!(first.high_impression_share, 0.2);
        assert_eq!(first.rank, "ONE");
        assert_eq!(first.search_popularity, 5);

        assert_eq!(report.records[1].rank, "GREATER_THAN_FIVE");
    }

    #[test]
    fn test_parse_ignores_column_order() {
        let csv = "\
searchPopularity,rank,highImpressionShare,lowImpressionShare,searchTerm,countryOrRegion,adamId,appName,date
4,THREE,0.5,0.4,\"maps, offline\",DE,42,Other App,2022-07-15
";
        let report = parse_daily_report(csv.as_bytes()).unwrap();
        assert_eq!(report.records.len(), 1);

        let record = &report.records[0];
        assert_eq!(record.search_term, "maps, offline");
        assert_eq!(record.adam_id, 42);
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2022, 7, 15).unwrap());
        assert_eq!(record.search_popularity, 4);
    }

    #[test]
    fn test_parse_strips_bom_and_whitespace() {
        let csv = format!("\u{feff}{}", SAMPLE.replace(",US,", ", US ,"));
        let report = parse_daily_report(csv.as_bytes()).unwrap();
        assert_eq!(report.records[0].country_or_region, "US");
        assert_eq!(report.records[0].date, NaiveDate::from_ymd_opt(2022, 6, 1).unwrap());
    }

    #[test]
    fn test_parse_header_only_is_empty() {
        let header = SAMPLE.lines().next().unwrap();
        let report = parse_daily_report(header.as_bytes()).unwrap();
        assert!(report.records.is_empty());
    }

    #[test]
    fn test_parse_rejects_bad_field() {
        let csv = SAMPLE.replace("123456789,GB", "not-a-number,GB");
        let err = parse_daily_report(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AsaError::Csv(_)));
    }

    #[test]
    fn test_parse_rejects_missing_column() {
        let csv = "date,appName\n2022-06-01,My App\n";
        assert!(matches!(
            parse_daily_report(csv.as_bytes()),
            Err(AsaError::Csv(_))
        ));
    }

    #[test]
    fn test_write_then_parse() {
        let report = parse_daily_report(SAMPLE.as_bytes()).unwrap();
        let written = write_daily_report(&report).unwrap();

        let text = String::from_utf8(written.clone()).unwrap();
        assert!(text.starts_with("date,appName,adamId,countryOrRegion,searchTerm"));
        assert_eq!(parse_daily_report(&written).unwrap(), report);
    }
}
