//! Output formatting for summaries.
//!
//! Supports pretty-printed JSON logging, CSV export of a summary table, and
//! a describe-style profile of the cleaned table.

use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use tracing::info;

use crate::aggregate::{Summaries, SummaryTable};
use crate::record::MatchRecord;
use crate::utility::{mean, stddev};

/// Logs all three summary tables as pretty-printed JSON.
pub fn print_json(summaries: &Summaries) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(summaries)?);
    Ok(())
}

/// Writes a summary table to CSV: the key columns, then the mean and the
/// count of contributing rows.
pub fn write_summary_csv(path: &str, table: &SummaryTable) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().from_writer(file);

    let mut header: Vec<String> = table.key_columns.clone();
    header.push(format!("mean_{}", snake(&table.measure)));
    header.push("count".to_string());
    writer.write_record(&header)?;

    for row in &table.rows {
        let mut fields: Vec<String> = row.key.clone();
        fields.push(row.mean.to_string());
        fields.push(row.count.to_string());
        writer.write_record(&fields)?;
    }

    writer.flush()?;
    Ok(())
}

fn snake(name: &str) -> String {
    name.to_lowercase().replace(' ', "_")
}

/// Logs a profile of the cleaned table: row count, remaining missing
/// counts, and the crowd distribution.
pub fn log_profile(records: &[MatchRecord]) {
    let crowd: Vec<f64> = records.iter().filter_map(|r| r.actual_crowd).collect();

    info!(
        rows = records.len(),
        missing_crowd = records.len() - crowd.len(),
        missing_season = records.iter().filter(|r| r.season.is_none()).count(),
        "cleaned table profile"
    );

    if !crowd.is_empty() {
        let crowd_mean = mean(&crowd);
        info!(
            mean = crowd_mean,
            stddev = stddev(&crowd, crowd_mean),
            min = crowd.iter().copied().fold(f64::INFINITY, f64::min),
            max = crowd.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            "actual crowd distribution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_summaries;
    use std::env;
    use std::fs;

    fn temp_path(name: &str) -> String {
        format!("{}/{}", env::temp_dir().display(), name)
    }

    fn sample_records() -> Vec<MatchRecord> {
        vec![
            MatchRecord {
                team: "Collingwood".to_string(),
                venue: "MCG".to_string(),
                season: Some(2019),
                actual_crowd: Some(85000.0),
                date: "2019-03-22".to_string(),
                ..MatchRecord::default()
            },
            MatchRecord {
                team: "Sydney".to_string(),
                venue: "SCG".to_string(),
                season: Some(2019),
                actual_crowd: Some(38000.0),
                date: "2019-03-28".to_string(),
                ..MatchRecord::default()
            },
        ]
    }

    #[test]
    fn test_print_json_does_not_panic() {
        let summaries = build_summaries(&sample_records()).unwrap();
        print_json(&summaries).unwrap();
    }

    #[test]
    fn test_write_summary_csv() {
        let path = temp_path("afl_attendance_test_summary.csv");
        let _ = fs::remove_file(&path); // clean up any prior run

        let summaries = build_summaries(&sample_records()).unwrap();
        write_summary_csv(&path, &summaries.by_team).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "Team,mean_actual_crowd,count");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Collingwood,85000"));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_log_profile_does_not_panic_on_empty() {
        log_profile(&[]);
    }
}
