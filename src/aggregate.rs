//! Null-aware grouped means over the cleaned table.
//!
//! The only non-trivial logic in the pipeline lives here: a pure group-by
//! function mapping a key tuple to the mean of a measure, ignoring null
//! measure values and preserving first-seen group order.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::PipelineError;
use crate::record::MatchRecord;
use crate::utility::mean;

/// One group of a summary table.
#[derive(Debug, Clone, Serialize)]
pub struct GroupRow {
    /// Key tuple, one entry per grouping column.
    pub key: Vec<String>,
    pub mean: f64,
    /// Number of non-null measure values that contributed to the mean.
    pub count: usize,
}

/// An ordered mapping from key tuples to the mean of a measure.
#[derive(Debug, Serialize)]
pub struct SummaryTable {
    pub key_columns: Vec<String>,
    pub measure: String,
    pub rows: Vec<GroupRow>,
}

/// The three derived tables feeding the dashboard.
#[derive(Debug, Serialize)]
pub struct Summaries {
    pub by_team: SummaryTable,
    pub by_venue_season: SummaryTable,
    /// Computed for parity with the source pipeline but not rendered by any
    /// chart. Summarize output and JSON export still include it.
    pub by_time_day: SummaryTable,
}

/// Groups records by the key tuple and averages the measure over non-null
/// values. Group order is the first-seen order of each key tuple.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyGroup`] when a group contains only null
/// measure values, since its mean would be undefined.
pub fn group_mean<K, M>(
    records: &[MatchRecord],
    key_columns: &[&str],
    measure: &str,
    key_of: K,
    measure_of: M,
) -> Result<SummaryTable, PipelineError>
where
    K: Fn(&MatchRecord) -> Vec<String>,
    M: Fn(&MatchRecord) -> Option<f64>,
{
    let mut order: Vec<Vec<String>> = Vec::new();
    let mut buckets: HashMap<Vec<String>, Vec<f64>> = HashMap::new();

    for record in records {
        let key = key_of(record);
        if !buckets.contains_key(&key) {
            order.push(key.clone());
        }
        let bucket = buckets.entry(key).or_default();
        if let Some(value) = measure_of(record) {
            bucket.push(value);
        }
    }

    let mut rows = Vec::with_capacity(order.len());
    for key in order {
        let values = &buckets[&key];
        if values.is_empty() {
            return Err(PipelineError::EmptyGroup {
                key: key.join(", "),
                measure: measure.to_string(),
            });
        }
        rows.push(GroupRow {
            mean: mean(values),
            count: values.len(),
            key,
        });
    }

    Ok(SummaryTable {
        key_columns: key_columns.iter().map(|s| s.to_string()).collect(),
        measure: measure.to_string(),
        rows,
    })
}

/// Builds the three summary tables from the cleaned records.
pub fn build_summaries(records: &[MatchRecord]) -> Result<Summaries, PipelineError> {
    let by_team = group_mean(
        records,
        &["Team"],
        "Actual Crowd",
        |r| vec![r.team.clone()],
        |r| r.actual_crowd,
    )?;

    let by_venue_season = group_mean(
        records,
        &["Venue", "Season"],
        "Actual Crowd",
        |r| vec![r.venue.clone(), season_label(r)],
        |r| r.actual_crowd,
    )?;

    let by_time_day = group_mean(
        records,
        &["Time", "Day"],
        "Actual Crowd",
        |r| vec![r.time.clone(), r.day.clone()],
        |r| r.actual_crowd,
    )?;

    Ok(Summaries {
        by_team,
        by_venue_season,
        by_time_day,
    })
}

/// Season as a display string; rows with an unparsed season group under "".
pub fn season_label(record: &MatchRecord) -> String {
    record.season.map(|s| s.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(team: &str, venue: &str, season: i32, crowd: Option<f64>) -> MatchRecord {
        MatchRecord {
            team: team.to_string(),
            venue: venue.to_string(),
            season: Some(season),
            actual_crowd: crowd,
            date: "2020-03-01".to_string(),
            ..MatchRecord::default()
        }
    }

    #[test]
    fn test_group_order_is_first_seen() {
        let records = vec![
            rec("Sydney", "SCG", 2019, Some(10.0)),
            rec("Collingwood", "MCG", 2019, Some(20.0)),
            rec("Sydney", "SCG", 2020, Some(30.0)),
        ];
        let table = group_mean(
            &records,
            &["Team"],
            "Actual Crowd",
            |r| vec![r.team.clone()],
            |r| r.actual_crowd,
        )
        .unwrap();

        let keys: Vec<_> = table.rows.iter().map(|r| r.key[0].as_str()).collect();
        assert_eq!(keys, vec!["Sydney", "Collingwood"]);
        assert_eq!(table.rows[0].mean, 20.0);
    }

    #[test]
    fn test_nulls_excluded_from_group_mean() {
        let records = vec![
            rec("Collingwood", "MCG", 2019, Some(100.0)),
            rec("Collingwood", "MCG", 2019, None),
            rec("Collingwood", "MCG", 2019, Some(200.0)),
        ];
        let table = build_summaries(&records).unwrap().by_team;

        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].mean, 150.0);
        assert_eq!(table.rows[0].count, 2);
    }

    #[test]
    fn test_all_null_group_fails() {
        let records = vec![
            rec("Collingwood", "MCG", 2019, Some(100.0)),
            rec("Sydney", "SCG", 2019, None),
        ];
        let err = build_summaries(&records).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyGroup { .. }));
    }

    #[test]
    fn test_by_team_counts_distinct_teams() {
        let records = vec![
            rec("Collingwood", "MCG", 2019, Some(1.0)),
            rec("Richmond", "MCG", 2019, Some(2.0)),
            rec("Collingwood", "SCG", 2020, Some(3.0)),
            rec("Sydney", "SCG", 2020, Some(4.0)),
        ];
        let table = build_summaries(&records).unwrap().by_team;

        assert_eq!(table.rows.len(), 3);
    }

    #[test]
    fn test_venue_season_grid() {
        // Two venues across two seasons, all combinations present.
        let records = vec![
            rec("A", "MCG", 2019, Some(1.0)),
            rec("B", "SCG", 2019, Some(2.0)),
            rec("C", "MCG", 2020, Some(3.0)),
            rec("D", "SCG", 2020, Some(4.0)),
        ];
        let table = build_summaries(&records).unwrap().by_venue_season;

        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.rows[0].key, vec!["MCG", "2019"]);
        assert_eq!(table.rows[3].key, vec!["SCG", "2020"]);
    }

    #[test]
    fn test_group_sums_match_totals() {
        let records = vec![
            rec("Collingwood", "MCG", 2019, Some(85000.0)),
            rec("Collingwood", "MCG", 2019, Some(60000.0)),
            rec("Collingwood", "MCG", 2019, None),
            rec("Richmond", "MCG", 2019, Some(40000.0)),
        ];
        let table = build_summaries(&records).unwrap().by_team;

        let reconstructed: f64 = table
            .rows
            .iter()
            .map(|r| r.mean * r.count as f64)
            .sum();
        assert!((reconstructed - 185000.0).abs() < 1e-9);
    }
}
