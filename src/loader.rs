//! CSV dataset loading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::PipelineError;
use crate::record::RawRecord;

/// Columns that must appear in the header row for the file to be accepted
/// as the attendance dataset. The remaining columns are optional; a missing
/// one simply yields null cells.
const REQUIRED_COLUMNS: &[&str] = &[
    "Team",
    "Round",
    "Season",
    "Date",
    "Venue",
    "Final Score",
    "Actual Crowd",
];

/// Reads the dataset file into raw rows.
///
/// # Errors
///
/// Returns [`PipelineError::Load`] if the file is missing, unreadable, or
/// not in the expected tabular format.
pub fn load_records(path: &Path) -> Result<Vec<RawRecord>, PipelineError> {
    let file = File::open(path).map_err(|e| PipelineError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let records = read_records(file).map_err(|e| PipelineError::Load {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    info!(rows = records.len(), path = %path.display(), "dataset loaded");
    Ok(records)
}

/// Reads rows from any CSV source. Fails on a header missing required
/// columns or on structurally broken rows; cell-level type problems are
/// deferred to the cleaner.
pub fn read_records<R: Read>(reader: R) -> anyhow::Result<Vec<RawRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            anyhow::bail!("missing required column {:?}", required);
        }
    }

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawRecord = result?;
        rows.push(record);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Team,Round,Season,Home/Away,Final Score,Date,Time,Venue,Actual Crowd,Opposition Team,Result,Ladder Position,Games Won in last 5 played,Day";

    #[test]
    fn test_read_records_basic() {
        let csv = format!(
            "{HEADER}\nCollingwood,Round 1,2019,Home,95,2019-03-22,19:50,MCG,85000,Richmond,Win,3,4,Friday\n"
        );
        let rows = read_records(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].team.as_deref(), Some("Collingwood"));
        assert_eq!(rows[0].venue.as_deref(), Some("MCG"));
        assert_eq!(rows[0].actual_crowd.as_deref(), Some("85000"));
    }

    #[test]
    fn test_read_records_empty_cells_become_none() {
        let csv = format!(
            "{HEADER}\nCollingwood,Round 1,2019,Home,,2019-03-22,19:50,MCG,,Richmond,Win,,4,Friday\n"
        );
        let rows = read_records(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].final_score, None);
        assert_eq!(rows[0].actual_crowd, None);
        assert_eq!(rows[0].ladder_position, None);
    }

    #[test]
    fn test_read_records_rejects_missing_required_column() {
        let csv = "Team,Round\nCollingwood,Round 1\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Season"));
    }

    #[test]
    fn test_load_records_missing_file() {
        let err = load_records(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, PipelineError::Load { .. }));
    }
}
