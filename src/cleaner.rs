//! Row cleaning: type coercion, drop rules, and mean imputation.
//!
//! The stages run in a fixed order. Numeric cells are coerced first (a bad
//! cell becomes null, never an error), rows without a usable date or venue
//! are discarded, and the remaining gaps in the three imputable columns are
//! filled with per-column means computed before any replacement.

use tracing::{debug, info};

use crate::error::PipelineError;
use crate::record::{HomeAway, MatchRecord, MatchResult, RawRecord};
use crate::utility::mean;

/// Literal value some source rows carry in Date or Venue to mean "missing".
const SENTINEL_ZERO: &str = "0";

/// Cleans the raw table into match records satisfying the dataset
/// invariants.
///
/// # Errors
///
/// Returns [`PipelineError::Imputation`] if one of the imputable columns
/// has no non-null values left after the drop stage.
pub fn clean(raw: Vec<RawRecord>) -> Result<Vec<MatchRecord>, PipelineError> {
    let total = raw.len();

    let mut records: Vec<MatchRecord> = raw.into_iter().map(coerce).collect();
    records.retain(|r| usable(&r.date) && usable(&r.venue));

    info!(
        total,
        kept = records.len(),
        dropped = total - records.len(),
        "rows without a usable date or venue removed"
    );

    impute_column(&mut records, "Final Score", |r| &mut r.final_score)?;
    impute_column(&mut records, "Ladder Position", |r| &mut r.ladder_position)?;
    impute_column(&mut records, "Games Won in last 5 played", |r| {
        &mut r.games_won_last_five
    })?;

    Ok(records)
}

fn usable(value: &str) -> bool {
    !value.is_empty() && value != SENTINEL_ZERO
}

/// Coerces one raw row. Numeric and enum cells that fail to parse become
/// null; text cells are trimmed, with missing cells becoming empty strings.
fn coerce(raw: RawRecord) -> MatchRecord {
    MatchRecord {
        team: text(raw.team),
        round: text(raw.round),
        season: raw.season.as_deref().and_then(|s| s.trim().parse().ok()),
        home_away: raw.home_away.as_deref().and_then(HomeAway::parse),
        final_score: numeric(raw.final_score),
        date: text(raw.date),
        time: text(raw.time),
        venue: text(raw.venue),
        actual_crowd: numeric(raw.actual_crowd),
        opposition: text(raw.opposition),
        result: raw.result.as_deref().and_then(MatchResult::parse),
        ladder_position: numeric(raw.ladder_position),
        games_won_last_five: numeric(raw.games_won_last_five),
        day: text(raw.day),
    }
}

fn text(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

fn numeric(value: Option<String>) -> Option<f64> {
    value.and_then(|s| s.trim().parse::<f64>().ok())
}

/// Fills null cells of one column with the column mean. The mean is computed
/// once over the non-null values, then applied uniformly, so re-running on a
/// column without nulls is a no-op.
fn impute_column<F>(
    records: &mut [MatchRecord],
    column: &'static str,
    field: F,
) -> Result<(), PipelineError>
where
    F: Fn(&mut MatchRecord) -> &mut Option<f64>,
{
    let values: Vec<f64> = records.iter_mut().filter_map(|r| *field(r)).collect();
    if values.is_empty() {
        return Err(PipelineError::Imputation { column });
    }

    let fill = mean(&values);
    let mut filled = 0usize;
    for record in records.iter_mut() {
        let slot = field(record);
        if slot.is_none() {
            *slot = Some(fill);
            filled += 1;
        }
    }

    debug!(column, fill, filled, "filled null cells with column mean");
    Ok(())
}
