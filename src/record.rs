//! Row types for the attendance dataset.

use serde::{Deserialize, Serialize};

/// A single row deserialized from the dataset CSV, before any cleaning.
///
/// Every field is optional text: the source spreadsheet mixes blanks, junk
/// cells, and sentinel zeroes, and none of that should fail the load. Field
/// names map to the dataset's literal column headers.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RawRecord {
    #[serde(rename = "Team")]
    pub team: Option<String>,
    #[serde(rename = "Round")]
    pub round: Option<String>,
    #[serde(rename = "Season")]
    pub season: Option<String>,
    #[serde(rename = "Home/Away")]
    pub home_away: Option<String>,
    #[serde(rename = "Final Score")]
    pub final_score: Option<String>,
    #[serde(rename = "Date")]
    pub date: Option<String>,
    #[serde(rename = "Time")]
    pub time: Option<String>,
    #[serde(rename = "Venue")]
    pub venue: Option<String>,
    #[serde(rename = "Actual Crowd")]
    pub actual_crowd: Option<String>,
    #[serde(rename = "Opposition Team")]
    pub opposition: Option<String>,
    #[serde(rename = "Result")]
    pub result: Option<String>,
    #[serde(rename = "Ladder Position")]
    pub ladder_position: Option<String>,
    #[serde(rename = "Games Won in last 5 played")]
    pub games_won_last_five: Option<String>,
    #[serde(rename = "Day")]
    pub day: Option<String>,
}

/// Whether the team played at its home ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HomeAway {
    Home,
    Away,
}

impl HomeAway {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "home" => Some(Self::Home),
            "away" => Some(Self::Away),
            _ => None,
        }
    }
}

/// Match outcome for the team this row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchResult {
    Win,
    Loss,
}

impl MatchResult {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "win" | "w" => Some(Self::Win),
            "loss" | "lose" | "l" => Some(Self::Loss),
            _ => None,
        }
    }
}

/// One cleaned match attendance observation.
///
/// After cleaning, `date` and `venue` are non-empty and never the `"0"`
/// sentinel, and `final_score`, `ladder_position`, and `games_won_last_five`
/// are always `Some` (mean-imputed). `actual_crowd` is deliberately never
/// imputed and may remain `None`; aggregation excludes nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchRecord {
    pub team: String,
    pub round: String,
    pub season: Option<i32>,
    pub home_away: Option<HomeAway>,
    pub final_score: Option<f64>,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub actual_crowd: Option<f64>,
    pub opposition: String,
    pub result: Option<MatchResult>,
    pub ladder_position: Option<f64>,
    pub games_won_last_five: Option<f64>,
    pub day: String,
}
