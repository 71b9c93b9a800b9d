//! Plotly figure descriptors for the dashboard.
//!
//! Figures are plain JSON values consumed by plotly.js in the browser; the
//! server only shapes summary data into the `data`/`layout`/`frames` form.

use serde_json::{Value, json};

use crate::aggregate::{SummaryTable, season_label};
use crate::record::MatchRecord;

pub const CHART_A_TITLE: &str = "Average Attendance by Team";
pub const CHART_B_TITLE: &str = "Average Attendance by Venue and Season";
pub const CHART_C_TITLE: &str =
    "Relationship Between Final Scores and Attendance in each round";

/// Bar chart of mean attendance per team.
pub fn attendance_by_team(by_team: &SummaryTable) -> Value {
    let x: Vec<&str> = by_team.rows.iter().map(|r| r.key[0].as_str()).collect();
    let y: Vec<f64> = by_team.rows.iter().map(|r| r.mean).collect();

    json!({
        "data": [{ "type": "bar", "x": x, "y": y }],
        "layout": dark_layout(CHART_A_TITLE, "Team", "Average Attendance"),
    })
}

/// Stacked bar chart of mean attendance per venue, one series per season.
pub fn attendance_by_venue_season(by_venue_season: &SummaryTable) -> Value {
    let mut seasons: Vec<&str> = Vec::new();
    for row in &by_venue_season.rows {
        let season = row.key[1].as_str();
        if !seasons.contains(&season) {
            seasons.push(season);
        }
    }

    let traces: Vec<Value> = seasons
        .iter()
        .map(|season| {
            let mut x: Vec<&str> = Vec::new();
            let mut y: Vec<f64> = Vec::new();
            for row in &by_venue_season.rows {
                if row.key[1] == *season {
                    x.push(row.key[0].as_str());
                    y.push(row.mean);
                }
            }
            json!({ "type": "bar", "name": season, "x": x, "y": y })
        })
        .collect();

    let mut layout = dark_layout(CHART_B_TITLE, "Venue", "Average Attendance");
    layout["barmode"] = json!("stack");
    layout["legend"] = json!({ "title": { "text": "Season" } });

    json!({ "data": traces, "layout": layout })
}

/// Scatter of final score against crowd over the per-record data, colored by
/// round, with one animation frame per season and a slider to scrub them.
pub fn scores_vs_attendance(records: &[MatchRecord]) -> Value {
    let mut seasons: Vec<String> = Vec::new();
    for record in records {
        let season = season_label(record);
        if !seasons.contains(&season) {
            seasons.push(season);
        }
    }

    let frames: Vec<Value> = seasons
        .iter()
        .map(|season| json!({ "name": season, "data": round_traces(records, season) }))
        .collect();

    // The first frame doubles as the initial view.
    let initial = frames
        .first()
        .map(|f| f["data"].clone())
        .unwrap_or_else(|| json!([]));

    let steps: Vec<Value> = seasons
        .iter()
        .map(|season| {
            json!({
                "label": season,
                "method": "animate",
                "args": [[season], {
                    "mode": "immediate",
                    "frame": { "duration": 500, "redraw": false },
                    "transition": { "duration": 300 },
                }],
            })
        })
        .collect();

    let mut layout = dark_layout(CHART_C_TITLE, "Final Score", "Average Crowd");
    layout["legend"] = json!({ "title": { "text": "Round" } });
    layout["updatemenus"] = json!([{
        "type": "buttons",
        "showactive": false,
        "x": 0.05,
        "y": -0.15,
        "buttons": [
            {
                "label": "Play",
                "method": "animate",
                "args": [Value::Null, {
                    "fromcurrent": true,
                    "frame": { "duration": 500, "redraw": false },
                    "transition": { "duration": 300 },
                }],
            },
            {
                "label": "Pause",
                "method": "animate",
                "args": [[Value::Null], { "mode": "immediate" }],
            },
        ],
    }]);
    layout["sliders"] = json!([{
        "active": 0,
        "currentvalue": { "prefix": "Season=" },
        "steps": steps,
    }]);

    json!({ "data": initial, "layout": layout, "frames": frames })
}

/// One scatter trace per round appearing in the given season, rounds in
/// first-seen order. Null crowd values pass through as JSON nulls.
fn round_traces(records: &[MatchRecord], season: &str) -> Value {
    let in_season: Vec<&MatchRecord> = records
        .iter()
        .filter(|r| season_label(r) == season)
        .collect();

    let mut rounds: Vec<&str> = Vec::new();
    for record in &in_season {
        if !rounds.contains(&record.round.as_str()) {
            rounds.push(record.round.as_str());
        }
    }

    let traces: Vec<Value> = rounds
        .iter()
        .map(|round| {
            let mut x: Vec<Value> = Vec::new();
            let mut y: Vec<Value> = Vec::new();
            for record in &in_season {
                if record.round == *round {
                    x.push(json!(record.final_score));
                    y.push(json!(record.actual_crowd));
                }
            }
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": round,
                "x": x,
                "y": y,
            })
        })
        .collect();

    json!(traces)
}

/// Shared dark layout matching the page theme.
fn dark_layout(title: &str, x_title: &str, y_title: &str) -> Value {
    json!({
        "title": { "text": title },
        "paper_bgcolor": "#111111",
        "plot_bgcolor": "#111111",
        "font": { "color": "#f2f5fa" },
        "xaxis": {
            "title": { "text": x_title },
            "gridcolor": "#283442",
            "zerolinecolor": "#283442",
        },
        "yaxis": {
            "title": { "text": y_title },
            "gridcolor": "#283442",
            "zerolinecolor": "#283442",
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::build_summaries;

    fn rec(team: &str, round: &str, venue: &str, season: i32, crowd: Option<f64>) -> MatchRecord {
        MatchRecord {
            team: team.to_string(),
            round: round.to_string(),
            venue: venue.to_string(),
            season: Some(season),
            final_score: Some(80.0),
            actual_crowd: crowd,
            date: "2020-03-01".to_string(),
            ..MatchRecord::default()
        }
    }

    fn sample() -> Vec<MatchRecord> {
        vec![
            rec("Collingwood", "Round 1", "MCG", 2019, Some(85000.0)),
            rec("Richmond", "Round 1", "MCG", 2019, Some(60000.0)),
            rec("Sydney", "Round 2", "SCG", 2019, Some(38000.0)),
            rec("Collingwood", "Round 1", "MCG", 2020, Some(22000.0)),
            rec("Sydney", "Round 2", "SCG", 2020, None),
            rec("Sydney", "Round 3", "SCG", 2020, Some(12000.0)),
        ]
    }

    #[test]
    fn test_team_chart_shape() {
        let summaries = build_summaries(&sample()).unwrap();
        let fig = attendance_by_team(&summaries.by_team);

        assert_eq!(fig["layout"]["title"]["text"], CHART_A_TITLE);
        assert_eq!(fig["layout"]["xaxis"]["title"]["text"], "Team");
        assert_eq!(fig["data"][0]["type"], "bar");
        assert_eq!(fig["data"][0]["x"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_venue_chart_one_trace_per_season() {
        let summaries = build_summaries(&sample()).unwrap();
        let fig = attendance_by_venue_season(&summaries.by_venue_season);

        assert_eq!(fig["layout"]["barmode"], "stack");
        assert_eq!(fig["data"].as_array().unwrap().len(), 2);
        assert_eq!(fig["data"][0]["name"], "2019");
        assert_eq!(fig["data"][1]["name"], "2020");
    }

    #[test]
    fn test_scatter_chart_frames_per_season() {
        let fig = scores_vs_attendance(&sample());

        assert_eq!(fig["layout"]["title"]["text"], CHART_C_TITLE);
        assert_eq!(fig["frames"].as_array().unwrap().len(), 2);
        assert_eq!(fig["frames"][0]["name"], "2019");
        assert_eq!(fig["layout"]["sliders"][0]["steps"].as_array().unwrap().len(), 2);
        // 2020 has three rounds, so its frame carries three traces.
        assert_eq!(fig["frames"][1]["data"].as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_scatter_null_crowd_passes_through() {
        let fig = scores_vs_attendance(&sample());
        // Round 2 trace in the 2020 frame holds the null-crowd record.
        let y = &fig["frames"][1]["data"][1]["y"];
        assert!(y.as_array().unwrap().contains(&Value::Null));
    }
}
