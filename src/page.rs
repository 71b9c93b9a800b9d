//! Single-page dashboard layout.
//!
//! The page is rendered once at startup: a title, an intro block with an
//! image, and three chart/caption rows. All text is fixed copy.

use chrono::{DateTime, Utc};
use serde_json::Value;

pub const PAGE_TITLE: &str = "Australian Footbal League statistics over the years";

const INTRO_TEXT: &str = "For Australians, AFL is the real deal alongside cricket and rugby. \
It was founded in 1850 in Melbourne and is deeply rooted in Australian tradition. \
The rules for the game ensure maximum game time which makes it a high-octane game that is \
more exciting due to several adrenaline rush moments. The competitiveness of the sport has \
gotten better over the years and the pace with which it is played keeps everyone glued to \
the action. There are currently 18 clubs spread across the mainland Australian states.";

const CAPTION_TEAM: &str = "This is a simple bar chart that shows attendance by each team. \
It can be seen that teams like Collingwood and Essendon have the most attendance.";

const CAPTION_VENUE: &str = "The stacked bar chart shows average attendance by each venue \
along with the season. It has two categorical values, venue and and one numerical variable \
which is actual crowd. The legend and hover are useful in drawing insights such as MCG is \
the most popular venue in all years.";

const CAPTION_SCATTER: &str = "This scatter plot is the most interesting visualizations as \
it shows correlation between attendance and and final score in each round over the years. \
It can be seen that the Finals and the ending rounds drew more crowd in all years.";

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>__PAGE_TITLE__</title>
<script src="https://cdn.plot.ly/plotly-2.32.0.min.js"></script>
<style>
body { background-color: #222222; color: #ffffff; font-family: "Helvetica Neue", Helvetica, Arial, sans-serif; margin: 0; }
.container { max-width: 1320px; margin: 0 auto; padding: 0 12px; }
h1 { text-align: center; margin-top: 30px; margin-bottom: 60px; }
.row { display: flex; align-items: center; margin-bottom: 60px; }
.chart { flex: 4; margin: 7px 15px 0 15px; }
.caption { flex: 1; text-align: center; font-size: 1.1rem; }
.intro { flex: 1; margin-left: 50px; text-align: center; font-size: 1.1rem; }
.intro-image { flex: 1; margin-left: 50px; margin-right: 50px; text-align: center; }
.intro-image img { max-width: 100%; }
footer { text-align: center; color: #888888; margin: 40px 0; font-size: 0.8rem; }
</style>
</head>
<body>
<div class="container">
<h1>__PAGE_TITLE__</h1>
<div class="row">
  <div class="intro">__INTRO__</div>
  <div class="intro-image"><img src="/assets/download.jfif" alt="AFL"></div>
</div>
<div class="row"><div class="chart" id="graph1"></div><div class="caption">__CAPTION1__</div></div>
<div class="row"><div class="chart" id="graph2"></div><div class="caption">__CAPTION2__</div></div>
<div class="row"><div class="chart" id="graph3"></div><div class="caption">__CAPTION3__</div></div>
<footer>Generated at __GENERATED_AT__</footer>
</div>
<script>
Plotly.newPlot("graph1", __FIG1__);
Plotly.newPlot("graph2", __FIG2__);
Plotly.newPlot("graph3", __FIG3__);
</script>
</body>
</html>
"#;

/// Renders the full dashboard page with the three figures embedded.
pub fn render_page(
    fig_team: &Value,
    fig_venue: &Value,
    fig_scatter: &Value,
    generated_at: DateTime<Utc>,
) -> String {
    TEMPLATE
        .replace("__PAGE_TITLE__", PAGE_TITLE)
        .replace("__INTRO__", INTRO_TEXT)
        .replace("__CAPTION1__", CAPTION_TEAM)
        .replace("__CAPTION2__", CAPTION_VENUE)
        .replace("__CAPTION3__", CAPTION_SCATTER)
        .replace("__FIG1__", &fig_team.to_string())
        .replace("__FIG2__", &fig_venue.to_string())
        .replace("__FIG3__", &fig_scatter.to_string())
        .replace(
            "__GENERATED_AT__",
            &generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        )
}
