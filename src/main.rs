//! CLI entry point for the AFL attendance dashboard.
//!
//! Provides subcommands for serving the dashboard and for running the
//! cleaning/aggregation pipeline standalone.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use afl_attendance::aggregate::{Summaries, build_summaries};
use afl_attendance::charts;
use afl_attendance::cleaner::clean;
use afl_attendance::loader::load_records;
use afl_attendance::output::{log_profile, print_json, write_summary_csv};
use afl_attendance::page::render_page;
use afl_attendance::record::MatchRecord;
use afl_attendance::server::{AppState, run_server};
use anyhow::Result;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "afl_attendance")]
#[command(about = "AFL match attendance statistics dashboard", long_about = None)]
struct Cli {
    /// Verbose diagnostics (debug-level logs, full pipeline traces)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the pipeline and serve the dashboard
    Serve {
        /// Path to the attendance dataset CSV
        #[arg(short, long, default_value = "data/attendance.csv")]
        data: PathBuf,

        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8050)]
        port: u16,

        /// Directory of static assets referenced by the page
        #[arg(long, default_value = "assets")]
        assets: PathBuf,
    },
    /// Run the pipeline and print or export the summary tables
    Summarize {
        /// Path to the attendance dataset CSV
        #[arg(short, long, default_value = "data/attendance.csv")]
        data: PathBuf,

        /// Optional CSV file to write the by-team summary to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();
    let _file_guard = init_logging(cli.debug);

    match cli.command {
        Commands::Serve {
            data,
            host,
            port,
            assets,
        } => {
            let (records, summaries) = run_pipeline(&data)?;

            let fig_team = charts::attendance_by_team(&summaries.by_team);
            let fig_venue = charts::attendance_by_venue_season(&summaries.by_venue_season);
            let fig_scatter = charts::scores_vs_attendance(&records);
            let page = render_page(&fig_team, &fig_venue, &fig_scatter, Utc::now());

            let assets_dir = assets.is_dir().then_some(assets);
            if assets_dir.is_none() {
                warn!("assets directory not found, intro image will be missing");
            }

            let addr = format!("{host}:{port}");
            run_server(&addr, AppState::new(page), assets_dir).await?;
        }
        Commands::Summarize { data, output } => {
            let (records, summaries) = run_pipeline(&data)?;

            log_profile(&records);
            print_json(&summaries)?;

            if let Some(path) = output {
                write_summary_csv(&path, &summaries.by_team)?;
                info!(path = %path, "by-team summary written");
            }
        }
    }

    Ok(())
}

/// Loads, cleans, and aggregates the dataset. Any error here is fatal: the
/// dashboard is never served from partial data.
fn run_pipeline(data: &Path) -> Result<(Vec<MatchRecord>, Summaries)> {
    let raw = load_records(data)?;
    let records = clean(raw)?;
    let summaries = build_summaries(&records)?;

    info!(
        rows = records.len(),
        teams = summaries.by_team.rows.len(),
        venue_season_groups = summaries.by_venue_season.rows.len(),
        time_day_groups = summaries.by_time_day.rows.len(),
        "pipeline complete"
    );

    Ok((records, summaries))
}

/// Logging setup: colored stderr + JSON rolling log file. The returned
/// guard must stay alive for the process duration.
fn init_logging(debug: bool) -> tracing_appender::non_blocking::WorkerGuard {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/afl_attendance.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("afl_attendance.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let default_level = if debug { "debug" } else { "info" };

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::from_env("RUST_LOG").add_directive(default_level.parse().unwrap()),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse().unwrap()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    file_guard
}
