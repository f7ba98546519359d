use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use chrono::Duration;
use chrono_tz::Tz;
use clap::Parser;
use confsheet_core::config::{
    DEFAULT_OUTPUT_DIR, DEFAULT_SESSION_MINUTES, DEFAULT_TRACKLIST_GID, DEFAULT_YEAR,
};
use confsheet_core::{pipeline, SyncConfig, SyncOutcome};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Fold conference schedule sheets into speakers, sessions and tracks JSON",
    long_about = None
)]
struct Cli {
    /// Spreadsheet id the tracklist and track sheets are exported from
    #[arg(long, env = "SHEET_ID")]
    sheet_id: Option<String>,

    /// Grid id of the tracklist sheet
    #[arg(long, env = "CONFSHEET_TRACKLIST_GID", default_value = DEFAULT_TRACKLIST_GID)]
    tracklist_gid: String,

    /// Conference year, added to dates that leave it out
    #[arg(long, env = "CONFSHEET_YEAR", default_value = DEFAULT_YEAR)]
    year: String,

    /// IANA zone the sheet times are written in
    #[arg(long, env = "CONFSHEET_TIMEZONE", default_value = "Europe/Berlin")]
    timezone: String,

    /// Minutes each sheet row stands for
    #[arg(long, default_value_t = DEFAULT_SESSION_MINUTES)]
    session_minutes: i64,

    /// Directory the JSON files are written to
    #[arg(long = "out", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Read `<gid>.tsv` files from this directory instead of fetching
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Only fold the first N fetchable tracks
    #[arg(long)]
    max_tracks: Option<usize>,
}

impl Cli {
    fn into_config(self) -> Result<SyncConfig> {
        let timezone: Tz = self
            .timezone
            .parse()
            .map_err(|err| anyhow!("unknown timezone '{}': {err}", self.timezone))?;
        if self.session_minutes <= 0 {
            return Err(anyhow!("--session-minutes must be positive"));
        }

        Ok(SyncConfig {
            sheet_id: self.sheet_id,
            tracklist_gid: self.tracklist_gid,
            year: self.year,
            timezone,
            session_length: Duration::minutes(self.session_minutes),
            output_dir: self.output_dir,
            input_dir: self.input_dir,
            max_tracks: self.max_tracks,
        })
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = Cli::parse().into_config()?;
    let source = config
        .sheet_source()
        .context("failed to configure sheet source")?;

    match pipeline::run(&config, source.as_ref()).await? {
        SyncOutcome::Written {
            paths,
            tracks,
            sessions,
            speakers,
        } => {
            info!(
                tracks,
                sessions,
                speakers,
                sessions_file = %paths.sessions.display(),
                "Wrote schedule"
            );
            Ok(ExitCode::SUCCESS)
        }
        SyncOutcome::DuplicateSessionIds(duplicates) => {
            error!(count = duplicates.len(), "Refusing to write output");
            Ok(ExitCode::from(1))
        }
    }
}
