use std::path::PathBuf;

use chrono::Duration;
use chrono_tz::Tz;
use confsheet_parser::TimeResolver;

use crate::error::{Result, SyncError};
use crate::source::{DirectorySheetSource, HttpSheetSource, SheetSource};

pub const DEFAULT_TRACKLIST_GID: &str = "1228727534";
pub const DEFAULT_YEAR: &str = "2016";
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::Berlin;
/// Every sheet row stands for one slot of this many minutes.
pub const DEFAULT_SESSION_MINUTES: i64 = 30;
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Settings for one conference edition's sync run.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Spreadsheet container id. Only needed when fetching over HTTP.
    pub sheet_id: Option<String>,
    pub tracklist_gid: String,
    /// Prepended to dates that do not mention it.
    pub year: String,
    /// Zone the sheet's wall-clock times are written in.
    pub timezone: Tz,
    pub session_length: Duration,
    pub output_dir: PathBuf,
    /// Read `<gid>.tsv` files from here instead of fetching.
    pub input_dir: Option<PathBuf>,
    pub max_tracks: Option<usize>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            sheet_id: None,
            tracklist_gid: DEFAULT_TRACKLIST_GID.to_string(),
            year: DEFAULT_YEAR.to_string(),
            timezone: DEFAULT_TIMEZONE,
            session_length: Duration::minutes(DEFAULT_SESSION_MINUTES),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            input_dir: None,
            max_tracks: None,
        }
    }
}

impl SyncConfig {
    pub fn time_resolver(&self) -> TimeResolver {
        TimeResolver::new(self.year.clone(), self.timezone)
    }

    pub fn sheet_source(&self) -> Result<Box<dyn SheetSource>> {
        if let Some(dir) = &self.input_dir {
            return Ok(Box::new(DirectorySheetSource::new(dir.clone())));
        }
        match self.sheet_id.as_deref() {
            Some(id) if !id.trim().is_empty() => Ok(Box::new(HttpSheetSource::new(id.trim()))),
            _ => Err(SyncError::Config(
                "SHEET_ID must be set unless an input directory is given".to_string(),
            )),
        }
    }
}
