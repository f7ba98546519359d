use std::collections::HashMap;
use std::path::{Path, PathBuf};

use confsheet_parser::{Schedule, Track};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, SyncError};

pub const SPEAKERS_KEY: &str = "speakers";
pub const SESSIONS_KEY: &str = "sessions";
pub const TRACKS_KEY: &str = "tracks";

/// Files written by a successful run.
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub speakers: PathBuf,
    pub sessions: PathBuf,
    pub tracks: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            speakers: dir.join(format!("{SPEAKERS_KEY}.json")),
            sessions: dir.join(format!("{SESSIONS_KEY}.json")),
            tracks: dir.join(format!("{TRACKS_KEY}.json")),
        }
    }
}

/// Renders `{"<root_key>": [...]}` with two-space indentation. Items keep their field order.
pub fn render_document<T: Serialize>(root_key: &str, items: &[T]) -> Result<String> {
    let document = HashMap::from([(root_key, items)]);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Where a document is written before it is moved over its final path.
pub fn staging_path(path: &Path) -> PathBuf {
    path.with_extension("json.tmp")
}

/// Writes the three output documents. Everything is rendered and staged next to its final
/// path before anything is renamed into place, so a failed run leaves none of the three
/// documents behind.
pub async fn write_outputs(dir: &Path, schedule: &Schedule, tracks: &[Track]) -> Result<OutputPaths> {
    let paths = OutputPaths::in_dir(dir);
    let documents = [
        (
            &paths.speakers,
            render_document(SPEAKERS_KEY, &schedule.speakers)?,
            schedule.speakers.len(),
        ),
        (
            &paths.sessions,
            render_document(SESSIONS_KEY, &schedule.sessions)?,
            schedule.sessions.len(),
        ),
        (&paths.tracks, render_document(TRACKS_KEY, tracks)?, tracks.len()),
    ];

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| SyncError::Io {
            path: dir.to_path_buf(),
            source,
        })?;

    let mut staged = Vec::with_capacity(documents.len());
    for (path, contents, count) in documents {
        let staging = staging_path(path);
        debug!(path = %staging.display(), count, "Staging output");
        if let Err(source) = tokio::fs::write(&staging, contents).await {
            discard(&staged).await;
            return Err(SyncError::Io {
                path: staging,
                source,
            });
        }
        staged.push((staging, path, count));
    }

    for (idx, (staging, path, count)) in staged.iter().enumerate() {
        info!(path = %path.display(), count, "Writing output");
        if let Err(source) = tokio::fs::rename(staging, path).await {
            discard(&staged[idx..]).await;
            return Err(SyncError::Io {
                path: (*path).clone(),
                source,
            });
        }
    }

    Ok(paths)
}

async fn discard(staged: &[(PathBuf, &PathBuf, usize)]) {
    for (staging, _, _) in staged {
        if let Err(err) = tokio::fs::remove_file(staging).await {
            warn!(path = %staging.display(), error = %err, "Failed to remove staged output");
        }
    }
}
