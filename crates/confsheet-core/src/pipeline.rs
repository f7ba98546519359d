use confsheet_parser::{
    parse_tracklist, validate_sessions, DuplicateSessionId, ParserError, Schedule,
    ScheduleContext, Track, TrackSummary,
};
use tracing::{error, info, warn};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::outputs::{write_outputs, OutputPaths};
use crate::source::SheetSource;

/// Tracks and the schedule folded from their sheets, before validation.
#[derive(Debug, Clone)]
pub struct CollectedSchedule {
    pub tracks: Vec<Track>,
    pub schedule: Schedule,
    pub summaries: Vec<TrackSummary>,
}

#[derive(Debug, Clone)]
pub enum SyncOutcome {
    Written {
        paths: OutputPaths,
        tracks: usize,
        sessions: usize,
        speakers: usize,
    },
    /// Nothing was written.
    DuplicateSessionIds(Vec<DuplicateSessionId>),
}

/// Fetches the tracklist, then every track sheet in listed order, folding them into one
/// schedule. Tracks without a grid id are listed but never fetched.
pub async fn collect_schedule(
    config: &SyncConfig,
    source: &dyn SheetSource,
) -> Result<CollectedSchedule> {
    info!(gid = %config.tracklist_gid, "Fetching tracklist");
    let tracklist = source.fetch(&config.tracklist_gid).await?;
    let tracks = parse_tracklist(&tracklist)?;
    info!(count = tracks.len(), "Parsed tracklist");

    let mut context = ScheduleContext::new(config.time_resolver(), config.session_length);
    let mut summaries = Vec::new();

    let fetchable = tracks
        .iter()
        .filter(|track| !track.gid.is_empty())
        .take(config.max_tracks.unwrap_or(usize::MAX));
    for track in fetchable {
        info!(track = %track.name, gid = %track.gid, "Fetching track");
        let content = source.fetch(&track.gid).await?;

        info!(track = %track.name, "Parsing track");
        let summary = context.fold_track(track, &content)?;
        if !summary.found_header {
            warn!(
                track = %track.name,
                header_line = track.header_line,
                "Track sheet ended before its header line"
            );
        }
        summaries.push(summary);
    }

    Ok(CollectedSchedule {
        tracks,
        schedule: context.into_schedule(),
        summaries,
    })
}

/// Full run: collect, reject duplicate session ids, then write all three outputs.
pub async fn run(config: &SyncConfig, source: &dyn SheetSource) -> Result<SyncOutcome> {
    let collected = collect_schedule(config, source).await?;

    info!("Validating sessions");
    match validate_sessions(&collected.schedule.sessions) {
        Ok(()) => {}
        Err(ParserError::DuplicateSessionIds { duplicates }) => {
            let ids = duplicates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            error!(duplicates = %ids, "Duplicate session ids");
            return Ok(SyncOutcome::DuplicateSessionIds(duplicates));
        }
        Err(err) => return Err(err.into()),
    }
    info!("All sessions valid");

    let paths = write_outputs(
        &config.output_dir,
        &collected.schedule,
        &collected.tracks,
    )
    .await?;

    Ok(SyncOutcome::Written {
        paths,
        tracks: collected.tracks.len(),
        sessions: collected.schedule.sessions.len(),
        speakers: collected.schedule.speakers.len(),
    })
}
