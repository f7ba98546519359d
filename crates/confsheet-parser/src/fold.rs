use chrono::Duration;
use tracing::debug;

use crate::columns;
use crate::errors::ParserError;
use crate::model::{non_empty, Schedule, Session, Track};
use crate::row::{line_of, tsv_reader, Row};
use crate::speakers::{speaker_from_row, SpeakerRegistry};
use crate::time::TimeResolver;

/// Where the fold of one track's rows currently stands.
///
/// Reset for every track, so a session never continues across sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FoldState {
    /// Index into the run's session list.
    pub last_session: Option<usize>,
    pub last_speaker: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSummary {
    pub track: String,
    pub rows: usize,
    pub skipped_rows: usize,
    pub sessions_started: usize,
    pub speakers_added: usize,
    pub found_header: bool,
}

/// Accumulates sessions and speakers across every track of a run.
#[derive(Debug)]
pub struct ScheduleContext {
    sessions: Vec<Session>,
    speakers: SpeakerRegistry,
    time: TimeResolver,
    session_length: Duration,
}

impl ScheduleContext {
    pub fn new(time: TimeResolver, session_length: Duration) -> Self {
        Self {
            sessions: Vec::new(),
            speakers: SpeakerRegistry::new(),
            time,
            session_length,
        }
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn speakers(&self) -> &SpeakerRegistry {
        &self.speakers
    }

    /// Folds a whole track sheet. Lines before the track's header line are preamble.
    pub fn fold_track(&mut self, track: &Track, content: &str) -> Result<TrackSummary, ParserError> {
        let sessions_before = self.sessions.len();
        let speakers_before = self.speakers.len();
        let mut summary = TrackSummary {
            track: track.name.clone(),
            ..TrackSummary::default()
        };

        let mut headers: Option<Vec<String>> = None;
        let mut state = FoldState::default();
        let mut reader = tsv_reader(content);

        for record in reader.records() {
            let record = record.map_err(|source| ParserError::Csv {
                sheet: track.name.clone(),
                source,
            })?;
            let line = line_of(&record);
            if line == track.header_line {
                headers = Some(Row::headers(&record));
                continue;
            }
            let Some(headers) = headers.as_deref() else {
                continue;
            };

            summary.rows += 1;
            let row = Row::associate(headers, &record);
            match self.fold_row(&row, track, state) {
                Some(next) => state = next,
                None => summary.skipped_rows += 1,
            }
        }

        summary.found_header = headers.is_some();
        summary.sessions_started = self.sessions.len() - sessions_before;
        summary.speakers_added = self.speakers.len() - speakers_before;
        debug!(
            track = %track.name,
            rows = summary.rows,
            skipped = summary.skipped_rows,
            sessions = summary.sessions_started,
            "Folded track"
        );
        Ok(summary)
    }

    /// Folds one row into the run. Returns `None` for rows without a session id, which leave
    /// the fold state untouched.
    pub fn fold_row(&mut self, row: &Row, track: &Track, state: FoldState) -> Option<FoldState> {
        let session_id = row.get(columns::SESSION_ID);
        if session_id.is_empty() {
            return None;
        }

        let session_idx = match state.last_session {
            Some(idx) if self.sessions[idx].session_id == session_id => idx,
            _ => {
                self.sessions.push(Session::new(session_id));
                self.sessions.len() - 1
            }
        };

        let mut speaker = speaker_from_row(row).map(|candidate| self.speakers.resolve(candidate));
        let row_time = self.time.resolve(row.get(columns::DATE), row.get(columns::TIME));
        let session = &mut self.sessions[session_idx];

        if let Some(start) = row_time {
            session.end_time = Some(start + self.session_length);
            if session.start_time.is_none() {
                session.start_time = Some(start);
            }
        }

        // Every field is settled by the session's first row, even when that row leaves it blank.
        if !session.title.is_set() {
            let topic = row.get(columns::TOPIC);
            let title = if topic.is_empty() {
                // a named row without a topic titles the session instead of presenting in it
                speaker.take().map(|spent| spent.name).unwrap_or_default()
            } else {
                topic.to_string()
            };
            session.title.offer(Some(title));
        }

        session
            .description
            .offer(Some(row.get(columns::ABSTRACT).to_string()));
        session.sign_up.offer(non_empty(row.get(columns::SIGN_UP)));
        session.video.offer(non_empty(row.get(columns::VIDEO)));
        session.slides.offer(non_empty(row.get(columns::SLIDES)));
        session
            .session_type
            .offer(Some(row.get(columns::PROPOSAL_TYPE).to_string()));
        if !session.track.is_set() {
            session.track.offer(Some(track.reference()));
        }
        if !session.location.is_set() {
            let location = non_empty(row.get(columns::LOCATION))
                .unwrap_or_else(|| track.location.clone());
            session.location.offer(Some(location));
        }

        if let Some(speaker) = &speaker {
            session.speakers.push(speaker.as_session_speaker());
        }

        Some(FoldState {
            last_session: Some(session_idx),
            last_speaker: speaker.map(|s| s.id).or(state.last_speaker),
        })
    }

    pub fn into_schedule(self) -> Schedule {
        Schedule {
            sessions: self.sessions,
            speakers: self.speakers.into_speakers(),
        }
    }
}
