use std::collections::BTreeMap;

use crate::errors::{DuplicateSessionId, ParserError};
use crate::model::Session;

/// Session ids used by more than one session, sorted by id.
pub fn find_duplicate_session_ids(sessions: &[Session]) -> Vec<DuplicateSessionId> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for session in sessions {
        *counts.entry(session.session_id.as_str()).or_insert(0) += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(session_id, count)| DuplicateSessionId {
            session_id: session_id.to_string(),
            count,
        })
        .collect()
}

pub fn validate_sessions(sessions: &[Session]) -> Result<(), ParserError> {
    let duplicates = find_duplicate_session_ids(sessions);
    if duplicates.is_empty() {
        Ok(())
    } else {
        Err(ParserError::DuplicateSessionIds { duplicates })
    }
}
