use std::fmt;

use thiserror::Error;

/// A session id that appeared on more than one folded session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateSessionId {
    pub session_id: String,
    pub count: usize,
}

impl fmt::Display for DuplicateSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (x{})", self.session_id, self.count)
    }
}

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("{sheet} TSV error: {source}")]
    Csv {
        sheet: String,
        #[source]
        source: csv::Error,
    },

    #[error("tracklist line {line} has an invalid header line '{value}'")]
    InvalidHeaderLine { line: u64, value: String },

    #[error("duplicate session ids: {}", join_duplicates(.duplicates))]
    DuplicateSessionIds { duplicates: Vec<DuplicateSessionId> },
}

fn join_duplicates(duplicates: &[DuplicateSessionId]) -> String {
    duplicates
        .iter()
        .map(|dup| dup.session_id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
