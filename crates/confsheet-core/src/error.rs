use std::path::PathBuf;

use confsheet_parser::ParserError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to fetch sheet {gid}: {source}")]
    Http {
        gid: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("sheet {gid} returned HTTP {status}")]
    Status {
        gid: String,
        status: reqwest::StatusCode,
    },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

pub type Result<T> = std::result::Result<T, SyncError>;
