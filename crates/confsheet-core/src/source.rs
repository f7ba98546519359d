//! Where raw sheet text comes from: the spreadsheet's TSV export, or a directory of saved exports.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::error::{Result, SyncError};

pub const EXPORT_BASE_URL: &str = "https://docs.google.com/spreadsheets/d";

#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Returns the raw TSV text of the sheet with grid id `gid`.
    async fn fetch(&self, gid: &str) -> Result<String>;
}

#[derive(Debug, Clone)]
pub struct HttpSheetSource {
    client: Client,
    base_url: String,
    sheet_id: String,
}

impl HttpSheetSource {
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self::with_base_url(EXPORT_BASE_URL, sheet_id)
    }

    pub fn with_base_url(base_url: impl Into<String>, sheet_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            sheet_id: sheet_id.into(),
        }
    }

    pub fn export_url(&self, gid: &str) -> String {
        format!(
            "{}/{}/export?format=tsv&gid={gid}",
            self.base_url, self.sheet_id
        )
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch(&self, gid: &str) -> Result<String> {
        let url = self.export_url(gid);
        info!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SyncError::Http {
                gid: gid.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Status {
                gid: gid.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| SyncError::Http {
            gid: gid.to_string(),
            source,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySheetSource {
    dir: PathBuf,
}

impl DirectorySheetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn sheet_path(&self, gid: &str) -> PathBuf {
        self.dir.join(format!("{gid}.tsv"))
    }
}

#[async_trait]
impl SheetSource for DirectorySheetSource {
    async fn fetch(&self, gid: &str) -> Result<String> {
        let path = self.sheet_path(gid);
        info!(path = %path.display(), "Reading sheet");
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|source| SyncError::Io { path, source })
    }
}
