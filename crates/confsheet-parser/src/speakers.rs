use std::collections::HashMap;

use tracing::debug;

use crate::columns;
use crate::links::{ensure_social_link, is_web_url, GITHUB, LINKEDIN, TWITTER};
use crate::model::Speaker;
use crate::row::Row;

/// Builds the speaker described by a row, or `None` when the row has no given name.
///
/// The returned speaker has id 0 until it goes through [`SpeakerRegistry::resolve`].
pub fn speaker_from_row(row: &Row) -> Option<Speaker> {
    let given = row.get(columns::GIVEN_NAME);
    if given.is_empty() {
        return None;
    }
    let name = format!("{} {}", given.trim(), row.get(columns::FAMILY_NAME).trim())
        .trim()
        .to_string();

    Some(Speaker {
        id: 0,
        name,
        organisation: row.get(columns::ORGANISATION).to_string(),
        web: row.get(columns::WEBSITE).to_string(),
        linkedin: linkedin_url(row),
        biography: row.get(columns::BIOGRAPHY).to_string(),
        github: ensure_social_link(GITHUB, row.get(columns::GITHUB)),
        twitter: ensure_social_link(TWITTER, row.get(columns::TWITTER)),
        country: row.get(columns::COUNTRY).to_string(),
        photo: photo_url(row),
    })
}

fn linkedin_url(row: &Row) -> String {
    row.find_containing(columns::LINKEDIN_MARKER)
        .next()
        .map(|value| ensure_social_link(LINKEDIN, value.trim()))
        .unwrap_or_default()
}

fn photo_url(row: &Row) -> String {
    let candidates: Vec<&str> = columns::PHOTO_MARKERS
        .iter()
        .flat_map(|marker| row.find_containing(marker))
        .collect();
    candidates
        .iter()
        .find(|value| is_web_url(value))
        .or_else(|| candidates.first())
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}

/// Run-wide speaker identities keyed by full name.
#[derive(Debug, Default)]
pub struct SpeakerRegistry {
    ids: HashMap<String, usize>,
    speakers: Vec<Speaker>,
}

impl SpeakerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gives `candidate` its run-wide id.
    ///
    /// A name seen before keeps its first id and the stored record is left untouched; the
    /// returned speaker still carries the candidate's own details. An unseen name gets the
    /// next id and is stored.
    pub fn resolve(&mut self, mut candidate: Speaker) -> Speaker {
        if let Some(&idx) = self.ids.get(&candidate.name) {
            let stored = &self.speakers[idx];
            candidate.id = stored.id;
            if !stored.same_details(&candidate) {
                debug!(
                    speaker_id = stored.id,
                    name = %stored.name,
                    "Ignoring differing details for known speaker"
                );
            }
            return candidate;
        }

        candidate.id = u32::try_from(self.speakers.len() + 1).unwrap_or(u32::MAX);
        self.ids.insert(candidate.name.clone(), self.speakers.len());
        self.speakers.push(candidate.clone());
        candidate
    }

    pub fn get(&self, name: &str) -> Option<&Speaker> {
        self.ids.get(name).map(|&idx| &self.speakers[idx])
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn into_speakers(self) -> Vec<Speaker> {
        self.speakers
    }
}
