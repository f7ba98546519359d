use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// One row of the tracklist sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub id: u64,
    pub name: String,
    pub header_line: u64,
    pub key_color: String,
    pub location: String,
    pub gid: String,
    pub order: u64,
}

impl Track {
    pub fn reference(&self) -> TrackRef {
        TrackRef {
            id: self.id,
            name: self.name.clone(),
            order: self.order,
        }
    }
}

/// The subset of a track embedded in every session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackRef {
    pub id: u64,
    pub name: String,
    pub order: u64,
}

/// A field that takes whatever the first assignment gives it, including nothing, and ignores
/// every later one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOnce<T>(Option<Option<T>>);

impl<T> Default for SetOnce<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> SetOnce<T> {
    /// Marks the field as set to `value` unless it was set before. Returns whether it was taken.
    pub fn offer(&mut self, value: Option<T>) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(value);
        true
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref().and_then(Option::as_ref)
    }
}

impl<T: Serialize> Serialize for SetOnce<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.get().serialize(serializer)
    }
}

fn text_or_empty<S: Serializer>(value: &SetOnce<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(value.get().map(String::as_str).unwrap_or_default())
}

fn iso_timestamp<S: Serializer>(
    value: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
        None => serializer.serialize_none(),
    }
}

/// Speaker entry embedded in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSpeaker {
    pub name: String,
    pub id: u32,
    pub organisation: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub session_id: String,
    #[serde(serialize_with = "text_or_empty")]
    pub title: SetOnce<String>,
    #[serde(serialize_with = "text_or_empty")]
    pub description: SetOnce<String>,
    #[serde(
        serialize_with = "iso_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        serialize_with = "iso_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(rename = "type", serialize_with = "text_or_empty")]
    pub session_type: SetOnce<String>,
    pub track: SetOnce<TrackRef>,
    #[serde(serialize_with = "text_or_empty")]
    pub location: SetOnce<String>,
    pub sign_up: SetOnce<String>,
    pub video: SetOnce<String>,
    pub slides: SetOnce<String>,
    pub speakers: Vec<SessionSpeaker>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            title: SetOnce::default(),
            description: SetOnce::default(),
            start_time: None,
            end_time: None,
            session_type: SetOnce::default(),
            track: SetOnce::default(),
            location: SetOnce::default(),
            sign_up: SetOnce::default(),
            video: SetOnce::default(),
            slides: SetOnce::default(),
            speakers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Speaker {
    pub id: u32,
    pub name: String,
    pub organisation: String,
    pub web: String,
    pub linkedin: String,
    pub biography: String,
    pub github: String,
    pub twitter: String,
    pub country: String,
    pub photo: String,
}

impl Speaker {
    pub fn as_session_speaker(&self) -> SessionSpeaker {
        SessionSpeaker {
            name: self.name.clone(),
            id: self.id,
            organisation: self.organisation.clone(),
        }
    }

    /// True when every field besides the id matches.
    pub fn same_details(&self, other: &Speaker) -> bool {
        Speaker { id: other.id, ..self.clone() } == *other
    }
}

/// Everything folded out of one run, ready for validation and output.
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    pub sessions: Vec<Session>,
    pub speakers: Vec<Speaker>,
}

pub(crate) fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
