pub mod columns;
pub mod errors;
pub mod fold;
pub mod links;
pub mod model;
pub mod row;
pub mod speakers;
pub mod time;
pub mod tracklist;
pub mod validation;

pub use errors::{DuplicateSessionId, ParserError};
pub use fold::{FoldState, ScheduleContext, TrackSummary};
pub use model::{Schedule, Session, SessionSpeaker, SetOnce, Speaker, Track, TrackRef};
pub use row::Row;
pub use speakers::{speaker_from_row, SpeakerRegistry};
pub use time::TimeResolver;
pub use tracklist::parse_tracklist;
pub use validation::{find_duplicate_session_ids, validate_sessions};
