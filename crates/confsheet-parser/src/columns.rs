//! Header names the track and tracklist sheets are read by.

pub const SESSION_ID: &str = "SessionID";
pub const GIVEN_NAME: &str = "Given Name";
pub const FAMILY_NAME: &str = "Family Name";
pub const ORGANISATION: &str = "Company, Organization, Project or University";
pub const WEBSITE: &str = "Website or Blog";
pub const BIOGRAPHY: &str = "Please provide a short bio for the program";
pub const GITHUB: &str = "github";
pub const TWITTER: &str = "twitter";
pub const COUNTRY: &str = "Country/Region of Origin";
pub const DATE: &str = "Date";
pub const TIME: &str = "Time";
pub const TOPIC: &str = "Topic of your contribution";
pub const ABSTRACT: &str = "Abstract of talk or project";
pub const SIGN_UP: &str = "Sign up";
pub const VIDEO: &str = "Video";
pub const SLIDES: &str = "Slideshow";
pub const PROPOSAL_TYPE: &str = "Type of Proposal";
pub const LOCATION: &str = "Location";

/// Matched against header names, not equal to them.
pub const LINKEDIN_MARKER: &str = "linkedin";
pub const PHOTO_MARKERS: [&str; 2] = ["photo", "picture"];

pub const TRACK: &str = "Track";
pub const HEADER_LINE: &str = "Header Line";
pub const KEY_COLOR: &str = "Key Color";
pub const ROOM: &str = "Room";
pub const GID: &str = "GID";
