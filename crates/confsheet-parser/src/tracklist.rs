use crate::columns;
use crate::errors::ParserError;
use crate::model::Track;
use crate::row::{line_of, tsv_reader, Row};

const TRACKLIST: &str = "tracklist";
const TRACKLIST_HEADER_LINE: u64 = 1;

/// Reads the tracklist sheet. Rows without a header line are not tracks and are skipped.
///
/// A track's id and order are both the line it sits on.
pub fn parse_tracklist(content: &str) -> Result<Vec<Track>, ParserError> {
    let mut reader = tsv_reader(content);
    let mut headers: Option<Vec<String>> = None;
    let mut tracks = Vec::new();

    for record in reader.records() {
        let record = record.map_err(|source| ParserError::Csv {
            sheet: TRACKLIST.to_string(),
            source,
        })?;
        let line = line_of(&record);
        if line == TRACKLIST_HEADER_LINE {
            headers = Some(Row::headers(&record));
            continue;
        }
        let Some(headers) = headers.as_deref() else {
            continue;
        };

        let row = Row::associate(headers, &record);
        let header_line = row.get(columns::HEADER_LINE);
        if header_line.is_empty() {
            continue;
        }
        let header_line =
            header_line
                .trim()
                .parse::<u64>()
                .map_err(|_| ParserError::InvalidHeaderLine {
                    line,
                    value: header_line.to_string(),
                })?;

        tracks.push(Track {
            id: line,
            name: row.get(columns::TRACK).to_string(),
            header_line,
            key_color: row.get(columns::KEY_COLOR).to_string(),
            location: row.get(columns::ROOM).to_string(),
            gid: row.get(columns::GID).to_string(),
            order: line,
        });
    }

    Ok(tracks)
}
