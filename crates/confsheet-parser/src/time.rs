use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One accepted spelling of a date/time cell pair.
///
/// Text is split on whitespace runs and must have exactly `tokens` tokens with nothing
/// around them. The weekday token is checked for being a weekday name and then dropped
/// before the rest is handed to chrono, so a weekday that disagrees with the date still
/// parses. Month names must be spelled out.
struct DatePattern {
    tokens: usize,
    weekday_at: usize,
    month_at: usize,
    format: &'static str,
    assume_am: bool,
}

// Order matters: the first pattern that matches wins.
const DATE_PATTERNS: [DatePattern; 3] = [
    // 2016 Monday August 1 10:00 AM
    DatePattern {
        tokens: 6,
        weekday_at: 1,
        month_at: 2,
        format: "%Y %B %d %I:%M %p",
        assume_am: false,
    },
    // 2016 Monday August 1 10.00 AM
    DatePattern {
        tokens: 6,
        weekday_at: 1,
        month_at: 2,
        format: "%Y %B %d %I.%M %p",
        assume_am: false,
    },
    // Monday August 1, 2016 10:00 (no meridiem, read as AM)
    DatePattern {
        tokens: 5,
        weekday_at: 0,
        month_at: 1,
        format: "%B %d, %Y %I:%M %p",
        assume_am: true,
    },
];

fn is_name_in(token: &str, names: &[&str]) -> bool {
    names.contains(&token.to_lowercase().as_str())
}

impl DatePattern {
    fn parse(&self, text: &str) -> Option<NaiveDateTime> {
        if text.trim() != text {
            return None;
        }
        let tokens: Vec<&str> = text.split_whitespace().collect();
        if tokens.len() != self.tokens
            || !is_name_in(tokens[self.weekday_at], &WEEKDAYS)
            || !is_name_in(tokens[self.month_at], &MONTHS)
        {
            return None;
        }

        let mut rest = tokens
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != self.weekday_at)
            .map(|(_, token)| *token)
            .collect::<Vec<_>>()
            .join(" ");
        if self.assume_am {
            rest.push_str(" AM");
        }

        NaiveDateTime::parse_from_str(&rest, self.format).ok()
    }
}

/// Reads the free-text `Date` and `Time` cells of a track sheet as a UTC instant.
#[derive(Debug, Clone)]
pub struct TimeResolver {
    year: String,
    timezone: Tz,
}

impl TimeResolver {
    pub fn new(year: impl Into<String>, timezone: Tz) -> Self {
        Self {
            year: year.into(),
            timezone,
        }
    }

    pub fn year(&self) -> &str {
        &self.year
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn resolve(&self, date: &str, time: &str) -> Option<DateTime<Utc>> {
        self.resolve_text(&format!("{date} {time}"))
    }

    /// Returns `None` when no pattern matches; callers treat that as "no time on this row".
    pub fn resolve_text(&self, text: &str) -> Option<DateTime<Utc>> {
        let text = if text.contains(&self.year) {
            text.to_string()
        } else {
            format!("{} {text}", self.year)
        };

        let naive = DATE_PATTERNS
            .iter()
            .find_map(|pattern| pattern.parse(&text))?;
        Some(self.localize(naive))
    }

    fn localize(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        match self.timezone.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(a, b) => {
                // standard time carries the smaller offset
                let off_a = a.offset().fix().local_minus_utc();
                let off_b = b.offset().fix().local_minus_utc();
                if off_a <= off_b {
                    a.with_timezone(&Utc)
                } else {
                    b.with_timezone(&Utc)
                }
            }
            LocalResult::None => {
                let standard = self
                    .timezone
                    .offset_from_utc_datetime(&(naive - Duration::hours(6)))
                    .fix();
                (naive - Duration::seconds(i64::from(standard.local_minus_utc()))).and_utc()
            }
        }
    }
}
