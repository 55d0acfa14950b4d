use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::debug;

use crate::keywords::{RelativeDay, Vocabulary};

/// Format used when a relative word is written back into the text as a date.
/// It is one of the shapes the single-date pattern understands.
pub const SUBSTITUTION_FORMAT: &str = "%Y/%m/%d";

/// Accepted timestamp shapes when reading stored events or model output.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// The current local time, truncated to whole seconds.
///
/// Parsers never call this themselves; it is what a caller passes in when it
/// wants "now" as the reference time.
pub fn reference_now() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Resolves a relative day against the reference time.
///
/// # Examples
///
/// ```
/// # use chrono::NaiveDate;
/// # use nlcal_core::dates::resolve_relative;
/// # use nlcal_core::keywords::RelativeDay;
/// let reference = NaiveDate::from_ymd_opt(2025, 4, 30)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
///
/// assert_eq!(
///     resolve_relative(reference, RelativeDay::DayAfterTomorrow),
///     NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
/// );
/// ```
pub fn resolve_relative(reference: NaiveDateTime, day: RelativeDay) -> NaiveDate {
    reference.date() + Duration::days(day.offset_days())
}

/// Replaces every relative word in `text` with the date it resolves to,
/// written as ` YYYY/MM/DD ` (padded, so `今日20時` cannot fuse into one number).
///
/// Longer words are replaced first, so `明後日` is never read as `明日` + `後`.
pub fn substitute_relative(
    text: &str,
    reference: NaiveDateTime,
    vocabulary: &Vocabulary,
) -> String {
    let mut out = text.to_string();
    for (word, day) in vocabulary.words_longest_first() {
        if !out.contains(word) {
            continue;
        }
        let resolved = resolve_relative(reference, day)
            .format(SUBSTITUTION_FORMAT)
            .to_string();
        debug!(word, %resolved, "substituting relative day");
        out = out.replace(word, &format!(" {resolved} "));
    }
    out
}

/// Builds a calendar date, or `None` if it does not exist (e.g. 2025/2/30).
pub fn date_from_parts(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Reads a local timestamp such as `2025-04-01T20:00:00` (seconds, fraction and
/// the `T` are optional). A bare `YYYY-MM-DD` is read as midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TIMESTAMP_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .next()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .map(start_of_day)
        })
}
