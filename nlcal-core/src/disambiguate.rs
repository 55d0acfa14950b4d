//! Turns a [`MatchSet`] into a start, an end and an all-day flag.
//!
//! Precedence, first applicable wins:
//!
//! 1. date range: whole days, end date inclusive, times ignored; a range
//!    written backwards is read with its ends swapped
//! 2. single date, refined by a time range, then a single time, else all day
//! 3. time range on the reference date
//! 4. single time on the reference date
//! 5. nothing: the day after the reference time, one hour, all day

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use strum_macros::AsRefStr;
use tracing::debug;

use crate::dates::start_of_day;
use crate::event::end_after;
use crate::patterns::MatchSet;

/// Which rule produced a [`Schedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Branch {
    DateRange,
    DateWithTimeRange,
    DateWithTime,
    DateOnly,
    TimeRange,
    TimeOnly,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub branch: Branch,
}

/// Picks the schedule for a set of matches. Pure: same input, same output.
///
/// # Examples
///
/// ```
/// # use chrono::{NaiveDate, NaiveTime};
/// # use nlcal_core::disambiguate::{resolve, Branch};
/// # use nlcal_core::patterns::MatchSet;
/// let reference = NaiveDate::from_ymd_opt(2025, 4, 1)
///     .unwrap()
///     .and_hms_opt(9, 0, 0)
///     .unwrap();
/// let matches = MatchSet {
///     single_time: NaiveTime::from_hms_opt(20, 0, 0),
///     ..Default::default()
/// };
///
/// let schedule = resolve(&matches, reference);
///
/// assert_eq!(schedule.branch, Branch::TimeOnly);
/// assert_eq!(schedule.start.to_string(), "2025-04-01 20:00:00");
/// assert_eq!(schedule.end.to_string(), "2025-04-01 21:00:00");
/// assert!(!schedule.all_day);
/// ```
pub fn resolve(matches: &MatchSet, reference: NaiveDateTime) -> Schedule {
    let schedule = if let Some((a, b)) = matches.date_range {
        let (first, last) = if a <= b { (a, b) } else { (b, a) };
        whole_days(first, last + Duration::days(1), Branch::DateRange)
    } else if let Some(date) = matches.single_date {
        on_date(date, matches).unwrap_or_else(|| {
            whole_days(date, date + Duration::days(1), Branch::DateOnly)
        })
    } else if let Some((from, to)) = matches.time_range {
        timed_range(reference.date(), from, to, Branch::TimeRange)
    } else if let Some(at) = matches.single_time {
        one_hour(reference.date(), at, Branch::TimeOnly)
    } else {
        let start = reference + Duration::days(1);
        Schedule {
            start,
            end: start + Duration::hours(1),
            all_day: true,
            branch: Branch::Fallback,
        }
    };
    let branch: &str = schedule.branch.as_ref();
    debug!(
        branch,
        start = %schedule.start,
        end = %schedule.end,
        all_day = schedule.all_day,
        "resolved schedule"
    );
    schedule
}

/// A single date refined by a clock time, if one was matched.
fn on_date(date: NaiveDate, matches: &MatchSet) -> Option<Schedule> {
    if let Some((from, to)) = matches.time_range {
        return Some(timed_range(date, from, to, Branch::DateWithTimeRange));
    }
    matches
        .single_time
        .map(|at| one_hour(date, at, Branch::DateWithTime))
}

fn whole_days(first: NaiveDate, end: NaiveDate, branch: Branch) -> Schedule {
    Schedule {
        start: start_of_day(first),
        end: start_of_day(end),
        all_day: true,
        branch,
    }
}

fn timed_range(date: NaiveDate, from: NaiveTime, to: NaiveTime, branch: Branch) -> Schedule {
    let start = date.and_time(from);
    Schedule {
        start,
        end: end_after(start, date.and_time(to)),
        all_day: false,
        branch,
    }
}

fn one_hour(date: NaiveDate, at: NaiveTime, branch: Branch) -> Schedule {
    let start = date.and_time(at);
    Schedule {
        start,
        end: start + Duration::hours(1),
        all_day: false,
        branch,
    }
}
