//! Lexical patterns for dates, times and durations.
//!
//! Every pattern is declared once in [`PATTERNS`] together with an interpreter
//! that validates a match and turns it into a [`Token`]. A regex match the
//! interpreter rejects (hour 24, 2025/2/30, the `3時` of `3時間`) does not count
//! as a match at all.
//!
//! Fullwidth digits, colons and slashes (`１５：３０`, `２０２５／４／１`) are
//! read as their ASCII forms; see [`normalize_width`].

use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::ops::Range;
use strum_macros::{AsRefStr, EnumIter};

use crate::dates::date_from_parts;

/// Characters and words that join the two ends of a range ("から", "〜", "-").
const RANGE_SEPARATOR: &str = r"(?:[\s〜～~\-－ー]|から)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum PatternKind {
    TimeRange,
    SingleTime,
    DateRange,
    SingleDate,
    /// Only removed from titles; never drives scheduling.
    Duration,
}

/// The value behind a validated match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Date(DateFilter),
    Time(TimeFilter),
    /// A length of time such as `3時間`; only ever stripped from titles.
    Duration,
}

/// A matched date, which can be a single day or an inclusive range of days.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DateFilter {
    Single(NaiveDate),
    Range(NaiveDate, NaiveDate),
}

/// A matched clock time, which can be a single time or a start/end pair.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TimeFilter {
    Single(NaiveTime),
    Range(NaiveTime, NaiveTime),
}

/// A pattern definition: regex + kind + interpreter.
pub struct PatternDef {
    pub kind: PatternKind,
    pub regex: &'static Lazy<Regex>,
    /// Validates the captures and converts them; `None` rejects the match.
    pub interpret: fn(&Captures) -> Option<Token>,
}

static TIME_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<sh>[0-9]{{1,2}})(?::|時)(?:(?P<sm>[0-9]{{1,2}})分?|(?P<shalf>半))?{RANGE_SEPARATOR}+(?P<eh>[0-9]{{1,2}})(?::|時)(?:(?P<em>[0-9]{{1,2}})分?|(?P<ehalf>半))?(?P<dur>間)?(?:まで)?"
    ))
    .expect("valid time range pattern")
});

static SINGLE_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<h>[0-9]{1,2})(?::|時)(?:(?P<m>[0-9]{1,2})分?|(?P<half>半))?(?P<dur>間)?(?:から|まで)?",
    )
    .expect("valid single time pattern")
});

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?P<y1>[0-9]{{4}})[/年\-](?P<mo1>[0-9]{{1,2}})[/月\-](?P<d1>[0-9]{{1,2}})日?{RANGE_SEPARATOR}*(?P<y2>[0-9]{{4}})[/年\-](?P<mo2>[0-9]{{1,2}})[/月\-](?P<d2>[0-9]{{1,2}})日?(?:まで)?"
    ))
    .expect("valid date range pattern")
});

static SINGLE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<y>[0-9]{4})[/年\-](?P<mo>[0-9]{1,2})[/月\-](?P<d>[0-9]{1,2})日?")
        .expect("valid single date pattern")
});

static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<h>[0-9]{1,3})時間(?:(?P<hm>[0-9]{1,2})分)?(?P<half>半)?|(?P<m>[0-9]{1,4})分間")
        .expect("valid duration pattern")
});

/// All pattern definitions, in the order they are applied when stripping titles.
pub static PATTERNS: &[PatternDef] = &[
    PatternDef {
        kind: PatternKind::TimeRange,
        regex: &TIME_RANGE,
        interpret: interpret_time_range,
    },
    PatternDef {
        kind: PatternKind::SingleTime,
        regex: &SINGLE_TIME,
        interpret: interpret_single_time,
    },
    PatternDef {
        kind: PatternKind::DateRange,
        regex: &DATE_RANGE,
        interpret: interpret_date_range,
    },
    PatternDef {
        kind: PatternKind::SingleDate,
        regex: &SINGLE_DATE,
        interpret: interpret_single_date,
    },
    PatternDef {
        kind: PatternKind::Duration,
        regex: &DURATION,
        interpret: interpret_duration,
    },
];

/// Looks up the definition of a kind.
pub fn pattern(kind: PatternKind) -> &'static PatternDef {
    PATTERNS
        .iter()
        .find(|def| def.kind == kind)
        .expect("every pattern kind has a definition")
}

/// The first-valid match of each scheduling category, for one input.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MatchSet {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub single_date: Option<NaiveDate>,
    pub time_range: Option<(NaiveTime, NaiveTime)>,
    pub single_time: Option<NaiveTime>,
}

impl MatchSet {
    /// Runs every scheduling pattern against `text`, independently.
    ///
    /// A date range match does not stop the single date pattern from being
    /// tried; deciding which one wins is the disambiguation step's job.
    pub fn scan(text: &str) -> Self {
        let text = normalize_width(text);
        let text = text.as_ref();
        let date_range = match first_match(PatternKind::DateRange, text) {
            Some((_, Token::Date(DateFilter::Range(start, end)))) => Some((start, end)),
            _ => None,
        };
        let single_date = match first_match(PatternKind::SingleDate, text) {
            Some((_, Token::Date(DateFilter::Single(date)))) => Some(date),
            _ => None,
        };
        let time_range = match first_match(PatternKind::TimeRange, text) {
            Some((_, Token::Time(TimeFilter::Range(start, end)))) => Some((start, end)),
            _ => None,
        };
        let single_time = match first_match(PatternKind::SingleTime, text) {
            Some((_, Token::Time(TimeFilter::Single(time)))) => Some(time),
            _ => None,
        };
        Self {
            date_range,
            single_date,
            time_range,
            single_time,
        }
    }
}

/// Finds the leftmost match of `kind` that its interpreter accepts.
///
/// A rejected match does not hide a valid one that starts inside it: scanning
/// resumes one character after the rejected match's start. Matches never start
/// in the middle of a number, so a rejected `25時` does not come back as `5時`.
pub fn first_match(kind: PatternKind, text: &str) -> Option<(Range<usize>, Token)> {
    let def = pattern(kind);
    let mut pos = 0;
    while pos <= text.len() {
        let caps = def.regex.captures_at(text, pos)?;
        let whole = caps.get(0)?;
        if !starts_mid_number(text, whole.start()) {
            if let Some(token) = (def.interpret)(&caps) {
                return Some((whole.range(), token));
            }
        }
        pos = next_char_boundary(text, whole.start());
    }
    None
}

/// All non-overlapping matches of `kind` that its interpreter accepts, left to right.
pub fn all_matches(kind: PatternKind, text: &str) -> Vec<Range<usize>> {
    let def = pattern(kind);
    let mut found = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(caps) = def.regex.captures_at(text, pos) else {
            break;
        };
        let Some(whole) = caps.get(0) else {
            break;
        };
        if !starts_mid_number(text, whole.start()) && (def.interpret)(&caps).is_some() {
            found.push(whole.range());
            pos = whole.end().max(next_char_boundary(text, whole.start()));
        } else {
            pos = next_char_boundary(text, whole.start());
        }
    }
    found
}

/// Removes every valid match of `kind` from `text`.
pub fn remove_all(kind: PatternKind, text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for range in all_matches(kind, text) {
        out.push_str(&text[last..range.start]);
        last = range.end;
    }
    out.push_str(&text[last..]);
    out
}

/// Rewrites fullwidth digits, `：` and `／` as ASCII. Borrows when there is
/// nothing to rewrite.
///
/// ```
/// # use nlcal_core::patterns::normalize_width;
/// assert_eq!(normalize_width("明日１５：３０"), "明日15:30");
/// assert_eq!(normalize_width("買い物"), "買い物");
/// ```
pub fn normalize_width(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| fullwidth_to_ascii(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| fullwidth_to_ascii(c).unwrap_or(c))
            .collect(),
    )
}

fn fullwidth_to_ascii(c: char) -> Option<char> {
    match c {
        '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32),
        '：' => Some(':'),
        '／' => Some('/'),
        _ => None,
    }
}

fn starts_mid_number(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_digit())
}

fn next_char_boundary(text: &str, from: usize) -> usize {
    text[from..]
        .chars()
        .next()
        .map(|c| from + c.len_utf8())
        .unwrap_or(text.len() + 1)
}

fn number<T: std::str::FromStr>(caps: &Captures, name: &str) -> Option<T> {
    caps.name(name)?.as_str().parse().ok()
}

/// Hour 0-23 and minute 0-59; `半` is 30 and an absent minute is 0.
fn clock(caps: &Captures, hour: &str, minute: &str, half: &str) -> Option<NaiveTime> {
    let h: u32 = number(caps, hour)?;
    let m: u32 = match (caps.name(minute), caps.name(half)) {
        (Some(_), _) => number(caps, minute)?,
        (None, Some(_)) => 30,
        (None, None) => 0,
    };
    NaiveTime::from_hms_opt(h, m, 0)
}

fn date(caps: &Captures, year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    date_from_parts(number(caps, year)?, number(caps, month)?, number(caps, day)?)
}

/// `時間` after the hour means a length of time, not a clock time.
fn is_duration(caps: &Captures) -> bool {
    caps.name("dur").is_some()
}

fn interpret_time_range(caps: &Captures) -> Option<Token> {
    if is_duration(caps) {
        return None;
    }
    let start = clock(caps, "sh", "sm", "shalf")?;
    let end = clock(caps, "eh", "em", "ehalf")?;
    Some(Token::Time(TimeFilter::Range(start, end)))
}

fn interpret_single_time(caps: &Captures) -> Option<Token> {
    if is_duration(caps) {
        return None;
    }
    Some(Token::Time(TimeFilter::Single(clock(caps, "h", "m", "half")?)))
}

fn interpret_date_range(caps: &Captures) -> Option<Token> {
    let start = date(caps, "y1", "mo1", "d1")?;
    let end = date(caps, "y2", "mo2", "d2")?;
    Some(Token::Date(DateFilter::Range(start, end)))
}

fn interpret_single_date(caps: &Captures) -> Option<Token> {
    Some(Token::Date(DateFilter::Single(date(caps, "y", "mo", "d")?)))
}

/// The minutes after `N時間` must be a real minute count.
fn interpret_duration(caps: &Captures) -> Option<Token> {
    if caps.name("hm").is_some() && number::<u32>(caps, "hm")? > 59 {
        return None;
    }
    Some(Token::Duration)
}
