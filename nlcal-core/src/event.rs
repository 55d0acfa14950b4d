use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

/// How timestamps are written: local time, no offset, whole seconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// What a parsed statement asks the calendar to do.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Action {
    #[default]
    Add,
    Modify,
    Delete,
}

/// The structured result of parsing one statement.
///
/// `end` is always after `start`: the constructor replaces an end that is not
/// with `start + 1 hour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedEvent {
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    pub all_day: bool,
}

impl ParsedEvent {
    pub fn new(
        title: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
        all_day: bool,
    ) -> Self {
        Self {
            title: title.into(),
            start,
            end: end_after(start, end),
            all_day,
        }
    }

    /// The `(title, start, end, all_day)` tuple with ISO-8601 local timestamps.
    pub fn into_parts(self) -> (String, String, String, bool) {
        let start = self.start.format(TIMESTAMP_FORMAT).to_string();
        let end = self.end.format(TIMESTAMP_FORMAT).to_string();
        (self.title, start, end, self.all_day)
    }
}

/// Returns `end`, or `start + 1 hour` when `end` is not after `start`.
pub fn end_after(start: NaiveDateTime, end: NaiveDateTime) -> NaiveDateTime {
    if end <= start {
        start + Duration::hours(1)
    } else {
        end
    }
}

/// A parsed event together with the action it requests and the event it targets.
///
/// For `modify` and `delete`, `original_title` and `original_start` identify the
/// stored event; for `add` they repeat `title` and `start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionedEvent {
    pub action: Action,
    #[serde(flatten)]
    pub event: ParsedEvent,
    pub original_title: String,
    #[serde(with = "timestamp")]
    pub original_start: NaiveDateTime,
}

impl From<ParsedEvent> for ActionedEvent {
    fn from(event: ParsedEvent) -> Self {
        Self {
            action: Action::Add,
            original_title: event.title.clone(),
            original_start: event.start,
            event,
        }
    }
}

fn default_all_day() -> bool {
    true
}

/// The persisted shape of an event.
///
/// `allDay` is camel-cased on disk, the way calendar widgets expect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,
    #[serde(with = "timestamp")]
    pub start: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end: NaiveDateTime,
    #[serde(rename = "allDay", default = "default_all_day")]
    pub all_day: bool,
}

impl From<&ParsedEvent> for EventRecord {
    fn from(event: &ParsedEvent) -> Self {
        Self {
            title: event.title.clone(),
            start: event.start,
            end: event.end,
            all_day: event.all_day,
        }
    }
}

impl From<ParsedEvent> for EventRecord {
    fn from(event: ParsedEvent) -> Self {
        Self {
            title: event.title,
            start: event.start,
            end: event.end,
            all_day: event.all_day,
        }
    }
}

pub(crate) mod timestamp {
    use super::TIMESTAMP_FORMAT;
    use crate::dates::parse_timestamp;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::reference;
    use std::str::FromStr;

    #[test]
    fn end_not_after_start_becomes_one_hour_later() {
        let start = reference(2025, 4, 1, 20, 0);
        let e = ParsedEvent::new("x", start, reference(2025, 4, 1, 19, 0), false);
        assert_eq!(e.end, reference(2025, 4, 1, 21, 0));
        let e = ParsedEvent::new("x", start, start, false);
        assert_eq!(e.end, reference(2025, 4, 1, 21, 0));
    }

    #[test]
    fn correction_is_idempotent() {
        let start = reference(2025, 4, 1, 20, 0);
        let once = end_after(start, start);
        assert_eq!(end_after(start, once), once);
    }

    #[test]
    fn parts_are_iso_strings() {
        let e = ParsedEvent::new(
            "旅行",
            reference(2025, 4, 1, 0, 0),
            reference(2025, 4, 4, 0, 0),
            true,
        );
        assert_eq!(
            e.into_parts(),
            (
                "旅行".to_string(),
                "2025-04-01T00:00:00".to_string(),
                "2025-04-04T00:00:00".to_string(),
                true
            )
        );
    }

    #[test]
    fn action_names() {
        assert_eq!(Action::from_str("modify").unwrap(), Action::Modify);
        assert_eq!(Action::Delete.as_ref(), "delete");
        assert_eq!(Action::default(), Action::Add);
    }

    #[test]
    fn actioned_event_serializes_flat() {
        let e = ParsedEvent::new(
            "会議",
            reference(2025, 4, 2, 15, 0),
            reference(2025, 4, 2, 16, 0),
            false,
        );
        let json = serde_json::to_value(ActionedEvent::from(e)).unwrap();
        assert_eq!(json["action"], "add");
        assert_eq!(json["title"], "会議");
        assert_eq!(json["start"], "2025-04-02T15:00:00");
        assert_eq!(json["all_day"], false);
        assert_eq!(json["original_title"], "会議");
        assert_eq!(json["original_start"], "2025-04-02T15:00:00");
    }

    #[test]
    fn record_reads_the_stored_shape() {
        let raw = r#"{"title": "旅行", "start": "2025-04-01T00:00:00", "end": "2025-04-04T00:00:00", "allDay": true}"#;
        let r: EventRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(r.start, reference(2025, 4, 1, 0, 0));
        assert!(r.all_day);

        let written = serde_json::to_string(&r).unwrap();
        assert!(written.contains(r#""allDay":true"#));
        assert!(written.contains("旅行"));
    }

    #[test]
    fn record_without_all_day_flag_defaults_to_all_day() {
        let raw = r#"{"title": "x", "start": "2025-04-01T00:00:00", "end": "2025-04-02T00:00:00"}"#;
        let r: EventRecord = serde_json::from_str(raw).unwrap();
        assert!(r.all_day);
    }

    #[test]
    fn record_with_bad_timestamp_is_an_error() {
        let raw = r#"{"title": "x", "start": "soon", "end": "2025-04-02T00:00:00"}"#;
        assert!(serde_json::from_str::<EventRecord>(raw).is_err());
    }
}
