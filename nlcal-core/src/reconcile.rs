use chrono::{NaiveDateTime, Timelike};
use tracing::debug;

use crate::error::ReconcileError;
use crate::event::{Action, ActionedEvent, EventRecord};

/// What [`apply`] did to the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Added { index: usize },
    Modified { index: usize },
    Deleted { count: usize },
}

/// Applies an actioned event to the stored records.
///
/// - `add` appends the event.
/// - `modify` replaces the first record that [`targets`] the original event.
/// - `delete` removes every record that targets it.
///
/// A `modify` or `delete` that targets nothing leaves `records` untouched and
/// returns [`ReconcileError::NoMatchingEvent`].
pub fn apply(
    records: &mut Vec<EventRecord>,
    intent: &ActionedEvent,
) -> Result<Applied, ReconcileError> {
    let applied = match intent.action {
        Action::Add => {
            records.push(EventRecord::from(&intent.event));
            Applied::Added {
                index: records.len() - 1,
            }
        }
        Action::Modify => {
            let index = records
                .iter()
                .position(|record| targets(record, intent))
                .ok_or_else(|| miss(intent))?;
            records[index] = EventRecord::from(&intent.event);
            Applied::Modified { index }
        }
        Action::Delete => {
            let before = records.len();
            records.retain(|record| !targets(record, intent));
            let count = before - records.len();
            if count == 0 {
                return Err(miss(intent));
            }
            Applied::Deleted { count }
        }
    };
    debug!(?applied, title = %intent.original_title, "applied event");
    Ok(applied)
}

/// `true` if `record` is the event `intent` refers to: same title, and the same
/// start down to the minute.
pub fn targets(record: &EventRecord, intent: &ActionedEvent) -> bool {
    record.title == intent.original_title
        && truncate_to_minute(record.start) == truncate_to_minute(intent.original_start)
}

fn truncate_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}

fn miss(intent: &ActionedEvent) -> ReconcileError {
    ReconcileError::NoMatchingEvent {
        title: intent.original_title.clone(),
        start: intent.original_start.format("%Y-%m-%dT%H:%M").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ParsedEvent;
    use crate::tests::reference;

    fn record(title: &str, start: NaiveDateTime) -> EventRecord {
        EventRecord {
            title: title.to_string(),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
        }
    }

    fn stored() -> Vec<EventRecord> {
        vec![
            record("会議", reference(2025, 4, 2, 15, 0)),
            record("歯医者", reference(2025, 4, 3, 10, 0)),
        ]
    }

    fn intent(
        action: Action,
        title: &str,
        start: NaiveDateTime,
        original: (&str, NaiveDateTime),
    ) -> ActionedEvent {
        ActionedEvent {
            action,
            event: ParsedEvent::new(title, start, start + chrono::Duration::hours(1), false),
            original_title: original.0.to_string(),
            original_start: original.1,
        }
    }

    #[test]
    fn add_appends() {
        let mut records = stored();
        let e = ParsedEvent::new(
            "買い物",
            reference(2025, 4, 4, 9, 0),
            reference(2025, 4, 4, 10, 0),
            true,
        );
        let applied = apply(&mut records, &ActionedEvent::from(e)).unwrap();
        assert_eq!(applied, Applied::Added { index: 2 });
        assert_eq!(records[2].title, "買い物");
        assert!(records[2].all_day);
    }

    #[test]
    fn modify_replaces_matching_record() {
        let mut records = stored();
        let i = intent(
            Action::Modify,
            "会議",
            reference(2025, 4, 2, 17, 0),
            ("会議", reference(2025, 4, 2, 15, 0)),
        );
        assert_eq!(apply(&mut records, &i).unwrap(), Applied::Modified { index: 0 });
        assert_eq!(records[0].start, reference(2025, 4, 2, 17, 0));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn modify_matches_to_the_minute() {
        let mut records = vec![record(
            "会議",
            reference(2025, 4, 2, 15, 0) + chrono::Duration::seconds(42),
        )];
        let i = intent(
            Action::Modify,
            "定例会議",
            reference(2025, 4, 2, 16, 0),
            ("会議", reference(2025, 4, 2, 15, 0)),
        );
        assert!(apply(&mut records, &i).is_ok());
        assert_eq!(records[0].title, "定例会議");
    }

    #[test]
    fn modify_without_match_is_a_miss() {
        let mut records = stored();
        let i = intent(
            Action::Modify,
            "会議",
            reference(2025, 4, 2, 17, 0),
            ("会議", reference(2025, 4, 2, 16, 0)),
        );
        assert_eq!(
            apply(&mut records, &i),
            Err(ReconcileError::NoMatchingEvent {
                title: "会議".to_string(),
                start: "2025-04-02T16:00".to_string(),
            })
        );
        assert_eq!(records, stored());
    }

    #[test]
    fn delete_removes_every_match() {
        let mut records = stored();
        records.push(record("会議", reference(2025, 4, 2, 15, 0)));
        let i = intent(
            Action::Delete,
            "会議",
            reference(2025, 4, 2, 15, 0),
            ("会議", reference(2025, 4, 2, 15, 0)),
        );
        assert_eq!(apply(&mut records, &i).unwrap(), Applied::Deleted { count: 2 });
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "歯医者");
    }

    #[test]
    fn delete_requires_exact_title() {
        let mut records = stored();
        let i = intent(
            Action::Delete,
            "会議室",
            reference(2025, 4, 2, 15, 0),
            ("会議室", reference(2025, 4, 2, 15, 0)),
        );
        assert!(apply(&mut records, &i).is_err());
        assert_eq!(records.len(), 2);
    }
}
