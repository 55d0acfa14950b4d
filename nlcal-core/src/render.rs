//! Plain-text labels for events.
//!
//! All-day span:  `2025/04/01～2025/04/04（終日）`
//! Timed span:    `2025/04/02 15:00～16:00`
//! Listing line:  `1: 旅行 (2025/04/01～2025/04/04（終日）)`
//!
//! All-day ends are shown as stored, so the end date is the day after the last one.

use crate::config::DEFAULT_DISPLAY_DATE_FORMAT;
use crate::event::EventRecord;

/// The span of an event with the default `%Y/%m/%d` dates.
pub fn format_span(record: &EventRecord) -> String {
    format_span_with(record, DEFAULT_DISPLAY_DATE_FORMAT)
}

/// The span of an event with dates written in `date_format`.
pub fn format_span_with(record: &EventRecord, date_format: &str) -> String {
    let start_date = record.start.format(date_format);
    if record.all_day {
        format!("{start_date}～{}（終日）", record.end.format(date_format))
    } else {
        format!(
            "{start_date} {}～{}",
            record.start.format("%H:%M"),
            record.end.format("%H:%M")
        )
    }
}

/// One line of a listing. `index` is zero-based; the line shows it one-based.
pub fn format_record_line(index: usize, record: &EventRecord) -> String {
    format_record_line_with(index, record, DEFAULT_DISPLAY_DATE_FORMAT)
}

pub fn format_record_line_with(index: usize, record: &EventRecord, date_format: &str) -> String {
    format!(
        "{}: {} ({})",
        index + 1,
        record.title,
        format_span_with(record, date_format)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::reference;

    fn trip() -> EventRecord {
        EventRecord {
            title: "旅行".to_string(),
            start: reference(2025, 4, 1, 0, 0),
            end: reference(2025, 4, 4, 0, 0),
            all_day: true,
        }
    }

    fn dentist() -> EventRecord {
        EventRecord {
            title: "歯医者".to_string(),
            start: reference(2025, 4, 2, 15, 0),
            end: reference(2025, 4, 2, 16, 30),
            all_day: false,
        }
    }

    #[test]
    fn all_day_span() {
        assert_eq!(format_span(&trip()), "2025/04/01～2025/04/04（終日）");
    }

    #[test]
    fn timed_span() {
        assert_eq!(format_span(&dentist()), "2025/04/02 15:00～16:30");
    }

    #[test]
    fn custom_date_format() {
        assert_eq!(format_span_with(&dentist(), "%m/%d"), "04/02 15:00～16:30");
    }

    #[test]
    fn listing_line_is_one_based() {
        assert_eq!(
            format_record_line(0, &trip()),
            "1: 旅行 (2025/04/01～2025/04/04（終日）)"
        );
    }
}
