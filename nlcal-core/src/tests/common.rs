use crate::Config;
use crate::keywords::Vocabulary;
use chrono::{NaiveDate, NaiveDateTime};
use std::path::PathBuf;

/// A local timestamp for tests; panics on an impossible date or time.
pub fn reference(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, mi, 0))
        .expect("valid test timestamp")
}

/// Test helper to create a default `Config` for testing purposes.
///
/// This is the single source of truth for test configuration.
/// If you add a field to `Config`, you only need to update it here.
pub fn mk_config(tmp_dir: PathBuf) -> Config {
    Config {
        events_file: tmp_dir.join("events.json"),
        editor: None,
        model_command: None,
        display_date_format: "%Y/%m/%d".to_string(),
        vocabulary: Vocabulary::default(),
    }
}
