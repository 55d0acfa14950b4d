use super::CliModeResult;
use crate::render::Renderer;
use anyhow::{Result, bail};
use nlcal_core::JsonEventStore;

/// Removes the event numbered `number` in `--list` output (one-based).
pub fn delete_mode(
    number: usize,
    renderer: &Renderer,
    store: &JsonEventStore,
) -> Result<CliModeResult> {
    let mut records = store.load()?;
    if number == 0 || number > records.len() {
        bail!(
            "no event number {number}; there are {} stored events",
            records.len()
        );
    }
    let removed = records.remove(number - 1);
    store.save(&records)?;
    renderer.print_info("Deleted event:");
    renderer.print_event_line(number - 1, &removed);
    Ok(CliModeResult::Finish)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RenderOptions;
    use chrono::NaiveDate;
    use nlcal_core::EventRecord;

    fn renderer() -> Renderer {
        Renderer::new(Some(RenderOptions {
            date_format: "%Y/%m/%d".to_string(),
            use_color: false,
        }))
    }

    fn record(title: &str) -> EventRecord {
        let start = NaiveDate::from_ymd_opt(2025, 4, 2)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        EventRecord {
            title: title.to_string(),
            start,
            end: start + chrono::Duration::hours(1),
            all_day: false,
        }
    }

    #[test]
    fn deletes_by_one_based_number() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonEventStore::new(tmp.path().join("events.json"));
        store.save(&[record("会議"), record("歯医者")]).unwrap();

        delete_mode(1, &renderer(), &store).unwrap();
        let left = store.load().unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].title, "歯医者");
    }

    #[test]
    fn out_of_range_number_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let store = JsonEventStore::new(tmp.path().join("events.json"));
        store.save(&[record("会議")]).unwrap();

        assert!(delete_mode(0, &renderer(), &store).is_err());
        assert!(delete_mode(2, &renderer(), &store).is_err());
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
