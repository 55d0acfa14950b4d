use super::CliModeResult;
use crate::render::Renderer;
use anyhow::Result;
use nlcal_core::JsonEventStore;

pub fn list_mode(renderer: &Renderer, store: &JsonEventStore) -> Result<CliModeResult> {
    let records = store.load()?;
    if records.is_empty() {
        renderer.print_info("No events yet.");
        return Ok(CliModeResult::NothingToDo);
    }
    renderer.print_info(&format!("{} events found.", records.len()));
    renderer.print_events(&records);
    Ok(CliModeResult::Finish)
}
