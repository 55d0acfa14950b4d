use super::CliModeResult;
use super::editor_utils::{create_editor_buffer, resolve_editor};
use super::model_command::CommandGenerator;
use crate::{cli::Cli, render::Renderer};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use nlcal_core::{
    ActionedEvent, Applied, Config, EventParser, JsonEventStore, ModelParser, RuleBasedParser,
    reconcile,
};
use tracing::info;

/// Parses a statement and applies it to the stored events.
pub fn write_mode(
    cli: &Cli,
    renderer: &Renderer,
    config: &Config,
    store: &JsonEventStore,
    reference: NaiveDateTime,
) -> Result<CliModeResult> {
    let input = if !cli.text.is_empty() {
        cli.text.join(" ")
    } else {
        let editor = resolve_editor(config.editor.as_deref());
        create_editor_buffer(&editor)?
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        renderer.print_info("No event to save, because no text was received.");
        return Ok(CliModeResult::NothingToDo);
    }

    let intent = parse_statement(cli.model, config, reference, trimmed)?;
    info!(action = ?intent.action, title = %intent.event.title, "parsed statement");

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&intent)?);
    } else {
        renderer.print_intent(&intent);
    }
    if cli.dry_run {
        return Ok(CliModeResult::Finish);
    }

    let mut records = store.load()?;
    let applied = reconcile::apply(&mut records, &intent)?;
    store.save(&records)?;

    let message = match applied {
        Applied::Added { index } => format!(
            "Added event {} to {}",
            index + 1,
            store.path().display()
        ),
        Applied::Modified { index } => format!("Modified event {}", index + 1),
        Applied::Deleted { count } => format!("Deleted {count} event(s)"),
    };
    renderer.print_info(&message);
    Ok(CliModeResult::Finish)
}

fn parse_statement(
    use_model: bool,
    config: &Config,
    reference: NaiveDateTime,
    text: &str,
) -> Result<ActionedEvent> {
    if use_model {
        let command = config
            .model_command
            .as_deref()
            .context("--model needs `model_command` in config.toml")?;
        let generator = CommandGenerator::from_command_line(command)?;
        let parser = ModelParser::new(reference, move |prompt: &str| generator.generate(prompt));
        Ok(parser.parse(text)?)
    } else {
        let parser = RuleBasedParser::new(reference).with_vocabulary(config.vocabulary.clone());
        Ok(parser.parse(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlcal_core::Action;
    use nlcal_core::keywords::Vocabulary;
    use std::path::PathBuf;

    fn config(model_command: Option<&str>) -> Config {
        Config {
            events_file: PathBuf::from("events.json"),
            editor: None,
            model_command: model_command.map(str::to_string),
            display_date_format: "%Y/%m/%d".to_string(),
            vocabulary: Vocabulary::default(),
        }
    }

    fn reference() -> NaiveDateTime {
        chrono::NaiveDate::from_ymd_opt(2025, 4, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn rules_parse_an_add() {
        let intent = parse_statement(false, &config(None), reference(), "明日15時 歯医者").unwrap();
        assert_eq!(intent.action, Action::Add);
        assert_eq!(intent.event.title, "歯医者");
    }

    #[test]
    fn model_without_command_is_an_error() {
        let err = parse_statement(true, &config(None), reference(), "買い物").unwrap_err();
        assert!(err.to_string().contains("model_command"));
    }

    #[cfg(unix)]
    #[test]
    fn model_answer_is_decoded() {
        // `echo` ignores the prompt and prints a fixed answer.
        let cmd = r#"echo {"action":"delete","title":"会議","start":"2025-04-02T15:00:00"}"#;
        let intent =
            parse_statement(true, &config(Some(cmd)), reference(), "会議を消して").unwrap();
        assert_eq!(intent.action, Action::Delete);
        assert_eq!(intent.original_title, "会議");
    }
}
