use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::render::ColorMode;

/// nlcal — Japanese natural-language calendar
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(
        ArgGroup::new("solo")
            .args(["path", "list", "delete_index"])
            .conflicts_with_all(["text", "model", "json"])
    ),
)]
pub struct Cli {
    /// Prints the events file
    #[arg(long, short)]
    pub path: bool,
    /// Lists stored events
    #[arg(long, short)]
    pub list: bool,
    /// Deletes the stored event with this number, as shown by `--list`
    #[arg(long, value_name = "N")]
    pub delete_index: Option<usize>,

    /// Sends the statement to the configured `model_command` instead of the built-in rules.
    /// The model may also modify or delete existing events.
    #[arg(long, short)]
    pub model: bool,
    /// Parses and prints the event without saving it.
    #[arg(long, short = 'n')]
    pub dry_run: bool,
    /// Prints the parsed event as JSON.
    #[arg(long)]
    pub json: bool,
    /// Uses this time instead of now for `今日`, `明日`, … (e.g. `2025-04-01T09:00`)
    #[arg(long, value_name = "YYYY-MM-DDTHH:MM")]
    pub reference: Option<String>,

    /// Events file to read and write, instead of the configured one.
    #[arg(long, env = "NLCAL_EVENTS_FILE")]
    pub events_file: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// The statement (e.g., `nlcal 明日15時 歯医者`). Opens your $EDITOR when empty.
    pub text: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn text_is_collected() {
        let cli = Cli::try_parse_from(["nlcal", "明日15時", "歯医者", "--dry-run"]).unwrap();
        assert_eq!(cli.text, vec!["明日15時", "歯医者"]);
        assert!(cli.dry_run);
    }

    #[test]
    fn list_conflicts_with_text() {
        assert!(Cli::try_parse_from(["nlcal", "--list", "買い物"]).is_err());
    }

    #[test]
    fn delete_index_takes_a_number() {
        let cli = Cli::try_parse_from(["nlcal", "--delete-index", "2"]).unwrap();
        assert_eq!(cli.delete_index, Some(2));
        assert!(Cli::try_parse_from(["nlcal", "--delete-index", "two"]).is_err());
    }
}
