use anyhow::{Context, Result};
use serde::Deserialize;
use std::{collections::HashMap, fs, path::Path, path::PathBuf};
use tracing::debug;

use crate::keywords::Vocabulary;
use crate::paths;

pub const DEFAULT_DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d";

#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file holding the stored events.
    pub events_file: PathBuf,
    /// Preferred editor name/binary (e.g. hx for Helix).
    /// Optional; the CLI will fall back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    /// Program run for `--model`: reads the prompt on stdin, writes its answer on stdout.
    /// Split on whitespace; no shell quoting.
    pub model_command: Option<String>,
    /// Date format used when listing events. Default is `%Y/%m/%d`.
    pub display_date_format: String,
    /// Relative-day words, with user synonyms merged in.
    pub vocabulary: Vocabulary,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    events_file: Option<PathBuf>,
    editor: Option<String>,
    model_command: Option<String>,
    display_date_format: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// "あす" = "明日"
    /// "きょう" = "今日"
    ///
    /// Non-ASCII TOML keys must be quoted.
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native) and apply defaults.
    /// No config file means defaults; a config file that cannot be read or parsed is an error.
    pub fn load() -> Result<Self> {
        match paths::config_file_candidates()
            .into_iter()
            .find(|path| path.exists())
        {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::from_file_config(FileConfig::default())),
        }
    }

    /// Loads one specific config file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "reading config");
        let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let fc = Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Self::from_file_config(fc))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        let events_file = file_config
            .events_file
            .unwrap_or_else(paths::default_events_file);

        let display_date_format = file_config
            .display_date_format
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DISPLAY_DATE_FORMAT.to_string());

        let vocabulary = Self::load_synonyms(&file_config.synonyms);

        Self {
            events_file,
            editor: file_config.editor,
            model_command: file_config.model_command.filter(|c| !c.trim().is_empty()),
            display_date_format,
            vocabulary,
        }
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Builds the vocabulary: the defaults plus `[synonyms]`.
    /// Synonyms that collide with a canonical word (eg. "今日") are omitted.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) -> Vocabulary {
        let mut vocabulary = Vocabulary::default();
        if let Some(map) = synonyms {
            let pairs: Vec<(String, String)> = map
                .iter()
                .filter(|(alias, _)| !Vocabulary::is_canonical(alias))
                .map(|(a, t)| (a.clone(), t.clone()))
                .collect();
            if !pairs.is_empty() {
                vocabulary.extend(&pairs);
            }
        }
        vocabulary
    }
}
