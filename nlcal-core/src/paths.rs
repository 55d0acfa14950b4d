use directories::BaseDirs;
use std::path::PathBuf;

pub const APP_DIR: &str = "nlcal";
pub const CONFIG_FILE: &str = "config.toml";
pub const EVENTS_FILE: &str = "events.json";

/// Default events file: `{data_dir}/nlcal/events.json`
/// - macOS:   `~/Library/Application Support/nlcal/events.json`
/// - Linux:   `$XDG_DATA_HOME/nlcal/events.json` or `~/.local/share/nlcal/events.json`
/// - Windows: `%APPDATA%\nlcal\events.json`
pub fn default_events_file() -> PathBuf {
    match BaseDirs::new() {
        Some(base) => base.data_dir().join(APP_DIR).join(EVENTS_FILE),
        None => PathBuf::from(".").join(APP_DIR).join(EVENTS_FILE),
    }
}

/// Where `config.toml` may live, in lookup order: XDG style first, then native.
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Some(b) = BaseDirs::new() {
        v.push(b.home_dir().join(".config").join(APP_DIR).join(CONFIG_FILE));
        let native = b.config_dir().join(APP_DIR).join(CONFIG_FILE);
        if !v.contains(&native) {
            v.push(native);
        }
    }
    v
}
