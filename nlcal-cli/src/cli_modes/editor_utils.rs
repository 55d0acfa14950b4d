use anyhow::{Context, Result};
use std::{fs, path::Path, process::Command};

pub fn resolve_editor(editor: Option<&str>) -> String {
    editor
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens an empty temp file in `editor_cmd` and returns what was written to it.
pub fn create_editor_buffer(editor_cmd: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("nlcal")
        .suffix(".txt")
        .tempfile()
        .context("creating editor buffer")?;

    open_file_in_editor(editor_cmd, file.path())?;
    fs::read_to_string(file.path())
        .with_context(|| format!("reading {}", file.path().display()))
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("starting editor `{editor_cmd}`"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}
