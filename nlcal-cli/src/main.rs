mod cli;
mod cli_modes;
mod render;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::Parser;
use cli::Cli;
use cli_modes::{CliModeResult, delete_mode, list_mode, use_color, write_mode};
use nlcal_core::{Config, JsonEventStore, dates::parse_timestamp, reference_now};
use render::{RenderOptions, Renderer};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("nlcal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<CliModeResult> {
    let cli = Cli::parse();
    let mut config = Config::load()?;
    if let Some(path) = &cli.events_file {
        config.events_file = path.clone();
    }
    let store = JsonEventStore::new(&config.events_file);

    let renderer = Renderer::new(Some(RenderOptions {
        date_format: config.display_date_format.clone(),
        use_color: use_color(&cli),
    }));

    if cli.path {
        println!("{}", store.path().display());
        return Ok(CliModeResult::Finish);
    }
    if cli.list {
        return list_mode(&renderer, &store);
    }
    if let Some(number) = cli.delete_index {
        return delete_mode(number, &renderer, &store);
    }

    let reference = resolve_reference(cli.reference.as_deref())?;
    write_mode(&cli, &renderer, &config, &store, reference)
}

fn resolve_reference(arg: Option<&str>) -> Result<NaiveDateTime> {
    match arg {
        Some(s) => parse_timestamp(s)
            .with_context(|| format!("invalid --reference `{s}`, expected YYYY-MM-DDTHH:MM")),
        None => Ok(reference_now()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_accepts_minutes_and_dates() {
        let r = resolve_reference(Some("2025-04-01T09:00")).unwrap();
        assert_eq!(r.to_string(), "2025-04-01 09:00:00");
        let r = resolve_reference(Some("2025-04-01")).unwrap();
        assert_eq!(r.to_string(), "2025-04-01 00:00:00");
    }

    #[test]
    fn bad_reference_is_an_error() {
        let err = resolve_reference(Some("tomorrow")).unwrap_err();
        assert!(err.to_string().contains("--reference"));
    }
}
