//! The model-backed parser: a text generator asked for JSON, and the decoding
//! of its answer.
//!
//! The generator itself is a black box behind [`TextGenerator`]; this module
//! only builds the prompt and turns the answer into an [`ActionedEvent`].

use chrono::{Duration, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::dates::parse_timestamp;
use crate::error::ParseFailure;
use crate::event::{Action, ActionedEvent, ParsedEvent};
use crate::parser::EventParser;

/// Produces a completion for a prompt.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

impl<F> TextGenerator for F
where
    F: Fn(&str) -> anyhow::Result<String>,
{
    fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        self(prompt)
    }
}

/// A parser that delegates understanding to a [`TextGenerator`].
pub struct ModelParser<G> {
    reference: NaiveDateTime,
    generator: G,
}

impl<G: TextGenerator> ModelParser<G> {
    pub fn new(reference: NaiveDateTime, generator: G) -> Self {
        Self {
            reference,
            generator,
        }
    }

    /// The instruction sent to the generator for one statement.
    pub fn build_prompt(&self, text: &str) -> String {
        let today = self.reference.format("%Y年%m月%d日");
        format!(
            r#"以下の文章は、予定に関する自然言語の記述です。
今日の日付は {today} です。「明日」「明後日」などの表現は、この日付を基準に解釈してください。

文章: 「{text}」

この文章から、次の項目を抽出してください：
- action: 予定の追加/変更/削除のいずれか（add / modify / delete）
- title: 予定の名前
- start: 開始日時（変更の場合は変更後の開始日時）
- end: 終了日時（指定がなければ開始の1時間後、変更の場合は変更後の終了日時）
- all_day: 終日の予定かどうか
- original_title: 変更・削除する予定の元の名前（追加の場合は title と同じ）
- original_start: 変更・削除する予定の元の開始日時（追加の場合は start と同じ）

出力形式（JSONのみ）:
{{"action": "add", "title": "...", "start": "yyyy-mm-ddThh:mm:ss", "end": "yyyy-mm-ddThh:mm:ss", "all_day": false, "original_title": "...", "original_start": "yyyy-mm-ddThh:mm:ss"}}

出力:"#
        )
    }
}

impl<G: TextGenerator> EventParser for ModelParser<G> {
    fn parse(&self, text: &str) -> Result<ActionedEvent, ParseFailure> {
        let prompt = self.build_prompt(text);
        let raw = self
            .generator
            .generate(&prompt)
            .map_err(|e| ParseFailure::Generation(format!("{e:#}")))?;
        debug!(raw = raw.trim(), "generator answered");
        decode_structured_output(&raw)
    }
}

static JSON_OBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*?\}").expect("valid json object pattern"));

/// The first `{ ... }` block in a generator's answer, or the whole answer.
///
/// Generators like to wrap JSON in prose or code fences.
pub fn extract_json_like(raw: &str) -> &str {
    JSON_OBJECT
        .find(raw)
        .map(|m| m.as_str())
        .unwrap_or_else(|| raw.trim())
}

/// The answer as the generator writes it; timestamps are validated afterwards.
#[derive(Debug, Deserialize)]
struct RawModelEvent {
    #[serde(default)]
    action: Action,
    title: String,
    start: String,
    end: Option<String>,
    #[serde(default)]
    all_day: bool,
    original_title: Option<String>,
    original_start: Option<String>,
}

/// Decodes a generator's answer into an [`ActionedEvent`].
///
/// A missing `end` means one hour after `start`; missing `original_*` fields
/// repeat `title` and `start`. Anything that is not the expected object, or a
/// timestamp that cannot be read, is a
/// [`ParseFailure::MalformedStructuredOutput`] carrying the full answer.
///
/// # Examples
///
/// ```
/// # use nlcal_core::model::decode_structured_output;
/// # use nlcal_core::event::Action;
/// let raw = r#"{"action": "delete", "title": "会議", "start": "2025-04-02T15:00:00",
///              "end": "2025-04-02T16:00:00", "all_day": false,
///              "original_title": "会議", "original_start": "2025-04-02T15:00:00"}"#;
/// let event = decode_structured_output(raw).unwrap();
/// assert_eq!(event.action, Action::Delete);
/// assert_eq!(event.original_title, "会議");
///
/// assert!(decode_structured_output("I could not understand that.").is_err());
/// ```
pub fn decode_structured_output(raw: &str) -> Result<ActionedEvent, ParseFailure> {
    let malformed = |reason: String| {
        warn!(%reason, "malformed structured output");
        ParseFailure::MalformedStructuredOutput {
            raw: raw.to_string(),
            reason,
        }
    };

    let decoded: RawModelEvent =
        serde_json::from_str(extract_json_like(raw)).map_err(|e| malformed(e.to_string()))?;

    let timestamp = |field: &str, value: &str| {
        parse_timestamp(value)
            .ok_or_else(|| malformed(format!("`{field}` is not a timestamp: `{value}`")))
    };

    let start = timestamp("start", &decoded.start)?;
    let end = match decoded.end.as_deref() {
        Some(end) => timestamp("end", end)?,
        None => start + Duration::hours(1),
    };
    let original_start = match decoded.original_start.as_deref() {
        Some(original) => timestamp("original_start", original)?,
        None => start,
    };
    let event = ParsedEvent::new(decoded.title, start, end, decoded.all_day);

    Ok(ActionedEvent {
        action: decoded.action,
        original_title: decoded
            .original_title
            .unwrap_or_else(|| event.title.clone()),
        original_start,
        event,
    })
}
