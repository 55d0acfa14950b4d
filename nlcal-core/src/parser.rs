use chrono::NaiveDateTime;
use tracing::debug;

use crate::dates::substitute_relative;
use crate::disambiguate::resolve;
use crate::error::ParseFailure;
use crate::event::{ActionedEvent, ParsedEvent};
use crate::keywords::Vocabulary;
use crate::patterns::MatchSet;
use crate::title::extract_title;

/// Anything that turns a statement into an actioned event.
///
/// Implementations hold their reference time from construction on and never
/// change it, so one parser can be shared across threads.
pub trait EventParser {
    fn parse(&self, text: &str) -> Result<ActionedEvent, ParseFailure>;
}

/// The deterministic, pattern-based parser.
#[derive(Debug, Clone)]
pub struct RuleBasedParser {
    reference: NaiveDateTime,
    vocabulary: Vocabulary,
}

impl RuleBasedParser {
    /// A parser anchored at `reference`, with the default relative vocabulary.
    pub fn new(reference: NaiveDateTime) -> Self {
        Self {
            reference,
            vocabulary: Vocabulary::default(),
        }
    }

    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Parses a statement into an event. Never fails: input without any date or
    /// time falls back to an all-day slot the day after the reference time.
    ///
    /// # Examples
    ///
    /// ```
    /// # use chrono::NaiveDate;
    /// # use nlcal_core::parser::RuleBasedParser;
    /// let reference = NaiveDate::from_ymd_opt(2025, 4, 1)
    ///     .unwrap()
    ///     .and_hms_opt(9, 0, 0)
    ///     .unwrap();
    /// let parser = RuleBasedParser::new(reference);
    ///
    /// let (title, start, end, all_day) = parser.extract("2025/4/1〜2025/4/3 旅行").into_parts();
    ///
    /// assert_eq!(title, "旅行");
    /// assert_eq!(start, "2025-04-01T00:00:00");
    /// assert_eq!(end, "2025-04-04T00:00:00");
    /// assert!(all_day);
    /// ```
    pub fn extract(&self, text: &str) -> ParsedEvent {
        let original = text.trim();
        let substituted = substitute_relative(original, self.reference, &self.vocabulary);
        let matches = MatchSet::scan(&substituted);
        debug!(?matches, "scanned statement");
        let schedule = resolve(&matches, self.reference);
        let title = extract_title(original, &self.vocabulary);
        ParsedEvent::new(title, schedule.start, schedule.end, schedule.all_day)
    }
}

impl EventParser for RuleBasedParser {
    fn parse(&self, text: &str) -> Result<ActionedEvent, ParseFailure> {
        Ok(self.extract(text).into())
    }
}
