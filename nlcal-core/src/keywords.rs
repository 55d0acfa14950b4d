use std::collections::HashMap;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// A relative day expression, resolved as a fixed day offset from the reference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
pub enum RelativeDay {
    #[strum(serialize = "今日")]
    Today,
    #[strum(serialize = "明日")]
    Tomorrow,
    #[strum(serialize = "明後日")]
    DayAfterTomorrow,
}

impl RelativeDay {
    /// Number of days to add to the reference date.
    pub fn offset_days(self) -> i64 {
        match self {
            RelativeDay::Today => 0,
            RelativeDay::Tomorrow => 1,
            RelativeDay::DayAfterTomorrow => 2,
        }
    }
}

/// The table of words that denote a [`RelativeDay`] (word → canonical day).
///
/// The table is:
/// - **Seeded** with the canonical words (`今日`, `明日`, `明後日`) and a few
///   common spellings (`本日`, `あした`, `あさって`).
/// - **Owned** by whoever parses, so a parser never reads state that can change
///   under it. Build it once, extend it with user synonyms, then hand it over.
///
/// Words are matched as exact substrings; there is no case folding.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    words: HashMap<String, RelativeDay>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        let mut words = HashMap::new();
        for day in RelativeDay::iter() {
            words.insert(day.as_ref().to_string(), day);
        }
        words.insert("本日".to_string(), RelativeDay::Today);
        words.insert("あした".to_string(), RelativeDay::Tomorrow);
        words.insert("あさって".to_string(), RelativeDay::DayAfterTomorrow);
        Self { words }
    }
}

impl Vocabulary {
    /// Extends the table with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must be a word already in the
    /// table (a canonical word or an existing synonym). Unknown targets, empty
    /// aliases and aliases that would shadow a canonical word are ignored.
    ///
    /// Typical call site: `Config::load()`, after reading `[synonyms]` from
    /// `config.toml`:
    ///
    /// ```toml
    /// [synonyms]
    /// "あす" = "明日"
    /// "きょう" = "今日"
    /// ```
    pub fn extend(&mut self, synonyms: &[(String, String)]) {
        for (alias, target) in synonyms {
            let alias = alias.trim();
            if alias.is_empty() || Self::is_canonical(alias) {
                continue;
            }
            if let Some(canonical) = self.lookup(target.trim()) {
                self.words.insert(alias.to_string(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "明日").
    pub fn is_canonical(word: &str) -> bool {
        RelativeDay::iter().any(|day| day.as_ref() == word)
    }

    /// Returns the day a word stands for, if it is in the table.
    pub fn lookup(&self, word: &str) -> Option<RelativeDay> {
        self.words.get(word).copied()
    }

    /// All words, longest first, so that `明後日` is consumed before `明日`.
    /// Ties are broken alphabetically to keep the order stable.
    pub fn words_longest_first(&self) -> Vec<(&str, RelativeDay)> {
        let mut words: Vec<(&str, RelativeDay)> = self
            .words
            .iter()
            .map(|(word, &day)| (word.as_str(), day))
            .collect();
        words.sort_by(|(a, _), (b, _)| {
            b.chars()
                .count()
                .cmp(&a.chars().count())
                .then_with(|| a.cmp(b))
        });
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn default_words() {
        let vocab = Vocabulary::default();
        assert_eq!(vocab.lookup("今日"), Some(RelativeDay::Today));
        assert_eq!(vocab.lookup("明日"), Some(RelativeDay::Tomorrow));
        assert_eq!(vocab.lookup("明後日"), Some(RelativeDay::DayAfterTomorrow));
        assert_eq!(vocab.lookup("あした"), Some(RelativeDay::Tomorrow));
        assert_ne!(vocab.lookup("明日"), Some(RelativeDay::Today));
    }

    #[test]
    fn canonical_words_round_trip_through_strum() {
        assert_eq!(RelativeDay::from_str("明後日").unwrap(), RelativeDay::DayAfterTomorrow);
        assert_eq!(RelativeDay::Tomorrow.as_ref(), "明日");
        assert!(Vocabulary::is_canonical("今日"));
        assert!(!Vocabulary::is_canonical("本日"));
    }

    #[test]
    fn synonyms_extend() {
        let mut vocab = Vocabulary::default();
        vocab.extend(&[
            ("あす".into(), "明日".into()),
            ("あしたの".into(), "あした".into()),
            ("きょう".into(), "今日".into()),
        ]);
        assert_eq!(vocab.lookup("あす"), Some(RelativeDay::Tomorrow));
        assert_eq!(vocab.lookup("あしたの"), Some(RelativeDay::Tomorrow));
        assert_eq!(vocab.lookup("きょう"), Some(RelativeDay::Today));
    }

    #[test]
    fn synonyms_with_unknown_target_are_ignored() {
        let mut vocab = Vocabulary::default();
        vocab.extend(&[("来週".into(), "not a day".into())]);
        assert_eq!(vocab.lookup("来週"), None);
    }

    #[test]
    fn synonyms_cannot_shadow_canonical_words() {
        let mut vocab = Vocabulary::default();
        vocab.extend(&[("今日".into(), "明日".into())]);
        assert_eq!(vocab.lookup("今日"), Some(RelativeDay::Today));
    }

    #[test]
    fn longest_words_come_first() {
        let vocab = Vocabulary::default();
        let words = vocab.words_longest_first();
        let pos = |w: &str| words.iter().position(|(word, _)| *word == w).unwrap();
        assert!(pos("明後日") < pos("明日"));
        assert!(pos("あさって") < pos("今日"));
    }
}
