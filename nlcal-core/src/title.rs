use crate::keywords::Vocabulary;
use crate::patterns::{PATTERNS, normalize_width, remove_all};

/// Title used when nothing title-like is left in the statement.
pub const UNTITLED: &str = "無題の予定";

/// Separators between title candidates, besides whitespace.
const DELIMITERS: &[char] = &['-', '〜', '～', '、', '。'];

/// Removes every date, time and duration expression and every relative word
/// from `text`. What remains is the raw material for a title.
///
/// Fullwidth digits come back as ASCII digits.
pub fn strip_temporal(text: &str, vocabulary: &Vocabulary) -> String {
    let mut residual = PATTERNS
        .iter()
        .fold(normalize_width(text).into_owned(), |acc, def| {
            remove_all(def.kind, &acc)
        });
    for (word, _) in vocabulary.words_longest_first() {
        residual = residual.replace(word, "");
    }
    residual
}

/// Splits the stripped text into title candidates, in their original order.
pub fn title_candidates(residual: &str) -> Vec<&str> {
    residual
        .split(|c: char| c.is_whitespace() || DELIMITERS.contains(&c))
        .map(str::trim)
        .collect()
}

/// Picks a title from a statement: the last non-empty fragment left after the
/// temporal expressions are removed, or [`UNTITLED`].
///
/// Titles usually trail the time ("明日15時 歯医者"), so the scan runs from the end.
///
/// # Examples
///
/// ```
/// # use nlcal_core::keywords::Vocabulary;
/// # use nlcal_core::title::extract_title;
/// let vocab = Vocabulary::default();
/// assert_eq!(extract_title("明日15時 歯医者", &vocab), "歯医者");
/// assert_eq!(extract_title("明日15時", &vocab), "無題の予定");
/// ```
pub fn extract_title(text: &str, vocabulary: &Vocabulary) -> String {
    let residual = strip_temporal(text.trim(), vocabulary);
    title_candidates(&residual)
        .into_iter()
        .rev()
        .find(|fragment| !fragment.is_empty())
        .unwrap_or(UNTITLED)
        .to_string()
}
