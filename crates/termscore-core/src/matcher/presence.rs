//! Presence tests: does a term occur in a text?

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

use crate::language::ScriptClass;

lazy_static! {
    // Unicode `\w`: letters, marks, digits, connector punctuation, join controls
    static ref WORD_CHAR: Regex = Regex::new(r"^\w$").unwrap();
}

/// A compiled check for one term.
///
/// The term is always escaped before compilation, so `C++` or `a.b` match
/// literally. Word-delimited scripts match case-insensitively and only on
/// whole words; unsegmented scripts match case-sensitively anywhere.
#[derive(Debug, Clone)]
pub struct PresenceTest {
    pattern: Option<Regex>,
    bounded: bool,
}

impl PresenceTest {
    /// Build the presence test for `term` under the given script rule.
    ///
    /// Never fails. An empty term, or one too large to compile, is never
    /// present.
    pub fn new(term: &str, class: ScriptClass) -> Self {
        let bounded = class.requires_word_boundary();

        if term.trim().is_empty() {
            return Self {
                pattern: None,
                bounded,
            };
        }

        let pattern = match RegexBuilder::new(&regex::escape(term))
            .case_insensitive(bounded)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!(term_len = term.len(), error = %e, "Term could not be compiled, treating as absent");
                None
            }
        };

        Self { pattern, bounded }
    }

    /// Returns true if the term occurs in `text`.
    pub fn is_present_in(&self, text: &str) -> bool {
        let Some(pattern) = &self.pattern else {
            return false;
        };

        if !self.bounded {
            return pattern.is_match(text);
        }

        // Every start position is a candidate: a hit that fails the boundary
        // check may overlap a later one that passes.
        let mut from = 0;
        while let Some(m) = pattern.find_at(text, from) {
            if is_bounded(text, m.start(), m.end()) {
                return true;
            }
            from = m.start() + text[m.start()..].chars().next().map_or(1, char::len_utf8);
        }

        false
    }
}

/// Word characters are whatever `regex` matches with Unicode `\w`.
fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Neither neighbour of `text[start..end]` is a word character.
fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}
