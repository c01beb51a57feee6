//! Script classification of language codes.
//!
//! Term matching depends on one property of a language: whether its script
//! separates words with whitespace. Languages that do not (Chinese, Japanese,
//! Thai, ...) are matched as plain substrings; everything else needs whole-word
//! boundaries.

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

lazy_static! {
    /// Primary language subtags whose scripts do not delimit words.
    static ref BUILTIN_UNSEGMENTED: BTreeSet<&'static str> = {
        let codes = [
            "zh", // Chinese
            "ja", // Japanese
            "th", // Thai
            "lo", // Lao
            "km", // Khmer
            "my", // Burmese
            "bo", // Tibetan
        ];
        codes.into_iter().collect()
    };
}

/// Whether a script delimits words with whitespace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ScriptClass {
    /// Words are whitespace-delimited; terms must match as whole words.
    WordDelimited,

    /// No whitespace between words; terms match as literal substrings.
    Unsegmented,
}

impl ScriptClass {
    /// Returns true if matches in this script must sit on word boundaries.
    pub fn requires_word_boundary(&self) -> bool {
        matches!(self, ScriptClass::WordDelimited)
    }
}

/// Reduce a language code to its lowercase primary subtag.
///
/// `"zh-CN"`, `"zh_TW"` and `" ZH "` all normalize to `"zh"`.
pub fn primary_subtag(code: &str) -> String {
    code.trim()
        .split(|c: char| c == '-' || c == '_')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// The set of languages treated as [`ScriptClass::Unsegmented`].
///
/// Adding a language here is all it takes to change how its terms are
/// matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageProfile {
    unsegmented: BTreeSet<String>,
}

impl LanguageProfile {
    /// Profile with the built-in unsegmented languages.
    pub fn new() -> Self {
        Self {
            unsegmented: BUILTIN_UNSEGMENTED.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Profile with no unsegmented languages at all.
    pub fn empty() -> Self {
        Self {
            unsegmented: BTreeSet::new(),
        }
    }

    /// Mark a language as unsegmented. Returns false if it already was.
    pub fn add_unsegmented(&mut self, code: &str) -> bool {
        let tag = primary_subtag(code);
        if tag.is_empty() {
            return false;
        }
        self.unsegmented.insert(tag)
    }

    /// Builder-style variant of [`add_unsegmented`](Self::add_unsegmented).
    pub fn with_unsegmented<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for code in codes {
            self.add_unsegmented(code.as_ref());
        }
        self
    }

    /// Classify a language code.
    ///
    /// Unknown and empty codes are word-delimited.
    pub fn classify(&self, code: &str) -> ScriptClass {
        if self.unsegmented.contains(&primary_subtag(code)) {
            ScriptClass::Unsegmented
        } else {
            ScriptClass::WordDelimited
        }
    }

    /// Unsegmented language subtags in sorted order.
    pub fn unsegmented(&self) -> impl Iterator<Item = &str> {
        self.unsegmented.iter().map(String::as_str)
    }
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::new()
    }
}
