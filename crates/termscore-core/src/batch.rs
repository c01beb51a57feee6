//! Batch term parsing.
//!
//! Turns pasted multi-line text, one `source target...` pair per line, into
//! term pairs. The first whitespace-separated token is the source term; the
//! rest of the line, with whitespace runs collapsed to single spaces, is the
//! target term.
//!
//! ## All-or-nothing
//!
//! A single bad line rejects the whole batch, and every bad line is reported
//! at once so the user can fix them in one pass. Malformed lines are returned
//! as data, never as an `Err`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dictionary::TerminologyDictionary;
use crate::types::TermPair;

/// Invisible format characters that paste along with terms.
///
/// Zero-width space, word joiner and byte order mark.
const INVISIBLE_CHARS: &[char] = &['\u{200B}', '\u{2060}', '\u{FEFF}'];

/// Why a line was rejected.
#[derive(Error, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineErrorReason {
    #[error("malformed — expected at least two whitespace-separated fields")]
    Malformed,

    #[error("empty term field")]
    EmptyField,
}

/// A rejected line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LineError {
    /// 1-based line number
    pub line_number: usize,

    /// The line exactly as given, without its terminator
    pub raw_line: String,

    pub reason: LineErrorReason,
}

/// Result of parsing a batch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ParseOutcome {
    /// Every non-blank line was a valid pair.
    Parsed { entries: Vec<TermPair> },

    /// Nothing but blank lines; nothing to do.
    Empty,

    /// At least one line was invalid. No entries are returned.
    Rejected { errors: Vec<LineError> },
}

impl ParseOutcome {
    /// Parsed entries, empty unless the batch was accepted.
    pub fn entries(&self) -> &[TermPair] {
        match self {
            ParseOutcome::Parsed { entries } => entries,
            _ => &[],
        }
    }

    /// Line errors, empty unless the batch was rejected.
    pub fn errors(&self) -> &[LineError] {
        match self {
            ParseOutcome::Rejected { errors } => errors,
            _ => &[],
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseOutcome::Parsed { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ParseOutcome::Empty)
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, ParseOutcome::Rejected { .. })
    }

    /// Fold accepted entries into a dictionary, later duplicates winning.
    ///
    /// Returns `None` unless the batch was parsed.
    pub fn into_dictionary(self) -> Option<TerminologyDictionary> {
        match self {
            ParseOutcome::Parsed { entries } => Some(entries.into_iter().collect()),
            _ => None,
        }
    }
}

/// Trim whitespace and invisible format characters.
fn trim_term(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || INVISIBLE_CHARS.contains(&c))
}

/// Parse one non-blank line into a term pair.
fn parse_line(line: &str) -> Result<TermPair, LineErrorReason> {
    let mut tokens = line.split_whitespace();

    let (Some(source), Some(first_target)) = (tokens.next(), tokens.next()) else {
        return Err(LineErrorReason::Malformed);
    };

    let target = std::iter::once(first_target)
        .chain(tokens)
        .collect::<Vec<_>>()
        .join(" ");

    let source = trim_term(source);
    let target = trim_term(&target);

    if source.is_empty() || target.is_empty() {
        return Err(LineErrorReason::EmptyField);
    }

    Ok(TermPair::new(source, target))
}

/// Parse a batch of term pairs.
///
/// `\r\n` and lone `\r` line endings are treated like `\n`. Blank lines are
/// skipped but still counted for line numbers.
pub fn parse_batch(raw_text: &str) -> ParseOutcome {
    let normalized = raw_text.replace("\r\n", "\n").replace('\r', "\n");

    let mut entries = Vec::new();
    let mut errors = Vec::new();

    for (index, line) in normalized.split('\n').enumerate() {
        if trim_term(line).is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(pair) => entries.push(pair),
            Err(reason) => errors.push(LineError {
                line_number: index + 1,
                raw_line: line.to_string(),
                reason,
            }),
        }
    }

    tracing::debug!(
        entries = entries.len(),
        errors = errors.len(),
        "Batch parsed"
    );

    if !errors.is_empty() {
        ParseOutcome::Rejected { errors }
    } else if entries.is_empty() {
        ParseOutcome::Empty
    } else {
        ParseOutcome::Parsed { entries }
    }
}
