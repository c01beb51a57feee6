//! Core types for terminology evaluation.
//!
//! These are the plain data structures produced by the matcher and consumed
//! by the presentation layer. None of them carry formatting.

use serde::{Deserialize, Serialize};

/// A single glossary entry: a source term and its prescribed translation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TermPair {
    /// Term as it appears in the source language
    pub source_term: String,

    /// Prescribed translation of the term
    pub target_term: String,
}

impl TermPair {
    /// Create a term pair.
    pub fn new(source_term: impl Into<String>, target_term: impl Into<String>) -> Self {
        Self {
            source_term: source_term.into(),
            target_term: target_term.into(),
        }
    }
}

/// Outcome for one considered term.
///
/// `matched` is a presence check: the target term occurs somewhere in the
/// translated text. It says nothing about where.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchVerdict {
    pub source_term: String,
    pub target_term: String,
    pub matched: bool,
}

impl MatchVerdict {
    /// The glossary entry this verdict was produced for.
    ///
    /// Used when submitting a verdict's term back to the terminology store.
    pub fn to_term_pair(&self) -> TermPair {
        TermPair::new(self.source_term.clone(), self.target_term.clone())
    }
}

/// Aggregate terminology accuracy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreResult {
    /// Considered terms whose translation was found
    pub matched_count: usize,

    /// Dictionary terms found in the source text
    pub considered_count: usize,

    /// `matched_count / considered_count`, or 1.0 when nothing was considered
    pub score: f64,
}

impl ScoreResult {
    /// Aggregate counts into a score.
    ///
    /// With zero considered terms the score is 1.0: nothing applied, so
    /// nothing was translated wrongly.
    pub fn from_counts(matched_count: usize, considered_count: usize) -> Self {
        debug_assert!(matched_count <= considered_count);

        let score = if considered_count == 0 {
            1.0
        } else {
            matched_count as f64 / considered_count as f64
        };

        Self {
            matched_count,
            considered_count,
            score,
        }
    }

    /// Whether any dictionary term applied to the source text.
    ///
    /// Lets callers show "no terms apply" instead of a perfect score.
    pub fn is_applicable(&self) -> bool {
        self.considered_count > 0
    }

    /// Score on a 0-100 scale, rounded to the nearest integer.
    pub fn percentage(&self) -> u32 {
        (self.score * 100.0).round() as u32
    }
}

/// Qualitative tier of a score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl ScoreBand {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Fair => "fair",
            ScoreBand::Poor => "poor",
        }
    }
}

/// Full result of matching a dictionary against a text pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchReport {
    /// One verdict per considered term, in dictionary order
    pub verdicts: Vec<MatchVerdict>,

    /// Aggregate over `verdicts`
    pub score: ScoreResult,
}

impl MatchReport {
    /// Build a report, aggregating the score from the verdicts.
    pub fn from_verdicts(verdicts: Vec<MatchVerdict>) -> Self {
        let matched = verdicts.iter().filter(|v| v.matched).count();
        let score = ScoreResult::from_counts(matched, verdicts.len());
        Self { verdicts, score }
    }

    /// Look up the verdict for a source term.
    pub fn verdict(&self, source_term: &str) -> Option<&MatchVerdict> {
        self.verdicts.iter().find(|v| v.source_term == source_term)
    }

    /// Verdicts whose translation was found.
    pub fn matched(&self) -> impl Iterator<Item = &MatchVerdict> {
        self.verdicts.iter().filter(|v| v.matched)
    }

    /// Verdicts whose translation was missing.
    pub fn unmatched(&self) -> impl Iterator<Item = &MatchVerdict> {
        self.verdicts.iter().filter(|v| !v.matched)
    }
}
