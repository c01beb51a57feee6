//! # termscore-core
//!
//! Deterministic terminology checks for translations.
//!
//! This crate answers two questions locally, without any backend:
//! - Did the translation use the glossary's prescribed terms?
//! - Is this pasted batch of term pairs well-formed?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: Same input always produces same output
//! 2. **No I/O** in matching or batch parsing
//! 3. **Never raises on bad input**: malformed lines and empty texts come back
//!    as data
//! 4. **Script-aware**: whole-word matching for whitespace-delimited scripts,
//!    substring matching for scripts without word spacing
//!
//! ## Example
//!
//! ```rust
//! use termscore_core::{match_terms, parse_batch};
//!
//! let outcome = parse_batch("测试 test\n用例 test case");
//! let dictionary = outcome.into_dictionary().expect("batch is valid");
//!
//! let report = match_terms(&dictionary, "这是一个测试", "This is a Test.", "zh", "en");
//! assert_eq!(report.score.considered_count, 1);
//! assert_eq!(report.score.score, 1.0);
//! ```

pub mod batch;
pub mod config;
pub mod dictionary;
pub mod language;
pub mod matcher;
pub mod types;

// Re-export main types at crate root
pub use batch::{parse_batch, LineError, LineErrorReason, ParseOutcome};
pub use config::{BandThresholds, ConfigError, EngineConfig};
pub use dictionary::{DictionaryError, DictionaryScope, TerminologyDictionary};
pub use language::{LanguageProfile, ScriptClass};
pub use matcher::{match_terms, MatchRequest, PresenceTest, TermMatcher};
pub use types::{MatchReport, MatchVerdict, ScoreBand, ScoreResult, TermPair};
