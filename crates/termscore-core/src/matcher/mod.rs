//! Term matching against a source/translation pair.
//!
//! For each dictionary entry the matcher first asks whether the source term
//! occurs in the source text. Terms that do not are irrelevant to this
//! translation and are dropped entirely. For the rest, the verdict is whether
//! the prescribed target term occurs anywhere in the translated text.
//!
//! ## Statelessness
//!
//! - No caching between calls; patterns are compiled per call
//! - Same inputs always produce the same report
//! - A `TermMatcher` can be shared across threads

mod presence;

pub use presence::PresenceTest;

use crate::dictionary::TerminologyDictionary;
use crate::language::LanguageProfile;
use crate::types::{MatchReport, MatchVerdict};

/// The texts and languages to match a dictionary against.
#[derive(Debug, Clone, Copy)]
pub struct MatchRequest<'a> {
    pub source_text: &'a str,
    pub translated_text: &'a str,
    pub source_lang: &'a str,
    pub target_lang: &'a str,
}

impl<'a> MatchRequest<'a> {
    pub fn new(
        source_text: &'a str,
        translated_text: &'a str,
        source_lang: &'a str,
        target_lang: &'a str,
    ) -> Self {
        Self {
            source_text,
            translated_text,
            source_lang,
            target_lang,
        }
    }
}

/// Matches terminology dictionaries against text pairs.
#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    profile: LanguageProfile,
}

impl TermMatcher {
    /// Matcher using the built-in language profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Matcher using a custom language profile.
    pub fn with_profile(profile: LanguageProfile) -> Self {
        Self { profile }
    }

    /// The profile used to classify language codes.
    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    /// Match every dictionary term against the request.
    ///
    /// # Returns
    ///
    /// A `MatchReport` with one verdict per considered term, in dictionary
    /// order, and the aggregate score. An empty dictionary or empty texts
    /// yield a report with no verdicts and a score of 1.0.
    pub fn match_terms(
        &self,
        dictionary: &TerminologyDictionary,
        request: &MatchRequest<'_>,
    ) -> MatchReport {
        let source_class = self.profile.classify(request.source_lang);
        let target_class = self.profile.classify(request.target_lang);

        let mut verdicts = Vec::new();

        for pair in dictionary.iter() {
            let in_source = PresenceTest::new(&pair.source_term, source_class)
                .is_present_in(request.source_text);
            if !in_source {
                continue;
            }

            let matched = PresenceTest::new(&pair.target_term, target_class)
                .is_present_in(request.translated_text);

            tracing::debug!(
                source_term = %pair.source_term,
                target_term = %pair.target_term,
                matched,
                "Term considered"
            );

            verdicts.push(MatchVerdict {
                source_term: pair.source_term.clone(),
                target_term: pair.target_term.clone(),
                matched,
            });
        }

        let report = MatchReport::from_verdicts(verdicts);

        tracing::debug!(
            dictionary_size = dictionary.len(),
            considered = report.score.considered_count,
            matched = report.score.matched_count,
            score = report.score.score,
            "Terminology match complete"
        );

        report
    }
}

/// Match a dictionary against a text pair with the built-in language profile.
pub fn match_terms(
    dictionary: &TerminologyDictionary,
    source_text: &str,
    translated_text: &str,
    source_lang: &str,
    target_lang: &str,
) -> MatchReport {
    TermMatcher::new().match_terms(
        dictionary,
        &MatchRequest::new(source_text, translated_text, source_lang, target_lang),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TermPair;

    fn dictionary(pairs: &[(&str, &str)]) -> TerminologyDictionary {
        pairs.iter().map(|(s, t)| TermPair::new(*s, *t)).collect()
    }

    #[test]
    fn test_empty_dictionary_scores_perfect() {
        let report = match_terms(&TerminologyDictionary::new(), "text", "text", "en", "zh");
        assert!(report.verdicts.is_empty());
        assert_eq!(report.score.considered_count, 0);
        assert_eq!(report.score.matched_count, 0);
        assert_eq!(report.score.score, 1.0);
    }

    #[test]
    fn test_zh_to_en_matching() {
        let dict = dictionary(&[("测试", "test"), ("用例", "case"), ("苹果", "apple")]);
        let report = match_terms(
            &dict,
            "这是一个测试用例",
            "This is a Test example.",
            "zh",
            "en",
        );

        // 苹果 is absent from the source and not considered
        assert_eq!(report.score.considered_count, 2);
        assert_eq!(report.score.matched_count, 1);
        assert_eq!(report.score.score, 0.5);
        assert!(report.verdict("测试").unwrap().matched);
        assert!(!report.verdict("用例").unwrap().matched);
        assert!(report.verdict("苹果").is_none());
    }

    #[test]
    fn test_en_to_zh_matching() {
        let dict = dictionary(&[("cat", "猫"), ("dog", "狗")]);
        let report = match_terms(&dict, "The Cat sat with the category.", "猫坐着", "en", "zh-CN");

        assert_eq!(report.score.considered_count, 1);
        assert_eq!(report.score.matched_count, 1);
        assert_eq!(report.score.score, 1.0);
    }

    #[test]
    fn test_source_boundary_excludes_term() {
        let dict = dictionary(&[("cat", "猫")]);
        let report = match_terms(&dict, "category", "类别", "en", "zh");
        assert_eq!(report.score.considered_count, 0);
        assert_eq!(report.score.score, 1.0);
    }

    #[test]
    fn test_target_boundary_rejects_partial_translation() {
        let dict = dictionary(&[("猫", "cat")]);
        let report = match_terms(&dict, "猫", "a category", "zh", "en");
        assert_eq!(report.score.considered_count, 1);
        assert_eq!(report.score.matched_count, 0);
        assert_eq!(report.score.score, 0.0);
    }

    #[test]
    fn test_metacharacter_terms_match_literally() {
        let dict = dictionary(&[("C++", "C++"), ("a.b", "a.b")]);
        let report = match_terms(&dict, "Use C++ and a.b", "用C++和axb", "en", "zh");

        assert_eq!(report.score.considered_count, 2);
        assert!(report.verdict("C++").unwrap().matched);
        assert!(!report.verdict("a.b").unwrap().matched);
    }

    #[test]
    fn test_verdicts_follow_dictionary_order() {
        let dict = dictionary(&[("z", "zed"), ("a", "ay"), ("m", "em")]);
        let report = match_terms(&dict, "a m z", "ay em zed", "en", "en");
        let order: Vec<_> = report.verdicts.iter().map(|v| v.source_term.as_str()).collect();
        assert_eq!(order, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_empty_texts_degrade_gracefully() {
        let dict = dictionary(&[("测试", "test")]);
        let report = match_terms(&dict, "", "", "zh", "en");
        assert_eq!(report.score.considered_count, 0);
        assert_eq!(report.score.score, 1.0);
    }

    #[test]
    fn test_counts_never_exceed_bounds() {
        let dict = dictionary(&[("a", "x"), ("b", "y"), ("c", "z"), ("d", "w")]);
        let cases = [
            ("a b c d", "x y z w"),
            ("a b", "nothing"),
            ("", "x y z w"),
            ("a b c d", ""),
        ];

        for (source, target) in cases {
            let report = match_terms(&dict, source, target, "en", "en");
            assert!(report.score.matched_count <= report.score.considered_count);
            assert!(report.score.considered_count <= dict.len());
            assert!((0.0..=1.0).contains(&report.score.score));
        }
    }

    #[test]
    fn test_matching_is_idempotent() {
        let dict = dictionary(&[("测试", "test"), ("用例", "case")]);
        let matcher = TermMatcher::new();
        let request = MatchRequest::new("测试用例", "test case", "zh", "en");

        let first = matcher.match_terms(&dict, &request);
        let second = matcher.match_terms(&dict, &request);
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_profile_changes_boundary_rule() {
        let dict = dictionary(&[("cat", "猫")]);
        let request = MatchRequest::new("category", "类别", "en", "zh");

        let default = TermMatcher::new().match_terms(&dict, &request);
        assert_eq!(default.score.considered_count, 0);

        let profile = LanguageProfile::new().with_unsegmented(["en"]);
        let custom = TermMatcher::with_profile(profile).match_terms(&dict, &request);
        assert_eq!(custom.score.considered_count, 1);
    }

    #[test]
    fn test_matcher_is_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TermMatcher>();
    }
}
