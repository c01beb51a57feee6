//! Dictionary import from the terminology store's export formats.
//!
//! Two shapes are accepted, in JSON or YAML:
//!
//! 1. Simplified: `{"源术语": "target term", ...}`
//! 2. Full: `[{"source_term": "...", "target_term": "...", "domain": "...", ...}, ...]`
//!
//! Document order is preserved. Entries with a missing or empty term are
//! skipped, and a repeated source term replaces the earlier target.
//!
//! A full export may hold several domains and language pairs. The `*_scoped`
//! loaders keep only the rows of one [`DictionaryScope`]; rows without the
//! scope columns are kept.

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use std::fmt;
use std::fs;
use std::path::Path;
use thiserror::Error;

use super::TerminologyDictionary;

/// Errors that can occur when loading a dictionary.
#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("Failed to read dictionary file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported dictionary file extension: {0}")]
    UnsupportedFormat(String),
}

/// The domain and language pair a dictionary is served for.
///
/// Unset fields match every row. Language codes compare case-insensitively,
/// with `_` and `-` treated alike, so `zh_CN` selects rows tagged `zh-CN`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DictionaryScope {
    pub domain: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
}

impl DictionaryScope {
    /// A scope that admits every row.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_languages(
        mut self,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        self.source_language = Some(source_language.into());
        self.target_language = Some(target_language.into());
        self
    }

    fn admits(&self, entry: &StoreEntry) -> bool {
        column_admits(&self.domain, &entry.domain, |a, b| a.trim() == b.trim())
            && column_admits(&self.source_language, &entry.source_language, same_language)
            && column_admits(&self.target_language, &entry.target_language, same_language)
    }
}

/// A scope column admits a row when either side is unset.
fn column_admits(
    wanted: &Option<String>,
    actual: &Option<String>,
    same: impl Fn(&str, &str) -> bool,
) -> bool {
    match (wanted, actual) {
        (Some(wanted), Some(actual)) => same(wanted, actual),
        _ => true,
    }
}

fn normalize_language(code: &str) -> String {
    code.trim().replace('_', "-").to_lowercase()
}

fn same_language(a: &str, b: &str) -> bool {
    normalize_language(a) == normalize_language(b)
}

/// One row of the store's full export. Other columns are ignored.
#[derive(serde::Deserialize)]
struct StoreEntry {
    #[serde(default)]
    source_term: Option<String>,

    #[serde(default)]
    target_term: Option<String>,

    #[serde(default)]
    domain: Option<String>,

    #[serde(default)]
    source_language: Option<String>,

    #[serde(default)]
    target_language: Option<String>,
}

impl TerminologyDictionary {
    /// Parse a dictionary from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, DictionaryError> {
        let dictionary = serde_json::from_str(json)?;
        Ok(dictionary)
    }

    /// Parse a dictionary from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, DictionaryError> {
        let dictionary = serde_yaml::from_str(yaml)?;
        Ok(dictionary)
    }

    /// Parse a dictionary from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a dictionary from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a dictionary from a JSON string, keeping only rows in `scope`.
    pub fn from_json_scoped(json: &str, scope: &DictionaryScope) -> Result<Self, DictionaryError> {
        let mut deserializer = serde_json::Deserializer::from_str(json);
        let dictionary = ScopedImport(scope).deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(dictionary)
    }

    /// Parse a dictionary from a YAML string, keeping only rows in `scope`.
    pub fn from_yaml_scoped(yaml: &str, scope: &DictionaryScope) -> Result<Self, DictionaryError> {
        let dictionary = ScopedImport(scope).deserialize(serde_yaml::Deserializer::from_str(yaml))?;
        Ok(dictionary)
    }

    /// Parse a dictionary file, choosing the format by extension.
    ///
    /// `.json` is JSON; `.yaml` and `.yml` are YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, DictionaryError> {
        Self::from_file_scoped(path, &DictionaryScope::default())
    }

    /// Like [`from_file`](Self::from_file), keeping only rows in `scope`.
    pub fn from_file_scoped(
        path: impl AsRef<Path>,
        scope: &DictionaryScope,
    ) -> Result<Self, DictionaryError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "json" => Self::from_json_scoped(&fs::read_to_string(path)?, scope),
            "yaml" | "yml" => Self::from_yaml_scoped(&fs::read_to_string(path)?, scope),
            other => Err(DictionaryError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Insert an imported entry unless either side is blank.
    fn accept_imported(&mut self, position: usize, source_term: String, target_term: String) {
        if source_term.trim().is_empty() || target_term.trim().is_empty() {
            tracing::warn!(position, "Skipping term entry with an empty field");
            return;
        }

        if let Some(previous) = self.insert(source_term, target_term) {
            tracing::debug!(position, previous = %previous, "Duplicate source term replaced");
        }
    }
}

impl<'de> Deserialize<'de> for TerminologyDictionary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        ScopedImport(&DictionaryScope::default()).deserialize(deserializer)
    }
}

struct ScopedImport<'s>(&'s DictionaryScope);

impl<'de, 's> DeserializeSeed<'de> for ScopedImport<'s> {
    type Value = TerminologyDictionary;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(DictionaryVisitor { scope: self.0 })
    }
}

struct DictionaryVisitor<'s> {
    scope: &'s DictionaryScope,
}

impl<'de, 's> Visitor<'de> for DictionaryVisitor<'s> {
    type Value = TerminologyDictionary;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of source terms to target terms, or a list of term entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut dictionary = TerminologyDictionary::new();
        let mut position = 0;

        // The simplified shape carries no scope columns
        while let Some((source_term, target_term)) = map.next_entry::<String, Option<String>>()? {
            match target_term {
                Some(target_term) => dictionary.accept_imported(position, source_term, target_term),
                None => tracing::warn!(position, "Skipping term entry with a missing field"),
            }
            position += 1;
        }

        Ok(dictionary)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut dictionary = TerminologyDictionary::new();
        let mut position = 0;

        while let Some(entry) = seq.next_element::<StoreEntry>()? {
            if !self.scope.admits(&entry) {
                tracing::debug!(position, "Skipping term entry outside the requested scope");
                position += 1;
                continue;
            }

            match (entry.source_term, entry.target_term) {
                (Some(source_term), Some(target_term)) => {
                    dictionary.accept_imported(position, source_term, target_term);
                }
                _ => tracing::warn!(position, "Skipping term entry with a missing field"),
            }
            position += 1;
        }

        Ok(dictionary)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(TerminologyDictionary::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SIMPLIFIED_JSON: &str = r#"{"香蕉": "banana", "苹果": "apple", "机器学习": "machine learning"}"#;

    const FULL_JSON: &str = r#"[
        {"id": 1, "source_term": "猫", "target_term": "cat", "domain": "general",
         "source_language": "zh", "target_language": "en", "definition": null},
        {"id": 2, "source_term": "狗", "target_term": "dog"},
        {"id": 3, "source_term": "", "target_term": "nothing"},
        {"id": 4, "target_term": "orphan"}
    ]"#;

    #[test]
    fn test_parse_simplified_json_preserves_order() {
        let dict = TerminologyDictionary::from_json(SIMPLIFIED_JSON).unwrap();
        let sources: Vec<_> = dict.iter().map(|p| p.source_term.as_str()).collect();
        assert_eq!(sources, vec!["香蕉", "苹果", "机器学习"]);
        assert_eq!(dict.get("机器学习"), Some("machine learning"));
    }

    #[test]
    fn test_parse_full_json_skips_invalid_entries() {
        let dict = TerminologyDictionary::from_json(FULL_JSON).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("猫"), Some("cat"));
        assert_eq!(dict.get("狗"), Some("dog"));
    }

    #[test]
    fn test_parse_simplified_json_skips_null_and_empty_targets() {
        let dict = TerminologyDictionary::from_json(r#"{"猫": "cat", "狗": null, "鸟": ""}"#).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("猫"), Some("cat"));
        assert!(!dict.contains("狗"));
    }

    #[test]
    fn test_parse_simplified_yaml_skips_null_targets() {
        let dict = TerminologyDictionary::from_yaml("猫: cat\n狗: ~\n").unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("猫"), Some("cat"));
    }

    const MULTI_PAIR_JSON: &str = r#"[
        {"source_term": "材料", "target_term": "material", "domain": "general",
         "source_language": "zh", "target_language": "en"},
        {"source_term": "材料", "target_term": "材料", "domain": "general",
         "source_language": "zh", "target_language": "ja"},
        {"source_term": "合金", "target_term": "alloy", "domain": "metallurgy",
         "source_language": "zh", "target_language": "en"},
        {"source_term": "测试", "target_term": "test"}
    ]"#;

    #[test]
    fn test_scoped_import_keeps_requested_language_pair() {
        let scope = DictionaryScope::new().with_languages("zh", "en");
        let dict = TerminologyDictionary::from_json_scoped(MULTI_PAIR_JSON, &scope).unwrap();

        assert_eq!(dict.get("材料"), Some("material"));
        assert_eq!(dict.get("合金"), Some("alloy"));
        // Rows without scope columns are kept
        assert_eq!(dict.get("测试"), Some("test"));
        assert_eq!(dict.len(), 3);

        let report = crate::match_terms(&dict, "新材料", "new material", "zh", "en");
        assert_eq!(report.score.matched_count, 1);
        assert_eq!(report.score.score, 1.0);
    }

    #[test]
    fn test_scoped_import_filters_domain() {
        let scope = DictionaryScope::new()
            .with_domain("general")
            .with_languages("ZH", "ja");
        let dict = TerminologyDictionary::from_json_scoped(MULTI_PAIR_JSON, &scope).unwrap();

        assert_eq!(dict.get("材料"), Some("材料"));
        assert!(!dict.contains("合金"));
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_unscoped_import_merges_all_rows() {
        let dict = TerminologyDictionary::from_json(MULTI_PAIR_JSON).unwrap();
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get("材料"), Some("材料"));
    }

    #[test]
    fn test_scoped_yaml_and_file() {
        let yaml = r#"
- source_term: 测试
  target_term: test
  source_language: zh-CN
  target_language: en
- source_term: 测试
  target_term: Test
  source_language: zh-TW
  target_language: en
"#;
        let scope = DictionaryScope::new().with_languages("zh_cn", "en");
        let dict = TerminologyDictionary::from_yaml_scoped(yaml, &scope).unwrap();
        assert_eq!(dict.get("测试"), Some("test"));

        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        let dict = TerminologyDictionary::from_file_scoped(file.path(), &scope).unwrap();
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get("测试"), Some("test"));
    }

    #[test]
    fn test_scoped_json_rejects_trailing_content() {
        let result = TerminologyDictionary::from_json_scoped("{} {}", &DictionaryScope::new());
        assert!(matches!(result, Err(DictionaryError::JsonError(_))));
    }

    #[test]
    fn test_duplicate_source_terms_last_wins() {
        let json = r#"[
            {"source_term": "猫", "target_term": "cat"},
            {"source_term": "狗", "target_term": "dog"},
            {"source_term": "猫", "target_term": "feline"}
        ]"#;
        let dict = TerminologyDictionary::from_json(json).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("猫"), Some("feline"));
        assert_eq!(dict.iter().next().unwrap().source_term, "猫");
    }

    #[test]
    fn test_parse_simplified_yaml() {
        let yaml = r#"
香蕉: banana
苹果: apple
"#;
        let dict = TerminologyDictionary::from_yaml(yaml).unwrap();
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.get("苹果"), Some("apple"));
    }

    #[test]
    fn test_parse_full_yaml() {
        let yaml = r#"
- source_term: 测试
  target_term: test
  domain: software
- source_term: 用例
  target_term: test case
"#;
        let dict = TerminologyDictionary::from_yaml(yaml).unwrap();
        assert_eq!(dict.get("用例"), Some("test case"));
    }

    #[test]
    fn test_empty_documents() {
        assert!(TerminologyDictionary::from_json("{}").unwrap().is_empty());
        assert!(TerminologyDictionary::from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_shape_is_error() {
        let result = TerminologyDictionary::from_json(r#""just a string""#);
        assert!(matches!(result, Err(DictionaryError::JsonError(_))));

        let result = TerminologyDictionary::from_json(r#"{"猫": 3}"#);
        assert!(matches!(result, Err(DictionaryError::JsonError(_))));
    }

    #[test]
    fn test_serialization_roundtrip_keeps_order() {
        let dict = TerminologyDictionary::from_json(SIMPLIFIED_JSON).unwrap();
        let json = serde_json::to_string(&dict).unwrap();
        let reparsed = TerminologyDictionary::from_json(&json).unwrap();
        assert_eq!(dict, reparsed);
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let mut json_file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        json_file.write_all(SIMPLIFIED_JSON.as_bytes()).unwrap();
        let dict = TerminologyDictionary::from_file(json_file.path()).unwrap();
        assert_eq!(dict.len(), 3);

        let mut yaml_file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        yaml_file.write_all("猫: cat\n".as_bytes()).unwrap();
        let dict = TerminologyDictionary::from_file(yaml_file.path()).unwrap();
        assert_eq!(dict.get("猫"), Some("cat"));
    }

    #[test]
    fn test_from_file_rejects_unknown_extension() {
        let file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        let result = TerminologyDictionary::from_file(file.path());
        assert!(matches!(result, Err(DictionaryError::UnsupportedFormat(ext)) if ext == "csv"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = TerminologyDictionary::from_json_file("/nonexistent/terms.json");
        assert!(matches!(result, Err(DictionaryError::IoError(_))));
    }
}
