// Wuge naming configuration
// The externally-owned rule tables: the fixed first character, per-pattern
// stroke pairs and total allow-lists, meaning tables, and zodiac rule sets

use crate::types::{CharacterRecord, ConfigError, Element, ElementPattern};
use crate::zodiac::ZodiacRuleSet;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Per-language sentinel for a meaning the tables do not define
pub const NOT_DEFINED_EN: &str = "Not defined.";
pub const NOT_DEFINED_ZH: &str = "（未定義）";

/// The fixed first character (surname) every candidate starts with
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FirstChar {
    pub glyph: String,
    pub pinyin: String,
    pub element: Element,
    pub strokes: u32,
}

/// One pattern key with its requested stroke pairs and optional filters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PatternRule {
    /// The three-element pattern key, e.g. "木木木"
    pub key: ElementPattern,

    /// Requested (stroke2, stroke3) pairs, tried in this order
    #[serde(default)]
    pub pairs: Vec<(u32, u32)>,

    /// Allow-list on the destiny total; absent or empty allows every total
    #[serde(default)]
    pub allowed_totals: Option<Vec<u32>>,

    /// Pattern meaning texts
    #[serde(default)]
    pub meaning_en: Option<String>,
    #[serde(default)]
    pub meaning_zh: Option<String>,
}

/// Meaning text for one destiny total
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DestinyMeaning {
    pub total: u32,
    pub en: String,
    pub zh: String,
}

/// The full configuration consumed by the generator
///
/// Owned by an external collaborator; the core only reads it. Construction
/// fails fast: malformed pattern keys and element labels are
/// deserialization errors, a zero first-character stroke count is rejected.
#[derive(Debug, Clone, Deserialize)]
pub struct NamingConfig {
    pub first_char: FirstChar,

    #[serde(default)]
    pub patterns: Vec<PatternRule>,

    #[serde(default)]
    pub destiny_meanings: Vec<DestinyMeaning>,

    #[serde(default)]
    pub zodiac_rules: Vec<ZodiacRuleSet>,
}

impl NamingConfig {
    /// Parse a TOML configuration string
    pub fn from_toml_str(data: &str) -> Result<Self, ConfigError> {
        let config: NamingConfig = toml::from_str(data)?;
        if config.first_char.strokes == 0 {
            return Err(ConfigError::ZeroStrokes);
        }
        Ok(config)
    }

    /// Load a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// The configured pattern keys, in configuration order
    pub fn pattern_keys(&self) -> Vec<ElementPattern> {
        self.patterns.iter().map(|rule| rule.key).collect()
    }

    /// Find the rule for a pattern key
    pub fn pattern_rule(&self, key: ElementPattern) -> Option<&PatternRule> {
        self.patterns.iter().find(|rule| rule.key == key)
    }

    /// Requested (stroke2, stroke3) pairs for a pattern key
    ///
    /// A key absent from the configuration yields no pairs, not an error.
    pub fn requested_pairs(&self, key: ElementPattern) -> &[(u32, u32)] {
        self.pattern_rule(key)
            .map(|rule| rule.pairs.as_slice())
            .unwrap_or(&[])
    }

    /// Apply the per-pattern destiny-total allow-list
    ///
    /// Absent or empty allow-list means every total is allowed.
    pub fn total_allowed(&self, key: ElementPattern, total: u32) -> bool {
        match self.pattern_rule(key).and_then(|rule| rule.allowed_totals.as_ref()) {
            Some(allowed) if !allowed.is_empty() => allowed.contains(&total),
            _ => true,
        }
    }

    /// Meaning texts for a destiny total, sentinel-filled when undefined
    pub fn destiny_meaning(&self, total: u32) -> (&str, &str) {
        self.destiny_meanings
            .iter()
            .find(|m| m.total == total)
            .map(|m| (m.en.as_str(), m.zh.as_str()))
            .unwrap_or((NOT_DEFINED_EN, NOT_DEFINED_ZH))
    }

    /// Meaning texts for a pattern key, sentinel-filled per language
    pub fn pattern_meaning(&self, key: ElementPattern) -> (&str, &str) {
        let rule = self.pattern_rule(key);
        let en = rule
            .and_then(|r| r.meaning_en.as_deref())
            .unwrap_or(NOT_DEFINED_EN);
        let zh = rule
            .and_then(|r| r.meaning_zh.as_deref())
            .unwrap_or(NOT_DEFINED_ZH);
        (en, zh)
    }

    /// Resolve a zodiac rule set by name
    ///
    /// The "none" sentinel and unrecognized names both resolve to `None`,
    /// which makes every check neutral and disables gating.
    pub fn zodiac_rule(&self, name: &str) -> Option<&ZodiacRuleSet> {
        self.zodiac_rules.iter().find(|rule| rule.name == name)
    }

    /// The first character as a lexicon-shaped record
    ///
    /// Used when the fixed character is not itself a lexicon entry; the
    /// annotation columns default to empty.
    pub fn first_char_record(&self) -> CharacterRecord {
        CharacterRecord {
            glyph: self.first_char.glyph.clone(),
            pinyin: self.first_char.pinyin.clone(),
            strokes: self.first_char.strokes,
            element: self.first_char.element,
            zodiac_tokens: String::new(),
            meaning_en: String::new(),
            meaning_zh: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[first_char]
glyph = "洪"
pinyin = "hóng"
element = "木"
strokes = 10

[[patterns]]
key = "木木木"
pairs = [[11, 10], [1, 20]]
allowed_totals = [31, 41]
meaning_en = "The foundation is stable."
meaning_zh = "基礎安定"

[[patterns]]
key = "木木土"
pairs = [[21, 14]]

[[destiny_meanings]]
total = 31
en = "Grounded and steadfast."
zh = "腳踏實地"

[[zodiac_rules]]
name = "horse"
zodiac = "馬"
auspicious = ["艹", "金"]
inauspicious = ["火", "日"]
"#;

    fn key(s: &str) -> ElementPattern {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_sample() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.first_char.glyph, "洪");
        assert_eq!(config.first_char.element, Element::Wood);
        assert_eq!(config.patterns.len(), 2);
        assert_eq!(config.zodiac_rules.len(), 1);
    }

    #[test]
    fn test_pattern_keys_keep_config_order() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.pattern_keys(), vec![key("木木木"), key("木木土")]);
    }

    #[test]
    fn test_requested_pairs() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.requested_pairs(key("木木木")), &[(11, 10), (1, 20)]);
        // Unknown key: no pairs, no error
        assert!(config.requested_pairs(key("水水水")).is_empty());
    }

    #[test]
    fn test_total_allow_list() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.total_allowed(key("木木木"), 31));
        assert!(config.total_allowed(key("木木木"), 41));
        assert!(!config.total_allowed(key("木木木"), 32));
        // No allow-list configured: everything passes
        assert!(config.total_allowed(key("木木土"), 999));
        // Unknown key: everything passes
        assert!(config.total_allowed(key("水水水"), 7));
    }

    #[test]
    fn test_empty_allow_list_allows_all() {
        let toml = r#"
[first_char]
glyph = "洪"
pinyin = "hóng"
element = "木"
strokes = 10

[[patterns]]
key = "木木木"
pairs = [[11, 10]]
allowed_totals = []
"#;
        let config = NamingConfig::from_toml_str(toml).unwrap();
        assert!(config.total_allowed(key("木木木"), 12345));
    }

    #[test]
    fn test_destiny_meaning_sentinels() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.destiny_meaning(31),
            ("Grounded and steadfast.", "腳踏實地")
        );
        assert_eq!(config.destiny_meaning(99), (NOT_DEFINED_EN, NOT_DEFINED_ZH));
    }

    #[test]
    fn test_pattern_meaning_sentinels_per_language() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.pattern_meaning(key("木木木")),
            ("The foundation is stable.", "基礎安定")
        );
        // Rule exists but defines neither language
        assert_eq!(
            config.pattern_meaning(key("木木土")),
            (NOT_DEFINED_EN, NOT_DEFINED_ZH)
        );
        // Unknown key
        assert_eq!(
            config.pattern_meaning(key("水水水")),
            (NOT_DEFINED_EN, NOT_DEFINED_ZH)
        );
    }

    #[test]
    fn test_zodiac_rule_resolution() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        assert!(config.zodiac_rule("horse").is_some());
        assert!(config.zodiac_rule("none").is_none());
        assert!(config.zodiac_rule("dragon").is_none());
    }

    #[test]
    fn test_bad_pattern_key_fails_fast() {
        let toml = r#"
[first_char]
glyph = "洪"
pinyin = "hóng"
element = "木"
strokes = 10

[[patterns]]
key = "木木"
"#;
        assert!(matches!(
            NamingConfig::from_toml_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_element_label_fails_fast() {
        let toml = r#"
[first_char]
glyph = "洪"
pinyin = "hóng"
element = "風"
strokes = 10
"#;
        assert!(matches!(
            NamingConfig::from_toml_str(toml),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_zero_strokes_fails_fast() {
        let toml = r#"
[first_char]
glyph = "洪"
pinyin = "hóng"
element = "木"
strokes = 0
"#;
        assert!(matches!(
            NamingConfig::from_toml_str(toml),
            Err(ConfigError::ZeroStrokes)
        ));
    }

    #[test]
    fn test_first_char_record_shape() {
        let config = NamingConfig::from_toml_str(SAMPLE).unwrap();
        let record = config.first_char_record();
        assert_eq!(record.glyph, "洪");
        assert_eq!(record.strokes, 10);
        assert_eq!(record.zodiac_tokens, "");
    }
}
