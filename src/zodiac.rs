// Wuge zodiac matcher
// Tokenizes a character's glyph-component cell and checks it against a
// named zodiac year rule set with inauspicious-first priority

use crate::types::{ZodiacCheck, ZodiacStatus};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

/// Token cell delimiters: full-width comma, enumeration comma, half-width comma
static DELIMITERS: Lazy<Regex> =
    Lazy::new(|| Regex::new("[，、,]").expect("delimiter class is a valid regex"));

/// Split a raw token cell into component glyphs
///
/// All three delimiter forms are normalized to one separator before the
/// split; whitespace inside tokens is stripped; empties are dropped; order
/// is preserved.
pub fn tokenize_components(cell: &str) -> Vec<String> {
    DELIMITERS
        .split(cell)
        .map(|token| token.chars().filter(|c| !c.is_whitespace()).collect::<String>())
        .filter(|token| !token.is_empty())
        .collect()
}

/// A named zodiac-year rule set: auspicious and inauspicious component lists
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ZodiacRuleSet {
    /// Selector key, e.g. "horse"
    pub name: String,

    /// The zodiac animal's glyph, e.g. 馬
    pub zodiac: String,

    /// Components considered auspicious for this year
    pub auspicious: Vec<String>,

    /// Components considered inauspicious; matching one is absolute
    pub inauspicious: Vec<String>,
}

impl ZodiacRuleSet {
    /// Check a character's token cell against this rule set
    ///
    /// Two-pass, priority-ordered scan: the inauspicious set is scanned
    /// first and short-circuits on the first hit, because a cell may hold
    /// glyphs from both sets and the inauspicious signal must win. Only
    /// when no token is inauspicious is the auspicious set scanned.
    pub fn check(&self, glyph: &str, cell: &str) -> ZodiacCheck {
        let tokens = tokenize_components(cell);

        for token in &tokens {
            if self.inauspicious.iter().any(|c| c == token) {
                return ZodiacCheck {
                    glyph: glyph.to_string(),
                    status: ZodiacStatus::Inauspicious,
                    matched: token.clone(),
                };
            }
        }

        for token in &tokens {
            if self.auspicious.iter().any(|c| c == token) {
                return ZodiacCheck {
                    glyph: glyph.to_string(),
                    status: ZodiacStatus::Auspicious,
                    matched: token.clone(),
                };
            }
        }

        ZodiacCheck::neutral(glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn horse() -> ZodiacRuleSet {
        ZodiacRuleSet {
            name: "horse".to_string(),
            zodiac: "馬".to_string(),
            auspicious: vec!["艹", "金", "禾", "木", "玉"]
                .into_iter()
                .map(String::from)
                .collect(),
            inauspicious: vec!["火", "田", "日", "車"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }

    #[test]
    fn test_tokenize_all_three_delimiters() {
        assert_eq!(tokenize_components("艹，金、禾,木"), vec!["艹", "金", "禾", "木"]);
    }

    #[test]
    fn test_tokenize_strips_whitespace() {
        assert_eq!(tokenize_components(" 艹 ， 金 "), vec!["艹", "金"]);
        assert_eq!(tokenize_components("艹\u{3000}，金"), vec!["艹", "金"]);
    }

    #[test]
    fn test_tokenize_drops_empties() {
        assert_eq!(tokenize_components("艹，，金"), vec!["艹", "金"]);
        assert!(tokenize_components("").is_empty());
        assert!(tokenize_components("，、,").is_empty());
    }

    #[test]
    fn test_tokenize_preserves_order() {
        assert_eq!(tokenize_components("金、艹"), vec!["金", "艹"]);
    }

    #[test]
    fn test_auspicious_match() {
        let check = horse().check("蘭", "艹");
        assert_eq!(check.status, ZodiacStatus::Auspicious);
        assert_eq!(check.matched, "艹");
        assert_eq!(check.glyph, "蘭");
    }

    #[test]
    fn test_inauspicious_match() {
        let check = horse().check("煌", "火");
        assert_eq!(check.status, ZodiacStatus::Inauspicious);
        assert_eq!(check.matched, "火");
    }

    #[test]
    fn test_neutral_when_nothing_matches() {
        let check = horse().check("之", "氵、心");
        assert_eq!(check.status, ZodiacStatus::Neutral);
        assert_eq!(check.matched, "");
    }

    #[test]
    fn test_empty_cell_is_neutral() {
        let check = horse().check("之", "");
        assert_eq!(check.status, ZodiacStatus::Neutral);
    }

    #[test]
    fn test_inauspicious_wins_regardless_of_order() {
        // Auspicious glyph first in the cell text
        let check = horse().check("x", "艹、火");
        assert_eq!(check.status, ZodiacStatus::Inauspicious);
        assert_eq!(check.matched, "火");

        // Inauspicious glyph first
        let check = horse().check("x", "火、艹");
        assert_eq!(check.status, ZodiacStatus::Inauspicious);
        assert_eq!(check.matched, "火");
    }

    #[test]
    fn test_first_inauspicious_token_is_reported() {
        let check = horse().check("x", "田、火");
        assert_eq!(check.status, ZodiacStatus::Inauspicious);
        assert_eq!(check.matched, "田");
    }

    #[test]
    fn test_membership_is_whole_token() {
        // A token that merely contains a rule glyph is not a match
        let check = horse().check("x", "火車頭");
        assert_eq!(check.status, ZodiacStatus::Neutral);
    }
}
