// Wuge type definitions
// Core types shared by the lexicon, classifiers, generator, and assembler

use serde::Deserialize;
use thiserror::Error;

/// The five elements (五行), in the fixed classification order
///
/// The ordering is load-bearing: every call site (heaven grid, combination
/// grids, destiny total) classifies against the same table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum Element {
    /// 木
    Wood,
    /// 火
    Fire,
    /// 土
    Earth,
    /// 金
    Metal,
    /// 水
    Water,
}

impl Element {
    /// All five elements in classification order
    pub const ALL: [Element; 5] = [
        Element::Wood,
        Element::Fire,
        Element::Earth,
        Element::Metal,
        Element::Water,
    ];

    /// The element's glyph (木/火/土/金/水)
    pub fn glyph(self) -> char {
        match self {
            Element::Wood => '木',
            Element::Fire => '火',
            Element::Earth => '土',
            Element::Metal => '金',
            Element::Water => '水',
        }
    }

    /// Parse an element from its glyph
    pub fn from_glyph(ch: char) -> Option<Element> {
        match ch {
            '木' => Some(Element::Wood),
            '火' => Some(Element::Fire),
            '土' => Some(Element::Earth),
            '金' => Some(Element::Metal),
            '水' => Some(Element::Water),
            _ => None,
        }
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

impl TryFrom<String> for Element {
    type Error = PatternKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let mut chars = value.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => {
                Element::from_glyph(ch).ok_or(PatternKeyError::UnknownElement(ch))
            }
            _ => Err(PatternKeyError::BadLabel(value)),
        }
    }
}

/// A three-element pattern key, e.g. 木木木
///
/// Candidates survive generation only when their computed pattern equals the
/// requested key exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct ElementPattern(pub [Element; 3]);

impl ElementPattern {
    pub fn new(a: Element, b: Element, c: Element) -> Self {
        ElementPattern([a, b, c])
    }
}

impl std::fmt::Display for ElementPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}{}", self.0[0], self.0[1], self.0[2])
    }
}

impl std::str::FromStr for ElementPattern {
    type Err = PatternKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let chars: Vec<char> = s.trim().chars().collect();
        if chars.len() != 3 {
            return Err(PatternKeyError::WrongLength { actual: chars.len() });
        }
        let mut elements = [Element::Wood; 3];
        for (slot, ch) in elements.iter_mut().zip(chars) {
            *slot = Element::from_glyph(ch).ok_or(PatternKeyError::UnknownElement(ch))?;
        }
        Ok(ElementPattern(elements))
    }
}

impl TryFrom<String> for ElementPattern {
    type Error = PatternKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Errors for element and pattern-key parsing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternKeyError {
    #[error("pattern key must be exactly 3 element glyphs, got {actual}")]
    WrongLength { actual: usize },

    #[error("unknown element glyph '{0}'")]
    UnknownElement(char),

    #[error("invalid element label '{0}'")]
    BadLabel(String),
}

/// One lexicon entry: a character with its reading, strokes, and annotations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterRecord {
    /// The character glyph (identity key; last write wins on duplicates)
    pub glyph: String,

    /// Romanized reading (pinyin)
    pub pinyin: String,

    /// Canonical stroke count (positive)
    pub strokes: u32,

    /// Five-element classification from the source table
    pub element: Element,

    /// Raw zodiac token cell: delimiter-separated glyph components, may be empty
    pub zodiac_tokens: String,

    /// English meaning text, may be empty
    pub meaning_en: String,

    /// Chinese meaning text, may be empty
    pub meaning_zh: String,
}

/// Zodiac compatibility verdict for a single character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZodiacStatus {
    /// 吉: a component matched the auspicious set
    Auspicious,
    /// 凶: a component matched the inauspicious set (absolute priority)
    Inauspicious,
    /// No component matched either set, or no rule set was active
    Neutral,
}

impl std::fmt::Display for ZodiacStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZodiacStatus::Auspicious => write!(f, "吉"),
            ZodiacStatus::Inauspicious => write!(f, "凶"),
            ZodiacStatus::Neutral => write!(f, "—"),
        }
    }
}

/// Result of checking one character's token cell against a zodiac rule set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZodiacCheck {
    /// The checked character's glyph
    pub glyph: String,

    /// Verdict
    pub status: ZodiacStatus,

    /// The matched component, empty when neutral
    pub matched: String,
}

impl ZodiacCheck {
    /// Neutral check for a character (no rule set active, or nothing matched)
    pub fn neutral(glyph: &str) -> Self {
        Self {
            glyph: glyph.to_string(),
            status: ZodiacStatus::Neutral,
            matched: String::new(),
        }
    }
}

/// How zodiac checks on the 2nd/3rd characters gate candidate acceptance
///
/// The 1st (fixed) character is always exempt: its check is reported but
/// never gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// No gating; checks are still computed and reported
    #[default]
    Off,
    /// Reject when the 2nd or 3rd character is inauspicious; neutral passes
    ExcludeInauspicious,
    /// Accept only when both the 2nd and 3rd characters are auspicious
    RequireAuspicious,
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterMode::Off => write!(f, "off"),
            FilterMode::ExcludeInauspicious => write!(f, "exclude-inauspicious"),
            FilterMode::RequireAuspicious => write!(f, "require-auspicious"),
        }
    }
}

/// One derived grid value with its element classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub value: u32,
    pub element: Element,
}

/// The four derived grids (天格/人格/地格/總格)
///
/// Only the heaven grid takes the +1 adjustment. The total never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiveGrids {
    /// 天格: first + 1
    pub heaven: Grid,
    /// 人格: first + second
    pub personality: Grid,
    /// 地格: second + third
    pub earth: Grid,
    /// 總格: first + second + third, with NO +1
    pub total: Grid,
}

/// The element-pattern derivation with its calculation trace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternBreakdown {
    /// first + 1
    pub a: u32,
    /// first + second
    pub b: u32,
    /// second + third (same formula as the earth grid, distinct field)
    pub c: u32,
    /// classify(a) + classify(b) + classify(c), in that order
    pub elements: ElementPattern,
    /// Human-readable trace: each operand, the sum, the element in parentheses
    pub calc_text: String,
}

/// One surviving candidate name with its full derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    /// The pattern key the candidate was generated for
    pub requested_pattern: ElementPattern,

    /// The computed pattern; always equals `requested_pattern` for survivors
    pub computed_pattern: ElementPattern,

    /// Full three-character name
    pub name: String,

    /// Space-joined pinyin of the three characters
    pub pinyin: String,

    /// The four derived grids
    pub grids: FiveGrids,

    /// Pattern calculation trace for display
    pub pattern_calc: String,

    /// Destiny total: sum of the three stroke counts, no +1
    pub destiny_total: u32,

    /// Element of the destiny total
    pub destiny_element: Element,

    /// Destiny meaning texts (sentinel-filled when not configured)
    pub destiny_meaning_en: String,
    pub destiny_meaning_zh: String,

    /// Pattern meaning texts (sentinel-filled when not configured)
    pub pattern_meaning_en: String,
    pub pattern_meaning_zh: String,

    /// Detail records for the three characters, in name order
    pub chars: [CharacterRecord; 3],

    /// Zodiac checks for all three positions (only 2nd/3rd ever gate)
    pub zodiac_checks: [ZodiacCheck; 3],

    /// The filter mode that was applied during generation
    pub filter_mode: FilterMode,
}

impl CandidateRecord {
    /// Identity tuple used by the assembler's deduplication
    pub fn dedup_key(&self) -> (&str, &str, ElementPattern, u32) {
        (
            self.name.as_str(),
            self.pinyin.as_str(),
            self.computed_pattern,
            self.destiny_total,
        )
    }

    /// Whole-name zodiac verdict: any 凶 wins, else any 吉, else neutral
    pub fn overall_zodiac_status(&self) -> ZodiacStatus {
        let statuses = self.zodiac_checks.iter().map(|c| c.status);
        if statuses.clone().any(|s| s == ZodiacStatus::Inauspicious) {
            ZodiacStatus::Inauspicious
        } else if statuses.clone().any(|s| s == ZodiacStatus::Auspicious) {
            ZodiacStatus::Auspicious
        } else {
            ZodiacStatus::Neutral
        }
    }
}

/// Why a lexicon source row was dropped during index construction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    #[error("missing character glyph")]
    MissingGlyph,

    #[error("missing pinyin reading")]
    MissingPinyin,

    #[error("invalid stroke count '{0}'")]
    InvalidStrokes(String),

    #[error("missing or unknown element label '{0}'")]
    BadElement(String),
}

/// Lexicon loading errors (I/O and CSV framing; malformed rows are not errors)
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse lexicon CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration loading errors; construction fails fast on malformed input
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("first character stroke count must be positive")]
    ZeroStrokes,
}
