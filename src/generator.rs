// Wuge candidate generator
// Enumerates (second, third) character pairs per requested pattern key,
// classifies each triple, and applies the total / pattern / zodiac filters

use crate::config::NamingConfig;
use crate::grids::{compute_five_grids, compute_pattern_elements, stroke_to_element};
use crate::lexicon::LexiconIndex;
use crate::types::{
    CandidateRecord, CharacterRecord, ElementPattern, FilterMode, ZodiacCheck, ZodiacStatus,
};
use crate::zodiac::ZodiacRuleSet;
use log::{debug, warn};

/// Everything one generation run depends on besides the shared index and
/// config. `Eq + Hash` so it doubles as the memoization key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GenerationOptions {
    /// Selected pattern keys, iterated in this order
    pub patterns: Vec<ElementPattern>,

    /// Zodiac rule-set name; `None` or "none" or an unknown name disables
    /// zodiac matching entirely (all checks neutral, no gating)
    pub zodiac_rule: Option<String>,

    /// How 2nd/3rd character checks gate acceptance
    pub filter_mode: FilterMode,

    /// Stop as soon as this many candidates have been accepted; the output
    /// is a stable prefix of the unbounded result sequence
    pub max_results: Option<usize>,
}

/// The candidate generation pipeline
///
/// Reads the shared lexicon index and configuration; every call is
/// independent, deterministic, and side-effect-free.
pub struct CandidateGenerator<'a> {
    lexicon: &'a LexiconIndex,
    config: &'a NamingConfig,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(lexicon: &'a LexiconIndex, config: &'a NamingConfig) -> Self {
        Self { lexicon, config }
    }

    /// Run generation for the given options
    ///
    /// Per pattern key (request order), per requested stroke pair (config
    /// order): cross product of the two stroke buckets, second-character
    /// bucket outer, third inner, both in source row order. A missing
    /// bucket skips the pair; a key with no configured pairs yields
    /// nothing. Neither is an error.
    pub fn generate(&self, opts: &GenerationOptions) -> Vec<CandidateRecord> {
        if opts.max_results == Some(0) {
            return Vec::new();
        }
        let zodiac = self.resolve_zodiac(opts.zodiac_rule.as_deref());

        let mut results = Vec::new();
        'generation: for &pattern_key in &opts.patterns {
            for &(s2, s3) in self.config.requested_pairs(pattern_key) {
                let seconds = self.lexicon.with_strokes(s2);
                let thirds = self.lexicon.with_strokes(s3);
                if seconds.is_empty() || thirds.is_empty() {
                    debug!(
                        "{}: no lexicon entries for stroke pair ({}, {}), skipping",
                        pattern_key, s2, s3
                    );
                    continue;
                }

                for second in seconds {
                    for third in thirds {
                        let candidate = self.build_candidate(
                            pattern_key,
                            second,
                            third,
                            zodiac,
                            opts.filter_mode,
                        );
                        if let Some(candidate) = candidate {
                            results.push(candidate);
                            if opts.max_results.is_some_and(|cap| results.len() >= cap) {
                                break 'generation;
                            }
                        }
                    }
                }
            }
        }
        results
    }

    fn resolve_zodiac(&self, name: Option<&str>) -> Option<&'a ZodiacRuleSet> {
        match name {
            None | Some("none") => None,
            Some(name) => {
                let rule = self.config.zodiac_rule(name);
                if rule.is_none() {
                    warn!("unknown zodiac rule set '{}', all checks are neutral", name);
                }
                rule
            }
        }
    }

    /// Classify one (second, third) pair and assemble the record if it
    /// survives every filter
    fn build_candidate(
        &self,
        requested: ElementPattern,
        second: &CharacterRecord,
        third: &CharacterRecord,
        zodiac: Option<&ZodiacRuleSet>,
        mode: FilterMode,
    ) -> Option<CandidateRecord> {
        let first = self.config.first_char.strokes;
        let (s2, s3) = (second.strokes, third.strokes);

        // Destiny total: plain sum, never +1
        let destiny_total = first + s2 + s3;
        if !self.config.total_allowed(requested, destiny_total) {
            return None;
        }

        // Strict pattern match is the dominant rejection filter
        let breakdown = compute_pattern_elements(first, s2, s3);
        if breakdown.elements != requested {
            return None;
        }

        let first_record = self
            .lexicon
            .lookup(&self.config.first_char.glyph)
            .cloned()
            .unwrap_or_else(|| self.config.first_char_record());

        let check = |record: &CharacterRecord| match zodiac {
            Some(rule) => rule.check(&record.glyph, &record.zodiac_tokens),
            None => ZodiacCheck::neutral(&record.glyph),
        };
        let checks = [check(&first_record), check(second), check(third)];

        // Gating looks at the 2nd/3rd characters only; the 1st is exempt
        if zodiac.is_some() {
            match mode {
                FilterMode::Off => {}
                FilterMode::ExcludeInauspicious => {
                    if checks[1].status == ZodiacStatus::Inauspicious
                        || checks[2].status == ZodiacStatus::Inauspicious
                    {
                        return None;
                    }
                }
                FilterMode::RequireAuspicious => {
                    if checks[1].status != ZodiacStatus::Auspicious
                        || checks[2].status != ZodiacStatus::Auspicious
                    {
                        return None;
                    }
                }
            }
        }

        let (destiny_en, destiny_zh) = self.config.destiny_meaning(destiny_total);
        let (pattern_en, pattern_zh) = self.config.pattern_meaning(breakdown.elements);

        Some(CandidateRecord {
            requested_pattern: requested,
            computed_pattern: breakdown.elements,
            name: format!("{}{}{}", first_record.glyph, second.glyph, third.glyph),
            pinyin: format!("{} {} {}", first_record.pinyin, second.pinyin, third.pinyin),
            grids: compute_five_grids(first, s2, s3),
            pattern_calc: breakdown.calc_text,
            destiny_total,
            destiny_element: stroke_to_element(destiny_total),
            destiny_meaning_en: destiny_en.to_string(),
            destiny_meaning_zh: destiny_zh.to_string(),
            pattern_meaning_en: pattern_en.to_string(),
            pattern_meaning_zh: pattern_zh.to_string(),
            chars: [first_record, second.clone(), third.clone()],
            zodiac_checks: checks,
            filter_mode: mode,
        })
    }
}
