// Wuge name engine
// Owns the shared read-only state (lexicon index + configuration) and
// fronts the pure generator, with an explicit memoization layer on top

use crate::assembler::ResultSet;
use crate::config::NamingConfig;
use crate::generator::{CandidateGenerator, GenerationOptions};
use crate::lexicon::LexiconIndex;
use crate::types::CandidateRecord;
use rustc_hash::FxHashMap;

/// The main generation engine
///
/// The lexicon index and configuration are constructed once and only read
/// afterwards; every generation call is independent and side-effect-free,
/// so calls may run back to back (or, if ever parallelized, concurrently)
/// without coordination.
pub struct NameEngine {
    lexicon: LexiconIndex,
    config: NamingConfig,
}

impl NameEngine {
    pub fn new(lexicon: LexiconIndex, config: NamingConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn lexicon(&self) -> &LexiconIndex {
        &self.lexicon
    }

    pub fn config(&self) -> &NamingConfig {
        &self.config
    }

    /// Run the candidate pipeline; deterministic and cache-oblivious
    pub fn generate(&self, opts: &GenerationOptions) -> Vec<CandidateRecord> {
        CandidateGenerator::new(&self.lexicon, &self.config).generate(opts)
    }

    /// Generate, then deduplicate and sort for presentation
    pub fn assemble(&self, opts: &GenerationOptions) -> ResultSet {
        ResultSet::assemble(self.generate(opts))
    }

    /// Lexicon statistics: (records, distinct stroke counts)
    pub fn stats(&self) -> (usize, usize) {
        (self.lexicon.len(), self.lexicon.stroke_buckets())
    }
}

/// Memoization layer in front of the engine
///
/// Keyed on the full `GenerationOptions`; the generator itself stays
/// deterministic and cache-oblivious, so a hit returns exactly what a
/// fresh run would.
#[derive(Default)]
pub struct GenerationCache {
    entries: FxHashMap<GenerationOptions, Vec<CandidateRecord>>,
}

impl GenerationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached rows for these options, generating on first use
    pub fn get_or_generate(
        &mut self,
        engine: &NameEngine,
        opts: &GenerationOptions,
    ) -> &[CandidateRecord] {
        self.entries
            .entry(opts.clone())
            .or_insert_with(|| engine.generate(opts))
            .as_slice()
    }

    /// Number of memoized option sets
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every memoized run (e.g. after swapping the engine)
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
