//! # Wuge: Five-Grid Chinese Name Generator
//!
//! Generates candidate three-character names by pairing a fixed first
//! character with second/third characters from a stroke-count-indexed
//! lexicon, then scores every candidate against the traditional rule
//! tables: the four derived grids (天格/人格/地格/總格), the five-element
//! pattern, the destiny-number meaning table, and zodiac-year component
//! compatibility.
//!
//! ## Pipeline
//!
//! 1. **Classify** - stroke sums map to elements (`strokes % 10`); the
//!    heaven grid and the pattern's first component take +1, the destiny
//!    total never does
//! 2. **Enumerate** - per pattern key, per requested (stroke2, stroke3)
//!    pair, the full cross product of the two stroke buckets
//! 3. **Filter** - destiny-total allow-list, strict pattern equality, and
//!    optional zodiac gating on the 2nd/3rd characters (the 1st is exempt)
//! 4. **Assemble** - deduplicate, sort by name glyphs, search, paginate
//!
//! ## Example Usage
//!
//! ```ignore
//! use wuge::{GenerationOptions, SampleData};
//!
//! let (engine, _stats) = SampleData::engine()?;
//!
//! let opts = GenerationOptions {
//!     patterns: vec!["木木木".parse()?],
//!     ..GenerationOptions::default()
//! };
//!
//! let results = engine.assemble(&opts);
//! println!("{} candidates", results.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - **Numeric Classifiers** (`grids`) - pure stroke-count arithmetic
//! - **Zodiac Matcher** (`zodiac`) - tokenized component checks with
//!   inauspicious-first priority
//! - **Lexicon Index** (`lexicon`) - validated CSV rows behind by-stroke
//!   and by-character views
//! - **Candidate Generator** (`generator`) - the enumeration and filter
//!   pipeline
//! - **Result Assembler** (`assembler`) - dedup, ordering, search, paging
//! - **Name Engine** (`engine`) - the façade plus an explicit memo layer

pub mod assembler;
pub mod config;
pub mod data;
pub mod engine;
pub mod generator;
pub mod grids;
pub mod lexicon;
pub mod types;
pub mod zodiac;

// Re-export main types and functions for convenience
pub use assembler::{dedup_candidates, sort_candidates, ResultSet};
pub use config::{NamingConfig, PatternRule, NOT_DEFINED_EN, NOT_DEFINED_ZH};
pub use data::SampleData;
pub use engine::{GenerationCache, NameEngine};
pub use generator::{CandidateGenerator, GenerationOptions};
pub use grids::{compute_five_grids, compute_pattern_elements, stroke_to_element};
pub use lexicon::{LexiconIndex, LexiconStats};
pub use types::{
    CandidateRecord, CharacterRecord, Element, ElementPattern, FilterMode, FiveGrids, Grid,
    RowRejection, ZodiacCheck, ZodiacStatus,
};
pub use zodiac::{tokenize_components, ZodiacRuleSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
