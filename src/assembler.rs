// Wuge result assembler
// Deduplicates and orders generated candidates for presentation, with a
// free-text filter and a page window on top

use crate::types::{CandidateRecord, ElementPattern};
use rustc_hash::FxHashSet;

/// Drop duplicate candidates, keeping the first occurrence
///
/// Duplicates arise when several lexicon entries share identical identifying
/// fields after the cross product. Identity is the tuple
/// (name, pinyin, computed pattern, destiny total). Stable: the surviving
/// rows keep their relative order, so the step is idempotent.
pub fn dedup_candidates(rows: Vec<CandidateRecord>) -> Vec<CandidateRecord> {
    let mut seen: FxHashSet<(String, String, ElementPattern, u32)> = FxHashSet::default();
    rows.into_iter()
        .filter(|row| {
            let (name, pinyin, pattern, total) = row.dedup_key();
            seen.insert((name.to_string(), pinyin.to_string(), pattern, total))
        })
        .collect()
}

/// Sort candidates by their name glyphs in code-point order
///
/// The first character is constant, so this orders by the second and third
/// glyphs; display order becomes reproducible regardless of generation
/// order.
pub fn sort_candidates(rows: &mut [CandidateRecord]) {
    rows.sort_by(|a, b| a.name.cmp(&b.name));
}

/// An assembled, presentation-ready result sequence
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    rows: Vec<CandidateRecord>,
}

impl ResultSet {
    /// Deduplicate and sort raw generator output
    pub fn assemble(raw: Vec<CandidateRecord>) -> Self {
        let mut rows = dedup_candidates(raw);
        sort_candidates(&mut rows);
        Self { rows }
    }

    pub fn rows(&self) -> &[CandidateRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Case-insensitive substring filter over name and pinyin
    ///
    /// A blank query keeps everything.
    pub fn filtered(&self, query: &str) -> ResultSet {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return self.clone();
        }
        let rows = self
            .rows
            .iter()
            .filter(|row| {
                row.name.to_lowercase().contains(&query)
                    || row.pinyin.to_lowercase().contains(&query)
            })
            .cloned()
            .collect();
        ResultSet { rows }
    }

    /// Page window: `limit` rows starting at `offset`
    ///
    /// Out-of-range windows clamp to the available rows; an offset past the
    /// end yields an empty slice.
    pub fn page(&self, offset: usize, limit: usize) -> &[CandidateRecord] {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(limit).min(self.rows.len());
        &self.rows[start..end]
    }

    /// Number of distinct computed patterns among the rows
    pub fn distinct_patterns(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.computed_pattern)
            .collect::<FxHashSet<_>>()
            .len()
    }

    /// Number of distinct destiny totals among the rows
    pub fn distinct_totals(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.destiny_total)
            .collect::<FxHashSet<_>>()
            .len()
    }
}
