// Wuge lexicon index
// Validates tabular source rows and builds the two read-only lookup views:
// by stroke count (one-to-many) and by character (one-to-one)

use crate::types::{CharacterRecord, Element, LexiconError, RowRejection};
use log::debug;
use rustc_hash::FxHashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Fixed source column order: glyph, pinyin, strokes, element, zodiac
/// token cell (optional), English meaning (optional), Chinese meaning
/// (optional).
const COL_GLYPH: usize = 0;
const COL_PINYIN: usize = 1;
const COL_STROKES: usize = 2;
const COL_ELEMENT: usize = 3;
const COL_ZODIAC: usize = 4;
const COL_MEANING_EN: usize = 5;
const COL_MEANING_ZH: usize = 6;

/// Validate one source row into a `CharacterRecord`
///
/// Rows missing the glyph, pinyin, stroke count, or element are rejected
/// with an enumerable reason. The trailing three columns are optional and
/// default to empty.
pub fn validate_row(row: &csv::StringRecord) -> Result<CharacterRecord, RowRejection> {
    let field = |idx: usize| row.get(idx).unwrap_or("").trim();

    let glyph = field(COL_GLYPH);
    if glyph.is_empty() {
        return Err(RowRejection::MissingGlyph);
    }

    let pinyin = field(COL_PINYIN);
    if pinyin.is_empty() {
        return Err(RowRejection::MissingPinyin);
    }

    let strokes_raw = field(COL_STROKES);
    let strokes: u32 = strokes_raw
        .parse()
        .map_err(|_| RowRejection::InvalidStrokes(strokes_raw.to_string()))?;
    if strokes == 0 {
        return Err(RowRejection::InvalidStrokes(strokes_raw.to_string()));
    }

    let element_raw = field(COL_ELEMENT);
    let element = match element_raw.chars().collect::<Vec<_>>().as_slice() {
        [ch] => Element::from_glyph(*ch),
        _ => None,
    }
    .ok_or_else(|| RowRejection::BadElement(element_raw.to_string()))?;

    Ok(CharacterRecord {
        glyph: glyph.to_string(),
        pinyin: pinyin.to_string(),
        strokes,
        element,
        zodiac_tokens: field(COL_ZODIAC).to_string(),
        meaning_en: field(COL_MEANING_EN).to_string(),
        meaning_zh: field(COL_MEANING_ZH).to_string(),
    })
}

/// Load report: how many rows made it into the index, and why the rest fell
#[derive(Debug, Clone, Default)]
pub struct LexiconStats {
    /// Valid rows loaded into the index
    pub loaded: usize,

    /// (1-based row number, reason) for every dropped row
    pub rejected: Vec<(usize, RowRejection)>,
}

impl LexiconStats {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Immutable lexicon with the two derived lookup views
///
/// Built once per source load and never mutated by generation. The
/// by-stroke buckets preserve source row order, which in turn fixes the
/// generator's cross-product order.
#[derive(Debug, Clone)]
pub struct LexiconIndex {
    by_strokes: FxHashMap<u32, Vec<CharacterRecord>>,
    by_char: FxHashMap<String, CharacterRecord>,
    len: usize,
}

impl LexiconIndex {
    /// Build the index from already-validated records
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = CharacterRecord>,
    {
        let mut by_strokes: FxHashMap<u32, Vec<CharacterRecord>> = FxHashMap::default();
        let mut by_char: FxHashMap<String, CharacterRecord> = FxHashMap::default();
        let mut len = 0;

        for record in records {
            by_strokes
                .entry(record.strokes)
                .or_default()
                .push(record.clone());
            // Last write wins on duplicate glyphs
            by_char.insert(record.glyph.clone(), record);
            len += 1;
        }

        Self {
            by_strokes,
            by_char,
            len,
        }
    }

    /// Read and index a CSV source, dropping malformed rows silently
    ///
    /// Dropped rows are counted in the returned stats with their rejection
    /// reason; they are never an error. A header line, if present, falls
    /// out the same way (its stroke column does not parse).
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<(Self, LexiconStats), LexiconError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut stats = LexiconStats::default();

        for (idx, row) in csv_reader.records().enumerate() {
            let row = row?;
            match validate_row(&row) {
                Ok(record) => records.push(record),
                Err(reason) => {
                    debug!("dropping lexicon row {}: {}", idx + 1, reason);
                    stats.rejected.push((idx + 1, reason));
                }
            }
        }

        stats.loaded = records.len();
        Ok((Self::from_records(records), stats))
    }

    /// Read and index a CSV source from a string (embedded sample data)
    pub fn from_csv_str(data: &str) -> Result<(Self, LexiconStats), LexiconError> {
        Self::from_csv_reader(data.as_bytes())
    }

    /// Read and index a CSV source from a file path
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<(Self, LexiconStats), LexiconError> {
        Self::from_csv_reader(File::open(path)?)
    }

    /// All characters with the given stroke count, in source row order
    ///
    /// A stroke count absent from the lexicon yields an empty slice, not an
    /// error.
    pub fn with_strokes(&self, strokes: u32) -> &[CharacterRecord] {
        self.by_strokes
            .get(&strokes)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Look up a single character by glyph
    pub fn lookup(&self, glyph: &str) -> Option<&CharacterRecord> {
        self.by_char.get(glyph)
    }

    /// Number of records in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of distinct stroke counts present
    pub fn stroke_buckets(&self) -> usize {
        self.by_strokes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    #[test]
    fn test_validate_full_row() {
        let record = validate_row(&row(&[
            "桐", "tóng", "10", "木", "木、艹", "paulownia tree", "梧桐",
        ]))
        .unwrap();
        assert_eq!(record.glyph, "桐");
        assert_eq!(record.pinyin, "tóng");
        assert_eq!(record.strokes, 10);
        assert_eq!(record.element, Element::Wood);
        assert_eq!(record.zodiac_tokens, "木、艹");
        assert_eq!(record.meaning_en, "paulownia tree");
        assert_eq!(record.meaning_zh, "梧桐");
    }

    #[test]
    fn test_validate_optional_columns_default_empty() {
        let record = validate_row(&row(&["桐", "tóng", "10", "木"])).unwrap();
        assert_eq!(record.zodiac_tokens, "");
        assert_eq!(record.meaning_en, "");
        assert_eq!(record.meaning_zh, "");
    }

    #[test]
    fn test_validate_rejection_reasons() {
        assert_eq!(
            validate_row(&row(&["", "tóng", "10", "木"])),
            Err(RowRejection::MissingGlyph)
        );
        assert_eq!(
            validate_row(&row(&["桐", "", "10", "木"])),
            Err(RowRejection::MissingPinyin)
        );
        assert_eq!(
            validate_row(&row(&["桐", "tóng", "ten", "木"])),
            Err(RowRejection::InvalidStrokes("ten".to_string()))
        );
        assert_eq!(
            validate_row(&row(&["桐", "tóng", "0", "木"])),
            Err(RowRejection::InvalidStrokes("0".to_string()))
        );
        assert_eq!(
            validate_row(&row(&["桐", "tóng", "10", "?"])),
            Err(RowRejection::BadElement("?".to_string()))
        );
        assert_eq!(
            validate_row(&row(&["桐", "tóng", "10", ""])),
            Err(RowRejection::BadElement("".to_string()))
        );
    }

    #[test]
    fn test_csv_load_drops_malformed_rows() {
        let csv_data = "\
char,pinyin,strokes,element
桐,tóng,10,木,木
梅,méi,11,木
bad,row,not-a-number,木
煜,yù,13,火,火、日
";
        let (index, stats) = LexiconIndex::from_csv_str(csv_data).unwrap();
        // Header and the bad row both fall out via InvalidStrokes
        assert_eq!(index.len(), 3);
        assert_eq!(stats.loaded, 3);
        assert_eq!(stats.rejected_count(), 2);
        assert!(stats
            .rejected
            .iter()
            .all(|(_, r)| matches!(r, RowRejection::InvalidStrokes(_))));
    }

    #[test]
    fn test_by_strokes_preserves_row_order() {
        let csv_data = "桐,tóng,10,木\n恩,ēn,10,土\n洪,hóng,10,木\n";
        let (index, _) = LexiconIndex::from_csv_str(csv_data).unwrap();
        let bucket: Vec<&str> = index
            .with_strokes(10)
            .iter()
            .map(|r| r.glyph.as_str())
            .collect();
        assert_eq!(bucket, vec!["桐", "恩", "洪"]);
    }

    #[test]
    fn test_missing_strokes_yields_empty_slice() {
        let (index, _) = LexiconIndex::from_csv_str("桐,tóng,10,木\n").unwrap();
        assert!(index.with_strokes(99).is_empty());
    }

    #[test]
    fn test_by_char_last_write_wins() {
        let csv_data = "桐,tóng,10,木,,old\n桐,tóng,10,木,,new\n";
        let (index, _) = LexiconIndex::from_csv_str(csv_data).unwrap();
        assert_eq!(index.lookup("桐").unwrap().meaning_en, "new");
        // Both rows still occupy the stroke bucket
        assert_eq!(index.with_strokes(10).len(), 2);
    }

    #[test]
    fn test_stroke_buckets() {
        let csv_data = "桐,tóng,10,木\n梅,méi,11,木\n煜,yù,13,火\n";
        let (index, _) = LexiconIndex::from_csv_str(csv_data).unwrap();
        assert_eq!(index.stroke_buckets(), 3);
        assert_eq!(index.len(), 3);
        assert!(!index.is_empty());
    }
}
