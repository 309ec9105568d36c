// Embedded sample data
// Compiles the sample lexicon and configuration in at build time, so the
// binary and the integration tests work without external files

use crate::config::NamingConfig;
use crate::engine::NameEngine;
use crate::lexicon::{LexiconIndex, LexiconStats};

/// Embedded sample lexicon (CSV, header row included)
pub const LEXICON_CSV: &str = include_str!("../data/lexicon.csv");

/// Embedded sample configuration (TOML)
pub const CONFIG_TOML: &str = include_str!("../data/config.toml");

/// Accessors for the embedded sample data
pub struct SampleData;

impl SampleData {
    /// Raw sample lexicon CSV
    pub fn lexicon_csv() -> &'static str {
        LEXICON_CSV
    }

    /// Raw sample configuration TOML
    pub fn config_toml() -> &'static str {
        CONFIG_TOML
    }

    /// Build an indexed lexicon from the embedded sample
    pub fn lexicon() -> Result<(LexiconIndex, LexiconStats), Box<dyn std::error::Error>> {
        let (index, stats) = LexiconIndex::from_csv_str(LEXICON_CSV)?;
        Ok((index, stats))
    }

    /// Parse the embedded sample configuration
    pub fn config() -> Result<NamingConfig, Box<dyn std::error::Error>> {
        Ok(NamingConfig::from_toml_str(CONFIG_TOML)?)
    }

    /// Build a ready-to-use engine from the embedded samples
    pub fn engine() -> Result<(NameEngine, LexiconStats), Box<dyn std::error::Error>> {
        let (lexicon, stats) = Self::lexicon()?;
        let config = Self::config()?;
        Ok((NameEngine::new(lexicon, config), stats))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_embedded() {
        assert!(!LEXICON_CSV.is_empty(), "lexicon sample should be embedded");
        assert!(!CONFIG_TOML.is_empty(), "config sample should be embedded");
    }

    #[test]
    fn test_sample_lexicon_loads() {
        let (index, stats) = SampleData::lexicon().unwrap();
        assert!(index.len() > 0);
        // Only the header row is dropped
        assert_eq!(stats.rejected_count(), 1);
        assert!(index.lookup("洪").is_some());
    }

    #[test]
    fn test_sample_config_parses() {
        let config = SampleData::config().unwrap();
        assert_eq!(config.first_char.glyph, "洪");
        assert_eq!(config.patterns.len(), 3);
        assert!(config.zodiac_rule("horse").is_some());
    }

    #[test]
    fn test_sample_engine_builds() {
        let (engine, _) = SampleData::engine().unwrap();
        let (records, buckets) = engine.stats();
        assert!(records > 0);
        assert!(buckets > 0);
    }
}
