// Wuge name generation CLI
// Command-line front end for the candidate pipeline: pattern selection,
// zodiac filtering, search, paging, and CSV export

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use wuge::{
    CandidateRecord, FilterMode, GenerationOptions, LexiconIndex, NameEngine, NamingConfig,
    SampleData,
};

/// Five-grid name generator - generate and score three-character names
#[derive(Parser, Debug)]
#[command(name = "wuge-gen")]
#[command(about = "Generate candidate names per element pattern, with zodiac filtering", long_about = None)]
#[command(version)]
struct Args {
    /// Pattern keys to generate (e.g. 木木木); defaults to every configured pattern
    #[arg(value_name = "PATTERN")]
    patterns: Vec<String>,

    /// Lexicon CSV path (defaults to the embedded sample)
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Configuration TOML path (defaults to the embedded sample)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Zodiac rule set name; "none" disables zodiac checks
    #[arg(short, long, default_value = "none")]
    zodiac: String,

    /// How zodiac checks on the 2nd/3rd characters gate results
    #[arg(short = 'm', long, value_enum, default_value = "off")]
    filter_mode: FilterModeArg,

    /// Stop generating once this many candidates have been accepted
    #[arg(short, long)]
    limit: Option<usize>,

    /// Case-insensitive search over name and pinyin
    #[arg(short, long)]
    search: Option<String>,

    /// Page number (1-based)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Results per page
    #[arg(long, default_value_t = 20)]
    page_size: usize,

    /// Emit the result table as CSV on stdout instead of cards
    #[arg(long)]
    csv: bool,

    /// Show pattern and destiny meaning texts
    #[arg(long)]
    meanings: bool,

    /// Show lexicon load details
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum FilterModeArg {
    Off,
    ExcludeInauspicious,
    RequireAuspicious,
}

impl From<FilterModeArg> for FilterMode {
    fn from(arg: FilterModeArg) -> Self {
        match arg {
            FilterModeArg::Off => FilterMode::Off,
            FilterModeArg::ExcludeInauspicious => FilterMode::ExcludeInauspicious,
            FilterModeArg::RequireAuspicious => FilterMode::RequireAuspicious,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    // Load the lexicon and configuration (files or embedded samples)
    let (lexicon, stats) = match &args.lexicon {
        Some(path) => LexiconIndex::load_csv(path)?,
        None => SampleData::lexicon()?,
    };
    let config = match &args.config {
        Some(path) => NamingConfig::load(path)?,
        None => SampleData::config()?,
    };

    if args.verbose {
        println!(
            "📚 Lexicon loaded: {} characters in {} stroke buckets",
            lexicon.len(),
            lexicon.stroke_buckets()
        );
        if stats.rejected_count() > 0 {
            println!("   {} rows dropped:", stats.rejected_count());
            for (row, reason) in &stats.rejected {
                println!("   - row {}: {}", row, reason);
            }
        }
        println!();
    }

    // Selected patterns: explicit arguments, or everything configured
    let patterns = if args.patterns.is_empty() {
        config.pattern_keys()
    } else {
        args.patterns
            .iter()
            .map(|p| p.parse())
            .collect::<Result<Vec<_>, _>>()?
    };

    let engine = NameEngine::new(lexicon, config);
    let opts = GenerationOptions {
        patterns,
        zodiac_rule: Some(args.zodiac.clone()),
        filter_mode: args.filter_mode.into(),
        max_results: args.limit,
    };

    let results = engine.assemble(&opts);
    let results = match &args.search {
        Some(query) => results.filtered(query),
        None => results,
    };

    if results.is_empty() {
        println!("❌ No results. Check stroke availability, requested pairs, or filters.");
        return Ok(());
    }

    if args.csv {
        return write_csv(results.rows());
    }

    println!(
        "✅ {} results · {} patterns · {} destiny totals\n",
        results.len(),
        results.distinct_patterns(),
        results.distinct_totals()
    );

    let total = results.len();
    let page_size = args.page_size.max(1);
    let total_pages = total.div_ceil(page_size).max(1);
    let page = args.page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;
    let window = results.page(offset, page_size);

    for (idx, candidate) in window.iter().enumerate() {
        print_candidate(offset + idx + 1, candidate, args.meanings, &args.zodiac);
    }

    println!(
        "Showing {}-{} of {} · Page {}/{}",
        offset + 1,
        offset + window.len(),
        total,
        page,
        total_pages
    );

    Ok(())
}

fn print_candidate(rank: usize, candidate: &CandidateRecord, meanings: bool, zodiac: &str) {
    let grids = &candidate.grids;
    println!("{}. {}  {}", rank, candidate.name, candidate.pinyin);
    println!(
        "   Pattern {} · 總格 {} ({})",
        candidate.computed_pattern, candidate.destiny_total, candidate.destiny_element
    );
    println!(
        "   天格 {}({}) 人格 {}({}) 地格 {}({}) 總格 {}({})",
        grids.heaven.value,
        grids.heaven.element,
        grids.personality.value,
        grids.personality.element,
        grids.earth.value,
        grids.earth.element,
        grids.total.value,
        grids.total.element
    );
    println!("   Calc: {}", candidate.pattern_calc);

    if zodiac != "none" {
        print!("   Zodiac {}:", candidate.overall_zodiac_status());
        for check in &candidate.zodiac_checks {
            if check.matched.is_empty() {
                print!("  {} —", check.glyph);
            } else {
                print!("  {} {}({})", check.glyph, check.status, check.matched);
            }
        }
        println!();
    }

    if meanings {
        println!("   Pattern: {}", candidate.pattern_meaning_en);
        println!("            {}", candidate.pattern_meaning_zh);
        println!(
            "   Destiny {}: {}",
            candidate.destiny_total, candidate.destiny_meaning_en
        );
        println!("            {}", candidate.destiny_meaning_zh);
    }

    println!();
}

fn write_csv(rows: &[CandidateRecord]) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_writer(std::io::stdout());
    writer.write_record([
        "Pattern",
        "Name",
        "Pinyin",
        "DestinyTotal",
        "DestinyElement",
        "PatternCalc",
        "PatternMeaning_EN",
        "PatternMeaning_ZH",
        "DestinyMeaning_EN",
        "DestinyMeaning_ZH",
    ])?;
    for row in rows {
        writer.write_record([
            row.computed_pattern.to_string().as_str(),
            row.name.as_str(),
            row.pinyin.as_str(),
            row.destiny_total.to_string().as_str(),
            row.destiny_element.to_string().as_str(),
            row.pattern_calc.as_str(),
            row.pattern_meaning_en.as_str(),
            row.pattern_meaning_zh.as_str(),
            row.destiny_meaning_en.as_str(),
            row.destiny_meaning_zh.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
