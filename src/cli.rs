//! CLI mode implementation
//!
//! Command-line interface over a catalogue file

use clap::{Args, Parser, Subcommand};
use langfinder::filter::NumericRange;
use std::path::PathBuf;

/// langfinder CLI
#[derive(Parser, Debug)]
#[command(name = "langfinder")]
#[command(about = "Filter and fuzzy-search a language catalogue", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Catalogue file (JSON array of records)
    #[arg(short, long, global = true, env = "LANGFINDER_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Engine configuration file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the available filter options and numeric bounds
    Bounds,
    /// Print the records that pass the given filters
    Filter(FilterArgs),
    /// Rank the filtered records against a query
    Search(SearchArgs),
    /// Typeahead suggestions for a partial query
    Suggest(SuggestArgs),
    /// Read queries from stdin, one per line, and print each settled result
    Watch(WatchArgs),
}

/// Filter flags shared by every record-producing command
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Difficulty tier (repeatable)
    #[arg(short, long = "tier")]
    pub tiers: Vec<u8>,

    /// Language family (repeatable)
    #[arg(short, long = "family")]
    pub families: Vec<String>,

    /// Place where the language is spoken (repeatable)
    #[arg(short, long = "place")]
    pub places: Vec<String>,

    /// Overall score range, `low..high`
    #[arg(long, value_parser = parse_range)]
    pub score: Option<NumericRange>,

    /// Study hours range, `low..high`
    #[arg(long, value_parser = parse_range)]
    pub hours: Option<NumericRange>,

    /// Speaker population range, `low..high`
    #[arg(long, value_parser = parse_range)]
    pub population: Option<NumericRange>,
}

#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Search terms (case-insensitive)
    pub query: String,

    /// Maximum number of results
    #[arg(short, long)]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

#[derive(Args, Debug, Clone)]
pub struct SuggestArgs {
    /// Partial query; empty lists the first entries
    #[arg(default_value = "")]
    pub partial: String,

    /// Maximum number of suggestions
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Quiet period in milliseconds before a query is evaluated
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Parse `low..high`; either end may be omitted to leave it open
pub fn parse_range(s: &str) -> Result<NumericRange, String> {
    let (low, high) = s
        .split_once("..")
        .ok_or_else(|| format!("expected `low..high`, got `{}`", s))?;

    let low = parse_end(low, f64::NEG_INFINITY)?;
    let high = parse_end(high, f64::INFINITY)?;
    Ok(NumericRange::new(low, high))
}

fn parse_end(s: &str, open: f64) -> Result<f64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(open);
    }
    let value: f64 = s
        .parse()
        .map_err(|_| format!("`{}` is not a number", s))?;
    if value.is_nan() {
        return Err("range ends cannot be NaN".to_string());
    }
    Ok(value)
}
