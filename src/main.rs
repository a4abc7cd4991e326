//! langfinder CLI
//!
//! Loads a catalogue and runs one filter, search or suggestion command,
//! printing JSON on stdout. Logs go to stderr.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, FilterArgs};
use langfinder::config::{self, EngineConfig};
use langfinder::error::{validate_limit, validate_query, AppError};
use langfinder::{CatalogEngine, Debouncer, QueryOutcome, RecordStore, Settled};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean
        .init();

    match run(cli).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error ({}): {}", e.error_code(), e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = config::load_config(cli.config.as_deref())
        .map_err(|e| AppError::Config(format!("{:#}", e)))?;
    let engine = open_engine(cli.catalog.as_deref(), &config)?;

    match cli.command {
        Commands::Bounds => print_json(&engine.filter_bounds()),
        Commands::Filter(args) => {
            let mut engine = engine;
            apply_filters(&mut engine, &args);
            let records = engine.filtered_records();
            info!("{} of {} records pass", records.len(), engine.records().len());
            print_json(&records)
        }
        Commands::Search(args) => {
            validate_query(&args.query)?;
            let mut engine = engine;
            apply_filters(&mut engine, &args.filters);
            engine.set_query(args.query.as_str());

            let mut results = engine.search(&args.query);
            if let Some(limit) = args.limit {
                validate_limit(limit)?;
                results.truncate(limit);
            }
            print_json(&results)
        }
        Commands::Suggest(args) => {
            validate_query(&args.partial)?;
            let limit = args.limit.unwrap_or(config.suggest.default_limit);
            validate_limit(limit)?;
            print_json(&engine.suggest(&args.partial, limit))
        }
        Commands::Watch(args) => {
            let quiet = args
                .debounce_ms
                .map(std::time::Duration::from_millis)
                .unwrap_or_else(|| config.debounce());
            let mut engine = engine;
            apply_filters(&mut engine, &args.filters);
            watch_stdin(engine, quiet).await
        }
    }
}

fn open_engine(
    catalog: Option<&std::path::Path>,
    config: &EngineConfig,
) -> Result<CatalogEngine, AppError> {
    let path = catalog.ok_or_else(|| {
        AppError::InvalidInput(
            "No catalogue given. Use --catalog or set LANGFINDER_CATALOG".to_string(),
        )
    })?;

    let store = RecordStore::load(path)
        .with_context(|| format!("Failed to load catalogue {}", path.display()))?;
    Ok(CatalogEngine::with_config(store, config))
}

fn apply_filters(engine: &mut CatalogEngine, args: &FilterArgs) {
    if !args.tiers.is_empty() {
        engine.set_tiers(args.tiers.iter().copied());
    }
    if !args.families.is_empty() {
        engine.set_families(args.families.iter().cloned());
    }
    if !args.places.is_empty() {
        engine.set_places(args.places.iter().cloned());
    }
    if let Some(range) = args.score {
        engine.set_overall_score_range(range);
    }
    if let Some(range) = args.hours {
        engine.set_study_hours_range(range);
    }
    if let Some(range) = args.population {
        engine.set_population_range(range);
    }
    debug!("Filter state: active={}", engine.filter_state().is_active());
}

/// Feed stdin lines through the debouncer and print every settled result
async fn watch_stdin(engine: CatalogEngine, quiet: std::time::Duration) -> Result<(), AppError> {
    let engine = Arc::new(engine);
    let evaluator = Arc::clone(&engine);
    let mut debouncer = Debouncer::new(quiet, move |query: &str| outcome_json(&evaluator, query));
    let mut settled = debouncer.subscribe();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Watching stdin, quiet period {:?}", quiet);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(query) => {
                        validate_query(&query)?;
                        debouncer.push(query);
                    }
                    None => break,
                }
            }
            changed = settled.changed() => {
                if changed.is_err() {
                    break;
                }
                let latest = settled.borrow_and_update().settled.clone();
                if let Some(result) = latest {
                    print_settled(&result)?;
                }
            }
        }
    }

    // Input closed: evaluate whatever is still pending
    if debouncer.latest().map(|s| s.generation) != Some(debouncer.generation()) {
        debouncer.flush();
    }
    if settled.has_changed().unwrap_or(false) {
        let latest = settled.borrow_and_update().settled.clone();
        if let Some(result) = latest {
            print_settled(&result)?;
        }
    }
    Ok(())
}

fn print_settled(result: &Settled<Value>) -> Result<(), AppError> {
    print_json(&json!({
        "generation": result.generation,
        "query": result.query,
        "results": result.output,
    }))
}

/// Evaluate one query against the current filters
fn outcome_json(engine: &CatalogEngine, query: &str) -> Value {
    let outcome = if query.trim().is_empty() {
        QueryOutcome::Filtered(engine.filtered_records())
    } else {
        QueryOutcome::Ranked(engine.search(query))
    };

    let value = match &outcome {
        QueryOutcome::Filtered(records) => serde_json::to_value(records),
        QueryOutcome::Ranked(results) => serde_json::to_value(results),
    };
    value.unwrap_or_else(|e| {
        warn!("Failed to serialize results for '{}': {}", query, e);
        Value::Null
    })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{}", text);
    Ok(())
}
