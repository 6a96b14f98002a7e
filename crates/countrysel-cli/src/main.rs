//! countrysel — command-line front-end for countrysel-core
//!
//! Usage examples
//! --------------
//!
//! - Rank matches for a query
//!   $ countrysel search unite
//!
//! - See how the dropdown highlights a label
//!   $ countrysel highlight "United States" unite
//!
//! - Remember a selection (by ISO code or exact name) and read it back
//!   $ countrysel select AR
//!   $ countrysel last
//!
//! - Replay a keyboard session against the real state machine
//!   $ countrysel replay type:unite wait:300 key:ArrowDown key:ArrowDown key:Enter
//!
//! Data source
//! -----------
//!
//! By default the built-in ISO 3166-1 list is used. `--input <path>` loads a
//! `.json` / `.json.gz` list and `--url <url>` fetches one over HTTP.
mod args;

use crate::args::{CliArgs, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use countrysel_core::prelude::*;
use countrysel_cli::{render, replay};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    let countries = load_countries(&args)?;
    let store = FileStore::new(&args.store);
    let color = !args.no_color && std::io::stdout().is_terminal();

    match args.command {
        Commands::Countries => {
            for c in countries.iter() {
                println!("{} ({})", c.name, c.code);
            }
        }

        Commands::Search { query, limit } => {
            let index = FuzzyIndex::new(countries, config.search);
            let hits = index.search_scored(&query);
            if hits.is_empty() {
                println!("No countries match: {query}");
            }
            for hit in hits.into_iter().take(limit) {
                let parts = highlight(&hit.country.name, &query)?;
                println!(
                    "{:.3}  {} ({})",
                    hit.score,
                    render::segments(&parts, color),
                    hit.country.code
                );
            }
        }

        Commands::Highlight { text, query } => {
            let parts = highlight(&text, &query)?;
            println!("{}", render::segments(&parts, color));
        }

        Commands::Select { country } => {
            let Some(found) = find_country(&countries, &country).cloned() else {
                bail!("No country found for: {country}");
            };
            let mut selector =
                CountrySelector::with_countries(countries, &store, ManualClock::new(), config);
            selector.select_country(&found);
            println!("Selected {} ({})", found.name, found.code);
        }

        Commands::Last => match store.get(&config.storage_key) {
            Some(name) => println!("{name}"),
            None => eprintln!("No country selected yet ({})", store.path().display()),
        },

        Commands::Replay { events, json } => {
            let events = replay::parse_events(&events)?;
            let clock = ManualClock::new();
            let mut selector =
                CountrySelector::with_countries(countries, &store, clock.clone(), config);
            for line in replay::run(&mut selector, &clock, &events) {
                println!("{line}");
            }
            let snapshot = selector.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else {
                print!("{}", render::snapshot(&snapshot, color));
            }
            selector.teardown();
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &CliArgs) -> Result<SelectorConfig> {
    let mut config = match &args.config {
        Some(path) => SelectorConfig::load_from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SelectorConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.search.threshold = threshold;
    }
    config.validate()?;
    Ok(config)
}

fn load_countries(args: &CliArgs) -> Result<CountryList> {
    let list = if let Some(path) = &args.input {
        countrysel_core::loader::load_from_path(path)
            .with_context(|| format!("loading countries from {}", path.display()))?
    } else if let Some(url) = &args.url {
        fetch(url)?
    } else {
        builtin_countries()?
    };
    tracing::debug!(countries = list.len(), "country list loaded");
    Ok(list)
}

#[cfg(feature = "fetch")]
fn fetch(url: &str) -> Result<CountryList> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    let client = reqwest::Client::new();
    runtime
        .block_on(countrysel_core::loader::fetch_countries(&client, url))
        .with_context(|| format!("fetching countries from {url}"))
}

#[cfg(not(feature = "fetch"))]
fn fetch(url: &str) -> Result<CountryList> {
    bail!("cannot fetch {url}: built without the `fetch` feature")
}
