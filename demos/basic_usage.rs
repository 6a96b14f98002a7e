//! Basic usage example for countrysel
//!
//! This example demonstrates how to:
//! - Load the built-in country list
//! - Rank countries against a fuzzy query
//! - Split a label into highlight segments
//! - Drive a selector through a debounced search and persist a pick

use countrysel::prelude::*;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== countrysel Basic Usage Example ===\n");

    // Example 1: The dataset
    println!("--- Example 1: Built-in country list ---");
    let countries = builtin_countries()?;
    println!("Total countries: {}", countries.len());
    for (i, country) in countries.iter().take(5).enumerate() {
        println!("{}. {} ({})", i + 1, country.name(), country.code());
    }
    println!("... and {} more\n", countries.len() - 5);

    // Example 2: Fuzzy search with scores
    println!("--- Example 2: Fuzzy search ---");
    let index = FuzzyIndex::new(countries.clone(), SearchOptions::default());
    for query in ["germny", "unite", "kingdom"] {
        let hits = index.search_scored(query);
        println!("{query:?}: {} match(es)", hits.len());
        for hit in hits.iter().take(3) {
            println!("  {:<24} score {:.3}", hit.country.name(), hit.score);
        }
    }
    println!();

    // Example 3: Highlighting
    println!("--- Example 3: Highlight segments ---");
    for part in highlight("United Arab Emirates", "arab")? {
        if part.emphasized {
            println!("  <b>{}</b>", part.text);
        } else {
            println!("  {:?}", part.text);
        }
    }
    println!();

    // Example 4: A selector session on a manual clock
    println!("--- Example 4: Selector session ---");
    let clock = ManualClock::new();
    let store = MemoryStore::new();
    let mut selector =
        CountrySelector::with_countries(countries, store.clone(), clock.clone(), SelectorConfig::default());

    selector.handle_input_change("swit");
    println!("Typed 'swit', pending search: {}", selector.has_pending_search());
    clock.advance(Duration::from_millis(300));
    selector.poll();
    println!("After debounce: {:?}", selector.suggestions().iter().map(Country::name).collect::<Vec<_>>());

    selector.handle_key_down(Key::ArrowDown);
    selector.handle_key_down(Key::Enter);
    println!("Committed: {}", selector.input_value());
    println!("Stored:    {:?}", store.get(SELECTED_COUNTRY_KEY));

    Ok(())
}
