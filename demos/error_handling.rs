//! Error handling example for countrysel
//!
//! This example demonstrates how bad data, bad settings and a failed load
//! surface, and that none of them take the selector down.

use countrysel::loader;
use countrysel::model::validate_countries;
use countrysel::prelude::*;

fn main() -> Result<()> {
    println!("=== countrysel Error Handling Example ===\n");

    // Example 1: Invalid country lists are rejected up front
    println!("--- Example 1: Validating country data ---");
    let lists = vec![
        vec![Country::new("", "XX")],
        vec![Country::new("France", "FR"), Country::new("Francia", "FR")],
        vec![Country::new("Peru", "PE")],
    ];
    for list in lists {
        match validate_countries(list) {
            Ok(list) => println!("  ✓ {} countr(y/ies) accepted", list.len()),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    println!();

    // Example 2: Malformed payloads
    println!("--- Example 2: Parsing payloads ---");
    for payload in [r#"{"oops": true}"#, r#"[{"name": {"common": "Chad"}, "cca2": "TD"}]"#] {
        match loader::from_slice(payload.as_bytes()) {
            Ok(list) => println!("  ✓ parsed {}", list[0].name()),
            Err(e) => println!("  ✗ {e}"),
        }
    }
    println!();

    // Example 3: Settings outside their range
    println!("--- Example 3: Validating settings ---");
    let config = SelectorConfig {
        search: SearchOptions { threshold: 2.0, ..SearchOptions::default() },
        ..SelectorConfig::default()
    };
    if let Err(e) = config.validate() {
        println!("  ✗ {e}");
    }
    println!();

    // Example 4: A failed load leaves a usable, inert selector
    println!("--- Example 4: Failed load ---");
    let mut selector =
        CountrySelector::pending(MemoryStore::new(), ManualClock::new(), SelectorConfig::default());
    println!("  loading: {}", selector.is_loading());
    selector.on_countries_loaded(Err(SelectorError::Fetch("HTTP 503".into())));
    println!("  loading: {}, error: {:?}", selector.is_loading(), selector.error());
    selector.handle_input_change("spain");
    println!("  input still tracked: {:?}", selector.input_value());
    println!("  suggestions: {}", selector.suggestions().len());

    Ok(())
}
