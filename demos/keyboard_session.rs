//! Keyboard navigation example for countrysel
//!
//! Walks the cursor through a suggestion list, showing wraparound at both
//! ends, Escape, and the blur grace delay that lets a click land.

use countrysel::prelude::*;
use std::time::Duration;

fn show(selector: &CountrySelector<MemoryStore, ManualClock>, label: &str) {
    println!(
        "{label:<18} active={:<6} open={}",
        format!("{:?}", selector.active_index()),
        selector.show_suggestions()
    );
}

fn main() -> Result<()> {
    println!("=== countrysel Keyboard Session Example ===\n");

    let clock = ManualClock::new();
    let mut selector = CountrySelector::with_countries(
        builtin_countries()?,
        MemoryStore::new(),
        clock.clone(),
        SelectorConfig::default(),
    );

    selector.handle_input_change("guinea");
    clock.advance(Duration::from_millis(300));
    selector.poll();
    println!("Suggestions for 'guinea':");
    for (i, country) in selector.suggestions().iter().enumerate() {
        println!("  {i}. {}", country.name());
    }
    println!();

    show(&selector, "start");
    let len = selector.suggestions().len();
    for _ in 0..len {
        selector.handle_key_down(Key::ArrowDown);
    }
    show(&selector, "down x len");
    selector.handle_key_down(Key::ArrowDown);
    show(&selector, "down (wraps)");
    selector.handle_key_down(Key::ArrowUp);
    show(&selector, "up (wraps back)");

    let outcome = selector.handle_key_down(Key::Escape);
    show(&selector, "escape");
    println!("  prevent_default={}", outcome.prevent_default);

    selector.handle_focus();
    show(&selector, "focus");
    selector.handle_blur();
    show(&selector, "blur");
    println!("  list closes in {:?}", selector.time_until_next());
    clock.advance(Duration::from_millis(200));
    selector.poll();
    show(&selector, "after grace");

    Ok(())
}
