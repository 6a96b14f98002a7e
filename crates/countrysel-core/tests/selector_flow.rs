use countrysel_core::prelude::*;
use std::time::Duration;

fn three_countries() -> CountryList {
    vec![
        Country::new("Argentina", "AR"),
        Country::new("United States", "US"),
        Country::new("United Kingdom", "GB"),
    ]
    .into()
}

fn settle(selector: &mut CountrySelector<MemoryStore, ManualClock>, clock: &ManualClock) {
    while let Some(wait) = selector.time_until_next() {
        clock.advance(wait);
        selector.poll();
    }
}

fn assert_cursor_in_bounds(selector: &CountrySelector<MemoryStore, ManualClock>) {
    if let Some(i) = selector.active_index() {
        assert!(
            i < selector.suggestions().len(),
            "active index {i} outside {} suggestions",
            selector.suggestions().len()
        );
    }
}

#[test]
fn type_navigate_commit_and_persist() {
    let clock = ManualClock::new();
    let store = MemoryStore::new();
    let mut selector = CountrySelector::with_countries(
        three_countries(),
        store.clone(),
        clock.clone(),
        SelectorConfig::default(),
    );

    selector.handle_input_change("unite");
    settle(&mut selector, &clock);
    let names: Vec<_> = selector.suggestions().iter().map(Country::name).collect();
    assert_eq!(names, ["United States", "United Kingdom"]);
    assert!(selector.should_render_list());

    selector.handle_key_down(Key::ArrowDown);
    assert_eq!(selector.active_index(), Some(0));
    selector.handle_key_down(Key::ArrowDown);
    assert_eq!(selector.active_index(), Some(1));

    let outcome = selector.handle_key_down(Key::Enter);
    assert!(outcome.prevent_default && outcome.committed);
    assert_eq!(selector.input_value(), "United Kingdom");
    assert!(selector.suggestions().is_empty());
    assert!(!selector.show_suggestions());
    assert_eq!(
        store.writes(),
        [(SELECTED_COUNTRY_KEY.to_string(), "United Kingdom".to_string())]
    );
}

#[test]
fn commit_survives_a_remount() {
    let store = MemoryStore::new();
    {
        let mut first = CountrySelector::with_countries(
            three_countries(),
            store.clone(),
            ManualClock::new(),
            SelectorConfig::default(),
        );
        first.select_country(&Country::new("Germany", "DE"));
        first.teardown();
    }

    let second = CountrySelector::with_countries(
        builtin_countries().unwrap(),
        store.clone(),
        ManualClock::new(),
        SelectorConfig::default(),
    );
    assert_eq!(second.input_value(), "Germany");
    assert!(!second.show_suggestions());
    assert_eq!(second.suggestions().first().map(Country::code), Some("DE"));
}

#[test]
fn custom_storage_key_is_used_for_both_read_and_write() {
    let config = SelectorConfig {
        storage_key: "checkout.country".into(),
        ..SelectorConfig::default()
    };
    let store = MemoryStore::with_entry("checkout.country", "Chile");
    let mut selector =
        CountrySelector::with_countries(builtin_countries().unwrap(), store.clone(), ManualClock::new(), config);
    assert_eq!(selector.input_value(), "Chile");

    selector.select_country(&Country::new("Peru", "PE"));
    assert_eq!(store.get("checkout.country").as_deref(), Some("Peru"));
    assert_eq!(store.get(SELECTED_COUNTRY_KEY), None);
}

#[test]
fn cursor_stays_in_bounds_through_a_long_session() {
    let clock = ManualClock::new();
    let mut selector = CountrySelector::with_countries(
        builtin_countries().unwrap(),
        MemoryStore::new(),
        clock.clone(),
        SelectorConfig::default(),
    );

    let script: &[&str] = &[
        "type:a", "down", "down", "up", "wait", "down", "down", "down", "type:ar", "up",
        "wait", "up", "up", "type:argentina", "wait", "down", "down", "down", "type:", "wait",
        "down", "up", "type:island", "wait", "up", "hover:3", "hover:400", "down", "blur",
        "wait", "focus", "escape", "down", "type:zzzz", "wait", "down", "enter",
    ];

    for step in script {
        match *step {
            "down" => {
                selector.handle_key_down(Key::ArrowDown);
            }
            "up" => {
                selector.handle_key_down(Key::ArrowUp);
            }
            "enter" => {
                selector.handle_key_down(Key::Enter);
            }
            "escape" => {
                selector.handle_key_down(Key::Escape);
            }
            "wait" => settle(&mut selector, &clock),
            "blur" => selector.handle_blur(),
            "focus" => selector.handle_focus(),
            other => {
                if let Some(text) = other.strip_prefix("type:") {
                    selector.handle_input_change(text);
                } else if let Some(i) = other.strip_prefix("hover:") {
                    selector.set_active_index(Some(i.parse().unwrap()));
                }
            }
        }
        assert_cursor_in_bounds(&selector);
    }
}

#[test]
fn every_search_resets_the_cursor() {
    let clock = ManualClock::new();
    let mut selector = CountrySelector::with_countries(
        builtin_countries().unwrap(),
        MemoryStore::new(),
        clock.clone(),
        SelectorConfig::default(),
    );
    selector.handle_input_change("land");
    settle(&mut selector, &clock);
    assert!(selector.suggestions().len() > 1);

    selector.handle_key_down(Key::ArrowDown);
    selector.handle_key_down(Key::ArrowDown);
    assert_eq!(selector.active_index(), Some(1));

    // Same text again: list membership is unchanged, cursor still resets.
    selector.handle_input_change("land");
    settle(&mut selector, &clock);
    assert_eq!(selector.active_index(), None);
}

#[test]
fn only_the_final_text_is_searched() {
    let clock = ManualClock::new();
    let mut selector = CountrySelector::with_countries(
        builtin_countries().unwrap(),
        MemoryStore::new(),
        clock.clone(),
        SelectorConfig::default(),
    );
    for text in ["f", "fr", "fra", "fran", "franc", "france"] {
        selector.handle_input_change(text);
        clock.advance(Duration::from_millis(120));
        selector.poll();
    }
    settle(&mut selector, &clock);
    assert_eq!(selector.search_count(), 1);
    assert_eq!(selector.suggestions().first().map(Country::code), Some("FR"));
}

#[test]
fn metacharacter_queries_do_not_break_rendering() {
    let clock = ManualClock::new();
    let mut selector = CountrySelector::with_countries(
        builtin_countries().unwrap(),
        MemoryStore::new(),
        clock.clone(),
        SelectorConfig::default(),
    );
    for query in ["(", "cocos (k", "u.s.", "[", "*", "\\"] {
        selector.handle_input_change(query);
        settle(&mut selector, &clock);
        let snapshot = selector.snapshot();
        for row in snapshot.suggestions {
            let joined: String = row.segments.iter().map(|s| s.text.as_str()).collect();
            assert_eq!(joined, row.name);
        }
    }
}
