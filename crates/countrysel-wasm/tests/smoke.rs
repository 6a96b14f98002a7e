use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use countrysel_wasm::{highlight_match, CountrySelectorWidget};

fn immediate_widget() -> CountrySelectorWidget {
    // Zero debounce: searches run inside handle_input_change, no timer needed.
    let config = js_sys::JSON::parse(r#"{ "debounce_ms": 0 }"#).unwrap();
    CountrySelectorWidget::new(config).unwrap()
}

#[wasm_bindgen_test]
fn starts_with_empty_input() {
    #[cfg(target_arch = "wasm32")]
    countrysel_wasm::start();

    let widget = CountrySelectorWidget::new(JsValue::UNDEFINED).unwrap();
    assert_eq!(widget.active_index(), -1);
    assert!(!widget.show_suggestions());
    assert!(!widget.is_loading());
}

#[wasm_bindgen_test]
fn typing_and_keys_drive_the_selector() {
    let widget = immediate_widget();
    widget.handle_input_change("unite");
    assert!(widget.show_suggestions());

    assert!(widget.handle_key_down("ArrowDown"));
    assert_eq!(widget.active_index(), 0);
    assert!(!widget.handle_key_down("a"));

    assert!(widget.handle_key_down("Enter"));
    assert!(widget.input_value().starts_with("United"));
    assert!(!widget.show_suggestions());
}

#[wasm_bindgen_test]
fn hover_rejects_rows_outside_the_list() {
    let widget = immediate_widget();
    widget.handle_input_change("argentina");
    assert!(widget.set_active_index(0));
    assert!(!widget.set_active_index(50));
    assert!(widget.set_active_index(-1));
    assert_eq!(widget.active_index(), -1);
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let config = js_sys::JSON::parse(r#"{ "search": { "threshold": 3 } }"#).unwrap();
    assert!(CountrySelectorWidget::new(config).is_err());
}

#[wasm_bindgen_test]
fn highlight_escapes_the_query() {
    let parts = highlight_match("Cocos (Keeling) Islands", "(k").unwrap();
    let parts = js_sys::Array::from(&parts);
    assert_eq!(parts.length(), 3);
}
