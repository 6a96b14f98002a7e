//! countrysel-wasm — WebAssembly binding for countrysel-core
//!
//! This crate exposes the autocomplete state machine to JavaScript as a
//! `CountrySelectorWidget`. The widget owns the browser-side collaborators:
//!
//! - `localStorage` as the persistence gateway (key `selectedCountry`)
//! - `performance.now()` as the clock
//! - one `setTimeout` at a time for the debounce window and blur grace delay
//! - an optional `fetch` of the country list (`remote` feature)
//!
//! Rendering stays in JavaScript: bind DOM events to the handlers, read
//! `snapshot()` to draw, and register `set_on_change` to redraw after
//! timer-driven or fetch-driven transitions.
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { CountrySelectorWidget } from 'countrysel-wasm';
//!
//! await init();
//! const widget = new CountrySelectorWidget();          // built-in list
//! // const widget = CountrySelectorWidget.remote('https://restcountries.com/v3.1/all?fields=name,cca2');
//! widget.set_on_change(() => render(widget.snapshot()));
//!
//! input.addEventListener('input', (e) => { widget.handle_input_change(e.target.value); render(widget.snapshot()); });
//! input.addEventListener('keydown', (e) => { if (widget.handle_key_down(e.key)) e.preventDefault(); render(widget.snapshot()); });
//! input.addEventListener('focus', () => { widget.handle_focus(); render(widget.snapshot()); });
//! input.addEventListener('blur', () => widget.handle_blur());
//! ```
//!
//! Call `widget.free()` on unmount; it cancels the pending timer.

use countrysel_core::controller::CountrySelector;
use countrysel_core::data::builtin_countries;
use countrysel_core::highlight::highlight;
use countrysel_core::model::Country;
use countrysel_core::schedule::Clock;
use countrysel_core::storage::KeyValueStore;
use countrysel_core::{Key, SelectorConfig};
use js_sys::Function;
use serde_wasm_bindgen::{from_value, to_value};
use std::cell::RefCell;
use std::fmt::Display;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::log_1(&"Initializing countrysel WASM module...".into());
}

/* --------------------------------------------------------------------------
   Browser collaborators
-------------------------------------------------------------------------- */

/// `window.localStorage`. Missing storage (Node, private mode) reads as empty.
#[derive(Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match Self::storage() {
            Some(storage) => {
                if let Err(e) = storage.set_item(key, value) {
                    console::warn_2(&format!("countrysel: could not persist {key}").into(), &e);
                }
            }
            None => console::warn_1(&"countrysel: localStorage unavailable".into()),
        }
    }
}

/// `performance.now()`, falling back to `Date.now()` outside a window.
#[derive(Debug)]
pub struct PerformanceClock {
    performance: Option<web_sys::Performance>,
}

impl PerformanceClock {
    pub fn new() -> Self {
        Self {
            performance: web_sys::window().and_then(|w| w.performance()),
        }
    }
}

impl Default for PerformanceClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for PerformanceClock {
    fn now(&self) -> Duration {
        let ms = match &self.performance {
            Some(p) => p.now(),
            None => js_sys::Date::now(),
        };
        Duration::from_secs_f64(ms.max(0.0) / 1000.0)
    }
}

/* --------------------------------------------------------------------------
   Widget
-------------------------------------------------------------------------- */

type Selector = CountrySelector<LocalStorageStore, PerformanceClock>;

#[derive(Default)]
struct Timer {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

struct Shared {
    selector: RefCell<Selector>,
    timer: RefCell<Timer>,
    on_change: RefCell<Option<Function>>,
}

fn js_err(e: impl Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

fn parse_config(config: JsValue) -> Result<SelectorConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(SelectorConfig::default());
    }
    let config: SelectorConfig = from_value(config)?;
    config.validate().map_err(js_err)?;
    Ok(config)
}

fn clear_timer(timer: &mut Timer) {
    if let Some(handle) = timer.handle.take() {
        if let Some(window) = web_sys::window() {
            window.clear_timeout_with_handle(handle);
        }
    }
    timer.callback = None;
}

/// Replaces the pending `setTimeout` with one for the selector's next deadline.
fn rearm(shared: &Rc<Shared>) {
    let mut timer = shared.timer.borrow_mut();
    clear_timer(&mut timer);

    let Some(wait) = shared.selector.borrow().time_until_next() else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    let weak: Weak<Shared> = Rc::downgrade(shared);
    let callback = Closure::<dyn FnMut()>::new(move || {
        if let Some(shared) = weak.upgrade() {
            fire(&shared);
        }
    });
    let millis = i32::try_from(wait.as_millis()).unwrap_or(i32::MAX);
    match window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.as_ref().unchecked_ref(),
        millis,
    ) {
        Ok(handle) => {
            timer.handle = Some(handle);
            timer.callback = Some(callback);
        }
        Err(e) => console::error_2(&"countrysel: setTimeout failed".into(), &e),
    }
}

fn fire(shared: &Rc<Shared>) {
    shared.timer.borrow_mut().handle = None;
    let changed = shared.selector.borrow_mut().poll();
    rearm(shared);
    if changed {
        notify(shared);
    }
}

fn notify(shared: &Shared) {
    let callback = shared.on_change.borrow().clone();
    if let Some(f) = callback {
        if let Err(e) = f.call0(&JsValue::NULL) {
            console::error_2(&"countrysel: on_change threw".into(), &e);
        }
    }
}

#[wasm_bindgen]
pub struct CountrySelectorWidget {
    shared: Rc<Shared>,
}

impl CountrySelectorWidget {
    fn from_selector(selector: Selector) -> Self {
        Self {
            shared: Rc::new(Shared {
                selector: RefCell::new(selector),
                timer: RefCell::new(Timer::default()),
                on_change: RefCell::new(None),
            }),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Selector) -> R) -> R {
        let out = f(&mut self.shared.selector.borrow_mut());
        rearm(&self.shared);
        out
    }
}

#[wasm_bindgen]
impl CountrySelectorWidget {
    /// Widget over the built-in country list. `config` is an optional partial
    /// `{ debounce_ms, blur_grace_ms, storage_key, search: { threshold, distance } }`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<CountrySelectorWidget, JsValue> {
        let config = parse_config(config)?;
        let countries = builtin_countries().map_err(js_err)?;
        let selector = CountrySelector::with_countries(
            countries,
            LocalStorageStore,
            PerformanceClock::new(),
            config,
        );
        Ok(Self::from_selector(selector))
    }

    /// Called after timer- or fetch-driven state changes.
    pub fn set_on_change(&self, callback: Option<Function>) {
        *self.shared.on_change.borrow_mut() = callback;
    }

    pub fn handle_input_change(&self, value: &str) {
        self.update(|s| s.handle_input_change(value));
    }

    /// Takes `KeyboardEvent.key`; returns whether to call `preventDefault()`.
    pub fn handle_key_down(&self, key: &str) -> bool {
        self.update(|s| s.handle_key_down(Key::from_dom(key)).prevent_default)
    }

    pub fn handle_focus(&self) {
        self.update(Selector::handle_focus);
    }

    pub fn handle_blur(&self) {
        self.update(Selector::handle_blur);
    }

    /// Mouse click on a row.
    pub fn select_index(&self, index: usize) -> bool {
        self.update(|s| s.select_index(index))
    }

    pub fn select_country(&self, name: String, code: String) {
        self.update(|s| s.select_country(&Country::new(name, code)));
    }

    pub fn set_show_suggestions(&self, show: bool) {
        self.update(|s| s.set_show_suggestions(show));
    }

    /// Mouse enter on a row; `-1` clears. Out-of-range rows are refused.
    pub fn set_active_index(&self, index: i32) -> bool {
        let index = usize::try_from(index).ok();
        self.update(|s| s.set_active_index(index))
    }

    /// Runs due timers now, for hosts that drive time themselves.
    pub fn poll(&self) -> bool {
        self.update(Selector::poll)
    }

    pub fn input_value(&self) -> String {
        self.shared.selector.borrow().input_value().to_string()
    }

    /// `[{ name, code }, ...]`
    pub fn suggestions(&self) -> Result<JsValue, JsValue> {
        Ok(to_value(self.shared.selector.borrow().suggestions())?)
    }

    pub fn active_index(&self) -> i32 {
        self.shared
            .selector
            .borrow()
            .active_index()
            .and_then(|i| i32::try_from(i).ok())
            .unwrap_or(-1)
    }

    pub fn show_suggestions(&self) -> bool {
        self.shared.selector.borrow().show_suggestions()
    }

    pub fn is_loading(&self) -> bool {
        self.shared.selector.borrow().is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.shared.selector.borrow().error().map(str::to_string)
    }

    /// Everything needed to render, including highlight segments per row.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = self.shared.selector.borrow().snapshot();
        Ok(to_value(&snapshot)?)
    }
}

#[cfg(feature = "remote")]
#[wasm_bindgen]
impl CountrySelectorWidget {
    /// Widget whose list is fetched from `url`; `is_loading()` until it resolves.
    pub fn remote(url: String, config: JsValue) -> Result<CountrySelectorWidget, JsValue> {
        let config = parse_config(config)?;
        let selector = CountrySelector::pending(LocalStorageStore, PerformanceClock::new(), config);
        let widget = Self::from_selector(selector);

        let weak = Rc::downgrade(&widget.shared);
        wasm_bindgen_futures::spawn_local(async move {
            let client = reqwest::Client::new();
            let result = countrysel_core::loader::fetch_countries(&client, &url).await;
            if let Err(e) = &result {
                console::error_1(&format!("countrysel: {e}").into());
            }
            // The widget may have been freed while the request was in flight.
            let Some(shared) = weak.upgrade() else {
                return;
            };
            shared.selector.borrow_mut().on_countries_loaded(result);
            rearm(&shared);
            notify(&shared);
        });

        Ok(widget)
    }
}

impl Drop for CountrySelectorWidget {
    fn drop(&mut self) {
        clear_timer(&mut self.shared.timer.borrow_mut());
        self.shared.selector.borrow_mut().teardown();
        *self.shared.on_change.borrow_mut() = None;
    }
}

/// `[{ text, emphasized }, ...]` for `text` split around `query`.
#[wasm_bindgen]
pub fn highlight_match(text: &str, query: &str) -> Result<JsValue, JsValue> {
    let parts = highlight(text, query).map_err(js_err)?;
    Ok(to_value(&parts)?)
}
