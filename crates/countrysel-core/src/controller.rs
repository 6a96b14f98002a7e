// crates/countrysel-core/src/controller.rs

//! # Selection Controller
//!
//! Owns every piece of interactive state of the autocomplete input and the
//! transitions between them:
//!
//! ```text
//! text change ──(debounce)──▶ search ──▶ suggestions ──(arrows)──▶ active index
//!                                                     └──(enter/click)──▶ commit ──▶ store
//! ```
//!
//! Rendering is someone else's job: read the fields (or take a
//! [`SelectorSnapshot`]) and forward input events to the `handle_*` methods.
//! Timers are deadlines on the injected [`Clock`]; call
//! [`CountrySelector::poll`] when [`CountrySelector::next_deadline`] passes.

use crate::config::SelectorConfig;
use crate::error::Result;
use crate::highlight::{highlight, Segment};
use crate::model::{Country, CountryList};
use crate::schedule::{Clock, ScheduledTask};
use crate::search::FuzzyIndex;
use crate::storage::KeyValueStore;
use serde::Serialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Keys the controller reacts to, named after DOM `KeyboardEvent.key` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM key name; unknown names become [`Key::Other`].
    pub fn from_dom(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::ArrowDown,
            "ArrowUp" | "Up" => Key::ArrowUp,
            "Enter" => Key::Enter,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }

    #[inline]
    pub fn is_navigation(self) -> bool {
        !matches!(self, Key::Other)
    }
}

impl FromStr for Key {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Key::from_dom(s))
    }
}

/// What the host should do with the native key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyOutcome {
    /// Suppress the browser default (caret movement, scrolling, form submit).
    pub prevent_default: bool,
    /// A commit happened as a result of this key.
    pub committed: bool,
}

impl KeyOutcome {
    const IGNORED: Self = Self {
        prevent_default: false,
        committed: false,
    };
    const HANDLED: Self = Self {
        prevent_default: true,
        committed: false,
    };
}

/// Status of the country data behind the index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "lowercase")]
pub enum LoadState {
    Loading,
    Ready,
    /// Terminal for this mount; carries the provider's error message.
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SearchOrigin {
    /// Debounced search after typing: opens the list.
    Typed,
    /// Search for a value read back from the store: leaves the list closed.
    Restore,
    /// Re-run after the index changed: leaves visibility alone.
    Refresh,
}

/// One rendered row of the suggestion list.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SuggestionView {
    pub name: String,
    pub code: String,
    pub active: bool,
    pub segments: Vec<Segment>,
}

/// Everything a renderer needs, detached from the controller.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SelectorSnapshot {
    pub input_value: String,
    pub suggestions: Vec<SuggestionView>,
    /// `-1` when nothing is active.
    pub active_index: i64,
    pub show_suggestions: bool,
    /// `show_suggestions` and there is something to show.
    pub should_render_list: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// The autocomplete state machine.
///
/// `S` is the persistence gateway and `C` the time source; both are injected
/// so tests can run against [`MemoryStore`](crate::storage::MemoryStore) and
/// [`ManualClock`](crate::schedule::ManualClock).
#[derive(Debug)]
pub struct CountrySelector<S, C> {
    store: S,
    clock: C,
    config: SelectorConfig,

    index: Option<FuzzyIndex>,
    load_state: LoadState,

    input_value: String,
    suggestions: Vec<Country>,
    active_index: Option<usize>,
    show_suggestions: bool,

    search_task: ScheduledTask,
    hide_task: ScheduledTask,
    /// Origin of a search that was skipped because data was still loading.
    awaiting_data: Option<SearchOrigin>,
    search_count: u64,
    mounted: bool,
}

impl<S: KeyValueStore, C: Clock> CountrySelector<S, C> {
    /// Mounts a selector over a list that is already available.
    pub fn with_countries(list: CountryList, store: S, clock: C, config: SelectorConfig) -> Self {
        let index = FuzzyIndex::new(list, config.search);
        let mut selector = Self::blank(store, clock, config, Some(index), LoadState::Ready);
        selector.initialize();
        selector
    }

    /// Mounts a selector whose list is still being fetched.
    /// Resolve it with [`CountrySelector::on_countries_loaded`].
    pub fn pending(store: S, clock: C, config: SelectorConfig) -> Self {
        let mut selector = Self::blank(store, clock, config, None, LoadState::Loading);
        selector.initialize();
        selector
    }

    fn blank(
        store: S,
        clock: C,
        config: SelectorConfig,
        index: Option<FuzzyIndex>,
        load_state: LoadState,
    ) -> Self {
        Self {
            store,
            clock,
            config,
            index,
            load_state,
            input_value: String::new(),
            suggestions: Vec::new(),
            active_index: None,
            show_suggestions: false,
            search_task: ScheduledTask::new(),
            hide_task: ScheduledTask::new(),
            awaiting_data: None,
            search_count: 0,
            mounted: true,
        }
    }

    fn initialize(&mut self) {
        match self.store.get(&self.config.storage_key) {
            Some(saved) if !saved.is_empty() => {
                debug!(saved = %saved, "restoring last selection");
                self.input_value = saved;
                self.run_search(SearchOrigin::Restore);
            }
            _ => {}
        }
    }

    // -----------------------------------------------------------------------
    // Data provider
    // -----------------------------------------------------------------------

    /// Resolves a [`CountrySelector::pending`] selector. Only the first
    /// resolution counts; later ones are ignored and return `false`.
    pub fn on_countries_loaded(&mut self, result: Result<CountryList>) -> bool {
        if !self.mounted {
            return false;
        }
        if self.load_state != LoadState::Loading {
            warn!(state = ?self.load_state, "country list resolved twice; ignoring");
            return false;
        }
        match result {
            Ok(list) => {
                debug!(countries = list.len(), "country list ready");
                self.index = Some(FuzzyIndex::new(list, self.config.search));
                self.load_state = LoadState::Ready;
                if !self.input_value.is_empty() {
                    let origin = self.awaiting_data.take().unwrap_or(SearchOrigin::Refresh);
                    self.run_search(origin);
                }
            }
            Err(e) => {
                warn!(error = %e, "country list failed to load");
                self.load_state = LoadState::Failed(e.to_string());
                self.clear_suggestions();
                self.show_suggestions = false;
                self.search_task.cancel();
            }
        }
        self.awaiting_data = None;
        true
    }

    /// Swaps in a different list. The index is only rebuilt when `list` is
    /// not the allocation the current index came from. Returns whether it was.
    ///
    /// A failed load stays failed: the list is refused for the rest of the mount.
    pub fn set_countries(&mut self, list: CountryList) -> bool {
        if !self.mounted {
            return false;
        }
        if let LoadState::Failed(error) = &self.load_state {
            warn!(%error, "country list replaced after a failed load; ignoring");
            return false;
        }
        if self.index.as_ref().is_some_and(|ix| ix.shares_list(&list)) {
            return false;
        }
        self.index = Some(FuzzyIndex::new(list, self.config.search));
        self.load_state = LoadState::Ready;
        self.awaiting_data = None;
        self.run_search(SearchOrigin::Refresh);
        true
    }

    // -----------------------------------------------------------------------
    // Event handlers
    // -----------------------------------------------------------------------

    /// Every keystroke. The search runs once the debounce window is quiet.
    pub fn handle_input_change(&mut self, value: &str) {
        if !self.mounted {
            return;
        }
        self.input_value = value.to_string();
        // Rows and cursor belong to the previous text.
        self.clear_suggestions();
        if self.config.debounce_ms == 0 {
            self.search_task.cancel();
            self.run_search(SearchOrigin::Typed);
            return;
        }
        let generation = self
            .search_task
            .schedule(self.clock.now(), self.config.debounce());
        trace!(generation, value, "search scheduled");
    }

    pub fn handle_key_down(&mut self, key: Key) -> KeyOutcome {
        if !self.mounted {
            return KeyOutcome::IGNORED;
        }
        let len = self.suggestions.len();
        match key {
            Key::ArrowDown => {
                self.active_index = step_down(self.active_index, len);
                KeyOutcome::HANDLED
            }
            Key::ArrowUp => {
                self.active_index = step_up(self.active_index, len);
                KeyOutcome::HANDLED
            }
            Key::Enter => {
                let chosen = self
                    .active_index
                    .and_then(|i| self.suggestions.get(i))
                    .cloned();
                match chosen {
                    Some(country) => {
                        self.select_country(&country);
                        KeyOutcome {
                            prevent_default: true,
                            committed: true,
                        }
                    }
                    None => KeyOutcome::HANDLED,
                }
            }
            Key::Escape => {
                self.show_suggestions = false;
                KeyOutcome::HANDLED
            }
            Key::Other => KeyOutcome::IGNORED,
        }
    }

    /// Commits `country`: the only path that writes to the store.
    pub fn select_country(&mut self, country: &Country) {
        if !self.mounted {
            return;
        }
        debug!(name = %country.name, code = %country.code, "country selected");
        self.input_value = country.name.clone();
        self.clear_suggestions();
        self.show_suggestions = false;
        self.search_task.cancel();
        self.awaiting_data = None;
        self.store.set(&self.config.storage_key, &country.name);
    }

    /// Mouse click on row `index`. Returns `false` for an out-of-range row.
    pub fn select_index(&mut self, index: usize) -> bool {
        if !self.mounted {
            return false;
        }
        match self.suggestions.get(index).cloned() {
            Some(country) => {
                self.select_country(&country);
                true
            }
            None => false,
        }
    }

    pub fn handle_focus(&mut self) {
        if !self.mounted {
            return;
        }
        self.hide_task.cancel();
        if !self.suggestions.is_empty() {
            self.show_suggestions = true;
        }
    }

    /// Hides the list after the grace delay, leaving time for a click on a
    /// suggestion to land first.
    pub fn handle_blur(&mut self) {
        if !self.mounted {
            return;
        }
        let generation = self
            .hide_task
            .schedule(self.clock.now(), self.config.blur_grace());
        trace!(generation, "hide scheduled");
    }

    pub fn set_show_suggestions(&mut self, show: bool) {
        if !self.mounted {
            return;
        }
        self.show_suggestions = show;
    }

    /// Mouse hover. Only `None` or an index inside the list is accepted.
    pub fn set_active_index(&mut self, index: Option<usize>) -> bool {
        match index {
            _ if !self.mounted => false,
            Some(i) if i >= self.suggestions.len() => false,
            _ => {
                self.active_index = index;
                true
            }
        }
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    /// Runs whatever deferred work is due. Returns `true` if state changed.
    pub fn poll(&mut self) -> bool {
        if !self.mounted {
            return false;
        }
        let now = self.clock.now();
        let mut changed = false;

        if let Some(generation) = self.search_task.take_due(now) {
            trace!(generation, "debounced search due");
            self.run_search(SearchOrigin::Typed);
            changed = true;
        }
        if self.hide_task.take_due(now).is_some() && self.show_suggestions {
            self.show_suggestions = false;
            changed = true;
        }
        changed
    }

    /// Earliest pending deadline, on the injected clock's timeline.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.search_task.deadline(), self.hide_task.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Time left until [`CountrySelector::next_deadline`], zero if overdue.
    pub fn time_until_next(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.next_deadline().map(|at| at.saturating_sub(now))
    }

    #[inline]
    pub fn has_pending_search(&self) -> bool {
        self.search_task.is_pending()
    }

    /// Unmount: cancels all deferred work. Afterwards every handler is a
    /// no-op, so nothing is scheduled and nothing reaches the store.
    pub fn teardown(&mut self) {
        self.search_task.cancel();
        self.hide_task.cancel();
        self.mounted = false;
        trace!("selector torn down");
    }

    // -----------------------------------------------------------------------
    // Read side
    // -----------------------------------------------------------------------

    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    pub fn suggestions(&self) -> &[Country] {
        &self.suggestions
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_country(&self) -> Option<&Country> {
        self.active_index.and_then(|i| self.suggestions.get(i))
    }

    pub fn show_suggestions(&self) -> bool {
        self.show_suggestions
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.load_state {
            LoadState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Number of search executions so far (restores and refreshes included).
    pub fn search_count(&self) -> u64 {
        self.search_count
    }

    /// Visible, non-empty and backed by ready data.
    pub fn should_render_list(&self) -> bool {
        self.show_suggestions
            && !self.suggestions.is_empty()
            && self.load_state == LoadState::Ready
    }

    /// Detached view of the current state with highlight segments per row.
    pub fn snapshot(&self) -> SelectorSnapshot {
        let suggestions = self
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, c)| SuggestionView {
                name: c.name.clone(),
                code: c.code.clone(),
                active: self.active_index == Some(i),
                segments: row_segments(&c.name, &self.input_value),
            })
            .collect();

        SelectorSnapshot {
            input_value: self.input_value.clone(),
            suggestions,
            active_index: self.active_index.map_or(-1, |i| i as i64),
            show_suggestions: self.show_suggestions,
            should_render_list: self.should_render_list(),
            is_loading: self.is_loading(),
            error: self.error().map(str::to_string),
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.active_index = None;
    }

    fn run_search(&mut self, origin: SearchOrigin) {
        self.active_index = None;

        if self.input_value.is_empty() {
            self.suggestions.clear();
            self.show_suggestions = false;
            return;
        }

        let index = match (&self.load_state, &self.index) {
            (LoadState::Ready, Some(index)) => index,
            (LoadState::Loading, _) => {
                self.suggestions.clear();
                self.awaiting_data = Some(origin);
                return;
            }
            _ => {
                self.suggestions.clear();
                return;
            }
        };

        self.suggestions = index.search(&self.input_value);
        self.search_count += 1;
        if origin == SearchOrigin::Typed {
            self.show_suggestions = true;
        }
        debug!(
            query = %self.input_value,
            results = self.suggestions.len(),
            ?origin,
            "search executed"
        );
    }
}

/// Highlighted label, or the bare label when the query cannot be compiled
/// (an escaped query only fails on regex size limits).
fn row_segments(name: &str, query: &str) -> Vec<Segment> {
    highlight(name, query).unwrap_or_else(|e| {
        warn!(error = %e, "highlight failed; rendering plain label");
        vec![Segment::plain(name)]
    })
}

fn step_down(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(i) if i + 1 < len => Some(i + 1),
        _ => Some(0),
    }
}

fn step_up(active: Option<usize>, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    match active {
        Some(i) if i > 0 && i < len => Some(i - 1),
        _ => Some(len - 1),
    }
}
