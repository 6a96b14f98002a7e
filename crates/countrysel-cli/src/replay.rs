//! Scripted sessions: feed a selector the same events a browser would, on a
//! manual clock, so debounce and blur timing are reproducible.

use anyhow::{anyhow, bail, Context, Result};
use countrysel_core::prelude::*;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Type(String),
    Key(Key),
    Wait(Duration),
    Focus,
    Blur,
    Click(usize),
    Hover(usize),
}

impl FromStr for Event {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (verb, arg) = match s.split_once(':') {
            Some((verb, arg)) => (verb, Some(arg)),
            None => (s, None),
        };
        let row = |arg: Option<&str>| -> Result<usize> {
            arg.ok_or_else(|| anyhow!("{verb} needs a row number"))?
                .parse()
                .with_context(|| format!("bad row in {s:?}"))
        };

        Ok(match verb {
            "type" => Event::Type(arg.unwrap_or_default().to_string()),
            "key" => {
                let name = arg.ok_or_else(|| anyhow!("key needs a name"))?;
                match Key::from_dom(name) {
                    Key::Other => bail!("unsupported key {name:?}"),
                    key => Event::Key(key),
                }
            }
            "wait" => {
                let ms: u64 = arg
                    .ok_or_else(|| anyhow!("wait needs milliseconds"))?
                    .parse()
                    .with_context(|| format!("bad duration in {s:?}"))?;
                Event::Wait(Duration::from_millis(ms))
            }
            "focus" => Event::Focus,
            "blur" => Event::Blur,
            "click" => Event::Click(row(arg)?),
            "hover" => Event::Hover(row(arg)?),
            _ => bail!("unknown event {s:?}"),
        })
    }
}

pub fn parse_events<I, T>(raw: I) -> Result<Vec<Event>>
where
    I: IntoIterator<Item = T>,
    T: AsRef<str>,
{
    raw.into_iter().map(|s| s.as_ref().parse()).collect()
}

/// Advances `clock` by `span`, firing every deadline that falls inside it in order.
pub fn wait<S: KeyValueStore>(
    selector: &mut CountrySelector<S, ManualClock>,
    clock: &ManualClock,
    span: Duration,
) {
    let target = clock.now() + span;
    while let Some(at) = selector.next_deadline().filter(|at| *at <= target) {
        clock.set(at.max(clock.now()));
        selector.poll();
    }
    clock.set(target);
    selector.poll();
}

/// Applies `events` in order and returns one transcript line per event.
pub fn run<S: KeyValueStore>(
    selector: &mut CountrySelector<S, ManualClock>,
    clock: &ManualClock,
    events: &[Event],
) -> Vec<String> {
    let mut transcript = Vec::with_capacity(events.len());
    for event in events {
        let note = match event {
            Event::Type(text) => {
                selector.handle_input_change(text);
                format!("type {text:?}")
            }
            Event::Key(key) => {
                let out = selector.handle_key_down(*key);
                format!(
                    "key {key:?} (prevent_default={}, committed={})",
                    out.prevent_default, out.committed
                )
            }
            Event::Wait(span) => {
                wait(selector, clock, *span);
                format!("wait {}ms", span.as_millis())
            }
            Event::Focus => {
                selector.handle_focus();
                "focus".to_string()
            }
            Event::Blur => {
                selector.handle_blur();
                "blur".to_string()
            }
            Event::Click(i) => {
                let ok = selector.select_index(*i);
                format!("click row {i}{}", if ok { "" } else { " (no such row)" })
            }
            Event::Hover(i) => {
                let ok = selector.set_active_index(Some(*i));
                format!("hover row {i}{}", if ok { "" } else { " (no such row)" })
            }
        };
        transcript.push(format!(
            "{note:<48} | text={:?} rows={} active={} open={}",
            selector.input_value(),
            selector.suggestions().len(),
            selector
                .active_index()
                .map_or_else(|| "-".to_string(), |i| i.to_string()),
            selector.show_suggestions()
        ));
    }
    transcript
}
