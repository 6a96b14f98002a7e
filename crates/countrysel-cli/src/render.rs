//! Terminal rendering of highlight segments and the suggestion list.

use countrysel_core::{Segment, SelectorSnapshot};
use std::fmt::Write;

const EMPHASIS: &str = "\x1b[1;34m";
const RESET: &str = "\x1b[0m";

/// Joins segments, wrapping emphasized ones in bold blue (or `[..]` without color).
pub fn segments(parts: &[Segment], color: bool) -> String {
    let mut out = String::new();
    for part in parts {
        match (part.emphasized, color) {
            (false, _) => out.push_str(&part.text),
            (true, true) => {
                out.push_str(EMPHASIS);
                out.push_str(&part.text);
                out.push_str(RESET);
            }
            (true, false) => {
                out.push('[');
                out.push_str(&part.text);
                out.push(']');
            }
        }
    }
    out
}

/// The input line followed by the dropdown, if the selector would show one.
pub fn snapshot(snap: &SelectorSnapshot, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "> {}", snap.input_value);
    if snap.is_loading {
        out.push_str("  (loading countries...)\n");
        return out;
    }
    if let Some(err) = &snap.error {
        let _ = writeln!(out, "  (error: {err})");
        return out;
    }
    if snap.should_render_list {
        for row in &snap.suggestions {
            let marker = if row.active { '*' } else { ' ' };
            let _ = writeln!(out, " {marker} {} ({})", segments(&row.segments, color), row.code);
        }
    }
    out
}
