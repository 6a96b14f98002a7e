// crates/countrysel-core/src/highlight.rs
use crate::error::Result;
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};

/// A piece of a suggestion label; `emphasized` pieces are query matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: false,
        }
    }

    pub fn emphasized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            emphasized: true,
        }
    }
}

/// Splits `text` on every case-insensitive occurrence of `query`.
///
/// The query is matched literally: it is escaped before the pattern is built,
/// so input such as `"("` or `".*"` never acts as a regular expression.
/// Original casing is kept and empty pieces are dropped.
///
/// ```rust
/// use countrysel_core::highlight::{highlight, Segment};
///
/// let parts = highlight("United States", "united").unwrap();
/// assert_eq!(parts, [Segment::emphasized("United"), Segment::plain(" States")]);
/// ```
pub fn highlight(text: &str, query: &str) -> Result<Vec<Segment>> {
    if query.is_empty() {
        return Ok(vec![Segment::plain(text)]);
    }

    let pattern = RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()?;

    let mut out = Vec::new();
    let mut last = 0;
    for m in pattern.find_iter(text) {
        if m.start() > last {
            out.push(Segment::plain(&text[last..m.start()]));
        }
        out.push(Segment::emphasized(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        out.push(Segment::plain(&text[last..]));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_returns_text_unchanged() {
        assert_eq!(
            highlight("United States", "").unwrap(),
            [Segment::plain("United States")]
        );
    }

    #[test]
    fn splits_prefix_match() {
        assert_eq!(
            highlight("United States", "United").unwrap(),
            [Segment::emphasized("United"), Segment::plain(" States")]
        );
    }

    #[test]
    fn marks_every_occurrence_and_keeps_casing() {
        assert_eq!(
            highlight("Saint Vincent and the Grenadines", "IN").unwrap(),
            [
                Segment::plain("Sa"),
                Segment::emphasized("in"),
                Segment::plain("t V"),
                Segment::emphasized("in"),
                Segment::plain("cent and the Grenad"),
                Segment::emphasized("in"),
                Segment::plain("es"),
            ]
        );
    }

    #[test]
    fn metacharacters_are_literal() {
        assert_eq!(
            highlight("Cocos (Keeling) Islands", "(keel").unwrap(),
            [
                Segment::plain("Cocos "),
                Segment::emphasized("(Keel"),
                Segment::plain("ing) Islands"),
            ]
        );
        assert_eq!(highlight("Chad", ".*").unwrap(), [Segment::plain("Chad")]);
        assert_eq!(highlight("Chad", "[").unwrap(), [Segment::plain("Chad")]);
    }

    #[test]
    fn no_match_is_single_plain_segment() {
        assert_eq!(highlight("Peru", "xyz").unwrap(), [Segment::plain("Peru")]);
    }

    #[test]
    fn whole_text_match() {
        assert_eq!(highlight("Peru", "peru").unwrap(), [Segment::emphasized("Peru")]);
    }
}
