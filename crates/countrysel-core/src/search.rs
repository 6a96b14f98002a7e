// crates/countrysel-core/src/search.rs

//! # Fuzzy Search Index
//!
//! Approximate matching of a query against country names.
//!
//! Scores live in `[0, 1]`: `0.0` is an exact match at the start of the name,
//! `1.0` matches anything. A record is a hit when its score is at or below
//! [`SearchOptions::threshold`].
//!
//! For every candidate window of the name (widths `len(q) - 1 ..= len(q) + 1`)
//! the score is the indel mismatch between query and window plus a location
//! penalty of `start / distance`; the best window wins.

use crate::error::{Result, SelectorError};
use crate::model::{Country, CountryList};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::trace;

pub const DEFAULT_THRESHOLD: f64 = 0.3;
pub const DEFAULT_DISTANCE: usize = 100;

/// Tuning knobs for [`FuzzyIndex`]. The match key is always the country name.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// 0 = exact match only, 1 = match anything.
    pub threshold: f64,
    /// How many characters away from the start a match may drift before the
    /// location penalty alone reaches a full mismatch.
    pub distance: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            distance: DEFAULT_DISTANCE,
        }
    }
}

impl SearchOptions {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(SelectorError::Config(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        if self.distance == 0 {
            return Err(SelectorError::Config("distance must be positive".into()));
        }
        Ok(())
    }
}

/// A ranked search result.
#[derive(Clone, Copy, Debug)]
pub struct Hit<'a> {
    pub country: &'a Country,
    pub score: f64,
}

/// Index over one country list.
///
/// The index is tied to the identity of the list it was built from; use
/// [`FuzzyIndex::shares_list`] to decide whether a new list needs a rebuild.
#[derive(Clone, Debug)]
pub struct FuzzyIndex {
    countries: CountryList,
    /// Lowercased name characters, parallel to `countries`.
    keys: Vec<Vec<char>>,
    options: SearchOptions,
}

impl FuzzyIndex {
    pub fn new(countries: CountryList, options: SearchOptions) -> Self {
        let keys = countries
            .iter()
            .map(|c| c.name.to_lowercase().chars().collect())
            .collect();
        Self {
            countries,
            keys,
            options,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn countries(&self) -> &CountryList {
        &self.countries
    }

    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// `true` when `list` is the very list (same allocation) this index was built from.
    pub fn shares_list(&self, list: &CountryList) -> bool {
        Arc::ptr_eq(&self.countries, list)
    }

    /// Ranked hits, best first. Ties keep the source list order.
    pub fn search_scored(&self, query: &str) -> Vec<Hit<'_>> {
        let q: Vec<char> = query.trim().to_lowercase().chars().collect();
        if q.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<Hit<'_>> = self
            .countries
            .iter()
            .zip(&self.keys)
            .filter_map(|(country, key)| {
                let score = score(&q, key, self.options.distance);
                (score <= self.options.threshold).then_some(Hit { country, score })
            })
            .collect();

        // `sort_by` is stable, which gives the tie-break on source order.
        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        trace!(query, hits = hits.len(), "fuzzy search");
        hits
    }

    /// Ranked matching countries, best first.
    ///
    /// ```rust
    /// use countrysel_core::{Country, FuzzyIndex, SearchOptions};
    ///
    /// let list = vec![
    ///     Country::new("Argentina", "AR"),
    ///     Country::new("United States", "US"),
    ///     Country::new("United Kingdom", "GB"),
    /// ];
    /// let index = FuzzyIndex::new(list.into(), SearchOptions::default());
    /// let names: Vec<_> = index.search("unite").into_iter().map(|c| c.name).collect();
    /// assert_eq!(names, ["United States", "United Kingdom"]);
    /// ```
    pub fn search(&self, query: &str) -> Vec<Country> {
        self.search_scored(query)
            .into_iter()
            .map(|hit| hit.country.clone())
            .collect()
    }
}

/// Best window score of `query` inside `name`. Both are lowercased characters.
fn score(query: &[char], name: &[char], distance: usize) -> f64 {
    let n = query.len();
    if name.len() <= n {
        return mismatch(query, name).min(1.0);
    }

    let mut best = 1.0_f64;
    for width in n.saturating_sub(1).max(1)..=n + 1 {
        let width = width.min(name.len());
        for start in 0..=name.len() - width {
            let location = start as f64 / distance as f64;
            if location >= best {
                break;
            }
            let candidate = mismatch(query, &name[start..start + width]) + location;
            if candidate < best {
                best = candidate;
            }
        }
        if best == 0.0 {
            break;
        }
    }
    best
}

#[inline]
fn mismatch(a: &[char], b: &[char]) -> f64 {
    1.0 - rapidfuzz::fuzz::ratio(a.iter().copied(), b.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CountryList {
        vec![
            Country::new("Argentina", "AR"),
            Country::new("United States", "US"),
            Country::new("United Kingdom", "GB"),
        ]
        .into()
    }

    fn names(list: &[Country]) -> Vec<&str> {
        list.iter().map(Country::name).collect()
    }

    #[test]
    fn prefix_query_returns_both_united_entries_in_source_order() {
        let index = FuzzyIndex::new(sample(), SearchOptions::default());
        let out = index.search("unite");
        assert_eq!(names(&out), ["United States", "United Kingdom"]);
    }

    #[test]
    fn empty_and_blank_queries_match_nothing() {
        let index = FuzzyIndex::new(sample(), SearchOptions::default());
        assert!(index.search("").is_empty());
        assert!(index.search("   ").is_empty());
    }

    #[test]
    fn tolerates_a_typo() {
        let index = FuzzyIndex::new(sample(), SearchOptions::default());
        let out = index.search("argentna");
        assert_eq!(names(&out), ["Argentina"]);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = FuzzyIndex::new(sample(), SearchOptions::default());
        assert_eq!(index.search("KINGDOM").len(), 1);
    }

    #[test]
    fn exact_prefix_ranks_ahead_of_later_match() {
        let list: CountryList = vec![
            Country::new("Papua New Guinea", "PG"),
            Country::new("Guinea", "GN"),
        ]
        .into();
        let index = FuzzyIndex::new(list, SearchOptions::default());
        let out = index.search("guinea");
        assert_eq!(out.first().map(Country::code), Some("GN"));
    }

    #[test]
    fn scores_stay_within_threshold() {
        let index = FuzzyIndex::new(crate::data::builtin_countries().unwrap(), SearchOptions::default());
        for q in ["a", "uni", "land", "zzz", "republic"] {
            for hit in index.search_scored(q) {
                assert!(hit.score <= DEFAULT_THRESHOLD, "{q}: {} scored {}", hit.country.name, hit.score);
            }
        }
    }

    #[test]
    fn raising_threshold_never_shrinks_results() {
        let list = crate::data::builtin_countries().unwrap();
        for q in ["unite", "ger", "islnd", "xq"] {
            let mut previous = 0;
            for threshold in [0.0, 0.1, 0.3, 0.6, 1.0] {
                let index = FuzzyIndex::new(
                    list.clone(),
                    SearchOptions {
                        threshold,
                        ..SearchOptions::default()
                    },
                );
                let count = index.search(q).len();
                assert!(count >= previous, "{q} at {threshold}: {count} < {previous}");
                previous = count;
            }
        }
    }

    #[test]
    fn threshold_one_matches_everything() {
        let index = FuzzyIndex::new(
            sample(),
            SearchOptions {
                threshold: 1.0,
                ..SearchOptions::default()
            },
        );
        assert_eq!(index.search("qqq").len(), 3);
    }

    #[test]
    fn search_is_deterministic() {
        let index = FuzzyIndex::new(crate::data::builtin_countries().unwrap(), SearchOptions::default());
        assert_eq!(index.search("an"), index.search("an"));
    }

    #[test]
    fn shares_list_tracks_identity_not_contents() {
        let a = sample();
        let b = sample();
        let index = FuzzyIndex::new(a.clone(), SearchOptions::default());
        assert!(index.shares_list(&a));
        assert!(!index.shares_list(&b));
    }

    #[test]
    fn options_validation() {
        assert!(SearchOptions::default().validate().is_ok());
        assert!(SearchOptions { threshold: 1.5, distance: 100 }.validate().is_err());
        assert!(SearchOptions { threshold: 0.3, distance: 0 }.validate().is_err());
    }
}
