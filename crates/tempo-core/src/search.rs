//! Fuzzy city lookup for `tempo search`.

use std::collections::BTreeMap;

use nucleo_matcher::pattern::{CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};

use crate::cities::City;

/// A scored search result.
#[derive(Debug)]
pub struct SearchHit<'a> {
    pub city: &'a City,
    pub score: u32,
}

/// Finds cities whose name fuzzy-matches the query.
///
/// A plain case-insensitive substring match always qualifies, so short
/// queries like "san" behave predictably. Results are sorted by
/// (country, state, name) for stable output.
pub fn search_cities<'a>(cities: &'a BTreeMap<u32, City>, query: &str) -> Vec<SearchHit<'a>> {
    let mut matcher = Matcher::new(Config::DEFAULT);
    let pattern = Pattern::parse(query, CaseMatching::Ignore, Normalization::Smart);
    let query_lower = query.to_lowercase();

    let mut hits: Vec<SearchHit<'a>> = cities
        .values()
        .filter_map(|city| {
            let mut buf = Vec::new();
            let haystack = Utf32Str::new(&city.name, &mut buf);
            let fuzzy = pattern.score(haystack, &mut matcher);
            let substring = city.name.to_lowercase().contains(&query_lower);
            match (fuzzy, substring) {
                (Some(score), _) => Some(SearchHit { city, score }),
                (None, true) => Some(SearchHit { city, score: 0 }),
                (None, false) => None,
            }
        })
        .collect();

    hits.sort_by(|a, b| {
        (&a.city.country, &a.city.state, &a.city.name)
            .cmp(&(&b.city.country, &b.city.state, &b.city.name))
    });
    hits
}
