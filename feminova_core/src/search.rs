// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyword routing for the site search box.

use alloc::format;
use alloc::string::String;

/// Keyword groups and the page each one routes to, checked in order.
const ROUTES: &[(&[&str], &str)] = &[
    (
        &["campaign", "karahasan", "kwentong", "testimonyal"],
        "campaigns.html",
    ),
    (&["team", "member", "staff"], "index.html#team"),
    (&["about", "mission", "vision"], "index.html#about"),
    (&["contact", "email", "phone"], "index.html#contact"),
];

/// Prompt shown for an empty query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search term";

/// Where a search query leads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The query was blank.
    Empty,
    /// Navigate to this location.
    Navigate(&'static str),
    /// Nothing matched; carries the normalized query.
    NoMatch(String),
}

impl SearchOutcome {
    /// Returns the message to show the user, if the outcome has one.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Empty => Some(String::from(EMPTY_QUERY_MESSAGE)),
            Self::Navigate(_) => None,
            Self::NoMatch(query) => Some(format!(
                "Searching for: \"{query}\"\n\nTry searching for: campaigns, team, about, or contact"
            )),
        }
    }
}

/// Routes a raw search-box query.
///
/// The query is trimmed and lowercased, then matched by substring against
/// each keyword group in turn; the first group with a hit wins.
#[must_use]
pub fn route(raw: &str) -> SearchOutcome {
    let query = raw.trim().to_lowercase();
    if query.is_empty() {
        return SearchOutcome::Empty;
    }
    for (keywords, target) in ROUTES {
        if keywords.iter().any(|k| query.contains(k)) {
            return SearchOutcome::Navigate(*target);
        }
    }
    SearchOutcome::NoMatch(query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_prompts() {
        assert_eq!(route("   "), SearchOutcome::Empty);
        assert_eq!(
            route("").message().as_deref(),
            Some("Please enter a search term")
        );
    }

    #[test]
    fn keywords_route_to_sections() {
        assert_eq!(route("Campaigns"), SearchOutcome::Navigate("campaigns.html"));
        assert_eq!(
            route("kwentong babae"),
            SearchOutcome::Navigate("campaigns.html")
        );
        assert_eq!(route(" STAFF "), SearchOutcome::Navigate("index.html#team"));
        assert_eq!(route("our mission"), SearchOutcome::Navigate("index.html#about"));
        assert_eq!(route("phone"), SearchOutcome::Navigate("index.html#contact"));
    }

    #[test]
    fn earlier_group_wins() {
        assert_eq!(
            route("team campaign"),
            SearchOutcome::Navigate("campaigns.html")
        );
    }

    #[test]
    fn unmatched_query_suggests_keywords() {
        let outcome = route("  Donate ");
        assert_eq!(outcome, SearchOutcome::NoMatch(String::from("donate")));
        assert_eq!(
            outcome.message().as_deref(),
            Some(
                "Searching for: \"donate\"\n\nTry searching for: campaigns, team, about, or contact"
            )
        );
        assert_eq!(SearchOutcome::Navigate("x").message(), None);
    }
}
