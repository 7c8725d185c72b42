// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! "Affirmation of the day" text.
//!
//! Fetching is the backend's job; this module decides what gets shown.

use alloc::format;
use alloc::string::String;

use crate::rng::Lcg64;

/// Endpoint serving `{"affirmation": "..."}`.
pub const SOURCE_URL: &str = "https://www.affirmations.dev/";

/// Shown when the endpoint is unreachable or returns nothing usable.
pub const FALLBACKS: [&str; 8] = [
    "You are capable of amazing things.",
    "Your voice matters and deserves to be heard.",
    "You have the strength to overcome any challenge.",
    "You are worthy of love, respect, and success.",
    "Your dreams are valid and achievable.",
    "You are making a positive difference in the world.",
    "You have the power to create the change you want to see.",
    "You are resilient, brave, and unstoppable.",
];

/// Wraps `text` in double quotes for display.
#[must_use]
pub fn quote(text: &str) -> String {
    format!("\"{text}\"")
}

/// Picks a fallback uniformly at random.
#[must_use]
pub fn pick_fallback(rng: &mut Lcg64) -> &'static str {
    FALLBACKS[rng.next_index(FALLBACKS.len())]
}

/// Returns the quoted display text: the fetched affirmation when it is
/// present and non-blank, a random fallback otherwise.
#[must_use]
pub fn display_text(fetched: Option<&str>, rng: &mut Lcg64) -> String {
    match fetched.map(str::trim) {
        Some(text) if !text.is_empty() => quote(text),
        _ => quote(pick_fallback(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetched_text_is_quoted() {
        let mut rng = Lcg64::new(1);
        assert_eq!(display_text(Some("Breathe."), &mut rng), "\"Breathe.\"");
    }

    #[test]
    fn blank_or_missing_uses_fallback() {
        let mut rng = Lcg64::new(3);
        for fetched in [None, Some(""), Some("   ")] {
            let text = display_text(fetched, &mut rng);
            let inner = &text[1..text.len() - 1];
            assert!(FALLBACKS.contains(&inner), "unexpected {text}");
        }
    }

    #[test]
    fn fallback_pick_covers_list() {
        let mut rng = Lcg64::new(42);
        let mut seen = [false; FALLBACKS.len()];
        for _ in 0..500 {
            let pick = pick_fallback(&mut rng);
            let i = FALLBACKS.iter().position(|f| *f == pick).expect("known fallback");
            seen[i] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
