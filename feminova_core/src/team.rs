// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Team roster.

use alloc::string::String;
use alloc::vec::Vec;

/// The roster as `Name|email` entries, in display order.
pub const ROSTER: &[&str] = &[
    "AR Cagna-an|ar.cagnaan@feminova.org",
    "Chester Ivan Mamaran|chester.mamaran@feminova.org",
    "Christine Wasquin|christine.wasquin@feminova.org",
    "Eljhann Abanggan|eljhann.abanggan@feminova.org",
    "Jethro Arañez|jethro.aranez@feminova.org",
    "Kent Dave R. Pilar|kent.pilar@feminova.org",
    "Kurt Dave Resma|kurt.resma@feminova.org",
    "Lurense Reloj|lurense.reloj@feminova.org",
    "Reinna Nianga|reinna.nianga@feminova.org",
    "Rin Marquiso|rin.marquiso@feminova.org",
    "RJ Angelo Moniset|rj.moniset@feminova.org",
];

/// One team member.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member<'a> {
    /// Display name.
    pub name: &'a str,
    /// Contact address; empty when the entry has none.
    pub email: &'a str,
}

impl<'a> Member<'a> {
    /// Parses a `Name|email` entry. Surrounding whitespace is dropped.
    #[must_use]
    pub fn parse(entry: &'a str) -> Self {
        let (name, email) = entry.split_once('|').unwrap_or((entry, ""));
        Self {
            name: name.trim(),
            email: email.trim(),
        }
    }

    /// Returns up to two initials: the first character of each word of the
    /// name, taken from the first two words.
    #[must_use]
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .collect()
    }
}

/// Parses every entry of `entries`.
pub fn members<'a>(entries: &'a [&'a str]) -> impl Iterator<Item = Member<'a>> + 'a {
    entries.iter().map(|e| Member::parse(e))
}

/// Parses the site roster.
#[must_use]
pub fn roster() -> Vec<Member<'static>> {
    members(ROSTER).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_email() {
        let m = Member::parse("Rin Marquiso|rin.marquiso@feminova.org");
        assert_eq!(m.name, "Rin Marquiso");
        assert_eq!(m.email, "rin.marquiso@feminova.org");
    }

    #[test]
    fn missing_email_is_empty() {
        let m = Member::parse("Solo Name");
        assert_eq!(m.name, "Solo Name");
        assert_eq!(m.email, "");
    }

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(Member::parse("Kent Dave R. Pilar|x").initials(), "KD");
        assert_eq!(Member::parse("AR Cagna-an|x").initials(), "AC");
        assert_eq!(Member::parse("Cher|x").initials(), "C");
        assert_eq!(Member::parse("Ñino Arañez|x").initials(), "ÑA");
    }

    #[test]
    fn roster_has_eleven_members() {
        let all = roster();
        assert_eq!(all.len(), 11);
        assert!(all.iter().all(|m| m.email.ends_with("@feminova.org")));
        assert_eq!(all[0].initials(), "AC");
        assert_eq!(all[10].initials(), "RA");
    }
}
