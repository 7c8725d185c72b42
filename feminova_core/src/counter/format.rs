// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Abbreviated and expanded number formatting.

use alloc::format;
use alloc::string::{String, ToString as _};

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;

/// Formats `n` for display.
///
/// - `expanded`: the full integer with comma thousands separators
///   (`1,234,567`).
/// - otherwise `n >= 1_000_000`: millions to one decimal with an `M` suffix
///   (`2.3M`); `n >= 1_000`: thousands to one decimal with a `K` suffix
///   (`1.5K`); smaller values as a plain integer.
///
/// The decimal is rounded half up, so `1_050` abbreviates to `1.1K`.
#[must_use]
pub fn format(n: u64, expanded: bool) -> String {
    if expanded {
        group_thousands(n)
    } else if n >= MILLION {
        one_decimal(n, MILLION, 'M')
    } else if n >= THOUSAND {
        one_decimal(n, THOUSAND, 'K')
    } else {
        n.to_string()
    }
}

/// Parses text produced by [`format`] back into the value it shows.
///
/// Abbreviated text resolves to its rounded value (`"1.5K"` → `1500`).
/// Returns `None` for anything that is not a formatted count.
#[must_use]
pub fn parse_display(text: &str) -> Option<u64> {
    let text = text.trim();
    let (body, unit) = match text.as_bytes().last()? {
        b'M' => (&text[..text.len() - 1], MILLION),
        b'K' => (&text[..text.len() - 1], THOUSAND),
        _ => (text, 1),
    };

    let (whole, frac) = match body.split_once('.') {
        Some((w, f)) => (w, f),
        None => (body, ""),
    };
    if whole.is_empty() || frac.len() > 6 {
        return None;
    }

    let mut value: u128 = 0;
    for b in whole.bytes() {
        match b {
            b'0'..=b'9' => {
                value = value
                    .checked_mul(10)?
                    .checked_add(u128::from(b - b'0'))?;
            }
            b',' if unit == 1 => {}
            _ => return None,
        }
    }
    value = value.checked_mul(u128::from(unit))?;

    let mut scale = u128::from(unit);
    for b in frac.bytes() {
        if !b.is_ascii_digit() {
            return None;
        }
        scale /= 10;
        value = value.checked_add(u128::from(b - b'0') * scale)?;
    }
    u64::try_from(value).ok()
}

/// Returns `true` for glyphs that take part in the rolling-digit effect.
#[inline]
#[must_use]
pub fn is_rolling_glyph(ch: char) -> bool {
    ch.is_ascii_digit() || ch == ','
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn one_decimal(n: u64, unit: u64, suffix: char) -> String {
    let unit = u128::from(unit);
    let tenths = (u128::from(n) * 10 + unit / 2) / unit;
    format!("{}.{}{suffix}", tenths / 10, tenths % 10)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_values_are_plain() {
        assert_eq!(format(0, false), "0");
        assert_eq!(format(999, false), "999");
    }

    #[test]
    fn thousands_and_millions_abbreviate() {
        assert_eq!(format(1_000, false), "1.0K");
        assert_eq!(format(1_500, false), "1.5K");
        assert_eq!(format(1_050, false), "1.1K");
        assert_eq!(format(1_049, false), "1.0K");
        assert_eq!(format(100_000, false), "100.0K");
        assert_eq!(format(999_999, false), "1000.0K");
        assert_eq!(format(1_000_000, false), "1.0M");
        assert_eq!(format(2_300_000, false), "2.3M");
        assert_eq!(format(12_345_678, false), "12.3M");
    }

    #[test]
    fn expanded_groups_thousands() {
        assert_eq!(format(0, true), "0");
        assert_eq!(format(999, true), "999");
        assert_eq!(format(1_500, true), "1,500");
        assert_eq!(format(100_000, true), "100,000");
        assert_eq!(format(1_234_567, true), "1,234,567");
        assert_eq!(format(u64::MAX, true), "18,446,744,073,709,551,615");
    }

    #[test]
    fn parse_display_reads_every_form() {
        assert_eq!(parse_display("999"), Some(999));
        assert_eq!(parse_display("1.5K"), Some(1_500));
        assert_eq!(parse_display("2.3M"), Some(2_300_000));
        assert_eq!(parse_display("1,234,567"), Some(1_234_567));
        assert_eq!(parse_display("100.0K"), Some(100_000));
    }

    #[test]
    fn parse_display_rejects_garbage() {
        assert_eq!(parse_display(""), None);
        assert_eq!(parse_display("K"), None);
        assert_eq!(parse_display("1.5X"), None);
        assert_eq!(parse_display("1,5K"), None);
        assert_eq!(parse_display(".5K"), None);
        assert_eq!(parse_display(&"9".repeat(43)), None, "overflows u128");
        assert_eq!(parse_display(&("9".repeat(38) + "M")), None, "overflows once scaled");
        assert_eq!(parse_display("18446744073709551616"), None, "u64::MAX + 1");
        assert_eq!(parse_display("18,446,744,073,709,551,615"), Some(u64::MAX));
    }

    #[test]
    fn rolling_glyphs_are_digits_and_commas() {
        assert!(is_rolling_glyph('7'));
        assert!(is_rolling_glyph(','));
        assert!(!is_rolling_glyph('.'));
        assert!(!is_rolling_glyph('K'));
    }
}
