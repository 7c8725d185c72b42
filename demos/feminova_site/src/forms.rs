// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Acknowledgement text for the demo forms.
//!
//! None of the forms submit anywhere; they validate what little they need to
//! and answer with a message.

use alloc::format;
use alloc::string::String;

/// Contact form acknowledgement.
#[must_use]
pub fn contact_ack(name: &str, email: &str) -> String {
    format!(
        "Thank you, {name}! Your message has been received. We'll get back to you at {email} soon."
    )
}

/// Login acknowledgement.
#[must_use]
pub fn login_ack(email: &str) -> String {
    format!("Login successful! Welcome back, {email}")
}

/// Signup acknowledgement.
#[must_use]
pub fn signup_ack(name: &str, email: &str) -> String {
    format!("Welcome to FemiNova, {name}! Your account has been created with email: {email}")
}

/// Donation form fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Donation<'a> {
    /// Donor name as typed.
    pub name: &'a str,
    /// Confirmation address.
    pub email: &'a str,
    /// Amount as typed.
    pub amount: &'a str,
    /// Hide the donor's name.
    pub anonymous: bool,
}

/// Shown when the donation amount is missing or not positive.
pub const INVALID_AMOUNT: &str = "Please enter a valid donation amount.";

/// Validates a donation and returns its acknowledgement.
pub fn donation_ack(d: &Donation<'_>) -> Result<String, &'static str> {
    let amount = d.amount.trim();
    match amount.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => {}
        _ => return Err(INVALID_AMOUNT),
    }
    let donor = if d.anonymous { "Anonymous Donor" } else { d.name };
    Ok(format!(
        "Thank you {donor} for your generous donation of ₱{amount}! We will send a confirmation email to {} shortly.",
        d.email
    ))
}

/// Shown when no volunteer interest is checked.
pub const NO_INTERESTS: &str = "Please select at least one area of interest.";

/// Validates a volunteer application and returns its acknowledgement.
pub fn volunteer_ack(name: &str, email: &str, interests: usize) -> Result<String, &'static str> {
    if interests == 0 {
        return Err(NO_INTERESTS);
    }
    Ok(format!(
        "Thank you {name} for your interest in volunteering! We will review your application and contact you at {email} within 3-5 business days."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn donation(amount: &str, anonymous: bool) -> Donation<'_> {
        Donation {
            name: "Maria",
            email: "maria@example.org",
            amount,
            anonymous,
        }
    }

    #[test]
    fn donation_requires_positive_amount() {
        for bad in ["", "  ", "0", "-5", "abc", "NaN", "inf"] {
            assert_eq!(donation_ack(&donation(bad, false)), Err(INVALID_AMOUNT), "{bad:?}");
        }
    }

    #[test]
    fn donation_names_donor_unless_anonymous() {
        let named = donation_ack(&donation("500", false)).unwrap();
        assert!(named.starts_with("Thank you Maria for your generous donation of ₱500!"));
        assert!(named.contains("maria@example.org"));

        let anon = donation_ack(&donation(" 250 ", true)).unwrap();
        assert!(anon.starts_with("Thank you Anonymous Donor for your generous donation of ₱250!"));
    }

    #[test]
    fn volunteer_requires_an_interest() {
        assert_eq!(volunteer_ack("Ana", "ana@example.org", 0), Err(NO_INTERESTS));
        let ok = volunteer_ack("Ana", "ana@example.org", 2).unwrap();
        assert!(ok.contains("ana@example.org within 3-5 business days"));
    }

    #[test]
    fn simple_acks() {
        assert_eq!(login_ack("a@b.c"), "Login successful! Welcome back, a@b.c");
        assert_eq!(
            signup_ack("Ana", "a@b.c"),
            "Welcome to FemiNova, Ana! Your account has been created with email: a@b.c"
        );
        assert!(contact_ack("Ana", "a@b.c").starts_with("Thank you, Ana!"));
    }
}
