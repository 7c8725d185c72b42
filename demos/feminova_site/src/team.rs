// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Team roster cards.

use alloc::format;
use alloc::string::String;

use feminova_core::team::{Member, roster};
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

/// Escapes text for use in element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Builds the card for one member. Cards carry the `reveal` class so they
/// fade in with the rest of the page.
#[must_use]
pub fn card_markup(member: &Member<'_>) -> String {
    let name = escape(member.name);
    let email = escape(member.email);
    format!(
        concat!(
            "<div class=\"bg-white rounded-xl p-6 shadow-lg hover:shadow-xl transition-shadow reveal\">",
            "<div class=\"text-center\">",
            "<div class=\"w-20 h-20 bg-pink-600 text-white rounded-full flex items-center justify-center text-xl font-bold mx-auto mb-4\">{initials}</div>",
            "<h3 class=\"text-xl font-semibold text-gray-800 mb-2\">{name}</h3>",
            "<a href=\"mailto:{email}\" class=\"text-pink-600 hover:text-pink-800 transition-colors text-sm\">{email}</a>",
            "</div></div>"
        ),
        initials = escape(&member.initials()),
        name = name,
        email = email,
    )
}

/// Renders the roster into `#teamContainer`, if the page has one.
pub(crate) fn render(document: &Document) -> Result<(), JsValue> {
    let Some(container) = dom::by_id(document, "teamContainer") else {
        return Ok(());
    };
    let markup: String = roster().iter().map(card_markup).collect();
    container.set_inner_html(&markup);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_shows_initials_name_and_mail_link() {
        let card = card_markup(&Member::parse("Rin Marquiso|rin.marquiso@feminova.org"));
        assert!(card.contains(">RM</div>"));
        assert!(card.contains("<h3 class=\"text-xl font-semibold text-gray-800 mb-2\">Rin Marquiso</h3>"));
        assert!(card.contains("href=\"mailto:rin.marquiso@feminova.org\""));
        assert!(card.contains("transition-shadow reveal\""));
    }

    #[test]
    fn markup_is_escaped() {
        let card = card_markup(&Member::parse("A <b>&Co|x\"@y"));
        assert!(card.contains("A &lt;b&gt;&amp;Co"));
        assert!(card.contains("mailto:x&quot;@y"));
        assert_eq!(escape("it's"), "it&#39;s");
    }
}
