// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM view for the impact counter.

use alloc::string::String;

use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

use feminova_core::backend::CounterView;
use feminova_core::counter::{CounterCue, CounterText, Glyph};

/// Selector for the card around the counter; it carries the container cues.
pub const COUNTER_CONTAINER: &str = ".bg-white\\/10";

/// Card background while the counter is expanded.
pub const EXPANDED_BACKGROUND: &str = "rgba(255, 255, 255, 0.25)";

const TITLE: &str = "Click to toggle between abbreviated and full numbers";

/// Renders counter text into an element and cues onto its card.
pub struct DomCounterView {
    element: HtmlElement,
    container: Option<HtmlElement>,
}

impl core::fmt::Debug for DomCounterView {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomCounterView")
            .field("element", &"HtmlElement")
            .field("container", &self.container.is_some())
            .finish()
    }
}

impl DomCounterView {
    /// Wraps the counter `element` and looks up its card.
    #[must_use]
    pub fn new(element: HtmlElement) -> Self {
        let container = element
            .closest(COUNTER_CONTAINER)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());
        let _ = element.style().set_property("cursor", "pointer");
        element.set_title(TITLE);
        Self { element, container }
    }

    /// Returns the counter element.
    #[must_use]
    pub fn element(&self) -> &HtmlElement {
        &self.element
    }
}

/// Builds the markup for in-flight counter text: marked glyphs become
/// `counter-digit` spans, everything else is plain text.
#[must_use]
pub fn rolling_markup(glyphs: &[Glyph]) -> String {
    let mut out = String::with_capacity(glyphs.len() * 40);
    for g in glyphs {
        if g.marked {
            out.push_str(if g.scrolling {
                "<span class=\"counter-digit scrolling\">"
            } else {
                "<span class=\"counter-digit\">"
            });
            push_escaped(&mut out, g.ch);
            out.push_str("</span>");
        } else {
            push_escaped(&mut out, g.ch);
        }
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '&' => out.push_str("&amp;"),
        _ => out.push(ch),
    }
}

impl CounterView for DomCounterView {
    fn render(&mut self, text: &CounterText<'_>) {
        match text {
            CounterText::Settled(text) => self.element.set_text_content(Some(text)),
            CounterText::Rolling(glyphs) => self.element.set_inner_html(&rolling_markup(glyphs)),
        }
    }

    fn set_cue(&mut self, cue: CounterCue, on: bool) {
        let Some(container) = self.container.as_ref() else {
            return;
        };
        match cue {
            CounterCue::Expanded => {
                let style = container.style();
                if on {
                    let _ = style.set_property("background-color", EXPANDED_BACKGROUND);
                } else {
                    let _ = style.remove_property("background-color");
                }
            }
            CounterCue::Enhanced | CounterCue::Updating | CounterCue::ClickAnimate => {
                let _ = container
                    .class_list()
                    .toggle_with_force(cue.class_name(), on);
            }
        }
    }
}
