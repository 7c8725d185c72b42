// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM lookups and small page behaviors with no state of their own.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

pub(crate) fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

pub(crate) fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Looks up an element by id.
pub(crate) fn by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
}

/// Returns the `value` of the input with `id`, or an empty string.
pub(crate) fn input_value(document: &Document, id: &str) -> String {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        .map(|input| input.value())
        .unwrap_or_default()
}

/// Returns every element matching `selector`, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub(crate) fn alert(message: &str) {
    if let Ok(window) = window() {
        let _ = window.alert_with_message(message);
    }
}

/// Sets `body.style.overflow`, locking or unlocking page scroll.
pub(crate) fn set_body_overflow(document: &Document, value: &str) {
    if let Some(body) = document.body() {
        let _ = body.style().set_property("overflow", value);
    }
}

/// Attaches `handler` for `kind` events on `target` for the life of the page.
pub(crate) fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Runs `f` once after `ms` milliseconds.
pub(crate) fn after(ms: i32, f: impl FnOnce() + 'static) {
    let Ok(window) = window() else {
        return;
    };
    let closure = Closure::once_into_js(f);
    let _ = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), ms);
}

/// Collapses every campaign accordion.
pub(crate) fn init_accordion(document: &Document) -> Result<(), JsValue> {
    for el in query_all(document, ".campaign-content")? {
        if let Ok(el) = el.dyn_into::<HtmlElement>() {
            let style = el.style();
            style.set_property("max-height", "0")?;
            style.set_property("overflow", "hidden")?;
        }
    }
    Ok(())
}

/// Toggles the accordion `content`, rotating its `icon` to match.
///
/// A `max-height` of `0px` (or none at all) counts as collapsed.
pub(crate) fn toggle_accordion(content: &HtmlElement, icon: &HtmlElement) -> Result<(), JsValue> {
    let style = content.style();
    let max_height = style.get_property_value("max-height")?;
    let expanded = !max_height.is_empty() && max_height != "0px";
    if expanded {
        style.set_property("max-height", "0")?;
        icon.style().set_property("transform", "rotate(0deg)")?;
    } else {
        style.set_property("max-height", &format!("{}px", content.scroll_height()))?;
        icon.style().set_property("transform", "rotate(180deg)")?;
    }
    Ok(())
}

/// Makes in-page anchor links scroll smoothly to their target.
pub(crate) fn init_smooth_scrolling(document: &Document) -> Result<(), JsValue> {
    for anchor in query_all(document, "a[href^=\"#\"]")? {
        let doc = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        listen(&anchor, "click", move |event| {
            event.prevent_default();
            // A bare "#" is not a valid selector; treat it like a miss.
            if let Ok(Some(target)) = doc.query_selector(&href) {
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }
        })?;
    }
    Ok(())
}
