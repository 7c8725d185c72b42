// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation bar wired to window scroll.

use alloc::rc::Rc;
use core::cell::RefCell;

use feminova_backend_web::{FrameLoop, prefers_reduced_motion};
use feminova_core::navbar::{Navbar, NavbarAppearance, NavbarConfig};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element, Window};

use crate::dom;

fn apply(nav: &Element, appearance: NavbarAppearance) {
    let list = nav.class_list();
    for (class, on) in appearance.classes() {
        let _ = list.toggle_with_force(class, on);
    }
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Hooks the first `<nav>` up to scrolling. Does nothing under reduced
/// motion or on pages without a `<nav>`.
pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    if prefers_reduced_motion() {
        return Ok(());
    }
    let Some(nav) = document.query_selector("nav")? else {
        return Ok(());
    };
    let window = dom::window()?;

    let navbar = Rc::new(RefCell::new(Navbar::new(
        NavbarConfig::site(),
        scroll_y(&window),
    )));
    apply(&nav, navbar.borrow_mut().update(scroll_y(&window)));

    let frame_state = Rc::clone(&navbar);
    let frame_window = window.clone();
    let frame_nav = nav.clone();
    let frames = FrameLoop::new(move |_now| {
        let appearance = frame_state.borrow_mut().frame(scroll_y(&frame_window));
        apply(&frame_nav, appearance);
        false
    });

    dom::listen(&window, "scroll", move |_event| {
        if navbar.borrow_mut().on_scroll() {
            frames.start();
        }
    })
}
