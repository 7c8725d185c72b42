// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The FemiNova site script, compiled to WebAssembly.
//!
//! On load this wires the page: the affirmation of the day, the team roster,
//! campaign accordions, smooth in-page scrolling, scroll reveals, the
//! navigation bar and the impact counter. Handlers referenced from the
//! page's inline `onclick`/`onsubmit` attributes are exported under their
//! camel-case names; see [`handlers`].
//!
//! Build with: `wasm-pack build --target web demos/feminova_site`
//!
//! Then load the generated module from the site's pages.

// This crate only runs in the browser; suppress dead-code warnings when
// cargo-checking on a native host target.
#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod affirmation;
mod counter;
mod dom;
pub mod forms;
pub mod handlers;
mod navbar;
mod reveal;
pub mod team;

use wasm_bindgen::prelude::*;

/// Entry point, called automatically by `wasm_bindgen(start)`.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    let document = dom::document()?;

    affirmation::load(&document);
    team::render(&document)?;
    dom::init_accordion(&document)?;
    dom::init_smooth_scrolling(&document)?;
    reveal::init(&document)?;
    navbar::init(&document)?;
    counter::init(&document)?;
    handlers::install(&document)?;

    Ok(())
}
