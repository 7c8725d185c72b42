// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Affirmation of the day.

use feminova_backend_web::fetch_affirmation;
use feminova_core::affirmation::{SOURCE_URL, display_text};
use feminova_core::rng::Lcg64;
use web_sys::{Document, console};

use crate::dom;

/// Fetches the affirmation in the background and shows it, or a fallback,
/// in `#affirmationText`.
pub(crate) fn load(document: &Document) {
    let Some(target) = dom::by_id(document, "affirmationText") else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        let fetched = fetch_affirmation(SOURCE_URL).await;
        if let Err(err) = &fetched {
            console::debug_1(&alloc::format!("affirmation: using fallback ({err})").into());
        }
        let mut rng = Lcg64::new(feminova_backend_web::random_seed());
        target.set_text_content(Some(&display_text(fetched.as_deref().ok(), &mut rng)));
    });
}
