// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometric visibility predicate.
//!
//! Mirrors how an intersection observer decides that an element is visible:
//! the viewport is shrunk by the configured bottom margin, and the element is
//! visible once the fraction of its area inside that shrunken root reaches
//! the threshold.
//!
//! Browsers compute this natively; the predicate exists so that hosts without
//! an observer (the simulated page, scroll-polling fallbacks) make the same
//! decision.

use kurbo::Rect;

use crate::reveal::RevealConfig;

/// Returns `viewport` with its bottom edge raised by `bottom_pct` percent of
/// its height.
#[must_use]
pub fn effective_root(viewport: Rect, bottom_pct: f64) -> Rect {
    let shrink = viewport.height() * bottom_pct / 100.0;
    Rect::new(
        viewport.x0,
        viewport.y0,
        viewport.x1,
        (viewport.y1 - shrink).max(viewport.y0),
    )
}

/// Returns the fraction of `element`'s area that lies inside `root`.
///
/// Degenerate (zero-area) elements count as fully visible when they touch
/// the root and invisible otherwise.
#[must_use]
pub fn intersection_ratio(element: Rect, root: Rect) -> f64 {
    let element = element.abs();
    let area = element.area();
    if area <= 0.0 {
        let touches = element.x0 <= root.x1
            && element.x1 >= root.x0
            && element.y0 <= root.y1
            && element.y1 >= root.y0;
        return if touches { 1.0 } else { 0.0 };
    }
    let overlap = element.intersect(root).area();
    (overlap / area).clamp(0.0, 1.0)
}

/// Returns `true` if `element` counts as intersecting `viewport` under
/// `config`'s root margin and threshold.
#[must_use]
pub fn is_intersecting(element: Rect, viewport: Rect, config: &RevealConfig) -> bool {
    let root = effective_root(viewport, config.root_margin_bottom_pct);
    let ratio = intersection_ratio(element, root);
    ratio > 0.0 && ratio >= config.threshold
}
