// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for `feminova_core`.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`FrameLoop`]: `requestAnimationFrame` frame source for counter
//!   animations and the navbar throttle
//! - [`DeadlineTimer`]: `setTimeout` wake-ups for the components'
//!   `next_deadline()`
//! - [`DomRevealSurface`]: `IntersectionObserver`-backed
//!   [`RevealSurface`](feminova_core::backend::RevealSurface)
//! - [`DomCounterView`]: DOM [`CounterView`](feminova_core::backend::CounterView)
//! - [`fetch_affirmation`]: the affirmation request
//! - [`ConsoleSink`]: [`TraceSink`](feminova_core::trace::TraceSink) writing to
//!   the browser console

#![no_std]

extern crate alloc;

mod affirmation;
mod console;
mod counter_view;
mod observer;
mod raf;
mod timeout;

pub use affirmation::{AffirmationError, fetch_affirmation, parse_payload};
pub use console::ConsoleSink;
pub use counter_view::{COUNTER_CONTAINER, DomCounterView, EXPANDED_BACKGROUND, rolling_markup};
pub use observer::{DomRevealSurface, TARGET_ATTR, VisibilityReport};
pub use raf::FrameLoop;
pub use timeout::DeadlineTimer;

use feminova_core::reveal::RevealEnvironment;
use feminova_core::time::{HostTime, WallTime};

/// Returns the current host time from `performance.now()`, in microsecond
/// ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}

/// Returns the current wall-clock time from `Date.now()`.
#[must_use]
pub fn wall_now() -> WallTime {
    WallTime::from_millis_f64(js_sys::Date::now())
}

/// Returns a seed for the core's generators from `Math.random()`.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "scaled unit value fits in u64"
)]
pub fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

/// Returns `true` if the user prefers reduced motion.
///
/// Missing `matchMedia` counts as no preference.
#[must_use]
pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .is_some_and(|mq| mq.matches())
}

/// Returns `true` if the page can construct an `IntersectionObserver`.
#[must_use]
pub fn observer_supported() -> bool {
    web_sys::window().is_some_and(|w| {
        js_sys::Reflect::has(&w, &"IntersectionObserver".into()).unwrap_or(false)
    })
}

/// Reads the [`RevealEnvironment`] from the browser.
#[must_use]
pub fn environment() -> RevealEnvironment {
    RevealEnvironment {
        reduced_motion: prefers_reduced_motion(),
        observer_supported: observer_supported(),
    }
}
