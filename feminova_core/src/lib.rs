// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-behavior engine for the FemiNova site.
//!
//! `feminova_core` holds the platform-independent half of the site's client
//! behavior: state machines, timing and text formatting. It is `no_std`
//! compatible (with `alloc`) and never touches the DOM. A backend crate feeds
//! it clock readings and visibility reports and applies its decisions.
//!
//! ```text
//!   Backend (clock, timers, frames, observer)
//!       │
//!       ▼
//!   RevealScheduler / ImpactCounter ──advance(now)──► RevealSurface / CounterView
//!       │
//!       └── next_deadline() ──► backend re-arms its timer
//! ```
//!
//! **[`reveal`]**: one-shot scroll-reveal scheduling with staggered children.
//!
//! **[`counter`]**: the time-derived "women impacted" counter, its growth
//! task, animation and number formatting.
//!
//! **[`visibility`]**: the geometric intersection predicate used where no
//! native observer exists.
//!
//! **[`navbar`]**: hide-on-scroll navigation bar state.
//!
//! **[`search`]**, **[`team`]**, **[`affirmation`]**: small content helpers
//! for the search box, team roster and affirmation banner.
//!
//! **[`backend`]**: the [`RevealSurface`](backend::RevealSurface) and
//! [`CounterView`](backend::CounterView) traits backends implement.
//!
//! **[`time`]**, **[`timer`]**, **[`rng`]**: host time types, the deadline
//! queue both components schedule on, and a seeded generator.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod affirmation;
pub mod backend;
pub mod counter;
pub mod navbar;
pub mod reveal;
pub mod rng;
pub mod search;
pub mod team;
pub mod time;
pub mod timer;
pub mod trace;
pub mod visibility;
