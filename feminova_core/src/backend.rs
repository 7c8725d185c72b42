// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The core never touches the DOM. A *backend* crate provides:
//!
//! - **Time**: `now() -> HostTime` and `wall_now() -> WallTime` free
//!   functions reading the platform clocks.
//!
//! - **Wake-ups**: a platform timer armed for the components'
//!   `next_deadline()`, calling their `advance(now, ..)` when it fires, and a
//!   frame source calling [`ImpactCounter::frame`] while an animation is in
//!   flight.
//!
//! - **Surfaces**: implementations of [`RevealSurface`] (observe, unobserve
//!   and reveal elements) and [`CounterView`] (render counter text and toggle
//!   container cues).
//!
//! # Crate boundaries
//!
//! `feminova_core` owns the state machines, timing and formatting. Backend
//! crates depend on it and provide platform glue. The site crate wires both
//! together at page load.
//!
//! [`ImpactCounter::frame`]: crate::counter::ImpactCounter::frame

use crate::counter::{CounterCue, CounterText};
use crate::reveal::TargetId;

/// Failure reported by a [`RevealSurface`] when a target cannot be observed.
///
/// The scheduler never propagates this; it traces the failure and leaves the
/// target in its pre-reveal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    /// The surface has no element for this target.
    #[error("no element registered for {0:?}")]
    UnknownTarget(TargetId),
    /// The platform rejected the observe call.
    #[error("platform refused to observe {0:?}")]
    Rejected(TargetId),
}

/// Applies reveal-scheduler decisions to a platform element tree.
///
/// Both the DOM surface and the simulated test page implement this trait.
pub trait RevealSurface {
    /// Starts reporting visibility changes for `target`.
    fn observe(&mut self, target: TargetId) -> Result<(), SurfaceError>;

    /// Stops reporting visibility changes for `target`.
    ///
    /// Must be a no-op when the target is not observed.
    fn unobserve(&mut self, target: TargetId);

    /// Captures `target`'s children as they are right now, in document
    /// order, and returns how many were captured.
    ///
    /// Later [`reveal_child`](Self::reveal_child) calls index into this
    /// capture, so children added, removed or reordered afterwards do not
    /// shift which element an index names.
    fn snapshot_children(&mut self, target: TargetId) -> usize;

    /// Applies the revealed state to `target` itself.
    fn reveal(&mut self, target: TargetId);

    /// Applies the revealed state to child `index` of the most recent
    /// [`snapshot_children`](Self::snapshot_children) capture.
    ///
    /// Must be a no-op when `index` is outside the capture.
    fn reveal_child(&mut self, target: TargetId, index: usize);
}

/// Displays the impact counter.
pub trait CounterView {
    /// Replaces the counter's text.
    fn render(&mut self, text: &CounterText<'_>);

    /// Turns a container cue on or off.
    fn set_cue(&mut self, cue: CounterCue, on: bool);
}
