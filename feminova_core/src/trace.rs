// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for the reveal scheduler and impact counter.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! components call at each state transition. All method bodies default to
//! no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).

use crate::reveal::{RevealRole, TargetId};
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// How [`RevealScheduler::start`](crate::reveal::RevealScheduler::start)
/// resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealStartOutcome {
    /// Observation begins after the activation delay.
    Deferred,
    /// The user prefers reduced motion; nothing is observed or revealed.
    ReducedMotion,
    /// The platform cannot observe visibility; every target was revealed
    /// immediately.
    Unsupported,
}

/// Which point in an animation's life an [`AnimationEvent`] marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationPhase {
    /// The animation was started.
    Start,
    /// The animation reached `p = 1` and rendered its final text.
    Finish,
    /// A newer animation replaced this one before it finished.
    Superseded,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once when the reveal scheduler starts.
#[derive(Clone, Copy, Debug)]
pub struct RevealStartEvent {
    /// Host time of the start call.
    pub at: HostTime,
    /// Number of registered targets.
    pub targets: u32,
    /// How the start resolved.
    pub outcome: RevealStartOutcome,
}

/// Emitted when a target begins to be observed.
#[derive(Clone, Copy, Debug)]
pub struct TargetObservedEvent {
    /// Host time of the observe call.
    pub at: HostTime,
    /// The observed target.
    pub target: TargetId,
}

/// Emitted when observing a target failed; the failure is otherwise ignored.
#[derive(Clone, Copy, Debug)]
pub struct ObserveFailedEvent {
    /// Host time of the failed call.
    pub at: HostTime,
    /// The target that could not be observed.
    pub target: TargetId,
}

/// Emitted when a target transitions to revealed.
#[derive(Clone, Copy, Debug)]
pub struct TargetRevealedEvent {
    /// Host time of the transition.
    pub at: HostTime,
    /// The revealed target.
    pub target: TargetId,
    /// The target's role.
    pub role: RevealRole,
    /// Number of children scheduled (zero for single targets).
    pub children: u32,
}

/// Emitted when a stagger child receives its reveal.
#[derive(Clone, Copy, Debug)]
pub struct ChildRevealedEvent {
    /// Host time the reveal was applied.
    pub at: HostTime,
    /// Deadline the reveal was scheduled for.
    pub scheduled_for: HostTime,
    /// The owning stagger container.
    pub target: TargetId,
    /// Child position in document order.
    pub child_index: u32,
}

/// Emitted when periodic growth fires.
#[derive(Clone, Copy, Debug)]
pub struct CounterGrowthEvent {
    /// Host time the growth fired.
    pub at: HostTime,
    /// Value before growth.
    pub old_value: u64,
    /// Value after growth.
    pub new_value: u64,
    /// Time elapsed since the growth was scheduled.
    pub elapsed: Duration,
}

/// Emitted when the counter is clicked.
#[derive(Clone, Copy, Debug)]
pub struct CounterToggleEvent {
    /// Host time of the click.
    pub at: HostTime,
    /// Whether the display is now expanded.
    pub expanded: bool,
    /// Current counter value.
    pub value: u64,
}

/// Emitted at the start, finish or supersession of a counter animation.
#[derive(Clone, Copy, Debug)]
pub struct AnimationEvent {
    /// Host time of the event.
    pub at: HostTime,
    /// Token of the animation.
    pub token: u64,
    /// Which point in the animation's life this marks.
    pub phase: AnimationPhase,
    /// Start value.
    pub from: u64,
    /// Target value.
    pub to: u64,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the reveal scheduler and impact counter.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when the reveal scheduler starts.
    fn on_reveal_start(&mut self, e: &RevealStartEvent) {
        _ = e;
    }

    /// Called when a target begins to be observed.
    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        _ = e;
    }

    /// Called when observing a target failed.
    fn on_observe_failed(&mut self, e: &ObserveFailedEvent) {
        _ = e;
    }

    /// Called when a target is revealed.
    fn on_target_revealed(&mut self, e: &TargetRevealedEvent) {
        _ = e;
    }

    /// Called when a stagger child is revealed.
    fn on_child_revealed(&mut self, e: &ChildRevealedEvent) {
        _ = e;
    }

    /// Called when periodic growth fires.
    fn on_counter_growth(&mut self, e: &CounterGrowthEvent) {
        _ = e;
    }

    /// Called when the counter display is toggled.
    fn on_counter_toggle(&mut self, e: &CounterToggleEvent) {
        _ = e;
    }

    /// Called at animation start, finish and supersession.
    fn on_animation(&mut self, e: &AnimationEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`RevealStartEvent`].
    #[inline]
    pub fn reveal_start(&mut self, e: &RevealStartEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_reveal_start(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TargetObservedEvent`].
    #[inline]
    pub fn target_observed(&mut self, e: &TargetObservedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_target_observed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`ObserveFailedEvent`].
    #[inline]
    pub fn observe_failed(&mut self, e: &ObserveFailedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_observe_failed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TargetRevealedEvent`].
    #[inline]
    pub fn target_revealed(&mut self, e: &TargetRevealedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_target_revealed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ChildRevealedEvent`].
    #[inline]
    pub fn child_revealed(&mut self, e: &ChildRevealedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_child_revealed(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CounterGrowthEvent`].
    #[inline]
    pub fn counter_growth(&mut self, e: &CounterGrowthEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_counter_growth(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`CounterToggleEvent`].
    #[inline]
    pub fn counter_toggle(&mut self, e: &CounterToggleEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_counter_toggle(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits an [`AnimationEvent`].
    #[inline]
    pub fn animation(&mut self, e: &AnimationEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_animation(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

#[cfg(all(test, feature = "trace"))]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingSink {
        growth: u32,
        toggles: u32,
    }

    impl TraceSink for CountingSink {
        fn on_counter_growth(&mut self, _e: &CounterGrowthEvent) {
            self.growth += 1;
        }

        fn on_counter_toggle(&mut self, _e: &CounterToggleEvent) {
            self.toggles += 1;
        }
    }

    #[test]
    fn tracer_dispatches_to_sink() {
        let mut sink = CountingSink::default();
        {
            let mut tracer = Tracer::new(&mut sink);
            tracer.counter_growth(&CounterGrowthEvent {
                at: HostTime(0),
                old_value: 1,
                new_value: 4,
                elapsed: Duration::from_secs(1),
            });
            tracer.counter_toggle(&CounterToggleEvent {
                at: HostTime(0),
                expanded: true,
                value: 4,
            });
            // Events the sink does not override fall through to the no-op default.
            tracer.reveal_start(&RevealStartEvent {
                at: HostTime(0),
                targets: 0,
                outcome: RevealStartOutcome::Deferred,
            });
        }
        assert_eq!(sink.growth, 1);
        assert_eq!(sink.toggles, 1);
    }

    #[test]
    fn none_tracer_is_silent() {
        let mut tracer = Tracer::none();
        tracer.animation(&AnimationEvent {
            at: HostTime(0),
            token: 1,
            phase: AnimationPhase::Start,
            from: 0,
            to: 1,
        });
    }
}
