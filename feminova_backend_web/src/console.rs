// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser console trace output.

use alloc::format;

use feminova_core::trace::{
    AnimationEvent, ChildRevealedEvent, CounterGrowthEvent, CounterToggleEvent,
    ObserveFailedEvent, RevealStartEvent, TargetObservedEvent, TargetRevealedEvent, TraceSink,
};
use web_sys::console;

/// Forwards trace events to `console.debug`, and observe failures to
/// `console.warn`.
///
/// Only useful with the `trace` feature of `feminova_core` enabled; without
/// it, the components never call into the sink.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl TraceSink for ConsoleSink {
    fn on_reveal_start(&mut self, e: &RevealStartEvent) {
        console::debug_1(
            &format!("scroll-reveal: start targets={} {:?}", e.targets, e.outcome).into(),
        );
    }

    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        console::debug_1(&format!("scroll-reveal: observing {:?}", e.target).into());
    }

    fn on_observe_failed(&mut self, e: &ObserveFailedEvent) {
        console::warn_1(&format!("scroll-reveal: observe failed for {:?}", e.target).into());
    }

    fn on_target_revealed(&mut self, e: &TargetRevealedEvent) {
        console::debug_1(
            &format!(
                "scroll-reveal: {:?} revealed ({:?}, {} children)",
                e.target, e.role, e.children
            )
            .into(),
        );
    }

    fn on_child_revealed(&mut self, e: &ChildRevealedEvent) {
        console::debug_1(
            &format!("scroll-reveal: {:?} child {}", e.target, e.child_index).into(),
        );
    }

    fn on_counter_growth(&mut self, e: &CounterGrowthEvent) {
        console::debug_1(&format!("counter: {} -> {}", e.old_value, e.new_value).into());
    }

    fn on_counter_toggle(&mut self, e: &CounterToggleEvent) {
        console::debug_1(&format!("counter: expanded={}", e.expanded).into());
    }

    fn on_animation(&mut self, e: &AnimationEvent) {
        console::debug_1(
            &format!(
                "counter: animation {} {:?} {} -> {}",
                e.token, e.phase, e.from, e.to
            )
            .into(),
        );
    }
}
