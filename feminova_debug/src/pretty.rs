// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use feminova_core::reveal::RevealRole;
use feminova_core::time::HostTime;
use feminova_core::trace::{
    AnimationEvent, AnimationPhase, ChildRevealedEvent, CounterGrowthEvent, CounterToggleEvent,
    ObserveFailedEvent, RevealStartEvent, TargetObservedEvent, TargetRevealedEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn role_name(role: RevealRole) -> &'static str {
    match role {
        RevealRole::Single => "single",
        RevealRole::StaggerContainer => "stagger",
    }
}

fn phase_name(phase: AnimationPhase) -> &'static str {
    match phase {
        AnimationPhase::Start => "start",
        AnimationPhase::Finish => "finish",
        AnimationPhase::Superseded => "superseded",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_reveal_start(&mut self, e: &RevealStartEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal:start] at={:.1}ms targets={} outcome={:?}",
            ms(e.at),
            e.targets,
            e.outcome,
        );
    }

    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal:observe] at={:.1}ms target={}",
            ms(e.at),
            e.target.0,
        );
    }

    fn on_observe_failed(&mut self, e: &ObserveFailedEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal:observe-failed] at={:.1}ms target={}",
            ms(e.at),
            e.target.0,
        );
    }

    fn on_target_revealed(&mut self, e: &TargetRevealedEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal:target] at={:.1}ms target={} role={} children={}",
            ms(e.at),
            e.target.0,
            role_name(e.role),
            e.children,
        );
    }

    fn on_child_revealed(&mut self, e: &ChildRevealedEvent) {
        let late = e.at.saturating_duration_since(e.scheduled_for);
        let _ = writeln!(
            self.writer,
            "[reveal:child] at={:.1}ms target={} child={} late={:.1}ms",
            ms(e.at),
            e.target.0,
            e.child_index,
            late.as_millis_f64(),
        );
    }

    fn on_counter_growth(&mut self, e: &CounterGrowthEvent) {
        let _ = writeln!(
            self.writer,
            "[counter:grow] at={:.1}ms {} -> {} (+{}) after {:.1}ms",
            ms(e.at),
            e.old_value,
            e.new_value,
            e.new_value.saturating_sub(e.old_value),
            e.elapsed.as_millis_f64(),
        );
    }

    fn on_counter_toggle(&mut self, e: &CounterToggleEvent) {
        let mode = if e.expanded { "expanded" } else { "abbreviated" };
        let _ = writeln!(
            self.writer,
            "[counter:toggle] at={:.1}ms mode={mode} value={}",
            ms(e.at),
            e.value,
        );
    }

    fn on_animation(&mut self, e: &AnimationEvent) {
        let _ = writeln!(
            self.writer,
            "[anim:{}] at={:.1}ms token={} {} -> {}",
            phase_name(e.phase),
            ms(e.at),
            e.token,
            e.from,
            e.to,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feminova_core::reveal::TargetId;
    use feminova_core::time::Duration;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_growth() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_counter_growth(&CounterGrowthEvent {
            at: HostTime(5_000_000),
            old_value: 100_000,
            new_value: 100_015,
            elapsed: Duration::from_millis(5_000),
        });
        let out = output(sink);
        assert!(out.contains("[counter:grow]"), "got: {out}");
        assert!(out.contains("100000 -> 100015 (+15)"), "got: {out}");
    }

    #[test]
    fn pretty_print_child_lateness() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_child_revealed(&ChildRevealedEvent {
            at: HostTime(1_162_000),
            scheduled_for: HostTime(1_160_000),
            target: TargetId(3),
            child_index: 2,
        });
        let out = output(sink);
        assert!(out.contains("target=3 child=2 late=2.0ms"), "got: {out}");
    }
}
