// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].

use feminova_core::reveal::{RevealRole, TargetId};
use feminova_core::time::{Duration, HostTime};
use feminova_core::trace::{
    AnimationEvent, AnimationPhase, ChildRevealedEvent, CounterGrowthEvent, CounterToggleEvent,
    ObserveFailedEvent, RevealStartEvent, RevealStartOutcome, TargetObservedEvent,
    TargetRevealedEvent, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_REVEAL_START: u8 = 1;
const TAG_TARGET_OBSERVED: u8 = 2;
const TAG_OBSERVE_FAILED: u8 = 3;
const TAG_TARGET_REVEALED: u8 = 4;
const TAG_CHILD_REVEALED: u8 = 5;
const TAG_COUNTER_GROWTH: u8 = 6;
const TAG_COUNTER_TOGGLE: u8 = 7;
const TAG_ANIMATION: u8 = 8;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_time(&mut self, t: HostTime) {
        self.write_u64(t.ticks());
    }

    fn write_outcome(&mut self, o: RevealStartOutcome) {
        self.write_u8(match o {
            RevealStartOutcome::Deferred => 0,
            RevealStartOutcome::ReducedMotion => 1,
            RevealStartOutcome::Unsupported => 2,
        });
    }

    fn write_role(&mut self, r: RevealRole) {
        self.write_u8(match r {
            RevealRole::Single => 0,
            RevealRole::StaggerContainer => 1,
        });
    }

    fn write_phase(&mut self, p: AnimationPhase) {
        self.write_u8(match p {
            AnimationPhase::Start => 0,
            AnimationPhase::Finish => 1,
            AnimationPhase::Superseded => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_reveal_start(&mut self, e: &RevealStartEvent) {
        self.write_u8(TAG_REVEAL_START);
        self.write_time(e.at);
        self.write_u32(e.targets);
        self.write_outcome(e.outcome);
    }

    fn on_target_observed(&mut self, e: &TargetObservedEvent) {
        self.write_u8(TAG_TARGET_OBSERVED);
        self.write_time(e.at);
        self.write_u32(e.target.0);
    }

    fn on_observe_failed(&mut self, e: &ObserveFailedEvent) {
        self.write_u8(TAG_OBSERVE_FAILED);
        self.write_time(e.at);
        self.write_u32(e.target.0);
    }

    fn on_target_revealed(&mut self, e: &TargetRevealedEvent) {
        self.write_u8(TAG_TARGET_REVEALED);
        self.write_time(e.at);
        self.write_u32(e.target.0);
        self.write_role(e.role);
        self.write_u32(e.children);
    }

    fn on_child_revealed(&mut self, e: &ChildRevealedEvent) {
        self.write_u8(TAG_CHILD_REVEALED);
        self.write_time(e.at);
        self.write_time(e.scheduled_for);
        self.write_u32(e.target.0);
        self.write_u32(e.child_index);
    }

    fn on_counter_growth(&mut self, e: &CounterGrowthEvent) {
        self.write_u8(TAG_COUNTER_GROWTH);
        self.write_time(e.at);
        self.write_u64(e.old_value);
        self.write_u64(e.new_value);
        self.write_u64(e.elapsed.ticks());
    }

    fn on_counter_toggle(&mut self, e: &CounterToggleEvent) {
        self.write_u8(TAG_COUNTER_TOGGLE);
        self.write_time(e.at);
        self.write_u8(u8::from(e.expanded));
        self.write_u64(e.value);
    }

    fn on_animation(&mut self, e: &AnimationEvent) {
        self.write_u8(TAG_ANIMATION);
        self.write_time(e.at);
        self.write_u64(e.token);
        self.write_phase(e.phase);
        self.write_u64(e.from);
        self.write_u64(e.to);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`RevealStartEvent`].
    RevealStart(RevealStartEvent),
    /// A [`TargetObservedEvent`].
    TargetObserved(TargetObservedEvent),
    /// An [`ObserveFailedEvent`].
    ObserveFailed(ObserveFailedEvent),
    /// A [`TargetRevealedEvent`].
    TargetRevealed(TargetRevealedEvent),
    /// A [`ChildRevealedEvent`].
    ChildRevealed(ChildRevealedEvent),
    /// A [`CounterGrowthEvent`].
    CounterGrowth(CounterGrowthEvent),
    /// A [`CounterToggleEvent`].
    CounterToggle(CounterToggleEvent),
    /// An [`AnimationEvent`].
    Animation(AnimationEvent),
}

impl RecordedEvent {
    /// Returns the host time the event was emitted at.
    #[must_use]
    pub fn at(&self) -> HostTime {
        match self {
            Self::RevealStart(e) => e.at,
            Self::TargetObserved(e) => e.at,
            Self::ObserveFailed(e) => e.at,
            Self::TargetRevealed(e) => e.at,
            Self::ChildRevealed(e) => e.at,
            Self::CounterGrowth(e) => e.at,
            Self::CounterToggle(e) => e.at,
            Self::Animation(e) => e.at,
        }
    }
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_time(&mut self) -> Option<HostTime> {
        self.read_u64().map(HostTime)
    }

    fn read_outcome(&mut self) -> Option<RevealStartOutcome> {
        Some(match self.read_u8()? {
            0 => RevealStartOutcome::Deferred,
            1 => RevealStartOutcome::ReducedMotion,
            _ => RevealStartOutcome::Unsupported,
        })
    }

    fn read_role(&mut self) -> Option<RevealRole> {
        Some(match self.read_u8()? {
            0 => RevealRole::Single,
            _ => RevealRole::StaggerContainer,
        })
    }

    fn read_phase(&mut self) -> Option<AnimationPhase> {
        Some(match self.read_u8()? {
            0 => AnimationPhase::Start,
            1 => AnimationPhase::Finish,
            _ => AnimationPhase::Superseded,
        })
    }

    fn decode_reveal_start(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RevealStart(RevealStartEvent {
            at: self.read_time()?,
            targets: self.read_u32()?,
            outcome: self.read_outcome()?,
        }))
    }

    fn decode_target_observed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TargetObserved(TargetObservedEvent {
            at: self.read_time()?,
            target: TargetId(self.read_u32()?),
        }))
    }

    fn decode_observe_failed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ObserveFailed(ObserveFailedEvent {
            at: self.read_time()?,
            target: TargetId(self.read_u32()?),
        }))
    }

    fn decode_target_revealed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TargetRevealed(TargetRevealedEvent {
            at: self.read_time()?,
            target: TargetId(self.read_u32()?),
            role: self.read_role()?,
            children: self.read_u32()?,
        }))
    }

    fn decode_child_revealed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::ChildRevealed(ChildRevealedEvent {
            at: self.read_time()?,
            scheduled_for: self.read_time()?,
            target: TargetId(self.read_u32()?),
            child_index: self.read_u32()?,
        }))
    }

    fn decode_counter_growth(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CounterGrowth(CounterGrowthEvent {
            at: self.read_time()?,
            old_value: self.read_u64()?,
            new_value: self.read_u64()?,
            elapsed: Duration(self.read_u64()?),
        }))
    }

    fn decode_counter_toggle(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::CounterToggle(CounterToggleEvent {
            at: self.read_time()?,
            expanded: self.read_u8()? != 0,
            value: self.read_u64()?,
        }))
    }

    fn decode_animation(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Animation(AnimationEvent {
            at: self.read_time()?,
            token: self.read_u64()?,
            phase: self.read_phase()?,
            from: self.read_u64()?,
            to: self.read_u64()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_REVEAL_START => self.decode_reveal_start(),
            TAG_TARGET_OBSERVED => self.decode_target_observed(),
            TAG_OBSERVE_FAILED => self.decode_observe_failed(),
            TAG_TARGET_REVEALED => self.decode_target_revealed(),
            TAG_CHILD_REVEALED => self.decode_child_revealed(),
            TAG_COUNTER_GROWTH => self.decode_counter_growth(),
            TAG_COUNTER_TOGGLE => self.decode_counter_toggle(),
            TAG_ANIMATION => self.decode_animation(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
