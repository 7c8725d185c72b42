// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot, optionally staggered scroll-reveal scheduling.
//!
//! [`RevealScheduler`] tracks a set of registered targets, each in one of two
//! states:
//!
//! ```text
//!   Unseen ──(reported intersecting)──► Revealed (terminal)
//! ```
//!
//! The transition applies the reveal (immediately for [`RevealRole::Single`],
//! child by child for [`RevealRole::StaggerContainer`]) and unobserves the
//! target. Nothing ever moves a target back to `Unseen`.
//!
//! Observation starts [`RevealConfig::activation_delay`] after
//! [`start`](RevealScheduler::start) so content injected at page load has
//! settled into its final layout before visibility is measured.
//!
//! # Usage
//!
//! ```rust,ignore
//! let cards = scheduler.register(RevealRole::StaggerContainer);
//! scheduler.start(now(), env, &mut surface, &mut tracer);
//! // platform timer fires:
//! scheduler.advance(now(), &mut surface, &mut tracer);
//! // observer callback:
//! scheduler.on_visibility(now(), cards, true, &mut surface, &mut tracer);
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::backend::RevealSurface;
use crate::time::{Duration, HostTime};
use crate::timer::TimerQueue;
use crate::trace::{
    ChildRevealedEvent, ObserveFailedEvent, RevealStartEvent, RevealStartOutcome,
    TargetObservedEvent, TargetRevealedEvent, Tracer,
};

/// A handle to a target registered with a [`RevealScheduler`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetId(pub u32);

impl TargetId {
    /// Returns the registration index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// How a target reveals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealRole {
    /// The element itself receives the reveal.
    Single,
    /// The element's children receive the reveal one after another.
    StaggerContainer,
}

/// Per-target reveal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TargetState {
    /// Not yet reported intersecting.
    Unseen,
    /// Revealed; terminal.
    Revealed,
}

/// Scheduler lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchedulerPhase {
    /// [`start`](RevealScheduler::start) has not been called.
    Idle,
    /// Started; waiting for the activation delay to elapse.
    Pending,
    /// Observing targets.
    Active,
    /// Reduced motion is preferred; the scheduler never initialized.
    Disabled,
    /// Observation is unavailable; everything was revealed at start.
    FailedOpen,
}

/// Configuration for the [`RevealScheduler`].
#[derive(Clone, Copy, Debug)]
pub struct RevealConfig {
    /// How far above the viewport's bottom edge (percent of viewport height)
    /// an element must rise before it counts as visible.
    pub root_margin_bottom_pct: f64,
    /// Fraction of the element's area that must be visible.
    pub threshold: f64,
    /// Delay between `start` and the first observe calls.
    pub activation_delay: Duration,
    /// Delay added per child position inside a stagger container.
    pub stagger_interval: Duration,
}

impl RevealConfig {
    /// The site's tuning: `-12%` bottom margin, 6% threshold, 50ms
    /// activation delay, 80ms stagger.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            root_margin_bottom_pct: 12.0,
            threshold: 0.06,
            activation_delay: Duration::from_millis(50),
            stagger_interval: Duration::from_millis(80),
        }
    }

    /// Returns the margin in CSS `rootMargin` syntax, e.g. `0px 0px -12% 0px`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px -{}% 0px", self.root_margin_bottom_pct)
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// Platform capabilities relevant to revealing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealEnvironment {
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// The platform can report element visibility.
    pub observer_supported: bool,
}

#[derive(Clone, Copy, Debug)]
enum RevealTask {
    Activate,
    Child { target: TargetId, index: u32 },
}

#[derive(Clone, Copy, Debug)]
struct Target {
    role: RevealRole,
    state: TargetState,
    observed: bool,
}

/// Lazily reveals registered targets as they scroll into view.
#[derive(Debug)]
pub struct RevealScheduler {
    config: RevealConfig,
    targets: Vec<Target>,
    phase: SchedulerPhase,
    timers: TimerQueue<RevealTask>,
}

impl RevealScheduler {
    /// Creates an idle scheduler with no targets.
    #[must_use]
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            targets: Vec::new(),
            phase: SchedulerPhase::Idle,
            timers: TimerQueue::new(),
        }
    }

    /// Returns the scheduler's configuration.
    #[must_use]
    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    /// Registers a target. Targets are normally registered before
    /// [`start`](Self::start); a target registered while the scheduler is
    /// already active is observed on the next [`advance`](Self::advance).
    pub fn register(&mut self, role: RevealRole) -> TargetId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page never carries u32::MAX reveal targets"
        )]
        let id = TargetId(self.targets.len() as u32);
        self.targets.push(Target {
            role,
            state: TargetState::Unseen,
            observed: false,
        });
        if self.phase == SchedulerPhase::Active {
            self.timers.schedule(HostTime(0), RevealTask::Activate);
        }
        id
    }

    /// Starts the scheduler.
    ///
    /// - Reduced motion: the scheduler disables itself without touching the
    ///   surface.
    /// - No visibility observation: every target (and every child of every
    ///   stagger container) is revealed immediately.
    /// - Otherwise observation is scheduled after the activation delay.
    ///
    /// Calling `start` more than once has no effect.
    pub fn start(
        &mut self,
        now: HostTime,
        env: RevealEnvironment,
        surface: &mut dyn RevealSurface,
        tracer: &mut Tracer<'_>,
    ) -> RevealStartOutcome {
        if self.phase != SchedulerPhase::Idle {
            return match self.phase {
                SchedulerPhase::Disabled => RevealStartOutcome::ReducedMotion,
                SchedulerPhase::FailedOpen => RevealStartOutcome::Unsupported,
                _ => RevealStartOutcome::Deferred,
            };
        }

        let outcome = if env.reduced_motion {
            self.phase = SchedulerPhase::Disabled;
            RevealStartOutcome::ReducedMotion
        } else if !env.observer_supported {
            self.phase = SchedulerPhase::FailedOpen;
            self.reveal_everything(now, surface, tracer);
            RevealStartOutcome::Unsupported
        } else {
            self.phase = SchedulerPhase::Pending;
            self.timers.schedule(
                now.saturating_add(self.config.activation_delay),
                RevealTask::Activate,
            );
            RevealStartOutcome::Deferred
        };

        #[expect(
            clippy::cast_possible_truncation,
            reason = "target count is bounded by register"
        )]
        tracer.reveal_start(&RevealStartEvent {
            at: now,
            targets: self.targets.len() as u32,
            outcome,
        });
        outcome
    }

    /// Runs every task due at `now`: the deferred activation and pending
    /// stagger-child reveals, in deadline order.
    pub fn advance(
        &mut self,
        now: HostTime,
        surface: &mut dyn RevealSurface,
        tracer: &mut Tracer<'_>,
    ) {
        while let Some((id, task)) = self.timers.pop_due(now) {
            match task {
                RevealTask::Activate => self.activate(now, surface, tracer),
                RevealTask::Child { target, index } => {
                    surface.reveal_child(target, index as usize);
                    tracer.child_revealed(&ChildRevealedEvent {
                        at: now,
                        scheduled_for: id.deadline(),
                        target,
                        child_index: index,
                    });
                }
            }
        }
    }

    /// Handles a visibility report for `target`.
    ///
    /// Returns `true` if this report revealed the target. Reports for
    /// unknown, unobserved or already revealed targets, and reports with
    /// `is_intersecting == false`, do nothing.
    pub fn on_visibility(
        &mut self,
        now: HostTime,
        target: TargetId,
        is_intersecting: bool,
        surface: &mut dyn RevealSurface,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        if !is_intersecting {
            return false;
        }
        let Some(entry) = self.targets.get_mut(target.index()) else {
            return false;
        };
        if entry.state == TargetState::Revealed || !entry.observed {
            return false;
        }

        entry.state = TargetState::Revealed;
        entry.observed = false;
        let role = entry.role;

        let children = match role {
            RevealRole::Single => {
                surface.reveal(target);
                0
            }
            RevealRole::StaggerContainer => {
                // Children are read once, here; later DOM changes are ignored.
                let count = surface.snapshot_children(target);
                for index in 0..count {
                    let delay = self.config.stagger_interval * index as u64;
                    #[expect(
                        clippy::cast_possible_truncation,
                        reason = "child counts are small"
                    )]
                    self.timers.schedule(
                        now.saturating_add(delay),
                        RevealTask::Child {
                            target,
                            index: index as u32,
                        },
                    );
                }
                count
            }
        };
        surface.unobserve(target);

        #[expect(
            clippy::cast_possible_truncation,
            reason = "child counts are small"
        )]
        tracer.target_revealed(&TargetRevealedEvent {
            at: now,
            target,
            role,
            children: children as u32,
        });
        true
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.next_deadline()
    }

    /// Returns the scheduler lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> SchedulerPhase {
        self.phase
    }

    /// Returns the state of `target`, or `None` if it was never registered.
    #[must_use]
    pub fn state(&self, target: TargetId) -> Option<TargetState> {
        self.targets.get(target.index()).map(|t| t.state)
    }

    /// Returns `true` if `target` is currently observed.
    #[must_use]
    pub fn is_observed(&self, target: TargetId) -> bool {
        self.targets.get(target.index()).is_some_and(|t| t.observed)
    }

    /// Returns the number of registered targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Returns `true` if no target is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    fn activate(
        &mut self,
        now: HostTime,
        surface: &mut dyn RevealSurface,
        tracer: &mut Tracer<'_>,
    ) {
        if !matches!(self.phase, SchedulerPhase::Pending | SchedulerPhase::Active) {
            return;
        }
        self.phase = SchedulerPhase::Active;

        for (idx, entry) in self.targets.iter_mut().enumerate() {
            if entry.state == TargetState::Revealed || entry.observed {
                continue;
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "target count is bounded by register"
            )]
            let target = TargetId(idx as u32);
            match surface.observe(target) {
                Ok(()) => {
                    entry.observed = true;
                    tracer.target_observed(&TargetObservedEvent { at: now, target });
                }
                Err(_) => tracer.observe_failed(&ObserveFailedEvent { at: now, target }),
            }
        }
    }

    fn reveal_everything(
        &mut self,
        now: HostTime,
        surface: &mut dyn RevealSurface,
        tracer: &mut Tracer<'_>,
    ) {
        for (idx, entry) in self.targets.iter_mut().enumerate() {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "target count is bounded by register"
            )]
            let target = TargetId(idx as u32);
            entry.state = TargetState::Revealed;
            let children = match entry.role {
                RevealRole::Single => {
                    surface.reveal(target);
                    0
                }
                RevealRole::StaggerContainer => {
                    let count = surface.snapshot_children(target);
                    for index in 0..count {
                        surface.reveal_child(target, index);
                    }
                    count
                }
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "child counts are small"
            )]
            tracer.target_revealed(&TargetRevealedEvent {
                at: now,
                target,
                role: entry.role,
                children: children as u32,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;
    use crate::backend::SurfaceError;

    #[derive(Default)]
    struct FakeSurface {
        children: Vec<usize>,
        snapshots: Vec<TargetId>,
        observe_calls: Vec<TargetId>,
        unobserve_calls: Vec<TargetId>,
        revealed: Vec<TargetId>,
        revealed_children: Vec<(TargetId, usize)>,
        reject: Vec<TargetId>,
    }

    impl RevealSurface for FakeSurface {
        fn observe(&mut self, target: TargetId) -> Result<(), SurfaceError> {
            if self.reject.contains(&target) {
                return Err(SurfaceError::Rejected(target));
            }
            self.observe_calls.push(target);
            Ok(())
        }

        fn unobserve(&mut self, target: TargetId) {
            self.unobserve_calls.push(target);
        }

        fn snapshot_children(&mut self, target: TargetId) -> usize {
            self.snapshots.push(target);
            self.children.get(target.index()).copied().unwrap_or(0)
        }

        fn reveal(&mut self, target: TargetId) {
            self.revealed.push(target);
        }

        fn reveal_child(&mut self, target: TargetId, index: usize) {
            self.revealed_children.push((target, index));
        }
    }

    const ENV: RevealEnvironment = RevealEnvironment {
        reduced_motion: false,
        observer_supported: true,
    };

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1000)
    }

    fn started(roles: &[RevealRole], surface: &mut FakeSurface) -> (RevealScheduler, Vec<TargetId>) {
        let mut sched = RevealScheduler::new(RevealConfig::site());
        let ids = roles.iter().map(|&r| sched.register(r)).collect();
        let mut tracer = Tracer::none();
        assert_eq!(
            sched.start(ms(0), ENV, surface, &mut tracer),
            RevealStartOutcome::Deferred
        );
        (sched, ids)
    }

    #[test]
    fn root_margin_matches_css_syntax() {
        assert_eq!(RevealConfig::site().root_margin(), "0px 0px -12% 0px");
    }

    #[test]
    fn observation_waits_for_activation_delay() {
        let mut surface = FakeSurface::default();
        let (mut sched, ids) = started(&[RevealRole::Single, RevealRole::Single], &mut surface);
        let mut tracer = Tracer::none();

        assert_eq!(sched.next_deadline(), Some(ms(50)));
        sched.advance(ms(49), &mut surface, &mut tracer);
        assert!(surface.observe_calls.is_empty(), "observed before 50ms");
        assert_eq!(sched.phase(), SchedulerPhase::Pending);

        sched.advance(ms(50), &mut surface, &mut tracer);
        assert_eq!(surface.observe_calls, ids);
        assert_eq!(sched.phase(), SchedulerPhase::Active);
    }

    #[test]
    fn single_target_reveals_once_and_is_unobserved() {
        let mut surface = FakeSurface::default();
        let (mut sched, ids) = started(&[RevealRole::Single], &mut surface);
        let mut tracer = Tracer::none();
        sched.advance(ms(50), &mut surface, &mut tracer);

        assert!(!sched.on_visibility(ms(60), ids[0], false, &mut surface, &mut tracer));
        assert_eq!(sched.state(ids[0]), Some(TargetState::Unseen));

        assert!(sched.on_visibility(ms(70), ids[0], true, &mut surface, &mut tracer));
        assert!(!sched.on_visibility(ms(80), ids[0], true, &mut surface, &mut tracer));
        assert_eq!(surface.revealed, vec![ids[0]]);
        assert_eq!(surface.unobserve_calls, vec![ids[0]]);
        assert!(!sched.is_observed(ids[0]));
        assert_eq!(sched.state(ids[0]), Some(TargetState::Revealed));

        // A later activation pass must not observe it again.
        sched.register(RevealRole::Single);
        sched.advance(ms(500), &mut surface, &mut tracer);
        assert_eq!(
            surface.observe_calls.iter().filter(|&&t| t == ids[0]).count(),
            1,
            "revealed target was re-observed"
        );
    }

    #[test]
    fn stagger_children_fire_in_order_at_80ms_steps() {
        let mut surface = FakeSurface {
            children: vec![4],
            ..FakeSurface::default()
        };
        let (mut sched, ids) = started(&[RevealRole::StaggerContainer], &mut surface);
        let mut tracer = Tracer::none();
        sched.advance(ms(50), &mut surface, &mut tracer);

        assert!(sched.on_visibility(ms(100), ids[0], true, &mut surface, &mut tracer));
        assert!(surface.revealed.is_empty(), "container itself is not revealed");
        assert_eq!(surface.unobserve_calls, vec![ids[0]]);

        sched.advance(ms(100), &mut surface, &mut tracer);
        assert_eq!(surface.revealed_children, vec![(ids[0], 0)]);

        sched.advance(ms(179), &mut surface, &mut tracer);
        assert_eq!(surface.revealed_children.len(), 1, "child 1 fired early");

        sched.advance(ms(180), &mut surface, &mut tracer);
        assert_eq!(surface.revealed_children.len(), 2);

        sched.advance(ms(340), &mut surface, &mut tracer);
        assert_eq!(
            surface.revealed_children,
            vec![(ids[0], 0), (ids[0], 1), (ids[0], 2), (ids[0], 3)]
        );
        assert_eq!(sched.next_deadline(), None);
    }

    #[test]
    fn late_host_wakeup_preserves_child_order() {
        let mut surface = FakeSurface {
            children: vec![6],
            ..FakeSurface::default()
        };
        let (mut sched, ids) = started(&[RevealRole::StaggerContainer], &mut surface);
        let mut tracer = Tracer::none();
        sched.advance(ms(50), &mut surface, &mut tracer);
        sched.on_visibility(ms(100), ids[0], true, &mut surface, &mut tracer);

        // One very late wake-up drains everything at once.
        sched.advance(ms(5_000), &mut surface, &mut tracer);
        let order: Vec<usize> = surface.revealed_children.iter().map(|&(_, i)| i).collect();
        assert_eq!(order, [0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn children_are_read_once_at_trigger_time() {
        let mut surface = FakeSurface {
            children: vec![2],
            ..FakeSurface::default()
        };
        let (mut sched, ids) = started(&[RevealRole::StaggerContainer], &mut surface);
        let mut tracer = Tracer::none();
        sched.advance(ms(50), &mut surface, &mut tracer);
        sched.on_visibility(ms(100), ids[0], true, &mut surface, &mut tracer);

        surface.children[0] = 5;
        sched.advance(ms(1_000), &mut surface, &mut tracer);
        assert_eq!(surface.revealed_children, vec![(ids[0], 0), (ids[0], 1)]);
        assert_eq!(surface.snapshots, vec![ids[0]], "captured exactly once");
    }

    #[test]
    fn reduced_motion_touches_nothing() {
        let mut surface = FakeSurface::default();
        let mut sched = RevealScheduler::new(RevealConfig::site());
        let id = sched.register(RevealRole::Single);
        let mut tracer = Tracer::none();
        let env = RevealEnvironment {
            reduced_motion: true,
            observer_supported: true,
        };

        assert_eq!(
            sched.start(ms(0), env, &mut surface, &mut tracer),
            RevealStartOutcome::ReducedMotion
        );
        sched.advance(ms(10_000), &mut surface, &mut tracer);
        assert!(!sched.on_visibility(ms(10_000), id, true, &mut surface, &mut tracer));

        assert!(surface.observe_calls.is_empty());
        assert!(surface.revealed.is_empty());
        assert_eq!(sched.state(id), Some(TargetState::Unseen));
        assert_eq!(sched.phase(), SchedulerPhase::Disabled);
    }

    #[test]
    fn unsupported_observer_reveals_everything_immediately() {
        let mut surface = FakeSurface {
            children: vec![0, 3],
            ..FakeSurface::default()
        };
        let mut sched = RevealScheduler::new(RevealConfig::site());
        let single = sched.register(RevealRole::Single);
        let stagger = sched.register(RevealRole::StaggerContainer);
        let mut tracer = Tracer::none();
        let env = RevealEnvironment {
            reduced_motion: false,
            observer_supported: false,
        };

        assert_eq!(
            sched.start(ms(0), env, &mut surface, &mut tracer),
            RevealStartOutcome::Unsupported
        );
        assert!(surface.observe_calls.is_empty());
        assert_eq!(surface.revealed, vec![single]);
        assert_eq!(
            surface.revealed_children,
            vec![(stagger, 0), (stagger, 1), (stagger, 2)]
        );
        assert_eq!(sched.next_deadline(), None);
    }

    #[test]
    fn rejected_observe_is_swallowed() {
        let mut surface = FakeSurface::default();
        let mut sched = RevealScheduler::new(RevealConfig::site());
        let bad = sched.register(RevealRole::Single);
        let good = sched.register(RevealRole::Single);
        surface.reject.push(bad);
        let mut tracer = Tracer::none();
        sched.start(ms(0), ENV, &mut surface, &mut tracer);
        sched.advance(ms(50), &mut surface, &mut tracer);

        assert_eq!(surface.observe_calls, vec![good]);
        assert!(!sched.is_observed(bad));
        assert!(!sched.on_visibility(ms(60), bad, true, &mut surface, &mut tracer));
        assert_eq!(sched.state(bad), Some(TargetState::Unseen));
    }

    #[test]
    fn second_start_is_a_no_op() {
        let mut surface = FakeSurface::default();
        let (mut sched, _) = started(&[RevealRole::Single], &mut surface);
        let mut tracer = Tracer::none();
        sched.start(ms(10), ENV, &mut surface, &mut tracer);
        sched.advance(ms(1_000), &mut surface, &mut tracer);
        assert_eq!(surface.observe_calls.len(), 1);
    }
}
