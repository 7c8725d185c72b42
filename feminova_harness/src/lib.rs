// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic simulated page for driving `feminova_core` without a
//! browser.
//!
//! - [`SimPage`]: a scrollable page of rectangles implementing
//!   [`RevealSurface`]. Visibility is computed with the same predicate the
//!   browser applies, and changes are queued the way an intersection
//!   observer delivers them.
//! - [`SimCounterView`]: a [`CounterView`] that records what it was told.
//! - [`ManualClock`]: host time that only moves when told to.
//! - [`run_reveal`] and [`run_counter`]: drive a component to a point in
//!   time, firing deadlines, frames and observer reports in order.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;

use feminova_core::backend::{CounterView, RevealSurface, SurfaceError};
use feminova_core::counter::{
    AnimationToken, CounterCue, CounterText, FrameStatus, ImpactCounter,
};
use feminova_core::reveal::{RevealConfig, RevealScheduler, TargetId};
use feminova_core::time::{Duration, HostTime};
use feminova_core::trace::Tracer;
use feminova_core::visibility::is_intersecting;

/// Host time that only advances when told to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ManualClock {
    now: HostTime,
}

impl ManualClock {
    /// Creates a clock reading `start`.
    #[must_use]
    pub const fn new(start: HostTime) -> Self {
        Self { now: start }
    }

    /// Returns the current reading.
    #[must_use]
    pub const fn now(&self) -> HostTime {
        self.now
    }

    /// Moves the clock forward by `d`.
    pub fn advance_by(&mut self, d: Duration) -> HostTime {
        self.now = self.now.saturating_add(d);
        self.now
    }

    /// Moves the clock to `t`. Earlier times are ignored.
    pub fn advance_to(&mut self, t: HostTime) -> HostTime {
        if t > self.now {
            self.now = t;
        }
        self.now
    }
}

#[derive(Clone, Copy, Debug)]
struct SimChild {
    key: u32,
    revealed: bool,
}

#[derive(Clone, Debug)]
struct SimElement {
    rect: Rect,
    revealed: bool,
    children: Vec<SimChild>,
    /// Child keys captured by the last snapshot.
    snapshot: Vec<u32>,
    next_key: u32,
    observed: bool,
    refuse_observe: bool,
    last_reported: Option<bool>,
}

/// A scrollable page of rectangular elements.
///
/// Element rectangles are in document coordinates; the viewport is
/// `width × height` at the current scroll offset.
#[derive(Clone, Debug)]
pub struct SimPage {
    config: RevealConfig,
    width: f64,
    height: f64,
    scroll_y: f64,
    elements: Vec<SimElement>,
}

impl SimPage {
    /// Creates an empty page with the given viewport size, scrolled to the
    /// top.
    #[must_use]
    pub fn new(config: RevealConfig, width: f64, height: f64) -> Self {
        Self {
            config,
            width,
            height,
            scroll_y: 0.0,
            elements: Vec::new(),
        }
    }

    /// Adds an element at `rect` with `children` children. Elements must be
    /// added in the order their targets are registered with the scheduler.
    pub fn add(&mut self, rect: Rect, children: usize) -> TargetId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test pages are small"
        )]
        let id = TargetId(self.elements.len() as u32);
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test pages are small"
        )]
        let children: Vec<SimChild> = (0..children)
            .map(|key| SimChild {
                key: key as u32,
                revealed: false,
            })
            .collect();
        #[expect(
            clippy::cast_possible_truncation,
            reason = "test pages are small"
        )]
        let next_key = children.len() as u32;
        self.elements.push(SimElement {
            rect,
            revealed: false,
            children,
            snapshot: Vec::new(),
            next_key,
            observed: false,
            refuse_observe: false,
            last_reported: None,
        });
        id
    }

    /// Makes every future observe call for `target` fail.
    pub fn refuse_observe(&mut self, target: TargetId) {
        if let Some(el) = self.elements.get_mut(target.index()) {
            el.refuse_observe = true;
        }
    }

    /// Appends a child to `target` after the fact.
    pub fn push_child(&mut self, target: TargetId) {
        let at = self.children_revealed(target).len();
        self.insert_child(target, at);
    }

    /// Inserts a new child into `target` at position `at`, shifting later
    /// children along.
    pub fn insert_child(&mut self, target: TargetId, at: usize) {
        if let Some(el) = self.elements.get_mut(target.index()) {
            let child = SimChild {
                key: el.next_key,
                revealed: false,
            };
            el.next_key += 1;
            el.children.insert(at.min(el.children.len()), child);
        }
    }

    /// Scrolls the viewport to `y`.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.max(0.0);
    }

    /// Returns the current viewport rectangle in document coordinates.
    #[must_use]
    pub fn viewport(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.scroll_y + self.height)
    }

    /// Returns `true` if `target` itself was revealed.
    #[must_use]
    pub fn is_revealed(&self, target: TargetId) -> bool {
        self.elements
            .get(target.index())
            .is_some_and(|el| el.revealed)
    }

    /// Returns the revealed flag of each child of `target`, in current
    /// document order.
    #[must_use]
    pub fn children_revealed(&self, target: TargetId) -> Vec<bool> {
        self.elements
            .get(target.index())
            .map_or_else(Vec::new, |el| el.children.iter().map(|c| c.revealed).collect())
    }

    /// Returns `true` if `target` is being observed.
    #[must_use]
    pub fn is_observed(&self, target: TargetId) -> bool {
        self.elements
            .get(target.index())
            .is_some_and(|el| el.observed)
    }

    /// Collects visibility reports for observed elements whose state changed
    /// since their last report. A freshly observed element always reports
    /// once.
    pub fn take_reports(&mut self) -> Vec<(TargetId, bool)> {
        let viewport = self.viewport();
        let mut out = Vec::new();
        for (idx, el) in self.elements.iter_mut().enumerate() {
            if !el.observed {
                continue;
            }
            let visible = is_intersecting(el.rect, viewport, &self.config);
            if el.last_reported != Some(visible) {
                el.last_reported = Some(visible);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "test pages are small"
                )]
                out.push((TargetId(idx as u32), visible));
            }
        }
        out
    }
}

impl RevealSurface for SimPage {
    fn observe(&mut self, target: TargetId) -> Result<(), SurfaceError> {
        let el = self
            .elements
            .get_mut(target.index())
            .ok_or(SurfaceError::UnknownTarget(target))?;
        if el.refuse_observe {
            return Err(SurfaceError::Rejected(target));
        }
        el.observed = true;
        el.last_reported = None;
        Ok(())
    }

    fn unobserve(&mut self, target: TargetId) {
        if let Some(el) = self.elements.get_mut(target.index()) {
            el.observed = false;
        }
    }

    fn snapshot_children(&mut self, target: TargetId) -> usize {
        let Some(el) = self.elements.get_mut(target.index()) else {
            return 0;
        };
        el.snapshot = el.children.iter().map(|c| c.key).collect();
        el.snapshot.len()
    }

    fn reveal(&mut self, target: TargetId) {
        if let Some(el) = self.elements.get_mut(target.index()) {
            el.revealed = true;
        }
    }

    fn reveal_child(&mut self, target: TargetId, index: usize) {
        let Some(el) = self.elements.get_mut(target.index()) else {
            return;
        };
        let Some(&key) = el.snapshot.get(index) else {
            return;
        };
        if let Some(child) = el.children.iter_mut().find(|c| c.key == key) {
            child.revealed = true;
        }
    }
}

/// Drives `scheduler` against `page` up to and including `until`.
///
/// Deadlines fire in order; after each one, and once at `until`, pending
/// visibility reports are delivered at the current clock reading.
pub fn run_reveal(
    scheduler: &mut RevealScheduler,
    page: &mut SimPage,
    clock: &mut ManualClock,
    until: HostTime,
) {
    let mut tracer = Tracer::none();
    loop {
        deliver_reports(scheduler, page, clock.now(), &mut tracer);
        match scheduler.next_deadline() {
            Some(deadline) if deadline <= until => {
                let now = clock.advance_to(deadline);
                scheduler.advance(now, page, &mut tracer);
            }
            _ => break,
        }
    }
    let now = clock.advance_to(until);
    deliver_reports(scheduler, page, now, &mut tracer);
}

fn deliver_reports(
    scheduler: &mut RevealScheduler,
    page: &mut SimPage,
    now: HostTime,
    tracer: &mut Tracer<'_>,
) {
    for (target, visible) in page.take_reports() {
        scheduler.on_visibility(now, target, visible, page, tracer);
    }
}

/// A [`CounterView`] that records what it was told.
#[derive(Clone, Debug, Default)]
pub struct SimCounterView {
    /// The visible text.
    pub text: String,
    /// Every text rendered, in order.
    pub history: Vec<String>,
    /// Rolling renders with at least one scrolling glyph.
    pub scrolling_frames: usize,
    cues: [bool; 4],
}

impl SimCounterView {
    /// Returns whether `cue` is on.
    #[must_use]
    pub fn cue(&self, cue: CounterCue) -> bool {
        self.cues[cue_slot(cue)]
    }
}

fn cue_slot(cue: CounterCue) -> usize {
    match cue {
        CounterCue::Enhanced => 0,
        CounterCue::Updating => 1,
        CounterCue::ClickAnimate => 2,
        CounterCue::Expanded => 3,
    }
}

impl CounterView for SimCounterView {
    fn render(&mut self, text: &CounterText<'_>) {
        if let CounterText::Rolling(glyphs) = text
            && glyphs.iter().any(|g| g.scrolling)
        {
            self.scrolling_frames += 1;
        }
        self.text = text.to_plain();
        self.history.push(self.text.clone());
    }

    fn set_cue(&mut self, cue: CounterCue, on: bool) {
        self.cues[cue_slot(cue)] = on;
    }
}

/// Drives `counter` up to and including `until`, delivering a frame every
/// `frame_interval` while an animation is in flight.
///
/// `animation` carries the in-flight token across calls; pass the token
/// returned by [`ImpactCounter::click`] to animate a click.
pub fn run_counter(
    counter: &mut ImpactCounter,
    view: &mut SimCounterView,
    clock: &mut ManualClock,
    animation: &mut Option<AnimationToken>,
    frame_interval: Duration,
    until: HostTime,
) {
    let mut tracer = Tracer::none();
    let mut next_frame = clock.now().saturating_add(frame_interval);
    loop {
        let timer = counter.next_deadline();
        let frame = animation.map(|_| next_frame);
        let next = match (timer, frame) {
            (Some(t), Some(f)) => t.min(f),
            (Some(t), None) => t,
            (None, Some(f)) => f,
            (None, None) => break,
        };
        if next > until {
            break;
        }
        let now = clock.advance_to(next);

        if timer == Some(next)
            && let Some(token) = counter.advance(now, view, &mut tracer)
        {
            if animation.is_none() {
                next_frame = now.saturating_add(frame_interval);
            }
            *animation = Some(token);
        }
        if let Some(token) = *animation
            && now >= next_frame
        {
            next_frame = now.saturating_add(frame_interval);
            if counter.frame(token, now, view, &mut tracer) != FrameStatus::Running {
                *animation = None;
            }
        }
    }
    clock.advance_to(until);
}

#[cfg(test)]
mod tests {
    use super::*;
    use feminova_core::counter::{CounterConfig, format};
    use feminova_core::reveal::{RevealEnvironment, RevealRole, TargetState};
    use feminova_core::time::WallTime;

    const ENV: RevealEnvironment = RevealEnvironment {
        reduced_motion: false,
        observer_supported: true,
    };

    fn ms(v: u64) -> HostTime {
        HostTime(v * 1000)
    }

    /// Hero card visible at load, a stagger grid below the fold, and a card
    /// further down.
    fn landing_page() -> (RevealScheduler, SimPage, [TargetId; 3]) {
        let config = RevealConfig::site();
        let mut scheduler = RevealScheduler::new(config);
        let mut page = SimPage::new(config, 1280.0, 800.0);

        let hero = scheduler.register(RevealRole::Single);
        assert_eq!(page.add(Rect::new(0.0, 100.0, 1280.0, 400.0), 0), hero);
        let grid = scheduler.register(RevealRole::StaggerContainer);
        assert_eq!(page.add(Rect::new(0.0, 1200.0, 1280.0, 1600.0), 4), grid);
        let footer = scheduler.register(RevealRole::Single);
        assert_eq!(page.add(Rect::new(0.0, 3000.0, 1280.0, 3200.0), 0), footer);

        (scheduler, page, [hero, grid, footer])
    }

    #[test]
    fn visible_content_reveals_after_activation_delay() {
        let (mut scheduler, mut page, [hero, grid, _]) = landing_page();
        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());

        run_reveal(&mut scheduler, &mut page, &mut clock, ms(49));
        assert!(!page.is_revealed(hero), "revealed before activation");

        run_reveal(&mut scheduler, &mut page, &mut clock, ms(50));
        assert!(page.is_revealed(hero));
        assert!(!page.is_observed(hero), "unobserved after reveal");
        assert_eq!(scheduler.state(grid), Some(TargetState::Unseen));
        assert!(page.is_observed(grid));
    }

    #[test]
    fn stagger_children_reveal_eighty_ms_apart() {
        let (mut scheduler, mut page, [_, grid, _]) = landing_page();
        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_000));

        page.scroll_to(600.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_000));
        assert_eq!(scheduler.state(grid), Some(TargetState::Revealed));
        assert_eq!(page.children_revealed(grid), &[true, false, false, false]);

        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_079));
        assert_eq!(page.children_revealed(grid), &[true, false, false, false]);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_080));
        assert_eq!(page.children_revealed(grid), &[true, true, false, false]);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_240));
        assert_eq!(page.children_revealed(grid), &[true, true, true, true]);
        assert!(!page.is_revealed(grid), "container itself is not revealed");
    }

    #[test]
    fn child_inserted_mid_stagger_does_not_shift_reveals() {
        let (mut scheduler, mut page, [_, grid, _]) = landing_page();
        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_000));

        page.scroll_to(600.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_040));
        assert_eq!(page.children_revealed(grid), &[true, false, false, false]);

        page.insert_child(grid, 0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_080));
        assert_eq!(
            page.children_revealed(grid),
            &[false, true, true, false, false],
            "second captured child revealed, not the first one again"
        );

        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_240));
        assert_eq!(
            page.children_revealed(grid),
            &[false, true, true, true, true],
            "inserted child is not part of the capture"
        );
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn scrolling_away_and_back_does_not_replay() {
        let (mut scheduler, mut page, [_, grid, _]) = landing_page();
        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(100));

        page.scroll_to(600.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_000));
        page.push_child(grid);
        page.scroll_to(0.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(2_000));
        page.scroll_to(600.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(3_000));

        assert_eq!(
            page.children_revealed(grid),
            &[true, true, true, true, false],
            "late child is never revealed"
        );
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn element_under_bottom_margin_waits() {
        let config = RevealConfig::site();
        let mut scheduler = RevealScheduler::new(config);
        let mut page = SimPage::new(config, 1000.0, 800.0);
        let card = scheduler.register(RevealRole::Single);
        // Top edge at 720px: on screen, but below the 704px root edge.
        page.add(Rect::new(0.0, 720.0, 1000.0, 920.0), 0);

        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(500));
        assert!(!page.is_revealed(card));

        page.scroll_to(40.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(600));
        assert!(page.is_revealed(card));
    }

    #[test]
    fn reduced_motion_leaves_page_untouched() {
        let (mut scheduler, mut page, targets) = landing_page();
        let mut clock = ManualClock::new(ms(0));
        let env = RevealEnvironment {
            reduced_motion: true,
            observer_supported: true,
        };
        scheduler.start(clock.now(), env, &mut page, &mut Tracer::none());
        page.scroll_to(2_800.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(10_000));

        for t in targets {
            assert!(!page.is_revealed(t));
            assert!(!page.is_observed(t));
        }
        assert!(page.children_revealed(targets[1]).iter().all(|c| !c));
    }

    #[test]
    fn missing_observer_reveals_everything_at_once() {
        let (mut scheduler, mut page, [hero, grid, footer]) = landing_page();
        let env = RevealEnvironment {
            reduced_motion: false,
            observer_supported: false,
        };
        scheduler.start(ms(0), env, &mut page, &mut Tracer::none());

        assert!(page.is_revealed(hero));
        assert!(page.is_revealed(footer));
        assert!(page.children_revealed(grid).iter().all(|c| *c));
        assert_eq!(scheduler.state(grid), Some(TargetState::Revealed));
        assert_eq!(scheduler.next_deadline(), None);
    }

    #[test]
    fn refused_observe_only_affects_that_target() {
        let (mut scheduler, mut page, [hero, grid, _]) = landing_page();
        page.refuse_observe(hero);
        let mut clock = ManualClock::new(ms(0));
        scheduler.start(clock.now(), ENV, &mut page, &mut Tracer::none());
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(100));
        assert!(!page.is_revealed(hero));

        page.scroll_to(600.0);
        run_reveal(&mut scheduler, &mut page, &mut clock, ms(1_000));
        assert_eq!(scheduler.state(grid), Some(TargetState::Revealed));
    }

    fn site_counter(secs_since_launch: i64, seed: u64) -> ImpactCounter {
        let config = CounterConfig::site();
        let wall = WallTime(config.launch_instant.0 + secs_since_launch * 1000);
        ImpactCounter::new(config, wall, seed)
    }

    #[test]
    fn counter_grows_and_settles_over_a_minute() {
        let mut counter = site_counter(2_100_000, 11);
        let mut view = SimCounterView::default();
        let mut clock = ManualClock::new(ms(0));
        let mut anim = None;
        counter.start(clock.now(), &mut view);
        assert_eq!(view.text, "100.0K");

        run_counter(
            &mut counter,
            &mut view,
            &mut clock,
            &mut anim,
            Duration::from_millis(16),
            ms(60_000),
        );

        let value = counter.state().current_value();
        // At least 51s of 3/s growth land before the minute is up (steps are
        // at most 9s apart), less under one unit of flooring per step.
        assert!(value >= 100_000 + 3 * 51 - 15, "value {value}");
        assert!(value <= 100_000 + 3 * 60, "value {value}");
        if anim.is_none() {
            assert_eq!(view.text, format(value, false));
            assert!(!view.cue(CounterCue::Updating));
        }
        assert!(view.cue(CounterCue::Enhanced));
        assert!(view.scrolling_frames > 0);
    }

    #[test]
    fn click_expands_then_collapses() {
        let mut counter = site_counter(2_101_523, 3);
        let mut view = SimCounterView::default();
        let mut clock = ManualClock::new(ms(0));
        counter.start(clock.now(), &mut view);
        let frame = Duration::from_millis(16);

        let mut anim = Some(counter.click(clock.now(), &mut view, &mut Tracer::none()));
        assert!(view.cue(CounterCue::ClickAnimate));
        assert!(view.cue(CounterCue::Expanded));
        run_counter(&mut counter, &mut view, &mut clock, &mut anim, frame, ms(900));
        assert_eq!(anim, None);
        assert_eq!(view.text, "101,523");
        assert!(!view.cue(CounterCue::ClickAnimate));

        let mut anim = Some(counter.click(clock.now(), &mut view, &mut Tracer::none()));
        run_counter(&mut counter, &mut view, &mut clock, &mut anim, frame, ms(1_800));
        assert_eq!(view.text, "101.5K");
        assert!(!view.cue(CounterCue::Expanded));
    }

    #[test]
    fn rapid_clicks_settle_on_last_mode() {
        let mut counter = site_counter(2_101_523, 3);
        let mut view = SimCounterView::default();
        let mut clock = ManualClock::new(ms(0));
        counter.start(clock.now(), &mut view);
        let frame = Duration::from_millis(16);

        let mut anim = Some(counter.click(clock.now(), &mut view, &mut Tracer::none()));
        run_counter(&mut counter, &mut view, &mut clock, &mut anim, frame, ms(100));
        anim = Some(counter.click(clock.now(), &mut view, &mut Tracer::none()));
        run_counter(&mut counter, &mut view, &mut clock, &mut anim, frame, ms(200));
        anim = Some(counter.click(clock.now(), &mut view, &mut Tracer::none()));
        run_counter(&mut counter, &mut view, &mut clock, &mut anim, frame, ms(1_100));

        assert!(counter.state().is_expanded());
        assert_eq!(view.text, "101,523");
    }
}
