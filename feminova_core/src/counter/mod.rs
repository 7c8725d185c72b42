// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic "women impacted" counter.
//!
//! The counter has no data source. Its value is derived from wall-clock time
//! since a fixed launch instant, grows by a few units per second at random
//! intervals, and is displayed either abbreviated (`102.4K`) or expanded
//! (`102,417`).
//!
//! [`CounterState`] holds the value and display mode. [`ImpactCounter`] owns
//! a state plus everything time-driven around it: the cancellable growth
//! task, the in-flight [`Animation`], the per-glyph scroll cues and the click
//! feedback cue.
//!
//! # Driving the counter
//!
//! ```rust,ignore
//! let mut counter = ImpactCounter::new(CounterConfig::site(), wall_now(), seed);
//! counter.start(now(), &mut view);
//!
//! // platform timer armed for counter.next_deadline():
//! if let Some(token) = counter.advance(now(), &mut view, &mut tracer) {
//!     // start a frame loop calling counter.frame(token, ..) until it
//!     // returns something other than FrameStatus::Running
//! }
//! ```

mod animate;
mod format;

pub use animate::{Animation, AnimationToken, ease};
pub use format::{format, is_rolling_glyph, parse_display};

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::backend::CounterView;
use crate::rng::Lcg64;
use crate::time::{Duration, HostTime, WallTime};
use crate::timer::{TimerId, TimerQueue};
use crate::trace::{
    AnimationEvent, AnimationPhase, CounterGrowthEvent, CounterToggleEvent, Tracer,
};

/// 2025-09-01T00:00:00Z.
pub const SITE_LAUNCH: WallTime = WallTime::from_unix_secs(1_756_684_800);

/// Configuration for the [`ImpactCounter`].
#[derive(Clone, Copy, Debug)]
pub struct CounterConfig {
    /// Reference instant the base value counts from.
    pub launch_instant: WallTime,
    /// Subtracted from the seconds since launch to land in a display-friendly
    /// range.
    pub base_offset: u64,
    /// Units added per second of elapsed time at each growth step.
    pub growth_per_second: f64,
    /// Lower bound (inclusive) of the random growth delay.
    pub min_growth_delay: Duration,
    /// Upper bound (exclusive) of the random growth delay.
    pub max_growth_delay: Duration,
    /// Animation length for growth steps.
    pub growth_animation: Duration,
    /// Animation length for the expand/collapse toggle.
    pub toggle_animation: Duration,
    /// How long the click feedback cue stays on.
    pub click_feedback: Duration,
    /// Delay between successive glyph scroll cues.
    pub glyph_stagger: Duration,
    /// How long each glyph scroll cue stays on.
    pub glyph_scroll: Duration,
}

impl CounterConfig {
    /// The site's tuning.
    #[must_use]
    pub const fn site() -> Self {
        Self {
            launch_instant: SITE_LAUNCH,
            base_offset: 2_000_000,
            growth_per_second: 3.0,
            min_growth_delay: Duration::from_millis(4_000),
            max_growth_delay: Duration::from_millis(9_000),
            growth_animation: Duration::from_millis(1_200),
            toggle_animation: Duration::from_millis(800),
            click_feedback: Duration::from_millis(600),
            glyph_stagger: Duration::from_millis(120),
            glyph_scroll: Duration::from_millis(1_200),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// Returns the counter's base value at `now`: whole seconds since launch
/// minus the offset, never below zero.
#[must_use]
pub fn base_value(config: &CounterConfig, now: WallTime) -> u64 {
    now.whole_secs_since(config.launch_instant)
        .saturating_sub(config.base_offset)
}

/// Returns the growth for `elapsed` time at `per_second` units per second,
/// rounded down.
#[must_use]
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "growth is a small non-negative count"
)]
pub fn growth_for(elapsed: Duration, per_second: f64) -> u64 {
    let growth = (per_second * elapsed.as_secs_f64()).floor();
    if growth.is_finite() && growth > 0.0 {
        growth as u64
    } else {
        0
    }
}

/// The counter's value and display mode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CounterState {
    launch_instant: WallTime,
    current_value: u64,
    is_expanded: bool,
}

impl CounterState {
    /// Creates a collapsed state holding the base value at `now`.
    #[must_use]
    pub fn new(config: &CounterConfig, now: WallTime) -> Self {
        Self {
            launch_instant: config.launch_instant,
            current_value: base_value(config, now),
            is_expanded: false,
        }
    }

    /// Returns the launch instant the value was derived from.
    #[must_use]
    pub fn launch_instant(&self) -> WallTime {
        self.launch_instant
    }

    /// Returns the current value.
    #[must_use]
    pub fn current_value(&self) -> u64 {
        self.current_value
    }

    /// Returns `true` when the display is expanded.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.is_expanded
    }

    /// Returns the settled display text.
    #[must_use]
    pub fn display(&self) -> String {
        format(self.current_value, self.is_expanded)
    }

    /// Flips the display mode and returns the new mode. The value is
    /// untouched.
    pub fn toggle(&mut self) -> bool {
        self.is_expanded = !self.is_expanded;
        self.is_expanded
    }

    /// Adds `growth` to the value, saturating, and returns the new value.
    pub fn grow(&mut self, growth: u64) -> u64 {
        self.current_value = self.current_value.saturating_add(growth);
        self.current_value
    }
}

/// Container states the view can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CounterCue {
    /// Set on the first animation and left on.
    Enhanced,
    /// On while an animation is in flight.
    Updating,
    /// Brief feedback after a click.
    ClickAnimate,
    /// On while the display is expanded.
    Expanded,
}

impl CounterCue {
    /// Returns the CSS class the cue maps to.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Enhanced => "counter-enhanced",
            Self::Updating => "updating",
            Self::ClickAnimate => "click-animate",
            Self::Expanded => "counter-expanded",
        }
    }
}

/// One character of rolling counter text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// The character.
    pub ch: char,
    /// Digits and separators are marked for the rolling effect.
    pub marked: bool,
    /// The mark is currently in its scrolling state.
    pub scrolling: bool,
}

/// What the view should display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CounterText<'a> {
    /// Final text, no per-glyph markup.
    Settled(&'a str),
    /// In-flight text with per-glyph cues.
    Rolling(&'a [Glyph]),
}

impl CounterText<'_> {
    /// Returns the visible characters with all markup dropped.
    #[must_use]
    pub fn to_plain(&self) -> String {
        match self {
            Self::Settled(text) => String::from(*text),
            Self::Rolling(glyphs) => glyphs.iter().map(|g| g.ch).collect(),
        }
    }
}

/// Result of delivering a frame to [`ImpactCounter::frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameStatus {
    /// The animation continues; request another frame.
    Running,
    /// The animation rendered its final text.
    Finished,
    /// The token no longer names the current animation; stop requesting
    /// frames for it.
    Stale,
}

#[derive(Clone, Copy, Debug)]
enum CounterTask {
    Growth { scheduled_at: HostTime },
    GlyphScroll {
        token: AnimationToken,
        mark: usize,
        on: bool,
    },
    ClickFeedbackEnd,
}

/// The counter component: state plus growth, animation and cue timing.
#[derive(Debug)]
pub struct ImpactCounter {
    config: CounterConfig,
    state: CounterState,
    timers: TimerQueue<CounterTask>,
    growth: Option<TimerId>,
    click_feedback: Option<TimerId>,
    animation: Option<Animation>,
    next_token: u64,
    scrolling: Vec<bool>,
    glyphs: Vec<Glyph>,
    rng: Lcg64,
    running: bool,
}

impl ImpactCounter {
    /// Creates a stopped counter holding the base value at `now`.
    ///
    /// `seed` drives the growth-delay generator.
    #[must_use]
    pub fn new(config: CounterConfig, now: WallTime, seed: u64) -> Self {
        Self {
            state: CounterState::new(&config, now),
            config,
            timers: TimerQueue::new(),
            growth: None,
            click_feedback: None,
            animation: None,
            next_token: 0,
            scrolling: Vec::new(),
            glyphs: Vec::new(),
            rng: Lcg64::new(seed),
            running: false,
        }
    }

    /// Returns the counter state.
    #[must_use]
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    /// Returns `true` between [`start`](Self::start) and
    /// [`stop`](Self::stop).
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns the token of the in-flight animation, if any.
    #[must_use]
    pub fn animation_token(&self) -> Option<AnimationToken> {
        self.animation.map(|a| a.token)
    }

    /// Returns the earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<HostTime> {
        self.timers.next_deadline()
    }

    /// Renders the initial text and schedules the first growth step.
    ///
    /// If already running, this is a no-op.
    pub fn start(&mut self, now: HostTime, view: &mut dyn CounterView) {
        if self.running {
            return;
        }
        self.running = true;
        let text = self.state.display();
        view.render(&CounterText::Settled(&text));
        view.set_cue(CounterCue::Expanded, self.state.is_expanded());
        self.schedule_growth(now);
    }

    /// Cancels the pending growth step and every other pending timer, and
    /// drops any in-flight animation. Frames delivered afterwards are stale.
    ///
    /// The view is left settled: transient cues are cleared and the current
    /// value is rendered without glyph markup.
    ///
    /// Can be restarted by calling [`start`](Self::start) again.
    pub fn stop(&mut self, view: &mut dyn CounterView) {
        self.running = false;
        self.growth = None;
        self.click_feedback = None;
        self.timers.clear();
        self.animation = None;
        self.scrolling.clear();

        view.set_cue(CounterCue::Updating, false);
        view.set_cue(CounterCue::ClickAnimate, false);
        view.render(&CounterText::Settled(&self.state.display()));
    }

    /// Handles a click: flips the display mode and animates from the value
    /// the old display showed to the current value in the new format.
    pub fn click(
        &mut self,
        now: HostTime,
        view: &mut dyn CounterView,
        tracer: &mut Tracer<'_>,
    ) -> AnimationToken {
        let value = self.state.current_value();
        let shown = format(value, self.state.is_expanded());
        let from = parse_display(&shown).unwrap_or(value);
        let expanded = self.state.toggle();

        tracer.counter_toggle(&CounterToggleEvent {
            at: now,
            expanded,
            value,
        });

        view.set_cue(CounterCue::ClickAnimate, true);
        view.set_cue(CounterCue::Expanded, expanded);
        if let Some(id) = self.click_feedback.take() {
            self.timers.cancel(id);
        }
        self.click_feedback = Some(self.timers.schedule(
            now.saturating_add(self.config.click_feedback),
            CounterTask::ClickFeedbackEnd,
        ));

        self.begin_animation(now, from, value, self.config.toggle_animation, view, tracer)
    }

    /// Runs every task due at `now`.
    ///
    /// Returns the token of a growth animation started by this call, so the
    /// host can begin delivering frames for it.
    pub fn advance(
        &mut self,
        now: HostTime,
        view: &mut dyn CounterView,
        tracer: &mut Tracer<'_>,
    ) -> Option<AnimationToken> {
        let mut started = None;
        while let Some((id, task)) = self.timers.pop_due(now) {
            match task {
                CounterTask::Growth { scheduled_at } => {
                    if self.growth == Some(id) {
                        self.growth = None;
                    }
                    started = Some(self.grow(now, scheduled_at, view, tracer));
                }
                CounterTask::GlyphScroll { token, mark, on } => {
                    if self.animation_token() == Some(token)
                        && let Some(slot) = self.scrolling.get_mut(mark)
                    {
                        *slot = on;
                    }
                }
                CounterTask::ClickFeedbackEnd => {
                    if self.click_feedback == Some(id) {
                        self.click_feedback = None;
                    }
                    view.set_cue(CounterCue::ClickAnimate, false);
                }
            }
        }
        started
    }

    /// Delivers an animation frame for `token` at `now`.
    ///
    /// Frames for anything but the current animation are ignored and report
    /// [`FrameStatus::Stale`].
    pub fn frame(
        &mut self,
        token: AnimationToken,
        now: HostTime,
        view: &mut dyn CounterView,
        tracer: &mut Tracer<'_>,
    ) -> FrameStatus {
        let Some(anim) = self.animation else {
            return FrameStatus::Stale;
        };
        if anim.token != token {
            return FrameStatus::Stale;
        }

        let expanded = self.state.is_expanded();
        if anim.is_finished(now) {
            let text = format(anim.to, expanded);
            view.render(&CounterText::Settled(&text));
            view.set_cue(CounterCue::Updating, false);
            self.animation = None;
            tracer.animation(&AnimationEvent {
                at: now,
                token: token.0,
                phase: AnimationPhase::Finish,
                from: anim.from,
                to: anim.to,
            });
            return FrameStatus::Finished;
        }

        let text = format(anim.value_at(now), expanded);
        self.glyphs.clear();
        let mut mark = 0;
        for ch in text.chars() {
            let marked = is_rolling_glyph(ch);
            let scrolling = marked && self.scrolling.get(mark).copied().unwrap_or(false);
            if marked {
                mark += 1;
            }
            self.glyphs.push(Glyph {
                ch,
                marked,
                scrolling,
            });
        }
        view.render(&CounterText::Rolling(&self.glyphs));
        FrameStatus::Running
    }

    fn grow(
        &mut self,
        now: HostTime,
        scheduled_at: HostTime,
        view: &mut dyn CounterView,
        tracer: &mut Tracer<'_>,
    ) -> AnimationToken {
        let elapsed = now.saturating_duration_since(scheduled_at);
        let old_value = self.state.current_value();
        let new_value = self
            .state
            .grow(growth_for(elapsed, self.config.growth_per_second));

        tracer.counter_growth(&CounterGrowthEvent {
            at: now,
            old_value,
            new_value,
            elapsed,
        });

        let token = self.begin_animation(
            now,
            old_value,
            new_value,
            self.config.growth_animation,
            view,
            tracer,
        );
        if self.running {
            self.schedule_growth(now);
        }
        token
    }

    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "delay is a few thousand milliseconds"
    )]
    fn schedule_growth(&mut self, now: HostTime) {
        let lo = self.config.min_growth_delay.as_millis_f64();
        let hi = self.config.max_growth_delay.as_millis_f64();
        let delay_ms = self.rng.next_range(lo, hi);
        let delay = Duration((delay_ms * 1000.0) as u64);
        self.growth = Some(self.timers.schedule(
            now.saturating_add(delay),
            CounterTask::Growth { scheduled_at: now },
        ));
    }

    fn begin_animation(
        &mut self,
        now: HostTime,
        from: u64,
        to: u64,
        duration: Duration,
        view: &mut dyn CounterView,
        tracer: &mut Tracer<'_>,
    ) -> AnimationToken {
        if let Some(old) = self.animation.take() {
            tracer.animation(&AnimationEvent {
                at: now,
                token: old.token.0,
                phase: AnimationPhase::Superseded,
                from: old.from,
                to: old.to,
            });
        }

        self.next_token += 1;
        let token = AnimationToken(self.next_token);
        self.animation = Some(Animation {
            token,
            from,
            to,
            start: now,
            duration,
        });

        view.set_cue(CounterCue::Enhanced, true);
        view.set_cue(CounterCue::Updating, true);

        // Glyph cues are scheduled once per animation against mark positions
        // of the final text; earlier animations' cues are dropped.
        self.timers
            .retain(|task| !matches!(task, CounterTask::GlyphScroll { .. }));
        let marks = format(to, self.state.is_expanded())
            .chars()
            .filter(|&c| is_rolling_glyph(c))
            .count();
        self.scrolling = vec![false; marks];
        for mark in 0..marks {
            let on_at = now.saturating_add(self.config.glyph_stagger * mark as u64);
            self.timers.schedule(
                on_at,
                CounterTask::GlyphScroll {
                    token,
                    mark,
                    on: true,
                },
            );
            self.timers.schedule(
                on_at.saturating_add(self.config.glyph_scroll),
                CounterTask::GlyphScroll {
                    token,
                    mark,
                    on: false,
                },
            );
        }

        tracer.animation(&AnimationEvent {
            at: now,
            token: token.0,
            phase: AnimationPhase::Start,
            from,
            to,
        });
        token
    }
}
