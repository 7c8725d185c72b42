// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Time-gated numeric interpolation for the counter.

use core::f64::consts::TAU;
use core::fmt;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use crate::time::{Duration, HostTime};

/// Cubic ease-out with a small decaying wobble.
///
/// `ease(p) = 1 - (1-p)^3 * (1 - sin(2πp) * 0.1)`
///
/// Input is clamped to `[0, 1]`. The curve starts at 0, ends at exactly 1 and
/// is monotonically increasing on the interval.
#[must_use]
pub fn ease(p: f64) -> f64 {
    let p = p.clamp(0.0, 1.0);
    let inv = 1.0 - p;
    1.0 - inv * inv * inv * (1.0 - (p * TAU).sin() * 0.1)
}

/// Identifies one animation. A newer token supersedes every older one.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AnimationToken(pub u64);

impl fmt::Debug for AnimationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnimationToken({})", self.0)
    }
}

/// An interpolation from one value to another over a fixed duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Animation {
    /// Identity of this animation.
    pub token: AnimationToken,
    /// Value at `p = 0`.
    pub from: u64,
    /// Value at `p = 1`.
    pub to: u64,
    /// Host time the animation started.
    pub start: HostTime,
    /// Total duration.
    pub duration: Duration,
}

impl Animation {
    /// Returns linear progress in `[0, 1]` at `now`.
    ///
    /// Completion is gated on elapsed time, not on how many frames were
    /// delivered, so a stalled frame source still lands on `p = 1`.
    #[must_use]
    pub fn progress(&self, now: HostTime) -> f64 {
        if self.duration == Duration::ZERO {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.ticks() as f64 / self.duration.ticks() as f64).min(1.0)
    }

    /// Returns `true` once `now` is at or past the end of the animation.
    #[must_use]
    pub fn is_finished(&self, now: HostTime) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }

    /// Returns the eased, floored value at `now`.
    ///
    /// Yields exactly [`to`](Self::to) once the animation is finished.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "interpolant lies between from and to, both u64"
    )]
    pub fn value_at(&self, now: HostTime) -> u64 {
        if self.is_finished(now) {
            return self.to;
        }
        let from = self.from as f64;
        let span = self.to as f64 - from;
        let v = (from + span * ease(self.progress(now))).floor();
        let (lo, hi) = if self.from <= self.to {
            (self.from, self.to)
        } else {
            (self.to, self.from)
        };
        (v.max(0.0) as u64).clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anim(from: u64, to: u64, ms: u64) -> Animation {
        Animation {
            token: AnimationToken(1),
            from,
            to,
            start: HostTime(1_000_000),
            duration: Duration::from_millis(ms),
        }
    }

    #[test]
    fn ease_endpoints() {
        assert!(ease(0.0).abs() < 1e-12);
        assert!((ease(1.0) - 1.0).abs() < 1e-12);
        assert!((ease(2.0) - 1.0).abs() < 1e-12, "input is clamped");
    }

    #[test]
    fn ease_is_monotonic() {
        let mut prev = ease(0.0);
        for i in 1..=1000 {
            let cur = ease(f64::from(i) / 1000.0);
            assert!(cur >= prev, "ease decreased at step {i}: {prev} -> {cur}");
            prev = cur;
        }
    }

    #[test]
    fn lands_exactly_on_target() {
        let a = anim(0, 1000, 1000);
        assert_eq!(a.value_at(HostTime(2_000_000)), 1000);
        assert_eq!(a.value_at(HostTime(9_000_000)), 1000);
        assert!((a.progress(HostTime(2_000_000)) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn starts_at_origin_and_rises() {
        let a = anim(0, 1000, 1000);
        assert_eq!(a.value_at(HostTime(1_000_000)), 0);
        let mid = a.value_at(HostTime(1_500_000));
        assert!(mid > 500 && mid < 1000, "mid value {mid}");
    }

    #[test]
    fn downward_interpolation_stays_in_range() {
        let a = anim(1600, 1550, 800);
        for step in 0..=20_u64 {
            let v = a.value_at(HostTime(1_000_000 + step * 40_000));
            assert!((1550..=1600).contains(&v), "value {v} out of range");
        }
        assert_eq!(a.value_at(HostTime(1_800_000)), 1550);
    }

    #[test]
    fn zero_duration_is_immediately_finished() {
        let a = anim(5, 10, 0);
        assert!(a.is_finished(a.start));
        assert_eq!(a.value_at(a.start), 10);
    }
}
