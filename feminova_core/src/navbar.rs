// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-driven navigation bar appearance.
//!
//! The bar hides while the page scrolls down past a threshold and shows again
//! as soon as it scrolls up. Independently, it switches from its initial
//! (transparent) look to its scrolled (solid) look once past the threshold.
//!
//! Scroll events arrive far more often than frames. [`Navbar::on_scroll`]
//! reports whether a frame needs requesting, and the update itself runs once
//! per frame in [`Navbar::frame`].

/// Configuration for the [`Navbar`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavbarConfig {
    /// Scroll offset, in CSS pixels, past which the bar may hide and takes
    /// its scrolled look.
    pub threshold: f64,
}

impl NavbarConfig {
    /// The site's tuning.
    #[must_use]
    pub const fn site() -> Self {
        Self { threshold: 50.0 }
    }
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self::site()
    }
}

/// What the bar should look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NavbarAppearance {
    /// The bar is on screen.
    pub visible: bool,
    /// The page is past the threshold.
    pub scrolled: bool,
}

impl NavbarAppearance {
    /// Returns `(class, on)` pairs for every class the appearance controls.
    #[must_use]
    pub const fn classes(self) -> [(&'static str, bool); 4] {
        [
            ("navbar-visible", self.visible),
            ("navbar-hidden", !self.visible),
            ("navbar-scrolled", self.scrolled),
            ("navbar-initial", !self.scrolled),
        ]
    }
}

/// Navigation bar state machine.
#[derive(Clone, Debug)]
pub struct Navbar {
    config: NavbarConfig,
    last_scroll_y: f64,
    appearance: NavbarAppearance,
    frame_pending: bool,
}

impl Navbar {
    /// Creates a visible bar in its initial look, with `scroll_y` as the
    /// reference offset.
    #[must_use]
    pub fn new(config: NavbarConfig, scroll_y: f64) -> Self {
        Self {
            config,
            last_scroll_y: scroll_y,
            appearance: NavbarAppearance {
                visible: true,
                scrolled: false,
            },
            frame_pending: false,
        }
    }

    /// Returns the current appearance.
    #[must_use]
    pub fn appearance(&self) -> NavbarAppearance {
        self.appearance
    }

    /// Notes a scroll event. Returns `true` if the caller should request a
    /// frame; `false` if one is already pending.
    pub fn on_scroll(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Runs the per-frame update at scroll offset `scroll_y` and returns the
    /// new appearance.
    pub fn frame(&mut self, scroll_y: f64) -> NavbarAppearance {
        self.frame_pending = false;
        self.update(scroll_y)
    }

    /// Applies `scroll_y` immediately, outside the frame throttle.
    pub fn update(&mut self, scroll_y: f64) -> NavbarAppearance {
        let past = scroll_y > self.config.threshold;
        self.appearance.visible = !(scroll_y > self.last_scroll_y && past);
        self.appearance.scrolled = past;
        self.last_scroll_y = scroll_y;
        self.appearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_visible_and_initial() {
        let nav = Navbar::new(NavbarConfig::site(), 0.0);
        let a = nav.appearance();
        assert!(a.visible);
        assert!(!a.scrolled);
        assert_eq!(
            a.classes(),
            [
                ("navbar-visible", true),
                ("navbar-hidden", false),
                ("navbar-scrolled", false),
                ("navbar-initial", true)
            ]
        );
    }

    #[test]
    fn scrolling_down_within_threshold_keeps_bar() {
        let mut nav = Navbar::new(NavbarConfig::site(), 0.0);
        let a = nav.update(40.0);
        assert!(a.visible);
        assert!(!a.scrolled);
    }

    #[test]
    fn scrolling_down_past_threshold_hides_bar() {
        let mut nav = Navbar::new(NavbarConfig::site(), 0.0);
        let a = nav.update(120.0);
        assert!(!a.visible);
        assert!(a.scrolled);
    }

    #[test]
    fn scrolling_up_shows_bar_again() {
        let mut nav = Navbar::new(NavbarConfig::site(), 0.0);
        nav.update(400.0);
        let a = nav.update(380.0);
        assert!(a.visible);
        assert!(a.scrolled, "still past the threshold");

        let a = nav.update(10.0);
        assert!(a.visible);
        assert!(!a.scrolled);
    }

    #[test]
    fn one_frame_per_burst_of_scroll_events() {
        let mut nav = Navbar::new(NavbarConfig::site(), 0.0);
        assert!(nav.on_scroll());
        assert!(!nav.on_scroll());
        assert!(!nav.on_scroll());
        nav.frame(200.0);
        assert!(nav.on_scroll(), "new frame after the pending one ran");
    }
}
