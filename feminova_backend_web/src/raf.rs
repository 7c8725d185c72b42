// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` frame source.
//!
//! [`FrameLoop`] calls back once per animation frame with the frame's
//! [`DOMHighResTimeStamp`][mdn] converted to microsecond [`HostTime`] ticks.
//! The callback decides whether the loop continues, so an animation that
//! finished (or went stale) stops requesting frames on its own.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp
//! [`HostTime`]: feminova_core::time::HostTime

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use feminova_core::time::HostTime;

// Direct global bindings instead of `web_sys::Window` methods; avoids
// fetching the Window/Performance objects on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A `requestAnimationFrame` loop.
///
/// Create with [`FrameLoop::new`], then call [`start`](Self::start) to begin
/// receiving callbacks. The loop re-registers itself each frame while the
/// callback returns `true`, until [`stop`](Self::stop) is called, or until the
/// `FrameLoop` is dropped.
pub struct FrameLoop {
    inner: Rc<FrameInner>,
}

type FrameClosure = Closure<dyn FnMut(f64)>;

struct FrameInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so it can be set once and referenced from
    /// inside itself without conflicting with `callback`.
    closure: RefCell<Option<FrameClosure>>,

    /// Receives each frame's time; returns `false` to stop the loop.
    callback: RefCell<Box<dyn FnMut(HostTime) -> bool>>,

    /// Frames delivered since creation.
    frame_counter: Cell<u64>,

    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl FrameLoop {
    /// Creates a new `FrameLoop` that is **not yet running**.
    pub fn new(callback: impl FnMut(HostTime) -> bool + 'static) -> Self {
        let inner = Rc::new(FrameInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            frame_counter: Cell::new(0),
            running: Cell::new(false),
            raf_id: Cell::new(0),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.running.get() {
                return;
            }

            inner.frame_counter.set(inner.frame_counter.get() + 1);
            let keep_going = inner.callback.borrow_mut()(HostTime::from_millis_f64(timestamp_ms));

            if !keep_going {
                inner.running.set(false);
                return;
            }
            if inner.running.get()
                && let Some(ref closure) = *inner.closure.borrow()
            {
                let id = request_animation_frame(closure.as_ref().unchecked_ref());
                inner.raf_id.set(id);
            }
        }) as Box<dyn FnMut(f64)>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Starts the loop.
    ///
    /// If already running, this is a no-op, so it is safe to call for every
    /// animation start.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);
        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.raf_id.set(id);
        }
    }

    /// Stops the loop, cancelling the pending callback. Can be restarted by
    /// calling [`start`](Self::start) again.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }

    /// Returns `true` if the loop is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameLoop")
            .field("running", &self.inner.running.get())
            .field("frame_counter", &self.inner.frame_counter.get())
            .finish_non_exhaustive()
    }
}
