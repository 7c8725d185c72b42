// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` wake-ups.
//!
//! The core components expose a single `next_deadline()`. [`DeadlineTimer`]
//! keeps at most one `setTimeout` pending for that deadline; when it fires,
//! the callback runs due work and hands back the next deadline, which the
//! timer re-arms for.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use feminova_core::time::HostTime;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, delay_ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

type TimeoutClosure = Closure<dyn FnMut()>;

struct TimerInner {
    closure: RefCell<Option<TimeoutClosure>>,
    /// Runs due work at the given time; returns the next deadline.
    callback: RefCell<Box<dyn FnMut(HostTime) -> Option<HostTime>>>,
    /// Pending `setTimeout` handle and the deadline it was armed for.
    pending: Cell<Option<(i32, HostTime)>>,
}

/// Single-shot, re-arming deadline timer.
pub struct DeadlineTimer {
    inner: Rc<TimerInner>,
}

impl DeadlineTimer {
    /// Creates a disarmed timer.
    pub fn new(callback: impl FnMut(HostTime) -> Option<HostTime> + 'static) -> Self {
        let inner = Rc::new(TimerInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            inner.pending.set(None);
            let next = inner.callback.borrow_mut()(crate::now());
            arm_inner(&inner, next);
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);

        Self { inner }
    }

    /// Arms the timer for `deadline`, replacing any pending wake-up.
    /// `None` disarms it.
    pub fn arm(&self, deadline: Option<HostTime>) {
        arm_inner(&self.inner, deadline);
    }

    /// Returns the deadline the timer is armed for.
    #[must_use]
    pub fn armed_for(&self) -> Option<HostTime> {
        self.inner.pending.get().map(|(_, at)| at)
    }
}

fn arm_inner(inner: &TimerInner, deadline: Option<HostTime>) {
    if let Some((id, at)) = inner.pending.get() {
        if Some(at) == deadline {
            return;
        }
        clear_timeout(id);
        inner.pending.set(None);
    }
    let Some(deadline) = deadline else {
        return;
    };
    if let Some(ref closure) = *inner.closure.borrow() {
        let delay = deadline.saturating_duration_since(crate::now());
        let delay_ms = i32::try_from(delay.as_millis() + 1).unwrap_or(i32::MAX);
        let id = set_timeout(closure.as_ref().unchecked_ref(), delay_ms);
        inner.pending.set(Some((id, deadline)));
    }
}

impl Drop for DeadlineTimer {
    fn drop(&mut self) {
        self.arm(None);
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for DeadlineTimer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeadlineTimer")
            .field("armed_for", &self.armed_for())
            .finish_non_exhaustive()
    }
}
