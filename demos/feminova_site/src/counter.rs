// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Impact counter wired to the page.
//!
//! Two host callbacks drive the counter: a [`DeadlineTimer`] for growth,
//! glyph and click-feedback deadlines, and a [`FrameLoop`] that runs only
//! while an animation is in flight.

use alloc::rc::Rc;
use core::cell::RefCell;

use feminova_backend_web::{ConsoleSink, DeadlineTimer, DomCounterView, FrameLoop};
use feminova_core::counter::{AnimationToken, CounterConfig, FrameStatus, ImpactCounter};
use feminova_core::trace::Tracer;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, HtmlElement};

use crate::dom;

/// The element showing the count.
const SELECTOR: &str = "[data-counter=\"women-impacted\"]";

struct CounterState {
    counter: ImpactCounter,
    view: DomCounterView,
    /// Animation the frame loop is delivering to.
    token: Option<AnimationToken>,
}

/// Starts the counter, if the page has one.
pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    let Some(element) = document.query_selector(SELECTOR)? else {
        return Ok(());
    };
    let Ok(element) = element.dyn_into::<HtmlElement>() else {
        return Ok(());
    };

    let state = Rc::new(RefCell::new(CounterState {
        counter: ImpactCounter::new(
            CounterConfig::site(),
            feminova_backend_web::wall_now(),
            feminova_backend_web::random_seed(),
        ),
        view: DomCounterView::new(element.clone()),
        token: None,
    }));

    let weak = Rc::downgrade(&state);
    let frames = Rc::new(FrameLoop::new(move |now| {
        let Some(state) = weak.upgrade() else {
            return false;
        };
        let mut state = state.borrow_mut();
        let CounterState {
            counter,
            view,
            token,
        } = &mut *state;
        let Some(current) = *token else {
            return false;
        };
        let mut sink = ConsoleSink;
        match counter.frame(current, now, view, &mut Tracer::new(&mut sink)) {
            FrameStatus::Running => true,
            FrameStatus::Finished | FrameStatus::Stale => {
                *token = None;
                false
            }
        }
    }));

    let weak = Rc::downgrade(&state);
    let timer_frames = Rc::clone(&frames);
    let timer = DeadlineTimer::new(move |now| {
        let state = weak.upgrade()?;
        let mut state = state.borrow_mut();
        let CounterState {
            counter,
            view,
            token,
        } = &mut *state;
        let mut sink = ConsoleSink;
        if let Some(started) = counter.advance(now, view, &mut Tracer::new(&mut sink)) {
            *token = Some(started);
            timer_frames.start();
        }
        counter.next_deadline()
    });

    {
        let mut guard = state.borrow_mut();
        let CounterState { counter, view, .. } = &mut *guard;
        counter.start(feminova_backend_web::now(), view);
        timer.arm(counter.next_deadline());
    }

    dom::listen(&element, "click", move |_event| {
        let next = {
            let mut guard = state.borrow_mut();
            let CounterState {
                counter,
                view,
                token,
            } = &mut *guard;
            let mut sink = ConsoleSink;
            let started = counter.click(
                feminova_backend_web::now(),
                view,
                &mut Tracer::new(&mut sink),
            );
            *token = Some(started);
            counter.next_deadline()
        };
        frames.start();
        timer.arm(next);
    })
}
