// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll reveals wired to the page.

use alloc::rc::Rc;
use core::cell::RefCell;

use feminova_backend_web::{ConsoleSink, DeadlineTimer, DomRevealSurface};
use feminova_core::reveal::{RevealConfig, RevealRole, RevealScheduler};
use feminova_core::trace::Tracer;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::dom;

/// Elements that take part in scroll reveals.
const SELECTOR: &str = ".reveal, .reveal-left, .reveal-stagger";

/// Class marking a stagger container.
const STAGGER: &str = "reveal-stagger";

struct RevealState {
    scheduler: RevealScheduler,
    surface: Option<DomRevealSurface>,
}

/// Registers every reveal target on the page and starts the scheduler.
/// Under reduced motion nothing is set up and the page keeps its markup.
pub(crate) fn init(document: &Document) -> Result<(), JsValue> {
    let mut env = feminova_backend_web::environment();
    if env.reduced_motion {
        return Ok(());
    }
    let config = RevealConfig::site();
    let state = Rc::new(RefCell::new(RevealState {
        scheduler: RevealScheduler::new(config),
        surface: None,
    }));

    let weak = Rc::downgrade(&state);
    let timer = Rc::new(DeadlineTimer::new(move |now| {
        let state = weak.upgrade()?;
        let mut state = state.borrow_mut();
        let RevealState { scheduler, surface } = &mut *state;
        let mut sink = ConsoleSink;
        scheduler.advance(now, surface.as_mut()?, &mut Tracer::new(&mut sink));
        scheduler.next_deadline()
    }));

    let weak = Rc::downgrade(&state);
    let timer_cb = Rc::clone(&timer);
    let mut surface = DomRevealSurface::new(&config, move |reports| {
        let Some(state) = weak.upgrade() else {
            return;
        };
        let mut state = state.borrow_mut();
        let RevealState { scheduler, surface } = &mut *state;
        let Some(surface) = surface.as_mut() else {
            return;
        };
        let now = feminova_backend_web::now();
        let mut sink = ConsoleSink;
        let mut tracer = Tracer::new(&mut sink);
        for report in reports {
            scheduler.on_visibility(
                now,
                report.target,
                report.is_intersecting,
                surface,
                &mut tracer,
            );
        }
        timer_cb.arm(scheduler.next_deadline());
    });

    {
        let mut guard = state.borrow_mut();
        let RevealState { scheduler, surface: slot } = &mut *guard;
        for element in dom::query_all(document, SELECTOR)? {
            let role = if element.class_list().contains(STAGGER) {
                RevealRole::StaggerContainer
            } else {
                RevealRole::Single
            };
            let id = scheduler.register(role);
            surface.insert(id, element)?;
        }

        // A constructor failure counts as no observer, which reveals
        // everything up front.
        env.observer_supported &= surface.has_observer();

        let mut sink = ConsoleSink;
        scheduler.start(
            feminova_backend_web::now(),
            env,
            &mut surface,
            &mut Tracer::new(&mut sink),
        );
        *slot = Some(surface);
        timer.arm(scheduler.next_deadline());
    }

    // Keep the scheduler alive; there is no teardown on the web.
    core::mem::forget(state);
    Ok(())
}
