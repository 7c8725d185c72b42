// Copyright 2026 the FemiNova Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `IntersectionObserver`-backed reveal surface.
//!
//! Each registered element carries its [`TargetId`] in a data attribute so
//! observer entries map back to scheduler targets without a lookup table on
//! the JS side.

use alloc::boxed::Box;
use alloc::vec::Vec;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use feminova_core::backend::{RevealSurface, SurfaceError};
use feminova_core::reveal::{RevealConfig, TargetId};

/// Attribute holding an element's target index.
pub const TARGET_ATTR: &str = "data-reveal-target";

/// Class applied to revealed elements.
const REVEALED: &str = "revealed";

/// One visibility change reported by the observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityReport {
    /// The target whose visibility changed.
    pub target: TargetId,
    /// Whether it now counts as intersecting.
    pub is_intersecting: bool,
}

type ObserverClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// Maps [`TargetId`]s to DOM elements and applies reveal decisions to them.
pub struct DomRevealSurface {
    elements: Vec<Option<Element>>,
    /// Children captured per target by `snapshot_children`.
    snapshots: Vec<Vec<Element>>,
    observer: Option<IntersectionObserver>,
    _callback: Option<ObserverClosure>,
}

impl core::fmt::Debug for DomRevealSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomRevealSurface")
            .field("elements_len", &self.elements.len())
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl DomRevealSurface {
    /// Creates a surface whose observer reports to `on_entries`.
    ///
    /// If the observer cannot be constructed, the surface still works but
    /// every [`observe`](RevealSurface::observe) fails, which leaves targets
    /// in their pre-reveal state.
    pub fn new(
        config: &RevealConfig,
        mut on_entries: impl FnMut(&[VisibilityReport]) + 'static,
    ) -> Self {
        let callback: ObserverClosure = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                let reports: Vec<VisibilityReport> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .filter_map(|entry| {
                        let target = target_of(&entry.target())?;
                        Some(VisibilityReport {
                            target,
                            is_intersecting: entry.is_intersecting(),
                        })
                    })
                    .collect();
                if !reports.is_empty() {
                    on_entries(&reports);
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let options = IntersectionObserverInit::new();
        options.set_root_margin(&config.root_margin());
        options.set_threshold(&JsValue::from_f64(config.threshold));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => Self {
                elements: Vec::new(),
                snapshots: Vec::new(),
                observer: Some(observer),
                _callback: Some(callback),
            },
            Err(_) => Self {
                elements: Vec::new(),
                snapshots: Vec::new(),
                observer: None,
                _callback: None,
            },
        }
    }

    /// Returns `true` if an observer was constructed.
    #[must_use]
    pub fn has_observer(&self) -> bool {
        self.observer.is_some()
    }

    /// Binds `element` to `target`.
    pub fn insert(&mut self, target: TargetId, element: Element) -> Result<(), JsValue> {
        element.set_attribute(TARGET_ATTR, &alloc::format!("{}", target.0))?;
        let slot = target.index();
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(element);
        Ok(())
    }

    /// Returns the element bound to `target`.
    #[must_use]
    pub fn element(&self, target: TargetId) -> Option<&Element> {
        self.elements.get(target.index()).and_then(Option::as_ref)
    }
}

fn target_of(element: &Element) -> Option<TargetId> {
    element
        .get_attribute(TARGET_ATTR)?
        .parse::<u32>()
        .ok()
        .map(TargetId)
}

impl RevealSurface for DomRevealSurface {
    fn observe(&mut self, target: TargetId) -> Result<(), SurfaceError> {
        let element = self
            .element(target)
            .ok_or(SurfaceError::UnknownTarget(target))?;
        let observer = self
            .observer
            .as_ref()
            .ok_or(SurfaceError::Rejected(target))?;
        observer.observe(element);
        Ok(())
    }

    fn unobserve(&mut self, target: TargetId) {
        if let (Some(observer), Some(element)) = (self.observer.as_ref(), self.element(target)) {
            observer.unobserve(element);
        }
    }

    fn snapshot_children(&mut self, target: TargetId) -> usize {
        let children: Vec<Element> = self.element(target).map_or_else(Vec::new, |el| {
            let list = el.children();
            (0..list.length()).filter_map(|i| list.item(i)).collect()
        });
        let count = children.len();
        let slot = target.index();
        if self.snapshots.len() <= slot {
            self.snapshots.resize_with(slot + 1, Vec::new);
        }
        self.snapshots[slot] = children;
        count
    }

    fn reveal(&mut self, target: TargetId) {
        if let Some(el) = self.element(target) {
            let _ = el.class_list().add_1(REVEALED);
        }
    }

    fn reveal_child(&mut self, target: TargetId, index: usize) {
        if let Some(child) = self
            .snapshots
            .get(target.index())
            .and_then(|children| children.get(index))
        {
            let _ = child.class_list().add_1(REVEALED);
        }
    }
}

impl Drop for DomRevealSurface {
    fn drop(&mut self) {
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
    }
}
