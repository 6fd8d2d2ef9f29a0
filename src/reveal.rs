//! Scroll-triggered reveals, count-ups and progress fills.
//!
//! Each tracked element fires once, the first time enough of it is visible,
//! and is unobserved right after. Without `IntersectionObserver`, or with
//! reduced motion, every element is put in its final state immediately.

use crate::dom;
use log::{debug, info, warn};
use promo_tickets::animation::{crosses_threshold, CounterRun};
use promo_tickets::config::{EffectSettings, VISIBLE_CLASS};
use promo_tickets::{reveal_mode, MotionPreference, RevealEffect, RevealKind, RevealMode, RevealSet};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

struct RevealAnimator {
    targets: RefCell<RevealSet<HtmlElement>>,
    duration_ms: f64,
    motion: Rc<MotionPreference>,
}

pub fn install(targets: Vec<(HtmlElement, RevealKind)>, settings: &EffectSettings, motion: Rc<MotionPreference>) {
    if targets.is_empty() {
        return;
    }

    let mut groups: Vec<(f64, Vec<HtmlElement>)> = Vec::new();
    for (element, kind) in &targets {
        let threshold = kind.threshold(settings.reveal_threshold, settings.counter_threshold);
        match groups.iter_mut().find(|(t, _)| *t == threshold) {
            Some((_, elements)) => elements.push(element.clone()),
            None => groups.push((threshold, vec![element.clone()])),
        }
    }

    let animator = Rc::new(RevealAnimator {
        targets: RefCell::new(RevealSet::new(targets)),
        duration_ms: settings.counter_duration_ms,
        motion,
    });

    let mode = reveal_mode(
        settings.enabled,
        animator.motion.is_reduced(),
        dom::has_intersection_observer(),
    );
    if mode == RevealMode::Immediate {
        info!("Showing {} reveal targets without animation", animator.targets.borrow().len());
        for (_, elements) in &groups {
            for element in elements {
                animator.fire(element, RevealMode::Immediate);
            }
        }
        return;
    }

    for (threshold, elements) in groups {
        match observer_for(animator.clone(), threshold) {
            Ok(observer) => {
                for element in &elements {
                    observer.observe(element);
                }
                debug!("Observing {} elements at threshold {}", elements.len(), threshold);
            }
            Err(e) => {
                warn!("IntersectionObserver failed ({:?}), revealing immediately", e);
                for element in &elements {
                    animator.fire(element, RevealMode::Immediate);
                }
            }
        }
    }
}

fn observer_for(animator: Rc<RevealAnimator>, threshold: f64) -> Result<IntersectionObserver, JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !crosses_threshold(entry.is_intersecting(), entry.intersection_ratio(), threshold) {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Ok(element) = target.dyn_into::<HtmlElement>() {
                    let mode = RevealMode::for_motion(animator.motion.is_reduced());
                    animator.fire(&element, mode);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

impl RevealAnimator {
    /// Apply the element's effect if it has not fired yet.
    fn fire(&self, element: &HtmlElement, mode: RevealMode) {
        let effect = self.targets.borrow_mut().fire(element, mode, self.duration_ms);
        let Some(effect) = effect else {
            return;
        };

        add_class(element, VISIBLE_CLASS);
        match effect {
            RevealEffect::Show => {}
            RevealEffect::FinalText(text) => element.set_text_content(Some(&text)),
            RevealEffect::CountUp { initial, run } => {
                element.set_text_content(Some(&initial));
                animate(element.clone(), run, self.motion.clone());
            }
            RevealEffect::Fill(width) => fill_progress(element, &width),
        }
    }
}

/// Draw one count-up frame and schedule the next until the run is done.
fn animate(element: HtmlElement, mut run: CounterRun, motion: Rc<MotionPreference>) {
    let fallback = element.clone();
    let final_text = run.finish().text;
    let scheduled = dom::request_frame(move |timestamp| {
        let frame = if motion.is_reduced() {
            run.finish()
        } else {
            run.frame(timestamp)
        };
        element.set_text_content(Some(&frame.text));
        if !frame.done {
            animate(element, run, motion);
        }
    });
    if let Err(e) = scheduled {
        warn!("requestAnimationFrame failed ({:?}), jumping to final value", e);
        fallback.set_text_content(Some(&final_text));
    }
}

fn fill_progress(element: &HtmlElement, width: &str) {
    let style = element.style();
    if let Err(e) = style
        .set_property("width", width)
        .and_then(|_| style.set_property("--progress", width))
    {
        warn!("Could not fill progress bar: {:?}", e);
    }
}

fn add_class(element: &HtmlElement, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        warn!("Could not add class {}: {:?}", class, e);
    }
}
