//! Typed handles onto the page markup and thin wrappers around the browser
//! APIs the rest of the app needs.

use gloo_utils::{document, window};
use log::{debug, info, warn};
use promo_tickets::config::{PageConfig, ResolvedConfig, CONFIG_SCRIPT_ID, REDUCED_MOTION_QUERY};
use promo_tickets::effects::parallax_strength;
use promo_tickets::motion::{self, MotionPreference};
use promo_tickets::RevealKind;
use std::rc::Rc;
use wasm_bindgen::convert::FromWasmAbi;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, EventTarget, HtmlElement, MediaQueryListEvent};

const REVEAL_SELECTOR: &str = "[data-counter], [data-progress], [data-animate]";
const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Every element the page effects touch, looked up once at startup.
pub struct PageElements {
    pub nav: Option<HtmlElement>,
    pub marquee_tracks: Vec<HtmlElement>,
    pub tilt: Option<HtmlElement>,
    pub parallax: Vec<(HtmlElement, f64)>,
    pub anchors: Vec<HtmlElement>,
    pub reveals: Vec<(HtmlElement, RevealKind)>,
}

impl PageElements {
    pub fn collect() -> Self {
        let parallax = query_all("[data-parallax]")
            .into_iter()
            .map(|el| {
                let strength = parallax_strength(el.get_attribute("data-parallax").as_deref());
                (el, strength)
            })
            .collect();

        let reveals = query_all(REVEAL_SELECTOR)
            .into_iter()
            .map(|el| {
                let kind = RevealKind::from_attrs(
                    el.get_attribute("data-counter").as_deref(),
                    el.get_attribute("data-format").as_deref(),
                    el.get_attribute("data-progress").as_deref(),
                );
                (el, kind)
            })
            .collect();

        let elements = Self {
            nav: query_one("[data-nav]"),
            marquee_tracks: query_all("[data-marquee]"),
            tilt: query_one("[data-tilt]"),
            parallax,
            anchors: query_all(ANCHOR_SELECTOR),
            reveals,
        };
        debug!(
            "Page elements: nav={} marquee={} tilt={} parallax={} anchors={} reveals={}",
            elements.nav.is_some(),
            elements.marquee_tracks.len(),
            elements.tilt.is_some(),
            elements.parallax.len(),
            elements.anchors.len(),
            elements.reveals.len()
        );
        elements
    }
}

fn query_one(selector: &str) -> Option<HtmlElement> {
    match document().query_selector(selector) {
        Ok(found) => found.and_then(|el| el.dyn_into::<HtmlElement>().ok()),
        Err(e) => {
            warn!("Selector {} failed: {:?}", selector, e);
            None
        }
    }
}

fn query_all(selector: &str) -> Vec<HtmlElement> {
    let list = match document().query_selector_all(selector) {
        Ok(list) => list,
        Err(e) => {
            warn!("Selector {} failed: {:?}", selector, e);
            return Vec::new();
        }
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

pub fn element_by_id(id: &str) -> Option<Element> {
    document().get_element_by_id(id)
}

/// Load the JSON configuration block, falling back to defaults when it is
/// absent or invalid.
pub fn read_config() -> ResolvedConfig {
    let Some(json) = element_by_id(CONFIG_SCRIPT_ID).and_then(|el| el.text_content()) else {
        info!("No #{} block found, using default configuration", CONFIG_SCRIPT_ID);
        return ResolvedConfig::default();
    };
    match PageConfig::from_json(&json).and_then(|cfg| cfg.resolve()) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{}; using default configuration", e);
            ResolvedConfig::default()
        }
    }
}

/// Show a blocking message to the visitor.
pub fn notify(message: &str) {
    if let Err(e) = window().alert_with_message(message) {
        warn!("Could not show message: {:?}", e);
    }
}

pub fn has_intersection_observer() -> bool {
    js_sys::Reflect::has(&window(), &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

pub fn scroll_offset() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}

/// Run `f` on the next animation frame.
pub fn request_frame(f: impl FnOnce(f64) + 'static) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(f);
    window().request_animation_frame(callback.unchecked_ref())
}

/// Attach a listener that lives as long as the page.
pub fn listen<E>(target: &EventTarget, event: &str, passive: bool, handler: impl FnMut(E) + 'static)
where
    E: FromWasmAbi + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    ) {
        warn!("Could not listen for {}: {:?}", event, e);
    }
    closure.forget();
}

/// Build the shared reduced-motion preference and keep it in sync with the
/// media query through the motion channel.
pub fn watch_reduced_motion() -> Rc<MotionPreference> {
    let query = match window().match_media(REDUCED_MOTION_QUERY) {
        Ok(Some(query)) => query,
        _ => {
            info!("matchMedia unavailable, assuming full motion");
            return MotionPreference::new(false);
        }
    };

    let preference = MotionPreference::new(query.matches());
    let (updates, receiver) = motion::channel();
    listen(&query, "change", false, move |e: MediaQueryListEvent| {
        if updates.unbounded_send(e.matches()).is_err() {
            debug!("Motion channel closed, dropping update");
        }
    });
    wasm_bindgen_futures::spawn_local(motion::drain_updates(preference.clone(), receiver));

    info!("Reduced motion at startup: {}", preference.is_reduced());
    preference
}
