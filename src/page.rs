//! Decorative page behaviour: anchor scrolling, nav state, marquee,
//! hero tilt and parallax. DOM events are translated into [`PageEvent`]s
//! and routed through [`PageEffects::dispatch`].

use crate::dom::{self, PageElements};
use log::{debug, warn};
use promo_tickets::config::{EffectSettings, ACTIVE_CLASS, SCROLLED_CLASS};
use promo_tickets::effects::{nav_is_scrolled, parallax_transform, Bounds};
use promo_tickets::utils::anchor_target_id;
use promo_tickets::{FrameThrottle, MotionPreference, PageEvent, Tilt};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, HtmlElement, MouseEvent, PointerEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

const MARQUEE_READY_ATTR: &str = "data-marquee-ready";

pub struct PageEffects {
    elements: PageElements,
    settings: EffectSettings,
    motion: Rc<MotionPreference>,
    parallax_frame: FrameThrottle,
}

impl PageEffects {
    pub fn new(elements: PageElements, settings: EffectSettings, motion: Rc<MotionPreference>) -> Rc<Self> {
        Rc::new(Self {
            elements,
            settings,
            motion,
            parallax_frame: FrameThrottle::default(),
        })
    }

    /// Route an event to its handler. Returns `true` when the browser's
    /// default action should be suppressed.
    pub fn dispatch(self: &Rc<Self>, event: PageEvent) -> bool {
        match event {
            PageEvent::Scroll { offset_y } => {
                self.update_nav(offset_y);
                self.schedule_parallax();
                false
            }
            PageEvent::AnchorClick { href } => scroll_to_anchor(&href),
            PageEvent::PointerMove { client_x, client_y } => {
                self.tilt_towards(client_x, client_y);
                false
            }
            PageEvent::PointerEnd => {
                self.reset_tilt();
                false
            }
            PageEvent::MotionChanged { reduced } => {
                if reduced {
                    self.clear_parallax();
                    self.reset_tilt();
                } else {
                    self.apply_parallax(dom::scroll_offset());
                }
                false
            }
        }
    }

    fn update_nav(&self, offset_y: f64) {
        if let Some(nav) = &self.elements.nav {
            let scrolled = nav_is_scrolled(offset_y, self.settings.nav_threshold_px);
            if let Err(e) = nav.class_list().toggle_with_force(SCROLLED_CLASS, scrolled) {
                warn!("Could not toggle nav state: {:?}", e);
            }
        }
    }

    fn schedule_parallax(self: &Rc<Self>) {
        if self.elements.parallax.is_empty() || self.motion.is_reduced() {
            return;
        }
        if !self.parallax_frame.try_schedule() {
            return;
        }
        let this = Rc::clone(self);
        let scheduled = dom::request_frame(move |_| {
            this.parallax_frame.complete();
            if !this.motion.is_reduced() {
                this.apply_parallax(dom::scroll_offset());
            }
        });
        if let Err(e) = scheduled {
            debug!("requestAnimationFrame failed ({:?}), applying parallax now", e);
            self.parallax_frame.complete();
            self.apply_parallax(dom::scroll_offset());
        }
    }

    fn apply_parallax(&self, offset_y: f64) {
        for (element, strength) in &self.elements.parallax {
            set_style(element, "transform", &parallax_transform(offset_y, *strength));
        }
    }

    fn clear_parallax(&self) {
        for (element, _) in &self.elements.parallax {
            if let Err(e) = element.style().remove_property("transform") {
                warn!("Could not clear parallax transform: {:?}", e);
            }
        }
    }

    fn tilt_towards(&self, x: f64, y: f64) {
        let Some(hero) = &self.elements.tilt else {
            return;
        };
        if self.motion.is_reduced() {
            return;
        }
        let rect = hero.get_bounding_client_rect();
        let bounds = Bounds {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        };
        let tilt = Tilt::from_pointer(x, y, bounds, self.settings.tilt_max_deg);
        write_tilt(hero, &tilt);
        if let Err(e) = hero.class_list().add_1(ACTIVE_CLASS) {
            warn!("Could not mark tilt active: {:?}", e);
        }
    }

    fn reset_tilt(&self) {
        if let Some(hero) = &self.elements.tilt {
            write_tilt(hero, &Tilt::RESET);
            if let Err(e) = hero.class_list().remove_1(ACTIVE_CLASS) {
                warn!("Could not clear tilt state: {:?}", e);
            }
        }
    }
}

fn scroll_to_anchor(href: &str) -> bool {
    let Some(target) = anchor_target_id(href).and_then(dom::element_by_id) else {
        return false;
    };
    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    true
}

fn write_tilt(element: &HtmlElement, tilt: &Tilt) {
    set_style(element, "--tilt-x", &tilt.css_x());
    set_style(element, "--tilt-y", &tilt.css_y());
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        warn!("Could not set {}: {:?}", property, e);
    }
}

/// Clone the track's children once so the CSS loop has no visible seam.
fn duplicate_marquee(track: &HtmlElement) {
    if track.has_attribute(MARQUEE_READY_ATTR) {
        return;
    }
    let children = track.child_nodes();
    let originals: Vec<_> = (0..children.length()).filter_map(|i| children.item(i)).collect();
    for node in originals {
        let copy = match node.clone_node_with_deep(true) {
            Ok(copy) => copy,
            Err(e) => {
                warn!("Could not clone marquee item: {:?}", e);
                continue;
            }
        };
        if let Some(el) = copy.dyn_ref::<Element>() {
            if let Err(e) = el.set_attribute("aria-hidden", "true") {
                warn!("Could not hide marquee copy: {:?}", e);
            }
        }
        if let Err(e) = track.append_child(&copy) {
            warn!("Could not extend marquee: {:?}", e);
        }
    }
    if let Err(e) = track.set_attribute(MARQUEE_READY_ATTR, "") {
        warn!("Could not mark marquee as duplicated: {:?}", e);
    }
}

/// Hook every decorative handler up to its DOM events.
pub fn install(effects: Rc<PageEffects>) {
    for anchor in &effects.elements.anchors {
        let this = effects.clone();
        let link = anchor.clone();
        dom::listen(anchor, "click", false, move |e: MouseEvent| {
            let Some(href) = link.get_attribute("href") else {
                return;
            };
            if this.dispatch(PageEvent::AnchorClick { href }) {
                e.prevent_default();
            }
        });
    }

    if !effects.settings.enabled {
        debug!("Decorative effects disabled");
        return;
    }

    for track in &effects.elements.marquee_tracks {
        duplicate_marquee(track);
    }

    {
        let this = effects.clone();
        dom::listen(&gloo_utils::window(), "scroll", true, move |_: Event| {
            this.dispatch(PageEvent::Scroll {
                offset_y: dom::scroll_offset(),
            });
        });
    }
    effects.dispatch(PageEvent::Scroll {
        offset_y: dom::scroll_offset(),
    });

    if let Some(hero) = &effects.elements.tilt {
        let this = effects.clone();
        dom::listen(hero, "pointermove", true, move |e: PointerEvent| {
            this.dispatch(PageEvent::PointerMove {
                client_x: e.client_x() as f64,
                client_y: e.client_y() as f64,
            });
        });
        for end in ["pointerleave", "pointerup"] {
            let this = effects.clone();
            dom::listen(hero, end, true, move |_: PointerEvent| {
                this.dispatch(PageEvent::PointerEnd);
            });
        }
    }

    let weak = Rc::downgrade(&effects);
    effects.motion.subscribe(move |reduced| {
        if let Some(this) = weak.upgrade() {
            this.dispatch(PageEvent::MotionChanged { reduced });
        }
    });
}
