use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::js_sys;
use web_sys::{
    CustomEvent, CustomEventInit, Element, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit,
};
use yew::prelude::*;

pub const OBSERVER_THRESHOLD: f64 = 0.1;
pub const OBSERVER_ROOT_MARGIN: &str = "0px 0px -50px 0px";

const REVEAL_TRANSITION: &str = "all 0.6s ease-out";

/// Animation kinds understood by the controller, in their
/// `data-animate` attribute spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealKind {
    FadeUp,
    FadeDown,
    FadeLeft,
    FadeRight,
    FadeIn,
    ScaleUp,
    ScaleDown,
}

impl RevealKind {
    /// Unrecognized spellings fall back to the fade-up treatment.
    pub fn from_attr(value: &str) -> Self {
        match value {
            "fade-up" => Self::FadeUp,
            "fade-down" => Self::FadeDown,
            "fade-left" => Self::FadeLeft,
            "fade-right" => Self::FadeRight,
            "fade-in" => Self::FadeIn,
            "scale-up" => Self::ScaleUp,
            "scale-down" => Self::ScaleDown,
            _ => Self::FadeUp,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            Self::FadeUp => "fade-up",
            Self::FadeDown => "fade-down",
            Self::FadeLeft => "fade-left",
            Self::FadeRight => "fade-right",
            Self::FadeIn => "fade-in",
            Self::ScaleUp => "scale-up",
            Self::ScaleDown => "scale-down",
        }
    }

    /// The transform an element holds before it is revealed.
    pub fn initial_transform(&self) -> &'static str {
        match self {
            Self::FadeUp => "translateY(20px)",
            Self::FadeDown => "translateY(-20px)",
            Self::FadeLeft => "translateX(-20px)",
            Self::FadeRight => "translateX(20px)",
            Self::FadeIn => "none",
            Self::ScaleUp => "scale(0.9)",
            Self::ScaleDown => "scale(1.1)",
        }
    }
}

struct Registration {
    element: Element,
    kind: RevealKind,
    delay_ms: u32,
    revealed: Cell<bool>,
}

struct Inner {
    registry: Rc<RefCell<Vec<Registration>>>,
    observer: Option<IntersectionObserver>,
    _on_intersect: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
}

/// One shared intersection observer driving every registered reveal.
///
/// Elements are observed until they first intersect, then unobserved,
/// given the revealed styles after their per-element delay, and announced
/// with an `animationComplete` event on the element itself. Without
/// observer support in the host the controller goes inert and elements
/// keep their default (visible) markup.
#[derive(Clone)]
pub struct RevealController {
    inner: Rc<Inner>,
}

impl PartialEq for RevealController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl RevealController {
    pub fn new() -> Self {
        let registry: Rc<RefCell<Vec<Registration>>> = Rc::new(RefCell::new(Vec::new()));

        if !observer_supported() {
            debug!("IntersectionObserver unavailable, scroll reveal disabled");
            return Self {
                inner: Rc::new(Inner {
                    registry,
                    observer: None,
                    _on_intersect: None,
                }),
            };
        }

        let callback_registry = registry.clone();
        let on_intersect = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    if !entry.is_intersecting() {
                        continue;
                    }
                    let target = entry.target();
                    observer.unobserve(&target);

                    let delay_ms = callback_registry
                        .borrow()
                        .iter()
                        .find(|r| r.element == target)
                        .map(|r| r.delay_ms);
                    let delay_ms = match delay_ms {
                        Some(d) => d,
                        None => continue,
                    };

                    let registry = callback_registry.clone();
                    let run = move || reveal_registered(&registry, &target);
                    if delay_ms == 0 {
                        run();
                    } else {
                        Timeout::new(delay_ms, run).forget();
                    }
                }
            },
        )
            as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer = IntersectionObserver::new_with_options(
            on_intersect.as_ref().unchecked_ref(),
            &observer_options(),
        )
        .ok();

        Self {
            inner: Rc::new(Inner {
                registry,
                observer,
                _on_intersect: Some(on_intersect),
            }),
        }
    }

    /// Tags the element, applies the pre-reveal styles and starts
    /// observing it. A controller without observer support leaves the
    /// element untouched.
    pub fn register(&self, element: &Element, kind: RevealKind, delay_ms: u32) {
        let observer = match &self.inner.observer {
            Some(o) => o,
            None => return,
        };

        let _ = element.set_attribute("data-animate", kind.as_attr());
        if delay_ms > 0 {
            let _ = element.set_attribute("data-delay", &delay_ms.to_string());
        }
        apply_hidden(element, kind);

        self.inner.registry.borrow_mut().push(Registration {
            element: element.clone(),
            kind,
            delay_ms,
            revealed: Cell::new(false),
        });
        observer.observe(element);
    }

    /// Stops observing and strips every trace of the reveal styling.
    pub fn unregister(&self, element: &Element) {
        if let Some(observer) = &self.inner.observer {
            observer.unobserve(element);
        }
        let _ = element.remove_attribute("data-animate");
        let _ = element.remove_attribute("data-delay");
        let _ = element.class_list().remove_1("animate");
        if let Some(styled) = element.dyn_ref::<HtmlElement>() {
            let style = styled.style();
            let _ = style.remove_property("opacity");
            let _ = style.remove_property("transform");
            let _ = style.remove_property("transition");
        }
        self.inner.registry.borrow_mut().retain(|r| r.element != *element);
    }

    /// Reapplies the pre-reveal state to everything still waiting to
    /// intersect. Elements that already revealed are left alone so a
    /// resize never makes visible content disappear.
    pub fn reset_all(&self) {
        for registration in self.inner.registry.borrow().iter() {
            if !registration.revealed.get() {
                apply_hidden(&registration.element, registration.kind);
            }
        }
    }
}

impl Default for RevealController {
    fn default() -> Self {
        Self::new()
    }
}

fn reveal_registered(registry: &Rc<RefCell<Vec<Registration>>>, target: &Element) {
    let kind = registry
        .borrow()
        .iter()
        .find(|r| r.element == *target)
        .map(|r| {
            r.revealed.set(true);
            r.kind
        });
    // The registration may have been unregistered while the delay ran.
    if let Some(kind) = kind {
        apply_revealed(target);
        dispatch_complete(target, kind);
    }
}

fn observer_supported() -> bool {
    web_sys::window()
        .map(|w| {
            js_sys::Reflect::has(w.as_ref(), &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false)
        })
        .unwrap_or(false)
}

fn observer_options() -> IntersectionObserverInit {
    let mut options = IntersectionObserverInit::new();
    options.threshold(&JsValue::from(OBSERVER_THRESHOLD));
    options.root_margin(OBSERVER_ROOT_MARGIN);
    options
}

fn apply_hidden(element: &Element, kind: RevealKind) {
    if let Some(styled) = element.dyn_ref::<HtmlElement>() {
        let style = styled.style();
        let _ = style.set_property("opacity", "0");
        let _ = style.set_property("transform", kind.initial_transform());
        let _ = style.set_property("transition", REVEAL_TRANSITION);
    }
}

fn apply_revealed(element: &Element) {
    if let Some(styled) = element.dyn_ref::<HtmlElement>() {
        let style = styled.style();
        let _ = style.set_property("opacity", "1");
        let _ = style.set_property("transform", "none");
    }
    let _ = element.class_list().add_1("animate");
}

fn dispatch_complete(element: &Element, kind: RevealKind) {
    let detail = js_sys::Object::new();
    let _ = js_sys::Reflect::set(
        detail.as_ref(),
        &JsValue::from_str("animation"),
        &JsValue::from_str(kind.as_attr()),
    );
    let mut init = CustomEventInit::new();
    init.detail(detail.as_ref());
    if let Ok(event) = CustomEvent::new_with_event_init_dict("animationComplete", &init) {
        let _ = element.dispatch_event(&event);
    }
}

/// Registers `node` with the shared controller for the lifetime of the
/// component. Does nothing when no controller is provided.
#[hook]
pub fn use_reveal(node: NodeRef, kind: RevealKind, delay_ms: u32) {
    let controller = use_context::<RevealController>();
    use_effect_with_deps(
        move |_| {
            let registered = match (controller, node.cast::<Element>()) {
                (Some(controller), Some(element)) => {
                    controller.register(&element, kind, delay_ms);
                    Some((controller, element))
                }
                _ => None,
            };
            move || {
                if let Some((controller, element)) = registered {
                    controller.unregister(&element);
                }
            }
        },
        (),
    );
}

/// Staggered reveal for a section's items: once the container first
/// intersects, the returned count climbs from 0 to `item_count`, one item
/// per `step_ms`. The count never goes back down. When observation is
/// unavailable every item is shown immediately.
#[hook]
pub fn use_staggered_reveal(container: NodeRef, item_count: usize, step_ms: u32) -> UseStateHandle<usize> {
    let revealed = use_state(|| 0usize);

    {
        let revealed = revealed.clone();
        use_effect_with_deps(
            move |_| {
                let mut holder: Option<(
                    IntersectionObserver,
                    Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
                )> = None;

                let container = container.cast::<Element>();
                if let (Some(container), true) = (container, observer_supported()) {
                    let setter = revealed.setter();
                    let on_intersect = Closure::wrap(Box::new(
                        move |entries: js_sys::Array, observer: IntersectionObserver| {
                            let intersecting = entries.iter().any(|entry| {
                                entry
                                    .unchecked_into::<IntersectionObserverEntry>()
                                    .is_intersecting()
                            });
                            if !intersecting {
                                return;
                            }
                            observer.disconnect();
                            for index in 0..item_count {
                                let setter = setter.clone();
                                Timeout::new(step_ms * index as u32, move || {
                                    setter.set(index + 1);
                                })
                                .forget();
                            }
                        },
                    )
                        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

                    match IntersectionObserver::new_with_options(
                        on_intersect.as_ref().unchecked_ref(),
                        &observer_options(),
                    ) {
                        Ok(observer) => {
                            observer.observe(&container);
                            holder = Some((observer, on_intersect));
                        }
                        Err(_) => revealed.set(item_count),
                    }
                } else {
                    revealed.set(item_count);
                }

                move || {
                    if let Some((observer, _on_intersect)) = holder {
                        observer.disconnect();
                    }
                }
            },
            (),
        );
    }

    revealed
}

/// Inline style for the i-th staggered item given how many are revealed.
pub fn stagger_item_style(revealed: usize, index: usize, kind: RevealKind) -> String {
    if revealed > index {
        format!("opacity: 1; transform: none; transition: {};", REVEAL_TRANSITION)
    } else {
        format!(
            "opacity: 0; transform: {}; transition: {};",
            kind.initial_transform(),
            REVEAL_TRANSITION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn attr_round_trip() {
        for kind in [
            RevealKind::FadeUp,
            RevealKind::FadeDown,
            RevealKind::FadeLeft,
            RevealKind::FadeRight,
            RevealKind::FadeIn,
            RevealKind::ScaleUp,
            RevealKind::ScaleDown,
        ] {
            assert_eq!(RevealKind::from_attr(kind.as_attr()), kind);
        }
    }

    #[test]
    fn unknown_kind_defaults_to_fade_up() {
        assert_eq!(RevealKind::from_attr("spin"), RevealKind::FadeUp);
        assert_eq!(RevealKind::from_attr(""), RevealKind::FadeUp);
        assert_eq!(RevealKind::from_attr("FADE-UP"), RevealKind::FadeUp);
    }

    #[test]
    fn initial_transform_table() {
        assert_eq!(RevealKind::FadeUp.initial_transform(), "translateY(20px)");
        assert_eq!(RevealKind::FadeDown.initial_transform(), "translateY(-20px)");
        assert_eq!(RevealKind::FadeLeft.initial_transform(), "translateX(-20px)");
        assert_eq!(RevealKind::FadeRight.initial_transform(), "translateX(20px)");
        assert_eq!(RevealKind::FadeIn.initial_transform(), "none");
        assert_eq!(RevealKind::ScaleUp.initial_transform(), "scale(0.9)");
        assert_eq!(RevealKind::ScaleDown.initial_transform(), "scale(1.1)");
    }

    #[test]
    fn stagger_style_tracks_reveal_count() {
        let hidden = stagger_item_style(1, 1, RevealKind::FadeUp);
        assert!(hidden.contains("opacity: 0"));
        assert!(hidden.contains("translateY(20px)"));

        let shown = stagger_item_style(2, 1, RevealKind::FadeUp);
        assert!(shown.contains("opacity: 1"));
        assert!(shown.contains("transform: none"));
    }
}
