use gloo_timers::callback::Timeout;
use log::debug;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::reveal::use_staggered_reveal;

const STAGGER_STEP_MS: u32 = 100;
const CLICK_PULSE_MS: u32 = 150;

const SERVICES: &[(&str, &str)] = &[
    (
        "Residential Development",
        "Master-planned communities, condominiums, and villas from first sketch to handover.",
    ),
    (
        "Custom Homes",
        "Private residences designed around the owner's life, site, and climate.",
    ),
    (
        "Construction Management",
        "Budget, schedule, and quality control across every trade on site.",
    ),
    (
        "Architectural Design",
        "In-house design studio blending contemporary lines with Caribbean vernacular.",
    ),
    (
        "Land Development",
        "Site selection, entitlement, and infrastructure for raw parcels.",
    ),
    (
        "Owner Advisory",
        "Feasibility studies and investment guidance for buyers and partners.",
    ),
];

fn item_style(shown: bool, hovered: bool, pressed: bool, focused: bool) -> String {
    let mut style = if !shown {
        String::from("opacity: 0; transform: translateY(20px); transition: all 0.6s ease-out;")
    } else if pressed {
        String::from("opacity: 1; transform: scale(0.98); transition: transform 150ms ease-out;")
    } else if hovered {
        String::from(
            "opacity: 1; transform: translateY(-4px); background-color: var(--bg-secondary); \
             transition: all 0.6s ease-out;",
        )
    } else {
        String::from("opacity: 1; transform: none; transition: all 0.6s ease-out;")
    };
    if focused {
        style.push_str(" outline: 2px solid var(--accent); outline-offset: 4px;");
    }
    style
}

#[derive(Properties, PartialEq)]
struct ServiceItemProps {
    title: AttrValue,
    description: AttrValue,
    shown: bool,
}

#[function_component(ServiceItem)]
fn service_item(props: &ServiceItemProps) -> Html {
    let hovered = use_state(|| false);
    let focused = use_state(|| false);
    let pressed = use_state(|| false);

    {
        let hovered = hovered.clone();
        use_effect_with_deps(
            move |_| {
                let on_resize = Closure::wrap(Box::new(move || {
                    hovered.set(false);
                }) as Box<dyn FnMut()>);
                if let Some(window) = web_sys::window() {
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    if let Some(window) = web_sys::window() {
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            on_resize.as_ref().unchecked_ref(),
                        );
                    }
                }
            },
            (),
        );
    }

    let on_mouse_enter = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(true))
    };
    let on_mouse_leave = {
        let hovered = hovered.clone();
        Callback::from(move |_: MouseEvent| hovered.set(false))
    };
    let on_focus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    let on_blur = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(false))
    };
    let on_click = {
        let pressed = pressed.clone();
        let title = props.title.clone();
        Callback::from(move |_: MouseEvent| {
            debug!("service clicked: {}", title);
            let pressed = pressed.clone();
            pressed.set(true);
            Timeout::new(CLICK_PULSE_MS, move || pressed.set(false)).forget();
        })
    };

    html! {
        <div
            class="service-item"
            tabindex="0"
            style={item_style(props.shown, *hovered, *pressed, *focused)}
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
            onfocus={on_focus}
            onblur={on_blur}
            onclick={on_click}
        >
            <h3 class="service-title">{&props.title}</h3>
            <p class="service-description">{&props.description}</p>
        </div>
    }
}

#[function_component(Services)]
pub fn services() -> Html {
    let section_ref = use_node_ref();
    let revealed = use_staggered_reveal(section_ref.clone(), SERVICES.len(), STAGGER_STEP_MS);

    html! {
        <section id="services" class="services" ref={section_ref}>
            <div class="section-container">
                <h2 class="section-title">{"Services"}</h2>
                <div class="services-grid">
                    { for SERVICES.iter().enumerate().map(|(index, (title, description))| html! {
                        <ServiceItem
                            key={*title}
                            title={*title}
                            description={*description}
                            shown={*revealed > index}
                        />
                    }) }
                </div>
            </div>
            <style>
                {r#"
                .services {
                    padding: 6rem 0;
                    background: var(--bg-secondary);
                }

                .services-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
                    gap: 1.5rem;
                    margin-top: 3rem;
                }

                .service-item {
                    background: #ffffff;
                    border: 1px solid var(--border);
                    border-radius: 12px;
                    padding: 1.75rem;
                    cursor: pointer;
                }

                .service-title {
                    font-size: 1.1rem;
                    margin-bottom: 0.75rem;
                    color: var(--text-primary);
                }

                .service-description {
                    color: var(--text-secondary);
                    line-height: 1.6;
                }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_pulse_beats_hover() {
        let style = item_style(true, true, true, false);
        assert!(style.contains("scale(0.98)"));
        assert!(!style.contains("translateY(-4px)"));
    }

    #[test]
    fn hover_lifts_and_tints() {
        let style = item_style(true, true, false, false);
        assert!(style.contains("translateY(-4px)"));
        assert!(style.contains("var(--bg-secondary)"));
    }

    #[test]
    fn hidden_item_ignores_hover() {
        let style = item_style(false, true, false, false);
        assert!(style.contains("opacity: 0"));
        assert!(style.contains("translateY(20px)"));
    }
}
