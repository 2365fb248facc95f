use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;

use crate::reveal::use_staggered_reveal;

const STAGGER_STEP_MS: u32 = 150;

const ABOUT_CARDS: &[(&str, &str)] = &[
    (
        "Who We Are",
        "Grupo Antoni is a family-owned development firm with two decades of \
         building in the Dominican Republic, from oceanfront condominiums to \
         private mountain retreats.",
    ),
    (
        "How We Build",
        "Every project pairs local craftsmanship with sustainable engineering: \
         solar power, rainwater systems, and materials sourced from the regions \
         we build in.",
    ),
    (
        "What We Deliver",
        "More than ninety completed residences, delivered on schedule, with \
         owners who come back to us for their next home.",
    ),
];

/// Inline style for a card given its reveal/hover/focus state. The lift
/// replaces the revealed transform rather than stacking on it.
fn card_style(shown: bool, lifted: bool, focused: bool) -> String {
    let mut style = if shown && lifted {
        String::from(
            "opacity: 1; transform: translateY(-8px); \
             box-shadow: 0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1); \
             transition: all 0.6s ease-out;",
        )
    } else if shown {
        String::from("opacity: 1; transform: none; transition: all 0.6s ease-out;")
    } else {
        String::from("opacity: 0; transform: translateY(20px); transition: all 0.6s ease-out;")
    };
    if focused {
        style.push_str(" outline: 2px solid var(--accent); outline-offset: 4px;");
    }
    style
}

#[derive(Properties, PartialEq)]
struct AboutCardProps {
    title: AttrValue,
    content: AttrValue,
    shown: bool,
}

#[function_component(AboutCard)]
fn about_card(props: &AboutCardProps) -> Html {
    let lifted = use_state(|| false);
    let focused = use_state(|| false);

    // A resize can move the card out from under the pointer; drop the lift
    // rather than leaving it floating.
    {
        let lifted = lifted.clone();
        use_effect_with_deps(
            move |_| {
                let on_resize = Closure::wrap(Box::new(move || {
                    lifted.set(false);
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
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(true))
    };
    let on_mouse_leave = {
        let lifted = lifted.clone();
        Callback::from(move |_: MouseEvent| lifted.set(false))
    };
    let on_focus = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(true))
    };
    let on_blur = {
        let focused = focused.clone();
        Callback::from(move |_: FocusEvent| focused.set(false))
    };

    html! {
        <article
            class="about-card"
            tabindex="0"
            style={card_style(props.shown, *lifted, *focused)}
            onmouseenter={on_mouse_enter}
            onmouseleave={on_mouse_leave}
            onfocus={on_focus}
            onblur={on_blur}
        >
            <h3 class="card-title">{&props.title}</h3>
            <p class="card-content">{&props.content}</p>
        </article>
    }
}

#[function_component(About)]
pub fn about() -> Html {
    let section_ref = use_node_ref();
    let revealed = use_staggered_reveal(section_ref.clone(), ABOUT_CARDS.len(), STAGGER_STEP_MS);

    html! {
        <section id="about" class="about" ref={section_ref}>
            <div class="section-container">
                <h2 class="section-title">{"About Antoni"}</h2>
                <p class="section-intro">
                    {"We design, build, and deliver residential communities that \
                      belong to their landscape."}
                </p>
                <div class="about-cards">
                    { for ABOUT_CARDS.iter().enumerate().map(|(index, (title, content))| html! {
                        <AboutCard
                            key={*title}
                            title={*title}
                            content={*content}
                            shown={*revealed > index}
                        />
                    }) }
                </div>
            </div>
            <style>
                {r#"
                .about {
                    padding: 6rem 0;
                    background: var(--bg-primary);
                }

                .about-cards {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
                    gap: 2rem;
                    margin-top: 3rem;
                }

                .about-card {
                    background: #ffffff;
                    border: 1px solid var(--border);
                    border-radius: 12px;
                    padding: 2rem;
                    cursor: default;
                }

                .card-title {
                    font-size: 1.25rem;
                    margin-bottom: 1rem;
                    color: var(--text-primary);
                }

                .card-content {
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
    fn hidden_card_holds_prereveal_transform() {
        let style = card_style(false, false, false);
        assert!(style.contains("opacity: 0"));
        assert!(style.contains("translateY(20px)"));
    }

    #[test]
    fn hover_lift_replaces_revealed_transform() {
        let style = card_style(true, true, false);
        assert!(style.contains("translateY(-8px)"));
        assert!(style.contains("box-shadow"));
        assert!(!style.contains("transform: none"));
    }

    #[test]
    fn focus_outline_is_additive() {
        let style = card_style(true, false, true);
        assert!(style.contains("transform: none"));
        assert!(style.contains("outline: 2px solid var(--accent)"));
        assert!(style.contains("outline-offset: 4px"));
    }
}
