use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::components::navbar::scroll_to_section;
use crate::reveal::{use_reveal, RevealKind};
use crate::theme::prefers_reduced_motion;

const HERO_TITLE: &str = "Building Tomorrow's Landmarks";
const TYPEWRITER_START_DELAY_MS: u32 = 500;
const TYPEWRITER_STEP_MS: u32 = 50;
const SCROLL_DEBOUNCE_MS: u32 = 10;

/// Background offset for the parallax layer at a given scroll position.
fn parallax_offset(scroll_y: f64) -> f64 {
    scroll_y * -0.5
}

/// Content opacity: fully opaque through the first half of the hero, then
/// fading linearly to zero over the second half.
fn content_opacity(scroll_y: f64, hero_height: f64) -> f64 {
    let half = hero_height * 0.5;
    if hero_height <= 0.0 || scroll_y <= half {
        return 1.0;
    }
    (1.0 - (scroll_y - half) / half).max(0.0)
}

#[function_component(Hero)]
pub fn hero() -> Html {
    let typed_chars = use_state(|| 0usize);

    let hero_ref = use_node_ref();
    let background_ref = use_node_ref();
    let content_ref = use_node_ref();
    let subtitle_ref = use_node_ref();
    let actions_ref = use_node_ref();
    let indicator_ref = use_node_ref();

    use_reveal(subtitle_ref.clone(), RevealKind::FadeUp, 0);
    use_reveal(actions_ref.clone(), RevealKind::FadeUp, 200);
    use_reveal(indicator_ref.clone(), RevealKind::FadeIn, 400);

    // Typewriter: half a second of silence, then one character at a time.
    {
        let typed_chars = typed_chars.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    TimeoutFuture::new(TYPEWRITER_START_DELAY_MS).await;
                    let total = HERO_TITLE.chars().count();
                    for shown in 1..=total {
                        typed_chars.set(shown);
                        TimeoutFuture::new(TYPEWRITER_STEP_MS).await;
                    }
                });
                || ()
            },
            (),
        );
    }

    // Parallax and content fade on scroll, debounced 10 ms. Reduced motion
    // disables the parallax layer but not the fade.
    {
        let hero_ref = hero_ref.clone();
        let background_ref = background_ref.clone();
        let content_ref = content_ref.clone();
        use_effect_with_deps(
            move |_| {
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let parallax_enabled = !prefers_reduced_motion();

                let on_scroll = {
                    let pending = pending.clone();
                    let hero_ref = hero_ref.clone();
                    let background_ref = background_ref.clone();
                    let content_ref = content_ref.clone();
                    Closure::wrap(Box::new(move || {
                        let hero_ref = hero_ref.clone();
                        let background_ref = background_ref.clone();
                        let content_ref = content_ref.clone();
                        let timer = Timeout::new(SCROLL_DEBOUNCE_MS, move || {
                            let scroll_y = web_sys::window()
                                .and_then(|w| w.scroll_y().ok())
                                .unwrap_or(0.0);
                            if parallax_enabled {
                                if let Some(background) = background_ref.cast::<HtmlElement>() {
                                    let _ = background.style().set_property(
                                        "transform",
                                        &format!("translateY({}px)", parallax_offset(scroll_y)),
                                    );
                                }
                            }
                            let hero_height = hero_ref
                                .cast::<HtmlElement>()
                                .map(|hero| hero.offset_height() as f64)
                                .unwrap_or(0.0);
                            if let Some(content) = content_ref.cast::<HtmlElement>() {
                                let _ = content.style().set_property(
                                    "opacity",
                                    &content_opacity(scroll_y, hero_height).to_string(),
                                );
                            }
                        });
                        *pending.borrow_mut() = Some(timer);
                    }) as Box<dyn FnMut()>)
                };
                let on_resize = {
                    let background_ref = background_ref.clone();
                    Closure::wrap(Box::new(move || {
                        // Layout shifted; drop the stale parallax offset.
                        if let Some(background) = background_ref.cast::<HtmlElement>() {
                            let _ = background.style().remove_property("transform");
                        }
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = web_sys::window() {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        on_scroll.as_ref().unchecked_ref(),
                    );
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    pending.borrow_mut().take();
                    if let Some(window) = web_sys::window() {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            on_scroll.as_ref().unchecked_ref(),
                        );
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

    let cta = |target: &'static str, label: &'static str, class: &'static str| -> Html {
        let on_click = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            scroll_to_section(target);
        });
        let on_keydown = Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" || e.key() == " " {
                e.prevent_default();
                scroll_to_section(target);
            }
        });
        html! {
            <a
                class={classes!("btn", class)}
                href={format!("#{}", target)}
                onclick={on_click}
                onkeydown={on_keydown}
            >
                {label}
            </a>
        }
    };

    let title: String = HERO_TITLE.chars().take(*typed_chars).collect();

    html! {
        <section id="hero" class="hero" ref={hero_ref}>
            <div class="hero-background" ref={background_ref}></div>
            <div class="hero-content" ref={content_ref}>
                <h1 class="hero-title">{title}</h1>
                <p class="hero-subtitle" ref={subtitle_ref}>
                    {"Luxury residential communities across the Dominican Republic, \
                      designed and built by Grupo Antoni."}
                </p>
                <div class="hero-actions" ref={actions_ref}>
                    { cta("projects", "View Our Projects", "btn-primary") }
                    { cta("contact", "Start Your Project", "btn-outline") }
                </div>
            </div>
            <div class="hero-scroll-indicator" ref={indicator_ref} aria-hidden="true">
                <span></span>
            </div>
            <style>
                {r#"
                .hero {
                    position: relative;
                    min-height: 100vh;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    overflow: hidden;
                    text-align: center;
                }

                .hero-background {
                    position: absolute;
                    inset: -20% 0;
                    background-image: linear-gradient(rgba(15, 23, 42, 0.55), rgba(15, 23, 42, 0.55)),
                        url('/img/hero.png');
                    background-size: cover;
                    background-position: center;
                    z-index: -1;
                    will-change: transform;
                }

                .hero-content {
                    max-width: 760px;
                    padding: 0 1.5rem;
                    color: #ffffff;
                }

                .hero-title {
                    font-size: 3.5rem;
                    font-weight: 700;
                    letter-spacing: 0.02em;
                    min-height: 1.2em;
                    margin-bottom: 1.5rem;
                }

                .hero-subtitle {
                    font-size: 1.25rem;
                    color: rgba(255, 255, 255, 0.85);
                    margin-bottom: 2.5rem;
                }

                .hero-actions {
                    display: flex;
                    gap: 1rem;
                    justify-content: center;
                    flex-wrap: wrap;
                }

                .hero-scroll-indicator {
                    position: absolute;
                    bottom: 2rem;
                    left: 50%;
                    transform: translateX(-50%);
                    width: 26px;
                    height: 42px;
                    border: 2px solid rgba(255, 255, 255, 0.6);
                    border-radius: 14px;
                }

                .hero-scroll-indicator span {
                    display: block;
                    width: 4px;
                    height: 8px;
                    margin: 6px auto 0;
                    border-radius: 2px;
                    background: rgba(255, 255, 255, 0.8);
                    animation: hero-scroll-nudge 1.6s ease-in-out infinite;
                }

                @keyframes hero-scroll-nudge {
                    0%, 100% { transform: translateY(0); opacity: 1; }
                    60% { transform: translateY(12px); opacity: 0.2; }
                }

                @media (max-width: 767px) {
                    .hero-title {
                        font-size: 2.25rem;
                    }
                }
                "#}
            </style>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parallax_is_half_speed_upward() {
        assert_eq!(parallax_offset(0.0), 0.0);
        assert_eq!(parallax_offset(100.0), -50.0);
        assert_eq!(parallax_offset(640.0), -320.0);
    }

    #[test]
    fn content_opaque_through_first_half() {
        assert_eq!(content_opacity(0.0, 800.0), 1.0);
        assert_eq!(content_opacity(400.0, 800.0), 1.0);
    }

    #[test]
    fn content_fades_over_second_half() {
        assert_eq!(content_opacity(600.0, 800.0), 0.5);
        assert_eq!(content_opacity(800.0, 800.0), 0.0);
        // Scrolling past the hero clamps at zero.
        assert_eq!(content_opacity(2000.0, 800.0), 0.0);
    }

    #[test]
    fn zero_height_hero_never_fades() {
        assert_eq!(content_opacity(500.0, 0.0), 1.0);
    }
}
