use std::cell::Cell;
use std::rc::Rc;

use log::debug;
use web_sys::{HtmlElement, MouseEvent, TouchEvent};
use yew::prelude::*;

use crate::analytics::Analytics;

const BRANDS: &[(&str, &str)] = &[
    ("CEMEX", "https://www.cemex.com"),
    ("Acero Estrella", "https://aceroestrella.com"),
    ("Banco Popular", "https://www.popularenlinea.com"),
    ("Ferretería Americana", "https://americana.com.do"),
    ("Grupo Argos", "https://www.grupoargos.com"),
    ("EGE Haina", "https://www.egehaina.com"),
];

/// Horizontal partner-logo loop driven by a CSS keyframe animation.
/// Dragging pauses the loop and follows the pointer; releasing snaps back
/// to the animated position. Hover pauses, leave resumes.
#[function_component(Brand)]
pub fn brand() -> Html {
    let track_ref = use_node_ref();
    let analytics = use_context::<Analytics>();

    let dragging = use_mut_ref(|| DragState::default());

    let set_play_state = {
        let track_ref = track_ref.clone();
        Rc::new(move |running: bool| {
            if let Some(track) = track_ref.cast::<HtmlElement>() {
                let _ = track.style().set_property(
                    "animation-play-state",
                    if running { "running" } else { "paused" },
                );
            }
        })
    };
    let set_drag_transform = {
        let track_ref = track_ref.clone();
        Rc::new(move |offset: Option<i32>| {
            if let Some(track) = track_ref.cast::<HtmlElement>() {
                let value = match offset {
                    Some(px) => format!("translateX({}px)", px),
                    None => String::from("translateX(0)"),
                };
                let _ = track.style().set_property("transform", &value);
            }
        })
    };

    let start_drag = {
        let dragging = dragging.clone();
        let set_play_state = set_play_state.clone();
        Rc::new(move |client_x: i32| {
            dragging.borrow().begin(client_x);
            set_play_state(false);
        })
    };
    let move_drag = {
        let dragging = dragging.clone();
        let set_drag_transform = set_drag_transform.clone();
        Rc::new(move |client_x: i32| {
            if let Some(offset) = dragging.borrow().offset_for(client_x) {
                set_drag_transform(Some(offset));
            }
        })
    };
    let end_drag = {
        let dragging = dragging.clone();
        let set_play_state = set_play_state.clone();
        let set_drag_transform = set_drag_transform.clone();
        Rc::new(move || {
            if dragging.borrow().end() {
                set_drag_transform(None);
                set_play_state(true);
            }
        })
    };

    let on_mouse_down = {
        let start_drag = start_drag.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            start_drag(e.client_x());
        })
    };
    let on_mouse_move = {
        let move_drag = move_drag.clone();
        Callback::from(move |e: MouseEvent| move_drag(e.client_x()))
    };
    let on_mouse_up = {
        let end_drag = end_drag.clone();
        Callback::from(move |_: MouseEvent| end_drag())
    };
    let on_mouse_enter = {
        let set_play_state = set_play_state.clone();
        Callback::from(move |_: MouseEvent| set_play_state(false))
    };
    let on_mouse_leave = {
        let end_drag = end_drag.clone();
        let set_play_state = set_play_state.clone();
        Callback::from(move |_: MouseEvent| {
            end_drag();
            set_play_state(true);
        })
    };
    let on_touch_start = {
        let start_drag = start_drag.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                start_drag(touch.client_x());
            }
        })
    };
    let on_touch_move = {
        let move_drag = move_drag.clone();
        Callback::from(move |e: TouchEvent| {
            if let Some(touch) = e.touches().get(0) {
                e.prevent_default();
                move_drag(touch.client_x());
            }
        })
    };
    let on_touch_end = {
        let end_drag = end_drag.clone();
        Callback::from(move |_: TouchEvent| end_drag())
    };

    let logos = |hidden: bool| -> Html {
        let items = BRANDS.iter().map(|(name, url)| {
            let on_click = {
                let dragging = dragging.clone();
                let analytics = analytics.clone();
                let name = *name;
                let url = *url;
                Callback::from(move |e: MouseEvent| {
                    if dragging.borrow().consume_moved() {
                        // A drag ended on this link; swallow the click.
                        e.prevent_default();
                        return;
                    }
                    debug!("brand link clicked: {}", name);
                    if let Some(analytics) = &analytics {
                        analytics.track_link_click(name, url, "brand_marquee");
                    }
                })
            };
            html! {
                <div class="brand-logo" data-brand={*name} key={format!("{}-{}", name, hidden)}>
                    <a
                        class="brand-link"
                        href={*url}
                        target="_blank"
                        rel="noopener"
                        tabindex={if hidden { "-1" } else { "0" }}
                        onclick={on_click}
                    >
                        {name}
                    </a>
                </div>
            }
        });
        html! { <>{ for items }</> }
    };

    html! {
        <section id="brands" class="brands">
            <div
                class="brand-carousel-container"
                onmousedown={on_mouse_down}
                onmousemove={on_mouse_move}
                onmouseup={on_mouse_up}
                onmouseenter={on_mouse_enter}
                onmouseleave={on_mouse_leave}
                ontouchstart={on_touch_start}
                ontouchmove={on_touch_move}
                ontouchend={on_touch_end}
            >
                <div class="brand-carousel" ref={track_ref}>
                    { logos(false) }
                    // Second copy keeps the loop seamless.
                    <div aria-hidden="true" class="brand-carousel-repeat">
                        { logos(true) }
                    </div>
                </div>
            </div>
            <style>
                {r#"
                .brands {
                    padding: 3rem 0;
                    background: var(--bg-primary);
                    border-top: 1px solid var(--border);
                    border-bottom: 1px solid var(--border);
                }

                .brand-carousel-container {
                    overflow: hidden;
                    cursor: grab;
                }

                .brand-carousel-container:active {
                    cursor: grabbing;
                }

                .brand-carousel,
                .brand-carousel-repeat {
                    display: flex;
                    align-items: center;
                    gap: 2rem;
                    width: max-content;
                }

                .brand-carousel {
                    animation: brand-scroll 30s linear infinite;
                }

                .brand-logo {
                    flex: 0 0 auto;
                    padding: 0.5rem 1.5rem;
                }

                .brand-link {
                    color: var(--text-secondary);
                    font-weight: 600;
                    letter-spacing: 0.05em;
                    text-decoration: none;
                    white-space: nowrap;
                }

                .brand-link:hover {
                    color: var(--accent);
                }

                @keyframes brand-scroll {
                    from { translate: 0; }
                    to { translate: -50% 0; }
                }
                "#}
            </style>
        </section>
    }
}

/// Interior-mutable drag bookkeeping shared by the pointer handlers.
#[derive(Default)]
struct DragState {
    active: Cell<bool>,
    start_x: Cell<i32>,
    moved: Cell<bool>,
}

impl DragState {
    fn begin(&self, client_x: i32) {
        self.active.set(true);
        self.start_x.set(client_x);
        self.moved.set(false);
    }

    /// The current drag offset, or `None` when no drag is in progress.
    fn offset_for(&self, client_x: i32) -> Option<i32> {
        if !self.active.get() {
            return None;
        }
        let offset = client_x - self.start_x.get();
        if offset != 0 {
            self.moved.set(true);
        }
        Some(offset)
    }

    /// Returns true when a drag was actually in progress.
    fn end(&self) -> bool {
        self.active.replace(false)
    }

    /// True once after a drag that moved the track; used to swallow the
    /// click that follows releasing a drag on a link.
    fn consume_moved(&self) -> bool {
        self.moved.replace(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_tracks_pointer_from_start() {
        let drag = DragState::default();
        drag.begin(100);
        assert_eq!(drag.offset_for(140), Some(40));
        assert_eq!(drag.offset_for(60), Some(-40));
    }

    #[test]
    fn no_offset_without_active_drag() {
        let drag = DragState::default();
        assert_eq!(drag.offset_for(50), None);
        drag.begin(0);
        assert!(drag.end());
        assert_eq!(drag.offset_for(50), None);
        assert!(!drag.end());
    }

    #[test]
    fn click_swallowed_only_after_movement() {
        let drag = DragState::default();
        drag.begin(100);
        drag.end();
        assert!(!drag.consume_moved());

        drag.begin(100);
        drag.offset_for(130);
        drag.end();
        assert!(drag.consume_moved());
        // Consumed once; the next click goes through.
        assert!(!drag.consume_moved());
    }
}
