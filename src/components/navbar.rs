use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent, ScrollBehavior, ScrollToOptions};
use yew::prelude::*;

use crate::scroll_lock::ScrollLock;

/// Height of the fixed navbar, subtracted from every smooth-scroll target.
pub const NAVBAR_OFFSET: i32 = 80;

const SCROLLED_THRESHOLD: f64 = 100.0;
const ACTIVE_PROBE_OFFSET: i32 = 100;
const DESKTOP_BREAKPOINT: f64 = 768.0;
const SCROLL_DEBOUNCE_MS: u32 = 10;

#[derive(Clone, PartialEq)]
pub struct NavSection {
    pub id: AttrValue,
    pub label: AttrValue,
}

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub sections: Vec<NavSection>,
}

/// Smooth-scrolls the page so `section_id` lands just below the navbar.
/// A missing section leaves the page where it is.
pub fn scroll_to_section(section_id: &str) {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let section = window
        .document()
        .and_then(|d| d.get_element_by_id(section_id))
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(section) = section {
        let mut options = ScrollToOptions::new();
        options
            .top((section.offset_top() - NAVBAR_OFFSET) as f64)
            .behavior(ScrollBehavior::Smooth);
        window.scroll_to_with_scroll_to_options(&options);
    }
}

/// The section whose scroll window contains `scroll_y`, as an index into
/// `geometry` (top, height pairs). When windows overlap the last one in
/// document order wins, matching how the links highlight while scrolling
/// past short sections.
fn active_section_index(scroll_y: i32, geometry: &[(i32, i32)]) -> Option<usize> {
    let mut active = None;
    for (index, &(top, height)) in geometry.iter().enumerate() {
        let window_top = top - ACTIVE_PROBE_OFFSET;
        if scroll_y >= window_top && scroll_y < window_top + height {
            active = Some(index);
        }
    }
    active
}

fn wrap_index(current: usize, len: usize, forward: bool) -> usize {
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let menu_open = use_state(|| false);
    let is_scrolled = use_state(|| false);
    let active_id = use_state(|| None::<String>);
    let scroll_lock = use_context::<ScrollLock>();

    let navbar_ref = use_node_ref();
    let menu_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    // Scrolled styling and active-link highlighting, debounced 10 ms.
    {
        let is_scrolled = is_scrolled.clone();
        let active_id = active_id.clone();
        let section_ids: Vec<String> = props.sections.iter().map(|s| s.id.to_string()).collect();
        use_effect_with_deps(
            move |_| {
                let window = web_sys::window();
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

                let on_scroll = {
                    let pending = pending.clone();
                    Closure::wrap(Box::new(move || {
                        let is_scrolled = is_scrolled.clone();
                        let active_id = active_id.clone();
                        let section_ids = section_ids.clone();
                        let timer = Timeout::new(SCROLL_DEBOUNCE_MS, move || {
                            let window = match web_sys::window() {
                                Some(w) => w,
                                None => return,
                            };
                            let scroll_y = window.scroll_y().unwrap_or(0.0);
                            is_scrolled.set(scroll_y > SCROLLED_THRESHOLD);

                            let document = match window.document() {
                                Some(d) => d,
                                None => return,
                            };
                            let mut present = Vec::new();
                            let mut geometry = Vec::new();
                            for id in &section_ids {
                                if let Some(section) = document
                                    .get_element_by_id(id)
                                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                                {
                                    present.push(id.clone());
                                    geometry.push((section.offset_top(), section.offset_height()));
                                }
                            }
                            let active = active_section_index(scroll_y as i32, &geometry)
                                .map(|index| present[index].clone());
                            active_id.set(active);
                        });
                        // A fresh scroll event supersedes the pending probe.
                        *pending.borrow_mut() = Some(timer);
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = &window {
                    let _ = window.add_event_listener_with_callback(
                        "scroll",
                        on_scroll.as_ref().unchecked_ref(),
                    );
                }

                move || {
                    pending.borrow_mut().take();
                    if let Some(window) = web_sys::window() {
                        let _ = window.remove_event_listener_with_callback(
                            "scroll",
                            on_scroll.as_ref().unchecked_ref(),
                        );
                    }
                    drop(on_scroll);
                }
            },
            (),
        );
    }

    // While the menu is open: hold the scroll lock, focus the first link,
    // and close on outside click, Escape, or a resize up to desktop width.
    {
        let menu_open = menu_open.clone();
        let open_now = *menu_open;
        let scroll_lock = scroll_lock.clone();
        let navbar_ref = navbar_ref.clone();
        let menu_ref = menu_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with_deps(
            move |open: &bool| {
                let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});
                if !*open {
                    return cleanup;
                }

                if let Some(lock) = &scroll_lock {
                    lock.acquire();
                }
                if let Some(first_link) = menu_ref
                    .cast::<HtmlElement>()
                    .and_then(|menu| menu.query_selector(".nav-link").ok())
                    .flatten()
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                {
                    let _ = first_link.focus();
                }

                let on_document_click = {
                    let menu_open = menu_open.clone();
                    let navbar_ref = navbar_ref.clone();
                    Closure::wrap(Box::new(move |event: MouseEvent| {
                        let inside = event
                            .target()
                            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
                            .map(|node| {
                                navbar_ref
                                    .cast::<web_sys::Node>()
                                    .map(|navbar| navbar.contains(Some(&node)))
                                    .unwrap_or(false)
                            })
                            .unwrap_or(false);
                        if !inside {
                            menu_open.set(false);
                        }
                    }) as Box<dyn FnMut(MouseEvent)>)
                };
                let on_document_keydown = {
                    let menu_open = menu_open.clone();
                    let toggle_ref = toggle_ref.clone();
                    Closure::wrap(Box::new(move |event: KeyboardEvent| {
                        if event.key() == "Escape" {
                            menu_open.set(false);
                            if let Some(toggle) = toggle_ref.cast::<HtmlElement>() {
                                let _ = toggle.focus();
                            }
                        }
                    }) as Box<dyn FnMut(KeyboardEvent)>)
                };
                let on_resize = {
                    let menu_open = menu_open.clone();
                    Closure::wrap(Box::new(move || {
                        let width = web_sys::window()
                            .and_then(|w| w.inner_width().ok())
                            .and_then(|v| v.as_f64())
                            .unwrap_or(0.0);
                        if width >= DESKTOP_BREAKPOINT {
                            menu_open.set(false);
                        }
                    }) as Box<dyn FnMut()>)
                };

                if let Some(window) = web_sys::window() {
                    if let Some(document) = window.document() {
                        let _ = document.add_event_listener_with_callback(
                            "click",
                            on_document_click.as_ref().unchecked_ref(),
                        );
                        let _ = document.add_event_listener_with_callback(
                            "keydown",
                            on_document_keydown.as_ref().unchecked_ref(),
                        );
                    }
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }

                cleanup = Box::new(move || {
                    if let Some(window) = web_sys::window() {
                        if let Some(document) = window.document() {
                            let _ = document.remove_event_listener_with_callback(
                                "click",
                                on_document_click.as_ref().unchecked_ref(),
                            );
                            let _ = document.remove_event_listener_with_callback(
                                "keydown",
                                on_document_keydown.as_ref().unchecked_ref(),
                            );
                        }
                        let _ = window.remove_event_listener_with_callback(
                            "resize",
                            on_resize.as_ref().unchecked_ref(),
                        );
                    }
                    if let Some(lock) = &scroll_lock {
                        lock.release();
                    }
                });
                cleanup
            },
            open_now,
        );
    }

    let toggle_menu = {
        let menu_open = menu_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            // Stop the document click-outside handler from seeing this.
            e.stop_propagation();
            menu_open.set(!*menu_open);
        })
    };

    let link_count = props.sections.len();
    let links = props.sections.iter().enumerate().map(|(index, section)| {
        let id = section.id.to_string();
        let on_click = {
            let menu_open = menu_open.clone();
            let id = id.clone();
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                scroll_to_section(&id);
                menu_open.set(false);
            })
        };
        let on_keydown = {
            let menu_ref = menu_ref.clone();
            Callback::from(move |e: KeyboardEvent| {
                let forward = match e.key().as_str() {
                    "ArrowDown" => true,
                    "ArrowUp" => false,
                    _ => return,
                };
                e.prevent_default();
                let next = wrap_index(index, link_count, forward);
                let link = menu_ref
                    .cast::<HtmlElement>()
                    .and_then(|menu| menu.query_selector_all(".nav-link").ok())
                    .and_then(|links| links.get(next as u32))
                    .and_then(|node| node.dyn_into::<HtmlElement>().ok());
                if let Some(link) = link {
                    let _ = link.focus();
                }
            })
        };
        let is_active = active_id.as_deref() == Some(id.as_str());
        html! {
            <li class="nav-item">
                <a
                    class={classes!("nav-link", is_active.then(|| "active"))}
                    href={format!("#{}", id)}
                    onclick={on_click}
                    onkeydown={on_keydown}
                >
                    {&section.label}
                </a>
            </li>
        }
    });

    html! {
        <nav
            id="navbar"
            ref={navbar_ref}
            class={classes!("navbar", is_scrolled.then(|| "scrolled"))}
        >
            <div class="nav-container">
                <a class="nav-brand" href="#hero" onclick={{
                    let menu_open = menu_open.clone();
                    Callback::from(move |e: MouseEvent| {
                        e.prevent_default();
                        scroll_to_section("hero");
                        menu_open.set(false);
                    })
                }}>
                    {"ANTONI"}
                </a>
                <button
                    class="nav-toggle"
                    ref={toggle_ref}
                    aria-label="Toggle navigation"
                    aria-expanded={if *menu_open { "true" } else { "false" }}
                    onclick={toggle_menu}
                >
                    <span></span>
                    <span></span>
                    <span></span>
                </button>
                <ul class={classes!("nav-menu", menu_open.then(|| "active"))} ref={menu_ref.clone()}>
                    { for links }
                </ul>
            </div>
            <style>
                {r#"
                .navbar {
                    position: fixed;
                    top: 0;
                    left: 0;
                    right: 0;
                    z-index: 100;
                    background: rgba(255, 255, 255, 0.95);
                    backdrop-filter: blur(10px);
                    transition: box-shadow var(--transition-normal), background var(--transition-normal);
                }

                .navbar.scrolled {
                    background: rgba(255, 255, 255, 0.98);
                    backdrop-filter: blur(20px);
                    box-shadow: 0 1px 3px 0 rgb(0 0 0 / 0.1);
                }

                .nav-container {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 0 1.5rem;
                    height: 80px;
                    display: flex;
                    align-items: center;
                    justify-content: space-between;
                }

                .nav-brand {
                    font-size: 1.5rem;
                    font-weight: 700;
                    letter-spacing: 0.2em;
                    color: var(--text-primary);
                    text-decoration: none;
                }

                .nav-menu {
                    display: flex;
                    gap: 2rem;
                    list-style: none;
                    margin: 0;
                    padding: 0;
                }

                .nav-link {
                    color: var(--text-secondary);
                    text-decoration: none;
                    font-weight: 500;
                    transition: color var(--transition-fast);
                }

                .nav-link:hover,
                .nav-link.active {
                    color: var(--accent);
                }

                .nav-toggle {
                    display: none;
                    flex-direction: column;
                    gap: 5px;
                    background: none;
                    border: none;
                    cursor: pointer;
                    padding: 0.5rem;
                }

                .nav-toggle span {
                    width: 24px;
                    height: 2px;
                    background: var(--text-primary);
                    transition: transform var(--transition-fast);
                }

                @media (max-width: 767px) {
                    .nav-toggle {
                        display: flex;
                    }

                    .nav-menu {
                        position: fixed;
                        top: 80px;
                        left: 0;
                        right: 0;
                        bottom: 0;
                        background: rgba(255, 255, 255, 0.98);
                        flex-direction: column;
                        align-items: center;
                        padding: 3rem 0;
                        transform: translateX(100%);
                        transition: transform var(--transition-normal);
                    }

                    .nav-menu.active {
                        transform: translateX(0);
                    }
                }
                "#}
            </style>
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn section_window_rule() {
        // One section from 200 to 800: the window runs from 100 to 700.
        let geometry = [(200, 600)];
        assert_eq!(active_section_index(99, &geometry), None);
        assert_eq!(active_section_index(100, &geometry), Some(0));
        assert_eq!(active_section_index(699, &geometry), Some(0));
        assert_eq!(active_section_index(700, &geometry), None);
    }

    #[test]
    fn last_matching_section_wins() {
        // A tall section overlapping a short one following it.
        let geometry = [(100, 2000), (600, 400)];
        assert_eq!(active_section_index(550, &geometry), Some(1));
        assert_eq!(active_section_index(1500, &geometry), Some(0));
    }

    #[test]
    fn no_sections_no_active_link() {
        assert_eq!(active_section_index(500, &[]), None);
    }

    #[test]
    fn arrow_focus_wraps_both_ways() {
        assert_eq!(wrap_index(0, 4, true), 1);
        assert_eq!(wrap_index(3, 4, true), 0);
        assert_eq!(wrap_index(0, 4, false), 3);
        assert_eq!(wrap_index(2, 4, false), 1);
    }
}
