use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::reveal::{stagger_item_style, use_staggered_reveal, RevealKind};
use crate::scroll_lock::ScrollLock;

const STAGGER_STEP_MS: u32 = 150;
const ANNOUNCE_LIFETIME_MS: u32 = 1000;
const FOCUSABLE_SELECTOR: &str =
    "button, [href], input, select, textarea, [tabindex]:not([tabindex=\"-1\"])";

#[derive(Debug, PartialEq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub location: &'static str,
    pub image: &'static str,
    pub image_alt: &'static str,
    pub summary: &'static str,
    pub highlights: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "romana-condos",
        title: "Romana Condos",
        location: "La Romana, Dominican Republic",
        image: "/img/condominio.png",
        image_alt: "Romana Condos - Modern residential complex with ocean views",
        summary: "Luxury residential complex featuring modern amenities and stunning \
                  ocean views. This project showcases our expertise in high-end \
                  residential development with a focus on sustainable design and \
                  premium finishes.",
        highlights: &[
            "50 luxury condominiums",
            "Oceanfront location with private beach access",
            "Modern amenities including pool, gym, and concierge services",
            "Sustainable design with energy-efficient systems",
            "Premium finishes and smart home technology",
        ],
    },
    Project {
        id: "mountain-bungalows",
        title: "Mountain Bungalows",
        location: "San José de Ocoa, Dominican Republic",
        image: "/img/patioOP.png",
        image_alt: "Mountain Bungalows - Sustainable mountain retreat with panoramic views",
        summary: "Eco-friendly mountain retreat designed for sustainable living and \
                  relaxation. This project demonstrates our commitment to environmental \
                  responsibility while creating beautiful, functional spaces.",
        highlights: &[
            "12 sustainable bungalows",
            "Panoramic mountain views",
            "Solar power and rainwater collection systems",
            "Natural materials and local craftsmanship",
            "Minimal environmental impact design",
        ],
    },
    Project {
        id: "antoni-village",
        title: "Antoni Village",
        location: "La Romana, Dominican Republic",
        image: "/img/villa.png",
        image_alt: "Antoni Village - Exclusive residential community with luxury amenities",
        summary: "Exclusive residential community featuring luxury villas and \
                  world-class amenities. This master-planned development represents the \
                  pinnacle of luxury living in the Dominican Republic.",
        highlights: &[
            "25 luxury villas",
            "Golf course and country club",
            "Private marina and beach club",
            "24/7 security and concierge services",
            "Custom design options for each villa",
        ],
    },
    Project {
        id: "private-residence",
        title: "Private Residence",
        location: "San José de Ocoa, Dominican Republic",
        image: "/img/patio.png",
        image_alt: "Private Residence - Custom luxury home with contemporary design",
        summary: "Custom luxury residence showcasing contemporary design and premium \
                  finishes. This private home represents our ability to create unique, \
                  personalized spaces that reflect our clients' vision.",
        highlights: &[
            "Custom architectural design",
            "Premium materials and finishes",
            "Smart home automation",
            "Landscaped gardens and outdoor living spaces",
            "Energy-efficient and sustainable features",
        ],
    },
];

/// Unknown ids resolve to `None` and leave the modal closed.
pub fn project_by_id(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

fn announce_modal_open(title: &str) {
    let document = match web_sys::window().and_then(|w| w.document()) {
        Some(d) => d,
        None => return,
    };
    let body = match document.body() {
        Some(b) => b,
        None => return,
    };
    let node = match document.create_element("div") {
        Ok(n) => n,
        Err(_) => return,
    };
    let _ = node.set_attribute("aria-live", "polite");
    let _ = node.set_attribute("aria-atomic", "true");
    node.set_class_name("sr-only");
    node.set_text_content(Some(&format!("Modal opened: {}", title)));
    if body.append_child(&node).is_ok() {
        Timeout::new(ANNOUNCE_LIFETIME_MS, move || {
            node.remove();
        })
        .forget();
    }
}

#[function_component(Projects)]
pub fn projects() -> Html {
    let section_ref = use_node_ref();
    let modal_ref = use_node_ref();
    let revealed = use_staggered_reveal(section_ref.clone(), PROJECTS.len(), STAGGER_STEP_MS);
    let open_project = use_state(|| None::<&'static Project>);
    let scroll_lock = use_context::<ScrollLock>();

    // Modal lifecycle: scroll lock, initial focus, Tab trap, Escape, and
    // the assistive-technology announcement.
    {
        let open_project = open_project.clone();
        let open_now = *open_project;
        let modal_ref = modal_ref.clone();
        let scroll_lock = scroll_lock.clone();
        use_effect_with_deps(
            move |open: &Option<&'static Project>| {
                let mut cleanup: Box<dyn FnOnce()> = Box::new(|| {});
                let project = match open {
                    Some(project) => *project,
                    None => return cleanup,
                };

                if let Some(lock) = &scroll_lock {
                    lock.acquire();
                }
                announce_modal_open(project.title);
                if let Some(first) = modal_ref
                    .cast::<HtmlElement>()
                    .and_then(|modal| modal.query_selector(FOCUSABLE_SELECTOR).ok())
                    .flatten()
                    .and_then(|e| e.dyn_into::<HtmlElement>().ok())
                {
                    let _ = first.focus();
                }

                let on_keydown = {
                    let open_project = open_project.clone();
                    let modal_ref = modal_ref.clone();
                    Closure::wrap(Box::new(move |event: KeyboardEvent| {
                        match event.key().as_str() {
                            "Escape" => open_project.set(None),
                            "Tab" => {
                                let focusables = match modal_ref
                                    .cast::<HtmlElement>()
                                    .and_then(|m| m.query_selector_all(FOCUSABLE_SELECTOR).ok())
                                {
                                    Some(list) => list,
                                    None => return,
                                };
                                if focusables.length() == 0 {
                                    return;
                                }
                                let first = focusables
                                    .get(0)
                                    .and_then(|n| n.dyn_into::<HtmlElement>().ok());
                                let last = focusables
                                    .get(focusables.length() - 1)
                                    .and_then(|n| n.dyn_into::<HtmlElement>().ok());
                                let active = web_sys::window()
                                    .and_then(|w| w.document())
                                    .and_then(|d| d.active_element());
                                let (first, last) = match (first, last) {
                                    (Some(f), Some(l)) => (f, l),
                                    _ => return,
                                };
                                // Wrap at both ends of the dialog.
                                if event.shift_key() {
                                    if active.as_deref() == Some(first.as_ref()) {
                                        event.prevent_default();
                                        let _ = last.focus();
                                    }
                                } else if active.as_deref() == Some(last.as_ref()) {
                                    event.prevent_default();
                                    let _ = first.focus();
                                }
                            }
                            _ => {}
                        }
                    }) as Box<dyn FnMut(KeyboardEvent)>)
                };
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    let _ = document.add_event_listener_with_callback(
                        "keydown",
                        on_keydown.as_ref().unchecked_ref(),
                    );
                }

                cleanup = Box::new(move || {
                    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                        let _ = document.remove_event_listener_with_callback(
                            "keydown",
                            on_keydown.as_ref().unchecked_ref(),
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

    let close_modal = {
        let open_project = open_project.clone();
        Callback::from(move |_: MouseEvent| open_project.set(None))
    };
    let on_overlay_click = {
        let open_project = open_project.clone();
        Callback::from(move |event: MouseEvent| {
            // Only the backdrop itself closes; clicks inside the dialog
            // bubble up with a different target.
            if event.target() == event.current_target() {
                open_project.set(None);
            }
        })
    };

    let cards = PROJECTS.iter().enumerate().map(|(index, project)| {
        let on_learn_more = {
            let open_project = open_project.clone();
            let id = project.id;
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                if let Some(found) = project_by_id(id) {
                    open_project.set(Some(found));
                }
            })
        };
        html! {
            <article
                class="project-card"
                key={project.id}
                style={stagger_item_style(*revealed, index, RevealKind::FadeUp)}
            >
                <div class="project-image">
                    <img src={project.image} alt={project.image_alt} loading="lazy" width="400" height="300" />
                </div>
                <div class="project-content">
                    <h3 class="project-title">{project.title}</h3>
                    <p class="project-location">{project.location}</p>
                    <p class="project-description">{project.summary}</p>
                    <button
                        class="btn btn-outline project-learn-more"
                        data-modal={project.id}
                        onclick={on_learn_more}
                    >
                        {"Learn more →"}
                    </button>
                </div>
            </article>
        }
    });

    let modal = match *open_project {
        Some(project) => html! {
            <div
                id="modalOverlay"
                class="modal-overlay active"
                aria-hidden="false"
                onclick={on_overlay_click}
            >
                <div class="modal" role="dialog" aria-modal="true" aria-labelledby="modalTitle" ref={modal_ref}>
                    <button class="modal-close" aria-label="Close dialog" onclick={close_modal}>
                        {"×"}
                    </button>
                    <img id="modalImage" src={project.image} alt={project.image_alt} />
                    <h3 id="modalTitle">{project.title}</h3>
                    <p id="modalLocation">{project.location}</p>
                    <div id="modalDescription">
                        <p>{project.summary}</p>
                        <ul>
                            { for project.highlights.iter().map(|item| html! { <li>{*item}</li> }) }
                        </ul>
                    </div>
                </div>
            </div>
        },
        None => html! {},
    };

    html! {
        <section id="projects" class="projects" ref={section_ref}>
            <div class="section-container">
                <h2 class="section-title">{"Featured Projects"}</h2>
                <div class="projects-grid">
                    { for cards }
                </div>
            </div>
            { modal }
            <style>
                {r#"
                .projects {
                    padding: 6rem 0;
                    background: var(--bg-primary);
                }

                .projects-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
                    gap: 2rem;
                    margin-top: 3rem;
                }

                .project-card {
                    background: #ffffff;
                    border: 1px solid var(--border);
                    border-radius: 12px;
                    overflow: hidden;
                }

                .project-image img {
                    width: 100%;
                    height: auto;
                    display: block;
                }

                .project-content {
                    padding: 1.5rem;
                }

                .project-title {
                    font-size: 1.25rem;
                    margin-bottom: 0.25rem;
                }

                .project-location {
                    color: var(--text-secondary);
                    font-size: 0.9rem;
                    margin-bottom: 1rem;
                }

                .project-description {
                    color: var(--text-secondary);
                    line-height: 1.6;
                    margin-bottom: 1.5rem;
                }

                .modal-overlay {
                    position: fixed;
                    inset: 0;
                    z-index: 200;
                    background: rgba(15, 23, 42, 0.6);
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    padding: 1.5rem;
                }

                .modal {
                    position: relative;
                    background: #ffffff;
                    border-radius: 12px;
                    max-width: 640px;
                    max-height: 85vh;
                    overflow-y: auto;
                    padding: 2rem;
                }

                .modal img {
                    width: 100%;
                    border-radius: 8px;
                    margin-bottom: 1.5rem;
                }

                .modal-close {
                    position: absolute;
                    top: 1rem;
                    right: 1rem;
                    background: none;
                    border: none;
                    font-size: 1.75rem;
                    line-height: 1;
                    cursor: pointer;
                    color: var(--text-secondary);
                }

                #modalLocation {
                    color: var(--text-secondary);
                    margin-bottom: 1rem;
                }

                #modalDescription ul {
                    margin-top: 1rem;
                    padding-left: 1.25rem;
                    color: var(--text-secondary);
                }

                #modalDescription li {
                    margin-bottom: 0.5rem;
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
    fn unknown_id_stays_closed() {
        assert_eq!(project_by_id("penthouse-towers"), None);
        assert_eq!(project_by_id(""), None);
    }

    #[test]
    fn known_ids_resolve() {
        for id in [
            "romana-condos",
            "mountain-bungalows",
            "antoni-village",
            "private-residence",
        ] {
            let project = project_by_id(id).expect("project should exist");
            assert_eq!(project.id, id);
            assert!(!project.highlights.is_empty());
        }
    }

    #[test]
    fn lookup_is_exact_match() {
        assert_eq!(project_by_id("romana"), None);
        assert_eq!(project_by_id("Romana-Condos"), None);
    }
}
