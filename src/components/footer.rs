use chrono::{Datelike, Local};
use serde_json::json;
use web_sys::{KeyboardEvent, MouseEvent};
use yew::prelude::*;

use crate::analytics::Analytics;
use crate::components::navbar::scroll_to_section;
use crate::config;
use crate::reveal::use_staggered_reveal;

const STAGGER_STEP_MS: u32 = 100;
const FOOTER_BLOCKS: usize = 4;

const FOOTER_SECTIONS: &[(&str, &str)] = &[
    ("about", "About"),
    ("services", "Services"),
    ("projects", "Projects"),
    ("team", "Team"),
    ("contact", "Contact"),
];

fn block_style(shown: bool) -> String {
    if shown {
        String::from("opacity: 1; transform: translateY(0); transition: all 0.6s ease-out;")
    } else {
        String::from("opacity: 0; transform: translateY(20px); transition: all 0.6s ease-out;")
    }
}

#[function_component(Footer)]
pub fn footer() -> Html {
    let footer_ref = use_node_ref();
    let revealed = use_staggered_reveal(footer_ref.clone(), FOOTER_BLOCKS, STAGGER_STEP_MS);
    let analytics = use_context::<Analytics>();

    let nav_links = FOOTER_SECTIONS.iter().map(|(id, label)| {
        let on_click = {
            let id = *id;
            Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                scroll_to_section(id);
            })
        };
        let on_keydown = {
            let id = *id;
            Callback::from(move |e: KeyboardEvent| {
                if e.key() == "Enter" || e.key() == " " {
                    e.prevent_default();
                    scroll_to_section(id);
                }
            })
        };
        html! {
            <li key={*id}>
                <a href={format!("#{}", id)} onclick={on_click} onkeydown={on_keydown}>
                    {*label}
                </a>
            </li>
        }
    });

    let track_contact_click = |event_name: &'static str| -> Callback<MouseEvent> {
        let analytics = analytics.clone();
        Callback::from(move |e: MouseEvent| {
            let href = e
                .target_dyn_into::<web_sys::Element>()
                .and_then(|a| a.get_attribute("href"))
                .unwrap_or_default();
            if let Some(analytics) = &analytics {
                analytics.track_event(
                    event_name,
                    json!({ "event_category": "contact", "event_label": href }),
                );
            }
        })
    };

    let year = Local::now().year();

    html! {
        <footer class="footer" ref={footer_ref}>
            <div class="section-container footer-grid">
                <div class="footer-section" style={block_style(*revealed > 0)}>
                    <h3 class="footer-brand">{"ANTONI"}</h3>
                    <blockquote class="footer-quote">
                        <p>{"\"We don't just build houses. We build the places where lives happen.\""}</p>
                        <cite>{"Rafael Antoni, Founder"}</cite>
                    </blockquote>
                </div>
                <div class="footer-section footer-nav" style={block_style(*revealed > 1)}>
                    <h4>{"Explore"}</h4>
                    <ul>
                        { for nav_links }
                    </ul>
                </div>
                <div class="footer-section footer-contact" style={block_style(*revealed > 2)}>
                    <h4>{"Contact"}</h4>
                    <div class="footer-address">
                        <p>{"Av. Libertad 42"}</p>
                        <p>{"La Romana 22000"}</p>
                        <p>{"Dominican Republic"}</p>
                    </div>
                    <p>
                        <a
                            href={format!("tel:{}", config::CONTACT_PHONE.replace(['(', ')', ' ', '-'], ""))}
                            onclick={track_contact_click("phone_click")}
                        >
                            {config::CONTACT_PHONE}
                        </a>
                    </p>
                    <p>
                        <a
                            href={format!("mailto:{}", config::CONTACT_EMAIL)}
                            onclick={track_contact_click("email_click")}
                        >
                            {config::CONTACT_EMAIL}
                        </a>
                    </p>
                    <p><strong>{"Hours:"}</strong>{" Mon-Fri 8:00-17:00"}</p>
                </div>
            </div>
            <div class="footer-bottom section-container" style={block_style(*revealed > 3)}>
                <p class="footer-legal">
                    { format!("© {} Grupo Antoni. All rights reserved.", year) }
                </p>
            </div>
            <style>
                {r#"
                .footer {
                    background: var(--text-primary);
                    color: rgba(255, 255, 255, 0.85);
                    padding: 4rem 0 2rem;
                }

                .footer-grid {
                    display: grid;
                    grid-template-columns: repeat(auto-fit, minmax(240px, 1fr));
                    gap: 3rem;
                }

                .footer-brand {
                    letter-spacing: 0.2em;
                    margin-bottom: 1rem;
                }

                .footer-quote p {
                    font-style: italic;
                    line-height: 1.6;
                    margin-bottom: 0.5rem;
                }

                .footer-quote cite {
                    font-style: normal;
                    font-size: 0.9rem;
                    color: rgba(255, 255, 255, 0.6);
                }

                .footer-section h4 {
                    margin-bottom: 1rem;
                    color: #ffffff;
                }

                .footer-nav ul {
                    list-style: none;
                    padding: 0;
                    margin: 0;
                }

                .footer-nav li {
                    margin-bottom: 0.5rem;
                }

                .footer a {
                    color: rgba(255, 255, 255, 0.85);
                    text-decoration: none;
                    transition: color var(--transition-fast);
                }

                .footer a:hover {
                    color: var(--accent);
                }

                .footer-address p {
                    margin: 0 0 0.25rem;
                    color: rgba(255, 255, 255, 0.7);
                }

                .footer-bottom {
                    margin-top: 3rem;
                    padding-top: 1.5rem;
                    border-top: 1px solid rgba(255, 255, 255, 0.15);
                }

                .footer-legal {
                    font-size: 0.9rem;
                    color: rgba(255, 255, 255, 0.6);
                }
                "#}
            </style>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_start_offset_and_settle_in_place() {
        let hidden = block_style(false);
        assert!(hidden.contains("opacity: 0"));
        assert!(hidden.contains("translateY(20px)"));

        let shown = block_style(true);
        assert!(shown.contains("opacity: 1"));
        assert!(shown.contains("translateY(0)"));
    }
}
