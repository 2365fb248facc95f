use yew::prelude::*;

use crate::components::about::About;
use crate::components::brand::Brand;
use crate::components::contact::Contact;
use crate::components::footer::Footer;
use crate::components::hero::Hero;
use crate::components::navbar::{NavSection, Navbar};
use crate::components::projects::Projects;
use crate::components::services::Services;
use crate::components::team::Team;

fn nav_sections() -> Vec<NavSection> {
    [
        ("about", "About"),
        ("services", "Services"),
        ("projects", "Projects"),
        ("team", "Team"),
        ("contact", "Contact"),
    ]
    .into_iter()
    .map(|(id, label)| NavSection {
        id: AttrValue::from(id),
        label: AttrValue::from(label),
    })
    .collect()
}

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="home-page">
            <Navbar sections={nav_sections()} />
            <main>
                <Hero />
                <About />
                <Services />
                <Projects />
                <Brand />
                <Team />
                <Contact />
            </main>
            <Footer />
            <style>
                {r#"
                :root {
                    --accent: #b48c5a;
                    --accent-contrast: #ffffff;
                    --text-primary: #0f172a;
                    --text-secondary: #475569;
                    --bg-primary: #ffffff;
                    --bg-secondary: #f8fafc;
                    --border: #e2e8f0;
                    --transition-fast: 150ms ease-in-out;
                    --transition-normal: 300ms ease-in-out;
                    --transition-slow: 500ms ease-in-out;
                }

                * {
                    box-sizing: border-box;
                }

                body {
                    margin: 0;
                    font-family: 'Inter', 'Helvetica Neue', Arial, sans-serif;
                    color: var(--text-primary);
                    background: var(--bg-primary);
                }

                h1, h2, h3, h4, blockquote {
                    margin: 0;
                }

                .section-container {
                    max-width: 1200px;
                    margin: 0 auto;
                    padding: 0 1.5rem;
                }

                .section-title {
                    font-size: 2.25rem;
                    text-align: center;
                }

                .section-intro {
                    max-width: 560px;
                    margin: 1rem auto 0;
                    text-align: center;
                    color: var(--text-secondary);
                    line-height: 1.6;
                }

                .btn {
                    display: inline-block;
                    padding: 0.8rem 1.75rem;
                    border-radius: 8px;
                    border: none;
                    font: inherit;
                    font-weight: 600;
                    text-decoration: none;
                    cursor: pointer;
                    transition: transform var(--transition-fast), opacity var(--transition-fast);
                }

                .btn:hover {
                    transform: translateY(-1px);
                    opacity: 0.9;
                }

                .btn-primary {
                    background: var(--accent);
                    color: var(--accent-contrast);
                }

                .btn-outline {
                    background: transparent;
                    color: inherit;
                    border: 2px solid currentColor;
                }

                .sr-only {
                    position: absolute;
                    width: 1px;
                    height: 1px;
                    padding: 0;
                    margin: -1px;
                    overflow: hidden;
                    clip: rect(0, 0, 0, 0);
                    white-space: nowrap;
                    border: 0;
                }
                "#}
            </style>
        </div>
    }
}
