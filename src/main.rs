use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use yew::prelude::*;
use yew_router::prelude::*;

mod analytics;
mod config;
mod reveal;
mod scroll_lock;
mod theme;

mod components {
    pub mod about;
    pub mod brand;
    pub mod contact;
    pub mod footer;
    pub mod hero;
    pub mod navbar;
    pub mod projects;
    pub mod services;
    pub mod team;
}
mod pages {
    pub mod home;
}

use analytics::Analytics;
use config::AnalyticsSettings;
use pages::home::Home;
use reveal::RevealController;
use scroll_lock::ScrollLock;

const LOGO_URL: &str = "/img/ANTONI.png";
const RESIZE_DEBOUNCE_MS: u32 = 250;

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        // The site is a single page; unknown paths fall back to it.
        Route::Home | Route::NotFound => {
            info!("Rendering Home page");
            html! { <Home /> }
        }
    }
}

#[function_component]
fn App() -> Html {
    let analytics = use_state(|| Analytics::new(AnalyticsSettings::load()));
    let reveal = use_state(RevealController::new);
    let scroll_lock = use_state(ScrollLock::new);

    // One-time boot: tag scripts, the landing page view, logo accent
    // extraction, and the reduced-motion watcher.
    {
        let analytics = (*analytics).clone();
        use_effect_with_deps(
            move |_| {
                analytics.init();
                analytics.track_page_view(None, None);
                theme::init_accent_from_logo(LOGO_URL);
                theme::watch_reduced_motion();
                || ()
            },
            (),
        );
    }

    // Resize shifts layout under pending reveals; reapply their
    // pre-reveal state after the resize settles.
    {
        let reveal = (*reveal).clone();
        use_effect_with_deps(
            move |_| {
                let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
                let on_resize = {
                    let pending = pending.clone();
                    Closure::wrap(Box::new(move || {
                        let reveal = reveal.clone();
                        let timer = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
                            reveal.reset_all();
                        });
                        *pending.borrow_mut() = Some(timer);
                    }) as Box<dyn FnMut()>)
                };
                if let Some(window) = web_sys::window() {
                    let _ = window.add_event_listener_with_callback(
                        "resize",
                        on_resize.as_ref().unchecked_ref(),
                    );
                }
                move || {
                    pending.borrow_mut().take();
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

    html! {
        <ContextProvider<Analytics> context={(*analytics).clone()}>
            <ContextProvider<RevealController> context={(*reveal).clone()}>
                <ContextProvider<ScrollLock> context={(*scroll_lock).clone()}>
                    <BrowserRouter>
                        <Switch<Route> render={switch} />
                    </BrowserRouter>
                </ContextProvider<ScrollLock>>
            </ContextProvider<RevealController>>
        </ContextProvider<Analytics>>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting Antoni site");
    yew::Renderer::<App>::new().render();
}
