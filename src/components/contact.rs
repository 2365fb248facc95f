use std::rc::Rc;

use gloo_timers::callback::Timeout;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;
use web_sys::{HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::analytics::Analytics;
use crate::config;

pub const DESCRIPTION_MIN_DEFAULT: usize = 280;
pub const DESCRIPTION_MAX_DEFAULT: usize = 1000;
const TOAST_LIFETIME_MS: u32 = 5000;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("phone regex"));

/// Progressive US phone mask: digits only, truncated to ten, parentheses
/// and dash inserted at the 3/6/10 digit thresholds.
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).take(10).collect();
    match digits.len() {
        0 => String::new(),
        1..=2 => format!("({}", digits),
        3..=5 => format!("({}) {}", &digits[..3], &digits[3..]),
        _ => format!("({}) {}-{}", &digits[..3], &digits[3..6], &digits[6..]),
    }
}

pub fn required_error(label: &str, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        Some(format!("{} is required", label))
    } else {
        None
    }
}

pub fn email_error(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || EMAIL_RE.is_match(value) {
        None
    } else {
        Some(String::from("Please enter a valid email address"))
    }
}

pub fn confirm_email_error(email: &str, confirm: &str) -> Option<String> {
    let confirm = confirm.trim();
    if confirm.is_empty() || confirm == email.trim() {
        None
    } else {
        Some(String::from("Email addresses do not match"))
    }
}

/// Phone is optional; only a non-empty value is checked against the mask.
pub fn phone_error(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || PHONE_RE.is_match(value) {
        None
    } else {
        Some(String::from("Please enter a valid phone number"))
    }
}

pub fn description_error(value: &str, min: usize, max: usize) -> Option<String> {
    let length = value.trim().chars().count();
    if length == 0 {
        return None;
    }
    if length < min {
        Some(format!("Description must be at least {} characters", min))
    } else if length > max {
        Some(format!("Description must be no more than {} characters", max))
    } else {
        None
    }
}

pub struct Inquiry<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub project_type: &'a str,
    pub description: &'a str,
}

pub fn mailto_url(inquiry: &Inquiry) -> String {
    let subject = "New project inquiry — Antoni";
    let phone = if inquiry.phone.trim().is_empty() {
        "Not provided"
    } else {
        inquiry.phone.trim()
    };
    let body = format!(
        "Project Inquiry Details:\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Project Type: {}\n\n\
         Description:\n{}\n\n\
         ---\n\
         This message was sent from the Antoni website contact form.",
        inquiry.full_name.trim(),
        inquiry.email.trim(),
        phone,
        inquiry.project_type,
        inquiry.description.trim(),
    );
    format!(
        "mailto:{}?subject={}&body={}",
        config::CONTACT_EMAIL,
        urlencoding::encode(subject),
        urlencoding::encode(&body),
    )
}

#[derive(Properties, PartialEq)]
pub struct ContactProps {
    #[prop_or(DESCRIPTION_MIN_DEFAULT)]
    pub description_min: usize,
    #[prop_or(DESCRIPTION_MAX_DEFAULT)]
    pub description_max: usize,
}

#[function_component(Contact)]
pub fn contact(props: &ContactProps) -> Html {
    let full_name = use_state(String::new);
    let email = use_state(String::new);
    let confirm_email = use_state(String::new);
    let phone = use_state(String::new);
    let project_type = use_state(String::new);
    let description = use_state(String::new);

    let full_name_error = use_state(|| None::<String>);
    let email_error_state = use_state(|| None::<String>);
    let confirm_error_state = use_state(|| None::<String>);
    let phone_error_state = use_state(|| None::<String>);
    let project_type_error = use_state(|| None::<String>);
    let description_error_state = use_state(|| None::<String>);

    let full_name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let confirm_ref = use_node_ref();
    let phone_ref = use_node_ref();
    let project_type_ref = use_node_ref();
    let description_ref = use_node_ref();

    let toast = use_state(|| None::<String>);
    let toast_timer = use_mut_ref(|| None::<Timeout>);
    let analytics = use_context::<Analytics>();

    let show_toast = {
        let toast = toast.clone();
        let toast_timer = toast_timer.clone();
        Rc::new(move |message: &str| {
            toast.set(Some(message.to_string()));
            let toast = toast.clone();
            *toast_timer.borrow_mut() = Some(Timeout::new(TOAST_LIFETIME_MS, move || {
                toast.set(None);
            }));
        })
    };

    let validate_full_name = {
        let full_name = full_name.clone();
        let error = full_name_error.clone();
        Rc::new(move || {
            let result = required_error("Full name", &full_name);
            error.set(result.clone());
            result.is_none()
        })
    };
    let validate_email = {
        let email = email.clone();
        let error = email_error_state.clone();
        Rc::new(move || {
            let result = required_error("Email", &email).or_else(|| email_error(&email));
            error.set(result.clone());
            result.is_none()
        })
    };
    let validate_confirm = {
        let email = email.clone();
        let confirm_email = confirm_email.clone();
        let error = confirm_error_state.clone();
        Rc::new(move || {
            let result = required_error("Confirm email", &confirm_email)
                .or_else(|| confirm_email_error(&email, &confirm_email));
            error.set(result.clone());
            result.is_none()
        })
    };
    let validate_phone = {
        let phone = phone.clone();
        let error = phone_error_state.clone();
        Rc::new(move || {
            let result = phone_error(&phone);
            error.set(result.clone());
            result.is_none()
        })
    };
    let validate_project_type = {
        let project_type = project_type.clone();
        let error = project_type_error.clone();
        Rc::new(move || {
            let result = required_error("Project type", &project_type);
            error.set(result.clone());
            result.is_none()
        })
    };
    let validate_description = {
        let description = description.clone();
        let error = description_error_state.clone();
        let min = props.description_min;
        let max = props.description_max;
        Rc::new(move || {
            let result = required_error("Project description", &description)
                .or_else(|| description_error(&description, min, max));
            error.set(result.clone());
            result.is_none()
        })
    };

    let on_submit = {
        let full_name = full_name.clone();
        let email = email.clone();
        let confirm_email = confirm_email.clone();
        let phone = phone.clone();
        let project_type = project_type.clone();
        let description = description.clone();
        let validators: Vec<(Rc<dyn Fn() -> bool>, NodeRef)> = vec![
            (validate_full_name.clone() as Rc<dyn Fn() -> bool>, full_name_ref.clone()),
            (validate_email.clone(), email_ref.clone()),
            (validate_confirm.clone(), confirm_ref.clone()),
            (validate_phone.clone(), phone_ref.clone()),
            (validate_project_type.clone(), project_type_ref.clone()),
            (validate_description.clone(), description_ref.clone()),
        ];
        let show_toast = show_toast.clone();
        let analytics = analytics.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let mut first_invalid = None;
            for (validate, field_ref) in &validators {
                if !validate() && first_invalid.is_none() {
                    first_invalid = Some(field_ref.clone());
                }
            }
            if let Some(field_ref) = first_invalid {
                if let Some(field) = field_ref.cast::<HtmlElement>() {
                    let _ = field.focus();
                }
                return;
            }

            let url = mailto_url(&Inquiry {
                full_name: &full_name,
                email: &email,
                phone: &phone,
                project_type: &project_type,
                description: &description,
            });
            if let Some(window) = web_sys::window() {
                if window.location().set_href(&url).is_err() {
                    gloo_console::error!("Failed to open the mail client");
                }
            }
            show_toast("Your email app will open to send the request.");
            if let Some(analytics) = &analytics {
                analytics.track_form_submit(
                    "contact_form",
                    json!({ "project_type": (*project_type).clone() }),
                );
            }

            full_name.set(String::new());
            email.set(String::new());
            confirm_email.set(String::new());
            phone.set(String::new());
            project_type.set(String::new());
            description.set(String::new());
        })
    };

    let on_phone_input = {
        let phone = phone.clone();
        let error = phone_error_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            phone.set(format_phone(&input.value()));
            error.set(None);
        })
    };
    let text_input = |state: &UseStateHandle<String>,
                      error: &UseStateHandle<Option<String>>|
     -> Callback<InputEvent> {
        let state = state.clone();
        let error = error.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            state.set(input.value());
            error.set(None);
        })
    };
    let on_description_input = {
        let description = description.clone();
        let error = description_error_state.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            description.set(input.value());
            error.set(None);
        })
    };
    let on_project_type_change = {
        let project_type = project_type.clone();
        let error = project_type_error.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            project_type.set(select.value());
            error.set(None);
        })
    };

    let blur = |validate: &Rc<dyn Fn() -> bool>| -> Callback<FocusEvent> {
        let validate = validate.clone();
        Callback::from(move |_: FocusEvent| {
            validate();
        })
    };

    let on_whatsapp_click = {
        let analytics = analytics.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(analytics) = &analytics {
                analytics.track_social("whatsapp", "click", Some("contact_section"));
            }
        })
    };
    let on_toast_close = {
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| toast.set(None))
    };

    let error_block = |name: &str, error: &Option<String>| -> Html {
        html! {
            <span
                id={format!("{}-error", name)}
                class={classes!("form-error", error.is_some().then(|| "show"))}
                role="alert"
            >
                { error.clone().unwrap_or_default() }
            </span>
        }
    };
    let aria_invalid = |error: &Option<String>| -> &'static str {
        if error.is_some() {
            "true"
        } else {
            "false"
        }
    };

    let validate_full_name_blur = blur(&(validate_full_name as Rc<dyn Fn() -> bool>));
    let validate_email_blur = blur(&(validate_email as Rc<dyn Fn() -> bool>));
    let validate_confirm_blur = blur(&(validate_confirm as Rc<dyn Fn() -> bool>));
    let validate_phone_blur = blur(&(validate_phone as Rc<dyn Fn() -> bool>));
    let validate_project_type_blur = blur(&(validate_project_type as Rc<dyn Fn() -> bool>));
    let validate_description_blur = blur(&(validate_description as Rc<dyn Fn() -> bool>));

    html! {
        <section id="contact" class="contact">
            <div class="section-container">
                <h2 class="section-title">{"Start Your Project"}</h2>
                <p class="section-intro">
                    {"Tell us about the home or community you want to build."}
                </p>
                <form id="contactForm" class="contact-form" novalidate=true onsubmit={on_submit}>
                    <div class="form-field">
                        <label for="fullName">{"Full name *"}</label>
                        <input
                            id="fullName"
                            name="fullName"
                            class="form-input"
                            type="text"
                            required=true
                            aria-required="true"
                            aria-invalid={aria_invalid(&full_name_error)}
                            ref={full_name_ref}
                            value={(*full_name).clone()}
                            oninput={text_input(&full_name, &full_name_error)}
                            onblur={validate_full_name_blur}
                        />
                        { error_block("fullName", &full_name_error) }
                    </div>
                    <div class="form-field">
                        <label for="email">{"Email *"}</label>
                        <input
                            id="email"
                            name="email"
                            class="form-input"
                            type="email"
                            required=true
                            aria-required="true"
                            aria-invalid={aria_invalid(&email_error_state)}
                            ref={email_ref}
                            value={(*email).clone()}
                            oninput={text_input(&email, &email_error_state)}
                            onblur={validate_email_blur}
                        />
                        { error_block("email", &email_error_state) }
                    </div>
                    <div class="form-field">
                        <label for="confirmEmail">{"Confirm email *"}</label>
                        <input
                            id="confirmEmail"
                            name="confirmEmail"
                            class="form-input"
                            type="email"
                            required=true
                            aria-required="true"
                            aria-invalid={aria_invalid(&confirm_error_state)}
                            ref={confirm_ref}
                            value={(*confirm_email).clone()}
                            oninput={text_input(&confirm_email, &confirm_error_state)}
                            onblur={validate_confirm_blur}
                        />
                        { error_block("confirmEmail", &confirm_error_state) }
                    </div>
                    <div class="form-field">
                        <label for="phone">{"Phone"}</label>
                        <input
                            id="phone"
                            name="phone"
                            class="form-input"
                            type="tel"
                            placeholder="(809) 555-0100"
                            aria-invalid={aria_invalid(&phone_error_state)}
                            ref={phone_ref}
                            value={(*phone).clone()}
                            oninput={on_phone_input}
                            onblur={validate_phone_blur}
                        />
                        { error_block("phone", &phone_error_state) }
                    </div>
                    <div class="form-field">
                        <label for="projectType">{"Project type *"}</label>
                        <select
                            id="projectType"
                            name="projectType"
                            class="form-select"
                            required=true
                            aria-required="true"
                            aria-invalid={aria_invalid(&project_type_error)}
                            ref={project_type_ref}
                            value={(*project_type).clone()}
                            onchange={on_project_type_change}
                            onblur={validate_project_type_blur}
                        >
                            <option value="" selected={project_type.is_empty()}>{"Select a project type"}</option>
                            <option value="residential">{"Residential"}</option>
                            <option value="commercial">{"Commercial"}</option>
                            <option value="custom-home">{"Custom home"}</option>
                            <option value="consulting">{"Consulting"}</option>
                        </select>
                        { error_block("projectType", &project_type_error) }
                    </div>
                    <div class="form-field">
                        <label for="description">{"Project description *"}</label>
                        <textarea
                            id="description"
                            name="description"
                            class="form-textarea"
                            rows="6"
                            required=true
                            aria-required="true"
                            aria-invalid={aria_invalid(&description_error_state)}
                            minlength={props.description_min.to_string()}
                            maxlength={props.description_max.to_string()}
                            ref={description_ref}
                            value={(*description).clone()}
                            oninput={on_description_input}
                            onblur={validate_description_blur}
                        >
                        </textarea>
                        { error_block("description", &description_error_state) }
                    </div>
                    <div class="form-actions">
                        <button class="btn btn-primary" type="submit">{"Send Message"}</button>
                        <a
                            class="btn btn-whatsapp"
                            href={config::WHATSAPP_URL}
                            target="_blank"
                            rel="noopener"
                            onclick={on_whatsapp_click}
                        >
                            {"Chat on WhatsApp"}
                        </a>
                    </div>
                </form>
            </div>
            {
                match &*toast {
                    Some(message) => html! {
                        <div id="toast" class="toast show" role="status">
                            <span class="toast-message">{message.clone()}</span>
                            <button class="toast-close" aria-label="Dismiss" onclick={on_toast_close}>
                                {"×"}
                            </button>
                        </div>
                    },
                    None => html! {},
                }
            }
            <style>
                {r#"
                .contact {
                    padding: 6rem 0;
                    background: var(--bg-primary);
                }

                .contact-form {
                    max-width: 640px;
                    margin: 3rem auto 0;
                    display: flex;
                    flex-direction: column;
                    gap: 1.25rem;
                }

                .form-field {
                    display: flex;
                    flex-direction: column;
                    gap: 0.4rem;
                }

                .form-field label {
                    font-weight: 500;
                    color: var(--text-primary);
                }

                .form-input,
                .form-select,
                .form-textarea {
                    padding: 0.75rem 1rem;
                    border: 1px solid var(--border);
                    border-radius: 8px;
                    font: inherit;
                    transition: border-color var(--transition-fast);
                }

                .form-input:focus,
                .form-select:focus,
                .form-textarea:focus {
                    outline: none;
                    border-color: var(--accent);
                }

                [aria-invalid="true"] {
                    border-color: #dc2626;
                }

                .form-error {
                    color: #dc2626;
                    font-size: 0.85rem;
                    min-height: 1.2em;
                    visibility: hidden;
                }

                .form-error.show {
                    visibility: visible;
                }

                .form-actions {
                    display: flex;
                    gap: 1rem;
                    flex-wrap: wrap;
                }

                .btn-whatsapp {
                    background: #25d366;
                    color: #ffffff;
                }

                .toast {
                    position: fixed;
                    bottom: 2rem;
                    left: 50%;
                    transform: translateX(-50%);
                    z-index: 300;
                    display: flex;
                    align-items: center;
                    gap: 1rem;
                    background: var(--text-primary);
                    color: #ffffff;
                    padding: 0.9rem 1.25rem;
                    border-radius: 8px;
                    box-shadow: 0 10px 25px rgb(0 0 0 / 0.2);
                }

                .toast-close {
                    background: none;
                    border: none;
                    color: inherit;
                    font-size: 1.25rem;
                    cursor: pointer;
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
    fn phone_mask_formats_progressively() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("1"), "(1");
        assert_eq!(format_phone("12"), "(12");
        assert_eq!(format_phone("123"), "(123) ");
        assert_eq!(format_phone("12345"), "(123) 45");
        assert_eq!(format_phone("123456"), "(123) 456-");
        assert_eq!(format_phone("123456789"), "(123) 456-789");
        assert_eq!(format_phone("1234567890"), "(123) 456-7890");
    }

    #[test]
    fn phone_mask_truncates_and_strips() {
        assert_eq!(format_phone("12345678901234"), "(123) 456-7890");
        assert_eq!(format_phone("(123) 456-7890 ext 2"), "(123) 456-7890");
        assert_eq!(format_phone("abc-123.456 7890"), "(123) 456-7890");
    }

    #[test]
    fn email_rule() {
        assert_eq!(email_error("a@b.com"), None);
        assert!(email_error("a@b").is_some());
        assert!(email_error("a b@c.com").is_some());
        assert!(email_error("@b.com").is_some());
        // Emptiness is the required rule's business.
        assert_eq!(email_error(""), None);
    }

    #[test]
    fn confirm_must_match_trimmed_email() {
        assert_eq!(confirm_email_error(" a@b.com ", "a@b.com"), None);
        assert!(confirm_email_error("a@b.com", "b@b.com").is_some());
    }

    #[test]
    fn phone_rule_accepts_only_the_mask() {
        assert_eq!(phone_error(""), None);
        assert_eq!(phone_error("(809) 555-0142"), None);
        assert!(phone_error("809-555-0142").is_some());
        assert!(phone_error("(809)555-0142").is_some());
    }

    #[test]
    fn description_length_window() {
        let min = DESCRIPTION_MIN_DEFAULT;
        let max = DESCRIPTION_MAX_DEFAULT;
        assert!(description_error(&"x".repeat(279), min, max).is_some());
        assert_eq!(description_error(&"x".repeat(280), min, max), None);
        assert_eq!(description_error(&"x".repeat(1000), min, max), None);
        assert!(description_error(&"x".repeat(1001), min, max).is_some());
    }

    #[test]
    fn description_window_is_overridable() {
        assert_eq!(description_error("short", 3, 10), None);
        assert!(description_error("far too long for this window", 3, 10).is_some());
    }

    #[test]
    fn required_rule_rejects_whitespace() {
        assert!(required_error("Full name", "   ").is_some());
        assert_eq!(required_error("Full name", "Ana"), None);
    }

    #[test]
    fn mailto_url_is_encoded() {
        let url = mailto_url(&Inquiry {
            full_name: "Ana Castillo",
            email: "ana@example.com",
            phone: "",
            project_type: "residential",
            description: "A house by the sea & a garden.",
        });
        assert!(url.starts_with("mailto:info@grupoantoni.com?subject="));
        assert!(url.contains("New%20project%20inquiry"));
        assert!(url.contains("Not%20provided"));
        assert!(url.contains("%26%20a%20garden"));
        assert!(!url.contains(' '));
    }

    #[test]
    fn mailto_includes_phone_when_given() {
        let url = mailto_url(&Inquiry {
            full_name: "Ana",
            email: "ana@example.com",
            phone: "(809) 555-0142",
            project_type: "consulting",
            description: "d",
        });
        assert!(url.contains(&urlencoding::encode("(809) 555-0142").into_owned()));
        assert!(!url.contains("Not%20provided"));
    }
}
