use wasm_bindgen::JsValue;
use web_sys::js_sys::Reflect;

pub const CONTACT_EMAIL: &str = "info@grupoantoni.com";
pub const CONTACT_PHONE: &str = "(809) 555-0142";
pub const WHATSAPP_URL: &str = "https://wa.me/18095550142";

#[cfg(debug_assertions)]
pub fn log_level() -> log::Level {
    log::Level::Info  // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> log::Level {
    log::Level::Warn
}

/// Tag ids injected by the hosting page as `window.__ANALYTICS__`.
/// Every field is optional; a provider with no id is simply never loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnalyticsSettings {
    pub ga_measurement_id: Option<String>,
    pub pixel_id: Option<String>,
    pub clarity_id: Option<String>,
}

impl AnalyticsSettings {
    pub fn load() -> Self {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return Self::default(),
        };
        let settings = match Reflect::get(window.as_ref(), &JsValue::from_str("__ANALYTICS__")) {
            Ok(v) if !v.is_undefined() && !v.is_null() => v,
            _ => return Self::default(),
        };
        Self {
            ga_measurement_id: string_field(&settings, "GA_MEASUREMENT_ID"),
            pixel_id: string_field(&settings, "PIXEL_ID"),
            clarity_id: string_field(&settings, "CLARITY_ID"),
        }
    }
}

fn string_field(object: &JsValue, key: &str) -> Option<String> {
    Reflect::get(object, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
}
