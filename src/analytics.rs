use std::cell::Cell;
use std::rc::Rc;

use log::{debug, info, warn};
use serde_json::{json, Value};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use web_sys::js_sys::{Function, Reflect};
use web_sys::HtmlScriptElement;

use crate::config::AnalyticsSettings;

/// Loads the configured tag scripts once and forwards events to whatever
/// of `window.gtag` / `window.fbq` ended up existing. Every call is
/// fire-and-forget; a missing provider is skipped without comment.
#[derive(Clone)]
pub struct Analytics {
    settings: Rc<AnalyticsSettings>,
    initialized: Rc<Cell<bool>>,
}

impl PartialEq for Analytics {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.initialized, &other.initialized)
    }
}

impl Analytics {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self {
            settings: Rc::new(settings),
            initialized: Rc::new(Cell::new(false)),
        }
    }

    /// Injects the provider scripts for every configured id. Safe to call
    /// more than once; only the first call does anything.
    pub fn init(&self) {
        if self.initialized.get() {
            return;
        }
        self.initialized.set(true);

        match &self.settings.ga_measurement_id {
            Some(id) => {
                if inject_google_analytics(id).is_some() {
                    info!("Google Analytics loaded: {}", id);
                } else {
                    warn!("Google Analytics script could not be injected");
                }
            }
            None => debug!("Google Analytics: no measurement id provided"),
        }

        match &self.settings.pixel_id {
            Some(id) => {
                if inject_facebook_pixel(id).is_some() {
                    info!("Facebook Pixel loaded: {}", id);
                } else {
                    warn!("Facebook Pixel script could not be injected");
                }
            }
            None => debug!("Facebook Pixel: no pixel id provided"),
        }

        match &self.settings.clarity_id {
            Some(id) => {
                if inject_microsoft_clarity(id).is_some() {
                    info!("Microsoft Clarity loaded: {}", id);
                } else {
                    warn!("Microsoft Clarity script could not be injected");
                }
            }
            None => debug!("Microsoft Clarity: no clarity id provided"),
        }
    }

    pub fn track_event(&self, event_name: &str, params: Value) {
        self.send(event_name, &params);
    }

    pub fn track_page_view(&self, page_name: Option<&str>, page_path: Option<&str>) {
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let title = page_name
            .map(str::to_string)
            .or_else(|| window.document().map(|d| d.title()))
            .unwrap_or_default();
        let location = page_path
            .map(str::to_string)
            .or_else(|| window.location().href().ok())
            .unwrap_or_default();
        let path = page_path
            .map(str::to_string)
            .or_else(|| window.location().pathname().ok())
            .unwrap_or_default();

        let params = page_view_params(&title, &location, &path);
        debug!("page view tracked: {}", params);

        if let Some(id) = &self.settings.ga_measurement_id {
            if let (Some(gtag), Ok(params_js)) = (
                global_function(&window, "gtag"),
                serde_wasm_bindgen::to_value(&params),
            ) {
                let _ = gtag.call3(
                    &JsValue::NULL,
                    &JsValue::from_str("config"),
                    &JsValue::from_str(id),
                    &params_js,
                );
            }
        }
        if let Some(fbq) = global_function(&window, "fbq") {
            let _ = fbq.call2(
                &JsValue::NULL,
                &JsValue::from_str("track"),
                &JsValue::from_str("PageView"),
            );
        }
    }

    pub fn track_form_submit(&self, form_name: &str, details: Value) {
        self.send("form_submit", &form_submit_params(form_name, &details));
    }

    pub fn track_button_click(&self, button_name: &str, button_location: &str) {
        self.send("button_click", &button_click_params(button_name, button_location));
    }

    pub fn track_link_click(&self, link_text: &str, link_url: &str, link_location: &str) {
        self.send("link_click", &link_click_params(link_text, link_url, link_location));
    }

    pub fn track_scroll_depth(&self, depth_percent: u32) {
        self.send("scroll", &scroll_depth_params(depth_percent));
    }

    pub fn track_time_on_page(&self, seconds: u64) {
        self.send("time_on_page", &time_on_page_params(seconds));
    }

    pub fn track_video(&self, video_title: &str, action: &str, progress: Option<u32>) {
        self.send("video_interaction", &video_params(video_title, action, progress));
    }

    pub fn track_file_download(&self, file_name: &str, file_type: &str) {
        self.send("file_download", &file_download_params(file_name, file_type));
    }

    pub fn track_social(&self, platform: &str, action: &str, content: Option<&str>) {
        self.send("social_interaction", &social_params(platform, action, content));
    }

    pub fn track_error(&self, message: &str, location: &str) {
        self.send("error", &error_params(message, location));
    }

    pub fn track_conversion(&self, conversion_name: &str, value: Option<f64>) {
        self.send(conversion_name, &conversion_params(conversion_name, value));
    }

    fn send(&self, event_name: &str, params: &Value) {
        debug!("event tracked: {} {}", event_name, params);
        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let params_js = match serde_wasm_bindgen::to_value(params) {
            Ok(v) => v,
            Err(_) => return,
        };
        if let Some(gtag) = global_function(&window, "gtag") {
            let _ = gtag.call3(
                &JsValue::NULL,
                &JsValue::from_str("event"),
                &JsValue::from_str(event_name),
                &params_js,
            );
        }
        if let Some(fbq) = global_function(&window, "fbq") {
            let _ = fbq.call3(
                &JsValue::NULL,
                &JsValue::from_str("track"),
                &JsValue::from_str(event_name),
                &params_js,
            );
        }
    }
}

fn global_function(window: &web_sys::Window, name: &str) -> Option<Function> {
    Reflect::get(window.as_ref(), &JsValue::from_str(name))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn page_view_params(title: &str, location: &str, path: &str) -> Value {
    json!({
        "page_title": title,
        "page_location": location,
        "page_path": path,
    })
}

fn form_submit_params(form_name: &str, details: &Value) -> Value {
    let mut params = json!({
        "event_category": "form",
        "event_label": form_name,
        "form_name": form_name,
    });
    if let (Some(map), Some(extra)) = (params.as_object_mut(), details.as_object()) {
        for (key, value) in extra {
            map.insert(key.clone(), value.clone());
        }
    }
    params
}

fn button_click_params(button_name: &str, button_location: &str) -> Value {
    json!({
        "event_category": "engagement",
        "event_label": button_name,
        "button_name": button_name,
        "button_location": button_location,
    })
}

fn link_click_params(link_text: &str, link_url: &str, link_location: &str) -> Value {
    json!({
        "event_category": "engagement",
        "event_label": link_text,
        "link_text": link_text,
        "link_url": link_url,
        "link_location": link_location,
    })
}

fn scroll_depth_params(depth_percent: u32) -> Value {
    json!({
        "event_category": "engagement",
        "event_label": "scroll_depth",
        "scroll_depth": depth_percent,
    })
}

fn time_on_page_params(seconds: u64) -> Value {
    json!({
        "event_category": "engagement",
        "event_label": "time_on_page",
        "time_on_page": seconds,
    })
}

fn video_params(video_title: &str, action: &str, progress: Option<u32>) -> Value {
    let mut params = json!({
        "event_category": "video",
        "event_label": video_title,
        "video_title": video_title,
        "video_action": action,
    });
    if let (Some(map), Some(progress)) = (params.as_object_mut(), progress) {
        map.insert("video_progress".into(), progress.into());
    }
    params
}

fn file_download_params(file_name: &str, file_type: &str) -> Value {
    json!({
        "event_category": "download",
        "event_label": file_name,
        "file_name": file_name,
        "file_type": file_type,
    })
}

fn social_params(platform: &str, action: &str, content: Option<&str>) -> Value {
    let mut params = json!({
        "event_category": "social",
        "event_label": platform,
        "social_platform": platform,
        "social_action": action,
    });
    if let (Some(map), Some(content)) = (params.as_object_mut(), content) {
        map.insert("social_content".into(), content.into());
    }
    params
}

fn error_params(message: &str, location: &str) -> Value {
    json!({
        "event_category": "error",
        "event_label": message,
        "error_message": message,
        "error_location": location,
    })
}

fn conversion_params(conversion_name: &str, value: Option<f64>) -> Value {
    let mut params = json!({
        "event_category": "conversion",
        "event_label": conversion_name,
    });
    if let (Some(map), Some(value)) = (params.as_object_mut(), value) {
        map.insert("value".into(), value.into());
        map.insert("currency".into(), "USD".into());
    }
    params
}

fn inject_google_analytics(measurement_id: &str) -> Option<()> {
    let document = web_sys::window()?.document()?;
    let head = document.head()?;

    let loader: HtmlScriptElement = document.create_element("script").ok()?.dyn_into().ok()?;
    loader.set_async(true);
    loader.set_src(&format!(
        "https://www.googletagmanager.com/gtag/js?id={}",
        measurement_id
    ));
    head.append_child(&loader).ok()?;

    let bootstrap: HtmlScriptElement = document.create_element("script").ok()?.dyn_into().ok()?;
    bootstrap
        .set_text(&format!(
            "window.dataLayer = window.dataLayer || [];\n\
             function gtag() {{ dataLayer.push(arguments); }}\n\
             window.gtag = gtag;\n\
             gtag('js', new Date());\n\
             gtag('config', '{id}', {{ page_title: document.title, page_location: window.location.href }});",
            id = measurement_id
        ))
        .ok()?;
    head.append_child(&bootstrap).ok()?;
    Some(())
}

fn inject_facebook_pixel(pixel_id: &str) -> Option<()> {
    let document = web_sys::window()?.document()?;
    let head = document.head()?;

    let script: HtmlScriptElement = document.create_element("script").ok()?.dyn_into().ok()?;
    script
        .set_text(&format!(
            "!function(f,b,e,v,n,t,s)\n\
             {{if(f.fbq)return;n=f.fbq=function(){{n.callMethod?\n\
             n.callMethod.apply(n,arguments):n.queue.push(arguments)}};\n\
             if(!f._fbq)f._fbq=n;n.push=n;n.loaded=!0;n.version='2.0';\n\
             n.queue=[];t=b.createElement(e);t.async=!0;\n\
             t.src=v;s=b.getElementsByTagName(e)[0];\n\
             s.parentNode.insertBefore(t,s)}}(window, document,'script',\n\
             'https://connect.facebook.net/en_US/fbevents.js');\n\
             fbq('init', '{id}');\n\
             fbq('track', 'PageView');",
            id = pixel_id
        ))
        .ok()?;
    head.append_child(&script).ok()?;
    Some(())
}

fn inject_microsoft_clarity(clarity_id: &str) -> Option<()> {
    let document = web_sys::window()?.document()?;
    let head = document.head()?;

    let script: HtmlScriptElement = document.create_element("script").ok()?.dyn_into().ok()?;
    script
        .set_text(&format!(
            "(function(c,l,a,r,i,t,y){{\n\
             c[a]=c[a]||function(){{(c[a].q=c[a].q||[]).push(arguments)}};\n\
             t=l.createElement(r);t.async=1;t.src=\"https://www.clarity.ms/tag/\"+i;\n\
             y=l.getElementsByTagName(r)[0];y.parentNode.insertBefore(t,y);\n\
             }})(window, document, \"clarity\", \"script\", \"{id}\");",
            id = clarity_id
        ))
        .ok()?;
    head.append_child(&script).ok()?;
    Some(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn form_submit_merges_details() {
        let params = form_submit_params("contact_form", &json!({ "project_type": "villa" }));
        assert_eq!(
            params,
            json!({
                "event_category": "form",
                "event_label": "contact_form",
                "form_name": "contact_form",
                "project_type": "villa",
            })
        );
    }

    #[test]
    fn button_click_shape() {
        assert_eq!(
            button_click_params("hero_cta", "hero"),
            json!({
                "event_category": "engagement",
                "event_label": "hero_cta",
                "button_name": "hero_cta",
                "button_location": "hero",
            })
        );
    }

    #[test]
    fn link_click_shape() {
        assert_eq!(
            link_click_params("CEMEX", "https://www.cemex.com", "brand_marquee"),
            json!({
                "event_category": "engagement",
                "event_label": "CEMEX",
                "link_text": "CEMEX",
                "link_url": "https://www.cemex.com",
                "link_location": "brand_marquee",
            })
        );
    }

    #[test]
    fn scroll_and_time_shapes() {
        assert_eq!(
            scroll_depth_params(75),
            json!({
                "event_category": "engagement",
                "event_label": "scroll_depth",
                "scroll_depth": 75,
            })
        );
        assert_eq!(
            time_on_page_params(30),
            json!({
                "event_category": "engagement",
                "event_label": "time_on_page",
                "time_on_page": 30,
            })
        );
    }

    #[test]
    fn video_progress_is_optional() {
        assert_eq!(
            video_params("tour", "play", None),
            json!({
                "event_category": "video",
                "event_label": "tour",
                "video_title": "tour",
                "video_action": "play",
            })
        );
        let with_progress = video_params("tour", "progress", Some(50));
        assert_eq!(with_progress["video_progress"], json!(50));
    }

    #[test]
    fn file_download_shape() {
        assert_eq!(
            file_download_params("brochure.pdf", "pdf"),
            json!({
                "event_category": "download",
                "event_label": "brochure.pdf",
                "file_name": "brochure.pdf",
                "file_type": "pdf",
            })
        );
    }

    #[test]
    fn social_content_is_optional() {
        assert_eq!(
            social_params("whatsapp", "click", None),
            json!({
                "event_category": "social",
                "event_label": "whatsapp",
                "social_platform": "whatsapp",
                "social_action": "click",
            })
        );
        let with_content = social_params("whatsapp", "click", Some("contact_section"));
        assert_eq!(with_content["social_content"], json!("contact_section"));
    }

    #[test]
    fn error_shape() {
        assert_eq!(
            error_params("mailto failed", "contact_form"),
            json!({
                "event_category": "error",
                "event_label": "mailto failed",
                "error_message": "mailto failed",
                "error_location": "contact_form",
            })
        );
    }

    #[test]
    fn conversion_value_brings_currency() {
        let bare = conversion_params("contact_inquiry", None);
        assert_eq!(
            bare,
            json!({
                "event_category": "conversion",
                "event_label": "contact_inquiry",
            })
        );
        let valued = conversion_params("contact_inquiry", Some(100.0));
        assert_eq!(valued["value"], json!(100.0));
        assert_eq!(valued["currency"], json!("USD"));
    }

    #[test]
    fn page_view_shape() {
        assert_eq!(
            page_view_params("Antoni", "https://grupoantoni.com/", "/"),
            json!({
                "page_title": "Antoni",
                "page_location": "https://grupoantoni.com/",
                "page_path": "/",
            })
        );
    }
}
