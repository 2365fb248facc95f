use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, HtmlImageElement};

const TRANSITION_FAST: &str = "150ms ease-in-out";
const TRANSITION_NORMAL: &str = "300ms ease-in-out";
const TRANSITION_SLOW: &str = "500ms ease-in-out";

/// Averages the logo's opaque pixels and promotes the result to the
/// `--accent` / `--accent-contrast` CSS variables. Any failure along the
/// way leaves the stylesheet fallback colors in place.
pub fn init_accent_from_logo(logo_url: &str) {
    let image = match HtmlImageElement::new() {
        Ok(image) => image,
        Err(_) => return,
    };
    image.set_cross_origin(Some("anonymous"));

    let loaded = image.clone();
    let on_load = Closure::wrap(Box::new(move || match extract_accent(&loaded) {
        Some((hex, contrast)) => {
            set_css_variable("--accent", &hex);
            set_css_variable("--accent-contrast", contrast);
            debug!("logo accent extracted: {}", hex);
        }
        None => warn!("could not extract logo accent, using fallback colors"),
    }) as Box<dyn FnMut()>);
    let on_error = Closure::wrap(Box::new(move || {
        warn!("logo image failed to load, using fallback colors");
    }) as Box<dyn FnMut()>);

    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(logo_url);

    // One-shot load callbacks, kept alive for the page lifetime.
    on_load.forget();
    on_error.forget();
}

pub fn prefers_reduced_motion() -> bool {
    web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
        .map(|query| query.matches())
        .unwrap_or(false)
}

/// Applies the reduced-motion transition variables now and again whenever
/// the media query flips. Registered once from the app root.
pub fn watch_reduced_motion() {
    apply_motion_preference(prefers_reduced_motion());

    let query = match web_sys::window()
        .and_then(|w| w.match_media("(prefers-reduced-motion: reduce)").ok())
        .flatten()
    {
        Some(query) => query,
        None => return,
    };

    let on_change = Closure::wrap(Box::new(move |_: web_sys::Event| {
        apply_motion_preference(prefers_reduced_motion());
    }) as Box<dyn FnMut(web_sys::Event)>);
    if query
        .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
        .is_ok()
    {
        // The app root never unmounts, so the listener lives forever.
        on_change.forget();
    }
}

fn apply_motion_preference(reduced: bool) {
    if reduced {
        set_css_variable("--transition-fast", "0ms");
        set_css_variable("--transition-normal", "0ms");
        set_css_variable("--transition-slow", "0ms");
    } else {
        set_css_variable("--transition-fast", TRANSITION_FAST);
        set_css_variable("--transition-normal", TRANSITION_NORMAL);
        set_css_variable("--transition-slow", TRANSITION_SLOW);
    }
}

fn set_css_variable(name: &str, value: &str) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|e| e.dyn_into::<HtmlElement>().ok());
    if let Some(root) = root {
        let _ = root.style().set_property(name, value);
    }
}

fn extract_accent(image: &HtmlImageElement) -> Option<(String, &'static str)> {
    let document = web_sys::window()?.document()?;
    let canvas: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
    canvas.set_width(image.natural_width());
    canvas.set_height(image.natural_height());

    let context: CanvasRenderingContext2d =
        canvas.get_context("2d").ok()??.dyn_into().ok()?;
    context
        .draw_image_with_html_image_element(image, 0.0, 0.0)
        .ok()?;
    let image_data = context
        .get_image_data(0.0, 0.0, canvas.width() as f64, canvas.height() as f64)
        .ok()?;
    let data = image_data.data();

    let samples = sample_pixels(&data);
    let (r, g, b) = average_color(&samples)?;
    Some((rgb_to_hex(r, g, b), contrast_color(r, g, b)))
}

/// Samples roughly 100 evenly-spaced pixels, skipping transparent ones.
fn sample_pixels(rgba: &[u8]) -> Vec<(u8, u8, u8)> {
    let pixel_count = rgba.len() / 4;
    if pixel_count == 0 {
        return Vec::new();
    }
    let step = (pixel_count / 100).max(1);

    let mut samples = Vec::new();
    let mut index = 0;
    while index + 3 < rgba.len() {
        let alpha = rgba[index + 3];
        if alpha > 128 {
            samples.push((rgba[index], rgba[index + 1], rgba[index + 2]));
        }
        index += step * 4;
    }
    samples
}

fn average_color(samples: &[(u8, u8, u8)]) -> Option<(u8, u8, u8)> {
    if samples.is_empty() {
        return None;
    }
    let count = samples.len() as u32;
    let (sum_r, sum_g, sum_b) = samples.iter().fold((0u32, 0u32, 0u32), |acc, &(r, g, b)| {
        (acc.0 + r as u32, acc.1 + g as u32, acc.2 + b as u32)
    });
    Some((
        ((sum_r + count / 2) / count) as u8,
        ((sum_g + count / 2) / count) as u8,
        ((sum_b + count / 2) / count) as u8,
    ))
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Black on light accents, white on dark ones.
pub fn contrast_color(r: u8, g: u8, b: u8) -> &'static str {
    let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
    if luminance > 0.5 {
        "#000000"
    } else {
        "#ffffff"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_is_zero_padded() {
        assert_eq!(rgb_to_hex(0, 0, 0), "#000000");
        assert_eq!(rgb_to_hex(1, 2, 3), "#010203");
        assert_eq!(rgb_to_hex(255, 255, 255), "#ffffff");
        assert_eq!(rgb_to_hex(180, 140, 16), "#b48c10");
    }

    #[test]
    fn contrast_flips_at_mid_luminance() {
        assert_eq!(contrast_color(255, 255, 255), "#000000");
        assert_eq!(contrast_color(0, 0, 0), "#ffffff");
        // Pure green is bright enough for black text, pure blue is not.
        assert_eq!(contrast_color(0, 255, 0), "#000000");
        assert_eq!(contrast_color(0, 0, 255), "#ffffff");
    }

    #[test]
    fn transparent_pixels_are_skipped() {
        // Two pixels: one opaque red, one fully transparent.
        let rgba = [255, 0, 0, 255, 0, 255, 0, 0];
        assert_eq!(sample_pixels(&rgba), vec![(255, 0, 0)]);
    }

    #[test]
    fn average_of_no_samples_is_none() {
        assert_eq!(average_color(&[]), None);
        assert_eq!(sample_pixels(&[]), Vec::new());
    }

    #[test]
    fn average_rounds_to_nearest() {
        let samples = [(0, 0, 0), (255, 255, 255)];
        assert_eq!(average_color(&samples), Some((128, 128, 128)));
    }
}
