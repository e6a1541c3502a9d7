//! Structural navigator reads

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::record::BrowserRecord;

pub fn collect() -> BrowserRecord {
    let Some(window) = window() else {
        return fallback();
    };
    let navigator = window.navigator();

    // doNotTrack is deprecated and not surfaced by web-sys; read it the
    // same way the platform would, through Reflect.
    let do_not_track = Reflect::get(navigator.as_ref(), &JsValue::from_str("doNotTrack"))
        .ok()
        .and_then(|v| v.as_string());

    // cookieEnabled is not surfaced by web-sys; read it through Reflect,
    // the same way doNotTrack is read above.
    let cookie_enabled = Reflect::get(navigator.as_ref(), &JsValue::from_str("cookieEnabled"))
        .ok()
        .and_then(|v| v.as_bool())
        .unwrap_or(false);

    BrowserRecord {
        user_agent: navigator
            .user_agent()
            .unwrap_or_else(|_| "unknown".to_string()),
        language: navigator.language().unwrap_or_else(|| "unknown".to_string()),
        languages: navigator
            .languages()
            .iter()
            .filter_map(|v| v.as_string())
            .collect(),
        platform: navigator
            .platform()
            .unwrap_or_else(|_| "unknown".to_string()),
        cookie_enabled,
        do_not_track,
    }
}

fn fallback() -> BrowserRecord {
    BrowserRecord {
        user_agent: "unknown".to_string(),
        language: "unknown".to_string(),
        languages: Vec::new(),
        platform: "unknown".to_string(),
        cookie_enabled: false,
        do_not_track: None,
    }
}
