//! IP-geolocation lookup
//!
//! One outbound GET to a third-party service, no auth, no retries. Any
//! non-success status or transport failure degrades to the error record.

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, RequestMode, Response};

use crate::record::{LocationRecord, LocationSignal};

pub const DEFAULT_GEO_ENDPOINT: &str = "https://ipapi.co/json/";

pub async fn collect(endpoint: &str) -> LocationSignal {
    match fetch_geo(endpoint).await {
        Ok(record) => LocationSignal::Known(record),
        Err(err) => {
            log::debug!("geolocation lookup failed: {:?}", err);
            LocationSignal::unavailable()
        }
    }
}

async fn fetch_geo(endpoint: &str) -> Result<LocationRecord, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(endpoint, &opts)?;
    request.headers().set("Accept", "application/json")?;

    let window = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await?
        .dyn_into()
        .map_err(|_| JsValue::from_str("response is not a Response"))?;

    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "geolocation service returned {}",
            resp.status()
        )));
    }

    let text = JsFuture::from(resp.text()?)
        .await?
        .as_string()
        .ok_or_else(|| JsValue::from_str("response body is not text"))?;

    serde_json::from_str(&text)
        .map_err(|e| JsValue::from_str(&format!("geolocation parse failed: {}", e)))
}
