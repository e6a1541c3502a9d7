//! WebGL descriptor probe
//!
//! Requests a best-available WebGL context and reads the fixed,
//! implementation-defined descriptor strings.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, HtmlCanvasElement, WebGlRenderingContext};

use crate::record::{GraphicsRecord, Signal, WEBGL_ERROR, WEBGL_NOT_SUPPORTED};

pub fn collect() -> Signal<GraphicsRecord> {
    match probe() {
        Ok(Some(record)) => Signal::Ok(record),
        Ok(None) => Signal::Unavailable(WEBGL_NOT_SUPPORTED),
        Err(err) => {
            log::debug!("webgl probe failed: {:?}", err);
            Signal::Unavailable(WEBGL_ERROR)
        }
    }
}

fn probe() -> Result<Option<GraphicsRecord>, JsValue> {
    let Some(document) = window().and_then(|w| w.document()) else {
        return Ok(None);
    };
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")?
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a canvas element"))?;

    let ctx = match canvas.get_context("webgl")? {
        Some(ctx) => ctx,
        None => match canvas.get_context("experimental-webgl")? {
            Some(ctx) => ctx,
            None => return Ok(None),
        },
    };
    let gl: WebGlRenderingContext = ctx
        .dyn_into()
        .map_err(|_| JsValue::from_str("not a webgl context"))?;

    let param = |name: u32| gl.get_parameter(name).ok().and_then(|v| v.as_string());

    Ok(Some(GraphicsRecord {
        vendor: param(WebGlRenderingContext::VENDOR).unwrap_or_else(|| "unknown".to_string()),
        renderer: param(WebGlRenderingContext::RENDERER)
            .unwrap_or_else(|| "unknown".to_string()),
        version: param(WebGlRenderingContext::VERSION),
        shading_language_version: param(WebGlRenderingContext::SHADING_LANGUAGE_VERSION),
    }))
}
