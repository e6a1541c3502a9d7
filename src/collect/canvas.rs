//! Canvas raster probe
//!
//! Draws a fixed scene onto a fixed-size offscreen canvas and returns the
//! platform's encoded raster. The drawing program is deterministic; the
//! encoded output differs across rendering stacks, and that divergence is
//! the signal.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::record::{Signal, CANVAS_ERROR, CANVAS_NOT_SUPPORTED};

const WIDTH: u32 = 200;
const HEIGHT: u32 = 50;
const SAMPLE_TEXT: &str = "Fingerprint test";

pub fn collect() -> Signal<String> {
    let Some(surface) = acquire() else {
        return Signal::Unavailable(CANVAS_NOT_SUPPORTED);
    };
    match draw(&surface) {
        Ok(data_url) => Signal::Ok(data_url),
        Err(err) => {
            log::debug!("canvas draw failed: {:?}", err);
            Signal::Unavailable(CANVAS_ERROR)
        }
    }
}

fn acquire() -> Option<(HtmlCanvasElement, CanvasRenderingContext2d)> {
    let document = window()?.document()?;
    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .ok()?
        .dyn_into()
        .ok()?;
    canvas.set_width(WIDTH);
    canvas.set_height(HEIGHT);
    let ctx: CanvasRenderingContext2d = canvas.get_context("2d").ok()??.dyn_into().ok()?;
    Some((canvas, ctx))
}

fn draw(
    (canvas, ctx): &(HtmlCanvasElement, CanvasRenderingContext2d),
) -> Result<String, JsValue> {
    ctx.set_text_baseline("top");
    ctx.set_font("14px Arial");
    ctx.set_text_baseline("alphabetic");
    ctx.set_fill_style_str("#f60");
    ctx.fill_rect(125.0, 1.0, 62.0, 20.0);
    ctx.set_fill_style_str("#069");
    ctx.fill_text(SAMPLE_TEXT, 2.0, 15.0)?;
    ctx.set_fill_style_str("rgba(102, 204, 0, 0.7)");
    ctx.fill_text(SAMPLE_TEXT, 4.0, 17.0)?;

    canvas.to_data_url()
}
