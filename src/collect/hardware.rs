//! Hardware descriptor reads

use js_sys::Reflect;
use wasm_bindgen::JsValue;
use web_sys::window;

use crate::record::{HardwareRecord, Metric};

pub fn collect() -> HardwareRecord {
    let Some(window) = window() else {
        return HardwareRecord {
            hardware_concurrency: Metric::UNKNOWN,
            device_memory: Metric::UNKNOWN,
            max_touch_points: 0,
        };
    };
    let navigator = window.navigator();

    let cores = navigator.hardware_concurrency();
    let hardware_concurrency = if cores.is_finite() && cores > 0.0 {
        Metric::Count(cores as u64)
    } else {
        Metric::UNKNOWN
    };

    // deviceMemory is not in every browser and not surfaced by web-sys
    let device_memory = Reflect::get(navigator.as_ref(), &JsValue::from_str("deviceMemory"))
        .ok()
        .and_then(|v| v.as_f64())
        .filter(|gib| *gib > 0.0)
        .map(Metric::Amount)
        .unwrap_or(Metric::UNKNOWN);

    HardwareRecord {
        hardware_concurrency,
        device_memory,
        max_touch_points: navigator.max_touch_points(),
    }
}
