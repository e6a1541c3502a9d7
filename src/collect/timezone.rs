//! Timezone resolution via `Intl` and `Date`

use js_sys::{Array, Date, Intl, Object, Reflect};
use wasm_bindgen::JsValue;

use crate::record::TimezoneRecord;

pub fn collect() -> TimezoneRecord {
    let resolved = Intl::DateTimeFormat::new(&Array::new(), &Object::new()).resolved_options();
    let timezone = Reflect::get(&resolved, &JsValue::from_str("timeZone"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| "unknown".to_string());

    TimezoneRecord {
        timezone,
        // minutes behind UTC, sign matching Date#getTimezoneOffset
        timezone_offset: Date::new_0().get_timezone_offset() as i32,
    }
}
