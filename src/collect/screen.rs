//! Screen geometry reads

use web_sys::window;

use crate::record::ScreenRecord;

pub fn collect() -> ScreenRecord {
    let screen = window().and_then(|w| w.screen().ok());
    match screen {
        Some(screen) => ScreenRecord {
            screen_width: screen.width().unwrap_or(0),
            screen_height: screen.height().unwrap_or(0),
            avail_width: screen.avail_width().unwrap_or(0),
            avail_height: screen.avail_height().unwrap_or(0),
            color_depth: screen.color_depth().unwrap_or(0),
            pixel_depth: screen.pixel_depth().unwrap_or(0),
        },
        None => ScreenRecord {
            screen_width: 0,
            screen_height: 0,
            avail_width: 0,
            avail_height: 0,
            color_depth: 0,
            pixel_depth: 0,
        },
    }
}
