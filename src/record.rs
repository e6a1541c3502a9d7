//! Signal records — one per collector category
//!
//! Every record serializes with the camelCase keys of the historical wire
//! format. Fallible categories are wrapped in [`Signal`] so callers get a
//! typed distinction between a collected value and an unavailable
//! capability, while the untagged serialization still carries the bare
//! sentinel string on the wire.

use serde::{Deserialize, Serialize};

// Sentinel values carried in place of a record when the capability is
// missing (`*_not_supported`) or errored after acquisition (`*_error`).
pub const CANVAS_NOT_SUPPORTED: &str = "canvas_not_supported";
pub const CANVAS_ERROR: &str = "canvas_error";
pub const WEBGL_NOT_SUPPORTED: &str = "webgl_not_supported";
pub const WEBGL_ERROR: &str = "webgl_error";
pub const AUDIO_NOT_SUPPORTED: &str = "audio_not_supported";
pub const LOCATION_UNAVAILABLE: &str = "location_unavailable";

/// Outcome of one fallible collector: the collected value, or the sentinel
/// the wire format carries when the capability is missing or errored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Signal<T> {
    Ok(T),
    Unavailable(&'static str),
}

impl<T> Signal<T> {
    pub fn is_available(&self) -> bool {
        matches!(self, Signal::Ok(_))
    }

    /// The sentinel string, if this signal is unavailable.
    pub fn sentinel(&self) -> Option<&'static str> {
        match self {
            Signal::Ok(_) => None,
            Signal::Unavailable(reason) => Some(reason),
        }
    }
}

/// A hardware gauge: a number when the platform reports one, the literal
/// string `"unknown"` otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Count(u64),
    Amount(f64),
    Unknown(&'static str),
}

impl Metric {
    pub const UNKNOWN: Metric = Metric::Unknown("unknown");
}

/// Structural navigator reads
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowserRecord {
    pub user_agent: String,
    pub language: String,
    pub languages: Vec<String>,
    pub platform: String,
    pub cookie_enabled: bool,
    /// `null` on the wire when the platform reports no preference.
    pub do_not_track: Option<String>,
}

/// Screen geometry and color depth
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenRecord {
    pub screen_width: i32,
    pub screen_height: i32,
    pub avail_width: i32,
    pub avail_height: i32,
    pub color_depth: i32,
    pub pixel_depth: i32,
}

/// Resolved IANA timezone name and UTC offset in minutes
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneRecord {
    pub timezone: String,
    pub timezone_offset: i32,
}

/// WebGL implementation descriptor strings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphicsRecord {
    pub vendor: String,
    pub renderer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shading_language_version: Option<String>,
}

/// Hardware descriptor reads
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareRecord {
    pub hardware_concurrency: Metric,
    pub device_memory: Metric,
    pub max_touch_points: i32,
}

/// IP-geolocation response fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationRecord {
    pub ip: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub org: String,
}

impl Default for LocationRecord {
    fn default() -> Self {
        Self {
            ip: String::new(),
            city: String::new(),
            region: String::new(),
            country: String::new(),
            latitude: 0.0,
            longitude: 0.0,
            org: String::new(),
        }
    }
}

/// Geolocation outcome: the resolved record, or the error record the wire
/// format carries on lookup failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LocationSignal {
    Known(LocationRecord),
    Unavailable { error: &'static str },
}

impl LocationSignal {
    pub fn unavailable() -> Self {
        LocationSignal::Unavailable {
            error: LOCATION_UNAVAILABLE,
        }
    }
}
