//! Signal collectors
//!
//! Seven best-effort readers of platform information, plus the optional
//! geolocation lookup. Each converts any underlying capability error into
//! its category sentinel locally — aggregation never aborts because one
//! signal is unavailable.
//!
//! The [`SignalSource`] trait is the seam between the aggregator and the
//! platform: [`WebSignalSource`] reads the real browser APIs, tests pin
//! the outputs with doubles.

use async_trait::async_trait;

pub mod audio;
pub mod browser;
pub mod canvas;
pub mod hardware;
pub mod location;
pub mod screen;
pub mod timezone;
pub mod webgl;

use crate::record::{
    BrowserRecord, GraphicsRecord, HardwareRecord, LocationSignal, ScreenRecord, Signal,
    TimezoneRecord,
};

/// Platform information provider consumed by the aggregator.
///
/// Synchronous methods are structural reads that cannot suspend; `audio`
/// and `location` are the pipeline's only collector suspension points.
#[async_trait(?Send)]
pub trait SignalSource {
    fn browser(&self) -> BrowserRecord;
    fn screen(&self) -> ScreenRecord;
    fn timezone(&self) -> TimezoneRecord;
    fn canvas(&self) -> Signal<String>;
    fn webgl(&self) -> Signal<GraphicsRecord>;
    async fn audio(&self) -> Signal<String>;
    fn hardware(&self) -> HardwareRecord;
    async fn location(&self) -> LocationSignal;
}

/// The real thing: reads browser APIs through `web-sys`/`js-sys`.
pub struct WebSignalSource {
    geo_endpoint: String,
}

impl WebSignalSource {
    pub fn new() -> Self {
        Self {
            geo_endpoint: location::DEFAULT_GEO_ENDPOINT.to_string(),
        }
    }

    /// Point the geolocation lookup at a different service.
    pub fn with_geo_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            geo_endpoint: endpoint.into(),
        }
    }
}

impl Default for WebSignalSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl SignalSource for WebSignalSource {
    fn browser(&self) -> BrowserRecord {
        browser::collect()
    }

    fn screen(&self) -> ScreenRecord {
        screen::collect()
    }

    fn timezone(&self) -> TimezoneRecord {
        timezone::collect()
    }

    fn canvas(&self) -> Signal<String> {
        canvas::collect()
    }

    fn webgl(&self) -> Signal<GraphicsRecord> {
        webgl::collect()
    }

    async fn audio(&self) -> Signal<String> {
        audio::collect().await
    }

    fn hardware(&self) -> HardwareRecord {
        hardware::collect()
    }

    async fn location(&self) -> LocationSignal {
        location::collect(&self.geo_endpoint).await
    }
}
