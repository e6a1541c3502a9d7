//! # Device Fingerprint WASM
//!
//! A browser device-fingerprint collection pipeline compiled to
//! WebAssembly: read a fixed set of browser/device signals, fold them into
//! one deterministic identity hash, optionally POST the result to a
//! backend, and cache the hash for the session.
//!
//! ## Architecture
//!
//! ```text
//! DevicePrint (WASM)
//!   ↓
//! FingerprintSession (cache gate → collectors → hash → reporter)
//!   ↓
//! Browser APIs (navigator, screen, Intl, canvas, WebGL, offline audio)
//! ```
//!
//! ## Usage
//!
//! ```javascript
//! import init, { DevicePrint } from './pkg/deviceprint_wasm.js';
//! await init();
//! const fp = new DevicePrint();                      // all defaults
//! const hash = await fp.getHash();
//! await fp.sendToServer('https://api.example.com/fingerprint');
//! new DevicePrint({ audio: false, hash: 'rolling' }); // selective
//! ```
//!
//! Collector failures never throw: an unavailable capability becomes a
//! sentinel value inside the composite and generation still completes.

use wasm_bindgen::prelude::*;

// Modules
pub mod cache;
pub mod collect;
pub mod composite;
pub mod config;
mod error;
pub mod hash;
pub mod record;
pub mod reporter;
pub mod session;

pub use cache::{HashStore, MemoryStore, SessionStorageStore, SESSION_HASH_KEY};
pub use collect::{SignalSource, WebSignalSource};
pub use composite::CompositeFingerprint;
pub use config::CollectorConfig;
pub use error::{FingerprintError, Result};
pub use hash::HashStrategy;
pub use record::{
    BrowserRecord, GraphicsRecord, HardwareRecord, LocationRecord, LocationSignal, Metric,
    ScreenRecord, Signal, TimezoneRecord,
};
pub use reporter::{HttpReporter, ReportSink};
pub use session::FingerprintSession;

/// Initialize the WASM module
///
/// Sets up console logging; called automatically on module load.
#[wasm_bindgen(start)]
pub fn init() {
    let _ = console_log::init_with_level(log::Level::Info);
    log::debug!("deviceprint-wasm initialized");
}

type WebSession = FingerprintSession<WebSignalSource, SessionStorageStore, HttpReporter>;

/// Main fingerprint entry point for JavaScript
///
/// Wraps a [`FingerprintSession`] wired to the real browser: `web-sys`
/// collectors, `sessionStorage` cache, fetch-backed reporter.
#[wasm_bindgen]
pub struct DevicePrint {
    session: WebSession,
}

#[wasm_bindgen]
impl DevicePrint {
    /// Create a fingerprint session. Pass a JS object to toggle signal
    /// categories or pick the hash strategy:
    /// ```javascript
    /// new DevicePrint({ webgl: false, location: true, hash: 'sha256' });
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> DevicePrint {
        let config: CollectorConfig = if options.is_undefined() || options.is_null() {
            CollectorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options).unwrap_or_else(|_| CollectorConfig::default())
        };

        log::debug!("creating fingerprint session with {:?} hashing", config.hash);

        DevicePrint {
            session: FingerprintSession::new(
                WebSignalSource::new(),
                SessionStorageStore::new(),
                HttpReporter,
                config,
            ),
        }
    }

    /// Recompute and return the full composite, including its hash.
    pub async fn generate(&mut self) -> std::result::Result<JsValue, JsValue> {
        let composite = self.session.generate().await?;
        serde_wasm_bindgen::to_value(&composite).map_err(JsValue::from)
    }

    /// Return the existing hash, generating first when needed.
    #[wasm_bindgen(js_name = getHash)]
    pub async fn get_hash(&mut self) -> std::result::Result<String, JsValue> {
        Ok(self.session.get_hash().await?)
    }

    /// Return the existing composite, generating first when needed.
    #[wasm_bindgen(js_name = getData)]
    pub async fn get_data(&mut self) -> std::result::Result<JsValue, JsValue> {
        let composite = self.session.get_data().await?;
        serde_wasm_bindgen::to_value(&composite).map_err(JsValue::from)
    }

    /// Report the composite to `endpoint` and return the session hash.
    /// A hash already in `sessionStorage` short-circuits collection; a
    /// failed POST degrades to the locally computed hash.
    #[wasm_bindgen(js_name = sendToServer)]
    pub async fn send_to_server(&mut self, endpoint: String) -> std::result::Result<String, JsValue> {
        Ok(self.session.send_to_server(&endpoint).await?)
    }
}
