//! Remote reporter
//!
//! POSTs the serialized composite to a caller-supplied endpoint and
//! extracts the hash the server echoes back. The transport is a trait so
//! the session's cache gate can be tested without a network.

use async_trait::async_trait;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{window, Request, RequestInit, RequestMode, Response};

use crate::error::{FingerprintError, Result};

/// Report transport consumed by the session.
#[async_trait(?Send)]
pub trait ReportSink {
    /// Submit the JSON body; returns the hash the server echoed, if any.
    /// `Ok(None)` means the endpoint accepted the report without echoing
    /// a hash — the caller decides how to degrade.
    async fn submit(&self, endpoint: &str, body: &str) -> Result<Option<String>>;
}

/// Fetch-backed reporter. No endpoint validation beyond what the
/// transport itself performs.
pub struct HttpReporter;

#[async_trait(?Send)]
impl ReportSink for HttpReporter {
    async fn submit(&self, endpoint: &str, body: &str) -> Result<Option<String>> {
        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_mode(RequestMode::Cors);
        opts.set_body(&JsValue::from_str(body));

        let request = Request::new_with_str_and_init(endpoint, &opts)
            .map_err(|e| FingerprintError::Network(format!("Request failed: {:?}", e)))?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| FingerprintError::Network(format!("Headers failed: {:?}", e)))?;

        let window =
            window().ok_or_else(|| FingerprintError::Network("No window".to_string()))?;
        let resp: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| FingerprintError::Network(format!("fetch failed: {:?}", e)))?
            .dyn_into()
            .map_err(|_| FingerprintError::Network("response is not a Response".to_string()))?;

        if !resp.ok() {
            return Err(FingerprintError::Network(format!(
                "endpoint returned {}",
                resp.status()
            )));
        }

        let text = JsFuture::from(
            resp.text()
                .map_err(|e| FingerprintError::Network(format!("body read failed: {:?}", e)))?,
        )
        .await
        .map_err(|e| FingerprintError::Network(format!("body read failed: {:?}", e)))?
        .as_string()
        .unwrap_or_default();

        let echoed = serde_json::from_str::<serde_json::Value>(&text)
            .ok()
            .and_then(|v| v.get("hash").and_then(|h| h.as_str()).map(str::to_string));

        Ok(echoed)
    }
}
