//! The composite fingerprint and its canonical serialization
//!
//! Category order is the struct declaration order, fixed at compile time;
//! two composites with identical category values serialize identically no
//! matter which order their collectors ran in. The `hash` field is absent
//! until the aggregator sets it, and the canonical form (the hash input)
//! always excludes it.

use serde::Serialize;

use crate::error::{FingerprintError, Result};
use crate::record::{
    BrowserRecord, GraphicsRecord, HardwareRecord, LocationSignal, ScreenRecord, Signal,
    TimezoneRecord,
};

/// Ordered mapping of category name to collected signal. Categories the
/// configuration disables stay `None` and are omitted from serialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompositeFingerprint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<BrowserRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<TimezoneRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canvas: Option<Signal<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webgl: Option<Signal<GraphicsRecord>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Signal<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hardware: Option<HardwareRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationSignal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    hash: Option<String>,
}

impl CompositeFingerprint {
    /// The derived identity hash, once the aggregator has set it.
    pub fn hash(&self) -> Option<&str> {
        self.hash.as_deref()
    }

    /// Set by the aggregator after every configured category has been
    /// collected. Overwrites any prior value.
    pub(crate) fn set_hash(&mut self, hash: String) {
        self.hash = Some(hash);
    }

    /// Full JSON encoding, including `hash` when present. This is the wire
    /// body the remote reporter submits.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| FingerprintError::Serialization(e.to_string()))
    }

    /// The hash input: key-ordered JSON of the category values with the
    /// `hash` field excluded (it does not yet exist at hash time).
    pub fn canonical_json(&self) -> Result<String> {
        if self.hash.is_none() {
            return self.to_json();
        }
        let mut unhashed = self.clone();
        unhashed.hash = None;
        unhashed.to_json()
    }
}
