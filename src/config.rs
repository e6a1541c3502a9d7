//! Collector configuration
//!
//! Mirrors the JS options object: one boolean per signal category plus the
//! hash strategy. Every category except the geolocation lookup is enabled
//! by default.

use serde::{Deserialize, Serialize};

use crate::hash::HashStrategy;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectorConfig {
    pub browser: bool,
    pub screen: bool,
    pub timezone: bool,
    pub canvas: bool,
    pub webgl: bool,
    pub audio: bool,
    pub hardware: bool,
    /// Issues one outbound network request when enabled.
    pub location: bool,
    pub hash: HashStrategy,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            browser: true,
            screen: true,
            timezone: true,
            canvas: true,
            webgl: true,
            audio: true,
            hardware: true,
            location: false,
            hash: HashStrategy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything_but_location() {
        let config = CollectorConfig::default();
        assert!(config.browser && config.screen && config.timezone);
        assert!(config.canvas && config.webgl && config.audio && config.hardware);
        assert!(!config.location);
        assert_eq!(config.hash, HashStrategy::Sha256);
    }

    #[test]
    fn partial_options_fill_in_defaults() {
        let config: CollectorConfig =
            serde_json::from_str("{\"audio\":false,\"hash\":\"rolling\"}").unwrap();
        assert!(!config.audio);
        assert_eq!(config.hash, HashStrategy::Rolling);
        assert!(config.canvas);
        assert!(!config.location);
    }
}
