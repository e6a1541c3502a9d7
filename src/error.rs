//! Error types for the fingerprint pipeline
//!
//! Collector failures never surface here — they degrade to in-band
//! sentinel values inside the composite. The variants below cover the
//! remaining failure modes: serialization, the session store, and the
//! report transport.

use thiserror::Error;
use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, FingerprintError>;

/// Main error type for the fingerprint pipeline
#[derive(Error, Debug, Clone)]
pub enum FingerprintError {
    /// Canonical serialization of the composite failed. Unexpected for
    /// well-typed records; treated as fatal by the public operations.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FingerprintError {
    /// Whether the public operations swallow this error into a degraded
    /// return value instead of propagating it.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FingerprintError::Storage(_) | FingerprintError::Network(_)
        )
    }
}

impl From<FingerprintError> for JsValue {
    fn from(err: FingerprintError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(FingerprintError::Storage("test".into()).is_recoverable());
        assert!(FingerprintError::Network("test".into()).is_recoverable());

        // Fatal errors
        assert!(!FingerprintError::Serialization("test".into()).is_recoverable());
        assert!(!FingerprintError::Internal("test".into()).is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = FingerprintError::Network("status 503".into());
        assert_eq!(err.to_string(), "Network error: status 503");
    }
}
