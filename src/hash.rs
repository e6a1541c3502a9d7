//! Identity hash strategies
//!
//! Both strategies fold the canonical serialization of the composite into
//! a fixed lowercase-hex string. `Rolling` is the historical cheap
//! differentiator; `Sha256` is the default and the only collision-resistant
//! choice.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Which hash to derive the identity from, chosen per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashStrategy {
    /// 32-bit `hash*31 + codeUnit` fold. Cheap differentiator only, not an
    /// identity proof.
    Rolling,
    /// SHA-256 over the UTF-8 canonical serialization.
    #[default]
    Sha256,
}

/// Hash `input` under the given strategy, rendered as lowercase hex.
pub fn digest(strategy: HashStrategy, input: &str) -> String {
    match strategy {
        HashStrategy::Rolling => rolling32(input),
        HashStrategy::Sha256 => sha256_hex(input),
    }
}

/// Fold UTF-16 code units into a wrapping 32-bit signed accumulator and
/// emit the absolute value as hex. Iterating code units (not chars or
/// bytes) keeps the fold aligned with the historical `charCodeAt` loop.
fn rolling32(input: &str) -> String {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(unit as i32);
    }
    format!("{:x}", hash.unsigned_abs())
}

fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_known_values() {
        assert_eq!(digest(HashStrategy::Rolling, ""), "0");
        // 'a' = 97 = 0x61
        assert_eq!(digest(HashStrategy::Rolling, "a"), "61");
        // the classic 31-fold value for "hello": 99162322
        assert_eq!(digest(HashStrategy::Rolling, "hello"), "5e918d2");
    }

    #[test]
    fn rolling_negative_accumulator_takes_absolute_value() {
        // folds to exactly i32::MIN; unsigned_abs must not overflow
        assert_eq!(
            digest(HashStrategy::Rolling, "polygenelubricants"),
            "80000000"
        );
    }

    #[test]
    fn rolling_uses_utf16_code_units() {
        // U+10400 is two code units (0xD801, 0xDC00), not one scalar
        let surrogate_pair = "\u{10400}";
        let mut expected: i32 = 0;
        for unit in surrogate_pair.encode_utf16() {
            expected = expected.wrapping_mul(31).wrapping_add(unit as i32);
        }
        assert_eq!(
            digest(HashStrategy::Rolling, surrogate_pair),
            format!("{:x}", expected.unsigned_abs())
        );
    }

    #[test]
    fn sha256_known_vector() {
        assert_eq!(
            digest(HashStrategy::Sha256, "abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn sha256_is_lowercase_fixed_width() {
        let out = digest(HashStrategy::Sha256, "anything");
        assert_eq!(out.len(), 64);
        assert!(out.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn strategies_are_deterministic() {
        for strategy in [HashStrategy::Rolling, HashStrategy::Sha256] {
            assert_eq!(digest(strategy, "same input"), digest(strategy, "same input"));
        }
    }

    #[test]
    fn strategy_parses_from_config_string() {
        let s: HashStrategy = serde_json::from_str("\"rolling\"").unwrap();
        assert_eq!(s, HashStrategy::Rolling);
        let s: HashStrategy = serde_json::from_str("\"sha256\"").unwrap();
        assert_eq!(s, HashStrategy::Sha256);
    }
}
