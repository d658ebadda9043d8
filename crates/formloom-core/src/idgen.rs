//! SHA256 + base36 id generation for fields and saved schemas.
//!
//! Ids are opaque: `<prefix>-<base36 hash>`, hashed from the label, a
//! timestamp, and a nonce. Collisions inside a containing list are resolved
//! by retrying nonces.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Prefix for field ids.
pub const FIELD_PREFIX: &str = "fld";

/// Prefix for saved-schema ids.
pub const SCHEMA_PREFIX: &str = "frm";

/// Default length of the hash portion of an id.
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Converts a byte slice to a base36 string of exactly `length` characters,
/// zero-padded on the left and truncated to the least significant digits.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let base = BigUint::from(36u32);
    let mut num = BigUint::from_bytes_be(data);

    let mut chars: Vec<u8> = Vec::with_capacity(length);
    while !num.is_zero() {
        let digit = &num % &base;
        num /= &base;
        let idx = digit.to_u32_digits().first().copied().unwrap_or(0) as usize;
        chars.push(BASE36_ALPHABET[idx]);
    }
    chars.reverse();

    let mut s = String::from_utf8(chars).expect("base36 chars are valid UTF-8");
    if s.len() < length {
        s = "0".repeat(length - s.len()) + &s;
    }
    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }
    s
}

/// Creates a hash-based id with the given prefix.
///
/// The hash covers the label, the creation timestamp, and a nonce, so two
/// same-labelled entries created in the same instant still diverge once the
/// nonce is bumped.
pub fn generate_id(
    prefix: &str,
    label: &str,
    timestamp: DateTime<Utc>,
    length: usize,
    nonce: u32,
) -> String {
    let content = format!(
        "{}|{}|{}",
        label,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );
    let hash = Sha256::digest(content.as_bytes());

    // Enough hash bytes to cover the requested base36 width (log2(36) > 5).
    let num_bytes = (length * 6).div_ceil(8).min(hash.len());
    format!("{}-{}", prefix, encode_base36(&hash[..num_bytes], length))
}

/// Generates an id that is unique with respect to `is_taken`.
///
/// Retries nonces, widening the hash when a pathological number of
/// collisions occurs, so the call always produces a fresh id.
pub fn unique_id(
    prefix: &str,
    label: &str,
    timestamp: DateTime<Utc>,
    length: usize,
    is_taken: impl Fn(&str) -> bool,
) -> String {
    let mut length = length.max(3);
    loop {
        for nonce in 0..16 {
            let candidate = generate_id(prefix, label, timestamp, length, nonce);
            if !is_taken(&candidate) {
                return candidate;
            }
        }
        length += 2;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_base36_empty_is_zeros() {
        assert_eq!(encode_base36(&[], 4), "0000");
    }

    #[test]
    fn encode_base36_exact_length() {
        assert_eq!(encode_base36(&[0xFF, 0xFF], 4).len(), 4);
        assert_eq!(encode_base36(&[0xFF, 0xFF, 0xFF, 0xFF], 3).len(), 3);
    }

    #[test]
    fn generate_id_format() {
        let ts = Utc::now();
        let id = generate_id(FIELD_PREFIX, "Email", ts, 6, 0);
        assert!(id.starts_with("fld-"));
        assert_eq!(id.len(), "fld-".len() + 6);
    }

    #[test]
    fn generate_id_deterministic() {
        let ts = DateTime::parse_from_rfc3339("2024-03-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(
            generate_id("fld", "Name", ts, 6, 0),
            generate_id("fld", "Name", ts, 6, 0)
        );
    }

    #[test]
    fn generate_id_nonce_changes_output() {
        let ts = Utc::now();
        assert_ne!(
            generate_id("fld", "Name", ts, 6, 0),
            generate_id("fld", "Name", ts, 6, 1)
        );
    }

    #[test]
    fn unique_id_skips_taken() {
        let ts = Utc::now();
        let first = generate_id("fld", "Name", ts, 6, 0);
        let id = unique_id("fld", "Name", ts, 6, |candidate| candidate == first);
        assert_ne!(id, first);
        assert!(id.starts_with("fld-"));
    }
}
