//! crypto/bcrypt.rs
//! bcrypt with a fresh 16-byte salt, encoded as version `2a`.
//!
//! Output grammar: `$2a$<cost:02>$<salt:22><digest:31>`

use bcrypt::{hash_with_salt, Version};

use crate::constants::{BCRYPT_HASH_CHARS, BCRYPT_SALT_CHARS, BCRYPT_SALT_LEN};
use crate::crypto::types::{HashComponent, HashResult, SegmentColor};
use crate::crypto::close_window;
use crate::params::BcryptParams;
use crate::telemetry::{Stage, TelemetryTimer};
use crate::types::ComputationError;
use crate::utils::random_array;

const ALG: &str = "bcrypt";

pub fn hash(password: &str, params: &BcryptParams) -> Result<HashResult, ComputationError> {
    params.validate()?;

    let mut timer = TelemetryTimer::new();
    let salt = timer.stage(Stage::Salt, random_array::<BCRYPT_SALT_LEN>);
    let parts = timer
        .stage(Stage::Compute, || hash_with_salt(password, params.cost, salt))
        .map_err(|e| ComputationError::primitive(ALG, e))?;
    let encoded = timer.stage(Stage::Encode, || parts.format_for_version(Version::TwoA));
    let time_ms = close_window(&mut timer, ALG);

    let breakdown = breakdown(&encoded)?;
    Ok(HashResult { hash: encoded, time_ms, breakdown })
}

/// Split `$2a$10$<53 chars>` into version, cost, salt and digest.
pub fn breakdown(encoded: &str) -> Result<Vec<HashComponent>, ComputationError> {
    let malformed = || ComputationError::primitive(ALG, format!("malformed encoding: {encoded}"));

    let mut fields = encoded.split('$');
    if fields.next() != Some("") {
        return Err(malformed());
    }
    let (version, cost, tail) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(v), Some(c), Some(t), None) => (v, c, t),
        _ => return Err(malformed()),
    };
    if tail.len() != BCRYPT_SALT_CHARS + BCRYPT_HASH_CHARS || !tail.is_ascii() {
        return Err(malformed());
    }
    if cost.is_empty() || !cost.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let (salt, digest) = tail.split_at(BCRYPT_SALT_CHARS);

    Ok(vec![
        HashComponent::new("Alg", version, "Bcrypt version identifier", SegmentColor::Cyan),
        HashComponent::new("Cost", cost, format!("2^{cost} iterations"), SegmentColor::Purple),
        HashComponent::new("Salt", salt, "Base64 encoded salt (22 chars)", SegmentColor::Yellow),
        HashComponent::new("Hash", digest, "Resulting 184-bit hash", SegmentColor::Green),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_rejects_short_tail() {
        assert!(breakdown("$2a$04$tooshort").is_err());
        assert!(breakdown("2a$04$x").is_err());
    }

    #[test]
    fn breakdown_splits_known_vector() {
        let enc = "$2a$05$CCCCCCCCCCCCCCCCCCCCC.E5YPO9kmyuRGyh0XouQYb4YMJKvyOeW";
        let parts = breakdown(enc).unwrap();
        assert_eq!(parts[0].value, "2a");
        assert_eq!(parts[1].value, "05");
        assert_eq!(parts[1].description, "2^05 iterations");
        assert_eq!(parts[2].value, "CCCCCCCCCCCCCCCCCCCCC.");
        assert_eq!(parts[3].value.len(), 31);
    }
}
