//! Credential codec: key-id/secret generation, the composite
//! `api_<key_id>.<secret>` format, and digest verification.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use data_encoding::BASE32_NOPAD;
use rand::{TryRngCore, rngs::OsRng};
use subtle::ConstantTimeEq;

use super::error::AuthError;

pub const API_KEY_PREFIX: &str = "api_";
pub const KEY_ID_BYTES: usize = 6;
pub const SECRET_BYTES: usize = 32;

/// Draws a fresh key-id/secret pair from the OS entropy source. Fails
/// only on entropy exhaustion, which is terminal for the request.
pub fn generate_credentials() -> Result<(String, String), AuthError> {
    let mut key_id_bytes = [0u8; KEY_ID_BYTES];
    OsRng
        .try_fill_bytes(&mut key_id_bytes)
        .map_err(|e| AuthError::Entropy(e.to_string()))?;
    let key_id = BASE32_NOPAD.encode(&key_id_bytes).to_lowercase();

    let mut secret_bytes = [0u8; SECRET_BYTES];
    OsRng
        .try_fill_bytes(&mut secret_bytes)
        .map_err(|e| AuthError::Entropy(e.to_string()))?;
    let secret = URL_SAFE_NO_PAD.encode(secret_bytes);

    Ok((key_id, secret))
}

/// Digest of the secret half, lowercase hex. Unsalted: secrets are 32
/// bytes of server-side randomness, never user-chosen passwords.
pub fn hash_secret(secret: &str) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(secret.as_bytes());
    hasher.finalize().to_hex().to_string().to_lowercase()
}

pub fn format_api_key(key_id: &str, secret: &str) -> String {
    format!("{API_KEY_PREFIX}{key_id}.{secret}")
}

/// Splits a raw credential into its key-id and secret halves. The
/// string must carry the `api_` prefix and exactly one dot.
pub fn parse_api_key(raw: &str) -> Result<(&str, &str), AuthError> {
    let rest = raw
        .strip_prefix(API_KEY_PREFIX)
        .ok_or(AuthError::MalformedKey)?;
    let mut parts = rest.split('.');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key_id), Some(secret), None) => Ok((key_id, secret)),
        _ => Err(AuthError::MalformedKey),
    }
}

/// Recomputes the digest of `secret` and compares it to the stored
/// one in constant time. An undecodable stored digest never verifies.
pub fn verify_secret(secret: &str, stored_digest: &str) -> bool {
    let Ok(stored) = hex::decode(stored_digest) else {
        return false;
    };
    let mut hasher = blake3::Hasher::new();
    hasher.update(secret.as_bytes());
    let actual = hasher.finalize();
    actual.as_bytes().as_slice().ct_eq(&stored).into()
}
