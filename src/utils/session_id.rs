//! Session identifier generation.

use rand::Rng;

const SESSION_ID_BYTES: usize = 32;

/// Generates a random 64-character lowercase hex session id.
pub fn generate_session_id() -> String {
    let mut bytes = [0u8; SESSION_ID_BYTES];
    rand::rng().fill(&mut bytes);
    hex::encode(bytes)
}

/// Returns true if `value` has the shape of an id from [`generate_session_id`].
pub fn is_session_id(value: &str) -> bool {
    value.len() == SESSION_ID_BYTES * 2
        && value.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}
