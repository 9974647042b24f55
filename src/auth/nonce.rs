//! Random session identifiers for callers without their own session key.

// crates.io
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;

const NONCE_BYTES: usize = 24;

/// Generates a random URL-safe identifier suitable as a token cache key and signed nonce.
pub fn generate_nonce() -> String {
	let mut bytes = [0_u8; NONCE_BYTES];

	rand::rng().fill_bytes(&mut bytes);

	URL_SAFE_NO_PAD.encode(bytes)
}
