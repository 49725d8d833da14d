//! Identity: session tokens, password hashing, confirmation tokens.

pub mod claims;
pub mod password;

pub use claims::{AuthClaims, TOKEN_TTL_SECS, TokenKeys};

use rand::RngCore;

/// One-time account confirmation token: 32 random bytes, hex-encoded.
pub fn confirmation_token() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
