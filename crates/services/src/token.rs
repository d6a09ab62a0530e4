//! Verification token generation.
//!
//! A token is a bearer capability: whoever holds it can publish the draft.
//! It is 32 bytes from the operating system's CSPRNG, URL-safe base64
//! encoded so it can sit in a query string without escaping.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use domains::{DomainError, DomainResult, TokenGenerator, VerificationToken};

/// Number of random bytes behind each token.
pub const TOKEN_BYTES: usize = 32;

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> DomainResult<VerificationToken> {
        let mut bytes = [0u8; TOKEN_BYTES];
        getrandom::getrandom(&mut bytes)
            .map_err(|e| DomainError::Internal(format!("entropy source unavailable: {e}")))?;
        Ok(VerificationToken::new(URL_SAFE_NO_PAD.encode(bytes)))
    }
}
