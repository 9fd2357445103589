//! Session token sources.
//!
//! The registry asks a `TokenSource` for candidates, so tests can plug in a
//! seeded generator and get the same tokens on every run.

use crate::utils::config::TOKEN_BYTES;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplier of candidate session tokens
pub trait TokenSource: Send {
    fn next_token(&mut self) -> String;
}

impl<T: TokenSource + ?Sized> TokenSource for Box<T> {
    fn next_token(&mut self) -> String {
        (**self).next_token()
    }
}

/// Hex-encoded tokens drawn from the thread-local CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomTokenSource;

impl TokenSource for RandomTokenSource {
    fn next_token(&mut self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        rand::thread_rng().fill(&mut bytes);
        hex::encode(bytes)
    }
}

/// Deterministic tokens for tests and reproducible demos
#[derive(Debug, Clone)]
pub struct SeededTokenSource {
    rng: StdRng,
}

impl SeededTokenSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TokenSource for SeededTokenSource {
    fn next_token(&mut self) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        self.rng.fill(&mut bytes);
        hex::encode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_token_shape() {
        let token = RandomTokenSource.next_token();
        assert_eq!(token.len(), TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_seeded_tokens_repeat() {
        let mut a = SeededTokenSource::new(7);
        let mut b = SeededTokenSource::new(7);

        assert_eq!(a.next_token(), b.next_token());
        assert_eq!(a.next_token(), b.next_token());
        assert_ne!(a.next_token(), SeededTokenSource::new(8).next_token());
    }
}
