//! In-memory session registry.
//!
//! Maps opaque tokens to client ids and allows at most one live session per
//! client. The registry is not synchronized itself; the server keeps it
//! behind a single mutex so every operation runs to completion on its own.

use super::token::{RandomTokenSource, TokenSource};
use crate::fixtures::ClientId;
use crate::utils::config::MAX_TOKEN_ATTEMPTS;
use crate::utils::error::SessionError;
use std::collections::{HashMap, HashSet};

/// Lookup of login credentials
pub trait Credentials {
    /// Client id for a matching identifier/password pair
    fn verify(&self, identifier: &str, password: &str) -> Option<ClientId>;
}

/// Token → client mapping with a single-session-per-client rule
pub struct SessionRegistry<S = RandomTokenSource> {
    tokens: HashMap<String, ClientId>,
    active: HashSet<ClientId>,
    source: S,
}

impl Default for SessionRegistry<RandomTokenSource> {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry<RandomTokenSource> {
    pub fn new() -> Self {
        Self::with_source(RandomTokenSource)
    }
}

impl<S: TokenSource> SessionRegistry<S> {
    /// Registry drawing tokens from `source`
    pub fn with_source(source: S) -> Self {
        Self {
            tokens: HashMap::new(),
            active: HashSet::new(),
            source,
        }
    }

    /// Log a client in and issue a fresh token
    ///
    /// **Public** - called by the `/auth` route
    ///
    /// # Errors
    /// * `SessionError::InvalidCredentials` - unknown identifier or wrong password
    /// * `SessionError::AlreadyLoggedIn` - the client already holds a token
    pub fn authenticate(
        &mut self,
        credentials: &impl Credentials,
        identifier: &str,
        password: &str,
    ) -> Result<String, SessionError> {
        let client = credentials
            .verify(identifier, password)
            .ok_or(SessionError::InvalidCredentials)?;

        if self.active.contains(&client) {
            return Err(SessionError::AlreadyLoggedIn);
        }

        let token = self.fresh_token();
        self.tokens.insert(token.clone(), client);
        self.active.insert(client);

        Ok(token)
    }

    /// Destroy a session
    ///
    /// # Errors
    /// * `SessionError::UnknownSession` - token is not live
    pub fn end_session(&mut self, token: &str) -> Result<(), SessionError> {
        let client = self
            .tokens
            .remove(token)
            .ok_or(SessionError::UnknownSession)?;
        self.active.remove(&client);
        Ok(())
    }

    /// Client owning `token`
    pub fn resolve(&self, token: &str) -> Result<ClientId, SessionError> {
        self.tokens
            .get(token)
            .copied()
            .ok_or(SessionError::UnknownSession)
    }

    pub fn is_logged_in(&self, client: ClientId) -> bool {
        self.active.contains(&client)
    }

    pub fn active_sessions(&self) -> usize {
        self.tokens.len()
    }

    /// Draw tokens until one is not live
    ///
    /// Collisions are astronomically unlikely with the random source; the
    /// cap only guards against a broken source that repeats forever.
    fn fresh_token(&mut self) -> String {
        let mut token = self.source.next_token();
        for _ in 1..MAX_TOKEN_ATTEMPTS {
            if !self.tokens.contains_key(&token) {
                return token;
            }
            token = self.source.next_token();
        }
        // Still colliding: make it unique by construction
        while self.tokens.contains_key(&token) {
            token.push_str(&self.tokens.len().to_string());
        }
        token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SeededTokenSource;
    use std::collections::VecDeque;

    struct StaticCredentials;

    impl Credentials for StaticCredentials {
        fn verify(&self, identifier: &str, password: &str) -> Option<ClientId> {
            match (identifier, password) {
                ("alice", "wonderland") => Some(0),
                ("bob", "builder") => Some(1),
                _ => None,
            }
        }
    }

    /// Hands out a fixed script of tokens
    struct ScriptedTokens(VecDeque<String>);

    impl TokenSource for ScriptedTokens {
        fn next_token(&mut self) -> String {
            self.0.pop_front().unwrap_or_else(|| "exhausted".to_string())
        }
    }

    #[test]
    fn test_authenticate_and_resolve() {
        let mut registry = SessionRegistry::new();
        let token = registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .unwrap();

        assert_eq!(registry.resolve(&token), Ok(0));
        assert!(registry.is_logged_in(0));
    }

    #[test]
    fn test_wrong_password() {
        let mut registry = SessionRegistry::new();
        assert_eq!(
            registry.authenticate(&StaticCredentials, "alice", "nope"),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(
            registry.authenticate(&StaticCredentials, "carol", "wonderland"),
            Err(SessionError::InvalidCredentials)
        );
        assert_eq!(registry.active_sessions(), 0);
    }

    #[test]
    fn test_second_login_rejected() {
        let mut registry = SessionRegistry::with_source(SeededTokenSource::new(1));
        registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .unwrap();

        assert_eq!(
            registry.authenticate(&StaticCredentials, "alice", "wonderland"),
            Err(SessionError::AlreadyLoggedIn)
        );
        assert_eq!(registry.active_sessions(), 1);
    }

    #[test]
    fn test_logout_then_login_again() {
        let mut registry = SessionRegistry::with_source(SeededTokenSource::new(1));
        let token = registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .unwrap();

        registry.end_session(&token).unwrap();
        assert_eq!(registry.resolve(&token), Err(SessionError::UnknownSession));
        assert!(!registry.is_logged_in(0));

        assert!(registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .is_ok());
    }

    #[test]
    fn test_end_unknown_session() {
        let mut registry = SessionRegistry::new();
        assert_eq!(
            registry.end_session("missing"),
            Err(SessionError::UnknownSession)
        );
    }

    #[test]
    fn test_colliding_token_is_redrawn() {
        let script = ["dup", "dup", "fresh"].map(String::from);
        let mut registry = SessionRegistry::with_source(ScriptedTokens(script.into()));

        let first = registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .unwrap();
        let second = registry
            .authenticate(&StaticCredentials, "bob", "builder")
            .unwrap();

        assert_eq!(first, "dup");
        assert_eq!(second, "fresh");
        assert_eq!(registry.resolve(&second), Ok(1));
    }

    #[test]
    fn test_stuck_source_still_yields_unique_tokens() {
        let script = std::iter::repeat("same".to_string()).take(64).collect();
        let mut registry = SessionRegistry::with_source(ScriptedTokens(script));

        let first = registry
            .authenticate(&StaticCredentials, "alice", "wonderland")
            .unwrap();
        let second = registry
            .authenticate(&StaticCredentials, "bob", "builder")
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(registry.resolve(&first), Ok(0));
        assert_eq!(registry.resolve(&second), Ok(1));
    }
}
