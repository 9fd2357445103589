//! Shared server state.

use crate::fixtures::{ClientDirectory, ClientId, ClientRecord, FixtureStore, LoadedFixtures};
use crate::session::{SessionRegistry, TokenSource};
use crate::timeseries::EmptyChannelPolicy;
use crate::utils::error::ApiError;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

pub type SharedState = Arc<AppState>;

/// Everything the handlers need
///
/// Fixture datasets are immutable after startup. The session registry sits
/// behind one mutex, client profiles behind one read-write lock; neither lock
/// is held across an `.await`.
pub struct AppState {
    pub fixtures: FixtureStore,
    pub clients: RwLock<ClientDirectory>,
    pub sessions: Mutex<SessionRegistry<Box<dyn TokenSource>>>,
    pub empty_channel: EmptyChannelPolicy,
}

impl AppState {
    pub fn new(
        loaded: LoadedFixtures,
        tokens: Box<dyn TokenSource>,
        empty_channel: EmptyChannelPolicy,
    ) -> Self {
        Self {
            fixtures: loaded.store,
            clients: RwLock::new(loaded.clients),
            sessions: Mutex::new(SessionRegistry::with_source(tokens)),
            empty_channel,
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    pub fn authenticate(&self, identifier: &str, password: &str) -> Result<String, ApiError> {
        let clients = self.clients.read();
        let token = self
            .sessions
            .lock()
            .authenticate(&*clients, identifier, password)?;
        Ok(token)
    }

    pub fn end_session(&self, token: &str) -> Result<(), ApiError> {
        self.sessions.lock().end_session(token)?;
        Ok(())
    }

    pub fn resolve(&self, token: &str) -> Result<ClientId, ApiError> {
        Ok(self.sessions.lock().resolve(token)?)
    }

    /// Public profile of the client owning `token`
    pub fn profile(&self, token: &str) -> Result<ClientRecord, ApiError> {
        let client = self.resolve(token)?;
        self.clients
            .read()
            .get(client)
            .cloned()
            .ok_or(ApiError::UnknownClient(client))
    }
}
