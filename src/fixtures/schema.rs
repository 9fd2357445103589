//! Fixture file schemas and client profiles.
//!
//! Client profiles carry an explicit split between immutable fields
//! (`id`, `identifier`, `password`) and the fields a logged-in client may
//! change through `/updateinfo` (`name`, `email`, `company`).

use crate::session::Credentials;
use crate::timeseries::Series;
use crate::utils::error::{ApiError, FixtureError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Key into the per-client fixture data
pub type ClientId = u32;

/// Fields a client can never change through the API
pub const IMMUTABLE_FIELDS: &[&str] = &["id", "identifier", "identifiant", "password"];

/// One entry of clients.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    pub id: ClientId,

    /// Login name
    #[serde(alias = "identifiant")]
    pub identifier: String,

    /// Plain-text demo password, never sent back out
    #[serde(skip_serializing)]
    pub password: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl ClientRecord {
    /// Apply a validated update to the mutable fields
    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(company) = update.company {
            self.company = Some(company);
        }
    }
}

/// Change set accepted by `/updateinfo`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl ProfileUpdate {
    /// Build an update from raw request fields
    ///
    /// # Errors
    /// `ApiError::MalformedRequest` for immutable, unknown or invalid fields
    pub fn from_fields(fields: Map<String, Value>) -> Result<Self, ApiError> {
        if let Some(field) = fields
            .keys()
            .find(|k| IMMUTABLE_FIELDS.contains(&k.as_str()))
        {
            return Err(ApiError::MalformedRequest(format!(
                "field `{}` is immutable",
                field
            )));
        }

        let update: ProfileUpdate = serde_json::from_value(Value::Object(fields))
            .map_err(|e| ApiError::MalformedRequest(e.to_string()))?;
        update.validate()?;
        Ok(update)
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.company.is_none()
    }

    fn validate(&self) -> Result<(), ApiError> {
        if self.is_empty() {
            return Err(ApiError::MalformedRequest(
                "no mutable field to update".to_string(),
            ));
        }

        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(ApiError::MalformedRequest("name cannot be empty".to_string()));
        }

        if matches!(&self.email, Some(email) if !email.contains('@')) {
            return Err(ApiError::MalformedRequest(
                "email must contain '@'".to_string(),
            ));
        }

        Ok(())
    }
}

/// All known clients
#[derive(Debug, Clone, Default)]
pub struct ClientDirectory {
    clients: Vec<ClientRecord>,
}

impl ClientDirectory {
    /// Build a directory, rejecting duplicate ids or identifiers
    pub fn new(clients: Vec<ClientRecord>) -> Result<Self, FixtureError> {
        let mut ids = HashSet::new();
        let mut identifiers = HashSet::new();

        for client in &clients {
            if !ids.insert(client.id) {
                return Err(FixtureError::InvalidData(format!(
                    "duplicate client id {}",
                    client.id
                )));
            }
            if !identifiers.insert(client.identifier.as_str()) {
                return Err(FixtureError::InvalidData(format!(
                    "duplicate client identifier '{}'",
                    client.identifier
                )));
            }
        }

        Ok(Self { clients })
    }

    pub fn get(&self, id: ClientId) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.id == id)
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&ClientRecord> {
        self.clients.iter().find(|c| c.identifier == identifier)
    }

    pub fn ids(&self) -> impl Iterator<Item = ClientId> + '_ {
        self.clients.iter().map(|c| c.id)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Apply `update` to a client's profile
    ///
    /// # Returns
    /// The profile after the update
    pub fn update(&mut self, id: ClientId, update: ProfileUpdate) -> Result<ClientRecord, ApiError> {
        let client = self
            .clients
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(ApiError::UnknownClient(id))?;
        client.apply(update);
        Ok(client.clone())
    }
}

impl Credentials for ClientDirectory {
    fn verify(&self, identifier: &str, password: &str) -> Option<ClientId> {
        self.find_by_identifier(identifier)
            .filter(|c| c.password == password)
            .map(|c| c.id)
    }
}

/// Shape of an audience file: `{"audience": [[ts, viewers], ...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AudienceFile {
    #[serde(default)]
    pub audience: Series,
}

/// Shape of a bandwidth file: `{"cdn": [[ts, bytes], ...], "p2p": [...]}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BandwidthFile {
    #[serde(default)]
    pub cdn: Series,

    #[serde(default)]
    pub p2p: Series,
}
