//! Canned dashboard data.
//!
//! This module handles:
//! - Reading the fixture directory (clients, audience, bandwidth, streams, stats)
//! - Client profiles and credentials
//! - Field filtering of statistic lists

pub mod filter;
pub mod loader;
pub mod schema;
pub mod store;

// Re-export main types
pub use filter::filter_fields;
pub use loader::{load_fixtures, LoadedFixtures};
pub use schema::{ClientDirectory, ClientId, ClientRecord, ProfileUpdate};
pub use store::{ClientDataset, FixtureStore, StatKind};
