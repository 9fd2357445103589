//! Session-token authentication.
//!
//! One live token per client; tokens come from a pluggable source.

pub mod registry;
pub mod token;

pub use registry::{Credentials, SessionRegistry};
pub use token::{RandomTokenSource, SeededTokenSource, TokenSource};
