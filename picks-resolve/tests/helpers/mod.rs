//! Test Helper Utilities
//!
//! Shared doubles and fixtures for picks-resolve integration tests

#![allow(dead_code)]

pub mod decisions;
pub mod responses;
pub mod search_stub;

pub use decisions::ScriptedDecisions;
pub use responses::{search_response, work};
pub use search_stub::StubSearchApi;
