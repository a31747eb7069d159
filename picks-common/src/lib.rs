//! # Book Picks Common Library
//!
//! Shared code for the book picks tools:
//! - Error type
//! - Configuration loading and data folder layout
//! - Tracing setup
//! - Pick file and resolved-pick CSV I/O

pub mod config;
pub mod error;
pub mod logging;
pub mod picks;

pub use error::{Error, Result};
pub use picks::ResolvedPick;
