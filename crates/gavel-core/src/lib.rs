//! Core types and trait definitions for the Gavel moderation console.
//!
//! This crate is deliberately free of HTTP and terminal dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod api;
pub mod error;
pub mod status;
pub mod subject;
pub mod workflow;

pub use error::{Error, Result};

#[cfg(test)]
mod tests;
