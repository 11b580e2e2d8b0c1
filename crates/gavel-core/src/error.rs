//! Error types for `gavel-core`.

use thiserror::Error;

/// A client-side validation failure. These are raised before any network
/// call is issued; nothing in this crate is fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("a reason is required")]
  EmptyReason,

  #[error("only pending submissions can be rejected (current status: {0})")]
  NotPending(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
