//! Error types for `gavel-client`.

use thiserror::Error;

/// A failed backend call. Transport failures and application-level
/// failures (`success: false`) are kept distinct; neither is retried.
#[derive(Debug, Error)]
pub enum Error {
  #[error("network error: {0}")]
  Transport(#[from] reqwest::Error),

  #[error("server returned {status}")]
  Http { status: reqwest::StatusCode },

  #[error("{message}")]
  Api { message: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
