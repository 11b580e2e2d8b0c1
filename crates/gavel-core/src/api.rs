//! The `AdminApi` trait.
//!
//! The trait is implemented by backend transports (e.g. `gavel-client`
//! over HTTP). The console depends on this abstraction, not on any
//! concrete transport, which also makes the workflow testable against an
//! in-memory fake.

use std::future::Future;

use crate::{
  subject::{Approval, ClientPage, UserType, VerificationSubject},
  workflow::ClientQuery,
};

/// Abstraction over the external moderation backend.
///
/// Every operation is one-shot: no retry, no caching. All methods return
/// `Send` futures so the trait can be used from multi-threaded async
/// runtimes.
pub trait AdminApi: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Clients ───────────────────────────────────────────────────────────

  /// Fetch one page of the client-management listing.
  fn list_clients<'a>(
    &'a self,
    query: &'a ClientQuery,
  ) -> impl Future<Output = Result<ClientPage, Self::Error>> + Send + 'a;

  /// Block a client. `reason` has already passed
  /// [`crate::workflow::check_reason`].
  fn block_client<'a>(
    &'a self,
    client_id: &'a str,
    reason: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Lift a block. Callers are responsible for interactive confirmation.
  fn unblock_client<'a>(
    &'a self,
    client_id: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  // ── Verifications ─────────────────────────────────────────────────────

  /// Fetch the pending verification queue for one user type.
  fn list_pending(
    &self,
    user_type: UserType,
  ) -> impl Future<Output = Result<Vec<VerificationSubject>, Self::Error>> + Send + '_;

  /// Approve a submission. The returned [`Approval`] may carry the
  /// server-side timestamp.
  fn approve<'a>(
    &'a self,
    credential_id: &'a str,
  ) -> impl Future<Output = Result<Approval, Self::Error>> + Send + 'a;

  /// Reject a submission. `reason` and the subject's status have already
  /// passed [`crate::workflow::check_reject`].
  fn reject<'a>(
    &'a self,
    credential_id: &'a str,
    reason: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
