//! Subjects under moderation — verification submissions and client records.
//!
//! Identifiers are opaque strings minted by the backend; this crate never
//! inspects or fabricates them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of marketplace account a verification subject belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum UserType {
  Client,
  Worker,
}

/// One client or worker under identity review.
///
/// `is_verified` is the canonical verification truth. The raw
/// `verification_status` string is advisory/display-only and may lag or
/// disagree with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSubject {
  pub id:                  String,
  pub credential_id:       String,
  pub full_name:           String,
  pub email:               String,
  pub user_type:           UserType,
  pub is_verified:         bool,
  /// Raw backend status. Free-form, case and whitespace irregular.
  pub verification_status: Option<String>,
  /// Explicit document-presence flag, when the source record carries one.
  pub documents_complete:  Option<bool>,
  /// Identifier (URL) of the uploaded ID document, if any.
  pub id_picture:          Option<String>,
  /// Identifier (URL) of the uploaded selfie, if any.
  pub selfie:              Option<String>,
  pub submitted_at:        Option<DateTime<Utc>>,
  pub reviewed_at:         Option<DateTime<Utc>>,
  pub verified_at:         Option<DateTime<Utc>>,
}

impl VerificationSubject {
  /// Whether both required documents are on file. Uses the explicit flag
  /// when the source provided one, else falls back to the presence of both
  /// picture identifiers.
  pub fn has_documents(&self) -> bool {
    self
      .documents_complete
      .unwrap_or(self.id_picture.is_some() && self.selfie.is_some())
  }
}

/// A client row in the management table.
///
/// Blocking is orthogonal to verification: a verified client can be
/// blocked, and block/unblock never touches the verification fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientRecord {
  pub id:                  String,
  pub full_name:           String,
  pub email:               String,
  pub is_verified:         bool,
  pub verification_status: Option<String>,
  pub blocked:             bool,
  pub block_reason:        Option<String>,
  pub blocked_at:          Option<DateTime<Utc>>,
  pub created_at:          Option<DateTime<Utc>>,
}

/// Aggregate counts computed by the server alongside each client page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClientStatistics {
  pub total:      u64,
  pub active:     u64,
  pub blocked:    u64,
  pub verified:   u64,
  pub unverified: u64,
}

/// One page of the client-management listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPage {
  pub clients:     Vec<ClientRecord>,
  pub total_pages: u32,
  pub total_items: u64,
  pub statistics:  ClientStatistics,
}

impl ClientPage {
  pub fn empty() -> Self { Self::default() }
}

/// The outcome of an approve call. The server may omit the timestamp, in
/// which case callers stamp with their local clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct Approval {
  pub approved_at: Option<DateTime<Utc>>,
}
