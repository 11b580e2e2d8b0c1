//! Wire-format types for the moderation backend.
//!
//! The backend speaks camelCase JSON with Mongo-style `_id` identifiers
//! and a handful of quirks this module absorbs so `gavel-core` never sees
//! them: a boolean-ish `isVerified` flag, picture objects wrapping a bare
//! `url`, and the double-nested envelope on the pending-verifications
//! endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

use gavel_core::subject::{
  ClientPage, ClientRecord, ClientStatistics, UserType, VerificationSubject,
};

// ─── Lenient booleans ────────────────────────────────────────────────────────

/// Accept `true`/`false`, 0/1 numbers, and `"true"`/`"false"` strings.
fn boolish<'de, D>(de: D) -> Result<bool, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum Boolish {
    Bool(bool),
    Int(i64),
    Str(String),
  }

  Ok(match Boolish::deserialize(de)? {
    Boolish::Bool(b) => b,
    Boolish::Int(n) => n != 0,
    Boolish::Str(s) => matches!(s.trim().to_lowercase().as_str(), "true" | "1"),
  })
}

// ─── Generic envelope ────────────────────────────────────────────────────────

/// The `{ success, data, message }` envelope used by the client endpoints.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
  #[serde(default = "default_true")]
  pub success: bool,
  pub data:    Option<T>,
  pub message: Option<String>,
}

fn default_true() -> bool { true }

// ─── Client listing ──────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientListData {
  pub clients:    Vec<WireClient>,
  pub pagination: WirePagination,
  #[serde(default)]
  pub statistics: WireStatistics,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePagination {
  pub total_pages: u32,
  pub total_items: u64,
}

#[derive(Debug, Default, Deserialize)]
pub struct WireStatistics {
  #[serde(default)]
  pub total:      u64,
  #[serde(default)]
  pub active:     u64,
  #[serde(default)]
  pub blocked:    u64,
  #[serde(default)]
  pub verified:   u64,
  #[serde(default)]
  pub unverified: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireClient {
  #[serde(rename = "_id")]
  pub id:                  String,
  #[serde(default)]
  pub full_name:           String,
  #[serde(default)]
  pub email:               String,
  #[serde(default, deserialize_with = "boolish")]
  pub is_verified:         bool,
  pub verification_status: Option<String>,
  #[serde(default)]
  pub blocked:             bool,
  pub block_reason:        Option<String>,
  pub blocked_at:          Option<DateTime<Utc>>,
  pub created_at:          Option<DateTime<Utc>>,
}

impl From<WireClient> for ClientRecord {
  fn from(wire: WireClient) -> Self {
    Self {
      id:                  wire.id,
      full_name:           wire.full_name,
      email:               wire.email,
      is_verified:         wire.is_verified,
      verification_status: wire.verification_status,
      blocked:             wire.blocked,
      block_reason:        wire.block_reason,
      blocked_at:          wire.blocked_at,
      created_at:          wire.created_at,
    }
  }
}

impl From<ClientListData> for ClientPage {
  fn from(data: ClientListData) -> Self {
    Self {
      clients:     data.clients.into_iter().map(Into::into).collect(),
      total_pages: data.pagination.total_pages,
      total_items: data.pagination.total_items,
      statistics:  ClientStatistics {
        total:      data.statistics.total,
        active:     data.statistics.active,
        blocked:    data.statistics.blocked,
        verified:   data.statistics.verified,
        unverified: data.statistics.unverified,
      },
    }
  }
}

// ─── Pending verifications ───────────────────────────────────────────────────

/// `GET /admin/pending` wraps its payload twice: `{ data: { data: { … } } }`.
#[derive(Debug, Deserialize)]
pub struct PendingEnvelope {
  pub data: PendingOuter,
}

#[derive(Debug, Deserialize)]
pub struct PendingOuter {
  pub data: PendingInner,
}

#[derive(Debug, Deserialize)]
pub struct PendingInner {
  #[serde(default)]
  pub verifications: Vec<WireVerification>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WirePicture {
  pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireVerification {
  #[serde(rename = "_id")]
  pub id: String,
  pub credential_id: String,
  #[serde(default)]
  pub full_name: String,
  #[serde(default)]
  pub email: String,
  pub user_type: UserType,
  #[serde(default, deserialize_with = "boolish")]
  pub is_verified: bool,
  pub verification_status: Option<String>,
  /// Explicit document-presence flag; most records omit it and rely on
  /// the picture fields below.
  pub has_id_documents: Option<bool>,
  #[serde(default)]
  pub id_picture: WirePicture,
  #[serde(default)]
  pub selfie: WirePicture,
  pub id_verification_submitted_at: Option<DateTime<Utc>>,
  pub id_verification_reviewed_at: Option<DateTime<Utc>>,
  pub verified_at: Option<DateTime<Utc>>,
}

impl From<WireVerification> for VerificationSubject {
  fn from(wire: WireVerification) -> Self {
    Self {
      id:                  wire.id,
      credential_id:       wire.credential_id,
      full_name:           wire.full_name,
      email:               wire.email,
      user_type:           wire.user_type,
      is_verified:         wire.is_verified,
      verification_status: wire.verification_status,
      documents_complete:  wire.has_id_documents,
      id_picture:          wire.id_picture.url,
      selfie:              wire.selfie.url,
      submitted_at:        wire.id_verification_submitted_at,
      reviewed_at:         wire.id_verification_reviewed_at,
      verified_at:         wire.verified_at,
    }
  }
}

// ─── Approval ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ApproveEnvelope {
  pub data: Option<ApproveData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveData {
  pub approved_at: Option<DateTime<Utc>>,
}
