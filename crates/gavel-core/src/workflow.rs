//! Pure moderation-workflow rules.
//!
//! All rules here run before (guards) or after (reconciliation) a backend
//! call. The calls themselves go through [`crate::api::AdminApi`]; nothing
//! in this module performs I/O.
//!
//! A submission's lifecycle is `pending → {approved, rejected}`, both
//! terminal for this workflow. Block/unblock is a separate `active ⇄
//! blocked` toggle with no automatic transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  status::normalize_status,
  subject::{UserType, VerificationSubject},
};

// ─── Listing query ───────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
  Asc,
  Desc,
}

impl SortOrder {
  pub fn flipped(self) -> Self {
    match self {
      Self::Asc => Self::Desc,
      Self::Desc => Self::Asc,
    }
  }
}

/// Sortable columns of the client table. The strum forms are the exact
/// `sortBy` values the backend expects.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum SortField {
  CreatedAt,
  FullName,
  Email,
  Status,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ClientStatusFilter {
  All,
  Active,
  Blocked,
}

/// Parameters for the client listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientQuery {
  pub page:    u32,
  /// Trimmed free-text search; `None` when the input is empty.
  pub search:  Option<String>,
  pub status:  ClientStatusFilter,
  pub sort_by: SortField,
  pub order:   SortOrder,
}

impl Default for ClientQuery {
  fn default() -> Self {
    Self {
      page:    1,
      search:  None,
      status:  ClientStatusFilter::All,
      sort_by: SortField::CreatedAt,
      order:   SortOrder::Desc,
    }
  }
}

impl ClientQuery {
  /// Selecting the active sort field flips the order; selecting a new
  /// field resets the order to ascending. Either way the page resets to 1.
  pub fn change_sort(&mut self, field: SortField) {
    if self.sort_by == field {
      self.order = self.order.flipped();
    } else {
      self.sort_by = field;
      self.order = SortOrder::Asc;
    }
    self.page = 1;
  }

  /// Changing the status filter resets the page to 1.
  pub fn change_filter(&mut self, status: ClientStatusFilter) {
    self.status = status;
    self.page = 1;
  }

  /// Set the search text, trimming it and dropping it entirely when empty.
  /// Resets the page to 1.
  pub fn set_search(&mut self, text: &str) {
    let trimmed = text.trim();
    self.search = (!trimmed.is_empty()).then(|| trimmed.to_string());
    self.page = 1;
  }
}

// ─── Guards ──────────────────────────────────────────────────────────────────

/// A moderation reason must be non-empty after trimming.
pub fn check_reason(reason: &str) -> Result<()> {
  if reason.trim().is_empty() {
    return Err(Error::EmptyReason);
  }
  Ok(())
}

/// Rejection requires a reason and a subject whose raw status is exactly
/// `"pending"` (case-insensitive). Refused before any network call.
pub fn check_reject(reason: &str, raw_status: Option<&str>) -> Result<()> {
  check_reason(reason)?;
  let normalized = raw_status.map(normalize_status).unwrap_or_default();
  if normalized != "pending" {
    return Err(Error::NotPending(
      raw_status.unwrap_or("missing").to_string(),
    ));
  }
  Ok(())
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

/// Reconcile the in-memory pending list after a successful approval.
///
/// Workers leave the pending queue entirely. Clients stay visible with
/// their raw status set to `approved` and a timestamp — the server's if it
/// supplied one, else `now`.
pub fn apply_approval(
  subjects: &mut Vec<VerificationSubject>,
  credential_id: &str,
  approved_at: Option<DateTime<Utc>>,
  now: DateTime<Utc>,
) {
  let Some(index) = subjects
    .iter()
    .position(|s| s.credential_id == credential_id)
  else {
    return;
  };
  match subjects[index].user_type {
    UserType::Worker => {
      subjects.remove(index);
    }
    UserType::Client => {
      let subject = &mut subjects[index];
      subject.verification_status = Some("approved".to_string());
      subject.verified_at = Some(approved_at.unwrap_or(now));
    }
  }
}

/// Reconcile after a successful rejection: the subject leaves the pending
/// list unconditionally, client or worker.
pub fn apply_rejection(
  subjects: &mut Vec<VerificationSubject>,
  credential_id: &str,
) {
  subjects.retain(|s| s.credential_id != credential_id);
}
