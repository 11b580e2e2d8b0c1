//! The verification-status classifier.
//!
//! Raw backend status strings are free-form; this module normalises them
//! into a closed [`VerificationStatus`] enumeration and derives the single
//! [`StatusCategory`] shown next to each subject. The category is computed
//! fresh on every render and never persisted.

use serde::{Deserialize, Serialize};

use crate::subject::VerificationSubject;

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Canonicalise a raw status string: trim, lowercase, collapse each
/// whitespace run to a single underscore. Idempotent.
pub fn normalize_status(raw: &str) -> String {
  raw
    .trim()
    .to_lowercase()
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("_")
}

/// Human-readable form of a raw status: underscores become spaces, the
/// first letter of each word is capitalised. Missing or empty status
/// renders as `"Not Provided"`.
pub fn format_status_text(raw: Option<&str>) -> String {
  let Some(raw) = raw else {
    return "Not Provided".to_string();
  };
  let words: Vec<String> = raw
    .replace('_', " ")
    .split_whitespace()
    .map(|word| {
      let mut chars = word.chars();
      match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
      }
    })
    .collect();
  if words.is_empty() {
    "Not Provided".to_string()
  } else {
    words.join(" ")
  }
}

// ─── Closed status enumeration ───────────────────────────────────────────────

/// Every raw status the backend is known to emit, plus escape hatches for
/// anything unrecognised or absent. Parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
  Pending,
  Submitted,
  Processing,
  InReview,
  UnderReview,
  Review,
  Approved,
  Rejected,
  Declined,
  Failed,
  NeedsResubmission,
  Unrecognized(String),
  Missing,
}

impl VerificationStatus {
  /// Parse a raw backend status via [`normalize_status`].
  pub fn parse(raw: Option<&str>) -> Self {
    let Some(raw) = raw else {
      return Self::Missing;
    };
    match normalize_status(raw).as_str() {
      "" => Self::Missing,
      "pending" => Self::Pending,
      "submitted" => Self::Submitted,
      "processing" => Self::Processing,
      "in_review" => Self::InReview,
      "under_review" => Self::UnderReview,
      "review" => Self::Review,
      "approved" => Self::Approved,
      "rejected" => Self::Rejected,
      "declined" => Self::Declined,
      "failed" => Self::Failed,
      "needs_resubmission" => Self::NeedsResubmission,
      other => Self::Unrecognized(other.to_string()),
    }
  }

  /// Whether this status means the submission is awaiting a reviewer.
  pub fn is_in_review(&self) -> bool {
    matches!(
      self,
      Self::Pending
        | Self::Submitted
        | Self::Processing
        | Self::InReview
        | Self::UnderReview
        | Self::Review
    )
  }

  /// Whether this status means the submitter must act (resubmit).
  pub fn needs_action(&self) -> bool {
    matches!(
      self,
      Self::Rejected | Self::Declined | Self::Failed | Self::NeedsResubmission
    )
  }
}

// ─── Category ────────────────────────────────────────────────────────────────

/// The derived, read-only presentation category for a subject.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum StatusCategory {
  Verified,
  NoDocuments,
  PendingReview,
  ActionRequired,
  PendingVerification,
}

impl StatusCategory {
  /// Badge label shown in the row.
  pub fn label(&self) -> &'static str {
    match self {
      Self::Verified => "Verified",
      Self::NoDocuments => "No Documents",
      Self::PendingReview => "Pending Review",
      Self::ActionRequired => "Action Required",
      Self::PendingVerification => "Pending Verification",
    }
  }

  /// One-line helper text shown alongside the badge.
  pub fn help(&self) -> &'static str {
    match self {
      Self::Verified => "Identity has been confirmed",
      Self::NoDocuments => "Must upload ID and selfie",
      Self::PendingReview => "Documents submitted and awaiting review",
      Self::ActionRequired => "Submission was rejected and must be redone",
      Self::PendingVerification => "Verification has not been completed",
    }
  }

  /// Icon tag consumed by the rendering layer.
  pub fn icon(&self) -> &'static str {
    match self {
      Self::Verified => "shield-check",
      Self::NoDocuments => "file-x",
      Self::PendingReview => "clock",
      Self::ActionRequired => "alert-triangle",
      Self::PendingVerification => "hourglass",
    }
  }
}

/// A category bundled with its display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMeta {
  pub category: StatusCategory,
  pub label:    &'static str,
  pub help:     &'static str,
  pub icon:     &'static str,
}

impl From<StatusCategory> for StatusMeta {
  fn from(category: StatusCategory) -> Self {
    Self {
      category,
      label: category.label(),
      help: category.help(),
      icon: category.icon(),
    }
  }
}

// ─── Classifier ──────────────────────────────────────────────────────────────

/// Derive the presentation category for a subject. Pure; no I/O.
///
/// Priority-ordered, first match wins:
/// 1. The canonical `is_verified` flag trumps everything.
/// 2. Missing documents trump whatever the raw status claims.
/// 3. Otherwise the raw status decides, with `PendingVerification` as the
///    fallback for anything unrecognised or absent.
pub fn classify(subject: &VerificationSubject) -> StatusMeta {
  if subject.is_verified {
    return StatusCategory::Verified.into();
  }
  if !subject.has_documents() {
    return StatusCategory::NoDocuments.into();
  }
  let status = VerificationStatus::parse(subject.verification_status.as_deref());
  if status.is_in_review() {
    StatusCategory::PendingReview.into()
  } else if status.needs_action() {
    StatusCategory::ActionRequired.into()
  } else {
    StatusCategory::PendingVerification.into()
  }
}
