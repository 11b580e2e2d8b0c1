//! Tests for the classifier and the pure workflow rules.

use chrono::{TimeZone, Utc};

use crate::{
  Error,
  status::{
    StatusCategory, VerificationStatus, classify, format_status_text,
    normalize_status,
  },
  subject::{UserType, VerificationSubject},
  workflow::{
    ClientQuery, ClientStatusFilter, SortField, SortOrder, apply_approval,
    apply_rejection, check_reason, check_reject,
  },
};

fn subject(user_type: UserType) -> VerificationSubject {
  VerificationSubject {
    id: "64f0c1".into(),
    credential_id: "cred-1".into(),
    full_name: "Alice Liddell".into(),
    email: "alice@example.com".into(),
    user_type,
    is_verified: false,
    verification_status: Some("pending".into()),
    documents_complete: None,
    id_picture: Some("https://cdn.example.com/id.jpg".into()),
    selfie: Some("https://cdn.example.com/selfie.jpg".into()),
    submitted_at: None,
    reviewed_at: None,
    verified_at: None,
  }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

#[test]
fn normalize_trims_lowercases_and_collapses_whitespace() {
  assert_eq!(normalize_status("  Under   Review "), "under_review");
  assert_eq!(normalize_status("PENDING"), "pending");
  assert_eq!(normalize_status("needs_resubmission"), "needs_resubmission");
}

#[test]
fn normalize_is_idempotent() {
  for raw in ["  In Review ", "REJECTED", "needs resubmission", ""] {
    let once = normalize_status(raw);
    assert_eq!(normalize_status(&once), once);
  }
}

#[test]
fn format_status_text_title_cases() {
  assert_eq!(
    format_status_text(Some("needs_resubmission")),
    "Needs Resubmission"
  );
  assert_eq!(format_status_text(Some("pending")), "Pending");
  assert_eq!(format_status_text(Some("under   review")), "Under Review");
}

#[test]
fn format_status_text_missing_or_empty() {
  assert_eq!(format_status_text(None), "Not Provided");
  assert_eq!(format_status_text(Some("")), "Not Provided");
  assert_eq!(format_status_text(Some("   ")), "Not Provided");
}

#[test]
fn parse_covers_known_statuses() {
  assert_eq!(
    VerificationStatus::parse(Some(" In  Review ")),
    VerificationStatus::InReview
  );
  assert_eq!(
    VerificationStatus::parse(Some("DECLINED")),
    VerificationStatus::Declined
  );
  assert_eq!(VerificationStatus::parse(None), VerificationStatus::Missing);
  assert_eq!(
    VerificationStatus::parse(Some("on_hold")),
    VerificationStatus::Unrecognized("on_hold".into())
  );
}

// ─── Classifier ──────────────────────────────────────────────────────────────

#[test]
fn verified_flag_trumps_everything() {
  for raw in [Some("rejected"), Some("garbage"), None] {
    let mut s = subject(UserType::Client);
    s.is_verified = true;
    s.verification_status = raw.map(str::to_string);
    s.id_picture = None;
    s.selfie = None;
    assert_eq!(classify(&s).category, StatusCategory::Verified);
  }
}

#[test]
fn missing_documents_trump_raw_status() {
  for raw in [Some("pending"), Some("rejected"), None] {
    let mut s = subject(UserType::Client);
    s.verification_status = raw.map(str::to_string);
    s.selfie = None;
    let meta = classify(&s);
    assert_eq!(meta.category, StatusCategory::NoDocuments);
    assert_eq!(meta.help, "Must upload ID and selfie");
  }
}

#[test]
fn explicit_presence_flag_overrides_picture_fallback() {
  let mut s = subject(UserType::Client);
  s.documents_complete = Some(false);
  // Both pictures set, but the explicit flag wins.
  assert_eq!(classify(&s).category, StatusCategory::NoDocuments);

  s.documents_complete = Some(true);
  s.id_picture = None;
  s.selfie = None;
  assert_eq!(classify(&s).category, StatusCategory::PendingReview);
}

#[test]
fn pending_statuses_classify_as_pending_review() {
  for raw in [
    "pending",
    "Submitted",
    "PROCESSING",
    "in_review",
    "Under Review",
    " review ",
  ] {
    let mut s = subject(UserType::Client);
    s.verification_status = Some(raw.into());
    let meta = classify(&s);
    assert_eq!(meta.category, StatusCategory::PendingReview, "raw: {raw}");
    assert_eq!(meta.label, "Pending Review");
  }
}

#[test]
fn rejection_statuses_classify_as_action_required() {
  for raw in ["rejected", "Declined", "FAILED", "needs resubmission"] {
    let mut s = subject(UserType::Client);
    s.verification_status = Some(raw.into());
    assert_eq!(
      classify(&s).category,
      StatusCategory::ActionRequired,
      "raw: {raw}"
    );
  }
}

#[test]
fn unknown_or_missing_status_falls_back() {
  for raw in [Some("approved"), Some("on_hold"), Some(""), None] {
    let mut s = subject(UserType::Client);
    s.verification_status = raw.map(str::to_string);
    assert_eq!(
      classify(&s).category,
      StatusCategory::PendingVerification,
      "raw: {raw:?}"
    );
  }
}

// ─── Query rules ─────────────────────────────────────────────────────────────

#[test]
fn change_sort_to_new_field_resets_order_and_page() {
  let mut query = ClientQuery {
    page: 4,
    sort_by: SortField::CreatedAt,
    order: SortOrder::Desc,
    ..ClientQuery::default()
  };
  query.change_sort(SortField::Email);
  assert_eq!(query.sort_by, SortField::Email);
  assert_eq!(query.order, SortOrder::Asc);
  assert_eq!(query.page, 1);
}

#[test]
fn change_sort_on_active_field_flips_order() {
  let mut query = ClientQuery::default();
  query.change_sort(SortField::CreatedAt);
  assert_eq!(query.order, SortOrder::Asc);
  query.change_sort(SortField::CreatedAt);
  assert_eq!(query.order, SortOrder::Desc);
}

#[test]
fn change_filter_resets_page() {
  let mut query = ClientQuery { page: 7, ..ClientQuery::default() };
  query.change_filter(ClientStatusFilter::Blocked);
  assert_eq!(query.status, ClientStatusFilter::Blocked);
  assert_eq!(query.page, 1);
}

#[test]
fn set_search_trims_and_drops_empty() {
  let mut query = ClientQuery { page: 3, ..ClientQuery::default() };
  query.set_search("  alice ");
  assert_eq!(query.search.as_deref(), Some("alice"));
  assert_eq!(query.page, 1);

  query.set_search("   ");
  assert_eq!(query.search, None);
}

// ─── Guards ──────────────────────────────────────────────────────────────────

#[test]
fn blank_reason_is_refused() {
  assert_eq!(check_reason("  "), Err(Error::EmptyReason));
  assert_eq!(check_reject("\t", Some("pending")), Err(Error::EmptyReason));
  assert!(check_reason("fraudulent documents").is_ok());
}

#[test]
fn reject_requires_pending_status() {
  assert!(check_reject("blurry photo", Some("pending")).is_ok());
  assert!(check_reject("blurry photo", Some("  PENDING ")).is_ok());
  assert_eq!(
    check_reject("blurry photo", Some("Approved")),
    Err(Error::NotPending("Approved".into()))
  );
  assert_eq!(
    check_reject("blurry photo", None),
    Err(Error::NotPending("missing".into()))
  );
}

// ─── Reconciliation ──────────────────────────────────────────────────────────

#[test]
fn approving_a_worker_removes_it_from_the_queue() {
  let mut list = vec![subject(UserType::Worker), {
    let mut other = subject(UserType::Worker);
    other.credential_id = "cred-2".into();
    other
  }];
  apply_approval(&mut list, "cred-1", None, Utc::now());
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].credential_id, "cred-2");
}

#[test]
fn approving_a_client_updates_it_in_place() {
  let approved_at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap();
  let mut list = vec![subject(UserType::Client)];
  apply_approval(&mut list, "cred-1", Some(approved_at), Utc::now());

  assert_eq!(list.len(), 1);
  assert_eq!(list[0].verification_status.as_deref(), Some("approved"));
  assert_eq!(list[0].verified_at, Some(approved_at));
}

#[test]
fn approving_a_client_stamps_local_clock_when_server_omits() {
  let now = Utc.with_ymd_and_hms(2026, 3, 14, 10, 0, 0).unwrap();
  let mut list = vec![subject(UserType::Client)];
  apply_approval(&mut list, "cred-1", None, now);
  assert_eq!(list[0].verified_at, Some(now));
}

#[test]
fn approving_an_unknown_credential_is_a_no_op() {
  let mut list = vec![subject(UserType::Client)];
  apply_approval(&mut list, "cred-404", None, Utc::now());
  assert_eq!(list.len(), 1);
  assert_eq!(list[0].verification_status.as_deref(), Some("pending"));
}

#[test]
fn rejection_removes_clients_and_workers_alike() {
  for user_type in [UserType::Client, UserType::Worker] {
    let mut list = vec![subject(user_type)];
    apply_rejection(&mut list, "cred-1");
    assert!(list.is_empty());
  }
}
