//! Decode tests for the documented backend payloads.

use gavel_core::subject::{ClientPage, UserType, VerificationSubject};

use crate::wire;

#[test]
fn decode_client_listing() {
  let body = r#"{
    "success": true,
    "data": {
      "clients": [
        {
          "_id": "64f0c1a2",
          "fullName": "Alice Liddell",
          "email": "alice@example.com",
          "isVerified": true,
          "verificationStatus": "approved",
          "blocked": false,
          "createdAt": "2026-01-12T08:30:00Z"
        },
        {
          "_id": "64f0c1a3",
          "fullName": "Bob Crane",
          "email": "bob@example.com",
          "isVerified": "false",
          "blocked": true,
          "blockReason": "chargeback fraud",
          "blockedAt": "2026-02-01T12:00:00Z"
        }
      ],
      "pagination": { "totalPages": 3, "totalItems": 42 },
      "statistics": {
        "total": 42, "blocked": 5, "active": 37,
        "verified": 30, "unverified": 12
      }
    },
    "message": "ok"
  }"#;

  let env: wire::Envelope<wire::ClientListData> =
    serde_json::from_str(body).unwrap();
  assert!(env.success);

  let page: ClientPage = env.data.unwrap().into();
  assert_eq!(page.total_pages, 3);
  assert_eq!(page.total_items, 42);
  assert_eq!(page.statistics.blocked, 5);

  assert_eq!(page.clients.len(), 2);
  assert!(page.clients[0].is_verified);
  assert!(!page.clients[0].blocked);
  // Boolean-ish string decodes leniently.
  assert!(!page.clients[1].is_verified);
  assert_eq!(
    page.clients[1].block_reason.as_deref(),
    Some("chargeback fraud")
  );
}

#[test]
fn decode_failure_envelope() {
  let body = r#"{ "success": false, "message": "client not found" }"#;
  let env: wire::Envelope<wire::ClientListData> =
    serde_json::from_str(body).unwrap();
  assert!(!env.success);
  assert_eq!(env.message.as_deref(), Some("client not found"));
  assert!(env.data.is_none());
}

#[test]
fn decode_pending_verifications() {
  // The pending endpoint nests its payload twice.
  let body = r#"{
    "data": {
      "data": {
        "verifications": [
          {
            "_id": "64f0aa01",
            "credentialId": "cred-77",
            "fullName": "Cara Vance",
            "email": "cara@example.com",
            "userType": "worker",
            "isVerified": 0,
            "verificationStatus": "Pending",
            "idVerificationSubmittedAt": "2026-03-01T10:00:00Z",
            "idPicture": { "url": "https://cdn.example.com/id.jpg" },
            "selfie": { "url": "https://cdn.example.com/selfie.jpg" }
          },
          {
            "_id": "64f0aa02",
            "credentialId": "cred-78",
            "fullName": "Dan Ochoa",
            "email": "dan@example.com",
            "userType": "client"
          }
        ]
      }
    }
  }"#;

  let env: wire::PendingEnvelope = serde_json::from_str(body).unwrap();
  let subjects: Vec<VerificationSubject> = env
    .data
    .data
    .verifications
    .into_iter()
    .map(Into::into)
    .collect();

  assert_eq!(subjects.len(), 2);

  let cara = &subjects[0];
  assert_eq!(cara.user_type, UserType::Worker);
  assert!(!cara.is_verified);
  assert_eq!(cara.verification_status.as_deref(), Some("Pending"));
  // Both picture URLs present: documents on file via the fallback rule.
  assert!(cara.has_documents());

  let dan = &subjects[1];
  assert_eq!(dan.user_type, UserType::Client);
  // No flag, no pictures: documents missing.
  assert!(!dan.has_documents());
}

#[test]
fn explicit_document_flag_wins_over_pictures() {
  let body = r#"{
    "_id": "64f0aa03",
    "credentialId": "cred-79",
    "userType": "client",
    "hasIdDocuments": true
  }"#;
  let wire: wire::WireVerification = serde_json::from_str(body).unwrap();
  let subject: VerificationSubject = wire.into();
  assert!(subject.id_picture.is_none() && subject.selfie.is_none());
  assert!(subject.has_documents());
}

#[test]
fn decode_approve_response() {
  let env: wire::ApproveEnvelope =
    serde_json::from_str(r#"{ "data": { "approvedAt": "2026-03-14T09:26:53Z" } }"#)
      .unwrap();
  let at = env.data.unwrap().approved_at.unwrap();
  assert_eq!(at.to_rfc3339(), "2026-03-14T09:26:53+00:00");

  // The server may omit the timestamp entirely.
  let env: wire::ApproveEnvelope =
    serde_json::from_str(r#"{ "data": {} }"#).unwrap();
  assert!(env.data.unwrap().approved_at.is_none());
}
