//! HTTP transport for the Gavel moderation console.
//!
//! Implements [`gavel_core::api::AdminApi`] over reqwest against the
//! marketplace backend. Credentials come from a [`TokenProvider`] injected
//! at construction; there is no ambient global token state.

pub mod error;
pub mod wire;

use std::{sync::Arc, time::Duration};

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::json;

use gavel_core::{
  api::AdminApi,
  subject::{Approval, ClientPage, UserType, VerificationSubject},
  workflow::ClientQuery,
};

pub use error::{Error, Result};

// ─── Credentials ─────────────────────────────────────────────────────────────

/// Source of the bearer token attached to every request.
pub trait TokenProvider: Send + Sync {
  /// The current token, or `None` to send the request unauthenticated.
  fn token(&self) -> Option<String>;
}

/// A fixed token supplied at startup (CLI flag, env var, or config file).
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
  fn token(&self) -> Option<String> {
    (!self.0.is_empty()).then(|| self.0.clone())
  }
}

// ─── Client ──────────────────────────────────────────────────────────────────

/// Async HTTP client for the moderation backend.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct AdminClient {
  http:     Client,
  base_url: String,
  tokens:   Arc<dyn TokenProvider>,
}

impl AdminClient {
  pub fn new(
    base_url: impl Into<String>,
    tokens: Arc<dyn TokenProvider>,
  ) -> Result<Self> {
    let http = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self {
      http,
      base_url: base_url.into(),
      tokens,
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{path}", self.base_url.trim_end_matches('/'))
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match self.tokens.token() {
      Some(token) => req.bearer_auth(token),
      None => req,
    }
  }

  /// Send a request and decode the response body, folding non-2xx
  /// statuses and `success: false` envelopes into [`Error`].
  async fn recv<T>(&self, req: reqwest::RequestBuilder) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let resp = self.auth(req).send().await?;
    let status = resp.status();
    if !status.is_success() {
      // Prefer the application's own message when the body carries one.
      if let Ok(env) = resp.json::<wire::Envelope<serde_json::Value>>().await
        && let Some(message) = env.message
      {
        return Err(Error::Api { message });
      }
      return Err(Error::Http { status });
    }
    Ok(resp.json().await?)
  }

  /// Like [`Self::recv`] but for the `{ success, data, message }` envelope
  /// endpoints: a 2xx with `success: false` is an application failure.
  async fn recv_envelope<T>(
    &self,
    req: reqwest::RequestBuilder,
  ) -> Result<wire::Envelope<T>>
  where
    T: DeserializeOwned,
  {
    let env: wire::Envelope<T> = self.recv(req).await?;
    if !env.success {
      return Err(Error::Api {
        message: env
          .message
          .unwrap_or_else(|| "request failed".to_string()),
      });
    }
    Ok(env)
  }
}

// ─── AdminApi implementation ─────────────────────────────────────────────────

impl AdminApi for AdminClient {
  type Error = Error;

  /// `GET /clients?page&search&status&sortBy&order`
  async fn list_clients(&self, query: &ClientQuery) -> Result<ClientPage> {
    let mut params = vec![
      ("page", query.page.to_string()),
      ("status", query.status.as_ref().to_string()),
      ("sortBy", query.sort_by.as_ref().to_string()),
      ("order", query.order.as_ref().to_string()),
    ];
    if let Some(search) = &query.search {
      params.push(("search", search.clone()));
    }

    tracing::debug!(page = query.page, "listing clients");
    let env: wire::Envelope<wire::ClientListData> = self
      .recv_envelope(self.http.get(self.url("/clients")).query(&params))
      .await?;
    let data = env.data.ok_or_else(|| Error::Api {
      message: "response carried no data".to_string(),
    })?;
    Ok(data.into())
  }

  /// `POST /clients/{id}/block` — body `{ reason }`
  async fn block_client(&self, client_id: &str, reason: &str) -> Result<()> {
    tracing::info!(client_id, "blocking client");
    self
      .recv_envelope::<serde_json::Value>(
        self
          .http
          .post(self.url(&format!("/clients/{client_id}/block")))
          .json(&json!({ "reason": reason })),
      )
      .await?;
    Ok(())
  }

  /// `POST /clients/{id}/unblock`
  async fn unblock_client(&self, client_id: &str) -> Result<()> {
    tracing::info!(client_id, "unblocking client");
    self
      .recv_envelope::<serde_json::Value>(
        self
          .http
          .post(self.url(&format!("/clients/{client_id}/unblock"))),
      )
      .await?;
    Ok(())
  }

  /// `GET /admin/pending?userType={client|worker}`
  async fn list_pending(
    &self,
    user_type: UserType,
  ) -> Result<Vec<VerificationSubject>> {
    tracing::debug!(user_type = user_type.as_ref(), "listing pending");
    let env: wire::PendingEnvelope = self
      .recv(
        self
          .http
          .get(self.url("/admin/pending"))
          .query(&[("userType", user_type.as_ref())]),
      )
      .await?;
    Ok(
      env
        .data
        .data
        .verifications
        .into_iter()
        .map(Into::into)
        .collect(),
    )
  }

  /// `POST /admin/approve/{credentialId}` — body `{ requireResubmission }`
  async fn approve(&self, credential_id: &str) -> Result<Approval> {
    tracing::info!(credential_id, "approving verification");
    let env: wire::ApproveEnvelope = self
      .recv(
        self
          .http
          .post(self.url(&format!("/admin/approve/{credential_id}")))
          .json(&json!({ "requireResubmission": false })),
      )
      .await?;
    Ok(Approval {
      approved_at: env.data.and_then(|d| d.approved_at),
    })
  }

  /// `POST /admin/reject/{credentialId}` — body `{ reason, requireResubmission }`
  async fn reject(&self, credential_id: &str, reason: &str) -> Result<()> {
    tracing::info!(credential_id, "rejecting verification");
    self
      .recv::<serde_json::Value>(
        self
          .http
          .post(self.url(&format!("/admin/reject/{credential_id}")))
          .json(&json!({ "reason": reason, "requireResubmission": false })),
      )
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests;
