//! Application state machine and event dispatcher.

use std::sync::Arc;

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use gavel_core::{
  api::AdminApi,
  subject::{ClientPage, UserType, VerificationSubject},
  workflow::{
    ClientQuery, ClientStatusFilter, SortField, apply_approval,
    apply_rejection, check_reason, check_reject,
  },
};

// ─── View ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
  /// The client-management table.
  Clients,
  /// The pending-verifications queue.
  Verifications,
}

// ─── Modals ───────────────────────────────────────────────────────────────────

/// What a submitted text prompt is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptKind {
  Search,
  BlockReason { client_id: String },
  RejectReason { credential_id: String },
}

/// An open text-input prompt.
#[derive(Debug, Clone)]
pub struct Prompt {
  pub kind:   PromptKind,
  pub title:  &'static str,
  pub buffer: String,
}

/// An action waiting on interactive confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirm {
  Unblock { client_id: String },
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state. Single-threaded and event-driven: every
/// mutation happens on the UI task, so there is no shared mutable state.
pub struct App<A: AdminApi> {
  pub view: View,

  // ── Clients view ──
  pub query:         ClientQuery,
  pub page:          ClientPage,
  pub client_cursor: usize,

  // ── Verifications view ──
  pub queue_type:     UserType,
  pub pending:        Vec<VerificationSubject>,
  pub pending_cursor: usize,

  // ── Plumbing ──
  /// A list fetch is in flight.
  pub loading: bool,
  /// A moderation action is in flight; action keys are ignored until it
  /// settles, so a double keypress cannot double-submit.
  pub busy:    bool,
  /// Blocking notice. While set, only dismissal keys are accepted.
  pub notice:  Option<String>,
  pub confirm: Option<Confirm>,
  pub prompt:  Option<Prompt>,

  // Monotonic fetch tokens, one per view. A response whose token is no
  // longer the latest issued for its view is stale and gets discarded.
  clients_seq: u64,
  pending_seq: u64,

  pub client: Arc<A>,
}

impl<A: AdminApi> App<A> {
  pub fn new(client: A) -> Self {
    Self {
      view: View::Clients,
      query: ClientQuery::default(),
      page: ClientPage::empty(),
      client_cursor: 0,
      queue_type: UserType::Client,
      pending: Vec::new(),
      pending_cursor: 0,
      loading: false,
      busy: false,
      notice: None,
      confirm: None,
      prompt: None,
      clients_seq: 0,
      pending_seq: 0,
      client: Arc::new(client),
    }
  }

  // ── List fetching ─────────────────────────────────────────────────────────

  pub(crate) fn begin_clients_fetch(&mut self) -> u64 {
    self.clients_seq += 1;
    self.loading = true;
    self.clients_seq
  }

  pub(crate) fn finish_clients_fetch(
    &mut self,
    token: u64,
    result: Result<ClientPage, A::Error>,
  ) {
    if token != self.clients_seq {
      // Superseded by a newer fetch; its response owns the view now.
      return;
    }
    self.loading = false;
    match result {
      Ok(page) => {
        self.page = page;
        self.client_cursor = self
          .client_cursor
          .min(self.page.clients.len().saturating_sub(1));
      }
      Err(e) => {
        self.page = ClientPage::empty();
        self.client_cursor = 0;
        self.notice = Some(e.to_string());
      }
    }
  }

  /// Fetch the current client page. One-shot; failure empties the table
  /// and raises the notice.
  pub async fn refresh_clients(&mut self) {
    let token = self.begin_clients_fetch();
    let result = self.client.list_clients(&self.query).await;
    self.finish_clients_fetch(token, result);
  }

  pub(crate) fn begin_pending_fetch(&mut self) -> u64 {
    self.pending_seq += 1;
    self.loading = true;
    self.pending_seq
  }

  pub(crate) fn finish_pending_fetch(
    &mut self,
    token: u64,
    result: Result<Vec<VerificationSubject>, A::Error>,
  ) {
    if token != self.pending_seq {
      return;
    }
    self.loading = false;
    match result {
      Ok(pending) => {
        self.pending = pending;
        self.pending_cursor = self
          .pending_cursor
          .min(self.pending.len().saturating_sub(1));
      }
      Err(e) => {
        self.pending.clear();
        self.pending_cursor = 0;
        self.notice = Some(e.to_string());
      }
    }
  }

  /// Fetch the pending queue for the active user type.
  pub async fn refresh_pending(&mut self) {
    let token = self.begin_pending_fetch();
    let result = self.client.list_pending(self.queue_type).await;
    self.finish_pending_fetch(token, result);
  }

  // ── Query changes ─────────────────────────────────────────────────────────

  pub async fn change_sort(&mut self, field: SortField) {
    self.query.change_sort(field);
    self.refresh_clients().await;
  }

  pub async fn change_filter(&mut self, status: ClientStatusFilter) {
    self.query.change_filter(status);
    self.refresh_clients().await;
  }

  async fn cycle_filter(&mut self) {
    let next = match self.query.status {
      ClientStatusFilter::All => ClientStatusFilter::Active,
      ClientStatusFilter::Active => ClientStatusFilter::Blocked,
      ClientStatusFilter::Blocked => ClientStatusFilter::All,
    };
    self.change_filter(next).await;
  }

  pub async fn next_page(&mut self) {
    if self.query.page < self.page.total_pages {
      self.query.page += 1;
      self.refresh_clients().await;
    }
  }

  pub async fn prev_page(&mut self) {
    if self.query.page > 1 {
      self.query.page -= 1;
      self.refresh_clients().await;
    }
  }

  pub async fn toggle_queue_type(&mut self) {
    self.queue_type = match self.queue_type {
      UserType::Client => UserType::Worker,
      UserType::Worker => UserType::Client,
    };
    self.pending_cursor = 0;
    self.refresh_pending().await;
  }

  // ── Moderation actions ────────────────────────────────────────────────────

  /// Approve a submission. No client-side precondition; the backend is
  /// the authority. Workers leave the queue, clients stay with their
  /// status updated in place.
  pub async fn approve(&mut self, credential_id: &str) {
    if self.busy {
      return;
    }
    self.busy = true;
    match self.client.approve(credential_id).await {
      Ok(approval) => {
        apply_approval(
          &mut self.pending,
          credential_id,
          approval.approved_at,
          Utc::now(),
        );
        self.pending_cursor = self
          .pending_cursor
          .min(self.pending.len().saturating_sub(1));
      }
      Err(e) => self.notice = Some(e.to_string()),
    }
    self.busy = false;
  }

  /// Reject a submission. Refused locally — before any network call —
  /// when the reason is blank or the subject is not pending.
  pub async fn reject(&mut self, credential_id: &str, reason: &str) {
    if self.busy {
      return;
    }
    let raw_status = self
      .pending
      .iter()
      .find(|s| s.credential_id == credential_id)
      .and_then(|s| s.verification_status.clone());
    if let Err(e) = check_reject(reason, raw_status.as_deref()) {
      self.notice = Some(e.to_string());
      return;
    }
    self.busy = true;
    match self.client.reject(credential_id, reason.trim()).await {
      Ok(()) => {
        apply_rejection(&mut self.pending, credential_id);
        self.pending_cursor = self
          .pending_cursor
          .min(self.pending.len().saturating_sub(1));
      }
      Err(e) => self.notice = Some(e.to_string()),
    }
    self.busy = false;
  }

  /// Block a client, then re-fetch the whole page so the server-computed
  /// statistics stay authoritative.
  pub async fn block(&mut self, client_id: &str, reason: &str) {
    if self.busy {
      return;
    }
    if let Err(e) = check_reason(reason) {
      self.notice = Some(e.to_string());
      return;
    }
    self.busy = true;
    match self.client.block_client(client_id, reason.trim()).await {
      Ok(()) => {
        self.busy = false;
        self.refresh_clients().await;
      }
      Err(e) => {
        self.notice = Some(e.to_string());
        self.busy = false;
      }
    }
  }

  /// Stage an unblock behind interactive confirmation.
  pub fn request_unblock(&mut self, client_id: &str) {
    self.confirm = Some(Confirm::Unblock {
      client_id: client_id.to_string(),
    });
  }

  /// Dispatch the confirmed action, if any.
  pub async fn run_confirmed(&mut self) {
    let Some(confirm) = self.confirm.take() else {
      return;
    };
    match confirm {
      Confirm::Unblock { client_id } => {
        if self.busy {
          return;
        }
        self.busy = true;
        match self.client.unblock_client(&client_id).await {
          Ok(()) => {
            self.busy = false;
            self.refresh_clients().await;
          }
          Err(e) => {
            self.notice = Some(e.to_string());
            self.busy = false;
          }
        }
      }
    }
  }

  // ── Selection helpers ─────────────────────────────────────────────────────

  pub fn selected_client(&self) -> Option<&gavel_core::subject::ClientRecord> {
    self.page.clients.get(self.client_cursor)
  }

  pub fn selected_pending(&self) -> Option<&VerificationSubject> {
    self.pending.get(self.pending_cursor)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    // Blocking notice: only dismissal is accepted.
    if self.notice.is_some() {
      if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        self.notice = None;
      }
      return true;
    }

    // Confirmation modal.
    if self.confirm.is_some() {
      match key.code {
        KeyCode::Char('y') | KeyCode::Enter => self.run_confirmed().await,
        KeyCode::Char('n') | KeyCode::Esc => self.confirm = None,
        _ => {}
      }
      return true;
    }

    // Text prompt: all printable keys go into the buffer.
    if self.prompt.is_some() {
      return self.handle_prompt_key(key).await;
    }

    match self.view {
      View::Clients => self.handle_clients_key(key).await,
      View::Verifications => self.handle_verifications_key(key).await,
    }
  }

  async fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Esc => {
        self.prompt = None;
      }
      KeyCode::Enter => {
        if let Some(prompt) = self.prompt.take() {
          self.submit_prompt(prompt).await;
        }
      }
      KeyCode::Backspace => {
        if let Some(prompt) = &mut self.prompt {
          prompt.buffer.pop();
        }
      }
      KeyCode::Char(c) => {
        if let Some(prompt) = &mut self.prompt {
          prompt.buffer.push(c);
        }
      }
      _ => {}
    }
    true
  }

  async fn submit_prompt(&mut self, prompt: Prompt) {
    match prompt.kind {
      PromptKind::Search => {
        self.query.set_search(&prompt.buffer);
        self.refresh_clients().await;
      }
      PromptKind::BlockReason { client_id } => {
        self.block(&client_id, &prompt.buffer).await;
      }
      PromptKind::RejectReason { credential_id } => {
        self.reject(&credential_id, &prompt.buffer).await;
      }
    }
  }

  async fn handle_clients_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => {
        self.view = View::Verifications;
        if self.pending.is_empty() {
          self.refresh_pending().await;
        }
      }

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.client_cursor + 1 < self.page.clients.len() {
          self.client_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.client_cursor = self.client_cursor.saturating_sub(1);
      }
      KeyCode::Right | KeyCode::Char(']') => self.next_page().await,
      KeyCode::Left | KeyCode::Char('[') => self.prev_page().await,

      // Query
      KeyCode::Char('/') => {
        self.prompt = Some(Prompt {
          kind:   PromptKind::Search,
          title:  "Search clients",
          buffer: String::new(),
        });
      }
      KeyCode::Char('f') => self.cycle_filter().await,
      KeyCode::Char('c') => self.change_sort(SortField::CreatedAt).await,
      KeyCode::Char('n') => self.change_sort(SortField::FullName).await,
      KeyCode::Char('e') => self.change_sort(SortField::Email).await,
      KeyCode::Char('v') => self.change_sort(SortField::Status).await,
      KeyCode::Char('g') => self.refresh_clients().await,

      // Moderation
      KeyCode::Char('b') => {
        if self.busy {
          return true;
        }
        let target = self
          .selected_client()
          .filter(|c| !c.blocked)
          .map(|c| c.id.clone());
        if let Some(client_id) = target {
          self.prompt = Some(Prompt {
            kind:   PromptKind::BlockReason { client_id },
            title:  "Block reason",
            buffer: String::new(),
          });
        }
      }
      KeyCode::Char('u') => {
        if self.busy {
          return true;
        }
        let target = self
          .selected_client()
          .filter(|c| c.blocked)
          .map(|c| c.id.clone());
        if let Some(client_id) = target {
          self.request_unblock(&client_id);
        }
      }

      _ => {}
    }
    true
  }

  async fn handle_verifications_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,
      KeyCode::Tab => self.view = View::Clients,

      // Navigation
      KeyCode::Down | KeyCode::Char('j') => {
        if self.pending_cursor + 1 < self.pending.len() {
          self.pending_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.pending_cursor = self.pending_cursor.saturating_sub(1);
      }

      KeyCode::Char('w') => self.toggle_queue_type().await,
      KeyCode::Char('g') => self.refresh_pending().await,

      // Moderation
      KeyCode::Char('a') => {
        if let Some(id) =
          self.selected_pending().map(|s| s.credential_id.clone())
        {
          self.approve(&id).await;
        }
      }
      KeyCode::Char('r') => {
        if self.busy {
          return true;
        }
        if let Some(id) =
          self.selected_pending().map(|s| s.credential_id.clone())
        {
          self.prompt = Some(Prompt {
            kind:   PromptKind::RejectReason { credential_id: id },
            title:  "Rejection reason",
            buffer: String::new(),
          });
        }
      }

      _ => {}
    }
    true
  }
}
