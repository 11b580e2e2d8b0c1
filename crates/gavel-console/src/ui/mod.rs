//! TUI rendering — orchestrates all panes.
//!
//! Nothing in here decides anything: every badge, flag, and guard shown on
//! screen is derived in `gavel-core`.

pub mod clients;
pub mod verifications;

use gavel_core::api::AdminApi;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{App, Confirm, View};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<A: AdminApi>(f: &mut Frame, app: &App<A>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  match app.view {
    View::Clients => clients::draw(f, rows[1], app),
    View::Verifications => verifications::draw(f, rows[1], app),
  }
  draw_status(f, rows[2], app);

  // Modal overlays, most urgent wins.
  if let Some(message) = &app.notice {
    draw_modal(f, area, " Error ", message, "Enter dismiss");
  } else if let Some(Confirm::Unblock { client_id }) = &app.confirm {
    draw_modal(
      f,
      area,
      " Confirm ",
      &format!("Unblock client {client_id}?"),
      "y confirm  n cancel",
    );
  } else if let Some(prompt) = &app.prompt {
    draw_modal(
      f,
      area,
      &format!(" {} ", prompt.title),
      &format!("{}_", prompt.buffer),
      "Enter submit  Esc cancel",
    );
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let tabs = match app.view {
    View::Clients => " gavel  [Clients] Verifications  (Tab switch)",
    View::Verifications => " gavel  Clients [Verifications]  (Tab switch)",
  };
  let line = Line::from(Span::styled(
    tabs,
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  ));
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::DarkGray)),
    area,
  );
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<A: AdminApi>(f: &mut Frame, area: Rect, app: &App<A>) {
  let hints = match app.view {
    View::Clients => {
      "↑↓/jk navigate  [/] page  / search  f filter  c/n/e/v sort  b block  u unblock  q quit"
    }
    View::Verifications => {
      "↑↓/jk navigate  w queue  a approve  r reject  g refresh  q quit"
    }
  };

  let mode = if app.busy {
    " WORKING "
  } else if app.loading {
    " LOADING "
  } else {
    " READY "
  };

  let mode_span = Span::styled(
    mode,
    Style::default()
      .fg(Color::Black)
      .bg(if app.busy || app.loading {
        Color::Yellow
      } else {
        Color::Cyan
      })
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(
    format!("  {hints}"),
    Style::default().fg(Color::DarkGray),
  );

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}

// ─── Modal ────────────────────────────────────────────────────────────────────

fn draw_modal(f: &mut Frame, area: Rect, title: &str, body: &str, hint: &str) {
  let modal = centered(area, 60, 5);
  f.render_widget(Clear, modal);

  let block = Block::default()
    .title(title.to_string())
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::Yellow));
  let inner = block.inner(modal);
  f.render_widget(block, modal);

  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([Constraint::Min(1), Constraint::Length(1)])
    .split(inner);

  f.render_widget(
    Paragraph::new(body.to_string()).wrap(ratatui::widgets::Wrap { trim: true }),
    rows[0],
  );
  f.render_widget(
    Paragraph::new(hint.to_string()).style(Style::default().fg(Color::DarkGray)),
    rows[1],
  );
}

/// A centred rect of at most `width` × `height` within `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}
